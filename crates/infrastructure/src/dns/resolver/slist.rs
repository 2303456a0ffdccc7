//! Candidate server lists (SLIST), built from the cache or from a referral.

use crate::dns::cache::RecordCache;
use ferrous_recursor_domain::{
    Candidate, CandidateList, DomainName, RecordClass, RecordType, ResourceRecord,
};
use std::net::Ipv4Addr;

/// Candidates for the closest enclosing zone with live cached NS records.
///
/// Walks `name` and its ancestors, most specific first. `None` when nothing
/// is cached, including for the root.
pub fn from_cache(cache: &RecordCache, name: &DomainName) -> Option<CandidateList> {
    name.ancestors().find_map(|zone| {
        let servers = ns_targets(&cache.lookup(&zone, RecordType::NS, RecordClass::IN));
        if servers.is_empty() {
            return None;
        }

        let candidates = candidates_for(&servers, |server| {
            addresses(&cache.lookup(server, RecordType::A, RecordClass::IN))
        });
        Some(CandidateList::new(zone, candidates))
    })
}

/// Candidates for a referral: the NS records owned by `zone` in `authorities`,
/// each paired with any glue address found in `additionals`.
pub fn from_referral(
    zone: &DomainName,
    authorities: &[ResourceRecord],
    additionals: &[ResourceRecord],
) -> CandidateList {
    let servers = ns_targets(authorities.iter().filter(|r| &r.name == zone));

    let candidates = candidates_for(&servers, |server| {
        addresses(
            additionals
                .iter()
                .filter(|r| r.matches(server, RecordType::A, RecordClass::IN)),
        )
    });
    CandidateList::new(zone.clone(), candidates)
}

fn candidates_for<F>(servers: &[DomainName], mut glue: F) -> Vec<Candidate>
where
    F: FnMut(&DomainName) -> Vec<Ipv4Addr>,
{
    let mut candidates = Vec::with_capacity(servers.len());
    for server in servers {
        let ips = glue(server);
        if ips.is_empty() {
            candidates.push(Candidate::glueless(server.clone()));
        } else {
            candidates.extend(
                ips.into_iter()
                    .map(|ip| Candidate::with_address(Some(server.clone()), ip)),
            );
        }
    }
    candidates.dedup();
    candidates
}

fn ns_targets<'a>(records: impl IntoIterator<Item = &'a ResourceRecord>) -> Vec<DomainName> {
    let mut servers: Vec<DomainName> = Vec::new();
    for record in records
        .into_iter()
        .filter(|r| r.record_type == RecordType::NS)
    {
        if let Some(server) = record.rdata.as_name() {
            if !servers.contains(server) {
                servers.push(server.clone());
            }
        }
    }
    servers
}

fn addresses<'a>(records: impl IntoIterator<Item = &'a ResourceRecord>) -> Vec<Ipv4Addr> {
    records.into_iter().filter_map(|r| r.rdata.as_ipv4()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::cache::{CacheSettings, ManualClock};
    use std::sync::Arc;

    fn name(value: &str) -> DomainName {
        DomainName::parse(value).unwrap()
    }

    fn cache() -> RecordCache {
        RecordCache::with_clock(CacheSettings::default(), Arc::new(ManualClock::new(1_000)))
    }

    #[test]
    fn test_from_cache_prefers_closest_zone() {
        let cache = cache();
        cache
            .add(ResourceRecord::ns(name("edu"), name("a.edu-servers.net"), 3600))
            .unwrap();
        cache
            .add(ResourceRecord::ns(name("umass.edu"), name("ns1.umass.edu"), 3600))
            .unwrap();
        cache
            .add(ResourceRecord::a(name("ns1.umass.edu"), Ipv4Addr::new(128, 119, 10, 27), 3600))
            .unwrap();

        let slist = from_cache(&cache, &name("gaia.cs.umass.edu")).unwrap();
        assert_eq!(slist.zone, name("umass.edu"));
        assert_eq!(
            slist.candidates,
            vec![Candidate::with_address(
                Some(name("ns1.umass.edu")),
                Ipv4Addr::new(128, 119, 10, 27)
            )]
        );
    }

    #[test]
    fn test_from_cache_marks_glueless_servers() {
        let cache = cache();
        cache
            .add(ResourceRecord::ns(name("zxcs.nl"), name("ns1.zxcs.nl"), 3600))
            .unwrap();

        let slist = from_cache(&cache, &name("www.zxcs.nl")).unwrap();
        assert_eq!(slist.candidates, vec![Candidate::glueless(name("ns1.zxcs.nl"))]);
    }

    #[test]
    fn test_from_cache_empty_is_none() {
        assert!(from_cache(&cache(), &name("wiki.nl")).is_none());
    }

    #[test]
    fn test_from_referral_pairs_glue() {
        let authorities = vec![
            ResourceRecord::ns(name("nl"), name("ns1.dns.nl"), 172800),
            ResourceRecord::ns(name("nl"), name("ns2.dns.nl"), 172800),
        ];
        let additionals = vec![
            ResourceRecord::a(name("ns1.dns.nl"), Ipv4Addr::new(194, 0, 28, 53), 172800),
            ResourceRecord::a(name("other.example"), Ipv4Addr::new(192, 0, 2, 1), 172800),
        ];

        let slist = from_referral(&name("nl"), &authorities, &additionals);
        assert_eq!(slist.zone, name("nl"));
        assert_eq!(
            slist.candidates,
            vec![
                Candidate::with_address(Some(name("ns1.dns.nl")), Ipv4Addr::new(194, 0, 28, 53)),
                Candidate::glueless(name("ns2.dns.nl")),
            ]
        );
    }
}
