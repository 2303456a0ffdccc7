//! Classification of a name server response for the name being resolved.

use super::slist;
use ferrous_recursor_domain::{
    CandidateList, DomainError, DomainName, RecordClass, RecordType, ResourceRecord,
    ServerResponse,
};
use std::net::Ipv4Addr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    /// Final addresses, reached through `aliases` (possibly none).
    Answer {
        aliases: Vec<DomainName>,
        addresses: Vec<Ipv4Addr>,
    },
    /// The answer redirects to `target` without carrying its addresses.
    /// `aliases` ends with `target`.
    Alias {
        aliases: Vec<DomainName>,
        target: DomainName,
    },
    /// Delegation to a zone closer to the name.
    Referral(CandidateList),
    NameError,
    NoData,
}

/// Classify `response` to a query for `name` sent to servers for `zone`.
///
/// Only the answer section can produce addresses. A records that show up
/// in the authority or additional sections are glue, never an answer.
pub fn analyze(
    response: &ServerResponse,
    name: &DomainName,
    zone: &DomainName,
) -> Result<Analysis, DomainError> {
    if response.is_nxdomain() {
        return Ok(Analysis::NameError);
    }

    if !response.answers.is_empty() {
        return analyze_answers(&response.answers, name);
    }

    let has_soa = response
        .authorities
        .iter()
        .any(|r| r.record_type == RecordType::SOA);

    if has_soa && response.authoritative {
        return Ok(Analysis::NoData);
    }

    if let Some(child) = referral_zone(&response.authorities) {
        if !name.is_subdomain_of(&child) || child.label_count() <= zone.label_count() {
            return Err(DomainError::DelegationLoopDetected {
                name: name.to_string(),
                zone: child.to_string(),
            });
        }

        let next = slist::from_referral(&child, &response.authorities, &response.additionals);
        return Ok(Analysis::Referral(next));
    }

    if has_soa {
        return Ok(Analysis::NoData);
    }

    Err(DomainError::MalformedResponse(format!(
        "empty answer for {} carries neither a referral nor an SOA",
        name
    )))
}

fn analyze_answers(answers: &[ResourceRecord], name: &DomainName) -> Result<Analysis, DomainError> {
    if let Some(unexpected) = answers
        .iter()
        .find(|r| !matches!(r.record_type, RecordType::A | RecordType::CNAME))
    {
        return Err(DomainError::MalformedResponse(format!(
            "unexpected {} record for {} in answer to {}",
            unexpected.record_type, unexpected.name, name
        )));
    }

    let mut aliases: Vec<DomainName> = Vec::new();
    let mut current = name.clone();

    while let Some(target) = answers
        .iter()
        .find(|r| r.matches(&current, RecordType::CNAME, RecordClass::IN))
        .and_then(|r| r.rdata.as_name())
    {
        if target == name || aliases.contains(target) {
            return Err(DomainError::AliasLoopDetected(name.to_string()));
        }
        aliases.push(target.clone());
        current = target.clone();
    }

    let addresses: Vec<Ipv4Addr> = answers
        .iter()
        .filter(|r| r.record_type == RecordType::A && r.class == RecordClass::IN)
        .filter(|r| &r.name == name || aliases.contains(&r.name))
        .filter_map(|r| r.rdata.as_ipv4())
        .collect();

    if !addresses.is_empty() {
        return Ok(Analysis::Answer { aliases, addresses });
    }

    if !aliases.is_empty() {
        return Ok(Analysis::Alias {
            aliases,
            target: current,
        });
    }

    Err(DomainError::MalformedResponse(format!(
        "answer section has no record owned by {}",
        name
    )))
}

/// Owner of the NS records in the authority section, if any.
fn referral_zone(authorities: &[ResourceRecord]) -> Option<DomainName> {
    authorities
        .iter()
        .find(|r| r.record_type == RecordType::NS)
        .map(|r| r.name.clone())
}
