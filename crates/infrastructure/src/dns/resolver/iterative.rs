use super::analysis::{analyze, Analysis};
use super::config::ResolverSettings;
use super::slist;
use crate::dns::cache::RecordCache;
use async_trait::async_trait;
use ferrous_recursor_application::ports::{DnsResolver, NameServerTransport};
use ferrous_recursor_domain::{
    CandidateList, DomainError, DomainName, RecordClass, RecordType, Resolution, ResourceRecord,
};
use futures::future::{BoxFuture, FutureExt};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Iterative resolver following RFC 1034 section 5.3.3.
///
/// Each step consults the cache, picks the closest known servers, races
/// them and classifies the reply as an answer, an alias, a referral or a
/// negative answer. Cloning is cheap and shares the cache and transport.
#[derive(Clone)]
pub struct IterativeResolver {
    inner: Arc<ResolverInner>,
}

struct ResolverInner {
    transport: Arc<dyn NameServerTransport>,
    cache: Option<Arc<RecordCache>>,
    root_hints: CandidateList,
    settings: ResolverSettings,
}

impl IterativeResolver {
    pub fn new(
        transport: Arc<dyn NameServerTransport>,
        root_hints: CandidateList,
        settings: ResolverSettings,
    ) -> Self {
        info!(
            root_servers = root_hints.len(),
            attempts = settings.attempts,
            timeout_ms = settings.attempt_timeout.as_millis() as u64,
            "Iterative resolver created"
        );

        Self {
            inner: Arc::new(ResolverInner {
                transport,
                cache: None,
                root_hints,
                settings,
            }),
        }
    }

    /// Attach a record cache. Must be called before the resolver is cloned.
    pub fn with_cache(self, cache: Arc<RecordCache>) -> Self {
        let inner = match Arc::try_unwrap(self.inner) {
            Ok(mut inner) => {
                inner.cache = Some(cache);
                inner
            }
            Err(shared) => ResolverInner {
                transport: Arc::clone(&shared.transport),
                cache: Some(cache),
                root_hints: shared.root_hints.clone(),
                settings: shared.settings.clone(),
            },
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn cache(&self) -> Option<&Arc<RecordCache>> {
        self.inner.cache.as_ref()
    }

    pub(super) fn settings(&self) -> &ResolverSettings {
        &self.inner.settings
    }

    pub(super) fn transport(&self) -> &Arc<dyn NameServerTransport> {
        &self.inner.transport
    }

    /// Boxed so that glue lookups can recurse into a full resolution.
    pub(super) fn resolve_at_depth(
        &self,
        hostname: DomainName,
        glue_depth: u8,
    ) -> BoxFuture<'static, Result<Resolution, DomainError>> {
        let resolver = self.clone();
        async move { resolver.run(hostname, glue_depth).await }.boxed()
    }

    async fn run(&self, hostname: DomainName, glue_depth: u8) -> Result<Resolution, DomainError> {
        let mut working = hostname.clone();
        let mut aliases: Vec<DomainName> = Vec::new();
        // Set once any server has been asked during this resolution.
        let mut queried = false;

        'restart: loop {
            if let Some(cache) = &self.inner.cache {
                if let Some(addresses) =
                    self.lookup_cached(cache, &hostname, &mut working, &mut aliases)?
                {
                    debug!(domain = %hostname, answer = %working, queried, "Resolved from cache");
                    return Ok(Resolution::resolved(hostname, aliases, addresses)
                        .with_cache_hit(!queried));
                }
            }

            let mut slist = self.initial_slist(&working);

            for _ in 0..self.inner.settings.max_delegation_depth {
                let response = self.query_round(&slist, &working, glue_depth).await?;
                queried = true;
                self.remember(&response.additionals);

                match analyze(&response, &working, &slist.zone)? {
                    Analysis::Answer {
                        aliases: found,
                        addresses,
                    } => {
                        self.remember(&response.answers);
                        self.extend_aliases(&hostname, &mut aliases, found)?;
                        debug!(
                            domain = %hostname,
                            zone = %slist.zone,
                            addresses = addresses.len(),
                            "Resolved"
                        );
                        return Ok(Resolution::resolved(hostname, aliases, addresses));
                    }
                    Analysis::Alias {
                        aliases: found,
                        target,
                    } => {
                        self.remember(&response.answers);
                        self.extend_aliases(&hostname, &mut aliases, found)?;
                        debug!(domain = %hostname, alias = %target, "Following alias");
                        working = target;
                        continue 'restart;
                    }
                    Analysis::Referral(next) => {
                        self.remember(&response.authorities);
                        debug!(domain = %working, zone = %next.zone, servers = next.len(), "Referral");
                        slist = next;
                    }
                    Analysis::NameError => {
                        debug!(domain = %hostname, "Name does not exist");
                        return Ok(Resolution::name_error(hostname));
                    }
                    Analysis::NoData => {
                        debug!(domain = %hostname, "Name has no A records");
                        return Ok(Resolution::no_data(hostname, aliases));
                    }
                }
            }

            return Err(DomainError::DelegationLoopDetected {
                name: working.to_string(),
                zone: slist.zone.to_string(),
            });
        }
    }

    /// Follow cached aliases from `working` until an address or a miss.
    fn lookup_cached(
        &self,
        cache: &RecordCache,
        hostname: &DomainName,
        working: &mut DomainName,
        aliases: &mut Vec<DomainName>,
    ) -> Result<Option<Vec<Ipv4Addr>>, DomainError> {
        loop {
            let addresses: Vec<Ipv4Addr> = cache
                .lookup(working, RecordType::A, RecordClass::IN)
                .iter()
                .filter_map(|r| r.rdata.as_ipv4())
                .collect();
            if !addresses.is_empty() {
                return Ok(Some(addresses));
            }

            let target = cache
                .lookup(working, RecordType::CNAME, RecordClass::IN)
                .first()
                .and_then(|r| r.rdata.as_name().cloned());

            match target {
                Some(target) => {
                    self.extend_aliases(hostname, aliases, vec![target.clone()])?;
                    *working = target;
                }
                None => return Ok(None),
            }
        }
    }

    fn extend_aliases(
        &self,
        hostname: &DomainName,
        aliases: &mut Vec<DomainName>,
        found: Vec<DomainName>,
    ) -> Result<(), DomainError> {
        for alias in found {
            if &alias == hostname || aliases.contains(&alias) {
                return Err(DomainError::AliasLoopDetected(hostname.to_string()));
            }
            aliases.push(alias);
            if aliases.len() > self.inner.settings.max_alias_depth as usize {
                return Err(DomainError::AliasLoopDetected(hostname.to_string()));
            }
        }
        Ok(())
    }

    fn initial_slist(&self, name: &DomainName) -> CandidateList {
        self.inner
            .cache
            .as_ref()
            .and_then(|cache| slist::from_cache(cache, name))
            .unwrap_or_else(|| self.inner.root_hints.clone())
    }

    fn remember(&self, records: &[ResourceRecord]) {
        let Some(cache) = &self.inner.cache else {
            return;
        };
        for record in records.iter().filter(|r| cache.is_cacheable(r.record_type)) {
            match cache.add(record.clone()) {
                Ok(()) => {}
                Err(e) if e.is_cache_rejection() => {
                    debug!(domain = %record.name, error = %e, "Record not cached");
                }
                Err(e) => {
                    warn!(domain = %record.name, error = %e, "Failed to cache record");
                }
            }
        }
    }
}

#[async_trait]
impl DnsResolver for IterativeResolver {
    async fn resolve(&self, hostname: &DomainName) -> Result<Resolution, DomainError> {
        self.resolve_at_depth(hostname.clone(), 0).await
    }
}
