use crate::ports::DnsResolver;
use ferrous_recursor_domain::{DomainError, DomainName, Resolution};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct ResolveHostnameUseCase {
    resolver: Arc<dyn DnsResolver>,
}

impl ResolveHostnameUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    /// Resolve a user-supplied hostname.
    pub async fn execute(&self, hostname: &str) -> Result<Resolution, DomainError> {
        let start = Instant::now();
        let name = DomainName::parse(hostname)?;

        if name.is_root() {
            return Err(DomainError::InvalidDomainName(
                "cannot resolve the root name".to_string(),
            ));
        }

        match self.resolver.resolve(&name).await {
            Ok(resolution) => {
                let elapsed_ms = start.elapsed().as_millis() as u64;
                if resolution.is_name_error() {
                    info!(hostname = %name, elapsed_ms, "Name does not exist");
                } else {
                    debug!(
                        hostname = %name,
                        addresses = resolution.addresses.len(),
                        aliases = resolution.aliases.len(),
                        cache_hit = resolution.cache_hit,
                        elapsed_ms,
                        "Resolved"
                    );
                }
                Ok(resolution)
            }
            Err(e) => {
                warn!(
                    hostname = %name,
                    error = %e,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Resolution failed"
                );
                Err(e)
            }
        }
    }
}
