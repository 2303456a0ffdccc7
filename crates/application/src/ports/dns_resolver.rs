use async_trait::async_trait;
use ferrous_recursor_domain::{DomainError, DomainName, Resolution};

#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Resolve `hostname` to its IPv4 addresses.
    ///
    /// An authoritative NXDOMAIN is reported as `Ok` with
    /// [`ResolutionStatus::NameError`](ferrous_recursor_domain::ResolutionStatus);
    /// `Err` is reserved for resolution failures.
    async fn resolve(&self, hostname: &DomainName) -> Result<Resolution, DomainError>;
}
