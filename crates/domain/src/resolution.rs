use crate::domain_name::DomainName;
use crate::errors::DomainError;
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStatus {
    /// At least one address was found.
    Resolved,
    /// The authoritative server said the name does not exist (NXDOMAIN).
    NameError,
    /// The name exists but carries no `A` records.
    NoData,
}

/// Outcome of resolving a hostname: `(hostname, aliases, addresses)`.
///
/// `aliases` lists the canonical names the query was redirected through,
/// in the order they were followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub hostname: DomainName,
    pub aliases: Vec<DomainName>,
    pub addresses: Vec<Ipv4Addr>,
    pub status: ResolutionStatus,
    pub cache_hit: bool,
}

impl Resolution {
    pub fn resolved(
        hostname: DomainName,
        aliases: Vec<DomainName>,
        addresses: Vec<Ipv4Addr>,
    ) -> Self {
        let status = if addresses.is_empty() {
            ResolutionStatus::NoData
        } else {
            ResolutionStatus::Resolved
        };
        Self {
            hostname,
            aliases,
            addresses,
            status,
            cache_hit: false,
        }
    }

    /// Authoritative negative answer: empty alias and address lists.
    pub fn name_error(hostname: DomainName) -> Self {
        Self {
            hostname,
            aliases: Vec::new(),
            addresses: Vec::new(),
            status: ResolutionStatus::NameError,
            cache_hit: false,
        }
    }

    pub fn no_data(hostname: DomainName, aliases: Vec<DomainName>) -> Self {
        Self {
            hostname,
            aliases,
            addresses: Vec::new(),
            status: ResolutionStatus::NoData,
            cache_hit: false,
        }
    }

    pub fn with_cache_hit(mut self, cache_hit: bool) -> Self {
        self.cache_hit = cache_hit;
        self
    }

    pub fn is_name_error(&self) -> bool {
        self.status == ResolutionStatus::NameError
    }

    /// Turn an NXDOMAIN outcome into [`DomainError::NameError`].
    pub fn ensure_found(self) -> Result<Self, DomainError> {
        match self.status {
            ResolutionStatus::NameError => Err(DomainError::NameError(self.hostname.to_string())),
            _ => Ok(self),
        }
    }

    /// The `(hostname, aliases, addresses)` triple in presentation form.
    pub fn into_triple(self) -> (String, Vec<String>, Vec<String>) {
        (
            self.hostname.to_string(),
            self.aliases.iter().map(|a| a.to_string()).collect(),
            self.addresses.iter().map(|a| a.to_string()).collect(),
        )
    }
}
