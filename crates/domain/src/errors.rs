use crate::dns_record::RecordType;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid TTL {ttl} for {name}: only positive TTLs are cacheable")]
    InvalidTtl { name: String, ttl: i64 },

    #[error("Record type {0} is not cacheable")]
    UnsupportedType(RecordType),

    #[error("All candidate servers exhausted while resolving {0}")]
    ServersExhausted(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Alias loop detected while resolving {0}")]
    AliasLoopDetected(String),

    #[error("Delegation loop detected while resolving {name} (zone {zone} did not narrow)")]
    DelegationLoopDetected { name: String, zone: String },

    #[error("Glue resolution depth exceeded for name server {0}")]
    GlueDepthExceeded(String),

    #[error("Domain not found (NXDOMAIN): {0}")]
    NameError(String),

    #[error("Query timeout waiting for {server}")]
    QueryTimeout { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("DNS message codec error: {0}")]
    Codec(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Cache persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Errors raised by the cache itself; resolution treats them as best-effort.
    pub fn is_cache_rejection(&self) -> bool {
        matches!(self, Self::InvalidTtl { .. } | Self::UnsupportedType(_))
    }

    /// Errors after which another attempt against the same server makes sense.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::QueryTimeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_rejections() {
        let ttl = DomainError::InvalidTtl {
            name: "wiki.nl".to_string(),
            ttl: 0,
        };
        assert!(ttl.is_cache_rejection());
        assert!(DomainError::UnsupportedType(RecordType::SOA).is_cache_rejection());

        assert!(!DomainError::Persistence("disk full".to_string()).is_cache_rejection());
        assert!(!DomainError::ServersExhausted("wiki.nl".to_string()).is_cache_rejection());
    }

    #[test]
    fn test_only_timeouts_are_retryable() {
        let timeout = DomainError::QueryTimeout {
            server: "10.0.0.1:53".to_string(),
        };
        assert!(timeout.is_retryable());

        let refused = DomainError::Transport {
            server: "10.0.0.1:53".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(!refused.is_retryable());
    }
}
