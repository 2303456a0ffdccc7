use ferrous_recursor_domain::ResourceRecord;

/// A record together with the Unix second it entered the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedRecord {
    pub record: ResourceRecord,
    pub stored_at: u64,
}

impl CachedRecord {
    pub fn new(record: ResourceRecord, stored_at: u64) -> Self {
        Self { record, stored_at }
    }

    #[inline]
    pub fn is_expired(&self, now_secs: u64) -> bool {
        self.record.is_expired(now_secs.saturating_sub(self.stored_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrous_recursor_domain::DomainName;
    use std::net::Ipv4Addr;

    #[test]
    fn test_expiry_is_relative_to_stored_at() {
        let record = ResourceRecord::a(
            DomainName::parse("wiki.nl").unwrap(),
            Ipv4Addr::new(10, 0, 0, 1),
            60,
        );
        let entry = CachedRecord::new(record, 1_000);

        assert!(!entry.is_expired(1_000));
        assert!(!entry.is_expired(1_059));
        assert!(entry.is_expired(1_060));
    }

    #[test]
    fn test_clock_behind_stored_at_counts_as_fresh() {
        let record = ResourceRecord::a(
            DomainName::parse("wiki.nl").unwrap(),
            Ipv4Addr::new(10, 0, 0, 1),
            60,
        );
        let entry = CachedRecord::new(record, 1_000);
        assert!(!entry.is_expired(500));
    }
}
