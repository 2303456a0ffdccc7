use super::{RecordClass, RecordData, RecordType};
use crate::domain_name::DomainName;
use std::net::Ipv4Addr;

/// DNS resource record as seen by the resolver and the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: DomainName,
    pub record_type: RecordType,
    pub class: RecordClass,
    /// Time to live in seconds. Signed so that bogus values survive decoding
    /// and can be rejected by the cache instead of wrapping around.
    pub ttl: i64,
    pub rdata: RecordData,
}

impl ResourceRecord {
    pub fn new(
        name: DomainName,
        record_type: RecordType,
        class: RecordClass,
        ttl: i64,
        rdata: RecordData,
    ) -> Self {
        Self {
            name,
            record_type,
            class,
            ttl,
            rdata,
        }
    }

    /// `IN A` record.
    pub fn a(name: DomainName, address: Ipv4Addr, ttl: i64) -> Self {
        Self::new(name, RecordType::A, RecordClass::IN, ttl, RecordData::A(address))
    }

    /// `IN NS` record delegating `zone` to `server`.
    pub fn ns(zone: DomainName, server: DomainName, ttl: i64) -> Self {
        Self::new(zone, RecordType::NS, RecordClass::IN, ttl, RecordData::Ns(server))
    }

    /// `IN CNAME` record aliasing `alias` to `canonical`.
    pub fn cname(alias: DomainName, canonical: DomainName, ttl: i64) -> Self {
        Self::new(
            alias,
            RecordType::CNAME,
            RecordClass::IN,
            ttl,
            RecordData::Cname(canonical),
        )
    }

    /// Check if record is expired given the seconds elapsed since it was stored
    pub fn is_expired(&self, elapsed_secs: u64) -> bool {
        self.ttl <= 0 || elapsed_secs >= self.ttl as u64
    }

    pub fn matches(&self, name: &DomainName, record_type: RecordType, class: RecordClass) -> bool {
        self.record_type == record_type && self.class == class && &self.name == name
    }
}
