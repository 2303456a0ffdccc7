#![allow(dead_code)]
use ferrous_recursor_domain::{
    DomainName, RecordClass, RecordData, RecordType, ResourceRecord,
};
use std::net::Ipv4Addr;

pub struct RecordBuilder {
    name: String,
    record_type: RecordType,
    class: RecordClass,
    ttl: i64,
    rdata: RecordData,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self {
            name: "wiki.nl".to_string(),
            record_type: RecordType::A,
            class: RecordClass::IN,
            ttl: 300,
            rdata: RecordData::A(Ipv4Addr::new(192, 168, 123, 45)),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn address(mut self, address: &str) -> Self {
        self.record_type = RecordType::A;
        self.rdata = RecordData::A(address.parse().expect("Invalid IPv4 address"));
        self
    }

    pub fn ns(mut self, server: &str) -> Self {
        self.record_type = RecordType::NS;
        self.rdata = RecordData::Ns(DomainName::parse(server).expect("Invalid server name"));
        self
    }

    pub fn cname(mut self, canonical: &str) -> Self {
        self.record_type = RecordType::CNAME;
        self.rdata = RecordData::Cname(DomainName::parse(canonical).expect("Invalid alias"));
        self
    }

    pub fn record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    pub fn class(mut self, class: RecordClass) -> Self {
        self.class = class;
        self
    }

    pub fn ttl(mut self, ttl: i64) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn build(self) -> ResourceRecord {
        ResourceRecord::new(
            DomainName::parse(&self.name).expect("Invalid record name"),
            self.record_type,
            self.class,
            self.ttl,
            self.rdata,
        )
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn name(value: &str) -> DomainName {
    DomainName::parse(value).expect("Invalid domain name")
}
