use super::RecordType;
use crate::domain_name::DomainName;
use crate::errors::DomainError;
use std::fmt;
use std::net::Ipv4Addr;

/// The parts of an SOA record the resolver cares about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SoaData {
    pub mname: DomainName,
    pub rname: DomainName,
    /// Negative-caching TTL (RFC 2308).
    pub minimum: u32,
}

/// Record payload, tagged by the kind of data the record type carries.
///
/// Comparisons are structural: two `A` payloads are equal when their
/// addresses are equal, regardless of how they were written down.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordData {
    A(Ipv4Addr),
    Ns(DomainName),
    Cname(DomainName),
    Soa(SoaData),
    /// Presentation text of a payload without dedicated handling.
    Other(String),
}

impl RecordData {
    /// Text encoding used by the cache file.
    pub fn to_text(&self) -> String {
        match self {
            RecordData::A(addr) => addr.to_string(),
            RecordData::Ns(name) | RecordData::Cname(name) => name.to_string(),
            RecordData::Soa(soa) => format!("{} {} {}", soa.mname, soa.rname, soa.minimum),
            RecordData::Other(text) => text.clone(),
        }
    }

    /// Decode the text form produced by [`RecordData::to_text`] for `record_type`.
    pub fn from_text(record_type: RecordType, text: &str) -> Result<Self, DomainError> {
        match record_type {
            RecordType::A => text.trim().parse::<Ipv4Addr>().map(RecordData::A).map_err(|e| {
                DomainError::InvalidIpAddress(format!("'{}' is not an IPv4 address: {}", text, e))
            }),
            RecordType::NS => DomainName::parse(text).map(RecordData::Ns),
            RecordType::CNAME => DomainName::parse(text).map(RecordData::Cname),
            RecordType::SOA => {
                let parts: Vec<&str> = text.split_whitespace().collect();
                let [mname, rname, minimum] = parts.as_slice() else {
                    return Err(DomainError::MalformedResponse(format!(
                        "SOA rdata '{}' must be 'mname rname minimum'",
                        text
                    )));
                };
                let minimum = minimum.parse::<u32>().map_err(|e| {
                    DomainError::MalformedResponse(format!("SOA minimum '{}': {}", minimum, e))
                })?;
                Ok(RecordData::Soa(SoaData {
                    mname: DomainName::parse(mname)?,
                    rname: DomainName::parse(rname)?,
                    minimum,
                }))
            }
            _ => Ok(RecordData::Other(text.to_string())),
        }
    }

    pub fn as_ipv4(&self) -> Option<Ipv4Addr> {
        match self {
            RecordData::A(addr) => Some(*addr),
            _ => None,
        }
    }

    /// Target name of an `NS` or `CNAME` payload.
    pub fn as_name(&self) -> Option<&DomainName> {
        match self {
            RecordData::Ns(name) | RecordData::Cname(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a_payload_is_structural() {
        let parsed = RecordData::from_text(RecordType::A, " 128.119.245.12 ").unwrap();
        assert_eq!(parsed, RecordData::A(Ipv4Addr::new(128, 119, 245, 12)));
    }

    #[test]
    fn test_a_payload_rejects_invalid_octets() {
        assert!(RecordData::from_text(RecordType::A, "192.168.123.456").is_err());
    }

    #[test]
    fn test_soa_text_form() {
        let soa = RecordData::from_text(RecordType::SOA, "ns1.rerttd.nl hostmaster.rerttd.nl 300")
            .unwrap();
        assert_eq!(soa.to_text(), "ns1.rerttd.nl hostmaster.rerttd.nl 300");
        assert!(RecordData::from_text(RecordType::SOA, "ns1.rerttd.nl").is_err());
    }

    #[test]
    fn test_ns_and_cname_share_name_target() {
        let ns = RecordData::from_text(RecordType::NS, "NS1.Example.COM.").unwrap();
        assert_eq!(ns.as_name().unwrap().as_str(), "ns1.example.com");
        assert_ne!(ns, RecordData::Cname(ns.as_name().unwrap().clone()));
    }
}
