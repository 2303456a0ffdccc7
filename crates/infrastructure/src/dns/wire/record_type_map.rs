//! Mapping between the domain's record type/class enums and hickory's.

use ferrous_recursor_domain::{RecordClass, RecordType, ResponseCode};
use hickory_proto::op::ResponseCode as HickoryResponseCode;
use hickory_proto::rr::{DNSClass, RecordType as HickoryRecordType};

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Domain type → hickory type, by wire code.
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }

    /// Hickory type → domain type. Types without a named variant become
    /// `RecordType::Unknown(code)`.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        RecordType::from_u16(u16::from(hickory_type))
    }

    /// `None` for classes hickory cannot put in a question.
    pub fn class_to_hickory(class: RecordClass) -> Option<DNSClass> {
        match class {
            RecordClass::IN => Some(DNSClass::IN),
            RecordClass::CH => Some(DNSClass::CH),
            RecordClass::HS => Some(DNSClass::HS),
            RecordClass::ANY => Some(DNSClass::ANY),
            RecordClass::Unknown(_) => None,
        }
    }

    pub fn class_from_hickory(class: DNSClass) -> RecordClass {
        RecordClass::from_u16(u16::from(class))
    }

    pub fn rcode_from_hickory(rcode: HickoryResponseCode) -> ResponseCode {
        match rcode {
            HickoryResponseCode::NoError => ResponseCode::NoError,
            HickoryResponseCode::FormErr => ResponseCode::FormErr,
            HickoryResponseCode::ServFail => ResponseCode::ServFail,
            HickoryResponseCode::NXDomain => ResponseCode::NXDomain,
            HickoryResponseCode::NotImp => ResponseCode::NotImp,
            HickoryResponseCode::Refused => ResponseCode::Refused,
            other => ResponseCode::Other(u16::from(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_types_map_both_ways() {
        for rt in [RecordType::A, RecordType::NS, RecordType::CNAME, RecordType::SOA] {
            assert_eq!(RecordTypeMapper::from_hickory(RecordTypeMapper::to_hickory(rt)), rt);
        }
        assert_eq!(RecordTypeMapper::to_hickory(RecordType::A), HickoryRecordType::A);
        assert_eq!(RecordTypeMapper::from_hickory(HickoryRecordType::NS), RecordType::NS);
    }

    #[test]
    fn test_unnamed_type_becomes_unknown() {
        assert_eq!(
            RecordTypeMapper::from_hickory(HickoryRecordType::SRV),
            RecordType::Unknown(33)
        );
    }

    #[test]
    fn test_class_mapping() {
        assert_eq!(RecordTypeMapper::class_to_hickory(RecordClass::IN), Some(DNSClass::IN));
        assert_eq!(RecordTypeMapper::class_from_hickory(DNSClass::IN), RecordClass::IN);
        assert_eq!(RecordTypeMapper::class_to_hickory(RecordClass::Unknown(7)), None);
    }

    #[test]
    fn test_rcode_mapping() {
        assert_eq!(
            RecordTypeMapper::rcode_from_hickory(HickoryResponseCode::NXDomain),
            ResponseCode::NXDomain
        );
        assert_eq!(
            RecordTypeMapper::rcode_from_hickory(HickoryResponseCode::NoError),
            ResponseCode::NoError
        );
    }
}
