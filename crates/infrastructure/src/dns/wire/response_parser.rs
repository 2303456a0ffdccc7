use super::record_type_map::RecordTypeMapper;
use ferrous_recursor_domain::{
    DomainError, DomainName, RecordData, ResourceRecord, ServerResponse, SoaData,
};
use hickory_proto::op::{Message, MessageType};
use hickory_proto::rr::{RData, Record};
use tracing::debug;

pub struct ResponseParser;

impl ResponseParser {
    /// Decode a wire-format response into its sections.
    ///
    /// Records whose owner or target is not a valid name are dropped, the
    /// rest of the message is still returned.
    pub fn parse(response_bytes: &[u8]) -> Result<ServerResponse, DomainError> {
        let message = Message::from_vec(response_bytes)
            .map_err(|e| DomainError::Codec(format!("Failed to parse DNS response: {}", e)))?;

        Ok(Self::from_message(&message))
    }

    pub fn from_message(message: &Message) -> ServerResponse {
        let response = ServerResponse {
            id: message.id(),
            is_response: message.message_type() == MessageType::Response,
            authoritative: message.authoritative(),
            truncated: message.truncated(),
            rcode: RecordTypeMapper::rcode_from_hickory(message.response_code()),
            answers: Self::convert_section(message.answers()),
            authorities: Self::convert_section(message.name_servers()),
            additionals: Self::convert_section(message.additionals()),
        };

        debug!(
            id = response.id,
            rcode = response.rcode.as_str(),
            answers = response.answers.len(),
            authority = response.authorities.len(),
            additional = response.additionals.len(),
            truncated = response.truncated,
            "DNS response parsed"
        );

        response
    }

    fn convert_section(records: &[Record]) -> Vec<ResourceRecord> {
        records.iter().filter_map(Self::convert_record).collect()
    }

    pub fn convert_record(record: &Record) -> Option<ResourceRecord> {
        let name = match DomainName::parse(&record.name().to_utf8()) {
            Ok(name) => name,
            Err(e) => {
                debug!(error = %e, "Dropping record with unusable owner name");
                return None;
            }
        };

        let rdata = match record.data() {
            RData::A(a) => RecordData::A(a.0),
            RData::NS(ns) => RecordData::Ns(Self::target_name(&ns.0.to_utf8())?),
            RData::CNAME(cname) => RecordData::Cname(Self::target_name(&cname.0.to_utf8())?),
            RData::SOA(soa) => RecordData::Soa(SoaData {
                mname: Self::target_name(&soa.mname().to_utf8())?,
                rname: Self::target_name(&soa.rname().to_utf8())?,
                minimum: soa.minimum(),
            }),
            other => RecordData::Other(other.to_string()),
        };

        Some(ResourceRecord::new(
            name,
            RecordTypeMapper::from_hickory(record.record_type()),
            RecordTypeMapper::class_from_hickory(record.dns_class()),
            i64::from(record.ttl()),
            rdata,
        ))
    }

    fn target_name(text: &str) -> Option<DomainName> {
        match DomainName::parse(text) {
            Ok(name) => Some(name),
            Err(e) => {
                debug!(error = %e, "Dropping record with unusable target name");
                None
            }
        }
    }
}
