//! DNS Message Builder
//!
//! Builds the non-recursive queries the iterative resolver sends to
//! authoritative servers.

use super::record_type_map::RecordTypeMapper;
use ferrous_recursor_domain::{DomainError, DomainName, Question};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::Name;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Build `question` as a query with transaction `id` and RD cleared.
    pub fn build_iterative_query(id: u16, question: &Question) -> Result<Vec<u8>, DomainError> {
        let class = RecordTypeMapper::class_to_hickory(question.class).ok_or_else(|| {
            DomainError::Codec(format!("Cannot encode query class {}", question.class))
        })?;

        let mut query = Query::new();
        query.set_name(Self::to_hickory_name(&question.name)?);
        query.set_query_type(RecordTypeMapper::to_hickory(question.record_type));
        query.set_query_class(class);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(false);
        message.add_query(query);

        Self::serialize_message(&message)
    }

    pub fn to_hickory_name(name: &DomainName) -> Result<Name, DomainError> {
        Name::from_str(&name.to_fqdn()).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", name, e))
        })
    }

    pub fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::Codec(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
