use crate::dns_record::{RecordClass, RecordType, ResourceRecord};
use crate::domain_name::DomainName;

/// The SNAME/STYPE/SCLASS triple of an outgoing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: DomainName,
    pub record_type: RecordType,
    pub class: RecordClass,
}

impl Question {
    /// `(name, A, IN)`, the only question this resolver asks.
    pub fn a(name: DomainName) -> Self {
        Self {
            name,
            record_type: RecordType::A,
            class: RecordClass::IN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    Other(u16),
}

impl ResponseCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::Other(_) => "UNKNOWN",
        }
    }
}

/// A decoded response, split into the sections the resolver analyses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerResponse {
    pub id: u16,
    pub is_response: bool,
    pub authoritative: bool,
    pub truncated: bool,
    pub rcode: ResponseCode,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl ServerResponse {
    /// An empty response to the query with transaction id `id`.
    pub fn empty(id: u16, rcode: ResponseCode) -> Self {
        Self {
            id,
            is_response: true,
            authoritative: false,
            truncated: false,
            rcode,
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    /// A response the resolver is allowed to analyse: it answers our query id
    /// and carries either data or an authoritative denial.
    pub fn is_usable_for(&self, query_id: u16) -> bool {
        self.is_response
            && self.id == query_id
            && matches!(self.rcode, ResponseCode::NoError | ResponseCode::NXDomain)
    }
}
