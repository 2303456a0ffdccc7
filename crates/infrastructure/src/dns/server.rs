use crate::dns::wire::{MessageBuilder, RecordTypeMapper};
use ferrous_recursor_application::use_cases::ResolveHostnameUseCase;
use ferrous_recursor_domain::{DomainError, RecordType, Resolution};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::rdata::{A, CNAME};
use hickory_proto::rr::{RData, Record};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// TTL put on answers handed to local clients.
const ANSWER_TTL: u32 = 60;

/// Answers `IN A` queries from local clients by resolving iteratively.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<ResolveHostnameUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<ResolveHostnameUseCase>) -> Self {
        Self { use_case }
    }

    fn normalize_domain(domain: &str) -> String {
        domain.trim_end_matches('.').to_string()
    }

    /// The alias chain as CNAME records followed by the addresses,
    /// owned by the last name in the chain.
    fn answer_records(resolution: &Resolution) -> Result<Vec<Record>, DomainError> {
        let mut records = Vec::with_capacity(resolution.aliases.len() + resolution.addresses.len());
        let mut owner = MessageBuilder::to_hickory_name(&resolution.hostname)?;

        for alias in &resolution.aliases {
            let target = MessageBuilder::to_hickory_name(alias)?;
            records.push(Record::from_rdata(
                owner.clone(),
                ANSWER_TTL,
                RData::CNAME(CNAME(target.clone())),
            ));
            owner = target;
        }

        for address in &resolution.addresses {
            records.push(Record::from_rdata(
                owner.clone(),
                ANSWER_TTL,
                RData::A(A(*address)),
            ));
        }
        Ok(records)
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return send_error_response(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        let query = &request_info.query;
        let domain = Self::normalize_domain(&query.name().to_utf8());
        let record_type = RecordTypeMapper::from_hickory(query.query_type());
        let client_ip = request.src().ip();

        info!(domain = %domain, record_type = %record_type, client = %client_ip, "DNS query received");

        if record_type != RecordType::A {
            warn!(record_type = %record_type, "Unsupported record type");
            return send_error_response(request, &mut response_handle, ResponseCode::NotImp).await;
        }

        let resolution = match self.use_case.execute(&domain).await {
            Ok(resolution) => resolution,
            Err(e) => {
                error!(domain = %domain, error = %e, "Query resolution failed");
                return send_error_response(request, &mut response_handle, ResponseCode::ServFail)
                    .await;
            }
        };

        if resolution.is_name_error() {
            debug!(domain = %domain, "Name does not exist");
            return send_error_response(request, &mut response_handle, ResponseCode::NXDomain)
                .await;
        }

        let answers = match Self::answer_records(&resolution) {
            Ok(answers) => answers,
            Err(e) => {
                error!(domain = %domain, error = %e, "Resolved names cannot be encoded");
                return send_error_response(request, &mut response_handle, ResponseCode::ServFail)
                    .await;
            }
        };
        debug!(domain = %domain, answers = answers.len(), "Sending response");

        let builder = MessageResponseBuilder::from_message_request(request);
        let mut header = *request.header();
        header.set_recursion_available(true);
        let response = builder.build(header, answers.iter(), &[], &[], &[]);

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = *request.header();
    header.set_response_code(code);
    header.set_recursion_available(true);
    let response = builder.build(header, &[], &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send error response");
            ResponseInfo::from(*request.header())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrous_recursor_domain::DomainName;
    use std::net::Ipv4Addr;

    #[test]
    fn test_answer_records_follow_alias_chain() {
        let resolution = Resolution::resolved(
            DomainName::parse("www.wiki.nl").unwrap(),
            vec![DomainName::parse("wiki.nl").unwrap()],
            vec![Ipv4Addr::new(10, 0, 0, 1)],
        );

        let records = DnsServerHandler::answer_records(&resolution).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name().to_utf8(), "www.wiki.nl.");
        assert!(matches!(records[0].data(), RData::CNAME(c) if c.0.to_utf8() == "wiki.nl."));
        assert_eq!(records[1].name().to_utf8(), "wiki.nl.");
        assert!(matches!(records[1].data(), RData::A(a) if a.0 == Ipv4Addr::new(10, 0, 0, 1)));
    }

    #[test]
    fn test_unencodable_alias_is_an_error() {
        let resolution = Resolution::resolved(
            DomainName::parse("www.wiki.nl").unwrap(),
            vec![DomainName::parse("bad name.nl").unwrap()],
            vec![Ipv4Addr::new(10, 0, 0, 1)],
        );

        assert!(matches!(
            DnsServerHandler::answer_records(&resolution),
            Err(DomainError::InvalidDomainName(_))
        ));
    }
}
