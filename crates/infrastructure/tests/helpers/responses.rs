use ferrous_recursor_domain::{
    DomainName, RecordClass, RecordData, RecordType, ResourceRecord, ResponseCode,
    ServerResponse, SoaData,
};
use std::net::Ipv4Addr;

pub fn name(value: &str) -> DomainName {
    DomainName::parse(value).expect("valid name")
}

/// Non-authoritative delegation of `zone` to `servers`, with glue where an
/// address is given.
pub fn referral(zone: &str, servers: &[(&str, Option<Ipv4Addr>)]) -> ServerResponse {
    let mut response = ServerResponse::empty(0, ResponseCode::NoError);
    for (server, glue) in servers {
        response
            .authorities
            .push(ResourceRecord::ns(name(zone), name(server), 172800));
        if let Some(ip) = glue {
            response
                .additionals
                .push(ResourceRecord::a(name(server), *ip, 172800));
        }
    }
    response
}

pub fn answer(owner: &str, addresses: &[Ipv4Addr]) -> ServerResponse {
    let mut response = ServerResponse::empty(0, ResponseCode::NoError);
    response.authoritative = true;
    for ip in addresses {
        response.answers.push(ResourceRecord::a(name(owner), *ip, 3600));
    }
    response
}

pub fn alias(owner: &str, target: &str) -> ServerResponse {
    let mut response = ServerResponse::empty(0, ResponseCode::NoError);
    response.authoritative = true;
    response
        .answers
        .push(ResourceRecord::cname(name(owner), name(target), 3600));
    response
}

fn soa(zone: &str) -> ResourceRecord {
    ResourceRecord::new(
        name(zone),
        RecordType::SOA,
        RecordClass::IN,
        3600,
        RecordData::Soa(SoaData {
            mname: name(&format!("ns1.{}", zone)),
            rname: name(&format!("hostmaster.{}", zone)),
            minimum: 300,
        }),
    )
}

pub fn nxdomain(zone: &str) -> ServerResponse {
    let mut response = ServerResponse::empty(0, ResponseCode::NXDomain);
    response.authoritative = true;
    response.authorities.push(soa(zone));
    response
}

pub fn nodata(zone: &str) -> ServerResponse {
    let mut response = ServerResponse::empty(0, ResponseCode::NoError);
    response.authoritative = true;
    response.authorities.push(soa(zone));
    response
}

pub fn failure(rcode: ResponseCode) -> ServerResponse {
    ServerResponse::empty(0, rcode)
}
