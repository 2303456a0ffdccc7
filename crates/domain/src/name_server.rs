use crate::domain_name::DomainName;
use std::fmt;
use std::net::Ipv4Addr;

/// Root server hints (SBELT), IANA root zone servers.
///
/// Only consulted when the cache holds no delegation data for any ancestor
/// of the name being resolved.
pub static ROOT_HINTS: &[RootHint] = &[
    RootHint::new("a.root-servers.net", Ipv4Addr::new(198, 41, 0, 4)),
    RootHint::new("b.root-servers.net", Ipv4Addr::new(170, 247, 170, 2)),
    RootHint::new("c.root-servers.net", Ipv4Addr::new(192, 33, 4, 12)),
    RootHint::new("d.root-servers.net", Ipv4Addr::new(199, 7, 91, 13)),
    RootHint::new("e.root-servers.net", Ipv4Addr::new(192, 203, 230, 10)),
    RootHint::new("f.root-servers.net", Ipv4Addr::new(192, 5, 5, 241)),
    RootHint::new("g.root-servers.net", Ipv4Addr::new(192, 112, 36, 4)),
    RootHint::new("h.root-servers.net", Ipv4Addr::new(198, 97, 190, 53)),
    RootHint::new("i.root-servers.net", Ipv4Addr::new(192, 36, 148, 17)),
    RootHint::new("j.root-servers.net", Ipv4Addr::new(192, 58, 128, 30)),
    RootHint::new("k.root-servers.net", Ipv4Addr::new(193, 0, 14, 129)),
    RootHint::new("l.root-servers.net", Ipv4Addr::new(199, 7, 83, 42)),
    RootHint::new("m.root-servers.net", Ipv4Addr::new(202, 12, 27, 33)),
];

#[derive(Debug, Clone, Copy)]
pub struct RootHint {
    pub name: &'static str,
    pub ipv4: Ipv4Addr,
}

impl RootHint {
    pub const fn new(name: &'static str, ipv4: Ipv4Addr) -> Self {
        Self { name, ipv4 }
    }
}

/// One name server the current step may ask.
///
/// A glueless delegation yields a candidate with a name but no address;
/// the resolver has to look the name up before it can be queried.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub server_name: Option<DomainName>,
    pub server_ip: Option<Ipv4Addr>,
}

impl Candidate {
    pub fn with_address(server_name: Option<DomainName>, server_ip: Ipv4Addr) -> Self {
        Self {
            server_name,
            server_ip: Some(server_ip),
        }
    }

    pub fn glueless(server_name: DomainName) -> Self {
        Self {
            server_name: Some(server_name),
            server_ip: None,
        }
    }

    pub fn needs_glue(&self) -> bool {
        self.server_ip.is_none()
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.server_name, self.server_ip) {
            (Some(name), Some(ip)) => write!(f, "{} ({})", name, ip),
            (Some(name), None) => write!(f, "{} (no glue)", name),
            (None, Some(ip)) => write!(f, "{}", ip),
            (None, None) => f.write_str("<empty candidate>"),
        }
    }
}

/// SLIST: the candidates for the in-progress step and the zone they serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList {
    pub zone: DomainName,
    pub candidates: Vec<Candidate>,
}

impl CandidateList {
    pub fn new(zone: DomainName, candidates: Vec<Candidate>) -> Self {
        Self { zone, candidates }
    }

    pub fn from_root_hints(hints: &[RootHint]) -> Self {
        let candidates = hints
            .iter()
            .map(|hint| Candidate::with_address(DomainName::parse(hint.name).ok(), hint.ipv4))
            .collect();
        Self::new(DomainName::root(), candidates)
    }

    /// Root candidates from bare addresses (configured hint override).
    pub fn from_root_addresses(addresses: &[Ipv4Addr]) -> Self {
        let candidates = addresses
            .iter()
            .map(|ip| Candidate::with_address(None, *ip))
            .collect();
        Self::new(DomainName::root(), candidates)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
