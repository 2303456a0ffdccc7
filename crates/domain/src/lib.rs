//! Ferrous Recursor Domain Layer
pub mod config;
pub mod dns_record;
pub mod domain_name;
pub mod errors;
pub mod message;
pub mod name_server;
pub mod resolution;

pub use config::{CacheConfig, CliOverrides, Config, ConfigError, ResolverConfig};
pub use dns_record::{RecordClass, RecordData, RecordType, ResourceRecord, SoaData};
pub use domain_name::DomainName;
pub use errors::DomainError;
pub use message::{Question, ResponseCode, ServerResponse};
pub use name_server::{Candidate, CandidateList, RootHint, ROOT_HINTS};
pub use resolution::{Resolution, ResolutionStatus};
