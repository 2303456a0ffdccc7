mod dns_resolver;
mod name_server_transport;
mod record_store_port;

pub use dns_resolver::DnsResolver;
pub use name_server_transport::NameServerTransport;
pub use record_store_port::RecordStorePort;

// Re-export for convenience
pub use ferrous_recursor_domain::{Question, Resolution, ServerResponse};
