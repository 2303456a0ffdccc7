pub mod cache;
pub mod resolver;
pub mod server;
pub mod transport;
pub mod wire;

pub use cache::{CacheSettings, CachedRecord, Clock, ManualClock, RecordCache, SystemClock};
pub use resolver::{IterativeResolver, ResolverSettings};
pub use server::DnsServerHandler;
pub use transport::UdpTransport;
pub use wire::{MessageBuilder, RecordTypeMapper, ResponseParser};
