use async_trait::async_trait;
use ferrous_recursor_domain::{DomainError, Question, ServerResponse};
use std::net::SocketAddr;
use std::time::Duration;

/// One request/response exchange with a single name server.
#[async_trait]
pub trait NameServerTransport: Send + Sync {
    /// Send a non-recursive query carrying transaction `id` and wait up to
    /// `timeout` for the matching reply.
    ///
    /// Returns [`DomainError::QueryTimeout`] when no reply with `id` arrived
    /// in time.
    async fn exchange(
        &self,
        server: SocketAddr,
        id: u16,
        question: &Question,
        timeout: Duration,
    ) -> Result<ServerResponse, DomainError>;
}
