//! UDP transport for iterative queries (RFC 1035 §4.2.1)
//!
//! One ephemeral socket per exchange. Datagrams that do not decode, come
//! from another address, or carry another transaction id are skipped until
//! the per-attempt deadline.

use crate::dns::wire::{MessageBuilder, ResponseParser};
use async_trait::async_trait;
use ferrous_recursor_application::ports::NameServerTransport;
use ferrous_recursor_domain::{DomainError, Question, ServerResponse};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Classic DNS-over-UDP payload limit; no EDNS(0) is advertised.
const MAX_UDP_RESPONSE_SIZE: usize = 512;

#[derive(Debug, Default, Clone, Copy)]
pub struct UdpTransport;

impl UdpTransport {
    pub fn new() -> Self {
        Self
    }

    async fn bind_for(server: SocketAddr) -> Result<UdpSocket, DomainError> {
        let bind_addr: SocketAddr = if server.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        UdpSocket::bind(bind_addr).await.map_err(|e| DomainError::Transport {
            server: server.to_string(),
            reason: format!("Failed to bind UDP socket: {}", e),
        })
    }
}

#[async_trait]
impl NameServerTransport for UdpTransport {
    async fn exchange(
        &self,
        server: SocketAddr,
        id: u16,
        question: &Question,
        timeout: Duration,
    ) -> Result<ServerResponse, DomainError> {
        let query = MessageBuilder::build_iterative_query(id, question)?;
        let socket = Self::bind_for(server).await?;
        let deadline = Instant::now() + timeout;
        let timed_out = || DomainError::QueryTimeout {
            server: server.to_string(),
        };

        let bytes_sent = tokio::time::timeout_at(deadline, socket.send_to(&query, server))
            .await
            .map_err(|_| timed_out())?
            .map_err(|e| DomainError::Transport {
                server: server.to_string(),
                reason: format!("Failed to send UDP query: {}", e),
            })?;

        debug!(server = %server, id, name = %question.name, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        loop {
            let (bytes_received, from_addr) =
                tokio::time::timeout_at(deadline, socket.recv_from(&mut recv_buf))
                    .await
                    .map_err(|_| timed_out())?
                    .map_err(|e| DomainError::Transport {
                        server: server.to_string(),
                        reason: format!("Failed to receive UDP response: {}", e),
                    })?;

            if from_addr.ip() != server.ip() {
                warn!(
                    expected = %server,
                    received_from = %from_addr,
                    "UDP response from unexpected source"
                );
                continue;
            }

            let response = match ResponseParser::parse(&recv_buf[..bytes_received]) {
                Ok(response) => response,
                Err(e) => {
                    debug!(server = %server, error = %e, "Skipping undecodable datagram");
                    continue;
                }
            };

            if response.id != id {
                debug!(
                    server = %server,
                    expected = id,
                    received = response.id,
                    "Skipping response with foreign transaction id"
                );
                continue;
            }

            debug!(server = %server, id, bytes_received, "UDP response received");
            return Ok(response);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrous_recursor_domain::DomainName;
    use hickory_proto::op::{Message, MessageType, OpCode};

    fn question() -> Question {
        Question::a(DomainName::parse("wiki.nl").unwrap())
    }

    async fn local_server() -> (UdpSocket, SocketAddr) {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        (socket, addr)
    }

    fn reply_bytes(id: u16) -> Vec<u8> {
        let message = Message::new(id, MessageType::Response, OpCode::Query);
        MessageBuilder::serialize_message(&message).unwrap()
    }

    #[tokio::test]
    async fn test_exchange_skips_foreign_ids() {
        let (server, addr) = local_server().await;

        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let (n, from) = server.recv_from(&mut buf).await.unwrap();
            let id = u16::from_be_bytes([buf[0], buf[1]]);
            assert!(n >= 12);
            server.send_to(&reply_bytes(id.wrapping_add(1)), from).await.unwrap();
            server.send_to(b"junk", from).await.unwrap();
            server.send_to(&reply_bytes(id), from).await.unwrap();
        });

        let response = UdpTransport::new()
            .exchange(addr, 777, &question(), Duration::from_secs(2))
            .await
            .unwrap();

        assert_eq!(response.id, 777);
        assert!(response.is_response);
    }

    #[tokio::test]
    async fn test_exchange_times_out() {
        let (_server, addr) = local_server().await;

        let result = UdpTransport::new()
            .exchange(addr, 1, &question(), Duration::from_millis(100))
            .await;

        assert!(matches!(result, Err(DomainError::QueryTimeout { .. })));
    }
}
