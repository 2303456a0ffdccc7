use async_trait::async_trait;
use ferrous_recursor_application::ports::NameServerTransport;
use ferrous_recursor_domain::{DomainError, DomainName, Question, ServerResponse};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory name server hierarchy keyed by `(server address, query name)`.
///
/// Unknown pairs time out immediately. Every exchange is logged.
#[derive(Default)]
pub struct MockNameServers {
    replies: HashMap<(Ipv4Addr, DomainName), ServerResponse>,
    delays: HashMap<Ipv4Addr, Duration>,
    log: Mutex<Vec<(Ipv4Addr, DomainName)>>,
}

impl MockNameServers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer queries for `name` sent to `server` with `response`.
    pub fn on(mut self, server: Ipv4Addr, name: &str, response: ServerResponse) -> Self {
        let name = DomainName::parse(name).expect("valid name");
        self.replies.insert((server, name), response);
        self
    }

    /// Hold every reply from `server` for `delay` before sending it.
    pub fn slow(mut self, server: Ipv4Addr, delay: Duration) -> Self {
        self.delays.insert(server, delay);
        self
    }

    pub fn query_count(&self) -> usize {
        self.log.lock().unwrap().len()
    }

    pub fn queries_to(&self, server: Ipv4Addr) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|(ip, _)| *ip == server)
            .count()
    }

    pub fn queries_for(&self, name: &str) -> usize {
        let name = DomainName::parse(name).expect("valid name");
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, queried)| *queried == name)
            .count()
    }
}

#[async_trait]
impl NameServerTransport for MockNameServers {
    async fn exchange(
        &self,
        server: SocketAddr,
        id: u16,
        question: &Question,
        _timeout: Duration,
    ) -> Result<ServerResponse, DomainError> {
        let ip = match server.ip() {
            IpAddr::V4(ip) => ip,
            IpAddr::V6(_) => {
                return Err(DomainError::Transport {
                    server: server.to_string(),
                    reason: "IPv6 not supported".into(),
                })
            }
        };

        self.log
            .lock()
            .unwrap()
            .push((ip, question.name.clone()));

        if let Some(delay) = self.delays.get(&ip) {
            tokio::time::sleep(*delay).await;
        }

        match self.replies.get(&(ip, question.name.clone())) {
            Some(response) => {
                let mut response = response.clone();
                response.id = id;
                Ok(response)
            }
            None => Err(DomainError::QueryTimeout {
                server: server.to_string(),
            }),
        }
    }
}
