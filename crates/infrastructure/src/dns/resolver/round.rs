use super::iterative::IterativeResolver;
use ferrous_recursor_domain::{
    Candidate, CandidateList, DomainError, DomainName, Question, ServerResponse,
};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use std::net::{Ipv4Addr, SocketAddr};
use tracing::{debug, warn};

impl IterativeResolver {
    /// Ask every candidate in `slist` at once and keep the first usable reply.
    ///
    /// Tasks still in flight when a winner arrives are detached; their
    /// results are never read.
    pub(super) async fn query_round(
        &self,
        slist: &CandidateList,
        name: &DomainName,
        glue_depth: u8,
    ) -> Result<ServerResponse, DomainError> {
        if slist.is_empty() {
            return Err(DomainError::ServersExhausted(name.to_string()));
        }

        debug!(
            domain = %name,
            zone = %slist.zone,
            candidates = slist.len(),
            glueless = slist.candidates.iter().filter(|c| c.needs_glue()).count(),
            "Querying candidate servers"
        );

        let mut futs = FuturesUnordered::new();
        for candidate in &slist.candidates {
            let resolver = self.clone();
            let candidate = candidate.clone();
            let question = Question::a(name.clone());
            futs.push(tokio::spawn(async move {
                let server = candidate.to_string();
                resolver
                    .query_candidate(candidate, question, glue_depth)
                    .await
                    .map_err(|e| (server, e))
            }));
        }

        while let Some(join_result) = futs.next().await {
            match join_result {
                Ok(Ok(response)) => return Ok(response),
                Ok(Err((server, e))) => {
                    debug!(domain = %name, server = %server, error = %e, "Candidate failed");
                }
                Err(e) => {
                    warn!(domain = %name, error = %e, "Candidate task panicked");
                }
            }
        }

        Err(DomainError::ServersExhausted(name.to_string()))
    }

    async fn query_candidate(
        &self,
        candidate: Candidate,
        question: Question,
        glue_depth: u8,
    ) -> Result<ServerResponse, DomainError> {
        let ip = match candidate.server_ip {
            Some(ip) => ip,
            None => self.resolve_glue(&candidate, glue_depth).await?,
        };

        let settings = self.settings();
        let server = SocketAddr::new(ip.into(), settings.name_server_port);
        let mut last_error = DomainError::QueryTimeout {
            server: server.to_string(),
        };

        for attempt in 1..=settings.attempts {
            let id = fastrand::u16(..);
            match self
                .transport()
                .exchange(server, id, &question, settings.attempt_timeout)
                .await
            {
                Ok(response) if response.is_usable_for(id) => return Ok(response),
                Ok(response) => {
                    return Err(DomainError::Transport {
                        server: server.to_string(),
                        reason: format!("unusable response code {}", response.rcode.as_str()),
                    });
                }
                Err(e) if e.is_retryable() => {
                    debug!(server = %server, attempt, domain = %question.name, "Attempt timed out");
                    last_error = e;
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error)
    }

    /// Look up the address of a name server that came without glue.
    async fn resolve_glue(
        &self,
        candidate: &Candidate,
        glue_depth: u8,
    ) -> Result<Ipv4Addr, DomainError> {
        let server_name = candidate.server_name.clone().ok_or_else(|| DomainError::Transport {
            server: candidate.to_string(),
            reason: "candidate has neither a name nor an address".into(),
        })?;

        if glue_depth >= self.settings().max_glue_depth {
            return Err(DomainError::GlueDepthExceeded(server_name.to_string()));
        }

        debug!(server = %server_name, depth = glue_depth + 1, "Resolving missing glue");

        let resolution = self
            .resolve_at_depth(server_name.clone(), glue_depth + 1)
            .await?;

        resolution
            .addresses
            .first()
            .copied()
            .ok_or_else(|| DomainError::ServersExhausted(server_name.to_string()))
    }
}
