use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::time::Duration;

use super::errors::ConfigError;
use crate::name_server::{CandidateList, ROOT_HINTS};

/// Iterative resolution settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Attempts per candidate server before it is given up for the round
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Per-attempt socket timeout in milliseconds
    #[serde(default = "default_attempt_timeout_ms")]
    pub attempt_timeout_ms: u64,

    /// Longest CNAME chain followed before reporting an alias loop
    #[serde(default = "default_max_alias_depth")]
    pub max_alias_depth: u8,

    /// Longest referral chain followed for one name
    #[serde(default = "default_max_delegation_depth")]
    pub max_delegation_depth: u8,

    /// Nesting limit for resolving glueless name server addresses
    #[serde(default = "default_max_glue_depth")]
    pub max_glue_depth: u8,

    /// UDP port name servers are queried on
    #[serde(default = "default_name_server_port")]
    pub name_server_port: u16,

    /// IPv4 addresses replacing the built-in root hints. Empty = built-in.
    #[serde(default)]
    pub root_hints: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            attempt_timeout_ms: default_attempt_timeout_ms(),
            max_alias_depth: default_max_alias_depth(),
            max_delegation_depth: default_max_delegation_depth(),
            max_glue_depth: default_max_glue_depth(),
            name_server_port: default_name_server_port(),
            root_hints: vec![],
        }
    }
}

impl ResolverConfig {
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }

    /// SBELT for this configuration: the override when present, else the
    /// built-in IANA list.
    pub fn root_candidates(&self) -> Result<CandidateList, ConfigError> {
        if self.root_hints.is_empty() {
            return Ok(CandidateList::from_root_hints(ROOT_HINTS));
        }

        let addresses = self
            .root_hints
            .iter()
            .map(|hint| {
                hint.trim().parse::<Ipv4Addr>().map_err(|e| {
                    ConfigError::InvalidRootHint {
                        hint: hint.clone(),
                        reason: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CandidateList::from_root_addresses(&addresses))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attempts == 0 {
            return Err(ConfigError::Validation(
                "resolver.attempts must be at least 1".to_string(),
            ));
        }
        if self.attempt_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "resolver.attempt_timeout_ms cannot be 0".to_string(),
            ));
        }
        if self.max_alias_depth == 0 || self.max_delegation_depth == 0 {
            return Err(ConfigError::Validation(
                "resolver depth limits must be at least 1".to_string(),
            ));
        }
        self.root_candidates().map(|_| ())
    }
}

fn default_attempts() -> u32 {
    3
}

fn default_attempt_timeout_ms() -> u64 {
    3000
}

fn default_max_alias_depth() -> u8 {
    8
}

fn default_max_delegation_depth() -> u8 {
    16
}

fn default_max_glue_depth() -> u8 {
    4
}

fn default_name_server_port() -> u16 {
    53
}
