use ferrous_recursor_domain::ResolverConfig;
use std::time::Duration;

/// Limits and timings the resolver runs with.
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub attempts: u32,
    pub attempt_timeout: Duration,
    pub max_alias_depth: u8,
    pub max_delegation_depth: u8,
    pub max_glue_depth: u8,
    pub name_server_port: u16,
}

impl ResolverSettings {
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self {
            attempts: config.attempts.max(1),
            attempt_timeout: config.attempt_timeout(),
            max_alias_depth: config.max_alias_depth,
            max_delegation_depth: config.max_delegation_depth,
            max_glue_depth: config.max_glue_depth,
            name_server_port: config.name_server_port,
        }
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}
