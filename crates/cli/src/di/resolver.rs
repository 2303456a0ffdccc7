use ferrous_recursor_application::ports::DnsResolver;
use ferrous_recursor_application::use_cases::{
    LoadCacheUseCase, PersistCacheUseCase, ResolveHostnameUseCase,
};
use ferrous_recursor_domain::Config;
use ferrous_recursor_infrastructure::dns::{
    CacheSettings, IterativeResolver, RecordCache, ResolverSettings, UdpTransport,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub struct ResolverServices {
    pub resolve_hostname: Arc<ResolveHostnameUseCase>,
    pub cache: Option<CacheServices>,
}

pub struct CacheServices {
    pub load: LoadCacheUseCase,
    pub persist: PersistCacheUseCase,
}

impl ResolverServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let root_hints = config.resolver.root_candidates()?;

        let mut resolver = IterativeResolver::new(
            Arc::new(UdpTransport::new()),
            root_hints,
            ResolverSettings::from_config(&config.resolver),
        );

        let cache = if config.cache.enabled {
            let record_cache = Arc::new(RecordCache::new(CacheSettings::from_config(&config.cache)));
            resolver = resolver.with_cache(record_cache.clone());

            let path = PathBuf::from(&config.cache.path);
            info!(
                path = %path.display(),
                ttl_override = config.cache.ttl_override,
                "Record cache enabled"
            );
            Some(CacheServices {
                load: LoadCacheUseCase::new(record_cache.clone(), path.clone()),
                persist: PersistCacheUseCase::new(record_cache, path),
            })
        } else {
            None
        };

        let resolver: Arc<dyn DnsResolver> = Arc::new(resolver);

        Ok(Self {
            resolve_hostname: Arc::new(ResolveHostnameUseCase::new(resolver)),
            cache,
        })
    }

    pub async fn load_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.load.execute().await;
        }
    }

    pub fn persist_cache(&self) {
        if let Some(cache) = &self.cache {
            // Failures are logged by the use case.
            let _ = cache.persist.execute();
        }
    }
}
