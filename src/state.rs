use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::{MetadataClient, MovieLookup, YearsClient, YearsSource};
use crate::config::Config;
use crate::landing::LandingRegistry;
use crate::services::MenuDataCache;

/// Build a shared HTTP client with reasonable defaults for API calls.
/// This client should be reused across all HTTP-based services to enable
/// connection pooling and avoid socket exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("Marquee/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub lookup: Arc<dyn MovieLookup>,

    /// One menu cache per process; every navbar trigger goes through it.
    pub menu: Arc<MenuDataCache>,

    pub landings: Arc<LandingRegistry>,
}

impl SharedState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let metadata_http = build_shared_http_client(config.metadata.request_timeout_seconds.into())?;
        let years_http = build_shared_http_client(config.years.request_timeout_seconds.into())?;

        let lookup = Arc::new(MetadataClient::with_shared_client(
            metadata_http,
            config.metadata.base_url.clone(),
            config.metadata.api_key.clone(),
        ));
        let years = Arc::new(YearsClient::with_shared_client(
            years_http,
            config.years.url.clone(),
        ));

        Self::with_sources(config, lookup, years)
    }

    /// Wires the state around caller-supplied collaborators.
    pub fn with_sources(
        config: Config,
        lookup: Arc<dyn MovieLookup>,
        years: Arc<dyn YearsSource>,
    ) -> anyhow::Result<Self> {
        let landings = LandingRegistry::builtin()
            .map_err(|e| anyhow::anyhow!("Failed to load landing catalog: {e}"))?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            lookup,
            menu: Arc::new(MenuDataCache::new(years)),
            landings: Arc::new(landings),
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
