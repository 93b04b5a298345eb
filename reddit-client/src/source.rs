use crate::api::RedditApiClient;
use crate::auth::AppOnlyAuth;
use crate::synthetic::SyntheticCorpus;
use gummy_core::{
    AppConfig, CoreError, ErrorExt, PostSource, RateLimitConfig, RateLimiter, RawPost,
};
use tracing::{debug, info};

/// Where posts come from. Picked once at construction.
#[derive(Debug)]
pub enum SourceBackend {
    Live(RedditApiClient),
    Simulated(SyntheticCorpus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    Live,
    Simulated,
}

/// Post source with a courtesy delay in front of every fetch, in both modes.
#[derive(Debug)]
pub struct RedditSource {
    backend: SourceBackend,
    rate_limiter: RateLimiter,
}

impl RedditSource {
    pub fn new(backend: SourceBackend, rate_limit: RateLimitConfig) -> Self {
        Self {
            backend,
            rate_limiter: RateLimiter::new(rate_limit),
        }
    }

    pub fn simulated(corpus: SyntheticCorpus, rate_limit: RateLimitConfig) -> Self {
        Self::new(SourceBackend::Simulated(corpus), rate_limit)
    }

    pub fn live(client: RedditApiClient, rate_limit: RateLimitConfig) -> Self {
        Self::new(SourceBackend::Live(client), rate_limit)
    }

    /// Builds the simulated source from the corpus store, or a live client
    /// that authenticates with application credentials when both are set.
    pub fn from_config(config: &AppConfig) -> Result<Self, CoreError> {
        let rate_limit = RateLimitConfig::from_millis(config.request_delay_ms);

        if config.reddit.use_synthetic {
            let path = config.reddit.corpus_path();
            info!("Using synthetic Reddit corpus at {}", path.display());
            let corpus = SyntheticCorpus::load_or_generate(&path, config.reddit.corpus_seed);
            return Ok(Self::simulated(corpus, rate_limit));
        }

        let auth = match config.reddit.app_credentials() {
            Some((client_id, client_secret)) => Some(AppOnlyAuth::new(
                client_id.to_string(),
                client_secret.to_string(),
            )?),
            None => {
                info!("No Reddit app credentials configured, using public endpoints");
                None
            }
        };
        let client = RedditApiClient::new(config.reddit.user_agent.clone(), auth)?;
        Ok(Self::live(client, rate_limit))
    }

    pub fn mode(&self) -> SourceMode {
        match self.backend {
            SourceBackend::Live(_) => SourceMode::Live,
            SourceBackend::Simulated(_) => SourceMode::Simulated,
        }
    }
}

impl PostSource for RedditSource {
    async fn fetch(&self, query: &str, community: Option<&str>, limit: usize) -> Vec<RawPost> {
        let permit = self.rate_limiter.acquire_permit().await;
        debug!("Source permit acquired after {:?}", permit.queue_wait_time);

        match &self.backend {
            SourceBackend::Simulated(corpus) => corpus.search(query, community, limit),
            SourceBackend::Live(client) => {
                match client.search_posts(query, community, limit).await {
                    Ok(posts) => posts,
                    Err(e) => {
                        e.log_warn();
                        Vec::new()
                    }
                }
            }
        }
    }
}
