use crate::firecrawl::FirecrawlClient;
use crate::simulated::SimulatedSummarizer;
use gummy_core::{
    AppConfig, CoreError, ErrorExt, LinkSummary, RateLimitConfig, RateLimiter, Summarizer,
};
use tracing::{debug, info};

#[derive(Debug)]
pub enum SummarizerBackend {
    Firecrawl(FirecrawlClient),
    Simulated,
}

/// Link summarizer that prefers Firecrawl and substitutes a simulated card
/// for any URL the service cannot handle.
#[derive(Debug)]
pub struct LinkSummarizer {
    backend: SummarizerBackend,
    simulated: SimulatedSummarizer,
    rate_limiter: RateLimiter,
}

impl LinkSummarizer {
    pub fn new(
        backend: SummarizerBackend,
        simulated: SimulatedSummarizer,
        rate_limit: RateLimitConfig,
    ) -> Self {
        Self {
            backend,
            simulated,
            rate_limiter: RateLimiter::new(rate_limit),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, CoreError> {
        let rate_limit = RateLimitConfig::from_millis(config.request_delay_ms);
        let simulated = SimulatedSummarizer::new(config.firecrawl.language.clone());

        let backend = match config.firecrawl.usable_api_key() {
            Some(api_key) => SummarizerBackend::Firecrawl(FirecrawlClient::new(
                api_key.to_string(),
                &config.firecrawl,
            )?),
            None => {
                info!("Firecrawl API key not configured, using simulated summaries");
                SummarizerBackend::Simulated
            }
        };

        Ok(Self::new(backend, simulated, rate_limit))
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self.backend, SummarizerBackend::Simulated)
    }
}

impl Summarizer for LinkSummarizer {
    async fn summarize(&self, url: &str) -> LinkSummary {
        let permit = self.rate_limiter.acquire_permit().await;
        debug!("Summarizer permit acquired after {:?}", permit.queue_wait_time);

        match &self.backend {
            SummarizerBackend::Simulated => self.simulated.summarize(url),
            SummarizerBackend::Firecrawl(client) => match client.summarize(url).await {
                Ok(summary) => summary,
                Err(e) => {
                    e.log_warn();
                    info!("Summarizing {} failed, using simulated summary", url);
                    self.simulated.summarize(url)
                }
            },
        }
    }
}
