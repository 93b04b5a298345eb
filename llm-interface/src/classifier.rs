use crate::openai::OpenAiProvider;
use crate::{rules, LlmProvider};
use gummy_core::{
    AppConfig, Classification, Classifier, CoreError, ErrorExt, RateLimitConfig, RateLimiter,
};
use tracing::{debug, info};

/// How classifications are produced. Picked once at construction.
#[derive(Debug)]
pub enum ClassifierBackend<P> {
    Remote(P),
    RuleBased,
}

/// Classifier that asks a model first and falls back to keyword rules on any
/// failure. Only remote calls are paced.
#[derive(Debug)]
pub struct PostClassifier<P = OpenAiProvider> {
    backend: ClassifierBackend<P>,
    rate_limiter: RateLimiter,
}

impl PostClassifier<OpenAiProvider> {
    /// Remote classification when an API key is configured, rules otherwise.
    pub fn from_config(config: &AppConfig) -> Result<Self, CoreError> {
        let rate_limit = RateLimitConfig::from_millis(config.request_delay_ms);
        match config.openai.usable_api_key() {
            Some(api_key) => {
                let provider = OpenAiProvider::from_config(api_key, &config.openai)?;
                info!("Classifying posts with {}", provider.model());
                Ok(Self::remote(provider, rate_limit))
            }
            None => {
                info!("No OpenAI API key configured, classifying with keyword rules");
                Ok(Self::rule_based())
            }
        }
    }
}

impl<P: LlmProvider> PostClassifier<P> {
    pub fn remote(provider: P, rate_limit: RateLimitConfig) -> Self {
        Self {
            backend: ClassifierBackend::Remote(provider),
            rate_limiter: RateLimiter::new(rate_limit),
        }
    }

    pub fn rule_based() -> Self {
        Self {
            backend: ClassifierBackend::RuleBased,
            rate_limiter: RateLimiter::new(RateLimitConfig::disabled()),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.backend, ClassifierBackend::Remote(_))
    }

    pub fn provider(&self) -> Option<&P> {
        match &self.backend {
            ClassifierBackend::Remote(provider) => Some(provider),
            ClassifierBackend::RuleBased => None,
        }
    }
}

impl<P: LlmProvider> Classifier for PostClassifier<P> {
    async fn classify(&self, title: &str, body: &str) -> Classification {
        let provider = match &self.backend {
            ClassifierBackend::Remote(provider) => provider,
            ClassifierBackend::RuleBased => return rules::classify(title, body),
        };

        let permit = self.rate_limiter.acquire_permit().await;
        debug!("Classifier permit acquired after {:?}", permit.queue_wait_time);

        match provider.classify_post(title, body).await {
            Ok(classification) => classification,
            Err(e) => {
                e.log_warn();
                info!("{} classification failed, using keyword rules", provider.name());
                rules::classify(title, body)
            }
        }
    }
}
