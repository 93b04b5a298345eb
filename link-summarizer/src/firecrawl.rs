use gummy_core::{CoreError, FirecrawlConfig, LinkMetadata, LinkSummary, SummarizerError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

const WORDS_PER_MINUTE: u32 = 200;

#[derive(Debug, Serialize)]
struct SummarizeRequest<'a> {
    url: &'a str,
    language: &'a str,
    max_length: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SummarizeResponse {
    title: String,
    summary: String,
    main_topics: Vec<String>,
    metadata: PartialMetadata,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialMetadata {
    domain: Option<String>,
    url: Option<String>,
    estimated_reading_time: Option<u32>,
    language: Option<String>,
    word_count: Option<u32>,
}

#[derive(Debug)]
pub struct FirecrawlClient {
    http_client: Client,
    api_key: String,
    api_url: String,
    language: String,
    max_length: u32,
}

impl FirecrawlClient {
    pub fn new(api_key: String, config: &FirecrawlConfig) -> Result<Self, CoreError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: config.api_url.clone(),
            language: config.language.clone(),
            max_length: config.max_length,
        })
    }

    pub async fn summarize(&self, url: &str) -> Result<LinkSummary, CoreError> {
        let body = SummarizeRequest {
            url,
            language: &self.language,
            max_length: self.max_length,
        };

        debug!("Requesting summary for {}", url);
        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("Summarize request failed with status {}", status);
            let error = match status.as_u16() {
                401 | 403 => SummarizerError::AuthenticationFailed,
                code => SummarizerError::Rejected { status_code: code },
            };
            return Err(CoreError::Summarizer(error));
        }

        let parsed: SummarizeResponse = response.json().await.map_err(|e| {
            CoreError::Summarizer(SummarizerError::InvalidResponse {
                details: e.to_string(),
            })
        })?;

        Ok(complete_summary(parsed, url, &self.language))
    }
}

/// Fills metadata the service left out from the requested URL and the
/// returned text.
fn complete_summary(response: SummarizeResponse, url: &str, language: &str) -> LinkSummary {
    let metadata = response.metadata;
    let word_count = metadata
        .word_count
        .unwrap_or_else(|| response.summary.split_whitespace().count() as u32);
    let estimated_reading_time = metadata
        .estimated_reading_time
        .unwrap_or_else(|| word_count.div_ceil(WORDS_PER_MINUTE).max(1));

    LinkSummary {
        title: response.title,
        summary: response.summary,
        main_topics: response.main_topics,
        metadata: LinkMetadata {
            domain: metadata.domain.unwrap_or_else(|| domain_of(url)),
            url: metadata.url.unwrap_or_else(|| url.to_string()),
            estimated_reading_time,
            language: metadata.language.unwrap_or_else(|| language.to_string()),
            word_count,
        },
    }
}

pub(crate) fn domain_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_metadata_is_completed_from_url() {
        let response: SummarizeResponse = serde_json::from_str(
            r#"{"title": "Async Rust", "summary": "one two three four", "main_topics": ["Rust"], "metadata": {"word_count": 1000}}"#,
        )
        .unwrap();

        let summary = complete_summary(response, "https://blog.example.com/async", "pt-BR");
        assert_eq!(summary.metadata.domain, "blog.example.com");
        assert_eq!(summary.metadata.url, "https://blog.example.com/async");
        assert_eq!(summary.metadata.language, "pt-BR");
        assert_eq!(summary.metadata.word_count, 1000);
        assert_eq!(summary.metadata.estimated_reading_time, 5);
    }

    #[test]
    fn test_empty_response_still_yields_summary() {
        let response: SummarizeResponse = serde_json::from_str("{}").unwrap();
        let summary = complete_summary(response, "https://example.org/", "en");
        assert_eq!(summary.title, "");
        assert_eq!(summary.metadata.word_count, 0);
        assert_eq!(summary.metadata.estimated_reading_time, 1);
    }

    #[test]
    fn test_request_body_shape() {
        let value = serde_json::to_value(SummarizeRequest {
            url: "https://example.org/",
            language: "pt-BR",
            max_length: 500,
        })
        .unwrap();
        assert_eq!(value["language"], "pt-BR");
        assert_eq!(value["max_length"], 500);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_error() {
        let config = FirecrawlConfig {
            api_url: "http://127.0.0.1:9/v1/summarize".to_string(),
            ..FirecrawlConfig::default()
        };
        let client = FirecrawlClient::new("fc-test".to_string(), &config).unwrap();
        assert!(client.summarize("https://example.org/").await.is_err());
    }
}
