use crate::response::parse_classification;
use crate::LlmProvider;
use gummy_core::{Classification, CoreError, LlmError, OpenAiConfig};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, warn};

const PROVIDER_NAME: &str = "openai";
const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
const SYSTEM_PROMPT: &str = "You are a specialized Reddit-post analyst.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Chat-completion client for OpenAI-compatible endpoints.
#[derive(Debug)]
pub struct OpenAiProvider {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: String, base_url: String) -> Result<Self, CoreError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            temperature: 0.3,
        })
    }

    pub fn from_config(api_key: &str, config: &OpenAiConfig) -> Result<Self, CoreError> {
        Ok(Self::new(
            api_key.to_string(),
            config.model.clone(),
            config.base_url.clone(),
        )?
        .with_temperature(config.temperature))
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, CHAT_COMPLETIONS_PATH)
    }

    async fn complete(&self, prompt: String) -> Result<String, CoreError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        debug!("Requesting classification from {} ({})", PROVIDER_NAME, self.model);
        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CoreError::Llm(LlmError::RequestTimeout {
                        provider: PROVIDER_NAME.to_string(),
                    })
                } else {
                    CoreError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Chat completion failed with status {}", status);
            let provider = PROVIDER_NAME.to_string();
            let error = match status.as_u16() {
                401 => LlmError::InvalidApiKey { provider },
                403 => LlmError::AuthenticationFailed { provider },
                404 => LlmError::ModelNotAvailable {
                    model: self.model.clone(),
                },
                429 => {
                    let retry_after = response
                        .headers()
                        .get("retry-after")
                        .and_then(|value| value.to_str().ok())
                        .and_then(|value| value.parse::<u64>().ok())
                        .unwrap_or(60);
                    warn!("Rate limited by {}, retry after {}s", PROVIDER_NAME, retry_after);
                    LlmError::RateLimitExceeded {
                        provider,
                        retry_after,
                    }
                }
                _ if status.is_server_error() => LlmError::ServiceUnavailable { provider },
                code => {
                    return Err(CoreError::RequestFailed {
                        message: format!("chat completion via {}", PROVIDER_NAME),
                        status_code: Some(code),
                    })
                }
            };
            return Err(CoreError::Llm(error));
        }

        let completion: ChatResponse = response.json().await.map_err(|e| {
            CoreError::Llm(LlmError::InvalidResponseFormat {
                provider: PROVIDER_NAME.to_string(),
                details: e.to_string(),
            })
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                CoreError::Llm(LlmError::InvalidResponseFormat {
                    provider: PROVIDER_NAME.to_string(),
                    details: "completion has no message content".to_string(),
                })
            })
    }
}

impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn classify_post(&self, title: &str, body: &str) -> Result<Classification, CoreError> {
        let content = self.complete(build_prompt(title, body)).await?;
        Ok(parse_classification(PROVIDER_NAME, &content)?)
    }
}

pub fn build_prompt(title: &str, body: &str) -> String {
    format!(
        r#"Analyze the following Reddit post and provide a detailed classification.

Title: {title}

Text: {body}

Answer with a JSON object that has exactly these keys:
{{
    "categoria": "one of Question, Discussion, Help Request, Tutorial, Share, News, Opinion, Vent",
    "sentimento": "one of Positive, Neutral, Negative, Mixed",
    "tópicos": ["relevant topics covered by the post"],
    "insights": ["observations about the post"]
}}

Reply with the JSON only, no additional text."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_every_key() {
        let prompt = build_prompt("Borrow checker question", "Why does this not compile?");
        for key in ["\"categoria\"", "\"sentimento\"", "\"tópicos\"", "\"insights\""] {
            assert!(prompt.contains(key), "missing {}", key);
        }
        assert!(prompt.contains("Title: Borrow checker question"));
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: "gpt-3.5-turbo",
            messages: vec![ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT.to_string(),
            }],
            temperature: 0.3,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["model"], "gpt-3.5-turbo");
    }

    #[test]
    fn test_from_config() {
        let mut config = OpenAiConfig::default();
        config.base_url = "http://localhost:8000/".to_string();
        let provider = OpenAiProvider::from_config("sk-test", &config).unwrap();
        assert_eq!(provider.model(), "gpt-3.5-turbo");
        assert_eq!(provider.endpoint(), "http://localhost:8000/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let provider = OpenAiProvider::new(
            "sk-test".to_string(),
            "gpt-3.5-turbo".to_string(),
            "http://127.0.0.1:9".to_string(),
        )
        .unwrap();
        assert!(provider.classify_post("title", "body").await.is_err());
    }
}
