use crate::error::*;
use std::fmt::Display;
use tracing::{debug, error, warn};

/// Logging and user-facing rendering shared by every error type in the
/// workspace.
pub trait ErrorExt: Display {
    /// Stable identifier, used in logs and `--json` failures.
    fn error_code(&self) -> &'static str;

    fn user_friendly_message(&self) -> String;

    fn log_error(&self) -> &Self {
        error!(code = self.error_code(), "{}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!(code = self.error_code(), "{}", self);
        self
    }
}

impl ErrorExt for CoreError {
    fn error_code(&self) -> &'static str {
        match self {
            CoreError::RedditApi(_) => "REDDIT_API",
            CoreError::Llm(_) => "LLM",
            CoreError::Summarizer(_) => "SUMMARIZER",
            CoreError::Config(_) => "CONFIG",
            CoreError::Io(_) => "IO",
            CoreError::Serialization(_) => "SERIALIZATION",
            CoreError::Network(_) => "NETWORK",
            CoreError::InvalidInput { .. } => "INVALID_INPUT",
            CoreError::NotFound { .. } => "NOT_FOUND",
            CoreError::Internal { .. } => "INTERNAL",
            CoreError::RequestFailed { .. } => "REQUEST_FAILED",
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::RedditApi(e) => e.user_friendly_message(),
            CoreError::Llm(e) => e.user_friendly_message(),
            CoreError::Summarizer(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Network(_) => {
                "Could not reach the remote service. Check your connection.".to_string()
            }
            CoreError::InvalidInput { message } => format!("Invalid input: {}", message),
            CoreError::NotFound { resource } => format!("Nothing found at {}", resource),
            CoreError::Io(e) => format!("Could not access local data: {}", e),
            _ => "Something went wrong. Run with --verbose for details.".to_string(),
        }
    }

    fn log_error(&self) -> &Self {
        error!(code = self.error_code(), "{}", self);
        debug!("{:?}", self);
        self
    }
}

impl ErrorExt for RedditApiError {
    fn error_code(&self) -> &'static str {
        match self {
            RedditApiError::AuthenticationFailed { .. } => "REDDIT_AUTH_FAILED",
            RedditApiError::InvalidToken => "REDDIT_INVALID_TOKEN",
            RedditApiError::RateLimitExceeded { .. } => "REDDIT_RATE_LIMIT",
            RedditApiError::Forbidden { .. } => "REDDIT_FORBIDDEN",
            RedditApiError::SubredditNotFound { .. } => "REDDIT_SUBREDDIT_NOT_FOUND",
            RedditApiError::RequestTimeout => "REDDIT_TIMEOUT",
            RedditApiError::InvalidResponse { .. } => "REDDIT_INVALID_RESPONSE",
            RedditApiError::ServerError { .. } => "REDDIT_SERVER_ERROR",
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            RedditApiError::AuthenticationFailed { .. } | RedditApiError::InvalidToken => {
                "Reddit rejected the app credentials. Check REDDIT_CLIENT_ID and REDDIT_CLIENT_SECRET, or set GUMMY_SYNTHETIC=true.".to_string()
            }
            RedditApiError::RateLimitExceeded { retry_after } => {
                format!("Reddit is rate limiting searches. Try again in {}s.", retry_after)
            }
            RedditApiError::SubredditNotFound { subreddit } => {
                format!("r/{} does not exist or is private.", subreddit)
            }
            _ => "Reddit search is unavailable right now.".to_string(),
        }
    }
}

impl ErrorExt for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            LlmError::AuthenticationFailed { .. } => "LLM_AUTH_FAILED",
            LlmError::InvalidApiKey { .. } => "LLM_INVALID_API_KEY",
            LlmError::RateLimitExceeded { .. } => "LLM_RATE_LIMIT",
            LlmError::ModelNotAvailable { .. } => "LLM_MODEL_NOT_AVAILABLE",
            LlmError::ServiceUnavailable { .. } => "LLM_SERVICE_UNAVAILABLE",
            LlmError::RequestTimeout { .. } => "LLM_TIMEOUT",
            LlmError::InvalidResponseFormat { .. } => "LLM_INVALID_RESPONSE",
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            LlmError::AuthenticationFailed { .. } | LlmError::InvalidApiKey { .. } => {
                "The OpenAI key was rejected; posts are classified by keyword rules instead."
                    .to_string()
            }
            LlmError::ModelNotAvailable { model } => {
                format!("Model '{}' is not available. Set OPENAI_MODEL to another model.", model)
            }
            _ => "The classification model failed; keyword rules were used instead.".to_string(),
        }
    }
}

impl ErrorExt for SummarizerError {
    fn error_code(&self) -> &'static str {
        match self {
            SummarizerError::AuthenticationFailed => "SUMMARIZER_AUTH_FAILED",
            SummarizerError::Rejected { .. } => "SUMMARIZER_REJECTED",
            SummarizerError::InvalidResponse { .. } => "SUMMARIZER_INVALID_RESPONSE",
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            SummarizerError::AuthenticationFailed => {
                "Firecrawl rejected FIRECRAWL_API_KEY.".to_string()
            }
            _ => "The link could not be summarized right now.".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND",
            ConfigError::PermissionDenied { .. } => "CONFIG_PERMISSION_DENIED",
            ConfigError::InvalidFormat { .. } => "CONFIG_INVALID_FORMAT",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
            ConfigError::ValidationFailed { .. } => "CONFIG_VALIDATION_FAILED",
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR",
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::InvalidValue { field, value } => {
                format!("Config value {} = {} is not allowed.", field, value)
            }
            ConfigError::Parse(e) => format!("Config file is not valid TOML: {}", e.message()),
            other => format!("Config problem: {}", other),
        }
    }
}

/// Routes failures to the log at the right level before they are shown.
#[derive(Debug, Default)]
pub struct ErrorReporter {
    verbose: bool,
}

impl ErrorReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// User mistakes log as warnings, everything else as errors.
    pub fn report(&self, error: &CoreError) {
        if error.is_user_error() {
            error.log_warn();
        } else {
            error.log_error();
        }
        if self.verbose {
            debug!("shown to user: {}", error.user_friendly_message());
        }
    }
}
