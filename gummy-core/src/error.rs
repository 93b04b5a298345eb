use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Reddit API error: {0}")]
    RedditApi(#[from] RedditApiError),

    #[error("Classifier error: {0}")]
    Llm(#[from] LlmError),

    #[error("Link summarizer error: {0}")]
    Summarizer(#[from] SummarizerError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("HTTP request failed: {message}")]
    RequestFailed {
        message: String,
        status_code: Option<u16>,
    },
}

impl CoreError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            message: message.into(),
        }
    }

    /// Bad user input rather than a failing component.
    pub fn is_user_error(&self) -> bool {
        matches!(self, CoreError::InvalidInput { .. })
    }
}

#[derive(Error, Debug, Clone)]
pub enum RedditApiError {
    #[error("client-credentials grant rejected: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("bearer token rejected")]
    InvalidToken,

    #[error("rate limited, retry after {retry_after}s")]
    RateLimitExceeded { retry_after: u64 },

    #[error("access to {resource} is forbidden")]
    Forbidden { resource: String },

    #[error("r/{subreddit} does not exist or is private")]
    SubredditNotFound { subreddit: String },

    #[error("search request timed out")]
    RequestTimeout,

    #[error("unexpected listing payload: {details}")]
    InvalidResponse { details: String },

    #[error("server returned {status_code}")]
    ServerError { status_code: u16 },
}

#[derive(Error, Debug, Clone)]
pub enum LlmError {
    #[error("{provider} refused the credentials")]
    AuthenticationFailed { provider: String },

    #[error("{provider} API key is missing or invalid")]
    InvalidApiKey { provider: String },

    #[error("{provider} rate limited the request, retry after {retry_after}s")]
    RateLimitExceeded { provider: String, retry_after: u64 },

    #[error("model {model} is not available")]
    ModelNotAvailable { model: String },

    #[error("{provider} is unavailable")]
    ServiceUnavailable { provider: String },

    #[error("{provider} did not answer in time")]
    RequestTimeout { provider: String },

    #[error("{provider} returned a malformed classification: {details}")]
    InvalidResponseFormat { provider: String, details: String },
}

#[derive(Error, Debug, Clone)]
pub enum SummarizerError {
    #[error("API key rejected")]
    AuthenticationFailed,

    #[error("request rejected with status {status_code}")]
    Rejected { status_code: u16 },

    #[error("malformed summary: {details}")]
    InvalidResponse { details: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{path} does not exist")]
    FileNotFound { path: String },

    #[error("cannot read {path}: permission denied")]
    PermissionDenied { path: String },

    #[error("cannot read config: {details}")]
    InvalidFormat { details: String },

    #[error("{field} = {value} is out of range")]
    InvalidValue { field: String, value: String },

    #[error("{reason}")]
    ValidationFailed { reason: String },

    #[error(transparent)]
    Parse(#[from] toml::de::Error),
}
