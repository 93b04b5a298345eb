use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "gummy.toml";

const FIRECRAWL_PLACEHOLDER_KEY: &str = "your-firecrawl-key";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub reddit: RedditConfig,
    pub openai: OpenAiConfig,
    pub firecrawl: FirecrawlConfig,
    pub search: SearchDefaults,
    /// Courtesy delay applied before every outbound call, in milliseconds.
    pub request_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub user_agent: String,
    /// Serve searches from the synthetic corpus instead of Reddit. Off by default.
    pub use_synthetic: bool,
    pub data_dir: PathBuf,
    pub corpus_seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FirecrawlConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub language: String,
    pub max_length: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchDefaults {
    pub limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reddit: RedditConfig::default(),
            openai: OpenAiConfig::default(),
            firecrawl: FirecrawlConfig::default(),
            search: SearchDefaults::default(),
            request_delay_ms: 1000,
        }
    }
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            user_agent: format!("gummy-lite/{}", env!("CARGO_PKG_VERSION")),
            use_synthetic: false,
            data_dir: PathBuf::from("data"),
            corpus_seed: 0x5EED,
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
            base_url: "https://api.openai.com".to_string(),
            temperature: 0.3,
        }
    }
}

impl Default for FirecrawlConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: "https://api.firecrawl.dev/v1/summarize".to_string(),
            language: "pt-BR".to_string(),
            max_length: 500,
        }
    }
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

impl RedditConfig {
    /// Client id and secret for application-only OAuth, when both are set.
    pub fn app_credentials(&self) -> Option<(&str, &str)> {
        match (non_empty(&self.client_id), non_empty(&self.client_secret)) {
            (Some(id), Some(secret)) => Some((id, secret)),
            _ => None,
        }
    }

    pub fn corpus_path(&self) -> PathBuf {
        self.data_dir.join("mock_reddit_data.json")
    }
}

impl OpenAiConfig {
    pub fn usable_api_key(&self) -> Option<&str> {
        non_empty(&self.api_key)
    }
}

impl FirecrawlConfig {
    /// The configured key, ignoring the placeholder shipped in sample env files.
    pub fn usable_api_key(&self) -> Option<&str> {
        non_empty(&self.api_key).filter(|key| *key != FIRECRAWL_PLACEHOLDER_KEY)
    }
}

impl AppConfig {
    /// Loads defaults, then the TOML file, then environment overrides.
    ///
    /// An explicit `path` must exist; without one, `gummy.toml` in the working
    /// directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            std::io::ErrorKind::PermissionDenied => ConfigError::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => ConfigError::InvalidFormat {
                details: e.to_string(),
            },
        })?;

        info!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies environment-style overrides. `lookup` returns the value of a
    /// variable, which keeps this testable without touching the process env.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.openai.api_key = Some(key);
        }
        if let Some(model) = lookup("OPENAI_MODEL") {
            self.openai.model = model;
        }
        if let Some(key) = lookup("FIRECRAWL_API_KEY") {
            self.firecrawl.api_key = Some(key);
        }
        if let Some(id) = lookup("REDDIT_CLIENT_ID") {
            self.reddit.client_id = Some(id);
        }
        if let Some(secret) = lookup("REDDIT_CLIENT_SECRET") {
            self.reddit.client_secret = Some(secret);
        }
        if let Some(user_agent) = lookup("REDDIT_USER_AGENT") {
            self.reddit.user_agent = user_agent;
        }
        if let Some(dir) = lookup("GUMMY_DATA_DIR") {
            self.reddit.data_dir = PathBuf::from(dir);
        }
        if let Some(flag) = lookup("GUMMY_SYNTHETIC") {
            self.reddit.use_synthetic = parse_flag("GUMMY_SYNTHETIC", &flag)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reddit.user_agent.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "reddit.user_agent must not be empty".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.openai.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "openai.temperature".to_string(),
                value: self.openai.temperature.to_string(),
            });
        }
        if self.search.limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.limit".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_flag(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}
