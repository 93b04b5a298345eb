use gummy_core::{CoreError, RedditApiError};
use oauth2::basic::BasicClient;
use oauth2::reqwest::async_http_client;
use oauth2::{AuthType, AuthUrl, ClientId, ClientSecret, Scope, TokenResponse, TokenUrl};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

const REDDIT_AUTH_URL: &str = "https://www.reddit.com/api/v1/authorize";
const REDDIT_TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Tokens are refreshed this long before Reddit would reject them.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct AppToken {
    pub access_token: String,
    pub expires_at: Instant,
}

impl AppToken {
    pub fn is_fresh(&self) -> bool {
        Instant::now() + EXPIRY_MARGIN < self.expires_at
    }
}

/// Application-only OAuth (client-credentials grant). Read-only search needs
/// no user context, so there is no authorization redirect.
#[derive(Debug)]
pub struct AppOnlyAuth {
    oauth_client: BasicClient,
    token: Mutex<Option<AppToken>>,
}

impl AppOnlyAuth {
    pub fn new(client_id: String, client_secret: String) -> Result<Self, CoreError> {
        let auth_url = AuthUrl::new(REDDIT_AUTH_URL.to_string()).map_err(|e| {
            CoreError::Internal {
                message: format!("Invalid auth URL: {}", e),
            }
        })?;
        let token_url = TokenUrl::new(REDDIT_TOKEN_URL.to_string()).map_err(|e| {
            CoreError::Internal {
                message: format!("Invalid token URL: {}", e),
            }
        })?;

        let oauth_client = BasicClient::new(
            ClientId::new(client_id),
            Some(ClientSecret::new(client_secret)),
            auth_url,
            Some(token_url),
        )
        .set_auth_type(AuthType::BasicAuth);

        Ok(Self {
            oauth_client,
            token: Mutex::new(None),
        })
    }

    pub fn get_required_scopes() -> Vec<&'static str> {
        vec!["read"]
    }

    /// Returns a cached token while it is fresh, otherwise exchanges the
    /// client credentials for a new one.
    pub async fn access_token(&self) -> Result<String, CoreError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|token| token.is_fresh()) {
            debug!("Reusing cached Reddit application token");
            return Ok(token.access_token.clone());
        }

        let mut request = self.oauth_client.exchange_client_credentials();
        for scope in Self::get_required_scopes() {
            request = request.add_scope(Scope::new(scope.to_string()));
        }

        let response = request
            .request_async(async_http_client)
            .await
            .map_err(|e| {
                error!("Client-credentials exchange failed: {}", e);
                CoreError::RedditApi(RedditApiError::AuthenticationFailed {
                    reason: e.to_string(),
                })
            })?;

        let expires_in = response
            .expires_in()
            .unwrap_or_else(|| Duration::from_secs(3600));
        let token = AppToken {
            access_token: response.access_token().secret().clone(),
            expires_at: Instant::now() + expires_in,
        };
        info!("Obtained Reddit application token, valid for {:?}", expires_in);

        *cached = Some(token.clone());
        Ok(token.access_token)
    }

    pub async fn has_fresh_token(&self) -> bool {
        self.token
            .lock()
            .await
            .as_ref()
            .is_some_and(|token| token.is_fresh())
    }
}
