use crate::auth::AppOnlyAuth;
use gummy_core::{CoreError, RawPost, RedditApiError};
use reqwest::{Client, Method, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

const REDDIT_OAUTH_BASE: &str = "https://oauth.reddit.com";
const REDDIT_PUBLIC_BASE: &str = "https://www.reddit.com";

/// Reddit caps listing pages at 100 items.
const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListing<T> {
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub dist: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingChild<T> {
    pub kind: String,
    pub data: T,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditPostData {
    pub id: String,
    pub title: String,
    pub selftext: String,
    pub author: String,
    pub subreddit: String,
    pub permalink: String,
    pub url: String,
    pub created_utc: f64,
    pub score: i64,
    pub num_comments: u64,
    pub is_self: bool,
}

/// Searches Reddit, either with an application-only OAuth token against
/// `oauth.reddit.com` or anonymously against the public `.json` listings.
#[derive(Debug)]
pub struct RedditApiClient {
    http_client: Client,
    auth: Option<AppOnlyAuth>,
    user_agent: String,
    oauth_base: String,
    public_base: String,
}

impl RedditApiClient {
    pub fn new(user_agent: String, auth: Option<AppOnlyAuth>) -> Result<Self, CoreError> {
        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            auth,
            user_agent,
            oauth_base: REDDIT_OAUTH_BASE.to_string(),
            public_base: REDDIT_PUBLIC_BASE.to_string(),
        })
    }

    /// Points both the OAuth and the public endpoints at `base_url`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.oauth_base = base_url.clone();
        self.public_base = base_url;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        query_params: Option<&[(&str, &str)]>,
    ) -> Result<Response, CoreError> {
        let mut request_builder = match &self.auth {
            Some(auth) => {
                let access_token = auth.access_token().await?;
                self.http_client
                    .request(method.clone(), format!("{}{}", self.oauth_base, endpoint))
                    .bearer_auth(access_token)
            }
            None => self
                .http_client
                .request(method.clone(), format!("{}{}.json", self.public_base, endpoint)),
        };
        request_builder = request_builder.header("User-Agent", &self.user_agent);

        if let Some(params) = query_params {
            request_builder = request_builder.query(params);
        }

        info!("Making Reddit API request: {} {}", method, endpoint);
        let response = match request_builder.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Network error for {} {}: {}", method, endpoint, e);
                if e.is_timeout() {
                    return Err(CoreError::RedditApi(RedditApiError::RequestTimeout));
                }
                return Err(CoreError::Network(e));
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!("Request successful: {} {}", status, endpoint);
            return Ok(response);
        }

        error!("Request failed with status: {} for {}", status, endpoint);
        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.parse::<u64>().ok())
                    .unwrap_or(60);
                warn!("Rate limited, retry after {} seconds", retry_after);
                Err(CoreError::RedditApi(RedditApiError::RateLimitExceeded {
                    retry_after,
                }))
            }
            401 => Err(CoreError::RedditApi(RedditApiError::InvalidToken)),
            403 => Err(CoreError::RedditApi(RedditApiError::Forbidden {
                resource: endpoint.to_string(),
            })),
            404 => Err(CoreError::NotFound {
                resource: endpoint.to_string(),
            }),
            code if status.is_server_error() => {
                Err(CoreError::RedditApi(RedditApiError::ServerError {
                    status_code: code,
                }))
            }
            code => Err(CoreError::RequestFailed {
                message: format!("{} {}", method, endpoint),
                status_code: Some(code),
            }),
        }
    }

    /// Searches posts newest-first, optionally restricted to one subreddit.
    pub async fn search_posts(
        &self,
        query: &str,
        subreddit: Option<&str>,
        limit: usize,
    ) -> Result<Vec<RawPost>, CoreError> {
        let endpoint = search_endpoint(subreddit);
        let limit_str = limit.clamp(1, MAX_PAGE_SIZE).to_string();

        let mut params = vec![
            ("q", query),
            ("sort", "new"),
            ("limit", limit_str.as_str()),
            ("type", "link"),
            ("raw_json", "1"),
        ];
        if subreddit.is_some() {
            params.push(("restrict_sr", "on"));
        }

        let response = self
            .make_request(Method::GET, &endpoint, Some(params.as_slice()))
            .await
            .map_err(|e| match (e, subreddit) {
                (CoreError::NotFound { .. }, Some(name)) => {
                    CoreError::RedditApi(RedditApiError::SubredditNotFound {
                        subreddit: name.to_string(),
                    })
                }
                (other, _) => other,
            })?;

        let listing: RedditListing<RedditPostData> = response.json().await.map_err(|e| {
            error!("Failed to parse search results: {}", e);
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Failed to parse search results for '{}'", query),
            })
        })?;

        let posts = listing_into_posts(listing, limit);
        info!("Retrieved {} posts for '{}'", posts.len(), query);
        Ok(posts)
    }
}

fn search_endpoint(subreddit: Option<&str>) -> String {
    match subreddit {
        Some(name) => format!("/r/{}/search", name),
        None => "/search".to_string(),
    }
}

/// Flattens a listing into raw posts, newest-first and at most `limit` long.
pub fn listing_into_posts(listing: RedditListing<RedditPostData>, limit: usize) -> Vec<RawPost> {
    let mut posts: Vec<RawPost> = listing
        .data
        .children
        .into_iter()
        .map(|child| RawPost::from(child.data))
        .collect();
    posts.sort_by(|a, b| b.created_utc.cmp(&a.created_utc));
    posts.truncate(limit);
    posts
}

impl From<RedditPostData> for RawPost {
    fn from(post_data: RedditPostData) -> Self {
        // Link posts carry the external target in `url`; the discussion page
        // is always the permalink.
        let permalink = if post_data.permalink.is_empty() {
            post_data.url
        } else {
            post_data.permalink
        };

        Self {
            id: post_data.id,
            title: post_data.title,
            selftext: post_data.selftext,
            author: post_data.author,
            subreddit: post_data.subreddit,
            score: post_data.score,
            num_comments: post_data.num_comments,
            created_utc: post_data.created_utc as i64,
            permalink,
            is_self: post_data.is_self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post_data(id: &str, created_utc: f64) -> RedditPostData {
        RedditPostData {
            id: id.to_string(),
            title: "Test Post".to_string(),
            selftext: "This is test content".to_string(),
            author: "test_user".to_string(),
            subreddit: "test".to_string(),
            permalink: format!("/r/test/comments/{}/test_post/", id),
            url: "https://example.com/article".to_string(),
            created_utc,
            score: 42,
            num_comments: 5,
            is_self: true,
        }
    }

    #[test]
    fn test_api_client_creation() {
        let client = RedditApiClient::new("test-user-agent/1.0".to_string(), None).unwrap();
        assert_eq!(client.user_agent(), "test-user-agent/1.0");
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_reddit_post_conversion() {
        let reddit_post: RawPost = sample_post_data("test123", 1640995200.0).into();
        assert_eq!(reddit_post.id, "test123");
        assert_eq!(reddit_post.title, "Test Post");
        assert_eq!(reddit_post.selftext, "This is test content");
        assert_eq!(reddit_post.created_utc, 1640995200);
        assert_eq!(reddit_post.permalink, "/r/test/comments/test123/test_post/");
    }

    #[test]
    fn test_conversion_falls_back_to_url_without_permalink() {
        let mut data = sample_post_data("nolink", 1.0);
        data.permalink = String::new();
        let post: RawPost = data.into();
        assert_eq!(post.permalink, "https://example.com/article");
    }

    #[test]
    fn test_listing_parsing_sorts_and_truncates() {
        let body = serde_json::json!({
            "kind": "Listing",
            "data": {
                "after": null,
                "before": null,
                "dist": 3,
                "children": [
                    {"kind": "t3", "data": {"id": "old", "title": "a", "created_utc": 100.0, "author": "[deleted]"}},
                    {"kind": "t3", "data": {"id": "new", "title": "b", "created_utc": 300.0}},
                    {"kind": "t3", "data": {"id": "mid", "title": "c", "created_utc": 200.0}}
                ]
            }
        });
        let listing: RedditListing<RedditPostData> = serde_json::from_value(body).unwrap();
        let posts = listing_into_posts(listing, 2);

        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid"]);
    }

    #[test]
    fn test_search_endpoint() {
        assert_eq!(search_endpoint(Some("rust")), "/r/rust/search");
        assert_eq!(search_endpoint(None), "/search");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Nothing listens on the discard port, so the connect fails fast.
        let client = RedditApiClient::new("test-user-agent/1.0".to_string(), None)
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        let result = client.search_posts("python", None, 10).await;
        assert!(matches!(result, Err(CoreError::Network(_))));
    }
}
