use crate::filter::{filter, FilterOptions, FilterOutcome};
use crate::result_set::ResultSet;
use chrono::{Local, NaiveDateTime};
use gummy_core::{Classifier, CoreError, PostSource};
use reddit_client::format_posts;
use tracing::info;

pub const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub community: Option<String>,
    pub limit: usize,
    pub filters: FilterOptions,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            community: None,
            limit: DEFAULT_LIMIT,
            filters: FilterOptions::default(),
        }
    }

    pub fn with_community(mut self, community: impl Into<String>) -> Self {
        let community = community.into();
        let community = community.trim().trim_start_matches("r/").to_string();
        self.community = (!community.is_empty()).then_some(community);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_max_age_days(mut self, days: u32) -> Self {
        self.filters.max_age_days = Some(days);
        self
    }

    pub fn text_only(mut self) -> Self {
        self.filters.require_nonempty_body = true;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.filters.category = Some(category.into());
        self
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.query.trim().is_empty() {
            return Err(CoreError::invalid_input("search query must not be empty"));
        }
        if self.limit == 0 {
            return Err(CoreError::invalid_input("result limit must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    NoResults,
    Results(ResultSet),
}

/// Fetch, format, classify and filter, in that order.
pub struct SearchOrchestrator<S, C> {
    source: S,
    classifier: C,
}

impl<S: PostSource, C: Classifier> SearchOrchestrator<S, C> {
    pub fn new(source: S, classifier: C) -> Self {
        Self { source, classifier }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, CoreError> {
        self.search_at(request, Local::now().naive_local()).await
    }

    /// Runs a search with the date filter evaluated against `now`.
    pub async fn search_at(
        &self,
        request: &SearchRequest,
        now: NaiveDateTime,
    ) -> Result<SearchOutcome, CoreError> {
        request.validate()?;
        let query = request.query.trim();

        info!(
            "Searching posts about '{}'{}",
            query,
            request
                .community
                .as_deref()
                .map(|c| format!(" in r/{}", c))
                .unwrap_or_default()
        );
        let raw = self
            .source
            .fetch(query, request.community.as_deref(), request.limit)
            .await;
        if raw.is_empty() {
            info!("No posts found for '{}'", query);
            return Ok(SearchOutcome::NoResults);
        }

        let formatted = format_posts(&raw);
        info!("Classifying {} posts", formatted.len());
        let original = self.classifier.classify_all(formatted).await;

        let outcome = match filter(&original, &request.filters, now) {
            FilterOutcome::NoResults => SearchOutcome::NoResults,
            FilterOutcome::Reverted { original_count } => {
                info!(
                    "Filters removed every post, showing all {} original results",
                    original_count
                );
                SearchOutcome::Results(ResultSet::reverted(original))
            }
            FilterOutcome::Kept {
                posts,
                filters_applied,
            } => {
                info!("Showing {} of {} posts", posts.len(), original.len());
                SearchOutcome::Results(ResultSet::filtered(original, posts, filters_applied))
            }
        };
        Ok(outcome)
    }
}
