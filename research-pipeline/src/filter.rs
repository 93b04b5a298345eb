use chrono::{Duration, NaiveDateTime};
use gummy_core::{ClassifiedPost, CREATED_DATE_FORMAT};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Bodies must be longer than this many characters to count as text.
pub const MIN_BODY_CHARS: usize = 10;

/// Category value that disables the category predicate.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub max_age_days: Option<u32>,
    pub require_nonempty_body: bool,
    pub category: Option<String>,
}

impl FilterOptions {
    fn category_predicate(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES))
    }

    /// True when at least one predicate is enabled.
    pub fn any_enabled(&self) -> bool {
        self.max_age_days.is_some() || self.require_nonempty_body || self.category_predicate().is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// Posts that passed every enabled predicate, in input order.
    Kept {
        posts: Vec<ClassifiedPost>,
        filters_applied: bool,
    },
    /// Filters removed everything; the caller shows the unfiltered set.
    Reverted { original_count: usize },
    /// Nothing to filter in the first place.
    NoResults,
}

/// Applies the enabled predicates conjunctively, relative to `now` (local
/// wall-clock time, matching the rendering of `created_date`).
pub fn filter(posts: &[ClassifiedPost], options: &FilterOptions, now: NaiveDateTime) -> FilterOutcome {
    if posts.is_empty() {
        return FilterOutcome::NoResults;
    }

    let mut kept: Vec<&ClassifiedPost> = posts.iter().collect();

    if let Some(days) = options.max_age_days {
        if posts.iter().all(|post| created_at(post).is_some()) {
            // A window reaching past chrono's range admits every post.
            let cutoff = Duration::try_days(i64::from(days))
                .and_then(|window| now.checked_sub_signed(window));
            if let Some(cutoff) = cutoff {
                kept.retain(|post| created_at(post).is_some_and(|created| created >= cutoff));
            }
        } else {
            warn!("Unparseable creation date in results, skipping date filter");
        }
    }

    if options.require_nonempty_body {
        kept.retain(|post| post.post.selftext.chars().count() > MIN_BODY_CHARS);
    }

    if let Some(category) = options.category_predicate() {
        kept.retain(|post| post.classification.category.label().eq_ignore_ascii_case(category));
    }

    let filters_applied = options.any_enabled();
    debug!(
        "Filter kept {} of {} posts (filters applied: {})",
        kept.len(),
        posts.len(),
        filters_applied
    );

    if kept.is_empty() && filters_applied {
        return FilterOutcome::Reverted {
            original_count: posts.len(),
        };
    }

    FilterOutcome::Kept {
        posts: kept.into_iter().cloned().collect(),
        filters_applied,
    }
}

fn created_at(post: &ClassifiedPost) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&post.post.created_date, CREATED_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gummy_core::{
        Category, Classification, ClassificationSource, FormattedPost, Sentiment,
    };

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2025-06-30 12:00:00", CREATED_DATE_FORMAT).unwrap()
    }

    fn post(id: &str, created_date: &str, body: &str, category: Category) -> ClassifiedPost {
        ClassifiedPost {
            post: FormattedPost {
                id: id.to_string(),
                title: format!("Post {}", id),
                selftext: body.to_string(),
                author: "tester".to_string(),
                subreddit: "rust".to_string(),
                score: 0,
                num_comments: 0,
                created_date: created_date.to_string(),
                url: format!("https://www.reddit.com/r/rust/comments/{}/", id),
                is_self: true,
            },
            classification: Classification {
                category,
                sentiment: Sentiment::Neutral,
                topics: vec!["General Discussion".to_string()],
                insights: vec!["Generic.".to_string()],
                source: ClassificationSource::Rules,
            },
        }
    }

    fn sample() -> Vec<ClassifiedPost> {
        vec![
            post("recent", "2025-06-28 09:00:00", "A long enough body", Category::Tutorial),
            post("old", "2025-05-01 09:00:00", "Another long body here", Category::Question),
            post("short", "2025-06-29 09:00:00", "tiny", Category::Tutorial),
        ]
    }

    fn kept_ids(outcome: &FilterOutcome) -> Vec<String> {
        match outcome {
            FilterOutcome::Kept { posts, .. } => posts.iter().map(|p| p.post.id.clone()).collect(),
            other => panic!("expected kept posts, got {:?}", other),
        }
    }

    #[test]
    fn test_no_options_keeps_everything() {
        let outcome = filter(&sample(), &FilterOptions::default(), now());
        assert_eq!(kept_ids(&outcome), vec!["recent", "old", "short"]);
        assert!(matches!(outcome, FilterOutcome::Kept { filters_applied: false, .. }));
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let options = FilterOptions {
            max_age_days: Some(7),
            require_nonempty_body: true,
            category: None,
        };
        assert_eq!(kept_ids(&filter(&sample(), &options, now())), vec!["recent"]);
    }

    #[test]
    fn test_body_length_boundary() {
        let posts = vec![
            post("ten", "2025-06-28 09:00:00", "0123456789", Category::Share),
            post("eleven", "2025-06-28 09:00:00", "0123456789a", Category::Share),
        ];
        let options = FilterOptions {
            require_nonempty_body: true,
            ..FilterOptions::default()
        };
        assert_eq!(kept_ids(&filter(&posts, &options, now())), vec!["eleven"]);
    }

    #[test]
    fn test_category_is_case_insensitive_and_all_disables() {
        let options = FilterOptions {
            category: Some("tutorial".to_string()),
            ..FilterOptions::default()
        };
        assert_eq!(kept_ids(&filter(&sample(), &options, now())), vec!["recent", "short"]);

        let options = FilterOptions {
            category: Some("ALL".to_string()),
            ..FilterOptions::default()
        };
        let outcome = filter(&sample(), &options, now());
        assert_eq!(kept_ids(&outcome).len(), 3);
        assert!(matches!(outcome, FilterOutcome::Kept { filters_applied: false, .. }));
    }

    #[test]
    fn test_empty_after_filters_reverts() {
        let options = FilterOptions {
            category: Some("Vent".to_string()),
            ..FilterOptions::default()
        };
        assert_eq!(
            filter(&sample(), &options, now()),
            FilterOutcome::Reverted { original_count: 3 }
        );
    }

    #[test]
    fn test_empty_input_is_no_results() {
        let options = FilterOptions {
            max_age_days: Some(7),
            ..FilterOptions::default()
        };
        assert_eq!(filter(&[], &options, now()), FilterOutcome::NoResults);
    }

    #[test]
    fn test_unparseable_date_skips_date_predicate() {
        let mut posts = sample();
        posts.push(post("undated", "", "Body that is long", Category::News));
        let options = FilterOptions {
            max_age_days: Some(7),
            ..FilterOptions::default()
        };

        let outcome = filter(&posts, &options, now());
        assert_eq!(kept_ids(&outcome).len(), 4);
        assert!(matches!(outcome, FilterOutcome::Kept { filters_applied: true, .. }));
    }

    #[test]
    fn test_huge_age_window_keeps_everything() {
        let options = FilterOptions {
            max_age_days: Some(4_000_000_000),
            ..FilterOptions::default()
        };
        let outcome = filter(&sample(), &options, now());
        assert_eq!(kept_ids(&outcome).len(), 3);
        assert!(matches!(outcome, FilterOutcome::Kept { filters_applied: true, .. }));

        let options = FilterOptions {
            max_age_days: Some(u32::MAX),
            ..FilterOptions::default()
        };
        assert_eq!(kept_ids(&filter(&sample(), &options, now())).len(), 3);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let options = FilterOptions {
            max_age_days: Some(30),
            require_nonempty_body: true,
            category: Some("Tutorial".to_string()),
        };
        let once = match filter(&sample(), &options, now()) {
            FilterOutcome::Kept { posts, .. } => posts,
            other => panic!("unexpected {:?}", other),
        };
        let twice = match filter(&once, &options, now()) {
            FilterOutcome::Kept { posts, .. } => posts,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(once, twice);
    }
}
