use crate::{format_posts, RedditSource, SyntheticCorpus};
use gummy_core::{PostSource, RateLimitConfig};
use std::time::{Duration, Instant};

fn source() -> RedditSource {
    RedditSource::simulated(
        SyntheticCorpus::generate(11, 1_750_000_000),
        RateLimitConfig::disabled(),
    )
}

#[tokio::test]
async fn test_fetch_then_format_keeps_order() {
    let raw = source().fetch("javascript", None, 8).await;
    let formatted = format_posts(&raw);

    assert_eq!(formatted.len(), raw.len());
    for (raw, formatted) in raw.iter().zip(&formatted) {
        assert_eq!(raw.id, formatted.id);
        assert!(formatted.url.starts_with("https://www.reddit.com/r/"));
        assert!(!formatted.created_date.is_empty());
    }
}

#[tokio::test]
async fn test_community_restriction() {
    let posts = source().fetch("ai", Some("technology"), 50).await;
    assert!(posts.iter().all(|p| p.subreddit == "technology"));
}

#[tokio::test]
async fn test_courtesy_delay_applies_in_simulated_mode() {
    let source = RedditSource::simulated(
        SyntheticCorpus::generate(11, 1_750_000_000),
        RateLimitConfig::from_millis(40),
    );
    source.fetch("python", None, 1).await;

    let start = Instant::now();
    source.fetch("python", None, 1).await;
    assert!(start.elapsed() >= Duration::from_millis(35));
}

#[test]
fn test_fetch_without_runtime_macro() {
    let posts = tokio_test::block_on(source().fetch("career", None, 3));
    assert_eq!(posts.len(), 3);
}
