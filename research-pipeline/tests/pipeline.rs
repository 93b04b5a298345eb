use chrono::Utc;
use gummy_core::{
    Category, Classification, ClassificationSource, Classifier, CoreError, LlmError, PostSource,
    RateLimitConfig, RawPost,
};
use link_summarizer::{LinkSummarizer, SimulatedSummarizer, SummarizerBackend};
use llm_interface::{rules, LlmProvider, PostClassifier};
use reddit_client::{RedditSource, SyntheticCorpus};
use research_pipeline::{
    Dashboard, Notice, SearchOrchestrator, SearchOutcome, SearchRequest,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

const DAY: i64 = 86_400;

/// Serves a fixed list of posts and counts fetches.
struct FixedSource {
    posts: Vec<RawPost>,
    fetches: AtomicUsize,
}

impl FixedSource {
    fn new(posts: Vec<RawPost>) -> Self {
        Self {
            posts,
            fetches: AtomicUsize::new(0),
        }
    }
}

impl PostSource for FixedSource {
    async fn fetch(&self, _query: &str, _community: Option<&str>, limit: usize) -> Vec<RawPost> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.posts.iter().take(limit).cloned().collect()
    }
}

/// Keyword rules plus a call counter.
#[derive(Default)]
struct CountingClassifier {
    calls: AtomicUsize,
}

impl Classifier for CountingClassifier {
    async fn classify(&self, title: &str, body: &str) -> Classification {
        self.calls.fetch_add(1, Ordering::SeqCst);
        rules::classify(title, body)
    }
}

struct BrokenModel;

impl LlmProvider for BrokenModel {
    fn name(&self) -> &str {
        "broken"
    }

    async fn classify_post(&self, _title: &str, _body: &str) -> Result<Classification, CoreError> {
        Err(CoreError::Llm(LlmError::ServiceUnavailable {
            provider: "broken".to_string(),
        }))
    }
}

fn synthetic_source() -> RedditSource {
    RedditSource::simulated(
        SyntheticCorpus::generate(2024, Utc::now().timestamp()),
        RateLimitConfig::disabled(),
    )
}

fn raw_post(id: &str, title: &str, body: &str, age_days: i64) -> RawPost {
    RawPost {
        id: id.to_string(),
        title: title.to_string(),
        selftext: body.to_string(),
        author: "tester".to_string(),
        subreddit: "rust".to_string(),
        score: 10,
        num_comments: 3,
        created_utc: Utc::now().timestamp() - age_days * DAY - 60,
        permalink: format!("/r/rust/comments/{}/", id),
        is_self: true,
    }
}

fn results(outcome: SearchOutcome) -> research_pipeline::ResultSet {
    match outcome {
        SearchOutcome::Results(results) => results,
        SearchOutcome::NoResults => panic!("expected results"),
    }
}

#[tokio::test]
async fn test_unknown_query_yields_no_results_without_classifying() {
    let orchestrator = SearchOrchestrator::new(synthetic_source(), CountingClassifier::default());

    let outcome = orchestrator
        .search(&SearchRequest::new("zzzznoexist"))
        .await
        .unwrap();

    assert_eq!(outcome, SearchOutcome::NoResults);
    assert_eq!(orchestrator.classifier().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_topic_search_returns_distinct_newest_first() {
    let orchestrator = SearchOrchestrator::new(synthetic_source(), CountingClassifier::default());

    let results = results(
        orchestrator
            .search(&SearchRequest::new("python").with_limit(10))
            .await
            .unwrap(),
    );

    assert_eq!(results.len(), 10);
    let ids: HashSet<&str> = results.shown().iter().map(|p| p.post.id.as_str()).collect();
    assert_eq!(ids.len(), 10);
    assert!(results
        .shown()
        .windows(2)
        .all(|pair| pair[0].post.created_date >= pair[1].post.created_date));
    assert!(results
        .shown()
        .iter()
        .all(|p| p.post.url.starts_with("https://")));
    assert_eq!(orchestrator.classifier().calls.load(Ordering::SeqCst), 10);
}

#[tokio::test]
async fn test_failing_model_still_classifies_every_post() {
    let classifier = PostClassifier::remote(BrokenModel, RateLimitConfig::disabled());
    let orchestrator = SearchOrchestrator::new(synthetic_source(), classifier);

    let results = results(
        orchestrator
            .search(&SearchRequest::new("javascript").with_limit(8))
            .await
            .unwrap(),
    );

    assert_eq!(results.len(), 8);
    for post in results.shown() {
        assert!(!post.classification.topics.is_empty());
        assert!(!post.classification.insights.is_empty());
        assert_eq!(post.classification.source, ClassificationSource::Rules);
    }
}

#[tokio::test]
async fn test_date_filter_on_old_posts_reverts_to_all() {
    let posts = (0..10)
        .map(|i| raw_post(&format!("old{}", i), "Weekly thread", "Long enough body text", 30 + i))
        .collect();
    let orchestrator = SearchOrchestrator::new(FixedSource::new(posts), CountingClassifier::default());

    let results = results(
        orchestrator
            .search(&SearchRequest::new("rust").with_max_age_days(7))
            .await
            .unwrap(),
    );

    assert_eq!(results.len(), 10);
    assert_eq!(
        results.notice(),
        Some(&Notice::FiltersReverted { original_count: 10 })
    );
}

#[tokio::test]
async fn test_category_filter_matches_case_insensitively() {
    let posts = vec![
        raw_post("t1", "A tutorial on pinning", "Step by step walkthrough", 1),
        raw_post("q1", "Is async worth it?", "Asking for a friend", 1),
        raw_post("t2", "Guide to error handling", "With thiserror and anyhow", 2),
    ];
    let orchestrator = SearchOrchestrator::new(FixedSource::new(posts), CountingClassifier::default());

    let mut results = results(
        orchestrator
            .search(&SearchRequest::new("rust").with_category("tutorial"))
            .await
            .unwrap(),
    );

    let shown: Vec<&str> = results.shown().iter().map(|p| p.post.id.as_str()).collect();
    assert_eq!(shown, vec!["t1", "t2"]);
    assert!(results
        .shown()
        .iter()
        .all(|p| p.classification.category == Category::Tutorial));
    assert!(results.notice().is_none());

    let original: HashSet<&str> = results.original().iter().map(|p| p.post.id.as_str()).collect();
    assert!(shown.iter().all(|id| original.contains(id)));

    results.show_all();
    assert_eq!(results.len(), 3);
}

#[tokio::test]
async fn test_text_only_with_community_scope() {
    let posts = vec![
        raw_post("long", "Weekly thread", "This body is clearly long enough", 1),
        raw_post("empty", "Link post", "", 1),
    ];
    let orchestrator = SearchOrchestrator::new(FixedSource::new(posts), CountingClassifier::default());

    let request = SearchRequest::new("rust").with_community("r/rust").text_only();
    assert_eq!(request.community.as_deref(), Some("rust"));

    let results = results(orchestrator.search(&request).await.unwrap());
    assert_eq!(results.len(), 1);
    assert!(results.filters_applied());
}

#[tokio::test]
async fn test_empty_query_is_rejected_before_fetching() {
    let orchestrator = SearchOrchestrator::new(FixedSource::new(Vec::new()), CountingClassifier::default());

    let result = orchestrator.search(&SearchRequest::new("   ")).await;

    assert!(matches!(result, Err(CoreError::InvalidInput { .. })));
    assert_eq!(orchestrator.source().fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_dashboard_session_flow() {
    let orchestrator = SearchOrchestrator::new(synthetic_source(), CountingClassifier::default());
    let summarizer = LinkSummarizer::new(
        SummarizerBackend::Simulated,
        SimulatedSummarizer::new("pt-BR"),
        RateLimitConfig::disabled(),
    );
    let mut dashboard = Dashboard::new(orchestrator, summarizer);

    let found = dashboard
        .search(&SearchRequest::new("ai").with_limit(5).with_category("Vent"))
        .await
        .unwrap()
        .map(|results| results.len());
    assert!(found.is_some());

    assert!(matches!(
        dashboard.analyze_link("not a url").await,
        Err(CoreError::InvalidInput { .. })
    ));
    assert!(dashboard.session().results().is_some());

    let summary = dashboard
        .analyze_link("https://github.com/tokio-rs/tokio")
        .await
        .unwrap();
    assert!(summary.title.starts_with("GitHub repository"));
    assert!(dashboard.session().results().is_none());
    assert!(dashboard.show_all().is_none());

    dashboard.search(&SearchRequest::new("ai")).await.unwrap();
    assert_eq!(
        dashboard.session().history(),
        ["ai", "https://github.com/tokio-rs/tokio"]
    );
    assert!(dashboard.session().summary().is_none());
}
