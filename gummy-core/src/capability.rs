use crate::types::{Classification, ClassifiedPost, FormattedPost, LinkSummary, RawPost};

/// Supplies raw posts for a query.
///
/// Implementations absorb their own failures: an unreachable backend yields an
/// empty list, which callers treat as "no results".
pub trait PostSource {
    async fn fetch(&self, query: &str, community: Option<&str>, limit: usize) -> Vec<RawPost>;
}

/// Attaches category, sentiment, topics and insights to posts.
pub trait Classifier {
    /// Never fails; implementations substitute a local classification when
    /// their remote path is unavailable.
    async fn classify(&self, title: &str, body: &str) -> Classification;

    /// Classifies every post independently and in order.
    async fn classify_all(&self, posts: Vec<FormattedPost>) -> Vec<ClassifiedPost> {
        let mut classified = Vec::with_capacity(posts.len());
        for post in posts {
            let classification = self.classify(&post.title, &post.selftext).await;
            classified.push(ClassifiedPost {
                post,
                classification,
            });
        }
        classified
    }
}

/// Produces a summary card for an arbitrary web link.
pub trait Summarizer {
    /// Never fails; a simulated summary stands in when the service is
    /// unavailable.
    async fn summarize(&self, url: &str) -> LinkSummary;
}
