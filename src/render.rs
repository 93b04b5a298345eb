use gummy_core::{ClassifiedPost, LinkSummary, Sentiment};
use research_pipeline::ResultSet;
use std::fmt::Write;

pub const NO_RESULTS: &str = "No results found.";

pub fn results(results: &ResultSet) -> String {
    let mut out = String::new();
    let tally = results.sentiment_tally();

    let _ = writeln!(out, "Found {} posts", results.len());
    let _ = writeln!(
        out,
        "{}",
        Sentiment::ALL
            .iter()
            .map(|sentiment| format!("{}: {}", sentiment, tally.get(*sentiment)))
            .collect::<Vec<_>>()
            .join("  ")
    );
    if let Some(notice) = results.notice() {
        let _ = writeln!(out, "\n{}", notice);
    }

    for (index, post) in results.shown().iter().enumerate() {
        out.push('\n');
        out.push_str(&card(index + 1, post));
    }
    out
}

fn card(position: usize, classified: &ClassifiedPost) -> String {
    let post = &classified.post;
    let classification = &classified.classification;
    let mut out = String::new();

    let _ = writeln!(out, "[{}] {}", position, post.title);
    let _ = writeln!(
        out,
        "    r/{} | u/{} | {} points | {} comments | {}",
        post.subreddit, post.author, post.score, post.num_comments, post.created_date
    );
    if !post.selftext.is_empty() {
        for line in post.selftext.lines().filter(|line| !line.trim().is_empty()) {
            let _ = writeln!(out, "    {}", line.trim());
        }
    }
    let _ = writeln!(out, "    {}", post.url);
    let _ = writeln!(
        out,
        "    Category: {} | Sentiment: {}",
        classification.category, classification.sentiment
    );
    let _ = writeln!(out, "    Topics: {}", classification.topics_display());
    let _ = writeln!(out, "    Insights: {}", classification.insights_display());
    out
}

pub fn summary(summary: &LinkSummary) -> String {
    let metadata = &summary.metadata;
    let mut out = String::new();

    let _ = writeln!(out, "{}", summary.title);
    let _ = writeln!(
        out,
        "{} | {} min read | {} words | {}",
        metadata.domain, metadata.estimated_reading_time, metadata.word_count, metadata.language
    );
    let _ = writeln!(out, "\n{}\n", summary.summary);
    let _ = writeln!(out, "Topics: {}", summary.main_topics.join(", "));
    let _ = writeln!(out, "{}", metadata.url);
    out
}

pub fn history(entries: &[String]) -> String {
    if entries.is_empty() {
        return "No history yet.\n".to_string();
    }
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| format!("{}. {}\n", index + 1, entry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gummy_core::{Category, Classification, ClassificationSource, FormattedPost, LinkMetadata};

    fn classified() -> ClassifiedPost {
        ClassifiedPost {
            post: FormattedPost {
                id: "abc".to_string(),
                title: "How do I pin a future?".to_string(),
                selftext: "First line\n\nSecond line".to_string(),
                author: "ferris".to_string(),
                subreddit: "rust".to_string(),
                score: 12,
                num_comments: 4,
                created_date: "2025-03-01 08:30:00".to_string(),
                url: "https://www.reddit.com/r/rust/comments/abc/".to_string(),
                is_self: true,
            },
            classification: Classification {
                category: Category::Question,
                sentiment: Sentiment::Neutral,
                topics: vec!["Programming".to_string(), "Education".to_string()],
                insights: vec!["Seeking help.".to_string(), "Beginner.".to_string()],
                source: ClassificationSource::Rules,
            },
        }
    }

    #[test]
    fn test_results_render_tally_notice_and_cards() {
        let set = ResultSet::reverted(vec![classified()]);
        let rendered = results(&set);

        assert!(rendered.starts_with("Found 1 posts"));
        assert!(rendered.contains("Neutral: 1"));
        assert!(rendered.contains("Showing all 1 original results"));
        assert!(rendered.contains("[1] How do I pin a future?"));
        assert!(rendered.contains("    Second line"));
        assert!(rendered.contains("Topics: Programming, Education"));
        assert!(rendered.contains("Insights: Seeking help.; Beginner."));
    }

    #[test]
    fn test_summary_card() {
        let rendered = summary(&LinkSummary {
            title: "GitHub repository: tokio".to_string(),
            summary: "Async runtime.".to_string(),
            main_topics: vec!["Tools".to_string(), "APIs".to_string()],
            metadata: LinkMetadata {
                domain: "github.com".to_string(),
                url: "https://github.com/tokio-rs/tokio".to_string(),
                estimated_reading_time: 4,
                language: "pt-BR".to_string(),
                word_count: 900,
            },
        });
        assert!(rendered.contains("github.com | 4 min read | 900 words | pt-BR"));
        assert!(rendered.contains("Topics: Tools, APIs"));
    }

    #[test]
    fn test_history() {
        assert_eq!(history(&[]), "No history yet.\n");
        assert_eq!(
            history(&["python".to_string(), "rust".to_string()]),
            "1. python\n2. rust\n"
        );
    }
}
