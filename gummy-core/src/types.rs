use serde::{Deserialize, Serialize};
use std::fmt;

/// Author handle Reddit reports for removed accounts.
pub const DELETED_AUTHOR: &str = "[deleted]";

/// Rendering of [`FormattedPost::created_date`].
pub const CREATED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A post as the source produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPost {
    pub id: String,
    pub title: String,
    pub selftext: String,
    pub author: String,
    pub subreddit: String,
    pub score: i64,
    pub num_comments: u64,
    pub created_utc: i64,
    /// Absolute link or a community-relative permalink such as `/r/rust/comments/abc/...`.
    pub permalink: String,
    pub is_self: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedPost {
    pub id: String,
    pub title: String,
    pub selftext: String,
    pub author: String,
    pub subreddit: String,
    pub score: i64,
    pub num_comments: u64,
    /// Local time, `%Y-%m-%d %H:%M:%S`. Empty when the timestamp could not be rendered.
    pub created_date: String,
    pub url: String,
    pub is_self: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Question,
    Discussion,
    #[serde(rename = "Help Request")]
    HelpRequest,
    Tutorial,
    Share,
    News,
    Opinion,
    Vent,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Question,
        Category::Discussion,
        Category::HelpRequest,
        Category::Tutorial,
        Category::Share,
        Category::News,
        Category::Opinion,
        Category::Vent,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Question => "Question",
            Category::Discussion => "Discussion",
            Category::HelpRequest => "Help Request",
            Category::Tutorial => "Tutorial",
            Category::Share => "Share",
            Category::News => "News",
            Category::Opinion => "Opinion",
            Category::Vent => "Vent",
        }
    }

    /// Case-insensitive lookup that also accepts the Portuguese labels models
    /// tend to answer with when prompted with the Portuguese field names.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        let category = match normalized.as_str() {
            "question" | "pergunta" => Category::Question,
            "discussion" | "discussão" | "discussao" => Category::Discussion,
            "help request" | "pedido de ajuda" => Category::HelpRequest,
            "tutorial" => Category::Tutorial,
            "share" | "compartilhamento" => Category::Share,
            "news" | "notícia" | "noticia" => Category::News,
            "opinion" | "opinião" | "opiniao" => Category::Opinion,
            "vent" | "desabafo" => Category::Vent,
            _ => return None,
        };
        Some(category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Mixed,
}

impl Sentiment {
    pub const ALL: [Sentiment; 4] = [
        Sentiment::Positive,
        Sentiment::Neutral,
        Sentiment::Negative,
        Sentiment::Mixed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
            Sentiment::Mixed => "Mixed",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        let sentiment = match normalized.as_str() {
            "positive" | "positivo" => Sentiment::Positive,
            "neutral" | "neutro" => Sentiment::Neutral,
            "negative" | "negativo" => Sentiment::Negative,
            "mixed" | "misto" => Sentiment::Mixed,
            _ => return None,
        };
        Some(sentiment)
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which path produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    Model,
    Rules,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub sentiment: Sentiment,
    pub topics: Vec<String>,
    pub insights: Vec<String>,
    pub source: ClassificationSource,
}

impl Classification {
    pub fn topics_display(&self) -> String {
        self.topics.join(", ")
    }

    pub fn insights_display(&self) -> String {
        self.insights.join("; ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedPost {
    #[serde(flatten)]
    pub post: FormattedPost,
    #[serde(flatten)]
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkMetadata {
    pub domain: String,
    pub url: String,
    pub estimated_reading_time: u32,
    pub language: String,
    pub word_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSummary {
    pub title: String,
    pub summary: String,
    pub main_topics: Vec<String>,
    pub metadata: LinkMetadata,
}
