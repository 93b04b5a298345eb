//! Keyword classifier used when no model answer is available.
//!
//! Single words match whole tokens; entries containing a space match as
//! substrings of the lowercased text.

use crate::response::MAX_INSIGHTS;
use gummy_core::{Category, Classification, ClassificationSource, Sentiment};
use std::collections::HashSet;

pub const GENERAL_TOPIC: &str = "General Discussion";

/// Title keywords, checked in order; the first hit decides.
const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (Category::Question, &["how", "doubt"]),
    (Category::HelpRequest, &["help", "problem"]),
    (Category::Tutorial, &["tutorial", "guide"]),
    (Category::News, &["news", "launch", "announcement"]),
    (Category::Opinion, &["opinion", "i think"]),
    (Category::Share, &["sharing", "i built"]),
    (Category::Vent, &["vent", "frustrated"]),
];

const POSITIVE_WORDS: &[&str] = &["great", "excellent", "good", "like", "happy", "success"];
const NEGATIVE_WORDS: &[&str] = &["bad", "terrible", "problem", "difficult", "frustrated", "sad"];
const CONTRAST_WORDS: &[&str] = &["but", "however", "though", "nevertheless"];

const TOPIC_RULES: &[(&str, &[&str])] = &[
    ("Programming", &["code", "programming", "program", "function", "algorithm"]),
    ("Technology", &["technology", "tech", "innovation", "gadget", "device"]),
    ("Career", &["career", "job", "jobs", "work", "hiring", "interview", "cv", "resume"]),
    ("Education", &["learn", "learning", "course", "study", "college", "university", "bootcamp"]),
    ("Web Development", &["web", "site", "frontend", "backend", "html", "css", "javascript"]),
    ("Data Science", &["data", "analysis", "statistics", "pandas", "visualization"]),
    ("Artificial Intelligence", &["ai", "machine learning", "ml", "model", "gpt", "neural"]),
    ("Productivity", &["productivity", "efficiency", "organization", "time", "habit"]),
    ("Business", &["business", "company", "startup", "entrepreneur", "market", "customer"]),
    ("Marketing", &["marketing", "advertising", "promotion", "audience", "customer", "seo"]),
    ("Design", &["design", "ui", "ux", "interface", "user", "experience", "visual"]),
    ("Mobile", &["mobile", "app", "application", "android", "ios", "phone", "smartphone"]),
];

const INSIGHT_SEEKING_HELP: &str = "The user is looking for information or assistance.";
const INSIGHT_NEGATIVE: &str = "The tone of the post suggests frustration or difficulty with the subject.";
const INSIGHT_POSITIVE: &str = "The user shows enthusiasm or satisfaction with the subject.";
const INSIGHT_SOFTWARE: &str = "This post is related to software development.";
const INSIGHT_CAREER: &str = "The user may be changing careers or seeking professional growth.";
const INSIGHT_GENERIC: &str = "This post seems relevant to the technology community.";

/// Lowercased text plus its word tokens.
struct Text {
    lowered: String,
    tokens: HashSet<String>,
}

impl Text {
    fn new(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let tokens = lowered
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();
        Self { lowered, tokens }
    }

    fn has(&self, keyword: &str) -> bool {
        if keyword.contains(' ') {
            self.lowered.contains(keyword)
        } else {
            self.tokens.contains(keyword)
        }
    }

    fn has_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|keyword| self.has(keyword))
    }
}

/// Classifies from keywords alone. Always yields a category, a sentiment, at
/// least one topic and between one and three insights.
pub fn classify(title: &str, body: &str) -> Classification {
    let title_text = Text::new(title);
    let body_text = Text::new(body);
    let combined = Text::new(&format!("{}\n{}", title, body));

    let category = categorize(title, &title_text);
    let sentiment = assess_sentiment(&body_text);
    let topics = detect_topics(&combined);
    let insights = derive_insights(category, sentiment, &topics);

    Classification {
        category,
        sentiment,
        topics,
        insights,
        source: ClassificationSource::Rules,
    }
}

fn categorize(raw_title: &str, title: &Text) -> Category {
    if raw_title.contains('?') {
        return Category::Question;
    }
    CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| title.has_any(keywords))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Discussion)
}

fn assess_sentiment(body: &Text) -> Sentiment {
    let positive = body.has_any(POSITIVE_WORDS);
    let negative = body.has_any(NEGATIVE_WORDS);

    // Mixed needs a contrast word on top of both polarities. It must be checked
    // before Positive, which would otherwise claim every mixed body.
    if positive && negative && body.has_any(CONTRAST_WORDS) {
        Sentiment::Mixed
    } else if positive {
        Sentiment::Positive
    } else if negative {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

fn detect_topics(text: &Text) -> Vec<String> {
    let topics: Vec<String> = TOPIC_RULES
        .iter()
        .filter(|(_, keywords)| text.has_any(keywords))
        .map(|(topic, _)| topic.to_string())
        .collect();

    if topics.is_empty() {
        vec![GENERAL_TOPIC.to_string()]
    } else {
        topics
    }
}

fn derive_insights(category: Category, sentiment: Sentiment, topics: &[String]) -> Vec<String> {
    let has_topic = |name: &str| topics.iter().any(|topic| topic == name);
    let mut insights = Vec::new();

    if matches!(category, Category::Question | Category::HelpRequest) {
        insights.push(INSIGHT_SEEKING_HELP);
    }
    match sentiment {
        Sentiment::Negative => insights.push(INSIGHT_NEGATIVE),
        Sentiment::Positive => insights.push(INSIGHT_POSITIVE),
        Sentiment::Neutral | Sentiment::Mixed => {}
    }
    if has_topic("Programming") || has_topic("Web Development") {
        insights.push(INSIGHT_SOFTWARE);
    }
    if has_topic("Career") {
        insights.push(INSIGHT_CAREER);
    }
    if insights.len() < 2 {
        insights.push(INSIGHT_GENERIC);
    }

    insights
        .into_iter()
        .take(MAX_INSIGHTS)
        .map(str::to_string)
        .collect()
}
