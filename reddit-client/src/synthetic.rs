//! Deterministic stand-in dataset used when Reddit is not configured.
//!
//! The corpus is generated once from a seed, keyed by topic term, and written
//! to a JSON store so later runs reuse the same posts.

use gummy_core::{CoreError, RawPost};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

pub const SEED_TOPICS: &[&str] = &[
    "python",
    "javascript",
    "programming",
    "webdev",
    "machinelearning",
    "datascience",
    "ai",
    "productivity",
    "business",
    "startup",
    "marketing",
    "seo",
    "socialmedia",
    "design",
    "ux",
    "ui",
    "mobile",
    "android",
    "ios",
    "gaming",
    "technology",
    "crypto",
    "finance",
    "investing",
    "personalfinance",
    "career",
    "jobs",
];

pub const SUBREDDITS: &[&str] = &[
    "programming",
    "learnprogramming",
    "python",
    "javascript",
    "webdev",
    "datascience",
    "machinelearning",
    "artificial",
    "productivity",
    "technology",
    "futurology",
    "startups",
    "entrepreneur",
    "business",
    "marketing",
    "seo",
    "socialmedia",
    "web_design",
    "userexperience",
    "androiddev",
    "iOSProgramming",
    "gamedev",
    "cscareerquestions",
    "personalfinance",
    "investing",
    "cryptocurrency",
    "wallstreetbets",
];

const AUTHORS: &[&str] = &[
    "tech_enthusiast",
    "code_master",
    "data_wizard",
    "web_guru",
    "ai_researcher",
    "startup_founder",
    "marketing_pro",
    "design_ninja",
    "mobile_dev",
    "game_creator",
    "crypto_expert",
    "finance_advisor",
    "career_coach",
    "productivity_hacker",
    "future_thinker",
];

const TITLE_TEMPLATES: &[&str] = &[
    "Question about {topic}: how do I solve this problem?",
    "Need help with {topic} for a project",
    "Anyone have experience with {topic}?",
    "Best way to learn {topic} in 2025?",
    "Recommended resources for {topic}",
    "How {topic} changed my career",
    "Common problems with {topic} and how to fix them",
    "What's new in {topic} that you should know",
    "Why is {topic} important for the future?",
    "Comparing different approaches to {topic}",
];

const BODY_TEMPLATES: &[&str] = &[
    "I've been working with {topic} for a few weeks and hit a problem I can't solve. Can anyone help?",
    "I'm a beginner in {topic} and would like to know where to start. Which resources do you recommend?",
    "I have a project that involves {topic} and I need advice on best practices.",
    "What are the current trends in {topic}? What should I learn to stay up to date?",
    "Sharing my experience with {topic} after 6 months of study and practice. Here are the lessons I learned...",
    "I'm comparing different tools and frameworks for {topic}. Which do you recommend and why?",
    "How is {topic} evolving in 2025? What are the predictions for the future of this field?",
    "Which complementary skills should I learn alongside {topic} to improve my chances on the job market?",
    "I'm facing a specific challenge with {topic}: [detailed description of the problem]. Any suggestions?",
    "I built a project using {topic} and would like to share it with the community. Feedback is welcome!",
];

const BODY_ADDITIONS: &[&str] = &[
    "\n\nI've tried several approaches, including [technical details related to {topic}], but I'm still struggling.",
    "\n\nMy background: I have experience with [related technologies], but {topic} is new to me.",
    "\n\nWhat I've tried so far: [list of attempts]. None of them fully worked.",
    "\n\nEnd goal: [description of the project or goal related to {topic}].",
    "\n\nI'd really appreciate any help or pointers from the community!",
    "\n\nEdit: Thanks for the answers so far! I'm trying to implement the suggestions.",
    "\n\nUpdate: I managed to solve part of the problem using [partial solution].",
    "\n\nPS: If anyone has additional resources about {topic}, please share.",
];

const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SECONDS_PER_DAY: i64 = 86_400;

/// Posts per seed topic, inclusive.
pub const POSTS_PER_TOPIC: (usize, usize) = (30, 50);
pub const MAX_AGE_DAYS: i64 = 90;
pub const SCORE_RANGE: (i64, i64) = (-5, 500);
pub const MAX_COMMENTS: u64 = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyntheticCorpus {
    topics: BTreeMap<String, Vec<RawPost>>,
}

impl SyntheticCorpus {
    /// Generates the corpus from `seed`, dating posts relative to `now_utc`.
    pub fn generate(seed: u64, now_utc: i64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut used_ids = HashSet::new();
        let mut topics = BTreeMap::new();

        for topic in SEED_TOPICS {
            let count = rng.usize(POSTS_PER_TOPIC.0..=POSTS_PER_TOPIC.1);
            let mut posts: Vec<RawPost> = (0..count)
                .map(|_| generate_post(&mut rng, &mut used_ids, topic, now_utc))
                .collect();
            posts.sort_by(|a, b| b.created_utc.cmp(&a.created_utc));
            topics.insert(topic.to_string(), posts);
        }

        debug!(
            "Generated synthetic corpus with {} topics from seed {}",
            topics.len(),
            seed
        );
        Self { topics }
    }

    /// Reuses the store at `path` when it exists; otherwise generates the
    /// corpus and writes it once. A store that cannot be written only costs
    /// persistence, the in-memory corpus is still returned.
    pub fn load_or_generate(path: &Path, seed: u64) -> Self {
        if path.exists() {
            match Self::load(path) {
                Ok(corpus) => {
                    info!(
                        "Loaded synthetic corpus ({} posts) from {}",
                        corpus.len(),
                        path.display()
                    );
                    return corpus;
                }
                Err(e) => {
                    warn!(
                        "Synthetic corpus at {} is unreadable ({}), regenerating in memory",
                        path.display(),
                        e
                    );
                    return Self::generate(seed, chrono::Utc::now().timestamp());
                }
            }
        }

        let corpus = Self::generate(seed, chrono::Utc::now().timestamp());
        match corpus.persist(path) {
            Ok(()) => info!("Wrote synthetic corpus to {}", path.display()),
            Err(e) => warn!(
                "Could not write synthetic corpus to {}: {}",
                path.display(),
                e
            ),
        }
        corpus
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn persist(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }

    pub fn posts_for(&self, topic: &str) -> Option<&[RawPost]> {
        self.topics.get(topic).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.topics.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exact topic match first; otherwise every topic whose key contains the
    /// query contributes all its posts and the rest contribute posts whose
    /// title or body contains it. Results are community-filtered, sorted
    /// newest-first and truncated to `limit`.
    pub fn search(&self, query: &str, community: Option<&str>, limit: usize) -> Vec<RawPost> {
        let needle = query.trim().to_lowercase();

        let mut matches: Vec<&RawPost> = match self.topics.get(&needle) {
            Some(posts) => posts.iter().collect(),
            None => {
                let mut seen = HashSet::new();
                let mut found = Vec::new();
                for (topic, posts) in &self.topics {
                    let topic_matches = topic.contains(&needle);
                    for post in posts {
                        let post_matches = topic_matches
                            || post.title.to_lowercase().contains(&needle)
                            || post.selftext.to_lowercase().contains(&needle);
                        if post_matches && seen.insert(post.id.as_str()) {
                            found.push(post);
                        }
                    }
                }
                found
            }
        };

        if let Some(community) = community {
            matches.retain(|post| post.subreddit.eq_ignore_ascii_case(community));
        }

        matches.sort_by(|a, b| b.created_utc.cmp(&a.created_utc));
        matches.into_iter().take(limit).cloned().collect()
    }
}

fn generate_post(
    rng: &mut fastrand::Rng,
    used_ids: &mut HashSet<String>,
    topic: &str,
    now_utc: i64,
) -> RawPost {
    let age_seconds = rng.i64(0..=MAX_AGE_DAYS) * SECONDS_PER_DAY
        + rng.i64(0..=23) * 3_600
        + rng.i64(0..=59) * 60;
    let subreddit = pick(rng, SUBREDDITS);
    let title = fill(pick(rng, TITLE_TEMPLATES), topic);

    let mut selftext = fill(pick(rng, BODY_TEMPLATES), topic);
    if rng.f64() < 0.7 {
        selftext.push_str(&fill(pick(rng, BODY_ADDITIONS), topic));
    }

    let id = unique_id(rng, used_ids);
    let permalink = format!(
        "https://www.reddit.com/r/{}/comments/{}/{}/",
        subreddit,
        id,
        slug(&title)
    );

    RawPost {
        id,
        title,
        selftext,
        author: pick(rng, AUTHORS).to_string(),
        subreddit: subreddit.to_string(),
        score: rng.i64(SCORE_RANGE.0..=SCORE_RANGE.1),
        num_comments: rng.u64(0..=MAX_COMMENTS),
        created_utc: now_utc - age_seconds.min(MAX_AGE_DAYS * SECONDS_PER_DAY),
        permalink,
        is_self: rng.f64() < 0.8,
    }
}

fn pick<'a>(rng: &mut fastrand::Rng, options: &[&'a str]) -> &'a str {
    options[rng.usize(..options.len())]
}

fn fill(template: &str, topic: &str) -> String {
    template.replace("{topic}", topic)
}

fn unique_id(rng: &mut fastrand::Rng, used_ids: &mut HashSet<String>) -> String {
    loop {
        let id: String = (0..6)
            .map(|_| ID_ALPHABET[rng.usize(..ID_ALPHABET.len())] as char)
            .collect();
        if used_ids.insert(id.clone()) {
            return id;
        }
    }
}

fn slug(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            c if c.is_ascii_alphanumeric() || c == '_' => Some(c),
            _ => None,
        })
        .take(50)
        .collect()
}
