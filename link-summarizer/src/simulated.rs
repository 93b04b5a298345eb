//! Plausible summaries built from the shape of a URL when the summarizing
//! service is not available. The same URL always produces the same card.

use crate::firecrawl::domain_of;
use gummy_core::{LinkMetadata, LinkSummary};

const PROGRAMMING_SUBREDDITS: &[&str] = &["programming", "python", "webdev", "javascript"];
const TECH_SUBREDDITS: &[&str] = &["technology", "futurology", "gadgets"];
const BUSINESS_SUBREDDITS: &[&str] = &["startups", "entrepreneur", "business"];

const PROGRAMMING_TITLES: &[&str] = &[
    "How to implement sorting algorithms in Python",
    "Best practices for web development in 2025",
    "A complete React guide for beginners",
    "Optimizing SQL queries for better performance",
    "Introduction to mobile development with Flutter",
];

const TECHNOLOGY_TITLES: &[&str] = &[
    "The future of artificial intelligence in 2025",
    "How quantum computing is changing the world",
    "Cybersecurity trends you need to know",
    "The impact of augmented reality on everyday life",
    "Blockchain beyond cryptocurrencies: practical applications",
];

const CURRENT_AFFAIRS_TITLES: &[&str] = &[
    "New technology policies announced by the government",
    "How technology is transforming post-pandemic education",
    "Big tech companies announce an unprecedented collaboration",
    "Environmental impact of the tech industry: new studies",
    "Recent advances in renewable energy and sustainability",
];

const GENERAL_TITLES: &[&str] = &[
    "A complete guide for beginners",
    "Tips and tricks you need to know",
    "Detailed analysis and expert opinions",
    "Comparing the best options in 2025",
    "What you need to know before you start",
];

const REDDIT_PARAGRAPHS: &[&str] = &[
    "This Reddit discussion covers questions about technology and software development. Users share personal experiences and offer advice on best practices and tools.",
    "The original post asks about common challenges developers face, followed by several detailed answers from the community. There is an interesting debate about different approaches and methodologies.",
    "Several users share useful resources, including tutorials, documentation and tools that can help with the problem being discussed. The community seems quite engaged in offering practical solutions.",
    "There is general agreement on certain recommended practices, although some users disagree on specific implementation details. The discussion stays respectful and focused on finding the best solution.",
];

const TECH_PARAGRAPHS: &[&str] = &[
    "This article explores emerging technology trends for 2025 and beyond. The author analyzes how these innovations are transforming traditional industries and creating new business opportunities.",
    "Recent data and statistics show the accelerated growth of the technology sector, with special emphasis on artificial intelligence, cloud computing and mobile technologies.",
    "The text discusses the ethical and social challenges associated with these new technologies, including privacy, data security and the impact on the job market.",
    "Finally, it offers recommendations for professionals and companies that want to stay competitive in this fast-moving landscape, focusing on skill development and adaptability.",
];

const PROGRAMMING_PARAGRAPHS: &[&str] = &[
    "This resource offers a detailed guide to advanced programming techniques, with practical examples and commented code. The content suits beginners and experienced developers alike.",
    "It covers fundamental concepts of software architecture, design patterns and coding practices that can significantly improve code quality and maintainability.",
    "The author shares valuable insights drawn from practical experience, pointing out common pitfalls and techniques for optimizing performance in different scenarios.",
    "A dedicated section covers complementary tools and resources that can boost developer productivity, including libraries, frameworks and integrated development environments.",
];

const NEWS_PARAGRAPHS: &[&str] = &[
    "This story reports recent developments in the technology sector, focusing on announcements from large companies and regulatory changes that may affect the market in the coming months.",
    "Economic data and expert analysis are presented on what these changes mean for consumers, investors and professionals in the field.",
    "The article places these events within broader industry trends, offering a historical perspective and projections for the near future.",
    "Different points of view are presented, including opinions from industry executives, independent analysts and regulators.",
];

const GENERAL_PARAGRAPHS: &[&str] = &[
    "This content gives a broad overview of the subject, starting with basic concepts and moving on to more advanced aspects. The approach is accessible even without prior knowledge of the field.",
    "Practical examples and case studies illustrate how the concepts apply to real-world situations, making them easier to understand and showing their relevance.",
    "The author covers different perspectives on the subject, presenting arguments for and against certain approaches, which lets readers form their own informed opinion.",
    "The conclusion summarizes the main points and offers practical recommendations for anyone who wants to go deeper or apply what they learned.",
];

const GENERAL_TOPICS: &[&str] = &[
    "Technology",
    "Innovation",
    "Trends",
    "Best Practices",
    "Tutorials",
    "Guides",
    "Analysis",
    "Comparisons",
    "Tips and Tricks",
    "Resources",
    "Tools",
    "Community",
];

const TECH_TOPICS: &[&str] = &[
    "Artificial Intelligence",
    "Machine Learning",
    "Cloud Computing",
    "Cybersecurity",
    "Big Data",
    "Internet of Things (IoT)",
    "Blockchain",
    "Virtual Reality",
    "Augmented Reality",
    "5G",
    "Quantum Computing",
    "Automation",
    "Robotics",
];

const PROGRAMMING_TOPICS: &[&str] = &[
    "Web Development",
    "Mobile Development",
    "DevOps",
    "Software Architecture",
    "Design Patterns",
    "Automated Testing",
    "Programming Languages",
    "Frameworks",
    "APIs",
    "Databases",
    "Microservices",
    "Containers",
    "CI/CD",
];

const BUSINESS_TOPICS: &[&str] = &[
    "Entrepreneurship",
    "Startups",
    "Business Models",
    "Digital Marketing",
    "E-commerce",
    "Project Management",
    "Productivity",
    "Leadership",
    "Digital Transformation",
    "Data Analysis",
    "Customer Experience",
    "Innovation",
];

/// What a URL points at, judged from its host and path alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
    Reddit { subreddit: Option<String>, post_id: Option<String> },
    CodeHost,
    QuestionAnswer,
    Medium,
    NewsOrBlog,
    Tech,
    Business,
    General,
}

impl LinkKind {
    pub fn classify(url: &str) -> Self {
        let domain = domain_of(url);

        if domain.contains("reddit.com") {
            let (subreddit, post_id) = reddit_thread(url);
            return LinkKind::Reddit { subreddit, post_id };
        }
        if domain.contains("github.com") {
            LinkKind::CodeHost
        } else if domain.contains("stackoverflow.com") {
            LinkKind::QuestionAnswer
        } else if domain.contains("medium.com") {
            LinkKind::Medium
        } else if domain.contains("news") || domain.contains("blog") {
            LinkKind::NewsOrBlog
        } else if domain.contains("tech") {
            LinkKind::Tech
        } else if ["business", "startup", "entrepreneur"]
            .iter()
            .any(|word| domain.contains(word))
        {
            LinkKind::Business
        } else {
            LinkKind::General
        }
    }

    fn subreddit_in(&self, group: &[&str]) -> bool {
        match self {
            LinkKind::Reddit {
                subreddit: Some(name),
                ..
            } => group.iter().any(|member| member.eq_ignore_ascii_case(name)),
            _ => false,
        }
    }
}

/// Extracts `r/{subreddit}/comments/{id}` from a Reddit link.
fn reddit_thread(url: &str) -> (Option<String>, Option<String>) {
    let Ok(parsed) = url::Url::parse(url) else {
        return (None, None);
    };
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    segments
        .windows(4)
        .find(|window| window[0] == "r" && window[2] == "comments")
        .map(|window| (Some(window[1].to_string()), Some(window[3].to_string())))
        .unwrap_or((None, None))
}

#[derive(Debug, Clone)]
pub struct SimulatedSummarizer {
    language: String,
}

impl SimulatedSummarizer {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    pub fn summarize(&self, url: &str) -> LinkSummary {
        let mut rng = fastrand::Rng::with_seed(url_seed(url));
        let kind = LinkKind::classify(url);

        let title = title_for(&mut rng, &kind);
        let summary = summary_for(&mut rng, &kind);
        let main_topics = topics_for(&mut rng, &kind);

        LinkSummary {
            title,
            summary,
            main_topics,
            metadata: LinkMetadata {
                domain: domain_of(url),
                url: url.to_string(),
                estimated_reading_time: rng.u32(3..=15),
                language: self.language.clone(),
                word_count: rng.u32(500..=3000),
            },
        }
    }
}

/// FNV-1a, stable across builds and platforms.
fn url_seed(url: &str) -> u64 {
    url.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}

fn pick(rng: &mut fastrand::Rng, options: &[&str]) -> String {
    options[rng.usize(..options.len())].to_string()
}

fn title_for(rng: &mut fastrand::Rng, kind: &LinkKind) -> String {
    match kind {
        LinkKind::Reddit {
            subreddit: Some(name),
            ..
        } => format!("Discussion on r/{}: {}", name, pick(rng, GENERAL_TITLES)),
        LinkKind::Reddit { .. } => format!("Reddit post about {}", pick(rng, GENERAL_TITLES)),
        LinkKind::CodeHost => format!("GitHub repository: {}", pick(rng, PROGRAMMING_TITLES)),
        LinkKind::QuestionAnswer => format!(
            "Stack Overflow question about {}",
            pick(rng, PROGRAMMING_TITLES)
        ),
        LinkKind::Medium => format!("Medium article about {}", pick(rng, TECHNOLOGY_TITLES)),
        LinkKind::NewsOrBlog => format!("News: {}", pick(rng, CURRENT_AFFAIRS_TITLES)),
        LinkKind::Tech | LinkKind::Business | LinkKind::General => {
            format!("Web page: {}", pick(rng, GENERAL_TITLES))
        }
    }
}

fn summary_for(rng: &mut fastrand::Rng, kind: &LinkKind) -> String {
    let mut paragraphs: Vec<&str> = match kind {
        LinkKind::Reddit { .. } => {
            let mut pool = REDDIT_PARAGRAPHS.to_vec();
            if kind.subreddit_in(PROGRAMMING_SUBREDDITS) {
                pool.extend_from_slice(&PROGRAMMING_PARAGRAPHS[..2]);
            }
            pool
        }
        LinkKind::CodeHost | LinkKind::QuestionAnswer => PROGRAMMING_PARAGRAPHS.to_vec(),
        LinkKind::NewsOrBlog => NEWS_PARAGRAPHS.to_vec(),
        LinkKind::Tech => TECH_PARAGRAPHS.to_vec(),
        LinkKind::Medium | LinkKind::Business | LinkKind::General => GENERAL_PARAGRAPHS.to_vec(),
    };

    rng.shuffle(&mut paragraphs);
    paragraphs.truncate(rng.usize(2..=3));
    paragraphs.join("\n\n")
}

fn topics_for(rng: &mut fastrand::Rng, kind: &LinkKind) -> Vec<String> {
    let extra: &[&str] = match kind {
        LinkKind::Reddit { .. } if kind.subreddit_in(PROGRAMMING_SUBREDDITS) => PROGRAMMING_TOPICS,
        LinkKind::Reddit { .. } if kind.subreddit_in(TECH_SUBREDDITS) => TECH_TOPICS,
        LinkKind::Reddit { .. } if kind.subreddit_in(BUSINESS_SUBREDDITS) => BUSINESS_TOPICS,
        LinkKind::CodeHost | LinkKind::QuestionAnswer => PROGRAMMING_TOPICS,
        LinkKind::Tech => TECH_TOPICS,
        LinkKind::Business => BUSINESS_TOPICS,
        _ => &[],
    };

    let mut pool: Vec<&str> = GENERAL_TOPICS.to_vec();
    for &topic in extra {
        if !pool.contains(&topic) {
            pool.push(topic);
        }
    }

    rng.shuffle(&mut pool);
    pool.truncate(rng.usize(3..=5));
    pool.into_iter().map(str::to_string).collect()
}
