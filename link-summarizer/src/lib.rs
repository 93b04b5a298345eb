pub mod firecrawl;
pub mod simulated;
pub mod summarizer;

pub use firecrawl::FirecrawlClient;
pub use simulated::{LinkKind, SimulatedSummarizer};
pub use summarizer::{LinkSummarizer, SummarizerBackend};
