//! The search-classify-filter pipeline and the interactive session around it.

pub mod dashboard;
pub mod filter;
pub mod orchestrator;
pub mod result_set;
pub mod session;

pub use dashboard::{validate_url, Dashboard};
pub use filter::{filter, FilterOptions, FilterOutcome, ALL_CATEGORIES, MIN_BODY_CHARS};
pub use orchestrator::{SearchOrchestrator, SearchOutcome, SearchRequest, DEFAULT_LIMIT};
pub use result_set::{Notice, ResultSet, SentimentTally};
pub use session::{Session, RECENT_HISTORY};
