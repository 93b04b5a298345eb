pub mod api;
pub mod auth;
pub mod formatter;
pub mod source;
pub mod synthetic;

#[cfg(test)]
mod tests;

pub use api::{RedditApiClient, RedditListing, RedditPostData};
pub use auth::AppOnlyAuth;
pub use formatter::{format_post, format_posts};
pub use source::{RedditSource, SourceBackend, SourceMode};
pub use synthetic::SyntheticCorpus;
