pub mod capability;
pub mod config;
pub mod error;
pub mod error_utils;
pub mod rate_limiter;
pub mod types;

pub use capability::*;
pub use config::*;
pub use error::*;
pub use error_utils::*;
pub use rate_limiter::{RateLimitConfig, RateLimitPermit, RateLimiter};
pub use types::*;
