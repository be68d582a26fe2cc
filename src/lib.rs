//! SponsorSeeker: finds companies offering visa sponsorship by asking a
//! hosted LLM search API and normalizing its free-form answer.

pub mod cli;
pub mod core;
pub mod display;
pub mod error;
pub mod normalizer;
pub mod types;
pub mod utils;
pub mod web;

pub use crate::core::{ConfigManager, SearchConfig, SponsorSearchClient};
pub use error::{Result, SearchError};
pub use normalizer::{ExtractionError, ResponseNormalizer};
pub use types::{CitationSource, NormalizedResult, SearchRequest, SponsorRecord};

/// Forwards to the `tracing` macro of the same level: `app_log!(info, "...")`.
#[macro_export]
macro_rules! app_log {
    ($level:ident, $($arg:tt)+) => {
        ::tracing::$level!($($arg)+)
    };
}
