// src/core/mod.rs
//! Configuration and the provider-facing search client

pub mod config_manager;
pub mod prompt;
pub mod search_client;

pub use config_manager::{ConfigManager, SearchConfig, ServerSettings};
pub use prompt::build_prompt;
pub use search_client::SponsorSearchClient;
