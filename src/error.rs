// src/error.rs
//! Errors raised on the search path.
//!
//! Extraction problems inside a model answer are not errors here; they are
//! absorbed by [`crate::normalizer`]. What remains are failures to obtain an
//! answer at all, which callers must surface as a failed search. No
//! credential ever appears in a message.

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// No API key was configured for the search provider.
    #[error("missing credential: set GEMINI_API_KEY to use the search provider")]
    MissingCredential,

    /// The query or country was rejected before any network call.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Transport-level failure talking to the provider.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The provider answered 2xx but the body was not a valid response.
    #[error("could not decode provider response: {0}")]
    Decode(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
