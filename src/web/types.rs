// src/web/types.rs
use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{SearchConfig, SponsorSearchClient};
use crate::error::SearchError;
use crate::types::{NormalizedResult, SearchStatus};

/// Managed state: the search client, or the reason it could not be built.
///
/// The server starts without a credential and reports the problem per request.
pub struct SearchBackend {
    client: Result<SponsorSearchClient, SearchError>,
}

impl SearchBackend {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            client: SponsorSearchClient::new(config),
        }
    }

    pub fn client(&self) -> Result<&SponsorSearchClient, &SearchError> {
        self.client.as_ref()
    }
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SearchForm {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SearchData {
    pub search_id: Uuid,
    pub query: String,
    pub country: String,
    pub status: SearchStatus,
    pub searched_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: NormalizedResult,
}

// Standard envelopes

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

// Request wrapper with conversation_id support
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardRequest<T> {
    #[serde(flatten)]
    pub data: T,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

pub trait WithConversationId {
    fn conversation_id(&self) -> Option<String>;
}

impl<T> WithConversationId for StandardRequest<T> {
    fn conversation_id(&self) -> Option<String> {
        self.conversation_id.clone()
    }
}

impl TextResponse {
    pub fn success(message: String, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
            conversation_id,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
            conversation_id,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(
        error: String,
        error_code: String,
        suggestions: Vec<String>,
        conversation_id: Option<String>,
    ) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
            conversation_id,
        }
    }
}
