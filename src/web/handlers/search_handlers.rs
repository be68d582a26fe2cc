// src/web/handlers/search_handlers.rs
use chrono::Utc;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::display::summary_message;
use crate::error::SearchError;
use crate::types::{SearchRequest, SearchStatus};
use crate::web::types::{
    DataResponse, SearchBackend, SearchData, SearchForm, StandardErrorResponse, StandardRequest,
    WithConversationId,
};

pub type ErrorReply = Custom<Json<StandardErrorResponse>>;

pub async fn search_handler(
    request: Json<StandardRequest<SearchForm>>,
    backend: &State<SearchBackend>,
) -> Result<Json<DataResponse<SearchData>>, ErrorReply> {
    let conversation_id = request.conversation_id();

    let search = SearchRequest::new(&request.data.query, &request.data.country).map_err(|e| {
        warn!("Rejected search request: {}", e);
        error_reply(&e, conversation_id.clone())
    })?;

    let client = backend.client().map_err(|e| {
        error!("Search provider is not configured: {}", e);
        error_reply(e, conversation_id.clone())
    })?;

    let search_id = Uuid::new_v4();
    info!(
        "Search {} started for '{}' in {}",
        search_id,
        search.query(),
        search.country()
    );

    match client.search(&search).await {
        Ok(result) => {
            info!(
                "Search {} succeeded with {} records",
                search_id,
                result.records().len()
            );
            let message = summary_message(result.records().len());
            let data = SearchData {
                search_id,
                query: search.query().to_string(),
                country: search.country().to_string(),
                status: SearchStatus::Success,
                searched_at: Utc::now(),
                result,
            };
            Ok(Json(DataResponse::success(message, data, conversation_id)))
        }
        Err(e) => {
            error!("Search {} failed: {}", search_id, e);
            Err(error_reply(&e, conversation_id))
        }
    }
}

/// HTTP status, error code and suggestions for a failed search.
pub fn categorize_error(error: &SearchError) -> (Status, &'static str, Vec<String>) {
    match error {
        SearchError::InvalidRequest(_) => (
            Status::BadRequest,
            "INVALID_REQUEST",
            vec![
                "Provide both a job title or industry and a country".to_string(),
                "Example: {\"query\": \"Nursing\", \"country\": \"United Kingdom\"}".to_string(),
            ],
        ),
        SearchError::MissingCredential | SearchError::Config(_) => (
            Status::InternalServerError,
            "SERVICE_CONFIG_ERROR",
            vec![
                "Please check your API key and try again".to_string(),
                "Set GEMINI_API_KEY before starting the server".to_string(),
            ],
        ),
        SearchError::Http(_) | SearchError::Upstream { .. } | SearchError::Decode(_) => (
            Status::BadGateway,
            "UPSTREAM_ERROR",
            vec![
                "Something went wrong while fetching data".to_string(),
                "Try again in a few moments".to_string(),
            ],
        ),
    }
}

fn error_reply(error: &SearchError, conversation_id: Option<String>) -> ErrorReply {
    let (status, code, suggestions) = categorize_error(error);
    Custom(
        status,
        Json(StandardErrorResponse::new(
            error.to_string(),
            code.to_string(),
            suggestions,
            conversation_id,
        )),
    )
}
