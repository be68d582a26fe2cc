// src/web/handlers/system_handlers.rs
use rocket::serde::json::Json;
use tracing::info;

use crate::types::{Preset, PRESETS};
use crate::web::types::{DataResponse, TextResponse};

pub async fn presets_handler() -> Json<DataResponse<Vec<Preset>>> {
    Json(DataResponse::success(
        format!("{} popular searches", PRESETS.len()),
        PRESETS.to_vec(),
        None,
    ))
}

pub async fn health_handler() -> Json<TextResponse> {
    info!("Health check");
    Json(TextResponse::success("OK".to_string(), None))
}
