// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use anyhow::{anyhow, Result};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::{info, warn};

use crate::core::ConfigManager;
use crate::types::Preset;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/search", data = "<request>")]
pub async fn search(
    request: Json<StandardRequest<SearchForm>>,
    backend: &State<SearchBackend>,
) -> Result<Json<DataResponse<SearchData>>, ErrorReply> {
    handlers::search_handler(request, backend).await
}

#[get("/presets")]
pub async fn presets() -> Json<DataResponse<Vec<Preset>>> {
    handlers::presets_handler().await
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Endpoint not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Available endpoints: /api/search, /api/presets, /api/health".to_string()],
        None,
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body could not be parsed".to_string(),
        "BAD_REQUEST".to_string(),
        vec!["Send a JSON object with \"query\" and \"country\" strings".to_string()],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

/// Assemble the server without launching it.
pub fn build_rocket(backend: SearchBackend, port: u16) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    rocket::custom(figment)
        .attach(Cors)
        .manage(backend)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount("/api", routes![search, presets, health, options])
}

pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    let backend = SearchBackend::new(config.search);

    match backend.client() {
        Ok(client) => info!("Search provider model: {}", client.model()),
        Err(e) => warn!("Searches will fail until this is fixed: {}", e),
    }

    info!("Starting SponsorSeeker API server");
    info!("Server: http://0.0.0.0:{}", config.server.port);

    let _rocket = build_rocket(backend, config.server.port)
        .launch()
        .await
        .map_err(|e| anyhow!("Rocket server failed: {}", e))?;

    Ok(())
}
