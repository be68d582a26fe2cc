// src/core/search_client.rs
//! Client for the hosted AI search provider (Gemini with Google Search grounding).
//!
//! One request per search: no retry, no streaming, no caching.

use std::time::Duration;

use crate::app_log;
use crate::core::config_manager::SearchConfig;
use crate::core::prompt::build_prompt;
use crate::error::{Result, SearchError};
use crate::normalizer::ResponseNormalizer;
use crate::types::{GenerateContentRequest, GenerateContentResponse, NormalizedResult, SearchRequest};

const MODELS_PATH: &str = "/v1beta/models";
const GENERATE_CONTENT_METHOD: &str = "generateContent";
const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct SponsorSearchClient {
    client: reqwest::Client,
    config: SearchConfig,
}

impl SponsorSearchClient {
    /// Fails with [`SearchError::MissingCredential`] when no API key is configured.
    pub fn new(config: SearchConfig) -> Result<Self> {
        if !config.has_credential() {
            return Err(SearchError::MissingCredential);
        }
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Ask the provider for sponsoring companies and normalize its answer.
    ///
    /// Any failure to obtain an answer is returned as an error; an answer
    /// without usable records is a successful, possibly empty, result.
    pub async fn search(&self, request: &SearchRequest) -> Result<NormalizedResult> {
        app_log!(
            info,
            "Searching sponsors for '{}' in {} with {}",
            request.query(),
            request.country(),
            self.config.model
        );

        let prompt = build_prompt(request);
        let response = self.generate_content(&prompt).await?;
        let text = response.text();

        let (result, issue) =
            ResponseNormalizer::normalize_with_diagnostics(&text, response.grounding_chunks());

        if let Some(issue) = issue {
            app_log!(warn, "Structured extraction failed, using raw text: {}", issue);
        }
        app_log!(
            info,
            "Search finished: {} records, {} sources",
            result.records().len(),
            result.sources().len()
        );

        Ok(result)
    }

    /// Raw `generateContent` call with the search tool enabled.
    pub async fn generate_content(&self, prompt: &str) -> Result<GenerateContentResponse> {
        let url = self.generate_content_url();
        let payload = GenerateContentRequest::with_search(prompt);

        app_log!(trace, "Calling search provider: {}", url);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SearchError::Http(e.to_string()))?;

        let status = response.status();
        app_log!(trace, "Response status: {}", status);

        if status.is_success() {
            let response_text = response
                .text()
                .await
                .map_err(|e| SearchError::Http(format!("failed to read response body: {e}")))?;

            serde_json::from_str(&response_text).map_err(|e| SearchError::Decode(e.to_string()))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            app_log!(error, "Search provider error {}: {}", status, error_text);
            Err(SearchError::Upstream {
                status: status.as_u16(),
                body: error_text,
            })
        }
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}{}/{}:{}",
            self.config.endpoint.trim_end_matches('/'),
            MODELS_PATH,
            self.config.model,
            GENERATE_CONTENT_METHOD
        )
    }
}
