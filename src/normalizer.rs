// src/normalizer.rs
//! Turns a free-form model answer into sponsor records and citations.
//!
//! The payload is located in two stages: a fenced ```` ```json ```` block if
//! one exists, otherwise the leftmost balanced `[ ... ]` span whose first
//! element is an object. Whatever goes wrong after that is absorbed: the
//! caller gets an empty record list and the full answer as raw text.

use serde_json::Value;

use crate::types::{CitationSource, GroundingChunk, NormalizedResult, SponsorRecord};

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Why structured extraction produced nothing. Never escapes [`ResponseNormalizer::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("no JSON payload found in model output")]
    NoPayloadFound,

    #[error("malformed JSON payload: {0}")]
    MalformedPayload(String),

    #[error("JSON payload is not an array of objects")]
    NotAnObjectArray,
}

/// Stateless; every method is a pure function of its inputs.
pub struct ResponseNormalizer;

impl ResponseNormalizer {
    pub fn normalize<'a, I>(raw_text: &str, grounding: I) -> NormalizedResult
    where
        I: IntoIterator<Item = &'a GroundingChunk>,
    {
        Self::normalize_with_diagnostics(raw_text, grounding).0
    }

    /// Same as [`Self::normalize`], also returning the reason a fallback happened.
    ///
    /// An empty array is a valid answer, so it falls back without a reason.
    pub fn normalize_with_diagnostics<'a, I>(
        raw_text: &str,
        grounding: I,
    ) -> (NormalizedResult, Option<ExtractionError>)
    where
        I: IntoIterator<Item = &'a GroundingChunk>,
    {
        let sources = Self::extract_sources(grounding);

        match Self::extract_records(raw_text) {
            Ok(records) => (NormalizedResult::from_records(records, raw_text, sources), None),
            Err(e) => (NormalizedResult::fallback(raw_text, sources), Some(e)),
        }
    }

    /// Chunks without a web reference yield nothing; present chunks pass through unchanged.
    pub fn extract_sources<'a, I>(grounding: I) -> Vec<CitationSource>
    where
        I: IntoIterator<Item = &'a GroundingChunk>,
    {
        grounding
            .into_iter()
            .filter_map(|chunk| chunk.web.clone())
            .collect()
    }

    pub fn extract_records(raw_text: &str) -> Result<Vec<SponsorRecord>, ExtractionError> {
        let payload = locate_payload(raw_text).ok_or(ExtractionError::NoPayloadFound)?;

        let value: Value = serde_json::from_str(payload)
            .map_err(|e| ExtractionError::MalformedPayload(e.to_string()))?;

        let Value::Array(items) = value else {
            return Err(ExtractionError::NotAnObjectArray);
        };

        items
            .into_iter()
            .map(|item| match item {
                Value::Object(fields) => Ok(SponsorRecord::from_fields(fields)),
                _ => Err(ExtractionError::NotAnObjectArray),
            })
            .collect()
    }
}

/// The candidate JSON text inside `text`, if any.
///
/// A fenced block wins even when its content turns out to be malformed.
pub fn locate_payload(text: &str) -> Option<&str> {
    fenced_block(text).or_else(|| first_object_array(text))
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find(FENCE_OPEN)? + FENCE_OPEN.len();
    let rest = &text[start..];
    let end = rest.find(FENCE_CLOSE)?;
    Some(rest[..end].trim())
}

fn first_object_array(text: &str) -> Option<&str> {
    let mut from = 0;
    while let Some(offset) = text[from..].find('[') {
        let start = from + offset;
        if text[start + 1..].trim_start().starts_with('{') {
            if let Some(end) = balanced_end(&text.as_bytes()[start..]) {
                return Some(&text[start..=start + end]);
            }
        }
        from = start + 1;
    }
    None
}

/// Offset of the `]` closing the `[` at `span[0]`.
///
/// Brackets inside string literals are ignored. Returns `None` when the span
/// never balances or closes on a `}`.
fn balanced_end(span: &[u8]) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &byte) in span.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => depth += 1,
            b']' | b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return (byte == b']').then_some(i);
                }
            }
            _ => {}
        }
    }

    None
}
