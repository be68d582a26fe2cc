// src/types/search.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::utils::required_trimmed;

/// One company returned by the model, kept exactly as the model wrote it.
///
/// No schema is enforced: missing fields, extra fields and non-string values
/// all survive. The accessors give a typed view over the known keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SponsorRecord(Map<String, Value>);

impl SponsorRecord {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    pub fn id(&self) -> Option<&str> {
        self.text("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    pub fn industry(&self) -> Option<&str> {
        self.text("industry")
    }

    /// Career page or company site; the model sends an empty string when unknown.
    pub fn website(&self) -> Option<&str> {
        self.text("website")
    }

    pub fn location(&self) -> Option<&str> {
        self.text("location")
    }

    pub fn description(&self) -> Option<&str> {
        self.text("description")
    }

    /// Visa type commonly sponsored, e.g. `TSS 482` or `H1B`.
    pub fn sponsorship_type(&self) -> Option<&str> {
        self.text("sponsorshipType")
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// A web reference the provider used to ground its answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl CitationSource {
    pub fn new(title: Option<&str>, uri: Option<&str>) -> Self {
        Self {
            title: title.map(str::to_string),
            uri: uri.map(str::to_string),
        }
    }

    /// Text to show for the link: the title, or the URI when the title is missing.
    pub fn label(&self) -> Option<&str> {
        self.title
            .as_deref()
            .filter(|title| !title.is_empty())
            .or(self.uri.as_deref())
    }
}

/// Outcome of normalizing one model answer.
///
/// `raw_text` is only ever set when `records` is empty; both constructors
/// uphold that.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResult {
    records: Vec<SponsorRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_text: Option<String>,
    sources: Vec<CitationSource>,
}

impl NormalizedResult {
    /// Keeps `records` when there is at least one, otherwise falls back to `raw_text`.
    pub fn from_records(
        records: Vec<SponsorRecord>,
        raw_text: &str,
        sources: Vec<CitationSource>,
    ) -> Self {
        if records.is_empty() {
            Self::fallback(raw_text, sources)
        } else {
            Self {
                records,
                raw_text: None,
                sources,
            }
        }
    }

    pub fn fallback(raw_text: &str, sources: Vec<CitationSource>) -> Self {
        Self {
            records: Vec::new(),
            raw_text: Some(raw_text.to_string()),
            sources,
        }
    }

    pub fn records(&self) -> &[SponsorRecord] {
        &self.records
    }

    pub fn raw_text(&self) -> Option<&str> {
        self.raw_text.as_deref()
    }

    pub fn sources(&self) -> &[CitationSource] {
        &self.sources
    }

    pub fn is_structured(&self) -> bool {
        !self.records.is_empty()
    }
}

/// A validated search: both fields trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    country: String,
}

impl SearchRequest {
    pub fn new(query: &str, country: &str) -> Result<Self> {
        Ok(Self {
            query: required_trimmed("query", query)?,
            country: required_trimmed("country", country)?,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn country(&self) -> &str {
        &self.country
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Shortcut searches offered next to the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub label: &'static str,
    pub query: &'static str,
    pub country: &'static str,
}

pub const DEFAULT_COUNTRY: &str = "Australia";

pub const PRESETS: &[Preset] = &[
    Preset {
        label: "Software in USA",
        query: "Software Engineering",
        country: "USA",
    },
    Preset {
        label: "Nursing in UK",
        query: "Nursing",
        country: "United Kingdom",
    },
    Preset {
        label: "Mining in Australia",
        query: "Mining",
        country: "Australia",
    },
    Preset {
        label: "Tech in Germany",
        query: "Tech",
        country: "Germany",
    },
];

impl Preset {
    pub fn request(&self) -> Result<SearchRequest> {
        SearchRequest::new(self.query, self.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use serde_json::json;

    fn record(value: Value) -> SponsorRecord {
        match value {
            Value::Object(fields) => SponsorRecord::from_fields(fields),
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_record_accessors_read_known_fields() {
        let acme = record(json!({
            "id": "1",
            "name": "Acme",
            "website": "",
            "sponsorshipType": "TSS 482"
        }));
        assert_eq!(acme.id(), Some("1"));
        assert_eq!(acme.name(), Some("Acme"));
        assert_eq!(acme.website(), Some(""));
        assert_eq!(acme.sponsorship_type(), Some("TSS 482"));
        assert_eq!(acme.industry(), None);
    }

    #[test]
    fn test_record_keeps_non_string_values() {
        let odd = record(json!({"id": 7, "name": null, "extra": [1, 2]}));
        assert_eq!(odd.id(), None);
        assert_eq!(odd.fields().get("id"), Some(&json!(7)));
        assert_eq!(serde_json::to_value(&odd).unwrap(), json!({"id": 7, "name": null, "extra": [1, 2]}));
    }

    #[test]
    fn test_citation_label_prefers_title() {
        assert_eq!(CitationSource::new(Some("A"), Some("http://x")).label(), Some("A"));
        assert_eq!(CitationSource::new(None, Some("http://y")).label(), Some("http://y"));
        assert_eq!(CitationSource::new(Some(""), Some("http://z")).label(), Some("http://z"));
        assert_eq!(CitationSource::default().label(), None);
    }

    #[test]
    fn test_from_records_with_records_drops_raw_text() {
        let result = NormalizedResult::from_records(vec![record(json!({"name": "Acme"}))], "text", vec![]);
        assert!(result.is_structured());
        assert_eq!(result.raw_text(), None);
    }

    #[test]
    fn test_from_records_without_records_keeps_raw_text() {
        let result = NormalizedResult::from_records(vec![], "nothing found", vec![]);
        assert!(!result.is_structured());
        assert_eq!(result.raw_text(), Some("nothing found"));
    }

    #[test]
    fn test_normalized_result_serializes_camel_case() {
        let result = NormalizedResult::fallback("raw", vec![CitationSource::new(None, Some("http://y"))]);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"records": [], "rawText": "raw", "sources": [{"uri": "http://y"}]})
        );
    }

    #[test]
    fn test_search_request_trims_fields() {
        let request = SearchRequest::new("  Nursing ", "\tUnited Kingdom\n").unwrap();
        assert_eq!(request.query(), "Nursing");
        assert_eq!(request.country(), "United Kingdom");
    }

    #[test]
    fn test_search_request_rejects_blank_fields() {
        assert!(matches!(
            SearchRequest::new("   ", "USA"),
            Err(SearchError::InvalidRequest(_))
        ));
        assert!(matches!(
            SearchRequest::new("Tech", ""),
            Err(SearchError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_presets_are_valid_requests() {
        assert_eq!(PRESETS.len(), 4);
        for preset in PRESETS {
            assert!(preset.request().is_ok(), "{}", preset.label);
        }
    }

    #[test]
    fn test_search_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(SearchStatus::Success).unwrap(), json!("success"));
    }
}
