// src/core/prompt.rs
use crate::types::SearchRequest;

/// Prompt asking the provider for sponsoring companies as a fenced JSON array.
///
/// JSON response mode cannot be combined with the search tool, so the
/// structure is requested in prose and recovered by the normalizer.
pub fn build_prompt(request: &SearchRequest) -> String {
    let query = request.query();
    let country = request.country();

    format!(
        r#"You are an expert recruitment data analyst specializing in the global job market.

Task: Find a list of companies in "{country}" that are known to offer visa sponsorship to international workers, specifically related to this search query: "{query}".

Requirements:
1. Use Google Search to find current, up-to-date information.
2. Return the data as a valid JSON array wrapped in a markdown code block (e.g., ```json [ ... ] ```).
3. If specific companies cannot be confirmed, find recruitment agencies or large multinationals in "{country}" in this sector that typically sponsor.
4. Focus on companies offering work visas (e.g., H1B in USA, TSS 482 in Australia, Skilled Worker in UK, Blue Card in EU, etc., depending on the country).

JSON Structure per item:
{{
  "id": "unique_string_id",
  "name": "Company Name",
  "industry": "Industry Sector",
  "website": "Company Website URL (or empty string if not found)",
  "location": "City/Region in {country}",
  "description": "A short summary (max 20 words) of their business and visa sponsorship reputation.",
  "sponsorshipType": "Type of visa commonly sponsored (e.g. 'Skilled Worker', 'H1B', 'General Sponsorship')"
}}

If you find absolutely no companies, return an empty JSON array."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_query_and_country() {
        let request = SearchRequest::new("Nursing", "United Kingdom").unwrap();
        let prompt = build_prompt(&request);
        assert!(prompt.contains("search query: \"Nursing\""));
        assert!(prompt.contains("companies in \"United Kingdom\""));
        assert!(prompt.contains("City/Region in United Kingdom"));
    }

    #[test]
    fn test_prompt_requests_fenced_json() {
        let request = SearchRequest::new("Tech", "Germany").unwrap();
        let prompt = build_prompt(&request);
        assert!(prompt.contains("```json"));
        assert!(prompt.contains("\"sponsorshipType\""));
        assert!(prompt.contains("return an empty JSON array"));
    }
}
