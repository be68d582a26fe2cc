// src/display.rs
//! Plain-text rendering of a search outcome for the terminal.

use std::fmt::Write;

use crate::types::{NormalizedResult, SponsorRecord};

const MISSING_WEBSITE: &str = "Website Not Available";

/// Headline shown above the results.
pub fn summary_message(record_count: usize) -> String {
    if record_count > 0 {
        format!("{} companies found via AI search.", record_count)
    } else {
        "No specific companies found via AI search.".to_string()
    }
}

/// Company cards, then the raw answer when there are no cards, then the sources.
pub fn render(query: &str, country: &str, result: &NormalizedResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Results for \"{}\" in {}", query, country);
    let _ = writeln!(out, "{}", summary_message(result.records().len()));

    for record in result.records() {
        out.push('\n');
        render_record(&mut out, record);
    }

    if let Some(raw_text) = result.raw_text().filter(|text| !text.trim().is_empty()) {
        let _ = writeln!(out, "\nAI Summary\n{}", raw_text.trim_end());
    }

    if !result.sources().is_empty() {
        let _ = writeln!(out, "\nSources & Verified Listings");
        for source in result.sources() {
            let label = source.label().unwrap_or("(untitled)");
            match source.uri.as_deref() {
                Some(uri) if uri != label => {
                    let _ = writeln!(out, "  - {} <{}>", label, uri);
                }
                _ => {
                    let _ = writeln!(out, "  - {}", label);
                }
            }
        }
    }

    out
}

fn render_record(out: &mut String, record: &SponsorRecord) {
    let name = record.name().unwrap_or("(unnamed company)");
    match record.sponsorship_type().filter(|kind| !kind.is_empty()) {
        Some(kind) => {
            let _ = writeln!(out, "{}  [{}]", name, kind);
        }
        None => {
            let _ = writeln!(out, "{}", name);
        }
    }

    if let Some(industry) = record.industry() {
        let _ = writeln!(out, "  Industry: {}", industry);
    }
    if let Some(location) = record.location() {
        let _ = writeln!(out, "  Location: {}", location);
    }
    if let Some(description) = record.description() {
        let _ = writeln!(out, "  {}", description);
    }

    let website = record
        .website()
        .filter(|site| !site.trim().is_empty())
        .unwrap_or(MISSING_WEBSITE);
    let _ = writeln!(out, "  Career page: {}", website);
}
