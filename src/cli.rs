// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::app_log;
use crate::core::{ConfigManager, SponsorSearchClient};
use crate::display::render;
use crate::normalizer::ResponseNormalizer;
use crate::types::{GroundingChunk, NormalizedResult, SearchRequest, DEFAULT_COUNTRY, PRESETS};
use crate::utils::{read_file_safe, read_input};
use crate::web::start_web_server;

#[derive(Parser)]
#[command(name = "sponsorseeker")]
#[command(about = "Find companies offering visa sponsorship with an AI search provider")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one search and print the results
    Search {
        /// Job title or industry
        query: String,
        #[arg(long, default_value = DEFAULT_COUNTRY)]
        country: String,
        /// Print the normalized result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Normalize a saved model answer (stdin when no file is given)
    Normalize {
        file: Option<PathBuf>,
        /// JSON file holding the provider's groundingChunks array
        #[arg(long)]
        grounding: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// List the popular preset searches
    Presets,
}

impl Command {
    pub fn is_server(&self) -> bool {
        matches!(self, Command::Serve { .. })
    }
}

pub async fn handle_command(cli: Cli, mut config: ConfigManager) -> Result<()> {
    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            start_web_server(config).await
        }

        Command::Search {
            query,
            country,
            json,
        } => {
            let request = SearchRequest::new(&query, &country)?;
            let client = SponsorSearchClient::new(config.search)
                .context("Cannot create the search client")?;

            let result = client.search(&request).await.with_context(|| {
                format!(
                    "Search failed for '{}' in {}",
                    request.query(),
                    request.country()
                )
            })?;

            print_result(request.query(), request.country(), &result, json)
        }

        Command::Normalize {
            file,
            grounding,
            json,
        } => {
            let raw_text = read_input(file.as_deref()).await?;
            let chunks = match grounding {
                Some(path) => load_grounding(&path).await?,
                None => Vec::new(),
            };

            let (result, issue) = ResponseNormalizer::normalize_with_diagnostics(&raw_text, &chunks);
            if let Some(issue) = issue {
                app_log!(warn, "Falling back to raw text: {}", issue);
            }

            print_result("(saved answer)", "-", &result, json)
        }

        Command::Presets => {
            for preset in PRESETS {
                println!(
                    "{:<22} sponsorseeker search \"{}\" --country \"{}\"",
                    preset.label, preset.query, preset.country
                );
            }
            Ok(())
        }
    }
}

async fn load_grounding(path: &Path) -> Result<Vec<GroundingChunk>> {
    let content = read_file_safe(path).await?;
    let chunks: Vec<Option<GroundingChunk>> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid grounding chunks in {}", path.display()))?;
    Ok(chunks.into_iter().flatten().collect())
}

fn print_result(query: &str, country: &str, result: &NormalizedResult, json: bool) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(result).context("Failed to serialize result")?;
        println!("{}", rendered);
    } else {
        print!("{}", render(query, country, result));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_defaults_country() {
        let cli = Cli::try_parse_from(["sponsorseeker", "search", "Mining"]).unwrap();
        match cli.command {
            Command::Search {
                query,
                country,
                json,
            } => {
                assert_eq!(query, "Mining");
                assert_eq!(country, "Australia");
                assert!(!json);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_parse_serve_port() {
        let cli = Cli::try_parse_from(["sponsorseeker", "serve", "--port", "9000"]).unwrap();
        assert!(cli.command.is_server());
        assert!(matches!(cli.command, Command::Serve { port: Some(9000) }));
    }

    #[test]
    fn test_parse_normalize_with_grounding() {
        let cli = Cli::try_parse_from([
            "sponsorseeker",
            "normalize",
            "answer.txt",
            "--grounding",
            "chunks.json",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Command::Normalize {
                file,
                grounding,
                json,
            } => {
                assert_eq!(file, Some(PathBuf::from("answer.txt")));
                assert_eq!(grounding, Some(PathBuf::from("chunks.json")));
                assert!(json);
            }
            _ => panic!("expected normalize command"),
        }
    }

    #[tokio::test]
    async fn test_load_grounding_skips_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chunks.json");
        tokio::fs::write(
            &path,
            r#"[{"web": {"title": "A", "uri": "http://x"}}, null, {"web": {"uri": "http://y"}}]"#,
        )
        .await
        .unwrap();

        let chunks = load_grounding(&path).await.unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(ResponseNormalizer::extract_sources(&chunks).len(), 2);
    }
}
