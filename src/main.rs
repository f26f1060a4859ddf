//! Outliner - Main Entry Point
//!
//! Command-line front end: extracts definition outlines for the given
//! files and renders them one record per line. Line numbers become
//! 1-based here, at the output boundary only.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use outliner::{BatchReport, DefinitionRecord, ExtractionConfig, ExtractionCoordinator, FileOutcome};

/// Extract a navigable definition outline from source files
#[derive(Parser, Debug)]
#[command(name = "outliner")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Files to outline; enumeration and ignore filtering are the
    /// caller's job
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Minimum lines a definition must span (overrides env and default)
    #[arg(long)]
    min_lines: Option<usize>,

    /// Emit JSON instead of the line-oriented format
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "outliner=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let mut config = ExtractionConfig::from_env();

    let args = Args::parse();
    if let Some(min_lines) = args.min_lines {
        config.min_definition_lines = min_lines;
    }

    let coordinator = ExtractionCoordinator::new(config);
    let (outcomes, report) = coordinator.extract_paths(args.files).await;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json_payload(&outcomes, &report))?
        );
    } else {
        render_text(&outcomes);
    }

    Ok(())
}

fn render_text(outcomes: &HashMap<PathBuf, FileOutcome>) {
    let mut paths: Vec<&PathBuf> = outcomes.keys().collect();
    paths.sort();

    for path in paths {
        println!("{}:", path.display());
        match &outcomes[path] {
            FileOutcome::Definitions(records) => {
                for record in records {
                    println!("{}", render_record(record));
                }
            }
            FileOutcome::Empty => println!("(no definitions found)"),
            FileOutcome::Failed(error) => println!("(error: {error})"),
            FileOutcome::Skipped => {}
        }
        println!();
    }
}

/// Serialize one record; +1 on both bounds happens only here.
fn render_record(record: &DefinitionRecord) -> String {
    format!(
        "{}--{} | {}",
        record.start_line + 1,
        record.end_line + 1,
        record.label
    )
}

fn json_payload(
    outcomes: &HashMap<PathBuf, FileOutcome>,
    report: &BatchReport,
) -> serde_json::Value {
    let mut files = serde_json::Map::new();

    for (path, outcome) in outcomes {
        let value = match outcome {
            FileOutcome::Definitions(records) => json!({ "definitions": records }),
            FileOutcome::Empty => json!({ "definitions": serde_json::Value::Null }),
            FileOutcome::Failed(error) => json!({
                "error": error.to_string(),
                "kind": error.kind(),
            }),
            FileOutcome::Skipped => continue,
        };
        files.insert(path.display().to_string(), value);
    }

    json!({ "files": files, "report": report })
}
