// ABOUTME: CLI for extracting structured metadata from HTML documents.
// ABOUTME: Reads HTML from URL, file, or stdin and prints extraction results as JSON.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use pagesift_extract::Extractor;
use serde_json::json;

/// Extract titles, descriptions, images, urls, feeds and videos from one or more HTML documents.
#[derive(Parser, Debug)]
#[command(name = "pagesift")]
#[command(about = "Extract structured metadata from HTML and print JSON", long_about = None)]
struct Args {
    /// Document URL(s) (http/https) or local file paths. Use "-" to read one document from stdin.
    #[arg(required = true)]
    targets: Vec<String>,

    /// Base URL for resolving relative links (only valid when a single target is provided).
    /// URL targets default to the fetched URL.
    #[arg(long)]
    source_url: Option<String>,

    /// Technique keys to run, in priority order. Repeatable; defaults to the builtin order.
    #[arg(long = "technique")]
    techniques: Vec<String>,

    /// Drop fields that are not classified as text or url types.
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Prefix every extracted value with the technique that produced it.
    #[arg(long, default_value_t = false)]
    provenance: bool,

    /// Print the merged field mapping instead of the wrapped result.
    #[arg(long, default_value_t = false)]
    dict: bool,

    /// Output compact JSON instead of pretty.
    #[arg(long, default_value_t = false)]
    compact: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    if args.targets.len() > 1 && args.source_url.is_some() {
        bail!("--source-url is only valid when extracting from a single target");
    }

    let mut builder = Extractor::builder()
        .strict_types(args.strict)
        .mark_provenance(args.provenance);
    if !args.techniques.is_empty() {
        builder = builder.techniques(args.techniques.clone());
    }
    let extractor = builder.build();

    let mut results = Vec::new();
    for target in &args.targets {
        let source_url = args
            .source_url
            .clone()
            .or_else(|| is_http_url(target).then(|| target.clone()));

        match extract_target(&extractor, target, source_url.as_deref(), args.dict) {
            Ok(value) => results.push(json!({
                "target": target,
                "ok": true,
                "extracted": value,
                "error": null
            })),
            Err(err) => results.push(json!({
                "target": target,
                "ok": false,
                "extracted": null,
                "error": err.to_string()
            })),
        }
    }

    // Output format:
    // - Single target and ok => emit the extracted object (backward compatible)
    // - Otherwise emit an envelope with results array and counts
    let failed = results
        .iter()
        .filter(|r| r.get("ok").and_then(|v| v.as_bool()) != Some(true))
        .count();
    let output = if args.targets.len() == 1 && failed == 0 {
        results
            .first()
            .and_then(|r| r.get("extracted").cloned())
            .unwrap_or_else(|| json!({}))
    } else {
        json!({
            "results": results,
            "total_targets": results.len(),
            "extracted": results.len() - failed,
            "failed": failed
        })
    };

    if args.compact {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn extract_target(
    extractor: &Extractor,
    target: &str,
    source_url: Option<&str>,
    dict: bool,
) -> Result<serde_json::Value> {
    let html = load_html(target)?;
    let value = if dict {
        serde_json::to_value(extractor.extract_fields(&html, source_url)?)?
    } else {
        serde_json::to_value(extractor.extract_with_source(&html, source_url)?)?
    };
    Ok(value)
}

fn is_http_url(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

fn load_html(target: &str) -> Result<String> {
    if target == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }

    if is_http_url(target) {
        let resp = reqwest::blocking::get(target)?.error_for_status()?;
        return Ok(resp.text()?);
    }

    let path = PathBuf::from(target);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", target));
    }
    Ok(fs::read_to_string(path)?)
}
