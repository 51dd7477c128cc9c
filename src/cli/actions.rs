//! One-shot action handlers: fetch, autopilot, summarize

use std::io::Read;
use std::path::Path;

use crate::api::client::{Backend, HttpBackend};
use crate::api::models::ExtractionResult;
use crate::core::config::Config;
use crate::error::{Result, ScoutError};

/// Validate the URL precondition shared by fetch and autopilot
fn require_url(url: &str) -> Result<&str> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ScoutError::InvalidInput(
            "Enter a URL.\n\n  → Example: pscout fetch https://example.com".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Handle `pscout fetch <url>`
pub async fn handle_fetch(config: &Config, url: &str, json: bool) -> Result<()> {
    let url = require_url(url)?;
    let backend = HttpBackend::new(config)?;

    let result = backend.fetch_extract(url).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_extraction(&result, config.link_display_cap);
    Ok(())
}

/// Handle `pscout autopilot <url>`
pub async fn handle_autopilot(config: &Config, url: &str, json: bool) -> Result<()> {
    let url = require_url(url)?;
    let backend = HttpBackend::new(config)?;

    let response = backend.autopilot(url).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    match &response.meta {
        Some(meta) => print_extraction(meta, config.link_display_cap),
        None => println!("No extraction returned."),
    }

    println!();
    match &response.summary {
        Some(lines) => print_summary(lines),
        None => println!("No summary returned."),
    }

    Ok(())
}

/// Handle `pscout summarize [file]`
pub async fn handle_summarize(config: &Config, file: Option<&Path>, json: bool) -> Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let backend = HttpBackend::new(config)?;
    let response = backend.summarize(&text).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    print_summary(&response.summary.unwrap_or_default());
    Ok(())
}

fn print_extraction(result: &ExtractionResult, link_cap: usize) {
    println!("{}", result.title);
    println!("{}", "=".repeat(result.title.chars().count().max(8)));
    println!();
    println!("  URL:      {}", result.url);
    println!("  Text:     {} chars", result.text.chars().count());
    println!("  Headings: {}", result.headings.len());
    println!("  Links:    {}", result.links.len());
    println!("  Prices:   {}", result.prices.len());

    if !result.headings.is_empty() {
        println!();
        println!("Headings:");
        for heading in &result.headings {
            println!("  - {heading}");
        }
    }

    if !result.links.is_empty() {
        println!();
        if result.links.len() > link_cap {
            println!("Links (first {link_cap} of {}):", result.links.len());
        } else {
            println!("Links:");
        }
        for link in result.links.iter().take(link_cap) {
            println!("  - {link}");
        }
    }

    if !result.prices.is_empty() {
        println!();
        println!("Prices:");
        for price in &result.prices {
            println!("  - {price}");
        }
    }

    if !result.text.is_empty() {
        println!();
        println!("Text preview:");
        println!("  {}", truncate(&result.text, 300));
    }
}

fn print_summary(lines: &[String]) {
    if lines.is_empty() {
        println!("Summary: (empty)");
        return;
    }
    println!("Summary:");
    for (i, line) in lines.iter().enumerate() {
        println!("  {}. {line}", i + 1);
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let prefix: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{prefix}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_url_rejects_whitespace() {
        assert!(require_url("").is_err());
        assert!(require_url("   \t").is_err());
        assert!(matches!(
            require_url(" ").unwrap_err(),
            ScoutError::InvalidInput(_)
        ));
    }

    #[test]
    fn require_url_trims() {
        assert_eq!(require_url("  https://a  ").unwrap(), "https://a");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 300), "short");
        let long = "é".repeat(400);
        let cut = truncate(&long, 10);
        assert!(cut.chars().count() <= 10);
        assert!(cut.ends_with('…'));
    }
}
