//! Check command - validate the site document

use anyhow::{Context, Result};
use glossite_adapters::site::JsonSiteSource;
use glossite_domain::SiteSource;
use glossite_domain::validation::check_document;
use std::path::PathBuf;

use crate::args::CheckArgs;
use crate::config::AppConfig;

pub async fn execute(args: CheckArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref()).unwrap_or_default();
    let site_path = args.site.unwrap_or(config.general.site_path);

    if !args.json {
        println!("Checking site document: {}", site_path.display());
    }

    let source = JsonSiteSource::new(&site_path).context("Failed to open site document")?;

    let (doc, problems) = match source.load().await {
        Ok(doc) => {
            let problems = check_document(&doc);
            (Some(doc), problems)
        }
        Err(e) => (None, vec![e.to_string()]),
    };

    if args.json {
        let output = serde_json::json!({
            "site": site_path,
            "valid": problems.is_empty(),
            "problems": problems,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if let Some(doc) = doc.filter(|_| problems.is_empty()) {
        let definitions = doc.glossary.as_ref().map_or(0, |g| g.definitions.len());
        println!(
            "✓ Validation passed ({} languages, {} pages, {} definitions)",
            doc.languages.len(),
            doc.pages.len(),
            definitions
        );
    } else {
        eprintln!("✗ Validation failed: {} problem(s)", problems.len());
        for problem in &problems {
            eprintln!("  - {}", problem);
        }
    }

    if !problems.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
