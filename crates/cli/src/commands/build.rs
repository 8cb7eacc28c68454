//! Build command - render every language and write the pages

use anyhow::{Context, Result};
use glossite_adapters::pages::{FsPageSink, MemoryPageSink};
use glossite_adapters::site::JsonSiteSource;
use glossite_domain::PageSink;
use glossite_domain::usecases::SiteBuilder;
use std::path::PathBuf;
use std::sync::Arc;

use crate::args::BuildArgs;
use crate::config::AppConfig;

pub async fn execute(args: BuildArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let site_path = args.site.unwrap_or_else(|| config.general.site_path.clone());
    let out_dir = args.out.unwrap_or_else(|| config.general.output_dir.clone());

    let source = Arc::new(
        JsonSiteSource::new(&site_path).context("Failed to open site document")?,
    );

    let sink: Arc<dyn PageSink> = if args.dry_run {
        tracing::info!("Dry run: pages are rendered but not written");
        Arc::new(MemoryPageSink::new())
    } else {
        Arc::new(FsPageSink::new(&out_dir))
    };

    let builder = SiteBuilder::new(source, sink, config.build_config(&args.languages));
    let report = builder.build().await.context("Site build failed")?;

    if args.json {
        let output = serde_json::json!({
            "dry_run": args.dry_run,
            "output_dir": out_dir,
            "pages": report.pages,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let suffix = if args.dry_run { " (dry run)" } else { "" };
        println!(
            "Built {} page(s) into {}{}",
            report.pages.len(),
            out_dir.display(),
            suffix
        );
        for page in &report.pages {
            println!(
                "  {:<4} {:<16} {:>8} bytes  {:>3} cards  {:>3} tags  sha256:{}",
                page.lang,
                page.path.display(),
                page.bytes,
                page.cards,
                page.tags,
                &page.sha256[..12]
            );
        }
    }

    Ok(())
}
