//! Tags command - show the glossary tag index

use anyhow::{Context, Result};
use glossite_adapters::site::JsonSiteSource;
use glossite_domain::{DefinitionStore, SiteSource, TagIndexBuilder};
use std::path::PathBuf;

use crate::args::TagsArgs;
use crate::config::AppConfig;

pub async fn execute(args: TagsArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref()).unwrap_or_default();
    let site_path = args.site.unwrap_or(config.general.site_path);

    let source = JsonSiteSource::new(&site_path).context("Failed to open site document")?;
    let doc = source.load().await.context("Failed to load site document")?;

    let lang = match args.lang {
        Some(lang) => lang,
        None => doc
            .default_language()
            .context("Site document declares no languages")?
            .to_string(),
    };
    if !doc.languages.iter().any(|l| *l == lang) {
        anyhow::bail!("Language '{}' is not one of the site languages", lang);
    }

    let glossary = doc.glossary.as_ref().context("Site document has no glossary")?;
    let store = DefinitionStore::from_glossary(glossary, &lang)
        .with_context(|| format!("Failed to resolve glossary for '{}'", lang))?;
    let index = TagIndexBuilder::new()
        .build_from_store(&store)
        .context("Failed to build tag index")?;

    let tags = index.tags.sorted_tags();

    if args.json {
        let output = serde_json::json!({
            "lang": lang,
            "count": tags.len(),
            "tags": tags.iter().map(|tag| serde_json::json!({
                "tag": tag,
                "cards": index.tags.get(tag).unwrap_or_default(),
            })).collect::<Vec<_>>()
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Tags ({} found, {} cards, {})", tags.len(), index.cards.len(), lang);
        println!("========================");
        println!();

        for tag in &tags {
            println!("{}", tag);
            for id in index.tags.get(tag).unwrap_or_default() {
                let title = index.card(id).map_or("", |card| card.title.as_str());
                println!("  {:<24} {}", id, title);
            }
        }
    }

    Ok(())
}
