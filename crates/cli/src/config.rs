//! Configuration loading and management

use anyhow::{Context, Result};
use glossite_domain::usecases::{BuildConfig, RenderConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub render: RenderSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_site_path")]
    pub site_path: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Restrict builds to these languages; all site languages when unset
    #[serde(default)]
    pub languages: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSection {
    #[serde(default = "default_stylesheet")]
    pub stylesheet: String,

    #[serde(default = "default_true")]
    pub banners: bool,

    #[serde(default = "default_true")]
    pub tag_script: bool,
}

// Default value functions
fn default_site_path() -> PathBuf {
    PathBuf::from("./site_config.json")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_stylesheet() -> String {
    "styles/main.css".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            site_path: default_site_path(),
            output_dir: default_output_dir(),
            languages: None,
        }
    }
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            stylesheet: default_stylesheet(),
            banners: default_true(),
            tag_script: default_true(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./glossite.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("GLOSSITE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Build settings for the domain, with CLI language overrides applied
    pub fn build_config(&self, languages: &[String]) -> BuildConfig {
        let languages = if languages.is_empty() {
            self.general.languages.clone()
        } else {
            Some(languages.to_vec())
        };

        BuildConfig {
            languages,
            render: RenderConfig {
                stylesheet: self.render.stylesheet.clone(),
                banners: self.render.banners,
                tag_script: self.render.tag_script,
            },
        }
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# glossite configuration

[general]
site_path = "./site_config.json"
output_dir = "."
# Build only some of the site languages
# languages = ["en"]

[render]
stylesheet = "styles/main.css"
# Decorative comment banners between page blocks
banners = true
# Embed the tag index and the card filtering script
tag_script = true
"#
        .to_string()
    }
}
