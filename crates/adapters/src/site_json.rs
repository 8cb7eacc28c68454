//! JSON site document source

use async_trait::async_trait;
use glossite_domain::validation::check_document;
use glossite_domain::{SiteDocument, SiteSource, SiteSourceError};
use std::path::{Path, PathBuf};

/// Loads the site document from a JSON file
pub struct JsonSiteSource {
    path: PathBuf,
}

impl JsonSiteSource {
    /// Create a new source; the file must exist
    pub fn new(path: impl AsRef<Path>) -> Result<Self, SiteSourceError> {
        let path = path.as_ref().to_path_buf();

        if !path.is_file() {
            return Err(SiteSourceError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Site document not found: {}", path.display()),
            )));
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, content: &str) -> Result<SiteDocument, SiteSourceError> {
        serde_json::from_str(content).map_err(|e| SiteSourceError::Parse {
            file: self.path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl SiteSource for JsonSiteSource {
    async fn load(&self) -> Result<SiteDocument, SiteSourceError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let doc = self.parse(&content)?;

        tracing::debug!(
            path = %self.path.display(),
            languages = ?doc.languages,
            pages = doc.pages.len(),
            definitions = doc.glossary.as_ref().map_or(0, |g| g.definitions.len()),
            "Loaded site document"
        );

        Ok(doc)
    }

    async fn validate(&self) -> Result<(), SiteSourceError> {
        let doc = self.load().await?;
        let problems = check_document(&doc);

        if problems.is_empty() {
            Ok(())
        } else {
            for problem in &problems {
                tracing::warn!(path = %self.path.display(), "{}", problem);
            }
            Err(SiteSourceError::Invalid { problems })
        }
    }
}
