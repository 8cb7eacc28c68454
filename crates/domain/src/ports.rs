//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and the filesystem.
//! Adapters implement them to read the site document and persist pages.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::{RenderedPage, SiteDocument};

/// Error type for site document sources
#[derive(Debug, Error)]
pub enum SiteSourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error in {file}: {message}")]
    Parse { file: String, message: String },
    #[error("Invalid site document: {}", problems.join("; "))]
    Invalid { problems: Vec<String> },
}

/// Port for loading the site configuration document
#[async_trait]
pub trait SiteSource: Send + Sync {
    /// Load and parse the document
    async fn load(&self) -> Result<SiteDocument, SiteSourceError>;

    /// Load the document and check it for structural problems
    async fn validate(&self) -> Result<(), SiteSourceError>;
}

/// Error type for page sinks
#[derive(Debug, Error)]
pub enum PageSinkError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Refusing to write outside the output directory: {0}")]
    UnsafePath(String),
}

/// Port for persisting rendered pages
#[async_trait]
pub trait PageSink: Send + Sync {
    /// Write a page, returning where it ended up
    async fn write(&self, page: &RenderedPage) -> Result<PathBuf, PageSinkError>;
}
