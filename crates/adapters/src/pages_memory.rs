//! In-memory page sink for dry runs and testing

use async_trait::async_trait;
use glossite_domain::{PageSink, PageSinkError, RenderedPage};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// In-memory page sink implementation
pub struct MemoryPageSink {
    pages: RwLock<BTreeMap<PathBuf, String>>,
}

impl MemoryPageSink {
    pub fn new() -> Self {
        Self {
            pages: RwLock::new(BTreeMap::new()),
        }
    }

    /// Content of a written page
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.pages
            .read()
            .ok()
            .and_then(|pages| pages.get(path.as_ref()).cloned())
    }

    /// Paths of all written pages, sorted
    pub fn paths(&self) -> Vec<PathBuf> {
        self.pages
            .read()
            .map(|pages| pages.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for MemoryPageSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageSink for MemoryPageSink {
    async fn write(&self, page: &RenderedPage) -> Result<PathBuf, PageSinkError> {
        let mut pages = self.pages.write().map_err(|e| PageSinkError::Io {
            path: page.path.display().to_string(),
            source: std::io::Error::other(e.to_string()),
        })?;
        pages.insert(page.path.clone(), page.html.clone());
        Ok(page.path.clone())
    }
}
