//! Filesystem page sink

use async_trait::async_trait;
use glossite_domain::{PageSink, PageSinkError, RenderedPage};
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Writes pages under an output directory.
///
/// Each page goes to a temporary sibling first and is renamed into place,
/// so a reader never sees a half-written page.
#[derive(Debug, Clone)]
pub struct FsPageSink {
    out_dir: PathBuf,
}

impl FsPageSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn destination(&self, relative: &Path) -> Result<PathBuf, PageSinkError> {
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || relative.as_os_str().is_empty() {
            return Err(PageSinkError::UnsafePath(relative.display().to_string()));
        }
        Ok(self.out_dir.join(relative))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> PageSinkError + '_ {
    move |source| PageSinkError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[async_trait]
impl PageSink for FsPageSink {
    async fn write(&self, page: &RenderedPage) -> Result<PathBuf, PageSinkError> {
        let destination = self.destination(&page.path)?;

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(io_error(parent))?;
            }
        }

        if let Ok(existing) = fs::read(&destination).await {
            if existing == page.html.as_bytes() {
                tracing::debug!(path = %destination.display(), "Page unchanged");
                return Ok(destination);
            }
        }

        let mut staging = destination.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        fs::write(&staging, page.html.as_bytes())
            .await
            .map_err(io_error(&staging))?;
        fs::rename(&staging, &destination)
            .await
            .map_err(io_error(&destination))?;

        Ok(destination)
    }
}
