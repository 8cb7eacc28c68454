//! glossite adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `site`: JSON site document loader
//! - `pages`: Filesystem and in-memory page sinks

mod pages_fs;
mod pages_memory;
mod site_json;

/// Re-exports for site document adapters
pub mod site {
    pub use crate::site_json::JsonSiteSource;
}

/// Re-exports for page sink adapters
pub mod pages {
    pub use crate::pages_fs::FsPageSink;
    pub use crate::pages_memory::MemoryPageSink;
}
