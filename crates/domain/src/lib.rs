//! glossite domain crate
//!
//! This crate contains the core domain logic following hexagonal architecture:
//! - `model`: Site document, glossary entities and derived views
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `store`: Immutable per-language definition store
//! - `tag_index`: Glossary cards and the tag back-reference index
//! - `usecases`: Page rendering and site builds
//! - `validation`: Whole-document structural checks

pub mod model;
pub mod ports;
pub mod store;
pub mod tag_index;
pub mod text;
pub mod usecases;
pub mod validation;

pub use model::*;
pub use ports::*;
pub use store::{DefinitionStore, EntityKind, GlossaryError};
pub use tag_index::{GlossaryIndex, TagIndex, TagIndexBuilder};

use sha2::{Digest, Sha256};

/// Hex SHA-256 of rendered content, reported per page by builds
pub fn compute_content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
