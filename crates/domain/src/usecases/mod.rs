//! Application use cases

pub mod build;
pub mod render;

pub use build::{BuildConfig, BuildError, SiteBuilder};
pub use render::{GlossaryView, PageRenderer, RenderConfig, RenderError};
