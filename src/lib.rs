//! seo-atlas - page index and link engine for local SEO sites
//!
//! Resolves a location hierarchy plus service and vehicle catalogs into a
//! bounded, deterministic set of pages, routes URL slugs back to their
//! entities and builds the internal link graph between them.

pub mod cli;
pub mod config;
pub mod content;
pub mod data;
pub mod error;
pub mod graph;
pub mod index;
pub mod links;
pub mod output;

// Re-export main types
pub use config::Config;
pub use data::{DataLoader, DataSet};
pub use error::{Error, Result};
pub use graph::{CatalogStore, LocationGraph};
pub use index::{PageIndex, PageIndexGenerator, PageTarget, PageType, SharedSite, Site, SlugRouter};
pub use links::LinkGraphBuilder;
