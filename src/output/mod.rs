// Report output: sitemap, path and index files, build statistics

pub mod sitemap;
pub mod stats;
pub mod templates;

pub use sitemap::{BuildReport, SitemapWriter};
pub use stats::BuildStats;
pub use templates::TemplateEngine;
