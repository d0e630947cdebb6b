// Build output writer
//
// Writes the read-only products of one build to disk: sitemap.xml,
// paths.json (static path enumeration), index.json and stats.txt.

use crate::config::Config;
use crate::error::Result;
use crate::index::Site;
use crate::output::stats::BuildStats;
use crate::output::templates::TemplateEngine;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes build products into the output directory
pub struct SitemapWriter<'c> {
    config: &'c Config,
    template_engine: TemplateEngine,
}

impl<'c> SitemapWriter<'c> {
    pub fn new(config: &'c Config) -> Result<Self> {
        let template_engine = TemplateEngine::new()?;
        Ok(Self {
            config,
            template_engine,
        })
    }

    /// Write every output file for the site
    pub fn write(&self, site: &Site) -> Result<BuildReport> {
        let mut report = BuildReport {
            output_dir: self.config.output.directory.clone(),
            ..BuildReport::default()
        };

        fs::create_dir_all(self.output_dir())?;

        report.sitemap_urls = self.write_sitemap(site)?;
        report.paths = self.write_paths(site)?;
        self.write_index(site)?;
        report.index_written = true;

        let stats = BuildStats::collect(site, &self.config.site.name, self.config.sitemap.min_priority);
        self.write_stats(&stats)?;
        report.stats_written = true;
        report.fingerprint = stats.fingerprint;

        Ok(report)
    }

    /// Write sitemap.xml; entries below the minimum priority are left out
    fn write_sitemap(&self, site: &Site) -> Result<usize> {
        let entries = site.index().with_min_priority(self.config.sitemap.min_priority);
        let xml = self.template_engine.render_sitemap(
            self.config.base_url(),
            self.config.sitemap.changefreq,
            &entries,
        )?;

        let path = self.output_dir().join("sitemap.xml");
        fs::write(&path, xml)?;
        debug!(path = %path.display(), urls = entries.len(), "sitemap written");

        Ok(entries.len())
    }

    /// Write paths.json
    fn write_paths(&self, site: &Site) -> Result<usize> {
        let paths = site.paths();
        let json = serde_json::to_string_pretty(&paths)?;
        fs::write(self.output_dir().join("paths.json"), json)?;
        Ok(paths.len())
    }

    /// Write index.json with every entry in generation order
    fn write_index(&self, site: &Site) -> Result<()> {
        let json = serde_json::to_string_pretty(site.index().entries())?;
        fs::write(self.output_dir().join("index.json"), json)?;
        Ok(())
    }

    fn write_stats(&self, stats: &BuildStats) -> Result<()> {
        let text = self.template_engine.render_stats(stats)?;
        fs::write(self.output_dir().join("stats.txt"), text)?;
        Ok(())
    }

    /// Get the output directory
    pub fn output_dir(&self) -> &Path {
        &self.config.output.directory
    }
}

/// Report of what was written
#[derive(Debug, Default)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub sitemap_urls: usize,
    pub paths: usize,
    pub index_written: bool,
    pub stats_written: bool,
    pub fingerprint: String,
}

impl BuildReport {
    pub fn summary(&self) -> String {
        format!(
            "Wrote {} paths to {}, sitemap: {} urls, index: {}, stats: {}",
            self.paths,
            self.output_dir.display(),
            self.sitemap_urls,
            if self.index_written { "yes" } else { "no" },
            if self.stats_written { "yes" } else { "no" }
        )
    }
}
