use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub data: DataConfig,
    pub links: LinksConfig,
    pub sitemap: SitemapConfig,
    pub output: OutputConfig,
}

/// Site metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    /// Absolute origin used in the sitemap, e.g. "https://www.example.de"
    pub base_url: String,
    /// Label of the first breadcrumb
    pub home_label: String,
}

/// Where the source data lives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub directory: PathBuf,
    /// Glob for location files, relative to the data directory
    pub locations: String,
    pub services: String,
    pub vehicles: String,
}

/// Caps for the internal link sets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    pub max_children: usize,
    pub max_siblings: usize,
    pub max_nearby: usize,
    pub max_cross_links: usize,
    pub max_vehicle_links: usize,
}

/// Sitemap settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub changefreq: ChangeFreq,
    /// Entries below this priority are left out of the sitemap
    pub min_priority: u8,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

/// Sitemap change frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Autoglas".to_string(),
            base_url: "https://www.example.de".to_string(),
            home_label: "Startseite".to_string(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
            locations: "locations/**/*.json".to_string(),
            services: "services.json".to_string(),
            vehicles: "vehicles.json".to_string(),
        }
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            max_children: 12,
            max_siblings: 8,
            max_nearby: 6,
            max_cross_links: 6,
            max_vehicle_links: 10,
        }
    }
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            changefreq: ChangeFreq::default(),
            min_priority: 1,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("dist"),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        data: Option<PathBuf>,
        output: Option<PathBuf>,
        base_url: Option<String>,
        min_priority: Option<u8>,
    ) {
        if let Some(dir) = data {
            self.data.directory = dir;
        }

        if let Some(out) = output {
            self.output.directory = out;
        }

        if let Some(url) = base_url {
            self.site.base_url = url;
        }

        if let Some(p) = min_priority {
            self.sitemap.min_priority = p;
        }
    }

    /// Base URL without trailing slashes
    pub fn base_url(&self) -> &str {
        self.site.base_url.trim_end_matches('/')
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = &self.site.base_url;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(Error::config_validation(format!(
                "base_url must be an absolute http(s) URL, got '{}'",
                url
            )));
        }

        if self.data.locations.trim().is_empty() {
            return Err(Error::config_validation("data.locations pattern must not be empty"));
        }

        let caps = [
            ("max_children", self.links.max_children),
            ("max_siblings", self.links.max_siblings),
            ("max_nearby", self.links.max_nearby),
            ("max_cross_links", self.links.max_cross_links),
            ("max_vehicle_links", self.links.max_vehicle_links),
        ];
        for (name, value) in caps {
            if value == 0 {
                return Err(Error::config_validation(format!("{} must be at least 1", name)));
            }
        }

        if self.sitemap.min_priority > 10 {
            return Err(Error::config_validation("sitemap min_priority cannot exceed 10"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.site.home_label, "Startseite");
        assert_eq!(config.links.max_children, 12);
        assert_eq!(config.sitemap.changefreq, ChangeFreq::Weekly);
        assert_eq!(config.data.locations, "locations/**/*.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[site]
name = "Autoglas Nord"
base_url = "https://autoglas-nord.de/"

[links]
max_siblings = 4

[sitemap]
changefreq = "monthly"
min_priority = 3
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.site.name, "Autoglas Nord");
        assert_eq!(config.base_url(), "https://autoglas-nord.de");
        assert_eq!(config.links.max_siblings, 4);
        assert_eq!(config.links.max_children, 12);
        assert_eq!(config.sitemap.changefreq, ChangeFreq::Monthly);
        assert_eq!(config.sitemap.min_priority, 3);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/seo-atlas.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_on_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[links]\nmax_children = 0").unwrap();
        let config = Config::load_or_default(file.path());
        assert_eq!(config.links.max_children, 12);
    }

    #[test]
    fn test_validation_relative_base_url() {
        let mut config = Config::default();
        config.site.base_url = "www.example.de".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_cap() {
        let mut config = Config::default();
        config.links.max_nearby = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_nearby"));
    }

    #[test]
    fn test_validation_min_priority_too_high() {
        let mut config = Config::default();
        config.sitemap.min_priority = 11;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_cli() {
        let mut config = Config::default();
        config.merge_cli(
            Some(PathBuf::from("/srv/data")),
            Some(PathBuf::from("/srv/out")),
            Some("https://autoglas.test".to_string()),
            Some(7),
        );
        assert_eq!(config.data.directory, PathBuf::from("/srv/data"));
        assert_eq!(config.output.directory, PathBuf::from("/srv/out"));
        assert_eq!(config.base_url(), "https://autoglas.test");
        assert_eq!(config.sitemap.min_priority, 7);
    }

    #[test]
    fn test_merge_cli_keeps_unset() {
        let mut config = Config::default();
        config.merge_cli(None, None, None, None);
        assert_eq!(config.output.directory, PathBuf::from("dist"));
        assert_eq!(config.sitemap.min_priority, 1);
    }

    #[test]
    fn test_changefreq_parsing() {
        let sitemap: SitemapConfig = toml::from_str(r#"changefreq = "daily""#).unwrap();
        assert_eq!(sitemap.changefreq, ChangeFreq::Daily);
        assert_eq!(sitemap.changefreq.as_str(), "daily");
    }
}
