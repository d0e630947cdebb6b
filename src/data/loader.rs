// Data directory loader
//
// Reads the three source stores from JSON files. Location files are
// discovered recursively and read in sorted path order so the resulting
// DataSet, and everything derived from it, is stable across runs.

use crate::config::DataConfig;
use crate::data::model::{DataSet, Location, Service, VehicleBrand, VehicleModel};
use crate::error::{Error, Result};
use glob::{MatchOptions, Pattern};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Shape of the vehicles file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VehicleFile {
    brands: Vec<VehicleBrand>,
    models: Vec<VehicleModel>,
}

/// Loads a DataSet from a data directory
pub struct DataLoader {
    locations: Pattern,
    services: PathBuf,
    vehicles: PathBuf,
}

impl DataLoader {
    /// Create a loader from the data section of the config
    pub fn new(config: &DataConfig) -> Result<Self> {
        Ok(Self {
            locations: Pattern::new(&config.locations)?,
            services: PathBuf::from(&config.services),
            vehicles: PathBuf::from(&config.vehicles),
        })
    }

    /// Load every store below `root`
    pub fn load(&self, root: &Path) -> Result<DataSet> {
        if !root.is_dir() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }

        let mut locations = Vec::new();
        let files = self.discover_location_files(root)?;
        if files.is_empty() {
            warn!("no location files matched {} in {}", self.locations, root.display());
        }
        for path in &files {
            let mut batch: Vec<Location> = read_json(path)?;
            debug!("{}: {} locations", path.display(), batch.len());
            locations.append(&mut batch);
        }

        let services: Vec<Service> = read_optional(&root.join(&self.services))?.unwrap_or_default();
        let vehicles: VehicleFile = read_optional(&root.join(&self.vehicles))?.unwrap_or_default();

        Ok(DataSet {
            locations,
            services,
            brands: vehicles.brands,
            models: vehicles.models,
        })
    }

    /// Find location files matching the configured pattern, sorted
    fn discover_location_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        };

        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if self.locations.matches_path_with(relative, options) {
                files.push(entry.path().to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| Error::data_load(path, e.to_string()))
}

fn read_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        warn!("{} not found, using an empty catalog", path.display());
        return Ok(None);
    }
    read_json(path).map(Some)
}
