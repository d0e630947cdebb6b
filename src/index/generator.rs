// Page index generation
//
// Computes the bounded set of pages to materialize. Three tiers:
//
// - location: one page per location, unfiltered
// - service-location: main services x locations that are a Bundesland, a
//   kreisfreie Stadt, or have priority >= 7
// - vehicle: one page per popular (brand, model) pair
//
// The thresholds and slug shapes are part of the public URL contract and are
// not configurable. Output order is location tier, then
// service-location tier (service-major), then vehicle tier (brand-major), each
// following load/catalog order, so identical inputs give identical output.

use crate::data::{Location, LocationType};
use crate::graph::{CatalogStore, LocationGraph};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// Literal prefix of location-tier slugs
pub const LOCATION_PREFIX: &str = "autoglas";

/// Literal prefix of vehicle-tier slugs; also the slug of a main service
pub const VEHICLE_PREFIX: &str = "scheibenwechsel";

/// Priority from which any location gets service-location pages
pub const SERVICE_LOCATION_MIN_PRIORITY: u8 = 7;

/// Location types that always get service-location pages
pub const SERVICE_LOCATION_TYPES: [LocationType; 2] =
    [LocationType::Bundesland, LocationType::KreisfreieStadt];

/// Priority assigned to vehicle pages, which have no location to inherit from
pub const VEHICLE_PRIORITY: u8 = 5;

/// Page tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageType {
    Location,
    ServiceLocation,
    Vehicle,
}

impl PageType {
    pub const ALL: [PageType; 3] = [PageType::Location, PageType::ServiceLocation, PageType::Vehicle];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::Location => "location",
            PageType::ServiceLocation => "service-location",
            PageType::Vehicle => "vehicle",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The entities a page is about
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PageTarget {
    Location { location: String },
    ServiceLocation { service: String, location: String },
    Vehicle { brand: String, model: String },
}

impl PageTarget {
    pub fn location(location: &str) -> Self {
        PageTarget::Location {
            location: location.to_string(),
        }
    }

    pub fn service_location(service: &str, location: &str) -> Self {
        PageTarget::ServiceLocation {
            service: service.to_string(),
            location: location.to_string(),
        }
    }

    pub fn vehicle(brand: &str, model: &str) -> Self {
        PageTarget::Vehicle {
            brand: brand.to_string(),
            model: model.to_string(),
        }
    }

    pub fn page_type(&self) -> PageType {
        match self {
            PageTarget::Location { .. } => PageType::Location,
            PageTarget::ServiceLocation { .. } => PageType::ServiceLocation,
            PageTarget::Vehicle { .. } => PageType::Vehicle,
        }
    }

    /// Derived URL slug
    pub fn slug(&self) -> String {
        match self {
            PageTarget::Location { location } => location_slug(location),
            PageTarget::ServiceLocation { service, location } => service_location_slug(service, location),
            PageTarget::Vehicle { brand, model } => vehicle_slug(brand, model),
        }
    }

    /// Location slug for location-bound pages
    pub fn location_slug(&self) -> Option<&str> {
        match self {
            PageTarget::Location { location } | PageTarget::ServiceLocation { location, .. } => {
                Some(location)
            }
            PageTarget::Vehicle { .. } => None,
        }
    }
}

pub fn location_slug(location: &str) -> String {
    format!("{}-{}", LOCATION_PREFIX, location)
}

pub fn service_location_slug(service: &str, location: &str) -> String {
    format!("{}-{}", service, location)
}

pub fn vehicle_slug(brand: &str, model: &str) -> String {
    format!("{}-{}-{}", VEHICLE_PREFIX, brand, model)
}

/// Whether a location gets pages in the service-location tier
pub fn qualifies_for_service_pages(location: &Location) -> bool {
    SERVICE_LOCATION_TYPES.contains(&location.kind) || location.priority >= SERVICE_LOCATION_MIN_PRIORITY
}

/// One page to materialize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageIndexEntry {
    pub slug: String,
    pub page_type: PageType,
    pub priority: u8,
    pub target: PageTarget,
}

impl PageIndexEntry {
    fn new(target: PageTarget, priority: u8) -> Self {
        Self {
            slug: target.slug(),
            page_type: target.page_type(),
            priority,
            target,
        }
    }
}

/// Page counts per tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub location: usize,
    pub service_location: usize,
    pub vehicle: usize,
}

impl TierCounts {
    pub fn total(&self) -> usize {
        self.location + self.service_location + self.vehicle
    }

    pub fn get(&self, page_type: PageType) -> usize {
        match page_type {
            PageType::Location => self.location,
            PageType::ServiceLocation => self.service_location,
            PageType::Vehicle => self.vehicle,
        }
    }
}

/// The ordered, read-only page set of one build
#[derive(Debug, Default)]
pub struct PageIndex {
    entries: Vec<PageIndexEntry>,
    /// First occurrence of each slug
    by_slug: HashMap<String, usize>,
}

impl PageIndex {
    fn from_entries(entries: Vec<PageIndexEntry>) -> Self {
        let mut by_slug = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            by_slug.entry(entry.slug.clone()).or_insert(idx);
        }
        Self { entries, by_slug }
    }

    /// All entries in generation order
    pub fn entries(&self) -> &[PageIndexEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageIndexEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, slug: &str) -> Option<&PageIndexEntry> {
        self.by_slug.get(slug).map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.by_slug.contains_key(slug)
    }

    /// Duplicate-free slugs in generation order
    pub fn paths(&self) -> Vec<&str> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(idx, e)| self.by_slug.get(&e.slug) == Some(idx))
            .map(|(_, e)| e.slug.as_str())
            .collect()
    }

    /// Slugs derived more than once, in order of first repetition
    pub fn duplicate_slugs(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut dups = Vec::new();
        for entry in &self.entries {
            if !seen.insert(entry.slug.as_str()) && !dups.contains(&entry.slug.as_str()) {
                dups.push(entry.slug.as_str());
            }
        }
        dups
    }

    pub fn count_by_type(&self) -> TierCounts {
        let mut counts = TierCounts::default();
        for entry in &self.entries {
            match entry.page_type {
                PageType::Location => counts.location += 1,
                PageType::ServiceLocation => counts.service_location += 1,
                PageType::Vehicle => counts.vehicle += 1,
            }
        }
        counts
    }

    /// Entries of one tier in generation order
    pub fn of_type(&self, page_type: PageType) -> Vec<&PageIndexEntry> {
        self.entries.iter().filter(|e| e.page_type == page_type).collect()
    }

    /// Entries with at least the given priority, in generation order
    pub fn with_min_priority(&self, min: u8) -> Vec<&PageIndexEntry> {
        self.entries.iter().filter(|e| e.priority >= min).collect()
    }

    /// Histogram of entry priorities
    pub fn priority_histogram(&self) -> BTreeMap<u8, usize> {
        let mut histogram = BTreeMap::new();
        for entry in &self.entries {
            *histogram.entry(entry.priority).or_insert(0) += 1;
        }
        histogram
    }

    /// SHA-256 over one `slug\tpage-type\tpriority\n` line per entry, hex encoded
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for entry in &self.entries {
            hasher.update(entry.slug.as_bytes());
            hasher.update(b"\t");
            hasher.update(entry.page_type.as_str().as_bytes());
            hasher.update(b"\t");
            hasher.update(entry.priority.to_string().as_bytes());
            hasher.update(b"\n");
        }
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}

/// Builds the page index from the lookup stores
pub struct PageIndexGenerator<'a> {
    locations: &'a LocationGraph,
    catalog: &'a CatalogStore,
}

impl<'a> PageIndexGenerator<'a> {
    pub fn new(locations: &'a LocationGraph, catalog: &'a CatalogStore) -> Self {
        Self { locations, catalog }
    }

    /// Generate all three tiers
    pub fn generate(&self) -> PageIndex {
        let mut entries = self.location_tier();
        let location_count = entries.len();
        entries.extend(self.service_location_tier());
        let service_count = entries.len() - location_count;
        entries.extend(self.vehicle_tier());

        debug!(
            locations = location_count,
            service_locations = service_count,
            vehicles = entries.len() - location_count - service_count,
            "page index generated"
        );

        PageIndex::from_entries(entries)
    }

    /// One page per location
    pub fn location_tier(&self) -> Vec<PageIndexEntry> {
        self.locations
            .all()
            .map(|l| PageIndexEntry::new(PageTarget::location(&l.slug), l.priority))
            .collect()
    }

    /// Main services crossed with qualifying locations
    pub fn service_location_tier(&self) -> Vec<PageIndexEntry> {
        let qualifying: Vec<&Location> = self
            .locations
            .all()
            .filter(|l| qualifies_for_service_pages(l))
            .collect();

        let mut entries = Vec::new();
        for service in self.catalog.main_services() {
            for location in &qualifying {
                entries.push(PageIndexEntry::new(
                    PageTarget::service_location(&service.slug, &location.slug),
                    location.priority,
                ));
            }
        }
        entries
    }

    /// Popular models only
    pub fn vehicle_tier(&self) -> Vec<PageIndexEntry> {
        let mut entries = Vec::new();
        for brand in self.catalog.brands() {
            for model in self.catalog.popular_models_by_brand(&brand.slug) {
                entries.push(PageIndexEntry::new(
                    PageTarget::vehicle(&brand.slug, &model.slug),
                    VEHICLE_PRIORITY,
                ));
            }
        }
        entries
    }
}
