// Build statistics
//
// Read-only summary of one build, taken from the index enumeration APIs.

use crate::graph::LocationStats;
use crate::index::{Site, TierCounts};
use serde::Serialize;

/// Locations of one type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub label: String,
    pub count: usize,
}

/// Pages of one priority
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityCount {
    pub priority: u8,
    pub count: usize,
}

/// Counts and fingerprint of one build
#[derive(Debug, Clone, Serialize)]
pub struct BuildStats {
    pub site_name: String,
    pub pages: PageTotals,
    pub min_priority: u8,
    /// Pages at or above `min_priority`
    pub sitemap_pages: usize,
    pub locations: LocationStats,
    pub location_types: Vec<TypeCount>,
    pub services: usize,
    pub main_services: usize,
    pub brands: usize,
    pub models: usize,
    pub popular_models: usize,
    pub priorities: Vec<PriorityCount>,
    pub fingerprint: String,
}

/// Tier counts plus their sum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageTotals {
    pub location: usize,
    pub service_location: usize,
    pub vehicle: usize,
    pub total: usize,
}

impl From<TierCounts> for PageTotals {
    fn from(counts: TierCounts) -> Self {
        Self {
            location: counts.location,
            service_location: counts.service_location,
            vehicle: counts.vehicle,
            total: counts.total(),
        }
    }
}

impl BuildStats {
    pub fn collect(site: &Site, site_name: &str, min_priority: u8) -> Self {
        let index = site.index();
        let catalog = site.catalog();
        let locations = site.locations().stats();

        let location_types = locations
            .by_type
            .iter()
            .map(|(kind, count)| TypeCount {
                label: kind.label().to_string(),
                count: *count,
            })
            .collect();

        let priorities = index
            .priority_histogram()
            .into_iter()
            .rev()
            .map(|(priority, count)| PriorityCount { priority, count })
            .collect();

        Self {
            site_name: site_name.to_string(),
            pages: index.count_by_type().into(),
            min_priority,
            sitemap_pages: index.with_min_priority(min_priority).len(),
            locations,
            location_types,
            services: catalog.services().len(),
            main_services: catalog.main_services().len(),
            brands: catalog.brands().len(),
            models: catalog.models().len(),
            popular_models: catalog.popular_models().len(),
            priorities,
            fingerprint: index.fingerprint(),
        }
    }

    /// One-line summary for terminal output
    pub fn summary(&self) -> String {
        format!(
            "{} pages ({} location, {} service-location, {} vehicle), {} in sitemap",
            self.pages.total,
            self.pages.location,
            self.pages.service_location,
            self.pages.vehicle,
            self.sitemap_pages
        )
    }
}
