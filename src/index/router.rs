// Slug routing
//
// Inverse of the index slug derivation. Incoming slugs are untrusted and may
// be ambiguous, so resolution follows one fixed precedence:
//
// 1. `autoglas-{location}` -> location page
// 2. `scheibenwechsel-{brand}-{model}` -> vehicle page, trying the longest
//    matching brand slug first; if no brand/model pair resolves, the whole
//    remainder is tried as a location under the `scheibenwechsel` service
// 3. `{service}-{location}` for each service in catalog order, first hit wins
// 4. anything else is not found
//
// Every step is bounded by the number of brands and services.

use crate::data::{Location, Service, VehicleBrand, VehicleModel};
use crate::error::{Error, Result};
use crate::graph::{CatalogStore, LocationGraph};
use crate::index::generator::{PageTarget, PageType, LOCATION_PREFIX, VEHICLE_PREFIX};
use tracing::trace;

/// Longest slug accepted from outside
pub const MAX_SLUG_LEN: usize = 200;

/// A resolved route with borrowed entities
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedPage<'a> {
    Location {
        location: &'a Location,
    },
    ServiceLocation {
        service: &'a Service,
        location: &'a Location,
    },
    Vehicle {
        brand: &'a VehicleBrand,
        model: &'a VehicleModel,
    },
}

impl<'a> ResolvedPage<'a> {
    pub fn page_type(&self) -> PageType {
        match self {
            ResolvedPage::Location { .. } => PageType::Location,
            ResolvedPage::ServiceLocation { .. } => PageType::ServiceLocation,
            ResolvedPage::Vehicle { .. } => PageType::Vehicle,
        }
    }

    /// Owned slug references
    pub fn target(&self) -> PageTarget {
        match self {
            ResolvedPage::Location { location } => PageTarget::location(&location.slug),
            ResolvedPage::ServiceLocation { service, location } => {
                PageTarget::service_location(&service.slug, &location.slug)
            }
            ResolvedPage::Vehicle { brand, model } => PageTarget::vehicle(&brand.slug, &model.slug),
        }
    }
}

/// Parses incoming slugs into page targets
pub struct SlugRouter<'a> {
    locations: &'a LocationGraph,
    catalog: &'a CatalogStore,
    /// Brands sorted by slug length descending, then slug
    brands_longest_first: Vec<&'a VehicleBrand>,
}

impl<'a> SlugRouter<'a> {
    pub fn new(locations: &'a LocationGraph, catalog: &'a CatalogStore) -> Self {
        let mut brands_longest_first: Vec<&VehicleBrand> = catalog.brands().iter().collect();
        brands_longest_first.sort_by(|a, b| b.slug.len().cmp(&a.slug.len()).then_with(|| a.slug.cmp(&b.slug)));

        Self {
            locations,
            catalog,
            brands_longest_first,
        }
    }

    /// Resolve a slug to a page target; `None` means not found
    pub fn resolve(&self, slug: &str) -> Option<PageTarget> {
        self.resolve_entities(slug).map(|page| page.target())
    }

    /// Resolve a slug, escalating a miss to `Error::NotFound`
    pub fn require(&self, slug: &str) -> Result<ResolvedPage<'a>> {
        self.resolve_entities(slug).ok_or_else(|| Error::not_found(slug))
    }

    /// Resolve a slug to borrowed entities
    pub fn resolve_entities(&self, slug: &str) -> Option<ResolvedPage<'a>> {
        let slug = normalize(slug)?;

        let resolved = self
            .match_location(slug)
            .or_else(|| self.match_vehicle_prefix(slug))
            .or_else(|| self.match_service_location(slug));

        trace!(slug, found = resolved.is_some(), "slug resolved");
        resolved
    }

    fn match_location(&self, slug: &str) -> Option<ResolvedPage<'a>> {
        let rest = strip_prefix(slug, LOCATION_PREFIX)?;
        let location = self.locations.get(rest)?;
        Some(ResolvedPage::Location { location })
    }

    fn match_vehicle_prefix(&self, slug: &str) -> Option<ResolvedPage<'a>> {
        let rest = strip_prefix(slug, VEHICLE_PREFIX)?;

        for &brand in &self.brands_longest_first {
            let Some(model_slug) = strip_prefix(rest, &brand.slug) else {
                continue;
            };
            if let Some(model) = self.catalog.model(&brand.slug, model_slug) {
                return Some(ResolvedPage::Vehicle { brand, model });
            }
        }

        // No brand/model pair: the prefix doubles as a service slug
        let service = self.catalog.service(VEHICLE_PREFIX)?;
        let location = self.locations.get(rest)?;
        Some(ResolvedPage::ServiceLocation { service, location })
    }

    fn match_service_location(&self, slug: &str) -> Option<ResolvedPage<'a>> {
        let locations = self.locations;
        self.catalog.services().iter().find_map(|service| {
            let rest = strip_prefix(slug, &service.slug)?;
            let location = locations.get(rest)?;
            Some(ResolvedPage::ServiceLocation { service, location })
        })
    }
}

/// Strip `{prefix}-`, requiring a non-empty remainder
fn strip_prefix<'s>(slug: &'s str, prefix: &str) -> Option<&'s str> {
    let rest = slug.strip_prefix(prefix)?.strip_prefix('-')?;
    (!rest.is_empty()).then_some(rest)
}

/// Trim slashes and whitespace; reject anything outside `[a-z0-9-]`
fn normalize(slug: &str) -> Option<&str> {
    let slug = slug.trim().trim_matches('/');
    let valid = !slug.is_empty()
        && slug.len() <= MAX_SLUG_LEN
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    valid.then_some(slug)
}
