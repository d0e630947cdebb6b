// Internal link graph
//
// Builds breadcrumbs, child/sibling/nearby link sets and anchor-varied
// cross-links for a page. Whether a target page exists is always answered by
// the page index, never by re-evaluating tier rules here.

use crate::config::LinksConfig;
use crate::content::pools::ANCHOR_PATTERNS;
use crate::content::variation::{substitute, PageSeed};
use crate::data::{Location, Service};
use crate::graph::locations::by_priority;
use crate::graph::{CatalogStore, LocationGraph};
use crate::index::generator::{
    location_slug, service_location_slug, vehicle_slug, PageIndex, PageTarget, VEHICLE_PREFIX,
};
use crate::links::{Breadcrumb, Link, PageLinks};

/// Caps for each link set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkLimits {
    pub children: usize,
    pub siblings: usize,
    pub nearby: usize,
    pub cross_links: usize,
    pub vehicle_links: usize,
}

impl Default for LinkLimits {
    fn default() -> Self {
        Self::from(&LinksConfig::default())
    }
}

impl From<&LinksConfig> for LinkLimits {
    fn from(config: &LinksConfig) -> Self {
        Self {
            children: config.max_children,
            siblings: config.max_siblings,
            nearby: config.max_nearby,
            cross_links: config.max_cross_links,
            vehicle_links: config.max_vehicle_links,
        }
    }
}

/// Root-relative href of a page slug
pub fn href(slug: &str) -> String {
    format!("/{}", slug)
}

/// Builds the link sets of individual pages
pub struct LinkGraphBuilder<'a> {
    locations: &'a LocationGraph,
    catalog: &'a CatalogStore,
    index: &'a PageIndex,
    limits: LinkLimits,
    home_label: String,
}

impl<'a> LinkGraphBuilder<'a> {
    pub fn new(locations: &'a LocationGraph, catalog: &'a CatalogStore, index: &'a PageIndex) -> Self {
        Self {
            locations,
            catalog,
            index,
            limits: LinkLimits::default(),
            home_label: "Startseite".to_string(),
        }
    }

    pub fn with_limits(mut self, limits: LinkLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_home_label(mut self, label: &str) -> Self {
        self.home_label = label.to_string();
        self
    }

    /// All link sets for a page; `None` if its entities do not exist
    pub fn page_links(&self, target: &PageTarget) -> Option<PageLinks> {
        let breadcrumbs = self.breadcrumbs(target)?;

        let links = match target {
            PageTarget::Location { location } => {
                let location = self.locations.get(location)?;
                let from = location_slug(&location.slug);
                PageLinks {
                    breadcrumbs,
                    children: self.location_links(self.sorted_children(&location.slug)),
                    siblings: self.location_links(self.locations.siblings(&location.slug, self.limits.siblings)),
                    nearby: self.location_links(self.locations.nearest(&location.slug, self.limits.nearby)),
                    services: self.service_links(&from, location),
                    ..PageLinks::default()
                }
            }
            PageTarget::ServiceLocation { service, location } => {
                let service = self.catalog.service(service)?;
                let location = self.locations.get(location)?;
                let from = service_location_slug(&service.slug, &location.slug);
                PageLinks {
                    breadcrumbs,
                    children: self.same_service_links(&from, service, self.sorted_children(&location.slug)),
                    siblings: self.same_service_links(
                        &from,
                        service,
                        self.locations.siblings(&location.slug, self.limits.siblings),
                    ),
                    nearby: self.same_service_links(
                        &from,
                        service,
                        self.locations.nearest(&location.slug, self.limits.nearby),
                    ),
                    services: self.service_links(&from, location),
                    ..PageLinks::default()
                }
            }
            PageTarget::Vehicle { brand, model } => {
                self.catalog.model(brand, model)?;
                let from = vehicle_slug(brand, model);
                let (related, other) = self.model_links(brand, model);
                PageLinks {
                    breadcrumbs,
                    services: self.vehicle_service_links(&from),
                    related_models: related,
                    other_models: other,
                    ..PageLinks::default()
                }
            }
        };

        Some(links)
    }

    /// Home, then ancestors, then the page itself (unlinked)
    pub fn breadcrumbs(&self, target: &PageTarget) -> Option<Vec<Breadcrumb>> {
        let mut crumbs = vec![Breadcrumb::linked(&self.home_label, "/".to_string())];

        match target {
            PageTarget::Location { location } => {
                let location = self.locations.get(location)?;
                crumbs.extend(self.ancestor_crumbs(location));
                crumbs.push(Breadcrumb::current(&location.name));
            }
            PageTarget::ServiceLocation { service, location } => {
                let service = self.catalog.service(service)?;
                let location = self.locations.get(location)?;
                crumbs.extend(self.ancestor_crumbs(location));
                crumbs.push(self.crumb_for(&location.name, &location_slug(&location.slug)));
                crumbs.push(Breadcrumb::current(&format!("{} in {}", service.name, location.name)));
            }
            PageTarget::Vehicle { brand, model } => {
                let vehicle_brand = self.catalog.brand(brand)?;
                let vehicle_model = self.catalog.model(brand, model)?;
                // brands have no page of their own
                crumbs.push(Breadcrumb::text(&vehicle_brand.name));
                crumbs.push(Breadcrumb::current(&format!(
                    "{} {}",
                    vehicle_brand.name, vehicle_model.name
                )));
            }
        }

        Some(crumbs)
    }

    fn ancestor_crumbs(&self, location: &Location) -> Vec<Breadcrumb> {
        self.locations
            .ancestors(&location.slug)
            .into_iter()
            .map(|ancestor| self.crumb_for(&ancestor.name, &location_slug(&ancestor.slug)))
            .collect()
    }

    /// Linked when the page exists, plain text otherwise
    fn crumb_for(&self, label: &str, slug: &str) -> Breadcrumb {
        if self.index.contains(slug) {
            Breadcrumb::linked(label, href(slug))
        } else {
            Breadcrumb::text(label)
        }
    }

    fn sorted_children(&self, slug: &str) -> Vec<&'a Location> {
        let mut children = self.locations.children(slug);
        children.sort_by(|a, b| by_priority(a, b));
        children.truncate(self.limits.children);
        children
    }

    fn location_links(&self, locations: Vec<&Location>) -> Vec<Link> {
        locations
            .into_iter()
            .filter_map(|location| {
                let slug = location_slug(&location.slug);
                self.index
                    .contains(&slug)
                    .then(|| Link::new(&location.name, href(&slug)))
            })
            .collect()
    }

    /// Same service at other locations, falling back to the location page
    fn same_service_links(&self, from: &str, service: &Service, locations: Vec<&Location>) -> Vec<Link> {
        locations
            .into_iter()
            .filter_map(|location| {
                self.cross_link(from, service, location).or_else(|| {
                    let slug = location_slug(&location.slug);
                    self.index
                        .contains(&slug)
                        .then(|| Link::new(&location.name, href(&slug)))
                })
            })
            .collect()
    }

    /// Main-service pages for one location, excluding the current page
    fn service_links(&self, from: &str, location: &Location) -> Vec<Link> {
        self.catalog
            .main_services()
            .into_iter()
            .filter_map(|service| self.cross_link(from, service, location))
            .filter(|link| link.href != href(from))
            .take(self.limits.cross_links)
            .collect()
    }

    /// Pages of the vehicle-prefix service, in index order
    fn vehicle_service_links(&self, from: &str) -> Vec<Link> {
        let Some(service) = self.catalog.service(VEHICLE_PREFIX) else {
            return Vec::new();
        };

        self.index
            .iter()
            .filter_map(|entry| match &entry.target {
                PageTarget::ServiceLocation { service: s, location } if s == &service.slug => {
                    self.locations.get(location)
                }
                _ => None,
            })
            .filter_map(|location| self.cross_link(from, service, location))
            .take(self.limits.cross_links)
            .collect()
    }

    /// Popular sibling models as links, the rest as plain names
    fn model_links(&self, brand: &str, current: &str) -> (Vec<Link>, Vec<String>) {
        let Some(vehicle_brand) = self.catalog.brand(brand) else {
            return (Vec::new(), Vec::new());
        };

        let mut related = Vec::new();
        let mut other = Vec::new();
        for model in self.catalog.models_by_brand(brand) {
            if model.slug == current {
                continue;
            }
            let slug = vehicle_slug(brand, &model.slug);
            if self.index.contains(&slug) {
                if related.len() < self.limits.vehicle_links {
                    related.push(Link::new(
                        &format!("{} {}", vehicle_brand.name, model.name),
                        href(&slug),
                    ));
                }
            } else {
                other.push(format!("{} {}", vehicle_brand.name, model.name));
            }
        }
        (related, other)
    }

    /// Link to a service/location page with varied anchor text, if the page exists
    pub fn cross_link(&self, from: &str, service: &Service, location: &Location) -> Option<Link> {
        let slug = service_location_slug(&service.slug, &location.slug);
        if !self.index.contains(&slug) {
            return None;
        }
        let seed = PageSeed::new(format!("{}->{}", from, slug));
        Some(Link::new(&anchor_text(&seed, service, location), href(&slug)))
    }

    /// Every indexed page as a flat link list, in index order
    pub fn sitemap_links(&self) -> Vec<Link> {
        self.index
            .paths()
            .into_iter()
            .filter_map(|slug| {
                let entry = self.index.get(slug)?;
                Some(Link::new(&self.label(&entry.target)?, href(slug)))
            })
            .collect()
    }

    /// Plain label of a page target
    pub fn label(&self, target: &PageTarget) -> Option<String> {
        match target {
            PageTarget::Location { location } => {
                let location = self.locations.get(location)?;
                Some(format!("Autoglas {}", location.name))
            }
            PageTarget::ServiceLocation { service, location } => {
                let service = self.catalog.service(service)?;
                let location = self.locations.get(location)?;
                Some(format!("{} in {}", service.name, location.name))
            }
            PageTarget::Vehicle { brand, model } => {
                let vehicle_brand = self.catalog.brand(brand)?;
                let vehicle_model = self.catalog.model(brand, model)?;
                Some(format!("Scheibenwechsel {} {}", vehicle_brand.name, vehicle_model.name))
            }
        }
    }
}

/// Anchor text from a pattern and a service synonym, both seeded
pub fn anchor_text(seed: &PageSeed, service: &Service, location: &Location) -> String {
    let synonyms = service.synonyms();
    let name = if synonyms.is_empty() {
        service.slug.as_str()
    } else {
        *seed.pick(&synonyms, "anchor-synonym")
    };
    substitute(
        *seed.pick(ANCHOR_PATTERNS, "anchor-pattern"),
        &[("service", name), ("city", location.name.as_str())],
    )
}
