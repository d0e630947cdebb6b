// Foreign-reference validation
//
// Runs once before index generation. Every problem is collected so a broken
// data set is reported in one pass; any violation aborts the build.

use crate::error::{Error, Result};
use crate::graph::{CatalogStore, LocationGraph, MAX_DEPTH};
use crate::index::generator::PageType;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Lowest and highest allowed location priority
pub const PRIORITY_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// One broken invariant in the source data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Violation {
    DuplicateLocation { slug: String },
    DanglingParent { slug: String, parent: String },
    ParentCycle { slug: String },
    TooDeep { slug: String, levels: usize },
    PriorityOutOfRange { slug: String, priority: u8 },
    DuplicateService { slug: String },
    DuplicateBrand { slug: String },
    DanglingBrand { model: String, brand: String },
    DuplicateModel { brand: String, model: String },
    SlugCollision { slug: String },
    RouteMismatch {
        slug: String,
        indexed: PageType,
        routed: Option<PageType>,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DuplicateLocation { slug } => write!(f, "duplicate location slug '{}'", slug),
            Violation::DanglingParent { slug, parent } => {
                write!(f, "location '{}' has unknown parent '{}'", slug, parent)
            }
            Violation::ParentCycle { slug } => write!(f, "location '{}' is its own ancestor", slug),
            Violation::TooDeep { slug, levels } => write!(
                f,
                "location '{}' sits {} levels deep (max {})",
                slug, levels, MAX_DEPTH
            ),
            Violation::PriorityOutOfRange { slug, priority } => {
                write!(f, "location '{}' has priority {} outside 1-10", slug, priority)
            }
            Violation::DuplicateService { slug } => write!(f, "duplicate service slug '{}'", slug),
            Violation::DuplicateBrand { slug } => write!(f, "duplicate brand slug '{}'", slug),
            Violation::DanglingBrand { model, brand } => {
                write!(f, "model '{}' references unknown brand '{}'", model, brand)
            }
            Violation::DuplicateModel { brand, model } => {
                write!(f, "duplicate model '{}' for brand '{}'", model, brand)
            }
            Violation::SlugCollision { slug } => {
                write!(f, "page slug '{}' is derived more than once", slug)
            }
            Violation::RouteMismatch { slug, indexed, routed } => match routed {
                Some(routed) => write!(
                    f,
                    "page slug '{}' is indexed as {} but routes to another {} page",
                    slug, indexed, routed
                ),
                None => write!(f, "page slug '{}' is indexed as {} but does not route", slug, indexed),
            },
        }
    }
}

/// All violations found in one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    violations: Vec<Violation>,
}

impl IntegrityReport {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn extend(&mut self, more: impl IntoIterator<Item = Violation>) {
        self.violations.extend(more);
    }

    /// `Ok` when clean, otherwise `Error::Integrity`
    pub fn into_result(self) -> Result<()> {
        if self.is_clean() {
            Ok(())
        } else {
            Err(Error::Integrity(self))
        }
    }
}

impl fmt::Display for IntegrityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SHOWN: usize = 5;

        write!(f, "{} problem(s)", self.violations.len())?;
        for (i, violation) in self.violations.iter().take(SHOWN).enumerate() {
            write!(f, "{} {}", if i == 0 { ":" } else { ";" }, violation)?;
        }
        if self.violations.len() > SHOWN {
            write!(f, "; and {} more", self.violations.len() - SHOWN)?;
        }
        Ok(())
    }
}

/// Validate every foreign reference in the stores
pub fn validate(locations: &LocationGraph, catalog: &CatalogStore) -> IntegrityReport {
    let mut report = IntegrityReport::default();
    report.extend(check_locations(locations));
    report.extend(check_catalog(catalog));
    report
}

fn check_locations(graph: &LocationGraph) -> Vec<Violation> {
    let mut violations: Vec<Violation> = graph
        .duplicates()
        .iter()
        .map(|slug| Violation::DuplicateLocation { slug: slug.clone() })
        .collect();

    for location in graph.all() {
        if !PRIORITY_RANGE.contains(&location.priority) {
            violations.push(Violation::PriorityOutOfRange {
                slug: location.slug.clone(),
                priority: location.priority,
            });
        }

        if let Some(parent) = &location.parent_slug {
            if !graph.contains(parent) {
                violations.push(Violation::DanglingParent {
                    slug: location.slug.clone(),
                    parent: parent.clone(),
                });
            }
        }

        match chain_levels(graph, &location.slug) {
            Chain::Cycle => violations.push(Violation::ParentCycle {
                slug: location.slug.clone(),
            }),
            Chain::Levels(levels) if levels > MAX_DEPTH => violations.push(Violation::TooDeep {
                slug: location.slug.clone(),
                levels,
            }),
            Chain::Levels(_) => {}
        }
    }

    violations
}

enum Chain {
    Levels(usize),
    Cycle,
}

/// Walk the full parent chain without a depth cap. Only a chain that
/// returns to its start counts as a cycle; a chain that runs into some
/// other cycle is reported at the members of that cycle.
fn chain_levels(graph: &LocationGraph, slug: &str) -> Chain {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut current = slug;
    let mut levels = 1;

    seen.insert(current);
    while let Some(parent) = graph.get(current).and_then(|l| l.parent_slug.as_deref()) {
        if parent == slug {
            return Chain::Cycle;
        }
        if !seen.insert(parent) || !graph.contains(parent) {
            break;
        }
        levels += 1;
        current = parent;
    }

    Chain::Levels(levels)
}

fn check_catalog(catalog: &CatalogStore) -> Vec<Violation> {
    let mut violations: Vec<Violation> = catalog
        .duplicate_services()
        .into_iter()
        .map(|slug| Violation::DuplicateService { slug: slug.to_string() })
        .collect();

    violations.extend(
        catalog
            .duplicate_brands()
            .into_iter()
            .map(|slug| Violation::DuplicateBrand { slug: slug.to_string() }),
    );

    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut reported: HashSet<(&str, &str)> = HashSet::new();
    for model in catalog.models() {
        if catalog.brand(&model.brand_slug).is_none() {
            violations.push(Violation::DanglingBrand {
                model: model.slug.clone(),
                brand: model.brand_slug.clone(),
            });
        }

        let key = (model.brand_slug.as_str(), model.slug.as_str());
        if !seen.insert(key) && reported.insert(key) {
            violations.push(Violation::DuplicateModel {
                brand: model.brand_slug.clone(),
                model: model.slug.clone(),
            });
        }
    }

    violations
}
