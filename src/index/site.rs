// Build context
//
// A `Site` owns the three read-only stores and the page index of one build.
// Everything downstream borrows from it; nothing mutates it after `build`.

use crate::config::LinksConfig;
use crate::content::ProseGenerator;
use crate::data::DataSet;
use crate::error::Result;
use crate::graph::{CatalogStore, LocationGraph};
use crate::index::generator::{PageIndex, PageIndexGenerator};
use crate::index::integrity::{self, Violation};
use crate::index::router::SlugRouter;
use crate::links::{LinkGraphBuilder, LinkLimits};
use once_cell::sync::OnceCell;
use tracing::{debug, info};

/// Validated stores plus the page index built from them
#[derive(Debug)]
pub struct Site {
    locations: LocationGraph,
    catalog: CatalogStore,
    index: PageIndex,
}

impl Site {
    /// Validate the data set and generate the page index.
    ///
    /// Fails with `Error::Integrity` listing every problem found, including
    /// page slugs derived by more than one tier and indexed slugs that route
    /// to a different page.
    pub fn build(data: DataSet) -> Result<Self> {
        let DataSet {
            locations,
            services,
            brands,
            models,
        } = data;

        let locations = LocationGraph::new(locations);
        let catalog = CatalogStore::new(services, brands, models);
        debug!(
            locations = locations.len(),
            services = catalog.services().len(),
            models = catalog.models().len(),
            "stores loaded"
        );

        integrity::validate(&locations, &catalog).into_result()?;

        let index = PageIndexGenerator::new(&locations, &catalog).generate();
        let mut collisions: Vec<Violation> = index
            .duplicate_slugs()
            .into_iter()
            .map(|slug| Violation::SlugCollision { slug: slug.to_string() })
            .collect();
        collisions.extend(route_mismatches(&index, &SlugRouter::new(&locations, &catalog)));
        integrity::IntegrityReport::new(collisions).into_result()?;

        info!(pages = index.len(), fingerprint = %index.fingerprint(), "site built");

        Ok(Self {
            locations,
            catalog,
            index,
        })
    }

    pub fn locations(&self) -> &LocationGraph {
        &self.locations
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn index(&self) -> &PageIndex {
        &self.index
    }

    pub fn router(&self) -> SlugRouter<'_> {
        SlugRouter::new(&self.locations, &self.catalog)
    }

    pub fn links(&self, config: &LinksConfig, home_label: &str) -> LinkGraphBuilder<'_> {
        LinkGraphBuilder::new(&self.locations, &self.catalog, &self.index)
            .with_limits(LinkLimits::from(config))
            .with_home_label(home_label)
    }

    pub fn prose(&self) -> ProseGenerator<'_> {
        ProseGenerator::new(&self.locations)
    }

    /// Static path list for pre-rendering
    pub fn paths(&self) -> Vec<&str> {
        self.index.paths()
    }
}

/// Indexed slugs the router sends somewhere other than their own page
fn route_mismatches(index: &PageIndex, router: &SlugRouter<'_>) -> Vec<Violation> {
    index
        .iter()
        .filter_map(|entry| {
            let routed = router.resolve_entities(&entry.slug);
            if routed.map(|page| page.target()).as_ref() == Some(&entry.target) {
                return None;
            }
            Some(Violation::RouteMismatch {
                slug: entry.slug.clone(),
                indexed: entry.page_type,
                routed: routed.map(|page| page.page_type()),
            })
        })
        .collect()
}

/// A site built at most once per process
#[derive(Debug, Default)]
pub struct SharedSite {
    cell: OnceCell<Site>,
}

impl SharedSite {
    pub const fn new() -> Self {
        Self { cell: OnceCell::new() }
    }

    /// The site, if it has been built
    pub fn get(&self) -> Option<&Site> {
        self.cell.get()
    }

    /// Build on first use. Concurrent callers wait for the one build; a
    /// failed build leaves the cell empty so a later call can retry.
    pub fn get_or_try_build<F>(&self, load: F) -> Result<&Site>
    where
        F: FnOnce() -> Result<DataSet>,
    {
        self.cell.get_or_try_init(|| Site::build(load()?))
    }
}
