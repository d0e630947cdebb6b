// Page index: integrity checks, tier generation, slug routing and the build context

pub mod generator;
pub mod integrity;
pub mod router;
pub mod site;

pub use generator::{
    PageIndex, PageIndexEntry, PageIndexGenerator, PageTarget, PageType, TierCounts,
};
pub use integrity::{IntegrityReport, Violation};
pub use router::{ResolvedPage, SlugRouter};
pub use site::{SharedSite, Site};
