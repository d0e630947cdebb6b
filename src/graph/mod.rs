// Lookup stores built once per build

pub mod catalog;
pub mod locations;

pub use catalog::CatalogStore;
pub use locations::{LocationGraph, LocationStats, MAX_DEPTH};
