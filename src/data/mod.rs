// Source data: record types and the directory loader

pub mod loader;
pub mod model;

pub use loader::DataLoader;
pub use model::*;
