// Content variation: seeded selection, phrase pools and page copy

pub mod pools;
pub mod prose;
pub mod variation;

pub use prose::{FaqEntry, PageCopy, ProseGenerator};
pub use variation::{pick, pick_distinct, pick_index, seed_hash, substitute, PageSeed, SeededStream};
