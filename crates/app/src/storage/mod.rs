//! Storage
//!
//! Concrete sources: in-memory stores for tests and embedding, and a YAML state
//! file that keeps baskets between CLI runs and can be shared by several
//! processes.

mod file;
mod latency;
mod memory;

pub use file::FileStore;
pub use memory::{MemoryBasketStore, StaticCatalog, StaticPromotions};
