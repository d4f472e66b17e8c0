//! Test helpers
//!
//! In-memory stores with failure switches, a predictable id generator, breaking
//! upload sources and sample media bytes. No filesystem or database needed.

pub mod fixtures;
pub mod mock_stores;
pub mod sources;

pub use mock_stores::{MockMediaStore, MockPostStore, MockViewStore, SequentialIds};
pub use sources::{BrokenReader, BrokenSource};
