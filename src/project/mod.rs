//! Metadata sources and how they are applied to the tree.

mod loader;
mod metadata;

pub use loader::{LoadReport, load_into};
pub use metadata::{GroupEntry, MetadataSource, PropertyEntry};
