//! Applying metadata sources to a suggestion tree.

use tracing::{debug, warn};

use crate::base::SourceId;
use crate::tree::{SuggestionTree, TreeError};
use crate::types::TypeResolver;

use super::metadata::MetadataSource;

/// Outcome of loading one source. Bad entries are skipped, not fatal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadReport {
    pub source: SourceId,
    pub groups: usize,
    pub properties: usize,
    pub errors: Vec<TreeError>,
}

impl LoadReport {
    fn new(source: SourceId) -> Self {
        Self {
            source,
            groups: 0,
            properties: 0,
            errors: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Entries that made it into the tree.
    pub fn loaded(&self) -> usize {
        self.groups + self.properties
    }
}

/// Add every entry of `source` to `tree`, collecting per-entry errors.
pub fn load_into(tree: &mut SuggestionTree, source: &MetadataSource, resolver: &dyn TypeResolver) -> LoadReport {
    let id = source.id();
    let mut report = LoadReport::new(id.clone());

    for group in source.groups() {
        match tree.add_group(&group.name, group.data.clone(), id) {
            Ok(_) => report.groups += 1,
            Err(e) => {
                warn!("Skipping group from {}: {}", id, e);
                report.errors.push(e);
            }
        }
    }

    for property in source.properties() {
        match tree.add_property(&property.name, property.data.clone(), id, resolver) {
            Ok(_) => report.properties += 1,
            Err(e) => {
                warn!("Skipping property from {}: {}", id, e);
                report.errors.push(e);
            }
        }
    }

    debug!(
        "Loaded {} groups and {} properties from {} ({} skipped)",
        report.groups,
        report.properties,
        id,
        report.errors.len()
    );
    report
}
