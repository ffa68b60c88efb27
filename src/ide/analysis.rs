//! SuggestionHost and Analysis: state ownership for completion queries.
//!
//! The `SuggestionHost` owns the tree and every loaded metadata source and
//! is the only way to mutate them. Queries go through an `Analysis` snapshot
//! borrowed from the host, so the borrow checker keeps loads, unloads and
//! reindexing from overlapping with reads.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = SuggestionHost::new(Arc::new(resolver));
//!
//! host.load_source(source);
//!
//! let analysis = host.analysis();
//! let keys = analysis.key_suggestions("server.p");
//! let docs = analysis.documentation(&keys[0]);
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::base::SourceId;
use crate::project::{LoadReport, MetadataSource, load_into};
use crate::tree::{NodeId, Suggestion, SuggestionTree, TreeError};
use crate::types::TypeResolver;

use super::{CompletionConfig, CompletionItem};

/// Owns all mutable state for suggestion queries.
pub struct SuggestionHost {
    tree: SuggestionTree,
    resolver: Arc<dyn TypeResolver>,
    sources: FxHashMap<SourceId, MetadataSource>,
    config: CompletionConfig,
}

impl SuggestionHost {
    pub fn new(resolver: Arc<dyn TypeResolver>) -> Self {
        Self {
            tree: SuggestionTree::new(),
            resolver,
            sources: FxHashMap::default(),
            config: CompletionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CompletionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CompletionConfig) {
        self.config = config;
    }

    /// Load `source` into the tree. A source that is already loaded is
    /// retracted first, so reloading is idempotent.
    pub fn load_source(&mut self, source: MetadataSource) -> LoadReport {
        let id = source.id().clone();
        if self.sources.contains_key(&id) {
            let pruned = self.tree.remove_source(&id);
            debug!("Reloading {} ({} nodes retracted)", id, pruned);
        }
        let report = load_into(&mut self.tree, &source, self.resolver.as_ref());
        self.tree.bind_unbound_classes(self.resolver.as_ref());
        self.sources.insert(id, source);
        report
    }

    /// Retract everything `id` contributed: nodes only it justified are
    /// pruned, shared nodes fall back to what the remaining sources declared.
    /// Returns the number of pruned nodes.
    pub fn unload_source(&mut self, id: &SourceId) -> Result<usize, TreeError> {
        if self.sources.remove(id).is_none() {
            return Err(TreeError::UnknownSource(id.clone()));
        }
        let pruned = self.tree.remove_source(id);
        self.tree.bind_unbound_classes(self.resolver.as_ref());
        debug!("Unloaded {} ({} nodes pruned)", id, pruned);
        Ok(pruned)
    }

    /// Re-resolve every class leaf against the resolver.
    ///
    /// Call after the types behind the resolver changed.
    pub fn reindex(&mut self) {
        self.tree.refresh_class_proxies(self.resolver.as_ref());
        debug!("Reindexed {} nodes from {} sources", self.tree.len(), self.sources.len());
    }

    pub fn has_source(&self, id: &SourceId) -> bool {
        self.sources.contains_key(id)
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn sources(&self) -> impl Iterator<Item = &MetadataSource> {
        self.sources.values()
    }

    pub fn tree(&self) -> &SuggestionTree {
        &self.tree
    }

    /// Get a consistent snapshot for querying.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis {
            tree: &self.tree,
            resolver: self.resolver.as_ref(),
            config: &self.config,
        }
    }
}

/// An immutable snapshot of the host state.
pub struct Analysis<'a> {
    tree: &'a SuggestionTree,
    resolver: &'a dyn TypeResolver,
    config: &'a CompletionConfig,
}

impl<'a> Analysis<'a> {
    /// Sorted key suggestions for a dot-delimited query.
    pub fn key_suggestions(&self, query: &str) -> Vec<Suggestion> {
        super::key_completions(self.tree, self.resolver, self.config, query)
    }

    /// Sorted value suggestions for the property at `key`.
    pub fn value_suggestions(&self, key: &str, prefix: &str) -> Option<Vec<Suggestion>> {
        super::value_completions(self.tree, self.resolver, self.config, key, prefix)
    }

    /// Key suggestions shaped for an editor.
    pub fn completions(&self, query: &str) -> Vec<CompletionItem> {
        self.key_suggestions(query)
            .iter()
            .map(CompletionItem::from_suggestion)
            .collect()
    }

    pub fn documentation(&self, suggestion: &Suggestion) -> Option<String> {
        super::documentation(self.tree, self.resolver, suggestion)
    }

    pub fn find_node(&self, key: &str) -> Option<NodeId> {
        self.tree.find_node(self.resolver, key)
    }

    pub fn tree(&self) -> &'a SuggestionTree {
        self.tree
    }
}
