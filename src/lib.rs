//! # keyhint-base
//!
//! Core library for configuration-key completion: a suggestion tree built
//! from declared metadata, prefix search across its levels, and inline
//! documentation.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Host/snapshot, completion entry points, documentation
//!   ↓
//! project   → Metadata sources and loading them into the tree
//!   ↓
//! tree      → Node arena, membership cascade, class leaves, search
//!   ↓
//! types     → TypeResolver capability, in-memory resolver
//!   ↓
//! base      → Primitives (SourceId, TrieIndex, key sanitizing)
//! ```

// ============================================================================
// MODULES (dependency order: base → types → tree → project → ide)
// ============================================================================

/// Foundation types: SourceId, TrieIndex, key sanitizing
pub mod base;

/// Type introspection capability consumed by class leaves
pub mod types;

/// Suggestion tree: nodes, membership cascade, search
pub mod tree;

/// Metadata sources and the loader
pub mod project;

/// Completion, documentation and the query host
pub mod ide;

// Re-export foundation types
pub use base::{SourceId, TrieIndex, sanitize, split_key};

pub use ide::{Analysis, CompletionConfig, SuggestionHost};
pub use project::{LoadReport, MetadataSource, PropertyEntry};
pub use tree::{Suggestion, SuggestionTree, TreeError};
pub use types::{StaticTypeResolver, TypeRef, TypeResolver};
