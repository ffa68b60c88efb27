//! Foundation types for the keyhint engine.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`SourceId`] - Identifies the metadata source that contributed a node
//! - [`TrieIndex`] - Sorted, prefix-searchable map used at every tree level
//! - [`sanitize`], [`split_key`] - Key normalisation
//! - Domain constants (key separator, documentation link scheme)
//!
//! This module has NO dependencies on other keyhint modules.

pub mod constants;
mod sanitize;
mod source;
mod trie;

pub use sanitize::{sanitize, split_key};
pub use source::SourceId;
pub use trie::TrieIndex;
