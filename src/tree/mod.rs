//! Suggestion tree: node model, membership tracking and search.
//!
//! ## Structure
//!
//! ```text
//! root (unnamed group)
//!   ├── server            Group      belongs_to {a.json, b.json}
//!   │     ├── port        Property   belongs_to {a.json}
//!   │     └── color       Property   belongs_to {b.json}
//!   │           └── (EnumClassMetadata: RED, GREEN, BLUE as values)
//!   └── logging           Group      belongs_to {a.json}
//! ```
//!
//! Groups own their children through a [`TrieIndex`](crate::base::TrieIndex)
//! keyed by sanitized name. Properties may own a class leaf whose members are
//! read from the [`TypeResolver`](crate::types::TypeResolver) on first use.
//! A leaf's members are the property's values, except for map properties
//! keyed by an enum, where they complete one more key segment.
//!
//! Every node remembers what each source declared for it; unloading a source
//! drops its declarations and recomputes the node's effective data.

mod class_metadata;
mod enum_metadata;
mod error;
mod node;
mod search;
mod suggestion;
mod suggestion_tree;

pub use class_metadata::{BooleanClassMetadata, ClassMetadata};
pub use enum_metadata::{EnumClassMetadata, MemberIndex, MemberState};
pub use error::TreeError;
pub use node::{
    Deprecation, DeprecationLevel, GroupData, GroupNode, LeafRole, NodeId, NodeKind,
    PropertyData, PropertyNode, SuggestionNode, SuggestionNodeType,
};
pub use search::SearchOptions;
pub use suggestion::{PathElement, Suggestion, SuggestionIcon, SuggestionKind};
pub use suggestion_tree::SuggestionTree;

#[cfg(test)]
mod tests;
