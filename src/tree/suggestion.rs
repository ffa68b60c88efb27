//! Suggestion records produced by the search engine.

use std::cmp::Ordering;
use std::sync::Arc;

use smol_str::SmolStr;

use super::node::{NodeId, SuggestionNodeType};

/// One element of the path from the root to a match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// A node of the suggestion tree.
    Node(NodeId),
    /// A member of a class leaf used as a key (e.g. an enum constant used
    /// as a map key). Holds the member's declared name.
    Member(Arc<str>),
}

/// Whether a suggestion completes a key or a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuggestionKind {
    Key,
    Value,
}

/// Presentation hint for a suggestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuggestionIcon {
    Group,
    Property,
    Enum,
    EnumMember,
    /// A boolean-typed property key.
    Boolean,
    /// A plain value such as `true`.
    Value,
}

impl SuggestionIcon {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            SuggestionIcon::Group => 9,       // Module
            SuggestionIcon::Property => 10,   // Property
            SuggestionIcon::Enum => 13,       // Enum
            SuggestionIcon::EnumMember => 20, // EnumMember
            SuggestionIcon::Boolean => 10,    // Property, LSP has no boolean kind
            SuggestionIcon::Value => 12,      // Value
        }
    }
}

impl From<SuggestionNodeType> for SuggestionIcon {
    fn from(node_type: SuggestionNodeType) -> Self {
        match node_type {
            SuggestionNodeType::Group => SuggestionIcon::Group,
            SuggestionNodeType::Property => SuggestionIcon::Property,
            SuggestionNodeType::Enum => SuggestionIcon::Enum,
            SuggestionNodeType::Boolean => SuggestionIcon::Boolean,
        }
    }
}

/// A completion candidate.
///
/// Suggestions compare, sort and deduplicate by `path_or_value` alone, which
/// gives completion lists a deterministic order.
#[derive(Clone, Debug)]
pub struct Suggestion {
    /// Dot-delimited original names from the root to the match's parent.
    pub ancestral_path: Option<Arc<str>>,
    /// The matched key path, or the value itself for value suggestions.
    pub path_or_value: Arc<str>,
    /// Path from the root (exclusive) to the match.
    pub matched: Vec<PathElement>,
    pub kind: SuggestionKind,
    /// Unqualified name of the type behind the suggestion.
    pub short_type: Option<SmolStr>,
    pub icon: SuggestionIcon,
    /// Description shown next to the suggestion.
    pub description: Option<Arc<str>>,
    pub deprecated: bool,
}

impl Suggestion {
    pub fn key(path: impl Into<Arc<str>>, matched: Vec<PathElement>, icon: SuggestionIcon) -> Self {
        Self {
            ancestral_path: None,
            path_or_value: path.into(),
            matched,
            kind: SuggestionKind::Key,
            short_type: None,
            icon,
            description: None,
            deprecated: false,
        }
    }

    pub fn value(value: impl Into<Arc<str>>, matched: Vec<PathElement>, icon: SuggestionIcon) -> Self {
        Self {
            kind: SuggestionKind::Value,
            ..Self::key(value, matched, icon)
        }
    }

    pub fn with_ancestral_path(mut self, path: Option<Arc<str>>) -> Self {
        self.ancestral_path = path;
        self
    }

    pub fn with_short_type(mut self, short_type: Option<SmolStr>) -> Self {
        self.short_type = short_type;
        self
    }

    pub fn with_description(mut self, description: Option<Arc<str>>) -> Self {
        self.description = description;
        self
    }

    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    pub fn is_value(&self) -> bool {
        self.kind == SuggestionKind::Value
    }

    /// The deepest tree node on the matched path.
    pub fn last_node(&self) -> Option<NodeId> {
        self.matched.iter().rev().find_map(|element| match element {
            PathElement::Node(id) => Some(*id),
            PathElement::Member(_) => None,
        })
    }
}

impl PartialEq for Suggestion {
    fn eq(&self, other: &Self) -> bool {
        self.path_or_value == other.path_or_value
    }
}

impl Eq for Suggestion {}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path_or_value.cmp(&other.path_or_value)
    }
}
