//! Completion entry points.

use std::sync::Arc;

use crate::base::split_key;
use crate::tree::{SearchOptions, Suggestion, SuggestionIcon, SuggestionTree};
use crate::types::TypeResolver;

/// Completion settings a host can tune.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletionConfig {
    pub navigate_deep_if_no_matches: bool,
    pub collapse_single_child_groups: bool,
    pub include_deprecated: bool,
    /// Truncate result lists (after sorting).
    pub max_results: Option<usize>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            navigate_deep_if_no_matches: true,
            collapse_single_child_groups: true,
            include_deprecated: true,
            max_results: None,
        }
    }
}

impl CompletionConfig {
    pub fn with_navigate_deep(mut self, enabled: bool) -> Self {
        self.navigate_deep_if_no_matches = enabled;
        self
    }

    pub fn with_collapse_single_child_groups(mut self, enabled: bool) -> Self {
        self.collapse_single_child_groups = enabled;
        self
    }

    pub fn with_deprecated(mut self, include: bool) -> Self {
        self.include_deprecated = include;
        self
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            navigate_deep_if_no_matches: self.navigate_deep_if_no_matches,
            collapse_single_child_groups: self.collapse_single_child_groups,
            include_deprecated: self.include_deprecated,
        }
    }

    fn truncate(&self, suggestions: impl IntoIterator<Item = Suggestion>) -> Vec<Suggestion> {
        let limit = self.max_results.unwrap_or(usize::MAX);
        suggestions.into_iter().take(limit).collect()
    }
}

/// A suggestion shaped for an editor completion list.
#[derive(Clone, Debug)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: Arc<str>,
    pub icon: SuggestionIcon,
    /// Short type name (shown after the label).
    pub detail: Option<Arc<str>>,
    /// Dotted path of the parent, shown as context.
    pub ancestral_path: Option<Arc<str>>,
    pub documentation: Option<Arc<str>>,
    pub deprecated: bool,
}

impl CompletionItem {
    pub fn new(label: impl Into<Arc<str>>, icon: SuggestionIcon) -> Self {
        Self {
            label: label.into(),
            icon,
            detail: None,
            ancestral_path: None,
            documentation: None,
            deprecated: false,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    pub fn from_suggestion(suggestion: &Suggestion) -> Self {
        let mut item = Self::new(Arc::clone(&suggestion.path_or_value), suggestion.icon);
        item.detail = suggestion.short_type.as_deref().map(Arc::from);
        item.ancestral_path = suggestion.ancestral_path.clone();
        item.documentation = suggestion.description.clone();
        item.deprecated = suggestion.deprecated;
        item
    }

    /// LSP `CompletionItemKind` number.
    pub fn kind_to_lsp(&self) -> u32 {
        self.icon.to_lsp()
    }
}

/// Key suggestions for a dot-delimited query typed from the root.
///
/// A trailing `.` asks for every child of the preceding key.
pub fn key_completions(
    tree: &SuggestionTree,
    resolver: &dyn TypeResolver,
    config: &CompletionConfig,
    query: &str,
) -> Vec<Suggestion> {
    let segments = split_key(query);
    let found = tree.find_key_suggestions_for_query_prefix(resolver, &config.search_options(), &segments);
    config.truncate(found)
}

/// Value suggestions for the property at `key`.
///
/// `None` when `key` is unknown, is not a property with suggestible values,
/// or its type no longer resolves.
pub fn value_completions(
    tree: &SuggestionTree,
    resolver: &dyn TypeResolver,
    config: &CompletionConfig,
    key: &str,
    prefix: &str,
) -> Option<Vec<Suggestion>> {
    let node = tree.find_node(resolver, key)?;
    if !tree.get(node)?.is_property() {
        return None;
    }
    let found = tree.find_value_suggestions_for_prefix(resolver, node, prefix.trim())?;
    Some(config.truncate(found))
}
