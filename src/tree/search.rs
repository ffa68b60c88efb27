//! Search over the suggestion tree.
//!
//! Three traversals share the tree:
//! - exact descent ([`SuggestionTree::find_deepest_node`]), used for
//!   navigation and to locate the node a value is being typed for
//! - key search ([`SuggestionTree::find_key_suggestions`]): exact match on
//!   every query segment but the last, prefix match on the last
//! - value search ([`SuggestionTree::find_value_suggestions_for_prefix`]),
//!   answered by the class leaf of a property

use std::collections::BTreeSet;
use std::sync::Arc;

use smol_str::SmolStr;
use tracing::trace;

use crate::base::sanitize;
use crate::types::TypeResolver;

use super::class_metadata::member_key_suggestion;
use super::node::{GroupNode, NodeId, NodeKind, PropertyNode, SuggestionNode};
use super::suggestion::{PathElement, Suggestion, SuggestionIcon};
use super::suggestion_tree::SuggestionTree;

/// Knobs for key search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    /// When a level has no match for the typed segment, look one level
    /// further down (so `port` finds `server.port`).
    pub navigate_deep_if_no_matches: bool,
    /// Suggest the end of a single-child group chain instead of the group.
    pub collapse_single_child_groups: bool,
    pub include_deprecated: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            navigate_deep_if_no_matches: true,
            collapse_single_child_groups: true,
            include_deprecated: true,
        }
    }
}

impl SuggestionTree {
    /// Follow `segments[start..]` down from `from`, one exact (sanitized)
    /// match per level.
    ///
    /// With `match_all`, returns the node of the last segment only if every
    /// segment matched. Otherwise returns the deepest node reached, which is
    /// `from` itself when nothing matched.
    ///
    /// A property ends the descent. Only a map property keyed by an enum may
    /// match one more segment (one of the enum's constants); a property whose
    /// value is an enum or a boolean matches nothing below itself.
    pub fn find_deepest_node(
        &self,
        resolver: &dyn TypeResolver,
        from: NodeId,
        segments: &[&str],
        start: usize,
        match_all: bool,
    ) -> Option<NodeId> {
        let mut current = from;
        let mut index = start;

        while index < segments.len() {
            let node = self.get(current)?;
            let segment = segments[index];
            match &node.kind {
                NodeKind::Group(group) => match group.children.get(sanitize(segment).as_str()) {
                    Some(&child) => {
                        current = child;
                        index += 1;
                    }
                    None => return (!match_all).then_some(current),
                },
                NodeKind::Property(property) => {
                    let is_last = index + 1 == segments.len();
                    let leaf_matched = property
                        .key_leaf()
                        .is_some_and(|class| class.find_direct_child(resolver, segment).is_some());
                    if is_last && leaf_matched {
                        return Some(current);
                    }
                    return (!match_all).then_some(current);
                }
            }
        }

        Some(current)
    }

    /// Exact lookup of a dot-delimited key from the root.
    pub fn find_node(&self, resolver: &dyn TypeResolver, key: &str) -> Option<NodeId> {
        let segments = crate::base::split_key(key);
        self.find_deepest_node(resolver, self.root(), &segments, 0, true)
            .filter(|&id| id != self.root())
    }

    /// Key suggestions below `from` for the query `segments[start..]`.
    ///
    /// Returns `None` when nothing matched at any level.
    pub fn find_key_suggestions(
        &self,
        resolver: &dyn TypeResolver,
        options: &SearchOptions,
        from: NodeId,
        segments: &[&str],
        start: usize,
    ) -> Option<BTreeSet<Suggestion>> {
        if start >= segments.len() {
            return None;
        }
        let search = KeySearch {
            tree: self,
            resolver,
            options,
            segments: segments.iter().map(|segment| sanitize(segment)).collect(),
        };
        let mut matches = self.path_to(from);
        search.at_node(from, &mut matches, start, options.navigate_deep_if_no_matches)
    }

    /// Key suggestions for a whole query typed from the root.
    pub fn find_key_suggestions_for_query_prefix(
        &self,
        resolver: &dyn TypeResolver,
        options: &SearchOptions,
        query_segments: &[&str],
    ) -> BTreeSet<Suggestion> {
        self.find_key_suggestions(resolver, options, self.root(), query_segments, 0)
            .unwrap_or_default()
    }

    /// Value suggestions for the property `node`.
    ///
    /// `None` when the node has no value leaf (map properties included) or
    /// the leaf's type is unresolvable; an empty set when the leaf has values
    /// but none match.
    pub fn find_value_suggestions_for_prefix(
        &self,
        resolver: &dyn TypeResolver,
        node: NodeId,
        prefix: &str,
    ) -> Option<BTreeSet<Suggestion>> {
        let class = self.get(node)?.as_property()?.value_leaf()?;
        class.find_value_suggestions_for_prefix(resolver, &self.path_to(node), prefix)
    }
}

struct KeySearch<'a> {
    tree: &'a SuggestionTree,
    resolver: &'a dyn TypeResolver,
    options: &'a SearchOptions,
    /// Sanitized query segments.
    segments: Vec<SmolStr>,
}

impl KeySearch<'_> {
    fn at_node(
        &self,
        node: NodeId,
        matches: &mut Vec<PathElement>,
        index: usize,
        navigate_deep: bool,
    ) -> Option<BTreeSet<Suggestion>> {
        match &self.tree.get(node)?.kind {
            NodeKind::Group(group) => self.in_group(group, matches, index, navigate_deep),
            NodeKind::Property(property) => self.below_property(property, matches, index),
        }
    }

    fn in_group(
        &self,
        group: &GroupNode,
        matches: &mut Vec<PathElement>,
        index: usize,
        navigate_deep: bool,
    ) -> Option<BTreeSet<Suggestion>> {
        let segment = self.segments[index].as_str();
        let is_last = index + 1 == self.segments.len();
        let mut found: Option<BTreeSet<Suggestion>> = None;

        if is_last {
            for &child in group.children.prefix_values(segment) {
                if let Some(suggestion) = self.suggestion_for(child, matches) {
                    found.get_or_insert_with(BTreeSet::new).insert(suggestion);
                }
            }
        } else if let Some(&child) = group.children.get(segment) {
            matches.push(PathElement::Node(child));
            found = self.at_node(child, matches, index + 1, self.options.navigate_deep_if_no_matches);
            matches.pop();
        }

        if navigate_deep && found.as_ref().is_none_or(BTreeSet::is_empty) {
            trace!("No match for '{}' at depth {}, looking one level down", segment, matches.len());
            for child in group.children.values().copied() {
                if !self.tree.get(child).is_some_and(SuggestionNode::is_group) {
                    continue;
                }
                matches.push(PathElement::Node(child));
                // Never navigate deeper twice for the same segment.
                if let Some(deeper) = self.at_node(child, matches, index, false) {
                    found.get_or_insert_with(BTreeSet::new).extend(deeper);
                }
                matches.pop();
            }
        }

        found
    }

    /// Remaining segments below a property can only name enum constants of
    /// a map-keyed property, and only one level deep.
    fn below_property(
        &self,
        property: &PropertyNode,
        matches: &mut Vec<PathElement>,
        index: usize,
    ) -> Option<BTreeSet<Suggestion>> {
        if index + 1 != self.segments.len() {
            return None;
        }
        let class = property.key_leaf()?;
        let members = class.find_direct_children_for_query_prefix(self.resolver, &self.segments[index])?;

        let parent_path = self.tree.dotted_original_names(matches);
        Some(
            members
                .iter()
                .map(|member| {
                    let mut path = matches.clone();
                    path.push(PathElement::Member(Arc::clone(&member.name)));
                    member_key_suggestion(class, self.resolver, &parent_path, path, member)
                })
                .collect(),
        )
    }

    /// Suggestion for a matched child, following single-child group chains.
    fn suggestion_for(&self, child: NodeId, matches: &mut Vec<PathElement>) -> Option<Suggestion> {
        let depth = matches.len();
        let mut current = child;
        matches.push(PathElement::Node(current));

        if self.options.collapse_single_child_groups {
            loop {
                let only = match self.tree.get(current) {
                    Some(node) if node.has_only_one_child() => self.tree.children(current).next(),
                    _ => None,
                };
                let Some(only) = only else { break };
                current = only;
                matches.push(PathElement::Node(current));
            }
        }

        let suggestion = self.key_suggestion(current, matches);
        matches.truncate(depth);
        suggestion
    }

    fn key_suggestion(&self, id: NodeId, matches: &[PathElement]) -> Option<Suggestion> {
        let node = self.tree.get(id)?;
        if node.is_deprecated() && !self.options.include_deprecated {
            return None;
        }

        let ancestral_path = match matches.split_last() {
            Some((_, parents)) if !parents.is_empty() => {
                Some(Arc::from(self.tree.dotted_original_names(parents)))
            }
            _ => None,
        };

        Some(
            Suggestion::key(
                self.tree.dotted_original_names(matches),
                matches.to_vec(),
                SuggestionIcon::from(node.node_type()),
            )
            .with_ancestral_path(ancestral_path)
            .with_short_type(self.short_type(node))
            .with_description(node.description().map(Arc::from))
            .with_deprecated(node.is_deprecated()),
        )
    }

    fn short_type(&self, node: &SuggestionNode) -> Option<SmolStr> {
        let resolved = node
            .as_property()
            .and_then(PropertyNode::value_leaf)
            .and_then(|class| class.type_info(self.resolver))
            .map(|info| info.short_name);
        resolved.or_else(|| node.type_ref().map(|type_ref| type_ref.simple_name().into()))
    }
}
