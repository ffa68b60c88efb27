//! Leaf-class nodes.
//!
//! A property whose type can be introspected owns a [`ClassMetadata`] leaf.
//! Leaves are terminal for key navigation: they answer direct-child lookups
//! and value searches, and treat any attempt to descend through them or to
//! run a recursive key search on them as a caller bug.

use std::collections::BTreeSet;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::constants::{BOOLEAN_SHORT_NAME, BOOLEAN_TYPE_NAME, BOOLEAN_VALUES};
use crate::base::sanitize;
use crate::types::{TypeInfo, TypeKind, TypeMember, TypeRef, TypeResolver};

use super::enum_metadata::EnumClassMetadata;
use super::node::SuggestionNodeType;
use super::suggestion::{PathElement, Suggestion, SuggestionIcon};

const LEAF_DESCENT_MISUSE: &str =
    "class leaves cannot be descended into; use find_direct_child(..) for member keys";
const LEAF_KEY_SEARCH_MISUSE: &str =
    "class leaves do not support key search; use find_direct_children_for_query_prefix(..) or value search";

/// Leaf for `boolean` / `java.lang.Boolean` properties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BooleanClassMetadata;

impl BooleanClassMetadata {
    fn member(value: &str) -> TypeMember {
        TypeMember::constant(value)
    }

    fn type_info() -> TypeInfo {
        TypeInfo {
            qualified_name: Arc::from(BOOLEAN_TYPE_NAME),
            short_name: SmolStr::new_static(BOOLEAN_SHORT_NAME),
            documentation: None,
        }
    }

    fn find_direct_child(segment: &str) -> Option<TypeMember> {
        let key = sanitize(segment);
        BOOLEAN_VALUES
            .iter()
            .find(|value| **value == key.as_str())
            .map(|value| Self::member(value))
    }

    fn matching(prefix: &str) -> impl Iterator<Item = &'static str> {
        let key = sanitize(prefix);
        BOOLEAN_VALUES.into_iter().filter(move |value| value.starts_with(key.as_str()))
    }
}

/// A leaf whose members come from introspecting a referenced type.
#[derive(Debug)]
pub enum ClassMetadata {
    Enum(EnumClassMetadata),
    Boolean(BooleanClassMetadata),
}

impl ClassMetadata {
    /// Pick the leaf kind for a property type, if its members are suggestible.
    ///
    /// Enum leaves are only bound here; their constants are read on first use.
    pub fn for_type(type_ref: &TypeRef, resolver: &dyn TypeResolver) -> Option<Self> {
        match resolver.resolve(type_ref).map(|resolved| resolved.kind) {
            Some(TypeKind::Enum) => Some(ClassMetadata::Enum(EnumClassMetadata::new(type_ref.clone()))),
            Some(TypeKind::Boolean) => Some(ClassMetadata::Boolean(BooleanClassMetadata)),
            Some(TypeKind::Other) => None,
            // Primitive booleans have nothing to introspect.
            None if is_boolean_literal(type_ref) => Some(ClassMetadata::Boolean(BooleanClassMetadata)),
            None => None,
        }
    }

    /// Class leaves are always terminal.
    pub fn is_leaf(&self) -> bool {
        true
    }

    pub fn node_type(&self) -> SuggestionNodeType {
        match self {
            ClassMetadata::Enum(_) => SuggestionNodeType::Enum,
            ClassMetadata::Boolean(_) => SuggestionNodeType::Boolean,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumClassMetadata> {
        match self {
            ClassMetadata::Enum(leaf) => Some(leaf),
            ClassMetadata::Boolean(_) => None,
        }
    }

    /// Resolved identity of the leaf's type; `None` when unresolvable.
    pub fn type_info(&self, resolver: &dyn TypeResolver) -> Option<TypeInfo> {
        match self {
            ClassMetadata::Enum(leaf) => leaf.type_info(resolver),
            ClassMetadata::Boolean(_) => Some(BooleanClassMetadata::type_info()),
        }
    }

    /// Member named exactly `segment` (after sanitizing).
    pub fn find_direct_child(&self, resolver: &dyn TypeResolver, segment: &str) -> Option<TypeMember> {
        match self {
            ClassMetadata::Enum(leaf) => leaf.find_direct_child(resolver, segment),
            ClassMetadata::Boolean(_) => BooleanClassMetadata::find_direct_child(segment),
        }
    }

    /// Members whose name starts with `prefix`, for use as keys.
    pub fn find_direct_children_for_query_prefix(
        &self,
        resolver: &dyn TypeResolver,
        prefix: &str,
    ) -> Option<Vec<TypeMember>> {
        match self {
            ClassMetadata::Enum(leaf) => leaf.find_direct_children_for_query_prefix(resolver, prefix),
            ClassMetadata::Boolean(_) => {
                let members: Vec<_> = BooleanClassMetadata::matching(prefix)
                    .map(BooleanClassMetadata::member)
                    .collect();
                (!members.is_empty()).then_some(members)
            }
        }
    }

    /// Exact-path descent is never valid on a leaf.
    ///
    /// # Panics
    ///
    /// Always. Leaves only answer [`find_direct_child`](Self::find_direct_child).
    pub fn find_deepest_suggestion_node(
        &self,
        _matches_root_till_parent: &[PathElement],
        _path_segments: &[&str],
        _start: usize,
    ) -> Option<Vec<PathElement>> {
        panic!("{LEAF_DESCENT_MISUSE}")
    }

    /// Recursive key search is never valid on a leaf.
    ///
    /// # Panics
    ///
    /// Always. Leaves only answer member lookups and value searches.
    pub fn find_key_suggestions_for_query_prefix(
        &self,
        _matches_root_till_parent: &[PathElement],
        _query_segments: &[&str],
        _start: usize,
    ) -> Option<BTreeSet<Suggestion>> {
        panic!("{LEAF_KEY_SEARCH_MISUSE}")
    }

    /// Value suggestions for members matching `prefix`.
    ///
    /// `None` means the leaf cannot offer values (unresolvable type); an
    /// empty set means nothing matched.
    pub fn find_value_suggestions_for_prefix(
        &self,
        resolver: &dyn TypeResolver,
        matches_root_till_me: &[PathElement],
        prefix: &str,
    ) -> Option<BTreeSet<Suggestion>> {
        match self {
            ClassMetadata::Enum(leaf) => {
                leaf.find_value_suggestions_for_prefix(resolver, matches_root_till_me, prefix)
            }
            ClassMetadata::Boolean(_) => Some(
                BooleanClassMetadata::matching(prefix)
                    .map(|value| {
                        Suggestion::value(value, matches_root_till_me.to_vec(), SuggestionIcon::Value)
                            .with_short_type(Some(SmolStr::new_static(BOOLEAN_SHORT_NAME)))
                    })
                    .collect(),
            ),
        }
    }

    /// Member of this leaf named `value`, for value documentation.
    pub fn member(&self, resolver: &dyn TypeResolver, value: &str) -> Option<TypeMember> {
        self.find_direct_child(resolver, value)
    }

    /// Re-resolve the backing type during a reindex.
    pub fn refresh(&mut self, resolver: &dyn TypeResolver) {
        match self {
            ClassMetadata::Enum(leaf) => leaf.refresh(resolver),
            ClassMetadata::Boolean(_) => {}
        }
    }
}

fn is_boolean_literal(type_ref: &TypeRef) -> bool {
    matches!(type_ref.as_str(), "boolean" | BOOLEAN_TYPE_NAME)
}

/// Build the key suggestion for a leaf member used as a key below the
/// property at the end of `matches`.
pub(super) fn member_key_suggestion(
    leaf: &ClassMetadata,
    resolver: &dyn TypeResolver,
    parent_path: &str,
    matches: Vec<PathElement>,
    member: &TypeMember,
) -> Suggestion {
    let short_type = leaf.type_info(resolver).map(|info| info.short_name);
    Suggestion::key(format!("{parent_path}.{}", member.name), matches, SuggestionIcon::EnumMember)
        .with_ancestral_path(Some(Arc::from(parent_path)))
        .with_short_type(short_type)
        .with_description(member.documentation.clone())
}
