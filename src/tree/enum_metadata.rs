//! Leaf backed by an introspected enum type.
//!
//! The leaf is created as soon as tree construction learns that a property
//! refers to an enum, but its member index is only built the first time a
//! search or documentation request touches it. A reindex re-resolves the type
//! and moves the leaf to [`MemberState::Unresolvable`] if the type is gone.

use std::collections::BTreeSet;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use smol_str::SmolStr;
use tracing::{debug, trace, warn};

use crate::base::{TrieIndex, sanitize};
use crate::types::{TypeInfo, TypeMember, TypeRef, TypeResolver};

use super::suggestion::{PathElement, Suggestion, SuggestionIcon};

/// Constants of a resolved enum, keyed by sanitized name.
#[derive(Debug)]
pub struct MemberIndex {
    info: TypeInfo,
    /// Declaration order is preserved; the trie stores positions into it.
    lookup: IndexMap<SmolStr, TypeMember>,
    trie: TrieIndex<usize>,
}

impl MemberIndex {
    fn new(info: TypeInfo, members: impl IntoIterator<Item = TypeMember>) -> Self {
        let mut lookup = IndexMap::new();
        let mut trie = TrieIndex::new();
        for member in members {
            let key = sanitize(&member.name);
            let (position, _) = lookup.insert_full(key.clone(), member);
            trie.insert(key, position);
        }
        Self { info, lookup, trie }
    }

    pub fn info(&self) -> &TypeInfo {
        &self.info
    }

    pub fn get(&self, sanitized: &str) -> Option<&TypeMember> {
        self.lookup.get(sanitized)
    }

    /// Members whose sanitized name starts with `prefix`, sorted by that name.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a TypeMember> + 'a {
        self.trie
            .prefix_values(prefix)
            .filter_map(|&position| self.lookup.get_index(position).map(|(_, member)| member))
    }

    /// Members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = &TypeMember> {
        self.lookup.values()
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}

/// Lifecycle of an enum leaf's member index.
#[derive(Debug, Default)]
pub enum MemberState {
    /// Not yet asked to initialise.
    #[default]
    Uninitialized,
    Populated(MemberIndex),
    /// The type could not be resolved, is no longer an enum, or declares no
    /// instance constants. The leaf offers no values.
    Unresolvable,
}

impl MemberState {
    fn load(type_ref: &TypeRef, resolver: &dyn TypeResolver) -> Self {
        let Some(resolved) = resolver.resolve(type_ref) else {
            debug!("Enum type {} is unresolvable", type_ref);
            return MemberState::Unresolvable;
        };
        if !resolved.is_enum() {
            debug!("Type {} is no longer an enum", type_ref);
            return MemberState::Unresolvable;
        }

        let index = MemberIndex::new(resolved.info.clone(), resolved.instance_members().cloned());
        if index.is_empty() {
            return MemberState::Unresolvable;
        }
        trace!("Indexed {} constants of {}", index.len(), type_ref);
        MemberState::Populated(index)
    }
}

/// Leaf for a property whose values are the constants of an enum type.
#[derive(Debug)]
pub struct EnumClassMetadata {
    type_ref: TypeRef,
    state: RwLock<MemberState>,
}

impl EnumClassMetadata {
    /// Bind a leaf to `type_ref`. Members are resolved lazily.
    pub fn new(type_ref: TypeRef) -> Self {
        Self {
            type_ref,
            state: RwLock::new(MemberState::Uninitialized),
        }
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    /// Populate the member index if this leaf was never initialised.
    pub fn init(&self, resolver: &dyn TypeResolver) {
        if !matches!(*self.state.read(), MemberState::Uninitialized) {
            return;
        }
        let state = self.state.upgradable_read();
        // Another reader may have initialised it in between.
        if matches!(*state, MemberState::Uninitialized) {
            let mut state = RwLockUpgradableReadGuard::upgrade(state);
            *state = MemberState::load(&self.type_ref, resolver);
            debug!("Initialised enum leaf for {}", self.type_ref);
        }
    }

    /// Re-resolve the type, picking up edits or its removal.
    pub fn refresh(&mut self, resolver: &dyn TypeResolver) {
        let state = self.state.get_mut();
        let was_populated = matches!(state, MemberState::Populated(_));
        *state = MemberState::load(&self.type_ref, resolver);
        if was_populated && matches!(state, MemberState::Unresolvable) {
            warn!("Enum leaf for {} lost its type", self.type_ref);
        }
    }

    pub fn is_initialized(&self) -> bool {
        !matches!(*self.state.read(), MemberState::Uninitialized)
    }

    /// True once initialised with at least one constant.
    pub fn is_populated(&self) -> bool {
        matches!(*self.state.read(), MemberState::Populated(_))
    }

    pub fn is_leaf(&self) -> bool {
        true
    }

    /// Run `f` against the member index, initialising it first.
    /// Returns `None` when the type is unresolvable.
    pub fn with_members<T>(&self, resolver: &dyn TypeResolver, f: impl FnOnce(&MemberIndex) -> T) -> Option<T> {
        self.init(resolver);
        match &*self.state.read() {
            MemberState::Populated(index) => Some(f(index)),
            MemberState::Uninitialized | MemberState::Unresolvable => None,
        }
    }

    pub fn type_info(&self, resolver: &dyn TypeResolver) -> Option<TypeInfo> {
        self.with_members(resolver, |index| index.info.clone())
    }

    /// Look up one constant by its name as typed (sanitized before lookup).
    pub fn find_direct_child(&self, resolver: &dyn TypeResolver, segment: &str) -> Option<TypeMember> {
        let key = sanitize(segment);
        self.with_members(resolver, |index| index.get(&key).cloned())
            .flatten()
    }

    /// Constants whose name starts with `prefix`; `None` if nothing matches
    /// or the type is unresolvable.
    pub fn find_direct_children_for_query_prefix(
        &self,
        resolver: &dyn TypeResolver,
        prefix: &str,
    ) -> Option<Vec<TypeMember>> {
        let key = sanitize(prefix);
        self.with_members(resolver, |index| index.with_prefix(&key).cloned().collect::<Vec<_>>())
            .filter(|members| !members.is_empty())
    }

    /// Value suggestions for constants matching `prefix`.
    ///
    /// Returns `None` when the member index is unavailable and an empty set
    /// when the type resolved but nothing matches.
    pub fn find_value_suggestions_for_prefix(
        &self,
        resolver: &dyn TypeResolver,
        matches_root_till_me: &[PathElement],
        prefix: &str,
    ) -> Option<BTreeSet<Suggestion>> {
        let key = sanitize(prefix);
        self.with_members(resolver, |index| {
            index
                .with_prefix(&key)
                .map(|member| self.value_suggestion(index, matches_root_till_me, member))
                .collect()
        })
    }

    fn value_suggestion(&self, index: &MemberIndex, matches: &[PathElement], member: &TypeMember) -> Suggestion {
        Suggestion::value(Arc::clone(&member.name), matches.to_vec(), SuggestionIcon::EnumMember)
            .with_short_type(Some(index.info.short_name.clone()))
            .with_description(member.documentation.clone())
    }
}
