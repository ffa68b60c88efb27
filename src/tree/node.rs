use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::{SourceId, TrieIndex};
use crate::types::TypeRef;

use super::class_metadata::ClassMetadata;

/// Handle to a node stored in a [`SuggestionTree`](super::SuggestionTree).
///
/// Handles are generation-checked: once a node is pruned its handle stops
/// resolving, even if the slot is reused by a later insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub(super) fn new(index: usize, generation: u32) -> Self {
        Self {
            index: index as u32,
            generation,
        }
    }

    pub(super) fn index(self) -> usize {
        self.index as usize
    }

    pub(super) fn generation(self) -> u32 {
        self.generation
    }
}

/// Presentation category of a node, used for icons and documentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuggestionNodeType {
    Group,
    Property,
    Enum,
    Boolean,
}

/// Metadata declared for a group (a key prefix such as `server`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupData {
    pub type_ref: Option<TypeRef>,
    pub description: Option<String>,
    /// The type that declared this group, if known.
    pub source_type: Option<TypeRef>,
}

impl MergeData for GroupData {
    fn merge(&mut self, other: GroupData) {
        if self.type_ref.is_none() {
            self.type_ref = other.type_ref;
        }
        if self.description.is_none() {
            self.description = other.description;
        }
        if self.source_type.is_none() {
            self.source_type = other.source_type;
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeprecationLevel {
    #[default]
    Warning,
    Error,
}

/// Deprecation notice attached to a property.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deprecation {
    pub level: DeprecationLevel,
    pub reason: Option<String>,
    /// Key that replaces the deprecated one.
    pub replacement: Option<String>,
}

/// Metadata declared for a property (a complete key such as `server.port`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyData {
    pub type_ref: Option<TypeRef>,
    pub description: Option<String>,
    pub default_value: Option<String>,
    pub deprecation: Option<Deprecation>,
}

impl MergeData for PropertyData {
    fn merge(&mut self, other: PropertyData) {
        if self.type_ref.is_none() {
            self.type_ref = other.type_ref;
        }
        if self.description.is_none() {
            self.description = other.description;
        }
        if self.default_value.is_none() {
            self.default_value = other.default_value;
        }
        if self.deprecation.is_none() {
            self.deprecation = other.deprecation;
        }
    }
}

pub(super) trait MergeData: Clone + Default {
    /// Fill fields that are still unset from `other`.
    fn merge(&mut self, other: Self);
}

/// What each source declared for one node, in load order.
#[derive(Debug)]
pub(super) struct Declarations<T> {
    by_source: IndexMap<SourceId, T>,
}

impl<T> Default for Declarations<T> {
    fn default() -> Self {
        Self {
            by_source: IndexMap::new(),
        }
    }
}

impl<T: MergeData> Declarations<T> {
    /// Record `data` for `source`. A source declaring the same node twice
    /// fills gaps in its earlier declaration.
    pub(super) fn declare(&mut self, source: &SourceId, data: T) {
        match self.by_source.get_mut(source) {
            Some(existing) => existing.merge(data),
            None => {
                self.by_source.insert(source.clone(), data);
            }
        }
    }

    /// Forget what `source` declared. Returns false if it declared nothing.
    pub(super) fn retract(&mut self, source: &SourceId) -> bool {
        self.by_source.shift_remove(source).is_some()
    }

    /// Field-wise first declaration among the remaining sources.
    pub(super) fn effective(&self) -> T {
        self.by_source.values().cloned().fold(T::default(), |mut data, declared| {
            data.merge(declared);
            data
        })
    }
}

#[derive(Debug, Default)]
pub struct GroupNode {
    pub(super) data: GroupData,
    pub(super) declared: Declarations<GroupData>,
    pub(super) children: TrieIndex<NodeId>,
}

impl GroupNode {
    /// Effective data merged from every source that declared this group.
    pub fn data(&self) -> &GroupData {
        &self.data
    }

    pub fn children(&self) -> &TrieIndex<NodeId> {
        &self.children
    }

    pub(super) fn declare(&mut self, source: &SourceId, data: GroupData) {
        self.declared.declare(source, data);
        self.data = self.declared.effective();
    }

    pub(super) fn retract(&mut self, source: &SourceId) {
        if self.declared.retract(source) {
            self.data = self.declared.effective();
        }
    }
}

/// How a property's class leaf relates to the property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LeafRole {
    /// The property's value is one of the leaf's members.
    #[default]
    Values,
    /// The property is a map keyed by the leaf's type: members complete the
    /// next key segment (`app.palette.RED`), values are not suggested.
    MapKeys,
}

#[derive(Debug, Default)]
pub struct PropertyNode {
    pub(super) data: PropertyData,
    pub(super) declared: Declarations<PropertyData>,
    /// Leaf describing the property's referenced type, when that type's
    /// members are suggestible (enums, booleans).
    pub(super) class: Option<ClassMetadata>,
    pub(super) role: LeafRole,
}

impl PropertyNode {
    /// Effective data merged from every source that declared this property.
    pub fn data(&self) -> &PropertyData {
        &self.data
    }

    pub fn class(&self) -> Option<&ClassMetadata> {
        self.class.as_ref()
    }

    pub fn role(&self) -> LeafRole {
        self.role
    }

    /// The leaf whose members are this property's values.
    pub fn value_leaf(&self) -> Option<&ClassMetadata> {
        self.class.as_ref().filter(|_| self.role == LeafRole::Values)
    }

    /// The leaf whose members are keys one level below this property.
    pub fn key_leaf(&self) -> Option<&ClassMetadata> {
        self.class.as_ref().filter(|_| self.role == LeafRole::MapKeys)
    }

    pub fn is_deprecated(&self) -> bool {
        self.data.deprecation.is_some()
    }

    /// Record `data` for `source`. Returns true when the effective type
    /// changed and the class leaf must be rebound.
    pub(super) fn declare(&mut self, source: &SourceId, data: PropertyData) -> bool {
        self.declared.declare(source, data);
        self.refresh_data()
    }

    /// Forget what `source` declared, with the same return as
    /// [`declare`](Self::declare).
    pub(super) fn retract(&mut self, source: &SourceId) -> bool {
        self.declared.retract(source) && self.refresh_data()
    }

    fn refresh_data(&mut self) -> bool {
        let data = self.declared.effective();
        let type_changed = data.type_ref != self.data.type_ref;
        self.data = data;
        type_changed
    }
}

#[derive(Debug)]
pub enum NodeKind {
    Group(GroupNode),
    Property(PropertyNode),
}

/// One level of a configuration key.
#[derive(Debug)]
pub struct SuggestionNode {
    pub(super) original_name: SmolStr,
    pub(super) name: SmolStr,
    pub(super) parent: Option<NodeId>,
    pub(super) belongs_to: FxHashSet<SourceId>,
    pub(super) kind: NodeKind,
}

impl SuggestionNode {
    pub(super) fn new(original_name: &str, name: SmolStr, parent: Option<NodeId>, kind: NodeKind) -> Self {
        Self {
            original_name: SmolStr::from(original_name.trim()),
            name,
            parent,
            belongs_to: FxHashSet::default(),
            kind,
        }
    }

    /// Name as declared by the source.
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// Sanitized name, unique among siblings.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn belongs_to(&self) -> &FxHashSet<SourceId> {
        &self.belongs_to
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group(_))
    }

    pub fn is_property(&self) -> bool {
        matches!(self.kind, NodeKind::Property(_))
    }

    pub fn as_group(&self) -> Option<&GroupNode> {
        match &self.kind {
            NodeKind::Group(group) => Some(group),
            NodeKind::Property(_) => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertyNode> {
        match &self.kind {
            NodeKind::Property(property) => Some(property),
            NodeKind::Group(_) => None,
        }
    }

    pub fn has_children(&self) -> bool {
        self.as_group().is_some_and(|group| !group.children.is_empty())
    }

    pub fn has_only_one_child(&self) -> bool {
        self.as_group().is_some_and(|group| group.children.len() == 1)
    }

    pub fn supports_documentation(&self) -> bool {
        self.is_group() || self.is_property()
    }

    pub fn node_type(&self) -> SuggestionNodeType {
        match &self.kind {
            NodeKind::Group(_) => SuggestionNodeType::Group,
            NodeKind::Property(property) => property
                .value_leaf()
                .map_or(SuggestionNodeType::Property, ClassMetadata::node_type),
        }
    }

    /// The declared type of the node, if any.
    pub fn type_ref(&self) -> Option<&TypeRef> {
        match &self.kind {
            NodeKind::Group(group) => group.data.type_ref.as_ref(),
            NodeKind::Property(property) => property.data.type_ref.as_ref(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Group(group) => group.data.description.as_deref(),
            NodeKind::Property(property) => property.data.description.as_deref(),
        }
    }

    pub fn is_deprecated(&self) -> bool {
        self.as_property().is_some_and(PropertyNode::is_deprecated)
    }
}
