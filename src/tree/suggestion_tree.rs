//! Arena-backed suggestion tree.
//!
//! Nodes live in a single slot vector and refer to each other through
//! generation-checked [`NodeId`] handles: children are owned by their
//! group's trie, the parent link is a plain handle. Pruned slots are reused,
//! bumping their generation so stale handles stop resolving.

use tracing::{debug, trace};

use crate::base::{SourceId, sanitize, split_key};
use crate::base::constants::KEY_SEPARATOR;
use crate::types::TypeResolver;

use super::class_metadata::ClassMetadata;
use super::error::TreeError;
use super::node::{
    GroupData, GroupNode, LeafRole, NodeId, NodeKind, PropertyData, PropertyNode, SuggestionNode,
};
use super::suggestion::PathElement;

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<SuggestionNode>,
}

/// Tree of configuration key segments.
///
/// The root is an unnamed group that belongs to no source and is never
/// pruned. Every other reachable node belongs to at least one source, and a
/// parent's sources are a superset of each child's.
#[derive(Debug)]
pub struct SuggestionTree {
    slots: Vec<Slot>,
    free: Vec<usize>,
    /// Live nodes, root excluded.
    len: usize,
}

impl Default for SuggestionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionTree {
    /// Create a tree holding only the root.
    pub fn new() -> Self {
        let root = SuggestionNode::new("", "".into(), None, NodeKind::Group(GroupNode::default()));
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(root),
            }],
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::new(0, 0)
    }

    pub fn get(&self, id: NodeId) -> Option<&SuggestionNode> {
        let slot = self.slots.get(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.node.as_ref()
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut SuggestionNode> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.node.as_mut()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of nodes, root excluded.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All live nodes, root included.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SuggestionNode)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node
                .as_ref()
                .map(|node| (NodeId::new(index, slot.generation), node))
        })
    }

    /// Direct children of a group in sanitized-name order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.get(id)
            .and_then(SuggestionNode::as_group)
            .into_iter()
            .flat_map(|group| group.children.values().copied())
    }

    /// Direct child whose sanitized name equals `segment` once sanitized.
    pub fn child(&self, id: NodeId, segment: &str) -> Option<NodeId> {
        self.child_by_name(id, &sanitize(segment))
    }

    pub(super) fn child_by_name(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.get(id)?.as_group()?.children.get(name).copied()
    }

    /// Number of hops from `id` to the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut hops = 0;
        let mut current = self.get(id).and_then(SuggestionNode::parent);
        while let Some(parent) = current {
            hops += 1;
            current = self.get(parent).and_then(SuggestionNode::parent);
        }
        hops
    }

    /// Path elements from the root (exclusive) down to `id` (inclusive).
    pub fn path_to(&self, id: NodeId) -> Vec<PathElement> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.get(node_id) else { break };
            if node.is_root() {
                break;
            }
            path.push(PathElement::Node(node_id));
            current = node.parent;
        }
        path.reverse();
        path
    }

    /// Dot-joined original names from the root (exclusive) to `id`.
    pub fn path_from_root(&self, id: NodeId) -> String {
        self.dotted_original_names(&self.path_to(id))
    }

    /// Dot-joined original names of a matched path.
    pub fn dotted_original_names(&self, elements: &[PathElement]) -> String {
        let mut out = String::new();
        for element in elements {
            let name = match element {
                PathElement::Node(id) => match self.get(*id) {
                    Some(node) => node.original_name(),
                    None => continue,
                },
                PathElement::Member(name) => name.as_ref(),
            };
            if !out.is_empty() {
                out.push(KEY_SEPARATOR);
            }
            out.push_str(name);
        }
        out
    }

    // ============================================================
    // Construction
    // ============================================================

    /// Declare the group at `key` on behalf of `source`, creating it if needed.
    ///
    /// The group's data is merged field by field from its sources in load
    /// order; the earliest source to set a field wins.
    pub fn add_group(&mut self, key: &str, data: GroupData, source: &SourceId) -> Result<NodeId, TreeError> {
        let segments = validated_segments(key)?;
        self.check_path(key, &segments, true)?;

        let (last, parents) = segments.split_last().ok_or_else(|| TreeError::invalid_key(key, "empty key"))?;
        let parent = self.ensure_groups(parents);

        let id = match self.child(parent, last) {
            Some(existing) => existing,
            None => self.insert_child(parent, last, NodeKind::Group(GroupNode::default())),
        };
        if let Some(NodeKind::Group(group)) = self.get_mut(id).map(|node| &mut node.kind) {
            group.declare(source, data);
        }

        self.add_ref_cascade_till_root(id, source);
        trace!("Added group {} from {}", key, source);
        Ok(id)
    }

    /// Declare the property at `key` on behalf of `source`, creating it if
    /// needed. Data is merged as for [`add_group`](Self::add_group).
    ///
    /// When the property's type resolves to an enum or a boolean, or is a map
    /// keyed by an enum, the property gets a class leaf; enum constants are
    /// read lazily.
    pub fn add_property(
        &mut self,
        key: &str,
        data: PropertyData,
        source: &SourceId,
        resolver: &dyn TypeResolver,
    ) -> Result<NodeId, TreeError> {
        let segments = validated_segments(key)?;
        self.check_path(key, &segments, false)?;

        let (last, parents) = segments.split_last().ok_or_else(|| TreeError::invalid_key(key, "empty key"))?;
        let parent = self.ensure_groups(parents);

        let id = match self.child(parent, last) {
            Some(existing) => existing,
            None => self.insert_child(parent, last, NodeKind::Property(PropertyNode::default())),
        };
        if let Some(NodeKind::Property(property)) = self.get_mut(id).map(|node| &mut node.kind) {
            // Also retry properties whose type was unresolvable so far.
            if property.declare(source, data) || property.class.is_none() {
                bind_class(property, resolver);
            }
        }

        self.add_ref_cascade_till_root(id, source);
        trace!("Added property {} from {}", key, source);
        Ok(id)
    }

    /// Reject keys that would turn a property into a group or vice versa.
    /// Runs before any mutation so a failed add leaves the tree untouched.
    fn check_path(&self, key: &str, segments: &[&str], leaf_is_group: bool) -> Result<(), TreeError> {
        let mut current = self.root();
        for (position, segment) in segments.iter().enumerate() {
            let Some(child) = self.child(current, segment) else {
                return Ok(());
            };
            let Some(node) = self.get(child) else {
                return Ok(());
            };
            let is_last = position + 1 == segments.len();
            if node.is_property() && (!is_last || leaf_is_group) {
                return Err(TreeError::conflicts_with_property(key, self.path_from_root(child)));
            }
            if node.is_group() && is_last && !leaf_is_group {
                return Err(TreeError::conflicts_with_group(key, self.path_from_root(child)));
            }
            current = child;
        }
        Ok(())
    }

    /// Walk `segments` from the root, creating missing groups.
    fn ensure_groups(&mut self, segments: &[&str]) -> NodeId {
        let mut current = self.root();
        for segment in segments {
            current = match self.child(current, segment) {
                Some(existing) => existing,
                None => self.insert_child(current, segment, NodeKind::Group(GroupNode::default())),
            };
        }
        current
    }

    fn insert_child(&mut self, parent: NodeId, original_name: &str, kind: NodeKind) -> NodeId {
        let name = sanitize(original_name);
        let id = self.alloc(SuggestionNode::new(original_name, name.clone(), Some(parent), kind));
        if let Some(NodeKind::Group(group)) = self.get_mut(parent).map(|node| &mut node.kind) {
            group.children.insert(name, id);
        }
        id
    }

    fn alloc(&mut self, node: SuggestionNode) -> NodeId {
        self.len += 1;
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.node = Some(node);
                NodeId::new(index, slot.generation)
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId::new(self.slots.len() - 1, 0)
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        let children: Vec<NodeId> = self.children(id).collect();
        for child in children {
            self.release(child);
        }
        let Some(slot) = self.slots.get_mut(id.index()) else {
            return;
        };
        if slot.generation == id.generation() && slot.node.take().is_some() {
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(id.index());
            self.len -= 1;
        }
    }

    /// Unlink `child` from `parent` and free its subtree.
    fn detach(&mut self, parent: NodeId, child: NodeId) {
        let Some(name) = self.get(child).map(|node| node.name.clone()) else {
            return;
        };
        if let Some(NodeKind::Group(group)) = self.get_mut(parent).map(|node| &mut node.kind) {
            group.children.remove(&name);
        }
        self.release(child);
    }

    // ============================================================
    // Membership cascade
    // ============================================================

    /// Record that `source` contributes `id`, walking up towards the root.
    ///
    /// Stops at the first node that already belongs to `source`: everything
    /// above it was marked by an earlier cascade. The root is never marked.
    pub fn add_ref_cascade_till_root(&mut self, id: NodeId, source: &SourceId) {
        let root = self.root();
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == root {
                break;
            }
            let Some(node) = self.get_mut(node_id) else { break };
            if node.belongs_to.contains(source) {
                break;
            }
            node.belongs_to.insert(source.clone());
            current = node.parent;
        }
    }

    /// Retract `source` from `id` and everything below it, pruning children
    /// no source justifies any more. Surviving nodes drop the data `source`
    /// declared for them.
    ///
    /// A property whose effective type changes loses its class leaf until
    /// [`bind_unbound_classes`](Self::bind_unbound_classes) runs.
    ///
    /// Returns true if `id` itself now belongs to no source and has no
    /// children, i.e. the caller should prune it. The root never qualifies.
    pub fn remove_ref_cascade_down(&mut self, id: NodeId, source: &SourceId) -> bool {
        let is_root = id == self.root();
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        // Child sets are subsets of this one, so nothing below holds `source`.
        if !node.belongs_to.remove(source) && !is_root {
            return false;
        }
        match &mut node.kind {
            NodeKind::Group(group) => group.retract(source),
            NodeKind::Property(property) => {
                if property.retract(source) {
                    trace!("Type of {} changed, unbinding its leaf", node.original_name);
                    property.class = None;
                    property.role = LeafRole::default();
                }
            }
        }

        let children: Vec<NodeId> = self.children(id).collect();
        for child in children {
            if self.remove_ref_cascade_down(child, source) {
                self.detach(id, child);
            }
        }

        !is_root
            && self
                .get(id)
                .is_some_and(|node| node.belongs_to.is_empty() && !node.has_children())
    }

    /// Retract `source` from the whole tree. Returns the number of pruned nodes.
    pub fn remove_source(&mut self, source: &SourceId) -> usize {
        let before = self.len;
        let root = self.root();
        self.remove_ref_cascade_down(root, source);
        let pruned = before - self.len;
        debug!("Removed source {} ({} nodes pruned)", source, pruned);
        pruned
    }

    // ============================================================
    // Reindex
    // ============================================================

    /// Re-resolve the class leaf of every property.
    ///
    /// Enum leaves whose type disappeared become unresolvable; properties
    /// whose type became resolvable gain a leaf.
    pub fn refresh_class_proxies(&mut self, resolver: &dyn TypeResolver) {
        for property in self.properties_mut() {
            match &mut property.class {
                Some(class @ ClassMetadata::Enum(_)) => class.refresh(resolver),
                Some(ClassMetadata::Boolean(_)) => {}
                None => bind_class(property, resolver),
            }
        }
    }

    /// Bind a leaf to every property that has none, leaving existing leaves
    /// untouched. Run after retracting sources.
    pub fn bind_unbound_classes(&mut self, resolver: &dyn TypeResolver) {
        for property in self.properties_mut() {
            if property.class.is_none() {
                bind_class(property, resolver);
            }
        }
    }

    fn properties_mut(&mut self) -> impl Iterator<Item = &mut PropertyNode> {
        self.slots
            .iter_mut()
            .filter_map(|slot| slot.node.as_mut())
            .filter_map(|node| match &mut node.kind {
                NodeKind::Property(property) => Some(property),
                NodeKind::Group(_) => None,
            })
    }
}

/// Pick the leaf for a property's effective type. A map keyed by an enum
/// gets that enum as a key leaf; boolean map keys are not suggested.
fn bind_class(property: &mut PropertyNode, resolver: &dyn TypeResolver) {
    let (class, role) = match leaf_for(&property.data, resolver) {
        Some((class, role)) => (Some(class), role),
        None => (None, LeafRole::default()),
    };
    property.class = class;
    property.role = role;
}

fn leaf_for(data: &PropertyData, resolver: &dyn TypeResolver) -> Option<(ClassMetadata, LeafRole)> {
    let type_ref = data.type_ref.as_ref()?;
    if let Some(class) = ClassMetadata::for_type(type_ref, resolver) {
        return Some((class, LeafRole::Values));
    }
    match ClassMetadata::for_type(&type_ref.map_key_type()?, resolver)? {
        class @ ClassMetadata::Enum(_) => Some((class, LeafRole::MapKeys)),
        ClassMetadata::Boolean(_) => None,
    }
}

fn validated_segments(key: &str) -> Result<Vec<&str>, TreeError> {
    if key.trim().is_empty() {
        return Err(TreeError::invalid_key(key, "empty key"));
    }
    let segments = split_key(key);
    if segments.iter().any(|segment| segment.trim().is_empty()) {
        return Err(TreeError::invalid_key(key, "empty segment"));
    }
    Ok(segments)
}
