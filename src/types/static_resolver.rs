use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{ResolvedType, TypeRef, TypeResolver};

/// In-memory [`TypeResolver`] backed by a registry of known types.
///
/// Types can be registered and removed while the resolver is shared with a
/// host, which is how tests simulate a type being edited or deleted between
/// reindexes.
#[derive(Debug, Default)]
pub struct StaticTypeResolver {
    types: RwLock<FxHashMap<TypeRef, ResolvedType>>,
}

impl StaticTypeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `ty` under its qualified name, replacing any previous entry.
    pub fn register(&self, ty: ResolvedType) {
        let key = TypeRef::new(ty.info.qualified_name.as_ref());
        self.types.write().insert(key, ty);
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with_type(self, ty: ResolvedType) -> Self {
        self.register(ty);
        self
    }

    pub fn remove(&self, type_ref: &TypeRef) -> Option<ResolvedType> {
        self.types.write().remove(type_ref)
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}

impl TypeResolver for StaticTypeResolver {
    fn resolve(&self, type_ref: &TypeRef) -> Option<ResolvedType> {
        self.types.read().get(type_ref).cloned()
    }
}
