//! Type introspection boundary.
//!
//! The engine never inspects source code itself. Whenever a node refers to a
//! type (an enum backing a property's values, for example) it asks an
//! injected [`TypeResolver`] for the type's shape. Hosts implement the trait
//! on top of their own project model; [`StaticTypeResolver`] is an in-memory
//! implementation for hosts without one and for tests.

mod static_resolver;

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

pub use static_resolver::StaticTypeResolver;

/// A type reference exactly as declared by a metadata source
/// (e.g. `com.acme.Color`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeRef(SmolStr);

impl TypeRef {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last dot-separated part of the reference, ignoring generic
    /// arguments. Used when the resolver cannot supply a display name.
    pub fn simple_name(&self) -> &str {
        let raw = self.0.split('<').next().unwrap_or(self.0.as_str());
        raw.rsplit('.').next().unwrap_or(raw)
    }

    /// Key type argument of a map reference, e.g. `com.acme.Color` for
    /// `java.util.Map<com.acme.Color, java.lang.String>`.
    pub fn map_key_type(&self) -> Option<TypeRef> {
        let (raw, args) = self.0.trim().split_once('<')?;
        if !raw.trim_end().ends_with("Map") {
            return None;
        }
        let args = args.strip_suffix('>')?;

        let mut depth = 0usize;
        for (position, c) in args.char_indices() {
            match c {
                '<' => depth += 1,
                '>' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    let key = args[..position].trim();
                    return (!key.is_empty()).then(|| TypeRef::new(key));
                }
                _ => {}
            }
        }
        None
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What kind of type a reference resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Enum,
    Boolean,
    Other,
}

/// A field declared on a resolved type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeMember {
    /// Declared name (e.g. `DARK_BLUE`).
    pub name: Arc<str>,
    /// Static members are never offered as enum values.
    pub is_static: bool,
    /// Rendered documentation for the member, if any.
    pub documentation: Option<Arc<str>>,
}

impl TypeMember {
    /// A non-static member without documentation (an enum constant).
    pub fn constant(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            is_static: false,
            documentation: None,
        }
    }

    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }
}

/// Identity and documentation of a resolved type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeInfo {
    /// Stable fully-qualified identifier, used for documentation links.
    pub qualified_name: Arc<str>,
    /// Unqualified display name.
    pub short_name: SmolStr,
    /// Rendered type documentation, if any.
    pub documentation: Option<Arc<str>>,
}

/// Everything the engine needs to know about a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedType {
    pub kind: TypeKind,
    pub info: TypeInfo,
    /// Declared fields in declaration order.
    pub members: Vec<TypeMember>,
}

impl ResolvedType {
    /// An enum type named `qualified_name` with the given constants.
    pub fn enumeration(qualified_name: &str, members: Vec<TypeMember>) -> Self {
        Self::new(TypeKind::Enum, qualified_name, members)
    }

    pub fn new(kind: TypeKind, qualified_name: &str, members: Vec<TypeMember>) -> Self {
        let short_name = TypeRef::from(qualified_name).simple_name().into();
        Self {
            kind,
            info: TypeInfo {
                qualified_name: Arc::from(qualified_name),
                short_name,
                documentation: None,
            },
            members,
        }
    }

    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.info.documentation = Some(doc.into());
        self
    }

    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    /// Members that can be offered as values (non-static ones).
    pub fn instance_members(&self) -> impl Iterator<Item = &TypeMember> {
        self.members.iter().filter(|member| !member.is_static)
    }
}

/// Capability to introspect types referenced by metadata.
///
/// Implementations must be idempotent: nodes re-resolve their types on every
/// reindex.
pub trait TypeResolver: Send + Sync {
    /// Resolve a type reference, or `None` if it cannot be resolved
    /// (unknown type, deleted source, ...).
    fn resolve(&self, type_ref: &TypeRef) -> Option<ResolvedType>;
}

impl<R: TypeResolver + ?Sized> TypeResolver for Arc<R> {
    fn resolve(&self, type_ref: &TypeRef) -> Option<ResolvedType> {
        (**self).resolve(type_ref)
    }
}
