#![allow(clippy::unwrap_used)]


use crate::base::SourceId;
use crate::types::{ResolvedType, StaticTypeResolver, TypeKind, TypeMember, TypeRef};

use super::{GroupData, PropertyData, SuggestionTree};

pub(super) fn color_resolver() -> StaticTypeResolver {
    StaticTypeResolver::new()
        .with_type(
            ResolvedType::enumeration(
                "com.acme.Color",
                vec![
                    TypeMember::constant("RED").with_documentation("Warm red."),
                    TypeMember::constant("GREEN"),
                    TypeMember::constant("BLUE"),
                ],
            )
            .with_documentation("Palette colors."),
        )
        .with_type(ResolvedType::new(TypeKind::Boolean, "java.lang.Boolean", Vec::new()))
        .with_type(ResolvedType::new(TypeKind::Other, "java.lang.Integer", Vec::new()))
}

/// A map keyed by the color enum.
pub(super) const PALETTE_TYPE: &str = "java.util.Map<com.acme.Color,java.lang.String>";

pub(super) fn property(type_name: &str) -> PropertyData {
    PropertyData {
        type_ref: Some(TypeRef::from(type_name)),
        ..PropertyData::default()
    }
}

pub(super) fn source_a() -> SourceId {
    SourceId::from("a/META-INF/additional-metadata.json")
}

pub(super) fn source_b() -> SourceId {
    SourceId::from("b/META-INF/additional-metadata.json")
}

/// Two overlapping sources:
///
/// ```text
/// a: server(group) server.port server.address app.color(enum) logging.level
/// b: server.port server.ssl.enabled(boolean)
/// ```
pub(super) fn sample_tree(resolver: &StaticTypeResolver) -> SuggestionTree {
    let mut tree = SuggestionTree::new();
    let a = source_a();
    let b = source_b();

    tree.add_group(
        "server",
        GroupData {
            description: Some("Web server settings.".to_string()),
            ..GroupData::default()
        },
        &a,
    )
    .unwrap();
    tree.add_property("server.port", property("java.lang.Integer"), &a, resolver)
        .unwrap();
    tree.add_property("server.address", property("java.net.InetAddress"), &a, resolver)
        .unwrap();
    tree.add_property("app.color", property("com.acme.Color"), &a, resolver)
        .unwrap();
    tree.add_property("logging.level", property("java.lang.String"), &a, resolver)
        .unwrap();

    tree.add_property("server.port", property("java.lang.Integer"), &b, resolver)
        .unwrap();
    tree.add_property("server.ssl.enabled", property("java.lang.Boolean"), &b, resolver)
        .unwrap();

    tree
}

/// [`sample_tree`] plus `theme.palette`, a map keyed by the color enum.
pub(super) fn palette_tree(resolver: &StaticTypeResolver) -> SuggestionTree {
    let mut tree = sample_tree(resolver);
    tree.add_property("theme.palette", property(PALETTE_TYPE), &source_a(), resolver)
        .unwrap();
    tree
}
