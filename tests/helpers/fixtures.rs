//! Common metadata and type fixtures.

use keyhint::tree::{Deprecation, GroupData};
use keyhint::types::{ResolvedType, StaticTypeResolver, TypeKind, TypeMember, TypeRef};
use keyhint::{MetadataSource, PropertyEntry};

pub const SERVER_SOURCE: &str = "server/META-INF/spring-configuration-metadata.json";
pub const APP_SOURCE: &str = "app/META-INF/additional-spring-configuration-metadata.json";
pub const THEME_SOURCE: &str = "theme/META-INF/spring-configuration-metadata.json";

pub const COLOR_TYPE: &str = "com.acme.Color";
pub const LOG_LEVEL_TYPE: &str = "com.acme.LogLevel";
pub const PALETTE_TYPE: &str = "java.util.Map<com.acme.Color,java.lang.String>";

pub fn color_type() -> ResolvedType {
    ResolvedType::enumeration(
        COLOR_TYPE,
        vec![
            TypeMember::constant("RED").with_documentation("Warm red."),
            TypeMember::constant("GREEN"),
            TypeMember::constant("BLUE"),
        ],
    )
    .with_documentation("Palette colors.")
}

pub fn log_level_type() -> ResolvedType {
    ResolvedType::enumeration(
        LOG_LEVEL_TYPE,
        vec![
            TypeMember::constant("TRACE"),
            TypeMember::constant("DEBUG"),
            TypeMember::constant("INFO"),
            TypeMember::constant("WARN").with_documentation("Something looks off."),
            TypeMember::constant("ERROR"),
            TypeMember::constant("DEFAULT").with_static(true),
        ],
    )
}

pub fn resolver() -> StaticTypeResolver {
    StaticTypeResolver::new()
        .with_type(color_type())
        .with_type(log_level_type())
        .with_type(ResolvedType::new(TypeKind::Boolean, "java.lang.Boolean", Vec::new()))
        .with_type(ResolvedType::new(TypeKind::Other, "java.lang.Integer", Vec::new()))
        .with_type(ResolvedType::new(TypeKind::Other, "java.lang.String", Vec::new()))
}

/// ```text
/// server                 group  com.acme.ServerProperties
/// server.port            Integer, default 8080
/// server.address         String
/// server.ssl.enabled     Boolean
/// server.ssl.key-store   String
/// ```
pub fn server_source() -> MetadataSource {
    MetadataSource::new(SERVER_SOURCE)
        .with_group(
            "server",
            GroupData {
                type_ref: Some(TypeRef::from("com.acme.ServerProperties")),
                description: Some("Web server settings.".to_string()),
                ..GroupData::default()
            },
        )
        .with_property(
            PropertyEntry::new("server.port")
                .with_type("java.lang.Integer")
                .with_description("Server HTTP port.")
                .with_default_value("8080"),
        )
        .with_property(PropertyEntry::new("server.address").with_type("java.lang.String"))
        .with_property(PropertyEntry::new("server.ssl.enabled").with_type("java.lang.Boolean"))
        .with_property(PropertyEntry::new("server.ssl.keyStore").with_type("java.lang.String"))
}

/// ```text
/// app.color              Color (no description)
/// app.log-level          LogLevel
/// app.legacy-mode        Boolean, deprecated
/// server.port            Integer (overlaps the server source)
/// ```
pub fn app_source() -> MetadataSource {
    MetadataSource::new(APP_SOURCE)
        .with_property(PropertyEntry::new("app.color").with_type(COLOR_TYPE))
        .with_property(
            PropertyEntry::new("app.log-level")
                .with_type(LOG_LEVEL_TYPE)
                .with_description("Root log level."),
        )
        .with_property(
            PropertyEntry::new("app.legacy_mode")
                .with_type("java.lang.Boolean")
                .with_deprecation(Deprecation {
                    reason: Some("Superseded.".to_string()),
                    replacement: Some("app.mode".to_string()),
                    ..Deprecation::default()
                }),
        )
        .with_property(PropertyEntry::new("server.port").with_type("java.lang.Integer"))
}

/// ```text
/// theme.palette          Map<Color, String>
/// ```
pub fn theme_source() -> MetadataSource {
    MetadataSource::new(THEME_SOURCE).with_property(
        PropertyEntry::new("theme.palette")
            .with_type(PALETTE_TYPE)
            .with_description("Hex code per color."),
    )
}
