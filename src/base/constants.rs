//! Domain constants shared across the crate.

/// Separator between the segments of a configuration key.
pub const KEY_SEPARATOR: char = '.';

/// Scheme used for type hyperlinks in rendered documentation.
pub const TYPE_LINK_SCHEME: &str = "type://";

/// Values offered for boolean-typed properties, in suggestion order.
pub const BOOLEAN_VALUES: [&str; 2] = ["false", "true"];

/// Fully qualified name reported for boolean leaves.
pub const BOOLEAN_TYPE_NAME: &str = "java.lang.Boolean";

/// Short name reported for boolean leaves.
pub const BOOLEAN_SHORT_NAME: &str = "Boolean";
