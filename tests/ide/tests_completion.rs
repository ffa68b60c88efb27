//! Key and value completion through the host.

use rstest::rstest;

use crate::helpers::fixtures::theme_source;
use crate::helpers::host_helpers::{labels, loaded_host, single_key};
use keyhint::CompletionConfig;
use keyhint::ide::{SuggestionIcon, SuggestionKind};

// =============================================================================
// KEY COMPLETION
// =============================================================================

#[rstest]
#[case("server.p", &["server.port"])]
#[case("server.", &["server.address", "server.port", "server.ssl"])]
#[case("server.ssl.", &["server.ssl.enabled", "server.ssl.keyStore"])]
#[case("app.", &["app.color", "app.legacy_mode", "app.log-level"])]
#[case("app.l", &["app.legacy_mode", "app.log-level"])]
#[case("app.logLevel", &["app.log-level"])]
#[case("SERVER.SSL.key_st", &["server.ssl.keyStore"])]
#[case("nothing", &[])]
#[case("app.color.", &[])]
#[case("app.log-level.W", &[])]
#[case("server.ssl.enabled.", &[])]
#[case("server.ssl.enabled.t", &[])]
fn test_key_completion(#[case] query: &str, #[case] expected: &[&str]) {
    let (host, _resolver) = loaded_host();
    let found = host.analysis().key_suggestions(query);
    assert_eq!(labels(&found), expected);
}

#[test]
fn test_root_listing_is_sorted() {
    let (host, _resolver) = loaded_host();
    let found = host.analysis().key_suggestions("");
    assert_eq!(labels(&found), vec!["app", "server"]);
}

#[test]
fn test_navigate_deep_one_level() {
    let (host, _resolver) = loaded_host();
    let analysis = host.analysis();

    assert_eq!(labels(&analysis.key_suggestions("por")), vec!["server.port"]);
    assert_eq!(labels(&analysis.key_suggestions("colo")), vec!["app.color"]);
    // Two levels down is out of reach.
    assert!(analysis.key_suggestions("key").is_empty());
}

#[test]
fn test_navigate_deep_disabled_by_config() {
    let (host, _resolver) = loaded_host();
    let host = host.with_config(CompletionConfig::default().with_navigate_deep(false));
    assert!(host.analysis().key_suggestions("por").is_empty());
}

#[test]
fn test_map_keys_complete_enum_constants() {
    let (mut host, _resolver) = loaded_host();
    host.load_source(theme_source());
    let blue = single_key(&host, "theme.palette.B");

    assert_eq!(blue.path_or_value.as_ref(), "theme.palette.BLUE");
    assert_eq!(blue.ancestral_path.as_deref(), Some("theme.palette"));
    assert_eq!(blue.icon, SuggestionIcon::EnumMember);
    assert_eq!(blue.short_type.as_deref(), Some("Color"));

    assert_eq!(
        labels(&host.analysis().key_suggestions("theme.palette.")),
        vec!["theme.palette.BLUE", "theme.palette.GREEN", "theme.palette.RED"]
    );
    assert!(host.analysis().find_node("theme.palette.red").is_some());
}

#[test]
fn test_value_properties_are_terminal() {
    let (host, _resolver) = loaded_host();
    let analysis = host.analysis();

    assert!(analysis.find_node("app.color.red").is_none());
    assert!(analysis.find_node("server.ssl.enabled.true").is_none());
    assert!(analysis.find_node("app.color").is_some());
}

#[test]
fn test_key_suggestion_details() {
    let (host, _resolver) = loaded_host();
    let port = single_key(&host, "server.po");

    assert_eq!(port.kind, SuggestionKind::Key);
    assert_eq!(port.ancestral_path.as_deref(), Some("server"));
    assert_eq!(port.short_type.as_deref(), Some("Integer"));
    assert_eq!(port.icon, SuggestionIcon::Property);
    assert_eq!(port.description.as_deref(), Some("Server HTTP port."));
}

#[test]
fn test_deprecated_keys_flagged_and_filterable() {
    let (host, _resolver) = loaded_host();
    assert!(single_key(&host, "app.le").deprecated);

    let host = host.with_config(CompletionConfig::default().with_deprecated(false));
    assert!(host.analysis().key_suggestions("app.le").is_empty());
}

#[test]
fn test_max_results() {
    let (host, _resolver) = loaded_host();
    let host = host.with_config(CompletionConfig::default().with_max_results(1));
    assert_eq!(labels(&host.analysis().key_suggestions("server.")), vec!["server.address"]);
}

#[test]
fn test_completion_items() {
    let (host, _resolver) = loaded_host();
    let items = host.analysis().completions("server.ssl.e");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].label.as_ref(), "server.ssl.enabled");
    assert_eq!(items[0].detail.as_deref(), Some("Boolean"));
    assert_eq!(items[0].icon, SuggestionIcon::Boolean);
    assert_eq!(items[0].kind_to_lsp(), SuggestionIcon::Property.to_lsp());
}

// =============================================================================
// VALUE COMPLETION
// =============================================================================

#[rstest]
#[case("app.log-level", "", Some(vec!["DEBUG", "ERROR", "INFO", "TRACE", "WARN"]))]
#[case("app.log-level", "w", Some(vec!["WARN"]))]
#[case("app.logLevel", "IN", Some(vec!["INFO"]))]
#[case("app.color", "R", Some(vec!["RED"]))]
#[case("app.color", "x", Some(vec![]))]
#[case("server.ssl.enabled", "t", Some(vec!["true"]))]
#[case("server.port", "", None)]
#[case("server", "", None)]
#[case("missing.key", "", None)]
fn test_value_completion(#[case] key: &str, #[case] prefix: &str, #[case] expected: Option<Vec<&str>>) {
    let (host, _resolver) = loaded_host();
    let found = host.analysis().value_suggestions(key, prefix);
    assert_eq!(found.as_deref().map(labels), expected);
}

#[test]
fn test_value_suggestions_carry_key_context() {
    let (host, _resolver) = loaded_host();
    let analysis = host.analysis();
    let node = analysis.find_node("app.color").unwrap();

    let red = analysis.value_suggestions("app.color", "RED").unwrap().remove(0);
    assert_eq!(red.kind, SuggestionKind::Value);
    assert_eq!(red.last_node(), Some(node));
    assert_eq!(red.short_type.as_deref(), Some("Color"));
    assert_eq!(red.description.as_deref(), Some("Warm red."));
}

#[test]
fn test_map_property_has_no_value_completions() {
    let (mut host, _resolver) = loaded_host();
    host.load_source(theme_source());
    assert!(host.analysis().value_suggestions("theme.palette", "").is_none());
}
