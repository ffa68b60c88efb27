//! Host lifecycle: loading, reloading, unloading and reindexing sources.

use std::sync::Arc;

use keyhint::types::TypeRef;
use keyhint::{MetadataSource, PropertyEntry, SourceId, SuggestionHost, TreeError};

use crate::helpers::fixtures::{APP_SOURCE, COLOR_TYPE, SERVER_SOURCE, app_source, color_type, resolver};
use crate::helpers::host_helpers::{labels, loaded_host};

#[test]
fn test_overlapping_sources_share_nodes() {
    let (host, _resolver) = loaded_host();
    let analysis = host.analysis();
    let port = analysis.find_node("server.port").unwrap();
    let node = analysis.tree().get(port).unwrap();

    assert!(node.belongs_to().contains(&SourceId::from(SERVER_SOURCE)));
    assert!(node.belongs_to().contains(&SourceId::from(APP_SOURCE)));
    assert_eq!(host.source_count(), 2);
}

#[test]
fn test_unload_retracts_only_unique_nodes() {
    let (mut host, _resolver) = loaded_host();

    // app, app.color, app.log-level, app.legacy_mode
    assert_eq!(host.unload_source(&SourceId::from(APP_SOURCE)), Ok(4));

    let analysis = host.analysis();
    assert!(analysis.find_node("app").is_none());
    assert!(analysis.find_node("server.port").is_some());
    assert_eq!(labels(&analysis.key_suggestions("")), vec!["server"]);

    let port = analysis.find_node("server.port").unwrap();
    let owners = analysis.tree().get(port).unwrap().belongs_to();
    assert_eq!(owners.len(), 1);
}

#[test]
fn test_unload_everything_leaves_empty_tree() {
    let (mut host, _resolver) = loaded_host();
    host.unload_source(&SourceId::from(APP_SOURCE)).unwrap();
    host.unload_source(&SourceId::from(SERVER_SOURCE)).unwrap();

    assert!(host.tree().is_empty());
    assert!(host.analysis().key_suggestions("").is_empty());
}

#[test]
fn test_unload_twice_is_an_error() {
    let (mut host, _resolver) = loaded_host();
    let id = SourceId::from(APP_SOURCE);

    host.unload_source(&id).unwrap();
    assert_eq!(host.unload_source(&id), Err(TreeError::UnknownSource(id)));
}

#[test]
fn test_reload_is_idempotent() {
    let (mut host, _resolver) = loaded_host();
    let before = host.tree().len();
    let keys_before: Vec<String> = labels(&host.analysis().key_suggestions("app."))
        .into_iter()
        .map(String::from)
        .collect();

    let report = host.load_source(app_source());

    assert!(report.is_ok());
    assert_eq!(report.properties, 4);
    assert_eq!(host.tree().len(), before);
    assert_eq!(labels(&host.analysis().key_suggestions("app.")), keys_before);
    assert_eq!(host.source_count(), 2);
}

#[test]
fn test_load_report_lists_skipped_entries() {
    let (mut host, _resolver) = loaded_host();
    let report = host.load_source(
        MetadataSource::new("broken.json")
            .with_property(PropertyEntry::new("server.port.value"))
            .with_property(PropertyEntry::new("server."))
            .with_property(PropertyEntry::new("management.port")),
    );

    assert_eq!(report.loaded(), 1);
    assert_eq!(report.errors.len(), 2);
    assert_eq!(
        report.errors[0].to_string(),
        "Key 'server.port.value' conflicts with existing property 'server.port'"
    );
    assert!(host.analysis().find_node("management.port").is_some());
}

#[test]
fn test_reindex_tracks_type_removal_and_restore() {
    let (mut host, resolver) = loaded_host();
    assert_eq!(host.analysis().value_suggestions("app.color", "").map(|v| v.len()), Some(3));

    resolver.remove(&TypeRef::from(COLOR_TYPE));
    host.reindex();
    assert!(host.analysis().value_suggestions("app.color", "").is_none());
    assert!(host.analysis().key_suggestions("app.color.").is_empty());
    // The node itself stays until its source is unloaded.
    assert!(host.analysis().find_node("app.color").is_some());

    resolver.register(color_type());
    host.reindex();
    assert_eq!(host.analysis().value_suggestions("app.color", "").map(|v| v.len()), Some(3));
}

#[test]
fn test_reindex_binds_types_that_appear_later() {
    let resolver = Arc::new(keyhint::StaticTypeResolver::new());
    let mut host = SuggestionHost::new(resolver.clone());
    host.load_source(app_source());
    assert!(host.analysis().value_suggestions("app.color", "").is_none());

    resolver.register(color_type());
    host.reindex();
    assert_eq!(
        host.analysis()
            .value_suggestions("app.color", "g")
            .as_deref()
            .map(labels),
        Some(vec!["GREEN"])
    );
}

#[test]
fn test_snapshot_is_shared_across_threads() {
    let resolver = Arc::new(resolver());
    let mut host = SuggestionHost::new(resolver);
    host.load_source(app_source());

    let analysis = host.analysis();
    let counts: Vec<Option<usize>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| analysis.value_suggestions("app.log-level", "").map(|v| v.len())))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(counts, vec![Some(5); 4]);
}

// =============================================================================
// SHARED NODES
// =============================================================================

fn shared(id: &str, entry: PropertyEntry) -> MetadataSource {
    MetadataSource::new(id).with_property(entry)
}

#[test]
fn test_unload_drops_data_of_shared_node() {
    let mut host = SuggestionHost::new(Arc::new(resolver()));
    host.load_source(shared("s.json", PropertyEntry::new("shared.port").with_description("from s")));
    host.load_source(shared("t.json", PropertyEntry::new("shared.port")));
    assert_eq!(
        host.analysis().key_suggestions("shared.p")[0].description.as_deref(),
        Some("from s")
    );

    assert_eq!(host.unload_source(&SourceId::from("s.json")), Ok(0));

    let analysis = host.analysis();
    let port = analysis.find_node("shared.port").unwrap();
    assert_eq!(analysis.tree().get(port).unwrap().description(), None);
    assert_eq!(analysis.key_suggestions("shared.p")[0].description, None);
}

#[test]
fn test_reload_replaces_data_of_shared_node() {
    let mut host = SuggestionHost::new(Arc::new(resolver()));
    host.load_source(shared("s.json", PropertyEntry::new("shared.port").with_description("old")));
    host.load_source(shared("t.json", PropertyEntry::new("shared.port")));

    host.load_source(shared("s.json", PropertyEntry::new("shared.port").with_description("new")));

    let found = host.analysis().key_suggestions("shared.p");
    assert_eq!(found[0].description.as_deref(), Some("new"));
}

#[test]
fn test_unload_rebinds_leaf_to_remaining_type() {
    let mut host = SuggestionHost::new(Arc::new(resolver()));
    host.load_source(shared("s.json", PropertyEntry::new("app.mode").with_type(COLOR_TYPE)));
    host.load_source(shared("t.json", PropertyEntry::new("app.mode").with_type("java.lang.Boolean")));
    assert_eq!(
        host.analysis().value_suggestions("app.mode", "").as_deref().map(labels),
        Some(vec!["BLUE", "GREEN", "RED"])
    );

    host.unload_source(&SourceId::from("s.json")).unwrap();
    assert_eq!(
        host.analysis().value_suggestions("app.mode", "").as_deref().map(labels),
        Some(vec!["false", "true"])
    );
}
