//! Tests for the in-memory flow store.
mod common;
use common::*;
use flowgroup::prelude::*;
use uuid::Uuid;

#[test]
fn test_create_and_read() {
    let mut store = FlowStore::new();
    let id = store.create(create_outer_flow()).id;

    let stored = store.get(id).expect("stored flow");
    assert_eq!(stored.flow.name, "Outer");
    assert_eq!(stored.flow.data.nodes.len(), 4);
    assert_eq!(store.list().len(), 1);
}

#[test]
fn test_batch_create_keeps_order() {
    let mut store = FlowStore::new();
    let created = store.create_batch(vec![
        FlowDocument::new("first", FlowData::default()),
        FlowDocument::new("second", FlowData::default()),
    ]);

    assert_eq!(created.len(), 2);
    assert_ne!(created[0].id, created[1].id);
    let names: Vec<_> = store.list().iter().map(|f| f.flow.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second"]);
}

#[test]
fn test_update_only_replaces_given_members() {
    let mut store = FlowStore::new();
    let id = store.create(create_outer_flow()).id;

    let updated = store
        .update(
            id,
            FlowUpdate {
                description: Some("Agent over a summarizer".to_string()),
                ..FlowUpdate::default()
            },
        )
        .unwrap();

    assert_eq!(updated.flow.name, "Outer");
    assert_eq!(updated.flow.description, "Agent over a summarizer");
    assert_eq!(updated.flow.data.nodes.len(), 4);
}

#[test]
fn test_unknown_ids_are_reported() {
    let mut store = FlowStore::new();
    let missing = Uuid::new_v4();

    assert!(matches!(store.get(missing), Err(FlowError::UnknownFlow(id)) if id == missing));
    assert!(matches!(store.delete(missing), Err(FlowError::UnknownFlow(_))));
    assert!(matches!(
        store.update(missing, FlowUpdate::default()),
        Err(FlowError::UnknownFlow(_))
    ));
}

#[test]
fn test_delete() {
    let mut store = FlowStore::new();
    let id = store.create(create_outer_flow()).id;
    store.delete(id).unwrap();
    assert!(store.list().is_empty());
}

#[test]
fn test_upload_accepts_both_shapes() {
    let mut store = FlowStore::new();

    let wrapped = r#"{"flows": [{"name": "a", "description": "", "data": {"nodes": [], "edges": []}}]}"#;
    let bare = r#"[{"name": "b", "data": {"nodes": [], "edges": []}}, {"name": "c"}]"#;

    assert_eq!(store.upload(wrapped).unwrap().len(), 1);
    assert_eq!(store.upload(bare).unwrap().len(), 2);

    let names: Vec<_> = store.list().iter().map(|f| f.flow.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);

    assert!(matches!(store.upload("{not json"), Err(FlowError::Json(_))));
}

#[test]
fn test_download_round_trips_through_upload() {
    let mut store = FlowStore::new();
    store.create(create_outer_flow());
    let exported = store.download().unwrap();

    let mut other = FlowStore::new();
    let imported = other.upload(&exported).unwrap();

    assert_eq!(imported.len(), 1);
    assert_eq!(imported[0].flow, store.list()[0].flow);
}
