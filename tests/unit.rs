//! Unit tests for small building blocks and error messages.
mod common;
use common::*;
use flowgroup::prelude::*;

#[test]
fn test_position_addition() {
    let sum = Position::new(10.0, -5.0) + Position::new(2.5, 5.0);
    assert_eq!(sum, Position::new(12.5, 0.0));
}

#[test]
fn test_edge_id_is_derived_from_endpoints() {
    let edge = Edge::new("a", "A|a|X", "b", "X|in|b");
    assert_eq!(edge.id, "reactflow__edge-aA|a|X-bX|in|b");
    assert!(edge.touches("a"));
    assert!(edge.touches("b"));
    assert!(!edge.touches("c"));
}

#[test]
fn test_remove_node_drops_attached_edges() {
    let mut flow = create_outer_flow().data;
    let removed = flow.remove_node("llm").expect("llm exists");
    assert_eq!(removed.node_type(), "OpenAI");
    assert_eq!(flow.edges.len(), 2);
    assert!(flow.remove_node("llm").is_none());
}

#[test]
fn test_group_detection() {
    assert!(create_group_node().is_group());
    assert_eq!(create_group_node().component, "groupNode");
    assert!(!create_inner_chain().is_group());
}

#[test]
fn test_type_registry_default_palette() {
    let registry = TypeRegistry::default();
    assert_eq!(registry.category_color("llms"), ColorToken::new("#6344BE"));
    assert_eq!(registry.category_color("nonexistent"), ColorToken::unknown());
    assert_eq!(registry.color_for("str"), ColorToken::unknown());
    assert_eq!(ColorToken::unknown().as_str(), "#9CA3AF");
}

#[test]
fn test_type_registry_overrides() {
    let registry = TypeRegistry::builder()
        .with_category_color("chains", ColorToken::new("#000001"))
        .with_type("LLMChain", "chains")
        .build();
    assert_eq!(registry.color_for("LLMChain").to_string(), "#000001");
}

#[test]
fn test_invalid_catalog_is_a_json_error() {
    assert!(matches!(
        TypeRegistry::from_catalog_json("[1, 2"),
        Err(FlowError::Json(_))
    ));
}

#[test]
fn test_error_messages() {
    let err = PortIdError::SegmentCount {
        id: "a|b".to_string(),
        found: 2,
        expected: "3 or 5",
    };
    assert_eq!(
        err.to_string(),
        "Port identifier 'a|b' has 2 segments, expected 3 or 5"
    );

    let err = ExpandError::NotAGroup {
        node_id: "n1".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Node 'n1' has no embedded sub-flow and cannot be expanded"
    );

    let wrapped: FlowError = ExpandError::NodeNotFound {
        node_id: "n2".to_string(),
    }
    .into();
    assert_eq!(wrapped.to_string(), "Node 'n2' not found in the active flow");
}

#[test]
fn test_apply_reports_unchanged_values() {
    let mut document = create_outer_flow();
    let outcome = document
        .apply(FlowCommand::RenameGroup {
            node_id: "group1".to_string(),
            name: "Summarizer".to_string(),
        })
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Unchanged);
    assert!(!outcome.is_change());

    let result = document.apply(FlowCommand::RenameGroup {
        node_id: "agent".to_string(),
        name: "x".to_string(),
    });
    assert!(matches!(result, Err(FlowError::NotAGroup(id)) if id == "agent"));

    let result = document.apply(FlowCommand::DeleteNode {
        node_id: "ghost".to_string(),
    });
    assert!(matches!(result, Err(FlowError::NodeNotFound(_))));
}

#[test]
fn test_editor_tracks_dirty_state() {
    let mut editor = Editor::new(create_outer_flow());
    assert!(!editor.is_dirty());
    editor.delete_node("text").unwrap();
    assert!(editor.is_dirty());
    editor.mark_saved();
    assert!(!editor.is_dirty());
    assert_eq!(editor.into_document().data.nodes.len(), 3);
}
