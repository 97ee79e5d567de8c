//! Tests for the port identifier wire format.
mod common;
use common::*;
use flowgroup::prelude::*;

#[test]
fn test_field_port_without_proxy() {
    let field = FieldDescriptor::new("str").shown();
    let id = FieldPortId::for_field(&field, "text", "node-1");

    assert_eq!(id.to_string(), "str|text|node-1");

    let decoded: FieldPortId = "str|text|node-1".parse().unwrap();
    assert_eq!(decoded.type_name, "str");
    assert_eq!(decoded.field, "text");
    assert_eq!(decoded.owner_id, "node-1");
    assert_eq!(decoded.proxy, None);
}

#[test]
fn test_field_port_with_proxy() {
    let field = FieldDescriptor::new("BaseLLM").with_proxy("inner2", "llm");
    let encoded = FieldPortId::for_field(&field, "llm_inner2", "group1").to_string();

    assert_eq!(encoded, "BaseLLM|llm_inner2|group1|inner2|llm");

    let decoded: FieldPortId = encoded.parse().unwrap();
    assert_eq!(
        (
            decoded.type_name.as_str(),
            decoded.field.as_str(),
            decoded.owner_id.as_str()
        ),
        ("BaseLLM", "llm_inner2", "group1")
    );
    let proxy = decoded.proxy.expect("proxy segment");
    assert_eq!(proxy.node_id, "inner2");
    assert_eq!(proxy.field, "llm");
}

#[test]
fn test_group_template_ports_are_decodable() {
    let group = create_group_node();
    for field in group.template().iter() {
        let id = FieldPortId::for_field(&field.descriptor, &field.key, &group.id);
        let decoded: FieldPortId = id.to_string().parse().unwrap();
        assert_eq!(decoded, id, "field '{}'", field.key);
    }
}

#[test]
fn test_output_port_lists_every_base_class() {
    let node = Node::new("chain-7", "LLMChain").with_base_classes(["Chain", "LLMChain", "Runnable"]);
    let id = OutputPortId::for_node(&node);

    assert_eq!(id.to_string(), "LLMChain|chain-7|Chain|LLMChain|Runnable");
    let decoded: OutputPortId = id.to_string().parse().unwrap();
    assert_eq!(decoded, id);
}

#[test]
fn test_output_ports_are_unique_per_node() {
    let a = Node::new("a", "LLMChain").with_base_classes(["Chain"]);
    let b = Node::new("b", "LLMChain").with_base_classes(["Chain"]);
    assert_ne!(
        OutputPortId::for_node(&a).to_string(),
        OutputPortId::for_node(&b).to_string()
    );
}

#[test]
fn test_malformed_field_ports_are_rejected() {
    assert_eq!("".parse::<FieldPortId>(), Err(PortIdError::Empty));

    match "str|text".parse::<FieldPortId>() {
        Err(PortIdError::SegmentCount { found, .. }) => assert_eq!(found, 2),
        other => panic!("Expected SegmentCount error, got {:?}", other),
    }
    match "str|text|node|inner".parse::<FieldPortId>() {
        Err(PortIdError::SegmentCount { found, .. }) => assert_eq!(found, 4),
        other => panic!("Expected SegmentCount error, got {:?}", other),
    }
    match "str||node".parse::<FieldPortId>() {
        Err(PortIdError::EmptySegment { index, .. }) => assert_eq!(index, 1),
        other => panic!("Expected EmptySegment error, got {:?}", other),
    }
    match "str|text|node|inner|".parse::<FieldPortId>() {
        Err(PortIdError::EmptySegment { index, .. }) => assert_eq!(index, 4),
        other => panic!("Expected EmptySegment error, got {:?}", other),
    }
}

#[test]
fn test_port_ids_serialize_as_strings() {
    let id = FieldPortId::new("str", "x", "inner1");
    let json = serde_json::to_value(&id).unwrap();
    assert_eq!(json, serde_json::json!("str|x|inner1"));

    let back: FieldPortId = serde_json::from_value(json).unwrap();
    assert_eq!(back, id);

    let bad: std::result::Result<FieldPortId, _> = serde_json::from_value(serde_json::json!("nope"));
    assert!(bad.is_err());
}

#[test]
fn test_loaded_descriptors_always_decode() {
    let template: Template = serde_json::from_value(serde_json::json!({
        "x": { "type": "str", "show": true, "proxy": { "id": "inner1", "field": "" } },
        "y": { "type": "str", "show": true, "proxy": { "id": "", "field": "y" } },
        "z": { "show": true, "proxy": { "id": "inner2", "field": "z" } }
    }))
    .unwrap();

    for field in template.iter() {
        let id = FieldPortId::for_field(&field.descriptor, &field.key, "g");
        let decoded: FieldPortId = id.to_string().parse().unwrap();
        assert_eq!(decoded, id, "field '{}'", field.key);
    }
    assert_eq!(
        FieldPortId::for_field(template.get("x").unwrap(), "x", "g").to_string(),
        "str|x|g"
    );
}
