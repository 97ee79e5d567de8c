//! Common test utilities for building flows, group nodes and collaborator fakes.
use flowgroup::prelude::*;

/// The prompt node inside the group. Sits at `(10, 10)` relative to the group.
#[allow(dead_code)]
pub fn create_inner_prompt() -> Node {
    Node::new("inner1", "PromptTemplate")
        .at(Position::new(10.0, 10.0))
        .with_template(
            Template::new()
                .with_field("x", FieldDescriptor::new("str").shown().required())
                .with_field("_type", FieldDescriptor::new("str")),
        )
        .with_base_classes(["BasePromptTemplate", "PromptTemplate"])
}

/// The chain node inside the group; its output is the group's output.
#[allow(dead_code)]
pub fn create_inner_chain() -> Node {
    Node::new("inner2", "LLMChain")
        .at(Position::new(200.0, 40.0))
        .with_template(
            Template::new()
                .with_field(
                    "prompt",
                    FieldDescriptor::new("BasePromptTemplate").shown().required(),
                )
                .with_field("llm", FieldDescriptor::new("BaseLLM").shown().required())
                .with_field("verbose", FieldDescriptor::new("bool").shown().advanced()),
        )
        .with_base_classes(["Chain", "LLMChain"])
}

/// `inner1 -> inner2.prompt`
#[allow(dead_code)]
pub fn create_inner_flow() -> FlowData {
    let prompt = create_inner_prompt();
    let chain = create_inner_chain();
    let edge = Edge::new(
        &prompt.id,
        OutputPortId::for_node(&prompt).to_string(),
        &chain.id,
        FieldPortId::new("BasePromptTemplate", "prompt", &chain.id).to_string(),
    );
    FlowData {
        nodes: vec![prompt, chain],
        edges: vec![edge],
        ..FlowData::default()
    }
}

/// The template of `group1`: two proxied inputs, one advanced field and a private one.
#[allow(dead_code)]
pub fn create_group_template() -> Template {
    Template::new()
        .with_field(
            "x_inner1",
            FieldDescriptor::new("str")
                .shown()
                .required()
                .with_proxy("inner1", "x"),
        )
        .with_field(
            "llm_inner2",
            FieldDescriptor::new("BaseLLM")
                .shown()
                .required()
                .with_proxy("inner2", "llm"),
        )
        .with_field(
            "verbose_inner2",
            FieldDescriptor::new("bool")
                .shown()
                .advanced()
                .with_proxy("inner2", "verbose"),
        )
        .with_field("_type", FieldDescriptor::new("str").shown())
}

/// A group node at `(100, 50)` wrapping [`create_inner_flow`].
#[allow(dead_code)]
pub fn create_group_node() -> Node {
    Node::new("group1", "LLMChain")
        .at(Position::new(100.0, 50.0))
        .with_template(create_group_template())
        .with_base_classes(["Chain", "LLMChain"])
        .with_flow(EmbeddedFlow {
            name: "Summarizer".to_string(),
            description: "Summarizes text".to_string(),
            data: create_inner_flow(),
            ..EmbeddedFlow::default()
        })
}

/// `text -> group1.x_inner1`, `llm -> group1.llm_inner2`, `group1 -> agent.chain`
#[allow(dead_code)]
pub fn create_outer_flow() -> FlowDocument {
    let group = create_group_node();
    let text = Node::new("text", "TextInput")
        .at(Position::new(-300.0, 0.0))
        .with_base_classes(["str"]);
    let llm = Node::new("llm", "OpenAI")
        .at(Position::new(-300.0, 200.0))
        .with_base_classes(["BaseLLM", "OpenAI"]);
    let agent = Node::new("agent", "AgentExecutor")
        .at(Position::new(600.0, 50.0))
        .with_template(
            Template::new().with_field("chain", FieldDescriptor::new("Chain").shown().required()),
        )
        .with_base_classes(["AgentExecutor"]);

    let edges = vec![
        Edge::new(
            &text.id,
            OutputPortId::for_node(&text).to_string(),
            &group.id,
            group_port_handle(&group, "x_inner1"),
        ),
        Edge::new(
            &llm.id,
            OutputPortId::for_node(&llm).to_string(),
            &group.id,
            group_port_handle(&group, "llm_inner2"),
        ),
        Edge::new(
            &group.id,
            OutputPortId::for_node(&group).to_string(),
            &agent.id,
            FieldPortId::new("Chain", "chain", &agent.id).to_string(),
        ),
    ];

    FlowDocument::new(
        "Outer",
        FlowData {
            nodes: vec![text, llm, group, agent],
            edges,
            ..FlowData::default()
        },
    )
}

/// The port identifier of `field` on `node`, as the canvas stores it.
#[allow(dead_code)]
pub fn group_port_handle(node: &Node, field: &str) -> String {
    let descriptor = node.template().get(field).expect("field exists");
    FieldPortId::for_field(descriptor, field, &node.id).to_string()
}

/// Records handle-position invalidations.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingEngine {
    pub notified: Vec<String>,
}

impl RenderEngine for RecordingEngine {
    fn notify_node_changed(&mut self, node_id: &str) {
        self.notified.push(node_id.to_string());
    }
}

/// Records opened dialogs.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingModals {
    pub opened: Vec<ModalContent>,
}

impl ModalHost for RecordingModals {
    fn open_modal(&mut self, content: ModalContent) {
        self.opened.push(content);
    }
}
