use clap::Parser;
use flowgroup::prelude::*;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;

/// Node kinds the generator draws from: (type, base classes, input field type).
const KINDS: [(&str, &[&str], &str); 4] = [
    ("PromptTemplate", &["BasePromptTemplate", "PromptTemplate"], "str"),
    ("LLMChain", &["Chain", "LLMChain"], "BasePromptTemplate"),
    ("ConversationChain", &["Chain", "ConversationChain"], "BaseMemory"),
    ("TextSplitter", &["TextSplitter"], "Document"),
];

/// A CLI tool to generate flow documents containing a group node
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_flow.json")]
    output: String,

    /// The minimum number of nodes inside the group
    #[arg(long, default_value_t = 2)]
    min: usize,

    /// The maximum number of nodes inside the group
    #[arg(long, default_value_t = 6)]
    max: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.min == 0 || cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) must be at least 1 and not greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }

    let count = rng.random_range(cli.min..=cli.max);
    println!("Generating a flow with a {}-node group...", count);

    let document = generate_flow(&mut rng, count);
    document.save(&cli.output)?;

    println!("Successfully generated and saved flow to '{}'", cli.output);
    Ok(())
}

fn random_kind(rng: &mut ThreadRng) -> (&'static str, &'static [&'static str], &'static str) {
    *KINDS.choose(rng).unwrap_or(&KINDS[0])
}

fn make_node(id: String, kind: (&str, &[&str], &str), position: Position) -> Node {
    let (node_type, base_classes, input_type) = kind;
    let template = Template::new()
        .with_field("input", FieldDescriptor::new(input_type).shown().required())
        .with_field("verbose", FieldDescriptor::new("bool").shown().advanced())
        .with_field("_type", FieldDescriptor::new("str"));
    Node::new(id, node_type)
        .at(position)
        .with_template(template)
        .with_base_classes(base_classes.iter().copied())
}

/// Builds `source -> [group of `count` chained nodes] -> sink`.
fn generate_flow(rng: &mut ThreadRng, count: usize) -> FlowDocument {
    let tag: u32 = rng.random();

    let mut inner = FlowData::default();
    for i in 0..count {
        let position = Position::new(i as f64 * 400.0, rng.random_range(0.0..200.0));
        let node = make_node(format!("Inner-{}-{:08x}", i, tag), random_kind(rng), position);
        inner.nodes.push(node);
    }
    for pair in inner.nodes.windows(2) {
        let source = OutputPortId::for_node(&pair[0]).to_string();
        let input = pair[1].template().get("input").map(FieldDescriptor::type_str);
        let target = FieldPortId::new(input.unwrap_or(""), "input", &pair[1].id).to_string();
        inner
            .edges
            .push(Edge::new(&pair[0].id, source, &pair[1].id, target));
    }

    let first = &inner.nodes[0];
    let last = &inner.nodes[count - 1];
    let output_type = last.node_type().to_string();
    let output_classes = last.base_classes().to_vec();
    let group_template = Template::new().with_field(
        format!("input_{}", first.id),
        FieldDescriptor::new(first.template().get("input").map_or("", FieldDescriptor::type_str))
            .shown()
            .required()
            .with_display_name("Input")
            .with_proxy(&first.id, "input"),
    );
    let group = Node::new("Group-0", output_type)
        .at(Position::new(600.0, 300.0))
        .with_template(group_template)
        .with_base_classes(output_classes)
        .with_flow(EmbeddedFlow {
            name: "Generated Group".to_string(),
            description: format!("{} chained nodes", count),
            data: inner,
            ..EmbeddedFlow::default()
        });

    let source = make_node(
        "Source-0".to_string(),
        KINDS[0],
        Position::new(0.0, 300.0),
    );
    let sink = make_node("Sink-0".to_string(), random_kind(rng), Position::new(1200.0, 300.0));

    let edges = [
        group
            .template()
            .iter()
            .next()
            .map(|f| FieldPortId::for_field(&f.descriptor, &f.key, &group.id).to_string())
            .map(|handle| {
                Edge::new(
                    &source.id,
                    OutputPortId::for_node(&source).to_string(),
                    &group.id,
                    handle,
                )
            }),
        Some(Edge::new(
            &group.id,
            OutputPortId::for_node(&group).to_string(),
            &sink.id,
            FieldPortId::new(
                sink.template().get("input").map_or("", FieldDescriptor::type_str),
                "input",
                &sink.id,
            )
            .to_string(),
        )),
    ];

    FlowDocument::new(
        "Generated flow",
        FlowData {
            nodes: vec![source, group, sink],
            edges: edges.into_iter().flatten().collect(),
            ..FlowData::default()
        },
    )
}
