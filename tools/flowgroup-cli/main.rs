use clap::{Parser, Subcommand};
use flowgroup::prelude::*;
use std::time::Instant;

/// Inspect and expand group nodes in flow documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional type catalog JSON (`{category: {TypeName: ...}}`) used for port colors
    #[arg(short, long, global = true)]
    types: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the port surface of every group node in a flow
    Inspect {
        /// Path to the flow JSON file
        flow_path: String,
    },
    /// Dissolve a group node into its sub-flow
    Expand {
        /// Path to the flow JSON file
        flow_path: String,
        /// Id of the group node to expand
        node_id: String,
        /// Where to write the expanded flow (prints to stdout if omitted)
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Decode a port identifier
    Decode {
        handle: String,
        /// Decode as a node output port instead of a field port
        #[arg(long)]
        output: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let types = match &cli.types {
        Some(path) => load_types(path),
        None => TypeRegistry::default(),
    };

    let result = match cli.command {
        Command::Inspect { flow_path } => inspect(&flow_path, &types),
        Command::Expand {
            flow_path,
            node_id,
            out,
        } => expand(&flow_path, &node_id, out.as_deref()),
        Command::Decode { handle, output } => decode(&handle, output),
    };

    if let Err(e) = result {
        exit_with_error(&e.to_string());
    }
}

fn load_types(path: &str) -> TypeRegistry {
    let json = std::fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read type catalog '{}': {}", path, e))
    });
    TypeRegistry::from_catalog_json(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load type catalog: {}", e)))
}

fn inspect(flow_path: &str, types: &TypeRegistry) -> Result<()> {
    let document = FlowDocument::from_file(flow_path)?;
    let groups: Vec<&Node> = document.data.nodes.iter().filter(|n| n.is_group()).collect();
    if groups.is_empty() {
        println!("No group nodes in '{}'", flow_path);
        return Ok(());
    }

    for node in groups {
        let presenter = GroupNodePresenter::new(node, node.position)?;
        let view = presenter.render(node, types);

        println!("\n=== {} ({}) ===", view.title.text(), view.node_id);
        println!("{}", view.description.text());
        match view.settings {
            Some(SettingsAffordance { warning: true }) => {
                println!("Settings: available, required advanced fields")
            }
            Some(SettingsAffordance { warning: false }) => println!("Settings: available"),
            None => println!("Settings: none"),
        }
        for port in &view.ports {
            let side = match port.side {
                Side::Left => "<-",
                Side::Right => "->",
            };
            let required = if port.required { " *" } else { "" };
            println!(
                "  {} {:<24} {:<32} [{}] {}{}",
                side,
                port.title,
                port.tooltip,
                port.color,
                port.handle(),
                required
            );
        }
    }
    Ok(())
}

fn expand(flow_path: &str, node_id: &str, out: Option<&str>) -> Result<()> {
    let document = FlowDocument::from_file(flow_path)?;
    let position = document
        .data
        .node(node_id)
        .map(|n| n.position)
        .ok_or_else(|| FlowError::NodeNotFound(node_id.to_string()))?;

    let mut editor = Editor::new(document);
    let start = Instant::now();
    let outcome = editor.dispatch(FlowCommand::ExpandGroup {
        node_id: node_id.to_string(),
        position,
    })?;
    let duration = start.elapsed();

    if let CommandOutcome::Expanded(expansion) = outcome {
        eprintln!(
            "Expanded '{}' in {:?}: {} nodes, {} internal edges, {} rewired, {} dropped",
            node_id,
            duration,
            expansion.nodes.len(),
            expansion.edges.len(),
            expansion.rewired.len(),
            expansion.dropped.len()
        );
    }

    let document = editor.into_document();
    match out {
        Some(path) => {
            document.save(path)?;
            eprintln!("Wrote expanded flow to '{}'", path);
        }
        None => println!("{}", document.to_json()?),
    }
    Ok(())
}

fn decode(handle: &str, output: bool) -> Result<()> {
    if output {
        let id: OutputPortId = handle.parse()?;
        println!("type:         {}", id.node_type);
        println!("node:         {}", id.node_id);
        println!("base classes: {}", id.base_classes.join(", "));
    } else {
        let id: FieldPortId = handle.parse()?;
        println!("type:  {}", id.type_name);
        println!("field: {}", id.field);
        println!("node:  {}", id.owner_id);
        if let Some(proxy) = &id.proxy {
            println!("proxy: {}.{}", proxy.node_id, proxy.field);
        }
    }
    Ok(())
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
