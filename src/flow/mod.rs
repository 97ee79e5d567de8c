//! The flow document model.
//!
//! These types mirror the flow-document JSON the editor persists: nodes carry a
//! canvas `position` and a `data.node` record with the field `template`, the
//! `base_classes` of their output and, for group nodes, the embedded sub-flow.
//! Keys that this crate does not interpret are kept in `extra` maps.

use crate::error::FlowError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::ops::Add;

pub mod command;
pub mod store;
pub mod template;

pub use command::*;
pub use store::*;
pub use template::*;

/// A point on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// A connection between two node ports, addressed by port identifier strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    #[serde(rename = "sourceHandle")]
    pub source_handle: String,
    pub target: String,
    #[serde(rename = "targetHandle")]
    pub target_handle: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Edge {
    /// Creates an edge with the id the canvas derives from its endpoints.
    pub fn new(
        source: impl Into<String>,
        source_handle: impl Into<String>,
        target: impl Into<String>,
        target_handle: impl Into<String>,
    ) -> Self {
        let source = source.into();
        let source_handle = source_handle.into();
        let target = target.into();
        let target_handle = target_handle.into();
        Self {
            id: Self::derive_id(&source, &source_handle, &target, &target_handle),
            source,
            source_handle,
            target,
            target_handle,
            extra: Map::new(),
        }
    }

    pub fn derive_id(source: &str, source_handle: &str, target: &str, target_handle: &str) -> String {
        format!(
            "reactflow__edge-{}{}-{}{}",
            source, source_handle, target, target_handle
        )
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// The sub-flow collapsed into a group node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedFlow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub data: FlowData,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `data.node` record of a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(default)]
    pub template: Template,
    #[serde(default)]
    pub base_classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<EmbeddedFlow>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `data` payload of a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default)]
    pub id: String,
    /// The node's type tag, e.g. `LLMChain`. Groups carry the type of their output.
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default)]
    pub node: NodeRecord,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A node on the canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    /// Canvas component used to draw the node (`genericNode`, `groupNode`).
    #[serde(rename = "type", default)]
    pub component: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: NodeData,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            id: id.clone(),
            component: "genericNode".to_string(),
            data: NodeData {
                id,
                node_type: node_type.into(),
                ..NodeData::default()
            },
            ..Node::default()
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.data.node.template = template;
        self
    }

    pub fn with_base_classes<I, S>(mut self, base_classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data.node.base_classes = base_classes.into_iter().map(Into::into).collect();
        self
    }

    /// Turns the node into a group node wrapping `flow`.
    pub fn with_flow(mut self, flow: EmbeddedFlow) -> Self {
        self.component = "groupNode".to_string();
        self.data.node.flow = Some(flow);
        self
    }

    pub fn node_type(&self) -> &str {
        &self.data.node_type
    }

    pub fn template(&self) -> &Template {
        &self.data.node.template
    }

    pub fn base_classes(&self) -> &[String] {
        &self.data.node.base_classes
    }

    pub fn embedded_flow(&self) -> Option<&EmbeddedFlow> {
        self.data.node.flow.as_ref()
    }

    pub fn is_group(&self) -> bool {
        self.data.node.flow.is_some()
    }
}

/// The node and edge sets of a flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowData {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FlowData {
    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn node_mut(&mut self, node_id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == node_id)
    }

    pub fn edge(&self, edge_id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == edge_id)
    }

    /// Removes a node together with every edge attached to it.
    pub fn remove_node(&mut self, node_id: &str) -> Option<Node> {
        let index = self.nodes.iter().position(|n| n.id == node_id)?;
        self.edges.retain(|e| !e.touches(node_id));
        Some(self.nodes.remove(index))
    }
}

/// A complete flow document as stored by the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub data: FlowData,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FlowDocument {
    pub fn new(name: impl Into<String>, data: FlowData) -> Self {
        Self {
            name: name.into(),
            data,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, FlowError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, FlowError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads a flow document from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, FlowError> {
        let content = fs::read_to_string(path)
            .map_err(|e| FlowError::Io(format!("Could not read file '{}': {}", path, e)))?;
        Self::from_json(&content)
    }

    /// Saves the flow document to a file as pretty-printed JSON.
    pub fn save(&self, path: &str) -> Result<(), FlowError> {
        let json = self.to_json()?;
        fs::write(path, json)
            .map_err(|e| FlowError::Io(format!("Could not write file '{}': {}", path, e)))
    }
}
