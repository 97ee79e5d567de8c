//! The render model a group node hands to the canvas.

use crate::port::PortId;
use crate::registry::ColorToken;

/// Shown when a group has no description.
pub const DESCRIPTION_PLACEHOLDER: &str = "No description";

/// Title shared by all root-field ports.
pub const ROOT_PORT_TITLE: &str = "Input";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    /// One regular template field.
    Input,
    /// A root field standing for the whole sub-flow's input.
    RootInput,
    /// The node's own produced type.
    Output,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortView {
    pub id: PortId,
    pub kind: PortKind,
    pub side: Side,
    pub title: String,
    pub tooltip: String,
    pub color: ColorToken,
    pub required: bool,
    /// Type name(s) edge validation checks against, `|`-joined.
    pub accepted_type: String,
}

impl PortView {
    /// The identifier as the canvas sees it.
    pub fn handle(&self) -> String {
        self.id.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextView {
    Editing { buffer: String },
    Display { text: String },
}

impl TextView {
    pub fn is_editing(&self) -> bool {
        matches!(self, TextView::Editing { .. })
    }

    pub fn text(&self) -> &str {
        match self {
            TextView::Editing { buffer } => buffer,
            TextView::Display { text } => text,
        }
    }
}

/// The button that opens the advanced field editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsAffordance {
    /// Some advanced field is required.
    pub warning: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    pub node_id: String,
    pub selected: bool,
    pub valid: bool,
    pub icon_color: ColorToken,
    pub title: TextView,
    pub description: TextView,
    /// `None` when the node has no advanced field to show.
    pub settings: Option<SettingsAffordance>,
    /// Ports in render order.
    pub ports: Vec<PortView>,
}

impl NodeView {
    pub fn ports_of(&self, kind: PortKind) -> impl Iterator<Item = &PortView> {
        self.ports.iter().filter(move |p| p.kind == kind)
    }

    pub fn port(&self, handle: &str) -> Option<&PortView> {
        self.ports.iter().find(|p| p.handle() == handle)
    }
}
