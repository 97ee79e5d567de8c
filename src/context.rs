//! Seams to the collaborators a group node talks to.
//!
//! Everything the node needs from the surrounding editor is handed to it
//! explicitly through these traits, so it can run against fakes in tests.

use crate::error::FlowError;
use crate::flow::{CommandOutcome, FlowCommand};

/// The canvas engine that lays out nodes and draws edges.
pub trait RenderEngine {
    /// Asks the engine to recompute the handle positions of a node.
    fn notify_node_changed(&mut self, node_id: &str);
}

/// The editor that owns the active flow document.
pub trait EditorState {
    /// Sends an update to the document owner, which applies it.
    fn dispatch(&mut self, command: FlowCommand) -> Result<CommandOutcome, FlowError>;

    fn set_copy_paste_enabled(&mut self, enabled: bool);

    fn delete_node(&mut self, node_id: &str) -> Result<(), FlowError> {
        self.dispatch(FlowCommand::DeleteNode {
            node_id: node_id.to_string(),
        })
        .map(|_| ())
    }
}

/// What a modal dialog is asked to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalContent {
    /// The field editor for a node's advanced parameters.
    NodeSettings { node_id: String },
}

/// The dialog subsystem.
pub trait ModalHost {
    fn open_modal(&mut self, content: ModalContent);
}
