use super::{FlowDocument, Position};
use crate::error::FlowError;
use crate::expand::{self, Expansion};

/// An update message addressed to the document that owns a node.
///
/// Components never write into a [`FlowDocument`] directly; they send one of
/// these to its owner, which applies it with [`FlowDocument::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum FlowCommand {
    /// Sets the name stored on a group node's embedded flow.
    RenameGroup { node_id: String, name: String },
    /// Sets the description stored on a group node's embedded flow.
    DescribeGroup {
        node_id: String,
        description: String,
    },
    /// Removes a node and every edge attached to it.
    DeleteNode { node_id: String },
    /// Dissolves a group node into its sub-flow, anchored at `position`.
    ExpandGroup { node_id: String, position: Position },
}

/// What applying a [`FlowCommand`] did to the document.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// The command left the document exactly as it was.
    Unchanged,
    Changed,
    Expanded(Expansion),
}

impl CommandOutcome {
    pub fn is_change(&self) -> bool {
        !matches!(self, CommandOutcome::Unchanged)
    }
}

impl FlowDocument {
    /// Applies a command to the document.
    pub fn apply(&mut self, command: FlowCommand) -> Result<CommandOutcome, FlowError> {
        log::debug!("Applying {:?}", command);
        match command {
            FlowCommand::RenameGroup { node_id, name } => {
                let flow = self.group_flow_mut(&node_id)?;
                if flow.name == name {
                    return Ok(CommandOutcome::Unchanged);
                }
                flow.name = name;
                Ok(CommandOutcome::Changed)
            }
            FlowCommand::DescribeGroup {
                node_id,
                description,
            } => {
                let flow = self.group_flow_mut(&node_id)?;
                if flow.description == description {
                    return Ok(CommandOutcome::Unchanged);
                }
                flow.description = description;
                Ok(CommandOutcome::Changed)
            }
            FlowCommand::DeleteNode { node_id } => {
                self.data
                    .remove_node(&node_id)
                    .ok_or_else(|| FlowError::NodeNotFound(node_id.clone()))?;
                log::info!("Deleted node '{}'", node_id);
                Ok(CommandOutcome::Changed)
            }
            FlowCommand::ExpandGroup { node_id, position } => {
                let expansion = expand::expand_group(&mut self.data, &node_id, position)?;
                Ok(CommandOutcome::Expanded(expansion))
            }
        }
    }

    fn group_flow_mut(&mut self, node_id: &str) -> Result<&mut super::EmbeddedFlow, FlowError> {
        let node = self
            .data
            .node_mut(node_id)
            .ok_or_else(|| FlowError::NodeNotFound(node_id.to_string()))?;
        node.data
            .node
            .flow
            .as_mut()
            .ok_or_else(|| FlowError::NotAGroup(node_id.to_string()))
    }
}
