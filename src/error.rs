use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while decoding a port identifier string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortIdError {
    #[error("Port identifier is empty")]
    Empty,

    #[error("Port identifier '{id}' has {found} segments, expected {expected}")]
    SegmentCount {
        id: String,
        found: usize,
        expected: &'static str,
    },

    #[error("Port identifier '{id}' has an empty segment at position {index}")]
    EmptySegment { id: String, index: usize },
}

/// Errors that can occur when expanding a group node back into its sub-flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    #[error("Node '{node_id}' not found in the active flow")]
    NodeNotFound { node_id: String },

    #[error("Node '{node_id}' has no embedded sub-flow and cannot be expanded")]
    NotAGroup { node_id: String },

    #[error(
        "Sub-flow of group '{group_id}' reuses id '{id}', which already exists in the active flow"
    )]
    IdCollision { group_id: String, id: String },
}

/// Errors that can occur while loading, storing or mutating flow documents.
#[derive(Error, Debug, Clone)]
pub enum FlowError {
    #[error("Failed to parse flow JSON: {0}")]
    Json(String),

    #[error("File operation failed: {0}")]
    Io(String),

    #[error("Node '{0}' not found in the flow")]
    NodeNotFound(String),

    #[error("Node '{0}' is not a group node")]
    NotAGroup(String),

    #[error("Flow '{0}' not found")]
    UnknownFlow(Uuid),

    #[error(transparent)]
    Expand(#[from] ExpandError),
}

impl From<serde_json::Error> for FlowError {
    fn from(e: serde_json::Error) -> Self {
        FlowError::Json(e.to_string())
    }
}
