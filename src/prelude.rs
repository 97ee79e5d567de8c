//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the flowgroup crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowgroup::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let id: FieldPortId = "str|text|group-1|inner-1|prompt".parse()?;
//! assert_eq!(id.resolved_target(), ("inner-1", "prompt"));
//! # Ok(())
//! # }
//! ```

// Document model
pub use crate::flow::{
    CommandOutcome, Edge, EmbeddedFlow, FieldDescriptor, FieldKind, FlowCommand, FlowData,
    FlowDocument, FlowStore, FlowUpdate, Node, Position, Proxy, StoredFlow, Template,
};

// Ports
pub use crate::port::{FieldPortId, OutputPortId, PortId, ProxyTarget};
pub use crate::schema::{PortLayout, SettingsIndicator};

// Presentation and collaborators
pub use crate::context::{EditorState, ModalContent, ModalHost, RenderEngine};
pub use crate::editor::Editor;
pub use crate::presenter::{
    AnchorMetrics, GroupNodePresenter, NodeView, PortKind, PortView, SettingsAffordance, Side,
    TextView,
};
pub use crate::registry::{ColorToken, TypeRegistry};

// Expansion
pub use crate::expand::{Expansion, expand_group};

// Error types
pub use crate::error::{ExpandError, FlowError, PortIdError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
