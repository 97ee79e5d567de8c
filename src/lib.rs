//! # flowgroup - Group Nodes for Graph-Based Flow Editors
//!
//! **flowgroup** models the *group node* of a visual flow editor: a whole
//! sub-flow collapsed into a single unit on the canvas. The collapsed node
//! exposes a stable, typed port surface to the outer graph and can be expanded
//! back into its constituent nodes without breaking existing wiring.
//!
//! ## Core Pieces
//!
//! 1.  **Template reading** ([`schema`]): a node's field template decides which
//!     fields become input ports, which act as root (aggregate) ports, and
//!     whether the advanced-settings affordance is shown.
//! 2.  **Port identifiers** ([`port`]): the `|`-delimited strings edges are
//!     stored with, as typed structs with a `Display`/`FromStr` pair.
//! 3.  **Presentation** ([`presenter`]): the group node's UI state and its
//!     render model. Changes leave it only as [`flow::FlowCommand`]s.
//! 4.  **Expansion** ([`expand`]): re-anchors the sub-flow at the group's
//!     position, merges it into the outer flow and rewires boundary edges.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowgroup::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let document = FlowDocument::from_file("path/to/flow.json")?;
//!     let group = document
//!         .data
//!         .nodes
//!         .iter()
//!         .find(|n| n.is_group())
//!         .ok_or("no group node in flow")?
//!         .clone();
//!
//!     let types = TypeRegistry::default();
//!     let presenter = GroupNodePresenter::new(&group, group.position)?;
//!     for port in presenter.render(&group, &types).ports {
//!         println!("{:?} {} ({})", port.side, port.title, port.handle());
//!     }
//!
//!     // Expanding goes through the editor, which owns the document.
//!     let mut editor = Editor::new(document);
//!     presenter.expand(&mut editor)?;
//!     println!("{}", editor.document().to_json()?);
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod editor;
pub mod error;
pub mod expand;
pub mod flow;
pub mod port;
pub mod prelude;
pub mod presenter;
pub mod registry;
pub mod schema;
