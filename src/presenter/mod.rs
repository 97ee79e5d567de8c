//! The group node: a whole sub-flow collapsed into one unit on the canvas.
//!
//! [`GroupNodePresenter`] keeps the node's transient UI state (edit buffers,
//! validity, the measured handle anchor) and turns the node's template into a
//! [`NodeView`]. It never touches the flow document itself; changes go to the
//! [`EditorState`] as [`FlowCommand`]s.

use crate::context::{EditorState, ModalContent, ModalHost, RenderEngine};
use crate::error::FlowError;
use crate::flow::{CommandOutcome, FlowCommand, Node, Position, TemplateField};
use crate::port::{FieldPortId, OutputPortId, PortId, label};
use crate::registry::{CUSTOM_CATEGORY, TypeRegistry};
use crate::schema::{PortLayout, SettingsIndicator};

mod text;
mod view;

pub use text::*;
pub use view::*;

/// Geometry of the anchor element, measured once layout has settled.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnchorMetrics {
    pub offset_top: f64,
    pub client_height: f64,
}

impl AnchorMetrics {
    /// Vertical center of the anchor, or `None` while it is not laid out yet.
    fn center(&self) -> Option<f64> {
        if self.offset_top == 0.0 || self.client_height == 0.0 {
            return None;
        }
        Some(self.offset_top + self.client_height / 2.0)
    }
}

/// Summary of a template's port surface, used to notice layout changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Surface {
    inputs: usize,
    roots: usize,
    settings: SettingsIndicator,
}

impl Surface {
    fn of(node: &Node) -> Self {
        let layout = PortLayout::read(node.template());
        Self {
            inputs: layout.inputs.len(),
            roots: layout.roots.len(),
            settings: layout.settings,
        }
    }
}

pub struct GroupNodePresenter {
    node_id: String,
    position: Position,
    selected: bool,
    valid: bool,
    name: EditableText,
    description: EditableText,
    surface: Surface,
    anchor_offset: f64,
    notified_id: Option<String>,
    layout_dirty: bool,
}

impl GroupNodePresenter {
    /// Binds a presenter to a group node at its current canvas position.
    ///
    /// The title starts in edit mode, so a freshly created group asks for a name.
    pub fn new(node: &Node, position: Position) -> Result<Self, FlowError> {
        let flow = node
            .embedded_flow()
            .ok_or_else(|| FlowError::NotAGroup(node.id.clone()))?;
        let mut name = EditableText::new(flow.name.clone());
        name.begin_edit();
        Ok(Self {
            node_id: node.id.clone(),
            position,
            selected: false,
            valid: true,
            name,
            description: EditableText::new(flow.description.clone()),
            surface: Surface::of(node),
            anchor_offset: 0.0,
            notified_id: None,
            layout_dirty: true,
        })
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn move_to(&mut self, position: Position) {
        self.position = position;
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Set by the external validation pass.
    pub fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }

    pub fn name(&self) -> &EditableText {
        &self.name
    }

    pub fn description(&self) -> &EditableText {
        &self.description
    }

    /// Re-reads the node after the document changed.
    pub fn sync(&mut self, node: &Node) {
        self.position = node.position;
        if node.id != self.node_id {
            log::debug!("Group node '{}' is now '{}'", self.node_id, node.id);
            self.node_id = node.id.clone();
            self.layout_dirty = true;
        }
        if let Some(flow) = node.embedded_flow() {
            self.name.sync(&flow.name);
            self.description.sync(&flow.description);
        }
        let surface = Surface::of(node);
        if surface != self.surface {
            self.surface = surface;
            self.layout_dirty = true;
        }
    }

    /// Builds the render model of `node`.
    ///
    /// Never fails: missing types or unregistered colors degrade to the
    /// `unknown` color and empty labels.
    pub fn render(&self, node: &Node, types: &TypeRegistry) -> NodeView {
        let layout = PortLayout::read(node.template());

        let mut ports: Vec<PortView> = layout
            .inputs
            .iter()
            .map(|field| input_port(node, field, types))
            .collect();

        if layout.exposes_output() {
            ports.push(output_port(node, types));
        } else {
            ports.extend(layout.roots.iter().map(|field| root_port(node, field, types)));
        }

        log::debug!("Rendered group node '{}' with {} ports", node.id, ports.len());

        NodeView {
            node_id: node.id.clone(),
            selected: self.selected,
            valid: self.valid,
            icon_color: types.category_color(CUSTOM_CATEGORY),
            title: text_view(&self.name, None),
            description: text_view(&self.description, Some(DESCRIPTION_PLACEHOLDER)),
            settings: layout
                .settings
                .has_advanced_shown
                .then_some(SettingsAffordance {
                    warning: layout.settings.has_advanced_required,
                }),
            ports,
        }
    }

    pub fn begin_name_edit(&mut self) {
        if self.name.begin_edit() {
            self.layout_dirty = true;
        }
    }

    pub fn edit_name(&mut self, text: impl Into<String>) {
        self.name.set_buffer(text);
    }

    /// Commits the title when it loses focus.
    pub fn finish_name_edit(
        &mut self,
        editor: &mut dyn EditorState,
    ) -> Result<CommandOutcome, FlowError> {
        self.layout_dirty = true;
        match self.name.commit() {
            Commit::Changed(name) => editor.dispatch(FlowCommand::RenameGroup {
                node_id: self.node_id.clone(),
                name,
            }),
            Commit::Unchanged | Commit::Reverted => Ok(CommandOutcome::Unchanged),
        }
    }

    /// Opens the description editor. Copy/paste stays off until it closes.
    pub fn begin_description_edit(&mut self, editor: &mut dyn EditorState) {
        if self.description.begin_edit() {
            editor.set_copy_paste_enabled(false);
            self.layout_dirty = true;
        }
    }

    pub fn edit_description(&mut self, text: impl Into<String>) {
        self.description.set_buffer(text);
    }

    /// Commits the description when it loses focus.
    pub fn finish_description_edit(
        &mut self,
        editor: &mut dyn EditorState,
    ) -> Result<CommandOutcome, FlowError> {
        self.layout_dirty = true;
        editor.set_copy_paste_enabled(true);
        match self.description.commit() {
            Commit::Changed(description) => editor.dispatch(FlowCommand::DescribeGroup {
                node_id: self.node_id.clone(),
                description,
            }),
            Commit::Unchanged | Commit::Reverted => Ok(CommandOutcome::Unchanged),
        }
    }

    pub fn open_settings(&self, modals: &mut dyn ModalHost) {
        modals.open_modal(ModalContent::NodeSettings {
            node_id: self.node_id.clone(),
        });
    }

    /// Dissolves the group into its sub-flow at the node's current position.
    ///
    /// The presenter is stale afterwards; the canvas re-renders the merged flow.
    pub fn expand(&self, editor: &mut dyn EditorState) -> Result<CommandOutcome, FlowError> {
        editor.dispatch(FlowCommand::ExpandGroup {
            node_id: self.node_id.clone(),
            position: self.position,
        })
    }

    pub fn delete(&self, editor: &mut dyn EditorState) -> Result<(), FlowError> {
        editor.delete_node(&self.node_id)
    }

    /// Post-layout step, run once the canvas has measured the current render.
    ///
    /// Tells the engine to recompute this node's handle positions when the id
    /// changed, the anchor moved, or a layout-affecting change happened since
    /// the previous pass. Returns whether the engine was notified.
    pub fn after_layout(
        &mut self,
        anchor: Option<AnchorMetrics>,
        engine: &mut dyn RenderEngine,
    ) -> bool {
        let mut notify =
            self.layout_dirty || self.notified_id.as_deref() != Some(self.node_id.as_str());

        if let Some(center) = anchor.as_ref().and_then(AnchorMetrics::center) {
            if center != self.anchor_offset {
                self.anchor_offset = center;
                notify = true;
            }
        }

        if notify {
            engine.notify_node_changed(&self.node_id);
            self.notified_id = Some(self.node_id.clone());
            self.layout_dirty = false;
        }
        notify
    }

    /// The last measured anchor center, `0.0` before the first measurement.
    pub fn anchor_offset(&self) -> f64 {
        self.anchor_offset
    }
}

fn text_view(text: &EditableText, placeholder: Option<&str>) -> TextView {
    if text.is_editing() {
        return TextView::Editing {
            buffer: text.buffer().to_string(),
        };
    }
    let shown = match placeholder {
        Some(placeholder) if text.committed().trim().is_empty() => placeholder,
        _ => text.committed(),
    };
    TextView::Display {
        text: shown.to_string(),
    }
}

fn input_port(node: &Node, field: &TemplateField, types: &TypeRegistry) -> PortView {
    let descriptor = &field.descriptor;
    PortView {
        id: PortId::Field(FieldPortId::for_field(descriptor, &field.key, &node.id)),
        kind: PortKind::Input,
        side: Side::Left,
        title: label::field_title(descriptor, &field.key),
        tooltip: label::field_tooltip(descriptor),
        color: types.color_for(descriptor.type_str()),
        required: descriptor.required,
        accepted_type: descriptor.type_str().to_string(),
    }
}

fn root_port(node: &Node, field: &TemplateField, types: &TypeRegistry) -> PortView {
    PortView {
        id: PortId::Field(FieldPortId::for_field(&field.descriptor, &field.key, &node.id)),
        kind: PortKind::RootInput,
        side: Side::Right,
        title: ROOT_PORT_TITLE.to_string(),
        tooltip: label::base_class_tooltip(node.base_classes()),
        color: types.color_for(node.node_type()),
        required: false,
        accepted_type: label::accepted_types(node.base_classes()),
    }
}

fn output_port(node: &Node, types: &TypeRegistry) -> PortView {
    PortView {
        id: PortId::Output(OutputPortId::for_node(node)),
        kind: PortKind::Output,
        side: Side::Right,
        title: node.node_type().to_string(),
        tooltip: label::base_class_tooltip(node.base_classes()),
        color: types.color_for(node.node_type()),
        required: false,
        accepted_type: label::accepted_types(node.base_classes()),
    }
}
