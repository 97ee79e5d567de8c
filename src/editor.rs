use crate::context::EditorState;
use crate::error::FlowError;
use crate::flow::{CommandOutcome, FlowCommand, FlowDocument};

/// Owns the active flow document and is the only thing that mutates it.
///
/// Commands are applied synchronously in arrival order; the last one wins.
#[derive(Debug)]
pub struct Editor {
    document: FlowDocument,
    copy_paste_enabled: bool,
    dirty: bool,
}

impl Editor {
    pub fn new(document: FlowDocument) -> Self {
        Self {
            document,
            copy_paste_enabled: true,
            dirty: false,
        }
    }

    pub fn document(&self) -> &FlowDocument {
        &self.document
    }

    pub fn into_document(self) -> FlowDocument {
        self.document
    }

    pub fn copy_paste_enabled(&self) -> bool {
        self.copy_paste_enabled
    }

    /// Whether any command changed the document since the last save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }
}

impl EditorState for Editor {
    fn dispatch(&mut self, command: FlowCommand) -> Result<CommandOutcome, FlowError> {
        let outcome = self.document.apply(command)?;
        if outcome.is_change() {
            self.dirty = true;
        }
        Ok(outcome)
    }

    fn set_copy_paste_enabled(&mut self, enabled: bool) {
        log::debug!("Copy/paste enabled: {}", enabled);
        self.copy_paste_enabled = enabled;
    }
}
