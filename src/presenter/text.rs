/// What finishing an edit did to the committed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    /// The buffer replaced the committed value.
    Changed(String),
    /// The buffer equalled the committed value.
    Unchanged,
    /// The buffer was blank and was thrown away.
    Reverted,
}

/// A committed text value with a transient edit buffer.
///
/// Blank edits are never committed; the buffer falls back to the last
/// committed value instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableText {
    committed: String,
    buffer: String,
    editing: bool,
}

impl EditableText {
    pub fn new(committed: impl Into<String>) -> Self {
        let committed = committed.into();
        Self {
            buffer: committed.clone(),
            committed,
            editing: false,
        }
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Enters edit mode with the buffer primed from the committed value.
    /// Returns `false` if already editing.
    pub fn begin_edit(&mut self) -> bool {
        if self.editing {
            return false;
        }
        self.buffer = self.committed.clone();
        self.editing = true;
        true
    }

    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// Leaves edit mode.
    pub fn commit(&mut self) -> Commit {
        self.editing = false;
        if self.buffer.trim().is_empty() {
            self.buffer = self.committed.clone();
            return Commit::Reverted;
        }
        if self.buffer == self.committed {
            return Commit::Unchanged;
        }
        self.committed = self.buffer.clone();
        Commit::Changed(self.committed.clone())
    }

    /// Takes over a committed value changed elsewhere. Ignored while editing.
    pub fn sync(&mut self, committed: &str) {
        if self.editing || self.committed == committed {
            return;
        }
        self.committed = committed.to_string();
        self.buffer = self.committed.clone();
    }
}
