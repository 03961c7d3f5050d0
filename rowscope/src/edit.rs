//! Cell edit controller.
//!
//! At most one cell is in edit mode. Entering edit mode is refused for
//! non-editable columns and while another cell is editing; the owner must
//! commit or cancel first.

use crate::row::CellValue;

/// The cell being edited.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EditCoord<K> {
    pub row: K,
    pub column_id: String,
}

/// Edit mode state for one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct EditState<K> {
    pub coord: EditCoord<K>,
    /// Value of the cell when editing began.
    pub original: CellValue,
    /// Pending text typed by the user.
    pub draft: String,
    /// Message from the last rejected commit, for inline display.
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EditController<K> {
    state: Option<EditState<K>>,
}

impl<K> Default for EditController<K> {
    fn default() -> Self {
        Self { state: None }
    }
}

impl<K: Clone + PartialEq + std::fmt::Debug> EditController<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<&EditState<K>> {
        self.state.as_ref()
    }

    pub fn coord(&self) -> Option<&EditCoord<K>> {
        self.state.as_ref().map(|s| &s.coord)
    }

    pub fn is_editing(&self) -> bool {
        self.state.is_some()
    }

    /// Check whether a specific cell is the one being edited.
    pub fn is_editing_cell(&self, row: &K, column_id: &str) -> bool {
        self.coord()
            .is_some_and(|c| &c.row == row && c.column_id == column_id)
    }

    /// Enter edit mode. Returns false if refused.
    pub fn begin(&mut self, row: K, column_id: &str, editable: bool, current: CellValue) -> bool {
        if !editable {
            log::debug!("[edit] column {} is not editable", column_id);
            return false;
        }
        if let Some(active) = &self.state {
            log::debug!(
                "[edit] refusing {:?}/{}: {:?}/{} is already editing",
                row,
                column_id,
                active.coord.row,
                active.coord.column_id
            );
            return false;
        }
        log::debug!("[edit] begin {:?}/{}", row, column_id);
        self.state = Some(EditState {
            coord: EditCoord {
                row,
                column_id: column_id.to_string(),
            },
            draft: current.to_string(),
            original: current,
            error: None,
        });
        true
    }

    /// Replace the draft text.
    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        state.draft = text.into();
        true
    }

    pub fn insert_char(&mut self, c: char) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        state.draft.push(c);
        true
    }

    pub fn backspace(&mut self) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        state.draft.pop().is_some()
    }

    /// Record a rejected commit; edit mode continues.
    pub fn reject(&mut self, reason: impl Into<String>) {
        if let Some(state) = self.state.as_mut() {
            let reason = reason.into();
            log::debug!("[edit] commit rejected: {}", reason);
            state.error = Some(reason);
        }
    }

    /// Leave edit mode after an accepted commit.
    pub fn finish(&mut self) -> Option<EditState<K>> {
        self.state.take()
    }

    /// Discard the pending value and leave edit mode.
    pub fn cancel(&mut self) -> bool {
        match self.state.take() {
            Some(state) => {
                log::debug!(
                    "[edit] cancel {:?}/{}",
                    state.coord.row,
                    state.coord.column_id
                );
                true
            }
            None => false,
        }
    }
}
