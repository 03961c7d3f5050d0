//! Input handling for the Grid.

use crate::focus::{KeyIntent, interpret};
use crate::input::{ClickKind, Key, KeyCombo, Modifiers, SelectModifiers};
use crate::row::GridRow;

use super::handlers::EventResult;
use super::state::{ColumnDrag, Grid};

/// Distance from a column's right edge, in pixels, that grabs the resize
/// handle instead of sorting.
pub const RESIZE_GRIP: f64 = 4.0;

impl<R: GridRow> Grid<R> {
    /// Handle a key press while the grid has focus.
    pub fn on_key(&mut self, key: &KeyCombo) -> EventResult {
        if self.edit.is_editing() {
            return self.on_edit_key(key);
        }

        match interpret(key, self.page_rows()) {
            KeyIntent::Navigate(action) => {
                if self.focus.navigate(action, self.rows.len(), self.columns.len()) {
                    self.ensure_focus_visible();
                    self.mark_dirty();
                }
                if self.rows.is_empty() || self.columns.is_empty() {
                    EventResult::Ignored
                } else {
                    EventResult::Consumed
                }
            }
            KeyIntent::Activate => {
                let Some(coord) = self.focus.get() else {
                    return EventResult::Ignored;
                };
                let (Some(key), Some(column)) =
                    (self.index.key_at(coord.row).cloned(), self.columns.get(coord.column))
                else {
                    return EventResult::Ignored;
                };
                if column.editable {
                    let column_id = column.id.clone();
                    self.begin_edit(&key, &column_id);
                } else {
                    self.activate_row(&key);
                }
                EventResult::Consumed
            }
            KeyIntent::ToggleSelect => {
                let Some(key) = self.focused_key().cloned() else {
                    return EventResult::Ignored;
                };
                self.select_row(&key, SelectModifiers::TOGGLE);
                EventResult::Consumed
            }
            KeyIntent::SelectAll => {
                self.select_all();
                EventResult::Consumed
            }
            KeyIntent::Cancel | KeyIntent::Unhandled => EventResult::Ignored,
        }
    }

    /// Keys while a cell is in edit mode. Everything is consumed so keys
    /// typed into the editor never move focus or change selection.
    fn on_edit_key(&mut self, key: &KeyCombo) -> EventResult {
        let m = key.modifiers;
        match key.key {
            Key::Enter => {
                // A rejection keeps the editor open with the message attached.
                let _ = self.commit_draft();
            }
            Key::Escape => {
                self.cancel_edit();
            }
            Key::Tab | Key::BackTab => {
                let backwards = key.key == Key::BackTab || m.shift;
                if self.commit_draft().is_ok() {
                    let modifiers = if backwards {
                        Modifiers::SHIFT
                    } else {
                        Modifiers::NONE
                    };
                    return self.on_key(&KeyCombo::new(Key::Tab, modifiers));
                }
            }
            Key::Backspace => {
                if self.edit.backspace() {
                    self.mark_dirty();
                }
            }
            Key::Space => {
                self.edit.insert_char(' ');
                self.mark_dirty();
            }
            Key::Char(c) if !m.ctrl && !m.alt => {
                self.edit.insert_char(c);
                self.mark_dirty();
            }
            _ => {}
        }
        EventResult::Consumed
    }

    /// Handle a click on a body cell.
    ///
    /// Focuses the cell and applies the selection gesture; a double click
    /// activates the row. Clicking away from a cell under edit commits it
    /// first; if that commit is rejected the click is swallowed.
    pub fn click_cell(
        &mut self,
        row: usize,
        column: usize,
        modifiers: Modifiers,
        kind: ClickKind,
    ) -> EventResult {
        let Some(key) = self.index.key_at(row).cloned() else {
            return EventResult::Ignored;
        };
        if column >= self.columns.len() {
            return EventResult::Ignored;
        }

        let column_id = self.columns[column].id.clone();
        if self.edit.is_editing()
            && !self.edit.is_editing_cell(&key, &column_id)
            && self.blur().is_err()
        {
            return EventResult::Consumed;
        }

        self.focus_cell(row, column);
        match kind {
            ClickKind::Single => {
                self.select_row(&key, SelectModifiers::from(modifiers));
            }
            ClickKind::Double => {
                self.activate_row(&key);
            }
        }
        EventResult::Consumed
    }

    /// Handle a click on the body at a container-relative position.
    pub fn click_at(&mut self, x: f64, y: f64, modifiers: Modifiers, kind: ClickKind) -> EventResult {
        let row = if self.paged {
            let h = self.viewport.row_height();
            if !y.is_finite() || y < 0.0 || h <= 0.0 {
                None
            } else {
                let page = self.pager.page_range();
                page.start
                    .checked_add((y / h).floor() as usize)
                    .filter(|index| page.contains(index))
            }
        } else {
            self.viewport.row_index_at(y)
        };
        let (Some(row), Some(column)) = (row, self.layout.column_at_x(x)) else {
            return EventResult::Ignored;
        };
        self.click_cell(row, column, modifiers, kind)
    }

    /// Handle a click on the header row.
    ///
    /// Near a column's right edge this starts a resize drag; elsewhere it
    /// cycles the column's sort.
    pub fn click_header(&mut self, x: f64) -> EventResult {
        let Some(index) = self.layout.column_at_x(x) else {
            return EventResult::Ignored;
        };

        let offsets = self.layout.column_offsets();
        let (Some(&left), Some(column)) = (offsets.get(index), self.columns.get(index)) else {
            return EventResult::Ignored;
        };
        let id = column.id.clone();
        let right = left + self.layout.width(&id).unwrap_or(0.0);
        if right - x <= RESIZE_GRIP {
            log::debug!("[grid] {} start resize drag on {}", self.id(), id);
            self.drag = Some(ColumnDrag {
                column_id: id,
                last_x: x,
            });
            return EventResult::StartDrag;
        }

        if self.request_sort(&id) {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    /// Pointer moved during a header drag: resize by the movement since the
    /// last drag event.
    pub fn on_drag(&mut self, x: f64) -> EventResult {
        let Some(drag) = self.drag.as_mut() else {
            return EventResult::Ignored;
        };
        let delta = x - drag.last_x;
        drag.last_x = x;
        let column_id = drag.column_id.clone();
        self.resize_column(&column_id, delta);
        EventResult::Consumed
    }

    /// Pointer released: end any header drag.
    pub fn on_release(&mut self) -> EventResult {
        if self.drag.take().is_some() {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}
