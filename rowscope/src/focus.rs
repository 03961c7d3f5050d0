//! Keyboard focus over grid cells.
//!
//! Focus is a `(row, column)` coordinate, or nothing until the first cell
//! interaction. Movement clamps at the grid edges and never wraps.

use crate::input::{Key, KeyCombo};

/// A focused cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FocusCoord {
    pub row: usize,
    pub column: usize,
}

impl FocusCoord {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Directional movement of the focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Up,
    Down,
    Left,
    Right,
    /// Tab: next column, wrapping to the next row's first column.
    Next,
    /// Shift+Tab: previous column, wrapping to the previous row's last column.
    Prev,
    /// First row, same column.
    First,
    /// Last row, same column.
    Last,
    /// Up by a number of rows.
    PageUp(usize),
    /// Down by a number of rows.
    PageDown(usize),
}

/// What a key press means to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    Navigate(NavAction),
    /// Enter: edit the focused cell or activate its row.
    Activate,
    /// Escape: leave edit mode.
    Cancel,
    /// Space: toggle selection of the focused row.
    ToggleSelect,
    /// Ctrl+A
    SelectAll,
    Unhandled,
}

/// Map a key combo to its grid meaning when no cell is being edited.
///
/// `page_rows` is the distance moved by PageUp/PageDown.
pub fn interpret(key: &KeyCombo, page_rows: usize) -> KeyIntent {
    let m = key.modifiers;
    match key.key {
        Key::Up => KeyIntent::Navigate(NavAction::Up),
        Key::Down => KeyIntent::Navigate(NavAction::Down),
        Key::Left => KeyIntent::Navigate(NavAction::Left),
        Key::Right => KeyIntent::Navigate(NavAction::Right),
        Key::Tab if m.shift => KeyIntent::Navigate(NavAction::Prev),
        Key::Tab => KeyIntent::Navigate(NavAction::Next),
        Key::BackTab => KeyIntent::Navigate(NavAction::Prev),
        Key::Home => KeyIntent::Navigate(NavAction::First),
        Key::End => KeyIntent::Navigate(NavAction::Last),
        Key::PageUp => KeyIntent::Navigate(NavAction::PageUp(page_rows)),
        Key::PageDown => KeyIntent::Navigate(NavAction::PageDown(page_rows)),
        Key::Enter => KeyIntent::Activate,
        Key::Escape => KeyIntent::Cancel,
        Key::Space | Key::Char(' ') => KeyIntent::ToggleSelect,
        Key::Char('a') | Key::Char('A') if m.ctrl => KeyIntent::SelectAll,
        _ => KeyIntent::Unhandled,
    }
}

/// Focus state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusState {
    coord: Option<FocusCoord>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<FocusCoord> {
        self.coord
    }

    pub fn is_focused(&self) -> bool {
        self.coord.is_some()
    }

    /// Focus a cell. Out-of-bounds coordinates are rejected.
    pub fn focus(&mut self, coord: FocusCoord, rows: usize, columns: usize) -> bool {
        if coord.row >= rows || coord.column >= columns {
            log::debug!(
                "[focus] rejecting {:?} outside {}x{}",
                coord,
                rows,
                columns
            );
            return false;
        }
        let changed = self.coord != Some(coord);
        self.coord = Some(coord);
        changed
    }

    pub fn clear(&mut self) -> bool {
        self.coord.take().is_some()
    }

    /// Move the focus. Returns true if the coordinate changed.
    ///
    /// With no focus, any movement lands on the first cell of a non-empty
    /// grid.
    pub fn navigate(&mut self, action: NavAction, rows: usize, columns: usize) -> bool {
        if rows == 0 || columns == 0 {
            return false;
        }
        let Some(FocusCoord { row, column }) = self.coord else {
            self.coord = Some(FocusCoord::new(0, 0));
            return true;
        };

        let last_row = rows - 1;
        let last_col = columns - 1;
        let row = row.min(last_row);
        let column = column.min(last_col);

        let next = match action {
            NavAction::Up => FocusCoord::new(row.saturating_sub(1), column),
            NavAction::Down => FocusCoord::new((row + 1).min(last_row), column),
            NavAction::Left => FocusCoord::new(row, column.saturating_sub(1)),
            NavAction::Right => FocusCoord::new(row, (column + 1).min(last_col)),
            NavAction::Next => {
                if column < last_col {
                    FocusCoord::new(row, column + 1)
                } else if row < last_row {
                    FocusCoord::new(row + 1, 0)
                } else {
                    FocusCoord::new(row, column)
                }
            }
            NavAction::Prev => {
                if column > 0 {
                    FocusCoord::new(row, column - 1)
                } else if row > 0 {
                    FocusCoord::new(row - 1, last_col)
                } else {
                    FocusCoord::new(row, column)
                }
            }
            NavAction::First => FocusCoord::new(0, column),
            NavAction::Last => FocusCoord::new(last_row, column),
            NavAction::PageUp(n) => FocusCoord::new(row.saturating_sub(n.max(1)), column),
            NavAction::PageDown(n) => FocusCoord::new(row.saturating_add(n.max(1)).min(last_row), column),
        };

        let changed = self.coord != Some(next);
        if changed {
            log::trace!("[focus] {:?}: {:?} -> {:?}", action, self.coord, next);
        }
        self.coord = Some(next);
        changed
    }
}
