//! Outbound callbacks and event results.

use crate::row::CellValue;
use crate::sort::SortDirection;

/// What the grid did with a key press or pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Not meant for the grid; the host may use it.
    Ignored,
    /// The grid acted on it.
    Consumed,
    /// A header resize grip was grabbed; route pointer moves to `on_drag`
    /// until `on_release`.
    StartDrag,
}

impl EventResult {
    /// Whether the host should stop handling the event itself.
    pub fn is_handled(self) -> bool {
        self != Self::Ignored
    }
}

pub type SortRequestFn = Box<dyn FnMut(&str, Option<SortDirection>)>;
pub type SelectionChangeFn<K> = Box<dyn FnMut(&[K])>;
pub type CellCommitFn<K> = Box<dyn FnMut(&K, &str, &CellValue) -> Result<(), String>>;
pub type RowActivateFn<K> = Box<dyn FnMut(&K)>;

/// Callbacks into the data owner.
///
/// All are optional. Without `on_cell_commit` every commit is accepted.
pub struct GridHandlers<K> {
    /// The user cycled a column's sort. The owner sorts and calls
    /// `set_rows`; `None` means back to the natural order.
    pub on_sort_request: Option<SortRequestFn>,
    /// The selected set changed. Keys are in row order.
    pub on_selection_change: Option<SelectionChangeFn<K>>,
    /// A cell value is being committed. Returning `Err` rejects it and
    /// keeps the cell in edit mode with the message attached.
    pub on_cell_commit: Option<CellCommitFn<K>>,
    /// A row was activated (double click, or Enter on a non-editable cell).
    pub on_row_activate: Option<RowActivateFn<K>>,
}

impl<K> Default for GridHandlers<K> {
    fn default() -> Self {
        Self {
            on_sort_request: None,
            on_selection_change: None,
            on_cell_commit: None,
            on_row_activate: None,
        }
    }
}

impl<K> std::fmt::Debug for GridHandlers<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridHandlers")
            .field("on_sort_request", &self.on_sort_request.is_some())
            .field("on_selection_change", &self.on_selection_change.is_some())
            .field("on_cell_commit", &self.on_cell_commit.is_some())
            .field("on_row_activate", &self.on_row_activate.is_some())
            .finish()
    }
}
