//! Sort controller.
//!
//! Tracks which column the user asked to sort by. Rows are never reordered
//! here: the data owner receives a sort request, sorts with its own
//! comparison rules and hands the grid a new row array.

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Header glyph for this direction.
    pub fn glyph(self) -> char {
        match self {
            Self::Ascending => '▲',
            Self::Descending => '▼',
        }
    }
}

/// The active sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column_id: String,
    pub direction: SortDirection,
}

/// A transition produced by [`SortController::request_sort`].
///
/// `direction` is `None` when the cycle returned to unsorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortChange {
    pub column_id: String,
    pub direction: Option<SortDirection>,
}

/// At most one active sort, cycling asc -> desc -> none.
#[derive(Debug, Clone, Default)]
pub struct SortController {
    state: Option<SortState>,
}

impl SortController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<&SortState> {
        self.state.as_ref()
    }

    /// Advance the sort cycle for a column.
    ///
    /// Returns `None` without touching state if the column is not sortable.
    pub fn request_sort(&mut self, column_id: &str, sortable: bool) -> Option<SortChange> {
        if !sortable {
            log::debug!("[sort] ignoring request for unsortable column {}", column_id);
            return None;
        }

        let next = match &self.state {
            Some(s) if s.column_id == column_id => match s.direction {
                SortDirection::Ascending => Some(SortDirection::Descending),
                SortDirection::Descending => None,
            },
            _ => Some(SortDirection::Ascending),
        };

        self.state = next.map(|direction| SortState {
            column_id: column_id.to_string(),
            direction,
        });
        log::debug!("[sort] {} -> {:?}", column_id, next);

        Some(SortChange {
            column_id: column_id.to_string(),
            direction: next,
        })
    }

    /// Direction indicator for a column header.
    pub fn indicator(&self, column_id: &str) -> Option<SortDirection> {
        self.state
            .as_ref()
            .filter(|s| s.column_id == column_id)
            .map(|s| s.direction)
    }

    /// Clear sort state.
    pub fn clear(&mut self) -> bool {
        self.state.take().is_some()
    }
}
