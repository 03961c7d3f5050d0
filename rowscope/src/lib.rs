pub mod column;
pub mod config;
pub mod edit;
pub mod error;
pub mod focus;
pub mod grid;
pub mod input;
pub mod pagination;
pub mod row;
pub mod selection;
pub mod sort;
pub mod viewport;

pub use column::{Accessor, Alignment, Column, ColumnLayout};
pub use config::GridConfig;
pub use edit::{EditController, EditCoord, EditState};
pub use error::{ConfigError, EditError};
pub use focus::{FocusCoord, FocusState, KeyIntent, NavAction, interpret};
pub use grid::{EventResult, Grid, GridHandlers, GridId, VisibleSlice};
pub use input::{ClickKind, Key, KeyCombo, Modifiers, SelectModifiers};
pub use pagination::Paginator;
pub use row::{CellKind, CellValue, GridRow, RowIndex};
pub use selection::{Selection, SelectionMode};
pub use sort::{SortChange, SortController, SortDirection, SortState};
pub use viewport::{ScrollRequest, Viewport, ViewportState, ViewportWindow, compute_window};

pub mod prelude {
    pub use crate::column::{Alignment, Column};
    pub use crate::config::GridConfig;
    pub use crate::grid::{EventResult, Grid, VisibleSlice};
    pub use crate::input::{ClickKind, Key, KeyCombo, Modifiers};
    pub use crate::row::{CellValue, GridRow};
    pub use crate::selection::SelectionMode;
    pub use crate::sort::SortDirection;
    pub use crate::viewport::ScrollRequest;
}
