//! Grid orchestrator - a virtualized, keyboard-navigable data grid.
//!
//! The grid owns no data. The caller hands it a row array and column
//! definitions, and reacts to its callbacks (sort requests, selection
//! changes, cell commits, row activation). Only the rows inside the
//! current window are handed back for rendering.

mod events;
mod handlers;
mod state;

pub use events::RESIZE_GRIP;
pub use handlers::{
    CellCommitFn, EventResult, GridHandlers, RowActivateFn, SelectionChangeFn, SortRequestFn,
};
pub use state::{Grid, GridId, VisibleSlice};
