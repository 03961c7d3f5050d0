//! Grid state and the update pipeline.

use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::column::{Column, ColumnLayout};
use crate::config::GridConfig;
use crate::edit::{EditController, EditState};
use crate::error::EditError;
use crate::focus::{FocusCoord, FocusState};
use crate::input::SelectModifiers;
use crate::pagination::Paginator;
use crate::row::{CellValue, GridRow, RowIndex};
use crate::selection::{Selection, SelectionMode};
use crate::sort::{SortController, SortDirection, SortState};
use crate::viewport::{ScrollRequest, Viewport};

use super::handlers::GridHandlers;

/// Unique identifier for a Grid instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridId(usize);

impl GridId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for GridId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__grid_{}", self.0)
    }
}

/// The rows the host should render right now.
#[derive(Debug)]
pub struct VisibleSlice<'a, R> {
    /// Index of `rows[0]` in the full row array.
    pub start_index: usize,
    pub rows: &'a [R],
    /// Vertical translation of the slice inside the spacer.
    pub top_offset: f64,
    /// Spacer height.
    pub total_height: f64,
}

impl<R> VisibleSlice<'_, R> {
    /// Row indices covered by the slice.
    pub fn range(&self) -> Range<usize> {
        self.start_index..self.start_index + self.rows.len()
    }
}

/// Column drag in progress: the column and the last pointer x.
#[derive(Debug, Clone)]
pub(super) struct ColumnDrag {
    pub column_id: String,
    pub last_x: f64,
}

/// A virtualized, keyboard-navigable grid.
///
/// `Grid<R>` composes the viewport windower, column layout, sort controller,
/// selection model, focus navigator and cell edit controller over a row
/// array owned by the caller:
/// - Row array replacement, scroll and resize are external ticks. Each
///   tick recomputes the window, prunes stale selection keys, then follows
///   or clears focus. Sort and edit state are never touched by ticks.
/// - Interaction (keys, clicks, header drags) is turned into state
///   transitions and outbound callbacks.
/// - Invalid or stale interactions are no-ops.
pub struct Grid<R: GridRow> {
    id: GridId,
    pub(super) config: GridConfig,
    pub(super) rows: Vec<R>,
    pub(super) index: RowIndex<R::Key>,
    pub(super) columns: Vec<Column<R>>,
    pub(super) layout: ColumnLayout,
    pub(super) viewport: Viewport,
    pub(super) pager: Paginator,
    pub(super) paged: bool,
    pub(super) sort: SortController,
    pub(super) selection: Selection<R::Key>,
    pub(super) focus: FocusState,
    pub(super) edit: EditController<R::Key>,
    pub(super) handlers: GridHandlers<R::Key>,
    pub(super) drag: Option<ColumnDrag>,
    dirty: bool,
}

impl<R: GridRow> std::fmt::Debug for Grid<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("id", &self.id)
            .field("rows", &self.rows.len())
            .field("columns", &self.columns)
            .field("paged", &self.paged)
            .field("sort", &self.sort)
            .field("focus", &self.focus)
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}

impl<R: GridRow> Grid<R> {
    /// Create a grid with column definitions and default configuration.
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self::with_config(columns, GridConfig::default())
    }

    /// Create a grid with explicit configuration.
    pub fn with_config(columns: Vec<Column<R>>, config: GridConfig) -> Self {
        let layout = ColumnLayout::new(
            &columns,
            config.min_column_width,
            config.max_column_width,
        );
        Self {
            id: GridId::new(),
            rows: Vec::new(),
            index: RowIndex::default(),
            layout,
            columns,
            viewport: Viewport::new(config.row_height, config.overscan),
            pager: Paginator::new(config.page_size),
            paged: config.paged,
            sort: SortController::new(),
            selection: Selection::new(config.selection_mode),
            focus: FocusState::new(),
            edit: EditController::new(),
            handlers: GridHandlers::default(),
            drag: None,
            dirty: true,
            config,
        }
    }

    /// Create a grid with initial rows.
    pub fn with_rows(columns: Vec<Column<R>>, rows: Vec<R>) -> Self {
        let mut grid = Self::new(columns);
        grid.set_rows(rows);
        grid
    }

    // -------------------------------------------------------------------------
    // Handlers
    // -------------------------------------------------------------------------

    pub fn on_sort_request(mut self, f: impl FnMut(&str, Option<SortDirection>) + 'static) -> Self {
        self.handlers.on_sort_request = Some(Box::new(f));
        self
    }

    pub fn on_selection_change(mut self, f: impl FnMut(&[R::Key]) + 'static) -> Self {
        self.handlers.on_selection_change = Some(Box::new(f));
        self
    }

    pub fn on_cell_commit(
        mut self,
        f: impl FnMut(&R::Key, &str, &CellValue) -> Result<(), String> + 'static,
    ) -> Self {
        self.handlers.on_cell_commit = Some(Box::new(f));
        self
    }

    pub fn on_row_activate(mut self, f: impl FnMut(&R::Key) + 'static) -> Self {
        self.handlers.on_row_activate = Some(Box::new(f));
        self
    }

    /// Replace all handlers at once.
    pub fn set_handlers(&mut self, handlers: GridHandlers<R::Key>) {
        self.handlers = handlers;
    }

    // -------------------------------------------------------------------------
    // Identity and dirty tracking
    // -------------------------------------------------------------------------

    pub fn id(&self) -> GridId {
        self.id
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Check if anything visible changed since the last `clear_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub(super) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    // -------------------------------------------------------------------------
    // External ticks
    // -------------------------------------------------------------------------

    /// Replace the row array.
    ///
    /// Selection keys whose rows disappeared are dropped (reported through
    /// `on_selection_change`). Focus follows its row to the new index, or is
    /// cleared if the row is gone. An in-progress edit is left alone even if
    /// its row disappeared; cancel it first if that matters.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        let focused = self.focused_cell_ids();
        self.index = RowIndex::from_rows(&rows);
        self.rows = rows;
        log::debug!("[grid] {} set_rows: {} rows", self.id, self.rows.len());

        self.viewport.set_total_rows(self.rows.len());
        self.pager.set_total_items(self.rows.len());
        self.heal(focused);

        if let Some(coord) = self.edit.coord()
            && !self.index.contains(&coord.row)
        {
            log::warn!(
                "[grid] {} row {:?} under edit left the data set",
                self.id,
                coord.row
            );
        }
        self.mark_dirty();
    }

    /// Replace the column definitions.
    ///
    /// Widths of surviving column ids are kept. Focus follows its column id.
    /// Sort state on a removed or no longer sortable column is cleared, and
    /// an edit on a removed or no longer editable column is cancelled.
    pub fn set_columns(&mut self, columns: Vec<Column<R>>) {
        let focused = self.focused_cell_ids();
        self.layout.set_columns(&columns);
        self.columns = columns;

        if let Some(state) = self.sort.state()
            && !self
                .columns
                .iter()
                .any(|c| c.id == state.column_id && c.sortable)
        {
            self.sort.clear();
        }
        if let Some(coord) = self.edit.coord()
            && !self
                .columns
                .iter()
                .any(|c| c.id == coord.column_id && c.editable)
        {
            self.edit.cancel();
        }

        self.heal(focused);
        self.mark_dirty();
    }

    /// Container resize.
    pub fn resize(&mut self, container_height: f64) {
        let focused = self.focused_cell_ids();
        if self.viewport.set_container_height(container_height) {
            self.heal(focused);
            self.mark_dirty();
        }
    }

    /// Apply a scroll request. Returns true if the offset changed.
    pub fn scroll(&mut self, request: ScrollRequest) -> bool {
        let focused = self.focused_cell_ids();
        let changed = self.viewport.apply(request);
        self.heal(focused);
        if changed {
            self.mark_dirty();
        }
        changed
    }

    /// Scroll to an absolute offset.
    pub fn scroll_to(&mut self, offset: f64) -> bool {
        self.scroll(ScrollRequest::ToOffset(offset))
    }

    /// Scroll by a relative amount.
    pub fn scroll_by(&mut self, delta: f64) -> bool {
        self.scroll(ScrollRequest::Delta(delta))
    }

    /// Key and column id of the focused cell, captured before a tick.
    fn focused_cell_ids(&self) -> Option<(R::Key, String)> {
        let coord = self.focus.get()?;
        let key = self.index.key_at(coord.row)?.clone();
        let column = self.columns.get(coord.column)?.id.clone();
        Some((key, column))
    }

    /// Derived-state repair after a tick: prune selection, then follow or
    /// clear focus.
    fn heal(&mut self, focused: Option<(R::Key, String)>) {
        if self.selection.retain_present(&self.index) {
            self.emit_selection_change();
        }

        let target = focused.and_then(|(key, column_id)| {
            let row = self.index.position(&key)?;
            let column = self.columns.iter().position(|c| c.id == column_id)?;
            Some(FocusCoord::new(row, column))
        });
        match target {
            Some(coord) => {
                self.focus.focus(coord, self.rows.len(), self.columns.len());
            }
            None => {
                if self.focus.clear() {
                    log::debug!("[grid] {} focused cell left the grid, focus cleared", self.id);
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Rows and columns
    // -------------------------------------------------------------------------

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&R> {
        self.rows.get(index)
    }

    /// Find a row by key.
    pub fn find_row(&self, key: &R::Key) -> Option<(usize, &R)> {
        let index = self.index.position(key)?;
        self.rows.get(index).map(|row| (index, row))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, column_id: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    /// Value of a cell.
    pub fn cell_value(&self, row: usize, column: usize) -> Option<CellValue> {
        let r = self.rows.get(row)?;
        let c = self.columns.get(column)?;
        Some(c.value(r))
    }

    /// Display text of a cell, using the column's render callback.
    pub fn render_cell(&self, row: usize, column: usize) -> Option<String> {
        let c = self.columns.get(column)?;
        self.cell_value(row, column).map(|v| c.render(&v))
    }

    // -------------------------------------------------------------------------
    // Windowing
    // -------------------------------------------------------------------------

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn paginator(&self) -> &Paginator {
        &self.pager
    }

    pub fn is_paged(&self) -> bool {
        self.paged
    }

    /// Switch between continuous scrolling and paged windowing.
    pub fn set_paged(&mut self, paged: bool) {
        if self.paged != paged {
            self.paged = paged;
            log::debug!("[grid] {} paged: {}", self.id, paged);
            self.ensure_focus_visible();
            self.mark_dirty();
        }
    }

    /// Go to a page (paged mode). Returns true if the page changed.
    pub fn set_page(&mut self, page: usize) -> bool {
        let changed = self.pager.set_page(page);
        if changed {
            self.mark_dirty();
        }
        changed
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.pager.page() + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.set_page(self.pager.page().saturating_sub(1))
    }

    /// Change the page size. Resets to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.pager.set_page_size(page_size);
        self.mark_dirty();
    }

    /// Row index range currently rendered.
    pub fn visible_range(&self) -> Range<usize> {
        if self.paged {
            self.pager.page_range()
        } else {
            self.viewport.window().range()
        }
    }

    /// The slice of rows to render, with its placement.
    pub fn visible_slice(&self) -> VisibleSlice<'_, R> {
        let range = self.visible_range();
        let range = range.start.min(self.rows.len())..range.end.min(self.rows.len());
        let rows = &self.rows[range.clone()];
        if self.paged {
            VisibleSlice {
                start_index: range.start,
                rows,
                top_offset: 0.0,
                total_height: rows.len() as f64 * self.viewport.row_height(),
            }
        } else {
            VisibleSlice {
                start_index: range.start,
                rows,
                top_offset: self.viewport.window().top_offset,
                total_height: self.viewport.total_height(),
            }
        }
    }

    /// Rows moved by PageUp/PageDown.
    pub(super) fn page_rows(&self) -> usize {
        if self.paged {
            self.pager.page_size()
        } else if self.viewport.container_height() > 0.0 {
            self.viewport.rows_per_page()
        } else {
            self.config.page_step.max(1)
        }
    }

    /// Scroll or page so the focused row is on screen.
    pub(super) fn ensure_focus_visible(&mut self) {
        let Some(coord) = self.focus.get() else {
            return;
        };
        if self.paged {
            let page = self.pager.page_of(coord.row);
            self.pager.set_page(page);
        } else {
            self.viewport.apply(ScrollRequest::IntoView(coord.row));
        }
    }

    // -------------------------------------------------------------------------
    // Column layout
    // -------------------------------------------------------------------------

    /// Apply a resize delta to a column. Returns the new width.
    pub fn resize_column(&mut self, column_id: &str, delta: f64) -> Option<f64> {
        let width = self.layout.resize_column(column_id, delta)?;
        self.mark_dirty();
        Some(width)
    }

    pub fn column_width(&self, column_id: &str) -> Option<f64> {
        self.layout.width(column_id)
    }

    /// Current widths in column order.
    pub fn column_widths(&self) -> Vec<(String, f64)> {
        self.layout.widths()
    }

    pub fn total_width(&self) -> f64 {
        self.layout.total_width()
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Cycle the sort of a column and notify the owner.
    ///
    /// This DOES NOT sort the rows. The owner sorts and calls `set_rows()`.
    pub fn request_sort(&mut self, column_id: &str) -> bool {
        let sortable = self.column(column_id).is_some_and(|c| c.sortable);
        let Some(change) = self.sort.request_sort(column_id, sortable) else {
            return false;
        };
        if let Some(f) = self.handlers.on_sort_request.as_mut() {
            f(&change.column_id, change.direction);
        }
        self.mark_dirty();
        true
    }

    pub fn sort_state(&self) -> Option<&SortState> {
        self.sort.state()
    }

    /// Sort indicator for a column header.
    pub fn sort_indicator(&self, column_id: &str) -> Option<SortDirection> {
        self.sort.indicator(column_id)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        if self.selection.set_mode(mode) {
            self.emit_selection_change();
        }
        self.mark_dirty();
    }

    /// Apply a selection gesture to a row.
    pub fn select_row(&mut self, key: &R::Key, modifiers: SelectModifiers) -> bool {
        let changed = self.selection.select_row(key, modifiers, &self.index);
        if changed {
            self.emit_selection_change();
            self.mark_dirty();
        }
        changed
    }

    pub fn select_all(&mut self) -> bool {
        let changed = self.selection.select_all(&self.index);
        if changed {
            self.emit_selection_change();
            self.mark_dirty();
        }
        changed
    }

    pub fn clear_selection(&mut self) -> bool {
        let changed = self.selection.clear();
        if changed {
            self.emit_selection_change();
            self.mark_dirty();
        }
        changed
    }

    pub fn is_selected(&self, key: &R::Key) -> bool {
        self.selection.is_selected(key)
    }

    /// Selected keys in row order.
    pub fn selected_keys(&self) -> Vec<R::Key> {
        self.selection.keys_in_order(&self.index)
    }

    /// Selected rows in row order.
    pub fn selected_rows(&self) -> Vec<&R> {
        self.rows
            .iter()
            .filter(|row| self.selection.is_selected(&row.key()))
            .collect()
    }

    pub fn selection(&self) -> &Selection<R::Key> {
        &self.selection
    }

    fn emit_selection_change(&mut self) {
        let keys = self.selection.keys_in_order(&self.index);
        log::debug!("[grid] {} selection: {} rows", self.id, keys.len());
        if let Some(f) = self.handlers.on_selection_change.as_mut() {
            f(&keys);
        }
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    pub fn focus(&self) -> Option<FocusCoord> {
        self.focus.get()
    }

    /// Key of the focused row.
    pub fn focused_key(&self) -> Option<&R::Key> {
        self.focus.get().and_then(|c| self.index.key_at(c.row))
    }

    /// Focus a cell. Out-of-bounds coordinates are ignored.
    pub fn focus_cell(&mut self, row: usize, column: usize) -> bool {
        let changed = self
            .focus
            .focus(FocusCoord::new(row, column), self.rows.len(), self.columns.len());
        if changed {
            self.ensure_focus_visible();
            self.mark_dirty();
        }
        changed
    }

    pub fn clear_focus(&mut self) -> bool {
        let changed = self.focus.clear();
        if changed {
            self.mark_dirty();
        }
        changed
    }

    // -------------------------------------------------------------------------
    // Activation
    // -------------------------------------------------------------------------

    /// Notify the owner that a row was activated.
    pub fn activate_row(&mut self, key: &R::Key) -> bool {
        if !self.index.contains(key) {
            return false;
        }
        log::debug!("[grid] {} activate {:?}", self.id, key);
        if let Some(f) = self.handlers.on_row_activate.as_mut() {
            f(key);
        }
        true
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    pub fn edit_state(&self) -> Option<&EditState<R::Key>> {
        self.edit.state()
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_editing()
    }

    /// Put a cell into edit mode.
    ///
    /// Refused when the row or column does not exist, the column is not
    /// editable, or another cell is already editing. Focus moves to the cell.
    pub fn begin_edit(&mut self, key: &R::Key, column_id: &str) -> bool {
        let Some(row_index) = self.index.position(key) else {
            return false;
        };
        let Some(column_index) = self.columns.iter().position(|c| c.id == column_id) else {
            return false;
        };
        let column = &self.columns[column_index];
        let current = column.value(&self.rows[row_index]);
        if !self.edit.begin(key.clone(), column_id, column.editable, current) {
            return false;
        }
        self.focus
            .focus(FocusCoord::new(row_index, column_index), self.rows.len(), self.columns.len());
        self.ensure_focus_visible();
        self.mark_dirty();
        true
    }

    /// Replace the draft text of the cell being edited.
    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        let changed = self.edit.set_draft(text);
        if changed {
            self.mark_dirty();
        }
        changed
    }

    /// Commit the draft text: parse it with the column's edit callback (or
    /// the current value's kind), then offer it to the owner.
    pub fn commit_draft(&mut self) -> Result<(), EditError> {
        let Some(state) = self.edit.state() else {
            return Err(EditError::NotEditing);
        };
        let column_id = state.coord.column_id.clone();
        let parsed = match self.column(&column_id) {
            Some(column) => column.parse_draft(&state.draft, &state.original),
            None => Err(format!("column '{}' no longer exists", column_id)),
        };
        match parsed {
            Ok(value) => self.commit_value(value),
            Err(reason) => {
                self.edit.reject(reason.clone());
                self.mark_dirty();
                Err(EditError::rejected(column_id, reason))
            }
        }
    }

    /// Commit an explicit value to the cell being edited.
    pub fn commit_edit(&mut self, value: CellValue) -> Result<(), EditError> {
        if !self.edit.is_editing() {
            return Err(EditError::NotEditing);
        }
        self.commit_value(value)
    }

    fn commit_value(&mut self, value: CellValue) -> Result<(), EditError> {
        let Some(coord) = self.edit.coord().cloned() else {
            return Err(EditError::NotEditing);
        };
        let verdict = match self.handlers.on_cell_commit.as_mut() {
            Some(f) => f(&coord.row, &coord.column_id, &value),
            None => Ok(()),
        };
        self.mark_dirty();
        match verdict {
            Ok(()) => {
                log::debug!(
                    "[grid] {} committed {:?}/{} = {:?}",
                    self.id,
                    coord.row,
                    coord.column_id,
                    value
                );
                self.edit.finish();
                Ok(())
            }
            Err(reason) => {
                self.edit.reject(reason.clone());
                Err(EditError::rejected(coord.column_id, reason))
            }
        }
    }

    /// Discard the pending value and leave edit mode. No event is emitted.
    pub fn cancel_edit(&mut self) -> bool {
        let changed = self.edit.cancel();
        if changed {
            self.mark_dirty();
        }
        changed
    }

    /// The edit surface lost focus: commit the draft if editing.
    pub fn blur(&mut self) -> Result<(), EditError> {
        if self.edit.is_editing() {
            self.commit_draft()
        } else {
            Ok(())
        }
    }
}
