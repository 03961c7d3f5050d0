//! Column definitions and the column layout model.

use std::fmt;
use std::sync::Arc;

use crate::row::{CellValue, GridRow};

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// How a column reads its value out of a row.
pub enum Accessor<R> {
    /// Read a named field via [`GridRow::field`].
    Field(String),
    /// Derive the value from the whole row.
    Derived(Arc<dyn Fn(&R) -> CellValue + Send + Sync>),
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Field(name) => Self::Field(name.clone()),
            Self::Derived(f) => Self::Derived(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

/// Formats a cell value for display.
pub type RenderFn = Arc<dyn Fn(&CellValue) -> String + Send + Sync>;

/// Turns edit draft text into a value, given the current value.
/// Returning `Err` rejects the commit with a message for the host.
pub type EditFn = Arc<dyn Fn(&str, &CellValue) -> Result<CellValue, String> + Send + Sync>;

/// Column configuration.
///
/// The id must stay stable for a logical column across column replacements;
/// layout widths and sort state are keyed on it.
///
/// # Examples
///
/// ```
/// # use rowscope::{Column, CellValue, GridRow};
/// # #[derive(Clone)] struct Row;
/// # impl GridRow for Row {
/// #     type Key = u32;
/// #     fn key(&self) -> u32 { 0 }
/// #     fn field(&self, _: &str) -> CellValue { CellValue::Empty }
/// # }
/// let columns: Vec<Column<Row>> = vec![
///     Column::new("name", "Name", 200.0).editable(),
///     Column::new("amount", "Amount", 120.0).sortable().min_width(80.0),
///     Column::new("date", "Date", 140.0),
/// ];
/// ```
pub struct Column<R> {
    /// Stable column identifier
    pub id: String,
    /// Column header text
    pub header: String,
    /// How the cell value is read from a row
    pub accessor: Accessor<R>,
    /// Initial width in pixels
    pub width: f64,
    /// Lower resize bound (falls back to the grid-wide minimum)
    pub min_width: Option<f64>,
    /// Upper resize bound (falls back to the grid-wide maximum)
    pub max_width: Option<f64>,
    /// Horizontal alignment
    pub align: Alignment,
    /// Whether header interaction requests sorting
    pub sortable: bool,
    /// Whether cells of this column can enter edit mode
    pub editable: bool,
    render: Option<RenderFn>,
    edit: Option<EditFn>,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            width: self.width,
            min_width: self.min_width,
            max_width: self.max_width,
            align: self.align,
            sortable: self.sortable,
            editable: self.editable,
            render: self.render.clone(),
            edit: self.edit.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("width", &self.width)
            .field("min_width", &self.min_width)
            .field("max_width", &self.max_width)
            .field("sortable", &self.sortable)
            .field("editable", &self.editable)
            .finish_non_exhaustive()
    }
}

impl<R> Column<R> {
    /// Create a column that reads the field named like its id.
    pub fn new(id: impl Into<String>, header: impl Into<String>, width: f64) -> Self {
        let id = id.into();
        Self {
            accessor: Accessor::Field(id.clone()),
            id,
            header: header.into(),
            width,
            min_width: None,
            max_width: None,
            align: Alignment::Left,
            sortable: false,
            editable: false,
            render: None,
            edit: None,
        }
    }

    /// Read a differently named field.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.accessor = Accessor::Field(name.into());
        self
    }

    /// Derive the cell value from the row.
    pub fn derived(mut self, f: impl Fn(&R) -> CellValue + Send + Sync + 'static) -> Self {
        self.accessor = Accessor::Derived(Arc::new(f));
        self
    }

    pub fn min_width(mut self, width: f64) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn max_width(mut self, width: f64) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Make the column's cells editable.
    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    /// Custom display formatting.
    pub fn render_with(mut self, f: impl Fn(&CellValue) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }

    /// Custom draft parsing and validation for edits.
    pub fn edit_with(
        mut self,
        f: impl Fn(&str, &CellValue) -> Result<CellValue, String> + Send + Sync + 'static,
    ) -> Self {
        self.edit = Some(Arc::new(f));
        self
    }

    /// Format a value for display, using the render callback when set.
    pub fn render(&self, value: &CellValue) -> String {
        match &self.render {
            Some(f) => f(value),
            None => value.to_string(),
        }
    }

    /// Parse an edit draft into a value for this column.
    pub fn parse_draft(&self, draft: &str, current: &CellValue) -> Result<CellValue, String> {
        match &self.edit {
            Some(f) => f(draft, current),
            None => current.parse_like(draft),
        }
    }
}

impl<R: GridRow> Column<R> {
    /// Read this column's value from a row.
    pub fn value(&self, row: &R) -> CellValue {
        match &self.accessor {
            Accessor::Field(name) => row.field(name),
            Accessor::Derived(f) => f(row),
        }
    }
}

// =============================================================================
// ColumnLayout
// =============================================================================

/// Width and bounds of one column.
#[derive(Debug, Clone, PartialEq)]
struct ColumnWidth {
    id: String,
    width: f64,
    min: f64,
    max: f64,
}

/// Per-column widths with clamped, incremental resizing.
///
/// Widths are always within their column's bounds, so a zero delta never
/// changes anything. The total width is summed on demand.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    widths: Vec<ColumnWidth>,
    global_min: f64,
    global_max: f64,
}

impl ColumnLayout {
    /// Build a layout from column definitions.
    pub fn new<R>(columns: &[Column<R>], global_min: f64, global_max: f64) -> Self {
        let mut layout = Self {
            widths: Vec::new(),
            global_min,
            global_max: global_max.max(global_min),
        };
        layout.set_columns(columns);
        layout
    }

    /// Replace the column set.
    ///
    /// Columns whose id survives keep their current width (re-clamped to the
    /// new bounds); new columns start at their declared width.
    pub fn set_columns<R>(&mut self, columns: &[Column<R>]) {
        let widths = columns
            .iter()
            .map(|col| {
                let min = col.min_width.unwrap_or(self.global_min);
                let max = col.max_width.unwrap_or(self.global_max).max(min);
                let width = self
                    .widths
                    .iter()
                    .find(|w| w.id == col.id)
                    .map(|w| w.width)
                    .unwrap_or(col.width);
                ColumnWidth {
                    id: col.id.clone(),
                    width: clamp_width(width, min, max),
                    min,
                    max,
                }
            })
            .collect();
        self.widths = widths;
    }

    /// Apply a drag delta to a column.
    ///
    /// Returns the new width, or `None` for an unknown column or a
    /// non-finite delta.
    pub fn resize_column(&mut self, column_id: &str, delta: f64) -> Option<f64> {
        if !delta.is_finite() {
            return None;
        }
        let col = self.widths.iter_mut().find(|w| w.id == column_id)?;
        col.width = clamp_width(col.width + delta, col.min, col.max);
        log::trace!("[layout] resize {} by {} -> {}", column_id, delta, col.width);
        Some(col.width)
    }

    /// Current width of a column.
    pub fn width(&self, column_id: &str) -> Option<f64> {
        self.widths
            .iter()
            .find(|w| w.id == column_id)
            .map(|w| w.width)
    }

    /// All widths in column order.
    pub fn widths(&self) -> Vec<(String, f64)> {
        self.widths.iter().map(|w| (w.id.clone(), w.width)).collect()
    }

    /// Sum of all column widths.
    pub fn total_width(&self) -> f64 {
        self.widths.iter().map(|w| w.width).sum()
    }

    /// Left edge of each column.
    pub fn column_offsets(&self) -> Vec<f64> {
        let mut offsets = Vec::with_capacity(self.widths.len());
        let mut x = 0.0;
        for w in &self.widths {
            offsets.push(x);
            x += w.width;
        }
        offsets
    }

    /// Find which column contains the x-coordinate (header hit testing).
    pub fn column_at_x(&self, x: f64) -> Option<usize> {
        if x < 0.0 {
            return None;
        }
        let mut left = 0.0;
        for (i, w) in self.widths.iter().enumerate() {
            if x < left + w.width {
                return Some(i);
            }
            left += w.width;
        }
        None
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}

fn clamp_width(width: f64, min: f64, max: f64) -> f64 {
    if width.is_nan() {
        return min;
    }
    width.max(min).min(max)
}
