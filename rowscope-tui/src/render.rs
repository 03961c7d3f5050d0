//! Drawing the grid's visible slice to the terminal.
//!
//! One terminal row per grid row and one terminal column per width unit, so
//! the grid's pixel coordinates map directly to cells.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType},
};
use rowscope::{Alignment, FocusCoord, Grid, GridRow};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::data::Invoice;

/// Selection marker column left of the first grid column.
pub const GUTTER: u16 = 2;
/// Lines above the body.
pub const HEADER_ROWS: u16 = 1;

/// Body lines available for rows (everything but the header and status line).
pub fn body_height(term_height: u16) -> u16 {
    term_height.saturating_sub(HEADER_ROWS + 1)
}

pub fn draw(
    out: &mut impl Write,
    grid: &Grid<Invoice>,
    status: &str,
    (width, height): (u16, u16),
) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;
    draw_header(out, grid, width)?;
    draw_body(out, grid, width, body_height(height))?;
    draw_status(out, status, width, height.saturating_sub(1))?;
    Ok(())
}

fn draw_header(out: &mut impl Write, grid: &Grid<Invoice>, width: u16) -> io::Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, 0),
        SetAttribute(Attribute::Bold),
        Print(" ".repeat(GUTTER as usize))
    )?;
    let mut x = GUTTER as usize;
    for (column, (_, w)) in grid.columns().iter().zip(grid.column_widths()) {
        if x >= width as usize {
            break;
        }
        let w = w.floor() as usize;
        let label = match grid.sort_indicator(&column.id) {
            Some(direction) => format!("{} {}", column.header, direction.glyph()),
            None => column.header.clone(),
        };
        let avail = w.min(width as usize - x);
        queue!(out, Print(fit(&label, avail, column.align)))?;
        x += w;
    }
    queue!(out, SetAttribute(Attribute::Reset))
}

fn draw_body(out: &mut impl Write, grid: &Grid<Invoice>, width: u16, lines: u16) -> io::Result<()> {
    let slice = grid.visible_slice();
    let row_height = grid.viewport().row_height();
    let scrolled = if grid.is_paged() {
        0.0
    } else {
        grid.viewport().scroll_offset()
    };
    let widths = grid.column_widths();
    let edit = grid.edit_state();

    for (i, row) in slice.rows.iter().enumerate() {
        let index = slice.start_index + i;
        let line = ((slice.top_offset + i as f64 * row_height - scrolled) / row_height).floor();
        if line < 0.0 || line >= lines as f64 {
            continue;
        }

        let key = row.key();
        let selected = grid.is_selected(&key);
        queue!(
            out,
            cursor::MoveTo(0, HEADER_ROWS + line as u16),
            Print(if selected { "● " } else { "  " })
        )?;

        let mut x = GUTTER as usize;
        for (c, column) in grid.columns().iter().enumerate() {
            if x >= width as usize {
                break;
            }
            let w = widths.get(c).map_or(0, |(_, w)| w.floor() as usize);
            let avail = w.min(width as usize - x);

            let editing = edit.filter(|s| s.coord.row == key && s.coord.column_id == column.id);
            let text = match editing {
                Some(state) => format!("{}▏", state.draft),
                None => grid.render_cell(index, c).unwrap_or_default(),
            };

            if editing.is_some() {
                queue!(out, SetAttribute(Attribute::Underlined))?;
            } else if grid.focus() == Some(FocusCoord::new(index, c)) {
                queue!(out, SetAttribute(Attribute::Reverse))?;
            } else if selected {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            queue!(
                out,
                Print(fit(&text, avail, column.align)),
                SetAttribute(Attribute::Reset)
            )?;
            x += w;
        }
    }
    Ok(())
}

fn draw_status(out: &mut impl Write, status: &str, width: u16, y: u16) -> io::Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, y),
        SetAttribute(Attribute::Reverse),
        Print(fit(status, width as usize, Alignment::Left)),
        SetAttribute(Attribute::Reset)
    )
}

/// Truncate or pad text to exactly `width` cells, keeping the last cell as
/// a column gap.
fn fit(text: &str, width: usize, align: Alignment) -> String {
    if width == 0 {
        return String::new();
    }
    let room = width - 1;

    let mut body = String::new();
    if text.width() <= room {
        body.push_str(text);
    } else {
        let mut used = 0;
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w + 1 > room {
                break;
            }
            body.push(c);
            used += w;
        }
        if room > 0 {
            body.push('…');
        }
    }

    let pad = room.saturating_sub(body.width());
    let (left, right) = match align {
        Alignment::Left => (0, pad),
        Alignment::Right => (pad, 0),
        Alignment::Center => (pad / 2, pad - pad / 2),
    };
    format!("{}{}{} ", " ".repeat(left), body, " ".repeat(right))
}
