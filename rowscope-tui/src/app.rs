//! The host application: owns the invoices, feeds the grid and reacts to
//! its callbacks.

use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use rowscope::{CellValue, ClickKind, Grid, GridConfig, Key, SortDirection};

use crate::data::{self, Invoice, InvoiceStore};
use crate::error::AppError;
use crate::input;
use crate::render::{self, GUTTER, HEADER_ROWS};
use crate::terminal::Terminal;

const DOUBLE_CLICK: Duration = Duration::from_millis(400);
const WHEEL_ROWS: f64 = 3.0;

/// What the grid told us, queued by its callbacks.
#[derive(Debug)]
enum Message {
    Sort(String, Option<SortDirection>),
    Commit(u32, String, CellValue),
    SelectionChanged(usize),
    Activated(u32),
}

pub struct App {
    grid: Grid<Invoice>,
    store: InvoiceStore,
    messages: Receiver<Message>,
    status: String,
    selected: usize,
    size: (u16, u16),
    last_click: Option<(Instant, u16, u16)>,
    /// Host-side state (status line) changed since the last frame.
    redraw: bool,
    running: bool,
}

impl App {
    pub fn new(config: GridConfig, invoices: Vec<Invoice>) -> Self {
        let store = InvoiceStore::new(invoices);
        let (tx, rx) = mpsc::channel();

        let sort_tx = tx.clone();
        let commit_tx = tx.clone();
        let select_tx = tx.clone();
        let mut grid = Grid::with_config(data::columns(), config)
            .on_sort_request(move |column, direction| {
                let _ = sort_tx.send(Message::Sort(column.to_string(), direction));
            })
            .on_cell_commit(move |id, column, value| {
                InvoiceStore::validate(column, value)?;
                let _ = commit_tx.send(Message::Commit(*id, column.to_string(), value.clone()));
                Ok(())
            })
            .on_selection_change(move |keys| {
                let _ = select_tx.send(Message::SelectionChanged(keys.len()));
            })
            .on_row_activate(move |id| {
                let _ = tx.send(Message::Activated(*id));
            });
        grid.set_rows(store.rows());

        Self {
            grid,
            store,
            messages: rx,
            status: String::new(),
            selected: 0,
            size: (0, 0),
            last_click: None,
            redraw: true,
            running: true,
        }
    }

    pub fn run(&mut self, term: &mut Terminal) -> Result<(), AppError> {
        self.on_resize(term.size()?);
        log::info!("[app] started with {} invoices", self.store.len());

        while self.running {
            if self.grid.is_dirty() || self.redraw {
                let status = self.status_line();
                let size = self.size;
                term.draw(|out| render::draw(out, &self.grid, &status, size))?;
                self.grid.clear_dirty();
                self.redraw = false;
            }

            for event in term.poll(Duration::from_millis(250))? {
                self.handle_event(event);
            }
            self.drain_messages();
        }

        log::info!("[app] quit");
        Ok(())
    }

    fn handle_event(&mut self, event: CrosstermEvent) {
        match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => self.on_key(key),
            CrosstermEvent::Mouse(mouse) => self.on_mouse(mouse),
            CrosstermEvent::Resize(width, height) => self.on_resize((width, height)),
            _ => {}
        }
    }

    fn on_resize(&mut self, size: (u16, u16)) {
        self.size = size;
        let body = render::body_height(size.1);
        if self.grid.is_paged() {
            self.fit_page_to_body();
        }
        self.grid.resize(body as f64);
        self.redraw = true;
        log::debug!("[app] resize {:?}", size);
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        if !self.grid.is_editing() && self.on_host_key(key) {
            self.redraw = true;
            return;
        }

        let Some(combo) = input::key_combo(&key) else {
            return;
        };
        let was_editing = self.grid.is_editing();
        let result = self.grid.on_key(&combo);
        if was_editing {
            self.status = match self.grid.edit_state().and_then(|s| s.error.clone()) {
                Some(error) => format!("rejected: {}", error),
                None => String::new(),
            };
            self.redraw = true;
        } else if !result.is_handled() && combo.key == Key::Escape {
            self.grid.clear_selection();
        }
    }

    /// Keys the host handles itself when no cell is being edited.
    fn on_host_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        match key.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('p') => {
                let paged = !self.grid.is_paged();
                if paged {
                    self.fit_page_to_body();
                }
                self.grid.set_paged(paged);
                self.status = if paged { "paged" } else { "scrolling" }.to_string();
            }
            KeyCode::Char('[') => self.resize_focused_column(-1.0),
            KeyCode::Char(']') => self.resize_focused_column(1.0),
            KeyCode::Char('n') => {
                self.grid.next_page();
            }
            KeyCode::Char('N') => {
                self.grid.prev_page();
            }
            KeyCode::Delete => self.delete_focused(),
            _ => return false,
        }
        true
    }

    /// One page per screenful of body lines, staying on the focused row's
    /// page.
    fn fit_page_to_body(&mut self) {
        let body = render::body_height(self.size.1).max(1) as usize;
        if self.grid.paginator().page_size() == body {
            return;
        }
        self.grid.set_page_size(body);
        if let Some(focus) = self.grid.focus() {
            let page = self.grid.paginator().page_of(focus.row);
            self.grid.set_page(page);
        }
    }

    fn resize_focused_column(&mut self, delta: f64) {
        let Some(focus) = self.grid.focus() else {
            return;
        };
        let Some(id) = self.grid.columns().get(focus.column).map(|c| c.id.clone()) else {
            return;
        };
        if let Some(width) = self.grid.resize_column(&id, delta) {
            self.status = format!("{} width {}", id, width);
        }
    }

    fn delete_focused(&mut self) {
        let Some(&id) = self.grid.focused_key() else {
            return;
        };
        if self.grid.edit_state().is_some_and(|s| s.coord.row == id) {
            self.grid.cancel_edit();
        }
        if self.store.remove(id) {
            self.grid.set_rows(self.store.rows());
            self.status = format!("deleted INV-{:05}", id);
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        let x = mouse.column.saturating_sub(GUTTER) as f64;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if mouse.row < HEADER_ROWS => {
                self.grid.click_header(x);
            }
            MouseEventKind::Down(MouseButton::Left)
                if mouse.row < HEADER_ROWS + render::body_height(self.size.1) =>
            {
                let y = (mouse.row - HEADER_ROWS) as f64;
                let kind = self.click_kind(mouse.column, mouse.row);
                let modifiers = input::modifiers(mouse.modifiers);
                self.grid.click_at(x, y, modifiers, kind);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.grid.on_drag(x);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.grid.on_release();
            }
            MouseEventKind::ScrollDown => {
                self.grid.scroll_by(WHEEL_ROWS * self.grid.viewport().row_height());
            }
            MouseEventKind::ScrollUp => {
                self.grid.scroll_by(-WHEEL_ROWS * self.grid.viewport().row_height());
            }
            _ => {}
        }
    }

    fn click_kind(&mut self, column: u16, row: u16) -> ClickKind {
        let now = Instant::now();
        let double = self
            .last_click
            .is_some_and(|(at, c, r)| c == column && r == row && now.duration_since(at) < DOUBLE_CLICK);
        if double {
            self.last_click = None;
            ClickKind::Double
        } else {
            self.last_click = Some((now, column, row));
            ClickKind::Single
        }
    }

    /// Apply everything the grid's callbacks queued since the last frame.
    fn drain_messages(&mut self) {
        let mut reload = false;
        while let Ok(message) = self.messages.try_recv() {
            log::debug!("[app] {:?}", message);
            match message {
                Message::Sort(column, direction) => {
                    self.store.set_sort(&column, direction);
                    reload = true;
                }
                Message::Commit(id, column, value) => {
                    match self.store.apply(id, &column, value) {
                        Ok(()) => {
                            self.status = format!("saved INV-{:05} {}", id, column);
                            reload = true;
                        }
                        Err(e) => {
                            log::warn!("[app] commit for {} dropped: {}", id, e);
                            self.status = e;
                        }
                    }
                }
                Message::SelectionChanged(count) => self.selected = count,
                Message::Activated(id) => self.status = format!("opened INV-{:05}", id),
            }
            self.redraw = true;
        }
        if reload {
            self.grid.set_rows(self.store.rows());
        }
    }

    fn status_line(&self) -> String {
        let mut parts = vec![
            format!("{} invoices", self.grid.len()),
            format!("{} selected", self.selected),
        ];
        if self.grid.is_paged() {
            let pager = self.grid.paginator();
            parts.push(format!("page {}/{}", pager.page(), pager.page_count().max(1)));
        }
        if let Some(sort) = self.grid.sort_state() {
            parts.push(format!("sort {} {}", sort.column_id, sort.direction.glyph()));
        }
        if !self.status.is_empty() {
            parts.push(self.status.clone());
        }
        parts.push("q quit  p paging  [ ] width  del delete".to_string());
        parts.join(" | ")
    }
}
