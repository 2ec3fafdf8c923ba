use crate::copy;
use crate::copy::SelectedCell;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::render;
use crate::selection::Cell;
use crate::selection::Selection;
use crate::selection::SelectionBindings;
use crate::selection::rect_bounds;
use crate::theme::Theme;
use crate::viewport::ViewportState;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Span;
use std::collections::BTreeSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableAction {
    None,
    Redraw,
    SelectionChanged,
    Activated(Cell),
    /// The copy chord was pressed and the widget produced clipboard text.
    /// The caller (or the facade crate's `ClipboardTable`) hands the
    /// string to the system clipboard.
    CopyRequested(String),
}

/// Column configuration for [`TableView`].
#[derive(Clone, Debug)]
pub struct TableColumn {
    pub title: String,
    pub width: u16,
}

impl TableColumn {
    pub fn new(title: impl Into<String>, width: u16) -> Self {
        Self {
            title: title.into(),
            width,
        }
    }
}

/// Options for [`TableView`].
#[derive(Clone, Debug)]
pub struct TableViewOptions {
    pub show_header: bool,
    pub show_row_numbers: bool,
    pub show_scrollbar_y: bool,
    pub col_gap: u32,
    pub style: Style,
    pub header_style: Style,
    pub grid_line_style: Style,
    pub scrollbar_style: Style,
    pub cursor_style: Style,
    pub selected_style: Style,
    pub selection_follows_cursor: bool,
    pub multi_select: bool,
    pub bindings: SelectionBindings,
}

impl Default for TableViewOptions {
    fn default() -> Self {
        Self {
            show_header: true,
            show_row_numbers: false,
            show_scrollbar_y: true,
            col_gap: 1,
            style: Style::default(),
            header_style: Style::default().add_modifier(Modifier::BOLD),
            grid_line_style: Style::default(),
            scrollbar_style: Style::default(),
            cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            selected_style: Style::default().add_modifier(Modifier::BOLD),
            selection_follows_cursor: true,
            multi_select: false,
            bindings: SelectionBindings::default(),
        }
    }
}

/// A table grid with owned cell text, keyboard/mouse selection, and
/// multi-cell clipboard copy.
///
/// The widget stores one `String` per cell and renders a themed grid with
/// an optional header row, row-number gutter, and vertical scrollbar. The
/// copy chord (`Ctrl+C` by default) is intercepted when multi-copy is
/// enabled via [`TableView::set_multi_copy`]: the current selection is
/// serialized as tab/newline-delimited text and returned as
/// [`TableAction::CopyRequested`]. With multi-copy disabled the chord
/// falls back to copying the cursor cell only.
///
/// The widget is UI-agnostic: you drive it from your app loop by calling
/// `handle_event` (or `handle_event_in_area` for mouse support) and
/// `render`.
pub struct TableView {
    pub state: ViewportState,
    options: TableViewOptions,
    columns: Vec<TableColumn>,
    cells: Vec<Vec<String>>,
    cursor: Option<Cell>,
    selection: Selection,
    selection_anchor: Option<Cell>,
    multi_copy: bool,
}

impl Default for TableView {
    fn default() -> Self {
        Self {
            state: ViewportState::default(),
            options: TableViewOptions::default(),
            columns: Vec::new(),
            cells: Vec::new(),
            cursor: None,
            selection: Selection::None,
            selection_anchor: None,
            multi_copy: false,
        }
    }
}

#[derive(Clone, Copy)]
struct TableBodyStyles {
    base: Style,
    cursor: Style,
    selected: Style,
    grid_line: Style,
}

struct TableLayout {
    content: Rect,
    header: Rect,
    body: Rect,
    gutter_w: u16,
    scrollbar_x: Option<u16>,
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TableViewOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> &TableViewOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: TableViewOptions) {
        self.options = options;
        self.sync_content();
    }

    pub fn set_columns(&mut self, columns: Vec<TableColumn>) {
        self.columns = columns;
        let cols = self.columns.len();
        for row in &mut self.cells {
            row.resize(cols, String::new());
        }
        self.cursor = clamp_cursor(self.cursor, self.cells.len(), cols);
        if self.options.selection_follows_cursor {
            self.selection = self
                .cursor
                .map(Selection::Single)
                .unwrap_or(Selection::None);
        }
        self.sync_content();
    }

    pub fn set_row_count(&mut self, rows: usize) {
        let cols = self.columns.len();
        self.cells.resize_with(rows, || vec![String::new(); cols]);
        self.cursor = clamp_cursor(self.cursor, rows, cols);
        if self.options.selection_follows_cursor {
            self.selection = self
                .cursor
                .map(Selection::Single)
                .unwrap_or(Selection::None);
        }
        self.sync_content();
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    /// Sets one cell's text. Writes outside the current row/column range
    /// are ignored.
    pub fn set_cell(&mut self, row: usize, col: usize, text: impl Into<String>) {
        if row < self.cells.len() && col < self.columns.len() {
            self.cells[row][col] = text.into();
        }
    }

    pub fn cell_text(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(row)?.get(col).map(|s| s.as_str())
    }

    /// Enables or disables multi-cell copy. Takes effect on the next key
    /// event; default is off, which leaves the copy chord on the
    /// single-cell default behavior.
    pub fn set_multi_copy(&mut self, enabled: bool) {
        self.multi_copy = enabled;
    }

    pub fn multi_copy(&self) -> bool {
        self.multi_copy
    }

    pub fn cursor(&self) -> Option<Cell> {
        self.cursor
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_cursor(&mut self, cursor: Option<Cell>) {
        self.cursor = clamp_cursor(cursor, self.cells.len(), self.columns.len());
        if self.options.selection_follows_cursor {
            self.selection = self
                .cursor
                .map(Selection::Single)
                .unwrap_or(Selection::None);
        }
        self.ensure_cursor_visible();
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
        self.selection_anchor = None;
    }

    /// Snapshot of the current selection as `(row, col, text)` triples,
    /// clamped to the grid. `Rect` selections expand row-major; sparse
    /// selections iterate in set order. No coordinate appears twice.
    pub fn selected_cells(&self) -> Vec<SelectedCell> {
        let rows = self.cells.len();
        let cols = self.columns.len();
        let mut out = Vec::new();
        match &self.selection {
            Selection::None => {}
            Selection::Single(c) => {
                if c.row < rows && c.col < cols {
                    out.push(SelectedCell::new(
                        c.row,
                        c.col,
                        self.cells[c.row][c.col].clone(),
                    ));
                }
            }
            Selection::Rect { start, end } => {
                if rows > 0 && cols > 0 {
                    let (r0, r1, c0, c1) = rect_bounds(*start, *end);
                    for row in r0..=r1.min(rows - 1) {
                        for col in c0..=c1.min(cols - 1) {
                            out.push(SelectedCell::new(row, col, self.cells[row][col].clone()));
                        }
                    }
                }
            }
            Selection::Cells(set) => {
                for c in set {
                    if c.row < rows && c.col < cols {
                        out.push(SelectedCell::new(
                            c.row,
                            c.col,
                            self.cells[c.row][c.col].clone(),
                        ));
                    }
                }
            }
        }
        out
    }

    /// The current selection in clipboard interchange form, or `None` when
    /// nothing is selected.
    pub fn selection_text(&self) -> Option<String> {
        copy::selection_text(&self.selected_cells())
    }

    pub fn handle_event(&mut self, event: InputEvent) -> TableAction {
        match event {
            InputEvent::Paste(_) => TableAction::None,
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(_) => TableAction::None,
        }
    }

    /// Like [`TableView::handle_event`], but mouse events are resolved
    /// against the widget's screen `area` (the same rect passed to
    /// `render`).
    pub fn handle_event_in_area(&mut self, area: Rect, event: InputEvent) -> TableAction {
        match event {
            InputEvent::Paste(_) => TableAction::None,
            InputEvent::Key(_) => self.handle_event(event),
            InputEvent::Mouse(m) => self.handle_mouse_event(area, m),
        }
    }

    pub fn scroll_y_by(&mut self, delta: i32) {
        self.sync_content();
        self.state.scroll_y_by(delta);
    }

    pub fn scroll_x_by(&mut self, delta: i32) {
        self.sync_content();
        self.state.scroll_x_by(delta);
    }

    pub fn ensure_cursor_visible(&mut self) {
        self.sync_content();
        let Some(c) = self.cursor else {
            return;
        };
        let h = self.state.viewport_h as usize;
        if (c.row as u32) < self.state.y {
            self.state.y = c.row as u32;
        } else if h > 0 && c.row >= self.state.y as usize + h {
            self.state.y = (c.row + 1 - h).min(u32::MAX as usize) as u32;
        }
        if c.col < self.columns.len() {
            let start = self.col_start(c.col);
            let end = start + self.columns[c.col].width as u64;
            let w = self.state.viewport_w as u64;
            if start < self.state.x as u64 {
                self.state.x = start.min(u32::MAX as u64) as u32;
            } else if w > 0 && end > self.state.x as u64 + w {
                self.state.x = (end - w).min(u32::MAX as u64) as u32;
            }
        }
        self.state.clamp();
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let layout = self.layout(area);

        let base_style = if self.options.style == Style::default() {
            theme.text_primary
        } else {
            self.options.style
        };
        let header_style = self.options.header_style.patch(theme.accent);
        let grid_line_style = if self.options.grid_line_style == Style::default() {
            theme.text_muted
        } else {
            self.options.grid_line_style
        };
        let cursor_style = self.options.cursor_style.patch(theme.accent);
        let selected_style = self.options.selected_style.patch(theme.accent);

        buf.set_style(layout.content, base_style);

        self.state.set_viewport(layout.body.width, layout.body.height);
        self.sync_content();

        if layout.gutter_w > 0 {
            self.render_gutter(&layout, buf, theme);
        }

        if layout.header.height > 0 {
            buf.set_style(
                Rect::new(
                    layout.content.x,
                    layout.content.y,
                    layout.content.width,
                    layout.header.height,
                ),
                header_style,
            );
            self.render_header(layout.header, buf, header_style, grid_line_style);
        }

        self.render_body(
            layout.body,
            buf,
            TableBodyStyles {
                base: base_style,
                cursor: cursor_style,
                selected: selected_style,
                grid_line: grid_line_style,
            },
        );

        if let Some(sb_x) = layout.scrollbar_x {
            render::render_scrollbar(
                Rect::new(sb_x, layout.body.y, 1, layout.body.height),
                buf,
                &ViewportState {
                    x: 0,
                    y: self.state.y,
                    viewport_w: 1,
                    viewport_h: layout.body.height,
                    content_w: 1,
                    content_h: self.state.content_h,
                },
                self.options.scrollbar_style,
            );
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> TableAction {
        if self.cells.is_empty() || self.columns.is_empty() {
            self.cursor = None;
            self.selection = Selection::None;
            self.selection_anchor = None;
            self.state.to_top();
            self.state.to_left();
            return TableAction::None;
        }

        self.sync_content();

        if self.options.bindings.is_clear(&key) {
            if self.selection.is_empty() {
                return TableAction::None;
            }
            self.clear_selection();
            return TableAction::SelectionChanged;
        }

        if self.options.bindings.is_copy(&key) {
            if self.multi_copy {
                // the chord is consumed either way; an empty selection
                // leaves the clipboard untouched
                return self
                    .selection_text()
                    .map(TableAction::CopyRequested)
                    .unwrap_or(TableAction::None);
            }
            return self
                .cursor
                .and_then(|c| self.cell_text(c.row, c.col))
                .map(|t| TableAction::CopyRequested(t.to_string()))
                .unwrap_or(TableAction::None);
        }

        if key.modifiers.ctrl && !key.modifiers.alt {
            match key.code {
                KeyCode::Char('d') => {
                    let mods = KeyModifiers {
                        ctrl: false,
                        ..key.modifiers
                    };
                    if self.move_cursor_by(self.page_rows(), 0, mods) {
                        return TableAction::Redraw;
                    }
                    return TableAction::None;
                }
                KeyCode::Char('u') => {
                    let mods = KeyModifiers {
                        ctrl: false,
                        ..key.modifiers
                    };
                    if self.move_cursor_by(-self.page_rows(), 0, mods) {
                        return TableAction::Redraw;
                    }
                    return TableAction::None;
                }
                KeyCode::Char(' ') => {
                    let Some(c) = self.cursor else {
                        return TableAction::None;
                    };
                    self.toggle_selected(c);
                    return TableAction::SelectionChanged;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if self.move_cursor_by(1, 0, key.modifiers) {
                    TableAction::Redraw
                } else {
                    TableAction::None
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.move_cursor_by(-1, 0, key.modifiers) {
                    TableAction::Redraw
                } else {
                    TableAction::None
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.move_cursor_by(0, 1, key.modifiers) {
                    TableAction::Redraw
                } else {
                    TableAction::None
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if self.move_cursor_by(0, -1, key.modifiers) {
                    TableAction::Redraw
                } else {
                    TableAction::None
                }
            }
            KeyCode::Tab => {
                let cur = self.cursor.unwrap_or(Cell { row: 0, col: 0 });
                let next = if cur.col + 1 < self.columns.len() {
                    Cell {
                        row: cur.row,
                        col: cur.col + 1,
                    }
                } else if cur.row + 1 < self.cells.len() {
                    Cell {
                        row: cur.row + 1,
                        col: 0,
                    }
                } else {
                    cur
                };
                let mods = KeyModifiers {
                    shift: false,
                    ..key.modifiers
                };
                if self.move_cursor_to(cur, next, mods) {
                    TableAction::Redraw
                } else {
                    TableAction::None
                }
            }
            KeyCode::BackTab => {
                let cur = self.cursor.unwrap_or(Cell { row: 0, col: 0 });
                let next = if cur.col > 0 {
                    Cell {
                        row: cur.row,
                        col: cur.col - 1,
                    }
                } else if cur.row > 0 {
                    Cell {
                        row: cur.row - 1,
                        col: self.columns.len() - 1,
                    }
                } else {
                    cur
                };
                let mods = KeyModifiers {
                    shift: false,
                    ..key.modifiers
                };
                if self.move_cursor_to(cur, next, mods) {
                    TableAction::Redraw
                } else {
                    TableAction::None
                }
            }
            KeyCode::PageDown => {
                if self.move_cursor_by(self.page_rows(), 0, key.modifiers) {
                    TableAction::Redraw
                } else {
                    TableAction::None
                }
            }
            KeyCode::PageUp => {
                if self.move_cursor_by(-self.page_rows(), 0, key.modifiers) {
                    TableAction::Redraw
                } else {
                    TableAction::None
                }
            }
            KeyCode::Home => {
                self.set_cursor(Some(Cell { row: 0, col: 0 }));
                TableAction::Redraw
            }
            KeyCode::End => {
                self.set_cursor(Some(Cell {
                    row: self.cells.len().saturating_sub(1),
                    col: self.columns.len().saturating_sub(1),
                }));
                TableAction::Redraw
            }
            KeyCode::Char('g') => {
                let col = self.cursor.map(|c| c.col).unwrap_or(0);
                self.set_cursor(Some(Cell { row: 0, col }));
                TableAction::Redraw
            }
            KeyCode::Char('G') => {
                let col = self.cursor.map(|c| c.col).unwrap_or(0);
                self.set_cursor(Some(Cell {
                    row: self.cells.len().saturating_sub(1),
                    col,
                }));
                TableAction::Redraw
            }
            KeyCode::Char(' ') => {
                if let Some(c) = self.cursor {
                    self.selection = Selection::Single(c);
                    self.selection_anchor = Some(c);
                    TableAction::SelectionChanged
                } else {
                    TableAction::None
                }
            }
            KeyCode::Enter => self
                .cursor
                .map(TableAction::Activated)
                .unwrap_or(TableAction::None),
            _ => TableAction::None,
        }
    }

    pub fn handle_mouse_event(&mut self, area: Rect, event: MouseEvent) -> TableAction {
        if area.width == 0 || area.height == 0 {
            return TableAction::None;
        }

        self.sync_content();

        match event.kind {
            MouseEventKind::ScrollUp => {
                self.state.scroll_y_by(-3);
                return TableAction::Redraw;
            }
            MouseEventKind::ScrollDown => {
                self.state.scroll_y_by(3);
                return TableAction::Redraw;
            }
            _ => {}
        }

        let layout = self.layout(area);
        let body = layout.body;
        if event.x < body.x
            || event.x >= body.x + body.width
            || event.y < body.y
            || event.y >= body.y + body.height
        {
            return TableAction::None;
        }

        let grid_x = self.state.x as u64 + (event.x - body.x) as u64;
        let row = self.state.y as usize + (event.y - body.y) as usize;
        if row >= self.cells.len() {
            return TableAction::None;
        }
        let Some(col) = self.col_at_offset(grid_x) else {
            return TableAction::None;
        };
        let cell = Cell { row, col };

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.cursor = Some(cell);
                if event.modifiers.ctrl {
                    self.toggle_selected(cell);
                } else {
                    self.selection = Selection::Single(cell);
                    self.selection_anchor = Some(cell);
                }
                TableAction::SelectionChanged
            }
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Up(MouseButton::Left) => {
                let Some(anchor) = self.selection_anchor else {
                    return TableAction::None;
                };
                self.cursor = Some(cell);
                if self.options.multi_select {
                    self.selection = Selection::Rect {
                        start: anchor,
                        end: cell,
                    };
                } else {
                    self.selection = Selection::Single(cell);
                }
                TableAction::SelectionChanged
            }
            _ => TableAction::None,
        }
    }

    fn toggle_selected(&mut self, cell: Cell) {
        let mut set = match std::mem::replace(&mut self.selection, Selection::None) {
            Selection::None => BTreeSet::new(),
            Selection::Single(c) => BTreeSet::from([c]),
            Selection::Rect { start, end } => {
                let (r0, r1, c0, c1) = rect_bounds(start, end);
                let mut set = BTreeSet::new();
                for row in r0..=r1 {
                    for col in c0..=c1 {
                        set.insert(Cell { row, col });
                    }
                }
                set
            }
            Selection::Cells(set) => set,
        };
        if !set.remove(&cell) {
            set.insert(cell);
        }
        self.selection = if set.is_empty() {
            Selection::None
        } else {
            Selection::Cells(set)
        };
        self.selection_anchor = Some(cell);
    }

    fn move_cursor_by(&mut self, drow: i32, dcol: i32, modifiers: KeyModifiers) -> bool {
        let cur = self.cursor.unwrap_or(Cell { row: 0, col: 0 });
        let next_row = (cur.row as i64 + drow as i64)
            .clamp(0, self.cells.len().saturating_sub(1) as i64) as usize;
        let next_col = (cur.col as i64 + dcol as i64)
            .clamp(0, self.columns.len().saturating_sub(1) as i64) as usize;
        self.move_cursor_to(
            cur,
            Cell {
                row: next_row,
                col: next_col,
            },
            modifiers,
        )
    }

    fn move_cursor_to(&mut self, from: Cell, next: Cell, modifiers: KeyModifiers) -> bool {
        if Some(next) == self.cursor {
            return false;
        }
        self.cursor = Some(next);

        if self.options.multi_select && modifiers.shift {
            let anchor = self.selection_anchor.unwrap_or(from);
            self.selection_anchor = Some(anchor);
            self.selection = Selection::Rect {
                start: anchor,
                end: next,
            };
        } else if modifiers.ctrl {
            // cursor travels without touching the selection, so a sparse
            // set can be built with Ctrl+Space along the way
        } else if self.options.selection_follows_cursor {
            self.selection = Selection::Single(next);
            self.selection_anchor = Some(next);
        } else {
            self.selection_anchor = Some(next);
        }

        self.ensure_cursor_visible();
        true
    }

    fn page_rows(&self) -> i32 {
        self.state.viewport_h.saturating_sub(1).max(1) as i32
    }

    fn layout(&self, area: Rect) -> TableLayout {
        let (content, scrollbar_x) = if self.options.show_scrollbar_y && area.width >= 2 {
            (
                Rect::new(area.x, area.y, area.width - 1, area.height),
                Some(area.x + area.width - 1),
            )
        } else {
            (area, None)
        };

        let header_h = if self.options.show_header {
            1u16.min(content.height)
        } else {
            0
        };
        let gutter_w = if self.options.show_row_numbers {
            (digits(self.cells.len()).saturating_add(1) as u16).min(content.width)
        } else {
            0
        };

        let grid_x = content.x + gutter_w;
        let grid_w = content.width - gutter_w;
        let header = Rect::new(grid_x, content.y, grid_w, header_h);
        let body = Rect::new(
            grid_x,
            content.y + header_h,
            grid_w,
            content.height.saturating_sub(header_h),
        );

        TableLayout {
            content,
            header,
            body,
            gutter_w,
            scrollbar_x,
        }
    }

    fn render_gutter(&self, layout: &TableLayout, buf: &mut Buffer, theme: &Theme) {
        let w = layout.gutter_w as usize;
        let first = self.state.y as usize;
        for dy in 0..layout.body.height {
            let idx = first + dy as usize;
            let y = layout.body.y + dy;
            let label = if idx < self.cells.len() {
                format!("{:>width$} ", idx + 1, width = w.saturating_sub(1))
            } else {
                " ".repeat(w)
            };
            buf.set_stringn(layout.content.x, y, label, w, theme.text_muted);
        }
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer, style: Style, grid_line_style: Style) {
        if area.width == 0 || area.height == 0 || self.columns.is_empty() {
            return;
        }
        let scroll_x = self.state.x as u64;
        for (idx, col) in self.columns.iter().enumerate() {
            let start = self.col_start(idx);
            if start >= scroll_x + area.width as u64 {
                break;
            }
            let (rect, clip_left) = clipped_rect_x(area, scroll_x, start, col.width as u32);
            if rect.width > 0 {
                render::render_str_clipped(
                    rect.x, rect.y, clip_left, rect.width, buf, &col.title, style,
                );
            }
            if self.options.col_gap > 0 {
                self.draw_col_separator(area, buf, scroll_x, idx, grid_line_style);
            }
        }
    }

    fn render_body(&self, area: Rect, buf: &mut Buffer, styles: TableBodyStyles) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if self.cells.is_empty() || self.columns.is_empty() {
            return;
        }

        let scroll_x = self.state.x as u64;
        let first = self.state.y as usize;
        let last = (first + area.height as usize).min(self.cells.len());

        for row in first..last {
            let y = area.y + (row - first) as u16;
            let row_rect = Rect::new(area.x, y, area.width, 1);
            for (idx, col) in self.columns.iter().enumerate() {
                let start = self.col_start(idx);
                if start >= scroll_x + area.width as u64 {
                    break;
                }
                let (rect, clip_left) = clipped_rect_x(row_rect, scroll_x, start, col.width as u32);
                if rect.width > 0 {
                    let cell = Cell { row, col: idx };
                    let is_cursor = self.cursor == Some(cell);
                    let style = if is_cursor {
                        styles.cursor
                    } else if self.selection.contains(cell) {
                        styles.selected
                    } else {
                        styles.base
                    };
                    buf.set_style(rect, style);
                    render::render_str_clipped(
                        rect.x,
                        y,
                        clip_left,
                        rect.width,
                        buf,
                        &self.cells[row][idx],
                        style,
                    );
                }
                if self.options.col_gap > 0 {
                    self.draw_col_separator(row_rect, buf, scroll_x, idx, styles.grid_line);
                }
            }
        }
    }

    fn draw_col_separator(
        &self,
        area: Rect,
        buf: &mut Buffer,
        scroll_x: u64,
        col_index: usize,
        style: Style,
    ) {
        if col_index + 1 >= self.columns.len() {
            return;
        }
        let sep_start = self.col_start(col_index) + self.columns[col_index].width as u64;
        let rel = sep_start as i64 - scroll_x as i64;
        if rel < 0 || rel >= area.width as i64 {
            return;
        }
        let x = area.x + rel as u16;
        for dy in 0..area.height {
            buf.set_span(x, area.y + dy, &Span::styled("│", style), 1);
        }
    }

    fn col_start(&self, idx: usize) -> u64 {
        let gap = self.options.col_gap as u64;
        self.columns[..idx]
            .iter()
            .map(|c| c.width as u64 + gap)
            .sum()
    }

    fn col_at_offset(&self, x: u64) -> Option<usize> {
        let gap = self.options.col_gap as u64;
        let mut start = 0u64;
        for (idx, col) in self.columns.iter().enumerate() {
            if x < start {
                return None;
            }
            if x < start + col.width as u64 {
                return Some(idx);
            }
            start += col.width as u64 + gap;
        }
        None
    }

    fn total_width(&self) -> u64 {
        let gap = self.options.col_gap as u64;
        let widths: u64 = self.columns.iter().map(|c| c.width as u64).sum();
        widths + gap * self.columns.len().saturating_sub(1) as u64
    }

    fn sync_content(&mut self) {
        let w = self.total_width().min(u32::MAX as u64) as u32;
        let h = self.cells.len().min(u32::MAX as usize) as u32;
        self.state.set_content(w, h);
    }
}

fn clamp_cursor(cursor: Option<Cell>, rows: usize, cols: usize) -> Option<Cell> {
    if rows == 0 || cols == 0 {
        return None;
    }
    cursor.map(|c| Cell {
        row: c.row.min(rows - 1),
        col: c.col.min(cols - 1),
    })
}

fn clipped_rect_x(area: Rect, scroll_x: u64, start: u64, size: u32) -> (Rect, u32) {
    let rel = start as i64 - scroll_x as i64;
    let clip_left = (-rel).max(0) as u32;
    let x = rel.max(0) as u16;
    let max_w = area.width.saturating_sub(x);
    let visible_w = size.saturating_sub(clip_left).min(max_w as u32) as u16;
    (
        Rect::new(area.x + x, area.y, visible_w, area.height),
        clip_left,
    )
}

fn digits(mut n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    let mut d = 0;
    while n > 0 {
        n /= 10;
        d += 1;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyModifiers;
    use crate::keymap;

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code))
    }

    fn key_shift(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code).with_modifiers(KeyModifiers {
            shift: true,
            ctrl: false,
            alt: false,
        }))
    }

    fn key_ctrl(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code).with_modifiers(KeyModifiers {
            shift: false,
            ctrl: true,
            alt: false,
        }))
    }

    fn copy_chord() -> InputEvent {
        InputEvent::Key(keymap::key_ctrl('c'))
    }

    fn demo_table(rows: usize, cols: usize) -> TableView {
        let mut t = TableView::with_options(TableViewOptions {
            multi_select: true,
            ..Default::default()
        });
        t.set_columns((0..cols).map(|c| TableColumn::new(format!("col_{c}"), 10)).collect());
        t.set_row_count(rows);
        for row in 0..rows {
            for col in 0..cols {
                t.set_cell(row, col, format!("test_{row}_{col}"));
            }
        }
        t.state.set_viewport(40, 5);
        t
    }

    #[test]
    fn moves_cursor_and_scrolls_down() {
        let mut t = demo_table(100, 3);
        t.set_cursor(Some(Cell { row: 0, col: 0 }));
        assert_eq!(t.state.y, 0);

        for _ in 0..10 {
            t.handle_event(key(KeyCode::Down));
        }
        assert_eq!(t.cursor(), Some(Cell { row: 10, col: 0 }));
        assert!(t.state.y > 0);
    }

    #[test]
    fn shift_selects_rect() {
        let mut t = demo_table(10, 3);
        t.set_cursor(Some(Cell { row: 2, col: 0 }));

        t.handle_event(key_shift(KeyCode::Down));
        t.handle_event(key_shift(KeyCode::Right));
        assert!(matches!(t.selection(), Selection::Rect { .. }));
        assert!(t.selection().contains(Cell { row: 3, col: 1 }));
    }

    #[test]
    fn copy_chord_with_multi_copy_emits_block() {
        let mut t = demo_table(6, 4);
        t.set_multi_copy(true);
        t.set_cursor(Some(Cell { row: 1, col: 1 }));
        t.handle_event(key_shift(KeyCode::Down));
        t.handle_event(key_shift(KeyCode::Right));

        let action = t.handle_event(copy_chord());
        assert_eq!(
            action,
            TableAction::CopyRequested("test_1_1\ttest_1_2\ntest_2_1\ttest_2_2".to_string())
        );
    }

    #[test]
    fn copy_chord_without_flag_copies_cursor_cell_only() {
        let mut t = demo_table(6, 4);
        t.set_cursor(Some(Cell { row: 1, col: 1 }));
        t.handle_event(key_shift(KeyCode::Down));
        t.handle_event(key_shift(KeyCode::Right));

        let action = t.handle_event(copy_chord());
        assert_eq!(action, TableAction::CopyRequested("test_2_2".to_string()));
    }

    #[test]
    fn copy_chord_with_empty_selection_is_a_noop() {
        let mut t = demo_table(6, 4);
        t.set_multi_copy(true);
        t.clear_selection();

        assert_eq!(t.handle_event(copy_chord()), TableAction::None);
    }

    #[test]
    fn single_selected_cell_copies_without_delimiters() {
        let mut t = demo_table(6, 4);
        t.set_multi_copy(true);
        t.set_cursor(Some(Cell { row: 3, col: 2 }));
        t.handle_event(key(KeyCode::Char(' ')));

        assert_eq!(
            t.handle_event(copy_chord()),
            TableAction::CopyRequested("test_3_2".to_string())
        );
    }

    #[test]
    fn ctrl_space_builds_a_sparse_selection_with_gaps() {
        let mut t = demo_table(2, 2);
        t.set_cell(0, 0, "A");
        t.set_cell(1, 1, "B");
        t.set_multi_copy(true);
        t.set_cursor(Some(Cell { row: 0, col: 0 }));

        // Space pins the first cell; Ctrl+moves keep it while the cursor
        // travels; Ctrl+Space toggles the second cell into the set.
        t.handle_event(key(KeyCode::Char(' ')));
        t.handle_event(key_ctrl(KeyCode::Down));
        t.handle_event(key_ctrl(KeyCode::Right));
        t.handle_event(key_ctrl(KeyCode::Char(' ')));

        assert!(matches!(t.selection(), Selection::Cells(_)));
        assert_eq!(
            t.handle_event(copy_chord()),
            TableAction::CopyRequested("A\t\n\tB".to_string())
        );
    }

    #[test]
    fn escape_clears_the_selection() {
        let mut t = demo_table(6, 4);
        t.set_cursor(Some(Cell { row: 1, col: 1 }));
        assert_eq!(
            t.handle_event(key(KeyCode::Esc)),
            TableAction::SelectionChanged
        );
        assert!(t.selection().is_empty());
        assert_eq!(t.handle_event(key(KeyCode::Esc)), TableAction::None);
    }

    #[test]
    fn tab_wraps_to_the_next_row() {
        let mut t = demo_table(2, 2);
        t.set_cursor(Some(Cell { row: 0, col: 1 }));
        t.handle_event(key(KeyCode::Tab));
        assert_eq!(t.cursor(), Some(Cell { row: 1, col: 0 }));
        t.handle_event(key(KeyCode::BackTab));
        assert_eq!(t.cursor(), Some(Cell { row: 0, col: 1 }));
    }

    #[test]
    fn set_cell_ignores_out_of_range_writes() {
        let mut t = demo_table(2, 2);
        t.set_cell(5, 0, "nope");
        t.set_cell(0, 5, "nope");
        assert_eq!(t.cell_text(5, 0), None);
        assert_eq!(t.cell_text(0, 0), Some("test_0_0"));
    }

    #[test]
    fn mouse_click_selects_the_hit_cell() {
        let mut t = demo_table(3, 2);
        let area = Rect::new(0, 0, 25, 6);
        // body starts below the header; col_0 spans grid columns 0..10
        let click = InputEvent::Mouse(MouseEvent {
            x: 12,
            y: 2,
            kind: MouseEventKind::Down(MouseButton::Left),
            modifiers: KeyModifiers::none(),
        });
        let action = t.handle_event_in_area(area, click);
        assert_eq!(action, TableAction::SelectionChanged);
        assert_eq!(t.cursor(), Some(Cell { row: 1, col: 1 }));
        assert!(t.selection().contains(Cell { row: 1, col: 1 }));
    }

    #[test]
    fn render_draws_header_gutter_and_cells() {
        let mut t = demo_table(6, 4);
        let mut opts = t.options().clone();
        opts.show_row_numbers = true;
        t.set_options(opts);

        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        t.render(area, &mut buf, &Theme::default());

        let row = |y: u16| -> String {
            (0..area.width)
                .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
                .collect()
        };
        assert!(row(0).contains("col_0"));
        assert!(row(1).starts_with("1 "));
        assert!(row(1).contains("test_0_0"));
        assert!(row(2).contains("test_1_1"));
    }
}
