use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use std::io;
use std::time::Duration;
use tabgrid::clipboard::ClipboardTable;
use tabgrid::crossterm_input::input_event_from_crossterm;
use tabgrid::selection::Selection;
use tabgrid::table::view::TableAction;
use tabgrid::table::view::TableColumn;
use tabgrid::table::view::TableView;
use tabgrid::table::view::TableViewOptions;
use tabgrid::theme::Theme;

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::default();

    let mut view = TableView::with_options(TableViewOptions {
        multi_select: true,
        show_row_numbers: true,
        ..Default::default()
    });
    view.set_columns(
        (0..4)
            .map(|c| TableColumn::new(format!("col_{c}"), 12))
            .collect(),
    );
    view.set_row_count(6);
    for row in 0..6 {
        for col in 0..4 {
            view.set_cell(row, col, format!("test_{row}_{col}"));
        }
    }
    view.set_multi_copy(true);

    let mut table = ClipboardTable::with_view(view);

    let res = run(&mut terminal, &theme, &mut table);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    table: &mut ClipboardTable,
) -> io::Result<()> {
    let mut status = String::from("Ctrl+C copies the selection as a paste-ready grid");
    let mut grid_area = Rect::default();

    loop {
        terminal.draw(|f| {
            let area = f.area();
            let block = Block::default()
                .title("TableView (hjkl/arrows, Shift extends, Ctrl+Space toggles, Ctrl+C copies, q quits)")
                .borders(Borders::ALL);
            let inner = block.inner(area);
            f.render_widget(block, area);

            let buf = f.buffer_mut();
            grid_area = Rect::new(
                inner.x,
                inner.y,
                inner.width,
                inner.height.saturating_sub(1),
            );
            let status_area = Rect::new(inner.x, inner.y + grid_area.height, inner.width, 1);

            table.view_mut().render(grid_area, buf, theme);
            render_status(status_area, buf, theme, table.view(), &status);
        })?;

        if crossterm::event::poll(Duration::from_millis(50))? {
            let ev = crossterm::event::read()?;
            if let Event::Key(key) = &ev {
                if key.kind == KeyEventKind::Press && matches!(key.code, KeyCode::Char('q')) {
                    return Ok(());
                }
            }
            let Some(ev) = input_event_from_crossterm(ev) else {
                continue;
            };
            match table.handle_event_in_area(grid_area, ev) {
                Ok(TableAction::CopyRequested(text)) => {
                    status = format!("copied {} bytes to the clipboard", text.len());
                }
                Ok(TableAction::Activated(cell)) => {
                    status = format!("activated r{} c{}", cell.row, cell.col);
                }
                Ok(_) => {}
                Err(err) => {
                    status = format!("clipboard error: {err}");
                }
            }
        }
    }
}

fn render_status(
    area: Rect,
    buf: &mut ratatui::buffer::Buffer,
    theme: &Theme,
    view: &TableView,
    status: &str,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let cursor = view
        .cursor()
        .map(|c| format!("r{} c{}", c.row, c.col))
        .unwrap_or("-".to_string());
    let sel = match view.selection() {
        Selection::None => "-".to_string(),
        Selection::Single(c) => format!("r{} c{}", c.row, c.col),
        Selection::Rect { start, end } => {
            format!("r{}c{}..r{}c{}", start.row, start.col, end.row, end.col)
        }
        Selection::Cells(set) => format!("{} cells", set.len()),
    };
    let pct = view.state.percent_y().unwrap_or(0);
    let s = format!("cursor={cursor}  selection={sel}  scroll={pct}%  {status}");
    let span = Span::styled(s, theme.text_muted);
    buf.set_span(area.x, area.y, &span, area.width);
}
