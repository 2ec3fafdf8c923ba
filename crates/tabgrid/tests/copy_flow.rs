use tabgrid::clipboard::ClipboardTable;
use tabgrid::input::InputEvent;
use tabgrid::input::KeyCode;
use tabgrid::input::KeyEvent;
use tabgrid::input::KeyModifiers;
use tabgrid::keymap;
use tabgrid::selection::Cell;
use tabgrid::table::view::TableAction;
use tabgrid::table::view::TableColumn;
use tabgrid::table::view::TableView;
use tabgrid::table::view::TableViewOptions;

fn shift(code: KeyCode) -> InputEvent {
    InputEvent::Key(KeyEvent::new(code).with_modifiers(KeyModifiers {
        shift: true,
        ctrl: false,
        alt: false,
    }))
}

fn copy_chord() -> InputEvent {
    InputEvent::Key(keymap::key_ctrl('c'))
}

fn populated_table() -> TableView {
    let mut view = TableView::with_options(TableViewOptions {
        multi_select: true,
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
    view.state.set_viewport(60, 10);
    view
}

#[test]
fn copying_a_block_matches_spreadsheet_paste_format() {
    let mut view = populated_table();
    view.set_multi_copy(true);
    view.set_cursor(Some(Cell { row: 1, col: 1 }));
    view.handle_event(shift(KeyCode::Down));
    view.handle_event(shift(KeyCode::Right));

    assert_eq!(
        view.handle_event(copy_chord()),
        TableAction::CopyRequested("test_1_1\ttest_1_2\ntest_2_1\ttest_2_2".to_string())
    );
}

#[test]
fn multi_copy_disabled_keeps_the_single_cell_default() {
    let mut view = populated_table();
    view.set_cursor(Some(Cell { row: 1, col: 1 }));
    view.handle_event(shift(KeyCode::Down));
    view.handle_event(shift(KeyCode::Right));

    assert_eq!(
        view.handle_event(copy_chord()),
        TableAction::CopyRequested("test_2_2".to_string())
    );
}

#[test]
fn empty_selection_requests_no_copy() {
    let mut view = populated_table();
    view.set_multi_copy(true);
    view.clear_selection();

    assert_eq!(view.handle_event(copy_chord()), TableAction::None);
}

#[test]
fn clipboard_table_passes_navigation_through_untouched() {
    let mut table = ClipboardTable::with_view(populated_table());
    table.view_mut().set_cursor(Some(Cell { row: 0, col: 0 }));

    let action = table
        .handle_event(InputEvent::Key(KeyEvent::new(KeyCode::Down)))
        .expect("navigation never touches the clipboard");
    assert_eq!(action, TableAction::Redraw);
    assert_eq!(table.view().cursor(), Some(Cell { row: 1, col: 0 }));
}
