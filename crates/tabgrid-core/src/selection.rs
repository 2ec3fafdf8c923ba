use std::collections::BTreeSet;

use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::keymap;

/// A grid cell address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

/// Selection states supported by [`TableView`](crate::table::view::TableView).
///
/// `Rect` corners may arrive in any order; containment normalizes them.
/// `Cells` is a sparse set and is the only state that can describe a
/// non-rectangular selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    None,
    Single(Cell),
    Rect { start: Cell, end: Cell },
    Cells(BTreeSet<Cell>),
}

impl Selection {
    pub fn contains(&self, cell: Cell) -> bool {
        match self {
            Selection::None => false,
            Selection::Single(c) => *c == cell,
            Selection::Rect { start, end } => {
                let (r0, r1, c0, c1) = rect_bounds(*start, *end);
                cell.row >= r0 && cell.row <= r1 && cell.col >= c0 && cell.col <= c1
            }
            Selection::Cells(set) => set.contains(&cell),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Selection::None => true,
            Selection::Single(_) => false,
            Selection::Rect { .. } => false,
            Selection::Cells(set) => set.is_empty(),
        }
    }
}

/// Normalized `(row_min, row_max, col_min, col_max)` for two rect corners.
pub(crate) fn rect_bounds(start: Cell, end: Cell) -> (usize, usize, usize, usize) {
    let (r0, r1) = if start.row <= end.row {
        (start.row, end.row)
    } else {
        (end.row, start.row)
    };
    let (c0, c1) = if start.col <= end.col {
        (start.col, end.col)
    } else {
        (end.col, start.col)
    };
    (r0, r1, c0, c1)
}

/// Key bindings for selection interactions.
///
/// The defaults follow the platform copy convention:
/// - `Ctrl+C` requests copying the current selection
/// - `Esc` clears the selection
#[derive(Clone, Debug)]
pub struct SelectionBindings {
    pub copy: Vec<KeyEvent>,
    pub clear: Vec<KeyEvent>,
}

impl Default for SelectionBindings {
    fn default() -> Self {
        Self {
            copy: vec![keymap::key_ctrl('c')],
            clear: vec![KeyEvent::new(KeyCode::Esc)],
        }
    }
}

impl SelectionBindings {
    /// Returns `true` if `key` matches any configured copy binding.
    pub fn is_copy(&self, key: &KeyEvent) -> bool {
        self.copy.iter().any(|p| keymap::key_event_matches(p, key))
    }

    /// Returns `true` if `key` matches any configured clear-selection binding.
    pub fn is_clear(&self, key: &KeyEvent) -> bool {
        self.clear.iter().any(|p| keymap::key_event_matches(p, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_normalizes_corners() {
        let sel = Selection::Rect {
            start: Cell { row: 3, col: 4 },
            end: Cell { row: 1, col: 2 },
        };
        assert!(sel.contains(Cell { row: 2, col: 3 }));
        assert!(sel.contains(Cell { row: 1, col: 4 }));
        assert!(!sel.contains(Cell { row: 0, col: 3 }));
        assert!(!sel.contains(Cell { row: 2, col: 5 }));
    }

    #[test]
    fn sparse_selection_contains_only_its_cells() {
        let mut set = BTreeSet::new();
        set.insert(Cell { row: 0, col: 0 });
        set.insert(Cell { row: 1, col: 1 });
        let sel = Selection::Cells(set);
        assert!(sel.contains(Cell { row: 0, col: 0 }));
        assert!(!sel.contains(Cell { row: 0, col: 1 }));
    }

    #[test]
    fn default_bindings_use_the_copy_chord() {
        let b = SelectionBindings::default();
        assert!(b.is_copy(&keymap::key_ctrl('c')));
        assert!(!b.is_copy(&keymap::key_char('c')));
        assert!(b.is_clear(&KeyEvent::new(KeyCode::Esc)));
    }
}
