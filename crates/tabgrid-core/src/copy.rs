//! Serialization of selected cells into the clipboard interchange format.
//!
//! Spreadsheet applications paste plain text as a grid when rows are
//! separated by `\n` and columns by `\t`. [`selection_text`] renders an
//! arbitrary set of selected cells into that format: the cells' bounding
//! rectangle becomes the output grid, and coordinates nobody selected
//! render as empty strings between delimiters.
//!
//! Cell text is emitted verbatim. A tab or newline embedded in a cell makes
//! the output ambiguous on paste; that is inherent to the interchange
//! format and is not escaped here.

/// One selected cell: coordinates plus displayed text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedCell {
    pub row: usize,
    pub col: usize,
    pub text: String,
}

impl SelectedCell {
    pub fn new(row: usize, col: usize, text: impl Into<String>) -> Self {
        Self {
            row,
            col,
            text: text.into(),
        }
    }
}

/// Renders `cells` as tab/newline-delimited text, or `None` when the
/// selection is empty.
///
/// The output covers the smallest rectangle containing every coordinate, so
/// a lone cell at `(5, 3)` produces just its text, not five rows of
/// padding. Duplicate coordinates are resolved last-write-wins in slice
/// order. Output is otherwise independent of slice order.
pub fn selection_text(cells: &[SelectedCell]) -> Option<String> {
    let row_min = cells.iter().map(|c| c.row).min()?;
    let row_max = cells.iter().map(|c| c.row).max()?;
    let col_min = cells.iter().map(|c| c.col).min()?;
    let col_max = cells.iter().map(|c| c.col).max()?;

    let mut grid = vec![vec![String::new(); col_max - col_min + 1]; row_max - row_min + 1];
    for cell in cells {
        grid[cell.row - row_min][cell.col - col_min] = cell.text.clone();
    }

    Some(
        grid.iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: usize, col: usize, text: &str) -> SelectedCell {
        SelectedCell::new(row, col, text)
    }

    #[test]
    fn empty_selection_yields_none() {
        assert_eq!(selection_text(&[]), None);
    }

    #[test]
    fn single_cell_has_no_delimiters() {
        assert_eq!(selection_text(&[cell(7, 2, "X")]).as_deref(), Some("X"));
    }

    #[test]
    fn full_rectangle_is_row_major_without_gaps() {
        let cells = vec![
            cell(1, 1, "test_1_1"),
            cell(1, 2, "test_1_2"),
            cell(2, 1, "test_2_1"),
            cell(2, 2, "test_2_2"),
        ];
        assert_eq!(
            selection_text(&cells).as_deref(),
            Some("test_1_1\ttest_1_2\ntest_2_1\ttest_2_2")
        );
    }

    #[test]
    fn sparse_selection_pads_unselected_positions() {
        let cells = vec![cell(0, 0, "A"), cell(1, 1, "B")];
        assert_eq!(selection_text(&cells).as_deref(), Some("A\t\n\tB"));
    }

    #[test]
    fn output_is_independent_of_input_order() {
        let forward = vec![
            cell(4, 0, "a"),
            cell(4, 1, "b"),
            cell(5, 0, "c"),
            cell(5, 1, "d"),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(selection_text(&forward), selection_text(&reversed));
    }

    #[test]
    fn offset_block_is_relative_to_its_bounding_rectangle() {
        let cells = vec![cell(10, 7, "nw"), cell(11, 8, "se")];
        assert_eq!(selection_text(&cells).as_deref(), Some("nw\t\n\tse"));
    }

    #[test]
    fn duplicate_coordinate_last_write_wins() {
        let cells = vec![cell(0, 0, "first"), cell(0, 0, "second")];
        assert_eq!(selection_text(&cells).as_deref(), Some("second"));
    }

    #[test]
    fn embedded_delimiters_are_not_escaped() {
        let cells = vec![cell(0, 0, "a\tb"), cell(0, 1, "c")];
        assert_eq!(selection_text(&cells).as_deref(), Some("a\tb\tc"));
    }
}
