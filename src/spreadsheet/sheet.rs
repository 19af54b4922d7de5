use crate::spreadsheet::cell::Cell;

/// Represents a sheet from a workbook with its populated cells in row-major order.
#[derive(Debug)]
pub(crate) struct Sheet {
    /// Source file name
    pub(crate) file_name: String,
    /// Sheet name
    pub(crate) name: String,
    /// All populated cells in the sheet, ordered by row then column
    pub(crate) cells: Vec<Cell>,
    /// Actual data range (determined from cell data)
    pub(crate) row_lower_bound: Option<usize>,
    pub(crate) row_upper_bound: Option<usize>,
    pub(crate) col_upper_bound: Option<usize>,
}

impl Sheet {
    /// Creates an empty sheet.
    pub(crate) fn new(file_name: &str, name: &str) -> Self {
        Self {
            file_name: file_name.to_owned(),
            name: name.to_owned(),
            cells: Vec::new(),
            row_lower_bound: None,
            row_upper_bound: None,
            col_upper_bound: None,
        }
    }

    /// Returns true if the sheet contains no cells.
    pub(crate) fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Adds a cell to the sheet, updating the data range.
    pub(crate) fn push(&mut self, cell: Cell) {
        self.update_bound(cell.row, cell.col);
        self.cells.push(cell);
    }

    /// Updates the actual data range boundaries based on cell positions.
    fn update_bound(&mut self, row: usize, col: usize) {
        if self.row_lower_bound.map(|row_lower_bound| row < row_lower_bound).unwrap_or(true) {
            self.row_lower_bound = Some(row);
        }
        if self.row_upper_bound.map(|row_upper_bound| row_upper_bound < row).unwrap_or(true) {
            self.row_upper_bound = Some(row);
        }
        if self.col_upper_bound.map(|col_upper_bound| col_upper_bound < col).unwrap_or(true) {
            self.col_upper_bound = Some(col);
        }
    }

    /// Restores row-major order; worksheet parts are normally already sorted.
    pub(crate) fn finish(&mut self) {
        self.cells.sort_by_key(|cell| (cell.row, cell.col));
    }

    /// Lays the cells out as a dense grid from the first populated row and from column `A`.
    /// Missing cells are `None`.
    pub(crate) fn grid(&self) -> Vec<Vec<Option<&Cell>>> {
        let (Some(row_lower), Some(row_upper), Some(col_upper)) =
            (self.row_lower_bound, self.row_upper_bound, self.col_upper_bound)
        else {
            return Vec::new();
        };
        let mut table: Vec<Vec<Option<&Cell>>> = (row_lower..=row_upper)
            .map(|_| vec![None; col_upper + 1])
            .collect();
        for cell in &self.cells {
            table[cell.row - row_lower][cell.col] = Some(cell);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use crate::spreadsheet::cell::{Cell, CellType};
    use crate::spreadsheet::sheet::Sheet;

    fn push(sheet: &mut Sheet, row: usize, col: usize) {
        sheet.push(Cell {
            row,
            col,
            kind: CellType::InlineString,
            value: format!("{row}:{col}"),
        });
    }

    #[test]
    fn sheet_initial() {
        let sheet = Sheet::new("", "");

        assert!(sheet.is_empty());
        assert_eq!(sheet.row_lower_bound, None);
        assert_eq!(sheet.row_upper_bound, None);
        assert_eq!(sheet.col_upper_bound, None);
        assert!(sheet.grid().is_empty());
    }

    #[test]
    fn sheet_update() {
        let mut sheet = Sheet::new("", "");
        push(&mut sheet, 1, 1);
        push(&mut sheet, 1, 3);
        push(&mut sheet, 3, 1);
        push(&mut sheet, 3, 3);
        sheet.finish();

        assert_eq!(sheet.cells.len(), 4);
        assert_eq!(sheet.row_lower_bound, Some(1));
        assert_eq!(sheet.row_upper_bound, Some(3));
        assert_eq!(sheet.col_upper_bound, Some(3));
    }

    #[test]
    fn sheet_grid() {
        let mut sheet = Sheet::new("", "");
        push(&mut sheet, 3, 3);
        push(&mut sheet, 1, 1);
        sheet.finish();

        let grid = sheet.grid();
        assert_eq!(grid.len(), 3);
        assert!(grid.iter().all(|row| row.len() == 4));
        assert_eq!(grid[0][1].map(|cell| cell.value.as_str()), Some("1:1"));
        assert!(grid[1].iter().all(Option::is_none));
        assert_eq!(grid[2][3].map(|cell| cell.value.as_str()), Some("3:3"));
        assert!(grid[0][0].is_none());
    }
}
