use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableShapeError {
    #[error("a table needs at least one row and one column")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("cannot remove the only row of a table")]
    LastRow,
    #[error("cannot remove the only column of a table")]
    LastColumn,
    #[error("cell ({row}, {col}) is outside a {rows}x{cols} table")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Where keyboard focus goes when tabbing forward out of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStep {
    /// Another cell already exists at this position
    Move { row: usize, col: usize },
    /// The cursor was in the last cell; a row has to be appended first
    AppendRow { row: usize, col: usize },
}

/// Rectangular grid of cell contents
///
/// Always has at least one row and one column and every row has the same
/// number of cells. Every mutating method validates before touching the grid,
/// so a failed call leaves it unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")]
pub struct TableGrid {
    rows: Vec<Vec<String>>,
}

impl Default for TableGrid {
    fn default() -> Self {
        Self::new(2, 2)
    }
}

impl TableGrid {
    /// Blank grid; zero dimensions are bumped to one
    pub fn new(rows: usize, cols: usize) -> Self {
        let cols = cols.max(1);
        Self {
            rows: vec![vec![String::new(); cols]; rows.max(1)],
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn set_cell(
        &mut self,
        row: usize,
        col: usize,
        value: impl Into<String>,
    ) -> Result<(), TableShapeError> {
        self.check_cell(row, col)?;
        self.rows[row][col] = value.into();
        Ok(())
    }

    /// Insert a blank row below `after`, or at the top when `after` is `None`
    pub fn add_row(&mut self, after: Option<usize>) -> usize {
        let at = insertion_point(after, self.row_count());
        self.rows
            .insert(at, vec![String::new(); self.column_count()]);
        at
    }

    /// Insert a blank column right of `after`, or at the left edge when `None`
    pub fn add_column(&mut self, after: Option<usize>) -> usize {
        let at = insertion_point(after, self.column_count());
        for row in &mut self.rows {
            row.insert(at, String::new());
        }
        at
    }

    pub fn remove_row(&mut self, index: usize) -> Result<(), TableShapeError> {
        if self.row_count() <= 1 {
            return Err(TableShapeError::LastRow);
        }
        self.check_cell(index, 0)?;
        self.rows.remove(index);
        Ok(())
    }

    pub fn remove_column(&mut self, index: usize) -> Result<(), TableShapeError> {
        if self.column_count() <= 1 {
            return Err(TableShapeError::LastColumn);
        }
        self.check_cell(0, index)?;
        for row in &mut self.rows {
            row.remove(index);
        }
        Ok(())
    }

    /// Row-major successor of a cell
    pub fn next_cell(&self, row: usize, col: usize) -> CellStep {
        let cols = self.column_count();
        if col + 1 < cols {
            CellStep::Move { row, col: col + 1 }
        } else if row + 1 < self.row_count() {
            CellStep::Move { row: row + 1, col: 0 }
        } else {
            CellStep::AppendRow { row: row + 1, col: 0 }
        }
    }

    /// Row-major predecessor of a cell, `None` from the first cell
    pub fn prev_cell(&self, row: usize, col: usize) -> Option<(usize, usize)> {
        if col > 0 {
            Some((row, col - 1))
        } else if row > 0 {
            Some((row - 1, self.column_count().saturating_sub(1)))
        } else {
            None
        }
    }

    fn check_cell(&self, row: usize, col: usize) -> Result<(), TableShapeError> {
        if row < self.row_count() && col < self.column_count() {
            Ok(())
        } else {
            Err(TableShapeError::OutOfBounds {
                row,
                col,
                rows: self.row_count(),
                cols: self.column_count(),
            })
        }
    }
}

fn insertion_point(after: Option<usize>, len: usize) -> usize {
    after.map_or(0, |index| (index + 1).min(len))
}

impl TryFrom<Vec<Vec<String>>> for TableGrid {
    type Error = TableShapeError;

    fn try_from(rows: Vec<Vec<String>>) -> Result<Self, Self::Error> {
        let expected = rows.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(TableShapeError::Empty);
        }
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != expected)
        {
            return Err(TableShapeError::Ragged {
                row,
                expected,
                found: cells.len(),
            });
        }
        Ok(Self { rows })
    }
}

impl From<TableGrid> for Vec<Vec<String>> {
    fn from(grid: TableGrid) -> Self {
        grid.rows
    }
}
