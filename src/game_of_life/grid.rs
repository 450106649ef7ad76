//! Grid representation and utilities for Game of Life

use crate::error::GridError;
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    #[default]
    Dead,
    Alive,
}

impl CellStatus {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == CellStatus::Alive
    }

    /// The opposite status
    pub fn toggled(self) -> Self {
        match self {
            CellStatus::Dead => CellStatus::Alive,
            CellStatus::Alive => CellStatus::Dead,
        }
    }
}

impl From<bool> for CellStatus {
    fn from(alive: bool) -> Self {
        if alive {
            CellStatus::Alive
        } else {
            CellStatus::Dead
        }
    }
}

impl From<CellStatus> for bool {
    fn from(status: CellStatus) -> Self {
        status.is_alive()
    }
}

/// A rectangular Game of Life grid with dead (non-wrapping) edges
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridState {
    rows: usize,
    columns: usize,
    cells: Vec<CellStatus>,
}

impl GridState {
    /// Create an all-dead grid
    pub fn new(rows: usize, columns: usize) -> Result<Self, GridError> {
        if rows == 0 || columns == 0 {
            return Err(GridError::EmptyGrid);
        }
        Ok(Self {
            rows,
            columns,
            cells: vec![CellStatus::Dead; rows * columns],
        })
    }

    /// Create a grid from nested rows; every row must have the same length
    pub fn from_rows<R, C>(rows: R) -> Result<Self, GridError>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<CellStatus>,
    {
        let mut cells = Vec::new();
        let mut height = 0;
        let mut width = None;

        for (row_idx, row) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(row.into_iter().map(Into::into));
            let len = cells.len() - before;

            match width {
                None => width = Some(len),
                Some(expected) if expected != len => {
                    return Err(GridError::RaggedRow { row: row_idx, len, expected });
                }
                Some(_) => {}
            }
            height += 1;
        }

        let width = width.unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(GridError::EmptyGrid);
        }

        Ok(Self {
            rows: height,
            columns: width,
            cells,
        })
    }

    /// Create a grid where every cell is independently alive with probability 0.5
    pub fn random<R: Rng + CryptoRng + ?Sized>(
        rows: usize,
        columns: usize,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(rows, columns)?;
        grid.fill_random(rng);
        Ok(grid)
    }

    /// Overwrite every cell with a fair coin flip
    pub fn fill_random<R: Rng + CryptoRng + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = CellStatus::from(rng.gen_bool(0.5));
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Grid dimensions as `(rows, columns)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    #[inline]
    fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    fn check_bounds(&self, row: usize, column: usize) -> Result<(), GridError> {
        if row >= self.rows || column >= self.columns {
            return Err(GridError::OutOfBounds {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(())
    }

    /// Get cell status at coordinates
    pub fn get(&self, row: usize, column: usize) -> Result<CellStatus, GridError> {
        self.check_bounds(row, column)?;
        Ok(self.cells[self.index(row, column)])
    }

    /// Set cell status at coordinates
    pub fn set(&mut self, row: usize, column: usize, status: CellStatus) -> Result<(), GridError> {
        self.check_bounds(row, column)?;
        let idx = self.index(row, column);
        self.cells[idx] = status;
        Ok(())
    }

    /// Flip a single cell between dead and alive
    pub fn toggle(&mut self, row: usize, column: usize) -> Result<CellStatus, GridError> {
        self.check_bounds(row, column)?;
        let idx = self.index(row, column);
        self.cells[idx] = self.cells[idx].toggled();
        Ok(self.cells[idx])
    }

    /// Count living cells in the Moore neighbourhood; cells beyond the edge are absent
    pub fn count_alive_neighbors(&self, row: usize, column: usize) -> u8 {
        let mut count = 0;

        for dr in [-1isize, 0, 1] {
            for dc in [-1isize, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }

                let (Some(r), Some(c)) = (row.checked_add_signed(dr), column.checked_add_signed(dc))
                else {
                    continue;
                };

                if r < self.rows && c < self.columns && self.cells[self.index(r, c)].is_alive() {
                    count += 1;
                }
            }
        }

        count
    }

    /// Iterate over all rows
    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellStatus]> {
        self.cells.chunks(self.columns)
    }

    /// Get all living cell coordinates
    pub fn alive_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(idx, _)| (idx / self.columns, idx % self.columns))
            .collect()
    }

    /// Count total living cells
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Check if the grid has no living cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_alive())
    }

    pub(crate) fn from_cells_unchecked(rows: usize, columns: usize, cells: Vec<CellStatus>) -> Self {
        debug_assert_eq!(cells.len(), rows * columns);
        Self { rows, columns, cells }
    }
}

impl Index<(usize, usize)> for GridState {
    type Output = CellStatus;

    fn index(&self, (row, column): (usize, usize)) -> &Self::Output {
        assert!(
            row < self.rows && column < self.columns,
            "coordinates ({row}, {column}) out of bounds for {}x{} grid",
            self.rows,
            self.columns
        );
        &self.cells[row * self.columns + column]
    }
}

impl fmt::Display for GridState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for cell in row {
                let symbol = if cell.is_alive() { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
