//! Conway's B3/S23 transition rule

use super::{CellStatus, GridState};
use rayon::prelude::*;

/// Game of Life rules engine
pub struct LifeRules;

impl LifeRules {
    /// Compute the next generation; the input grid is left untouched
    pub fn step(current: &GridState) -> GridState {
        let (rows, columns) = current.dimensions();

        let next_cells: Vec<CellStatus> = (0..rows)
            .into_par_iter()
            .flat_map_iter(|row| {
                (0..columns).map(move |col| {
                    let neighbors = current.count_alive_neighbors(row, col);
                    Self::next_status(current[(row, col)], neighbors)
                })
            })
            .collect();

        GridState::from_cells_unchecked(rows, columns, next_cells)
    }

    /// Advance a grid by several generations
    pub fn step_generations(mut grid: GridState, generations: usize) -> GridState {
        for _ in 0..generations {
            grid = Self::step(&grid);
        }
        grid
    }

    /// Status of a cell in the next generation given its current status and live neighbours
    pub fn next_status(current: CellStatus, alive_neighbors: u8) -> CellStatus {
        match (current, alive_neighbors) {
            // underpopulation
            (CellStatus::Alive, n) if n < 2 => CellStatus::Dead,
            // overpopulation
            (CellStatus::Alive, n) if n > 3 => CellStatus::Dead,
            // birth
            (CellStatus::Dead, 3) => CellStatus::Alive,
            (status, _) => status,
        }
    }
}
