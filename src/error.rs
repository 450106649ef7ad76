//! Error types for grid access and engine control

use thiserror::Error;

/// Errors raised by [`GridState`](crate::game_of_life::GridState) construction and access
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("coordinates ({row}, {column}) out of bounds for {rows}x{columns} grid")]
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    #[error("grid must have at least one row and one column")]
    EmptyGrid,

    #[error("row {row} has length {len}, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },
}

/// Errors raised by [`LifeEngine`](crate::engine::LifeEngine) and its async handle
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("grid is {found_rows}x{found_columns}, engine expects {rows}x{columns}")]
    DimensionMismatch {
        rows: usize,
        columns: usize,
        found_rows: usize,
        found_columns: usize,
    },

    #[error("tick interval must be a positive number of seconds, got {0}")]
    InvalidInterval(f64),

    #[error("engine task has stopped")]
    EngineStopped,
}
