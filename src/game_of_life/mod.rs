//! Game of Life core functionality

pub mod grid;
pub mod io;
pub mod rules;

pub use grid::{CellStatus, GridState};
pub use io::{builtin_pattern, create_example_patterns, load_grid_from_file, parse_grid_from_string};
pub use rules::LifeRules;
