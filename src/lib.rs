//! Conway's Game of Life engine with rewindable history
//!
//! [`LifeEngine`] steps a grid one generation at a time, remembers every generation it has
//! displayed, and can jump back to any of them or run forward to a later one.
//! [`runtime::EngineHandle`] drives an engine from a cancellable timer on tokio.

pub mod config;
pub mod engine;
pub mod error;
pub mod game_of_life;
pub mod runtime;
pub mod utils;

pub use config::Settings;
pub use engine::{LifeEngine, RunState, SeekOutcome};
pub use error::{EngineError, GridError};
pub use game_of_life::{CellStatus, GridState, LifeRules};
