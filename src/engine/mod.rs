//! Generation engine: stepping, run control, history and time travel

pub mod history;
pub mod life_engine;
pub mod observer;

pub use history::History;
pub use life_engine::{DimensionChange, LifeEngine, SeekOutcome, DEFAULT_TICK_INTERVAL};
pub use observer::{EngineEvent, EngineObserver, EventLog, NullObserver, RunState};
