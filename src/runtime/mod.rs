//! Timer-driven execution of a [`LifeEngine`](crate::engine::LifeEngine) on tokio

pub mod actor;
pub mod ticker;

pub use actor::{EngineEvents, EngineHandle, EngineSnapshot};
pub use ticker::Ticker;
