//! Configuration management for the Game of Life driver

pub mod settings;

pub use settings::{
    CliOverrides, GridConfig, InitialConfig, OutputConfig, OutputFormat, Settings, SimulationConfig,
};
