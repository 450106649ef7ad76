//! Configuration settings for the Game of Life driver

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub simulation: SimulationConfig,
    pub initial: InitialConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seconds between generations
    pub tick_interval: f64,
    /// Generations to display before the driver stops
    pub generations: usize,
}

/// Where the first generation comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "source")]
pub enum InitialConfig {
    Random,
    Pattern { file: PathBuf },
    Builtin { name: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Clear the terminal between frames
    pub animate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                rows: 20,
                columns: 20,
            },
            simulation: SimulationConfig {
                tick_interval: 0.25,
                generations: 30,
            },
            initial: InitialConfig::Random,
            output: OutputConfig {
                format: OutputFormat::Text,
                animate: false,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.rows == 0 || self.grid.columns == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.grid.rows,
                self.grid.columns
            );
        }

        let interval = self.simulation.tick_interval;
        if !(interval.is_finite() && interval > 0.0) {
            anyhow::bail!("Tick interval must be a positive number of seconds, got {}", interval);
        }

        if let InitialConfig::Pattern { file } = &self.initial {
            if !file.exists() {
                anyhow::bail!("Pattern file does not exist: {}", file.display());
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(rows) = cli_overrides.rows {
            self.grid.rows = rows;
        }
        if let Some(columns) = cli_overrides.columns {
            self.grid.columns = columns;
        }
        if let Some(interval) = cli_overrides.tick_interval {
            self.simulation.tick_interval = interval;
        }
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(ref initial) = cli_overrides.initial {
            self.initial = initial.clone();
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    pub tick_interval: Option<f64>,
    pub generations: Option<usize>,
    pub initial: Option<InitialConfig>,
    pub format: Option<OutputFormat>,
}
