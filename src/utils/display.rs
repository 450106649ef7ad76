//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::engine::{EngineEvent, RunState};
use crate::game_of_life::GridState;
use anyhow::Result;
use itertools::Itertools;
use serde::Serialize;

/// Format grids and engine frames for the terminal
pub struct FrameFormatter;

/// One displayed generation, as written by `--format json`
#[derive(Debug, Serialize)]
struct JsonFrame<'a> {
    generation: usize,
    alive: usize,
    rows: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a str>,
}

impl FrameFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &GridState) -> String {
        let mut output = grid
            .iter_rows()
            .map(|row| {
                row.iter()
                    .map(|cell| if cell.is_alive() { '█' } else { '·' })
                    .collect::<String>()
            })
            .join("\n");
        output.push('\n');
        output
    }

    /// Format one displayed generation
    pub fn format_frame(
        generation: usize,
        grid: &GridState,
        format: OutputFormat,
        note: Option<&str>,
    ) -> Result<String> {
        match format {
            OutputFormat::Text => {
                let mut output = format!("Generation {} (Living: {})", generation, grid.alive_count());
                if let Some(note) = note {
                    output.push_str(&format!(" [{note}]"));
                }
                output.push('\n');
                output.push_str(&Self::format_grid_compact(grid));
                Ok(output)
            }
            OutputFormat::Json => {
                let frame = JsonFrame {
                    generation,
                    alive: grid.alive_count(),
                    rows: crate::game_of_life::io::grid_to_string(grid)
                        .lines()
                        .map(str::to_string)
                        .collect(),
                    note,
                };
                Ok(serde_json::to_string(&frame)?)
            }
        }
    }

    /// One-line description of a non-render engine event
    pub fn describe_event(event: &EngineEvent) -> Option<String> {
        match event {
            EngineEvent::Render { .. } | EngineEvent::GenerationChanged { .. } => None,
            EngineEvent::RunStateChanged { state } => Some(format!(
                "Run state: {}",
                match state {
                    RunState::Idle => "idle",
                    RunState::Running => "running",
                    RunState::Paused => "paused",
                }
            )),
            EngineEvent::DimensionsChanged { rows, columns } => {
                Some(format!("Grid resized to {}x{}", rows, columns))
            }
        }
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
