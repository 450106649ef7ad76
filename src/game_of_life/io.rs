//! Reading initial patterns from text
//!
//! Format: each non-empty line is a row, `1` for alive and `0` for dead.

use super::GridState;
use anyhow::{Context, Result};
use std::path::Path;

/// Built-in starting patterns, each padded with a dead margin
pub const BUILTIN_PATTERNS: &[(&str, &str)] = &[
    ("blinker", "00000\n00000\n01110\n00000\n00000\n"),
    ("block", "0000\n0110\n0110\n0000\n"),
    ("beacon", "000000\n011000\n011000\n000110\n000110\n000000\n"),
    ("glider", "00100000\n10100000\n01100000\n00000000\n00000000\n00000000\n00000000\n00000000\n"),
    ("toad", "000000\n000000\n001110\n011100\n000000\n000000\n"),
];

/// Look up a built-in pattern by name
pub fn builtin_pattern(name: &str) -> Result<GridState> {
    let (_, content) = BUILTIN_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.eq_ignore_ascii_case(name))
        .with_context(|| {
            let known: Vec<&str> = BUILTIN_PATTERNS.iter().map(|(n, _)| *n).collect();
            format!("Unknown pattern '{}' (known: {})", name, known.join(", "))
        })?;

    parse_grid_from_string(content)
}

/// Load a grid from a text file
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<GridState> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content)
        .with_context(|| format!("Failed to parse pattern file: {}", path.as_ref().display()))
}

/// Parse a grid from its string representation
pub fn parse_grid_from_string(content: &str) -> Result<GridState> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Pattern is empty or contains no valid rows");
    }

    let mut rows = Vec::with_capacity(lines.len());
    for (row_idx, line) in lines.iter().enumerate() {
        let mut row = Vec::with_capacity(line.len());
        for (col_idx, ch) in line.chars().enumerate() {
            match ch {
                '0' => row.push(false),
                '1' => row.push(true),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    row_idx,
                    col_idx
                ),
            }
        }
        rows.push(row);
    }

    Ok(GridState::from_rows(rows)?)
}

/// Convert a grid to its string representation
pub fn grid_to_string(grid: &GridState) -> String {
    let mut result = String::with_capacity(grid.rows() * (grid.columns() + 1));
    for row in grid.iter_rows() {
        result.extend(row.iter().map(|cell| if cell.is_alive() { '1' } else { '0' }));
        result.push('\n');
    }
    result
}

/// Write every built-in pattern into a directory as `<name>.txt`
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for (name, content) in BUILTIN_PATTERNS {
        let path = dir.join(format!("{name}.txt"));
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}
