//! Terminal driver for the Game of Life engine

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use game_of_life_replay::{
    config::{CliOverrides, InitialConfig, OutputFormat, Settings},
    engine::{EngineEvent, EventLog, LifeEngine, SeekOutcome},
    game_of_life::{builtin_pattern, create_example_patterns, load_grid_from_file, GridState},
    runtime::EngineHandle,
    utils::{ColorOutput, FrameFormatter},
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "game_of_life_replay")]
#[command(about = "Conway's Game of Life with rewindable history")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Ways to choose the first generation; at most one may be given
#[derive(Args, Debug, Default)]
struct InitialArgs {
    /// Pattern file of '0'/'1' rows
    #[arg(short, long, conflicts_with_all = ["builtin", "random"])]
    pattern: Option<PathBuf>,

    /// Built-in pattern name (blinker, block, beacon, glider, toad)
    #[arg(short, long, conflicts_with = "random")]
    builtin: Option<String>,

    /// Start from a random grid
    #[arg(long)]
    random: bool,
}

impl InitialArgs {
    fn to_config(&self) -> Option<InitialConfig> {
        if let Some(file) = &self.pattern {
            Some(InitialConfig::Pattern { file: file.clone() })
        } else if let Some(name) = &self.builtin {
            Some(InitialConfig::Builtin { name: name.clone() })
        } else if self.random {
            Some(InitialConfig::Random)
        } else {
            None
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation on a timer and print every generation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        #[command(flatten)]
        initial: InitialArgs,

        /// Grid rows (overrides config; ignored for pattern input)
        #[arg(long)]
        rows: Option<usize>,

        /// Grid columns (overrides config; ignored for pattern input)
        #[arg(long)]
        columns: Option<usize>,

        /// Seconds between generations (overrides config)
        #[arg(short, long)]
        interval: Option<f64>,

        /// Generations to display (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Step back this many generations at the end and show the replayed grid
        #[arg(long)]
        rewind: Option<usize>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Print run-state changes as they happen
        #[arg(short, long)]
        verbose: bool,
    },

    /// Compute generations without a timer and print them
    Step {
        #[command(flatten)]
        initial: InitialArgs,

        /// Number of generations to compute
        #[arg(short, long, default_value_t = 4)]
        generations: usize,

        /// Step back this many generations afterwards
        #[arg(long)]
        rewind: Option<usize>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            initial,
            rows,
            columns,
            interval,
            generations,
            rewind,
            format,
            verbose,
        } => {
            let overrides = CliOverrides {
                rows,
                columns,
                tick_interval: interval,
                generations,
                initial: initial.to_config(),
                format,
            };
            run_command(&config, &overrides, rewind, verbose).await
        }
        Commands::Step {
            initial,
            generations,
            rewind,
            format,
        } => step_command(&initial, generations, rewind, format),
        Commands::Setup { directory, force } => setup_command(&directory, force),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        eprintln!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

/// Build the first generation; `None` means the engine should randomize
fn initial_grid(initial: &InitialConfig) -> Result<Option<GridState>> {
    match initial {
        InitialConfig::Random => Ok(None),
        InitialConfig::Pattern { file } => load_grid_from_file(file).map(Some),
        InitialConfig::Builtin { name } => builtin_pattern(name).map(Some),
    }
}

async fn run_command(
    config_path: &PathBuf,
    overrides: &CliOverrides,
    rewind: Option<usize>,
    verbose: bool,
) -> Result<()> {
    let mut settings = load_settings(config_path)?;
    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;

    let initial = initial_grid(&settings.initial)?;
    let (rows, columns) = initial
        .as_ref()
        .map(GridState::dimensions)
        .unwrap_or((settings.grid.rows, settings.grid.columns));
    let format = settings.output.format;
    let target = settings.simulation.generations;

    let (handle, mut events) =
        EngineHandle::spawn(rows, columns).context("Failed to start engine")?;
    handle.set_tick_interval(settings.simulation.tick_interval).await?;

    match initial {
        Some(grid) => {
            handle.submit_initial_grid(grid).await?;
            handle.start()?;
        }
        None => handle.randomize()?,
    }

    if target > 0 {
        while let Some(event) = events.recv().await {
            match event {
                EngineEvent::Render { generation, grid } => {
                    if settings.output.animate && format == OutputFormat::Text {
                        print!("\x1b[2J\x1b[H");
                    }
                    println!("{}", FrameFormatter::format_frame(generation, &grid, format, None)?);
                    if generation + 1 >= target {
                        break;
                    }
                }
                other => {
                    if verbose {
                        if let Some(line) = FrameFormatter::describe_event(&other) {
                            eprintln!("{}", ColorOutput::info(&line));
                        }
                    }
                }
            }
        }
    }
    handle.pause()?;

    if let Some(steps) = rewind {
        let delta = -i64::try_from(steps).context("Rewind distance too large")?;
        let wanted = match handle.seek(delta).await? {
            SeekOutcome::Replayed { generation } | SeekOutcome::AtFrontier { generation } => {
                Some(generation)
            }
            SeekOutcome::Clamped => {
                eprintln!("{}", ColorOutput::warning("Rewind went past generation 0"));
                // Generation 0 is only re-rendered if it was ever displayed
                (handle.snapshot().await?.history_len > 0).then_some(0)
            }
            SeekOutcome::Extending { .. } => None,
        };

        if let Some(wanted) = wanted {
            while let Some(event) = events.recv().await {
                if let EngineEvent::Render { generation, grid } = event {
                    if generation == wanted {
                        println!(
                            "{}",
                            FrameFormatter::format_frame(generation, &grid, format, Some("replay"))?
                        );
                        break;
                    }
                }
            }
        }
    }

    let snapshot = handle.snapshot().await?;
    handle.shutdown()?;

    eprintln!(
        "{}",
        ColorOutput::success(&format!(
            "Stopped at generation {} with {} generation(s) in history",
            snapshot.generation, snapshot.history_len
        ))
    );

    Ok(())
}

fn step_command(
    initial: &InitialArgs,
    generations: usize,
    rewind: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let config = initial.to_config().unwrap_or(InitialConfig::Builtin {
        name: "glider".to_string(),
    });
    let grid = match initial_grid(&config)? {
        Some(grid) => grid,
        None => {
            let defaults = Settings::default();
            GridState::random(defaults.grid.rows, defaults.grid.columns, &mut rand::rngs::OsRng)?
        }
    };

    let (rows, columns) = grid.dimensions();
    let mut engine = LifeEngine::new(rows, columns, EventLog::new())?;
    engine.submit_initial_grid(grid)?;
    engine.start();
    for _ in 0..generations {
        engine.tick();
    }
    engine.pause();
    print_renders(engine.observer_mut().take(), format, None)?;

    if let Some(steps) = rewind {
        let delta = -i64::try_from(steps).context("Rewind distance too large")?;
        engine.seek(delta);
        print_renders(engine.observer_mut().take(), format, Some("replay"))?;
    }

    Ok(())
}

fn print_renders(events: Vec<EngineEvent>, format: OutputFormat, note: Option<&str>) -> Result<()> {
    for event in events {
        if let EngineEvent::Render { generation, grid } = event {
            println!("{}", FrameFormatter::format_frame(generation, &grid, format, note)?);
        }
    }
    Ok(())
}

fn setup_command(directory: &Path, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    for dir in [&config_dir, &patterns_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_patterns(&patterns_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut glider = Settings::default();
    glider.initial = InitialConfig::Builtin {
        name: "glider".to_string(),
    };
    glider.simulation.generations = 24;
    glider.to_file(&examples_dir.join("glider.yaml"))?;

    let mut pattern = Settings::default();
    pattern.initial = InitialConfig::Pattern {
        file: PathBuf::from("patterns/beacon.txt"),
    };
    pattern.simulation.tick_interval = 0.5;
    pattern.to_file(&examples_dir.join("beacon.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());
    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- run --config config/default.yaml --rewind 5");

    Ok(())
}
