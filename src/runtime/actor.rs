//! Async front end: one task owns the engine, handles talk to it over a channel

use super::ticker::Ticker;
use crate::engine::{DimensionChange, EngineEvent, LifeEngine, RunState, SeekOutcome};
use crate::error::EngineError;
use crate::game_of_life::GridState;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace};

/// Stream of everything the engine renders or announces
pub type EngineEvents = mpsc::UnboundedReceiver<EngineEvent>;

/// Point-in-time view of the engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSnapshot {
    pub rows: usize,
    pub columns: usize,
    pub generation: usize,
    pub history_len: usize,
    pub run_state: RunState,
    pub replaying: bool,
    pub tick_interval: Duration,
    pub grid: GridState,
}

#[derive(Debug)]
enum Command {
    SubmitInitialGrid {
        grid: GridState,
        reply: oneshot::Sender<Result<(), EngineError>>,
    },
    Resize {
        change: Resize,
        reply: oneshot::Sender<DimensionChange>,
    },
    Start,
    Pause,
    Resume,
    TogglePause,
    Randomize,
    Reset,
    Seek {
        delta: i64,
        reply: oneshot::Sender<SeekOutcome>,
    },
    SetTickInterval {
        seconds: f64,
        reply: oneshot::Sender<Result<(), EngineError>>,
    },
    Snapshot {
        reply: oneshot::Sender<EngineSnapshot>,
    },
    Shutdown,
}

#[derive(Debug, Clone, Copy)]
enum Resize {
    Set { rows: i64, columns: i64 },
    AdjustRows(i64),
    AdjustColumns(i64),
    Preset(i64),
}

/// Cloneable handle to an engine running on its own task
///
/// Commands are applied in the order they are sent. The engine task stops when every
/// handle has been dropped or [`shutdown`](Self::shutdown) is called.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl EngineHandle {
    /// Spawn an engine task for a `rows` x `columns` grid on the current tokio runtime
    pub fn spawn(rows: usize, columns: usize) -> Result<(Self, EngineEvents), EngineError> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let engine = LifeEngine::new(rows, columns, event_tx)?;

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();

        let actor = EngineActor {
            engine,
            commands: command_rx,
            ticks: tick_rx,
            tick_tx,
            ticker: None,
            epoch: 0,
        };
        tokio::spawn(actor.run());

        Ok((Self { commands: command_tx }, event_rx))
    }

    fn send(&self, command: Command) -> Result<(), EngineError> {
        self.commands
            .send(command)
            .map_err(|_| EngineError::EngineStopped)
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T, EngineError> {
        let (reply, response) = oneshot::channel();
        self.send(build(reply))?;
        response.await.map_err(|_| EngineError::EngineStopped)
    }

    pub async fn submit_initial_grid(&self, grid: GridState) -> Result<(), EngineError> {
        self.request(|reply| Command::SubmitInitialGrid { grid, reply })
            .await?
    }

    pub async fn set_dimensions(&self, rows: i64, columns: i64) -> Result<DimensionChange, EngineError> {
        self.resize(Resize::Set { rows, columns }).await
    }

    pub async fn adjust_rows(&self, delta: i64) -> Result<DimensionChange, EngineError> {
        self.resize(Resize::AdjustRows(delta)).await
    }

    pub async fn adjust_columns(&self, delta: i64) -> Result<DimensionChange, EngineError> {
        self.resize(Resize::AdjustColumns(delta)).await
    }

    pub async fn apply_preset(&self, size: i64) -> Result<DimensionChange, EngineError> {
        self.resize(Resize::Preset(size)).await
    }

    async fn resize(&self, change: Resize) -> Result<DimensionChange, EngineError> {
        self.request(|reply| Command::Resize { change, reply }).await
    }

    pub fn start(&self) -> Result<(), EngineError> {
        self.send(Command::Start)
    }

    pub fn pause(&self) -> Result<(), EngineError> {
        self.send(Command::Pause)
    }

    pub fn resume(&self) -> Result<(), EngineError> {
        self.send(Command::Resume)
    }

    pub fn toggle_pause(&self) -> Result<(), EngineError> {
        self.send(Command::TogglePause)
    }

    pub fn randomize(&self) -> Result<(), EngineError> {
        self.send(Command::Randomize)
    }

    pub fn reset(&self) -> Result<(), EngineError> {
        self.send(Command::Reset)
    }

    pub async fn seek(&self, delta: i64) -> Result<SeekOutcome, EngineError> {
        self.request(|reply| Command::Seek { delta, reply }).await
    }

    pub async fn set_tick_interval(&self, seconds: f64) -> Result<(), EngineError> {
        self.request(|reply| Command::SetTickInterval { seconds, reply })
            .await?
    }

    pub async fn snapshot(&self) -> Result<EngineSnapshot, EngineError> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Stop the engine task; later commands fail with [`EngineError::EngineStopped`]
    pub fn shutdown(&self) -> Result<(), EngineError> {
        self.send(Command::Shutdown)
    }
}

struct EngineActor {
    engine: LifeEngine<mpsc::UnboundedSender<EngineEvent>>,
    commands: mpsc::UnboundedReceiver<Command>,
    ticks: mpsc::UnboundedReceiver<u64>,
    tick_tx: mpsc::UnboundedSender<u64>,
    ticker: Option<Ticker>,
    epoch: u64,
}

impl EngineActor {
    async fn run(mut self) {
        debug!("engine task started");
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle(command),
                },
                Some(epoch) = self.ticks.recv() => self.on_tick(epoch),
            }
        }
        self.cancel_ticker();
        debug!("engine task stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::SubmitInitialGrid { grid, reply } => {
                let _ = reply.send(self.engine.submit_initial_grid(grid));
            }
            Command::Resize { change, reply } => {
                let result = match change {
                    Resize::Set { rows, columns } => self.engine.set_dimensions(rows, columns),
                    Resize::AdjustRows(delta) => self.engine.adjust_rows(delta),
                    Resize::AdjustColumns(delta) => self.engine.adjust_columns(delta),
                    Resize::Preset(size) => self.engine.apply_preset(size),
                };
                if matches!(result, DimensionChange::Applied { .. }) {
                    self.restart_ticker(true);
                }
                let _ = reply.send(result);
            }
            Command::Start => {
                self.engine.start();
                self.restart_ticker(true);
            }
            Command::Pause => {
                self.engine.pause();
                self.restart_ticker(true);
            }
            Command::Resume => {
                self.engine.resume();
                self.restart_ticker(true);
            }
            Command::TogglePause => {
                self.engine.toggle_pause();
                self.restart_ticker(true);
            }
            Command::Randomize => {
                self.engine.randomize();
                self.restart_ticker(true);
            }
            Command::Reset => {
                self.engine.reset();
                self.restart_ticker(true);
            }
            Command::Seek { delta, reply } => {
                let outcome = self.engine.seek(delta);
                self.restart_ticker(true);
                let _ = reply.send(outcome);
            }
            Command::SetTickInterval { seconds, reply } => {
                let result = self.engine.set_tick_interval(seconds);
                if result.is_ok() {
                    // Keep the current rhythm going, just at the new pace
                    self.restart_ticker(false);
                }
                let _ = reply.send(result);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            Command::Shutdown => {}
        }
    }

    fn on_tick(&mut self, epoch: u64) {
        if self.ticker.as_ref().map(Ticker::epoch) != Some(epoch) {
            trace!(epoch, current = self.epoch, "dropping stale tick");
            return;
        }
        self.engine.tick();
        if !self.engine.is_running() {
            self.cancel_ticker();
        }
    }

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    /// Replace any running ticker so at most one stepping sequence exists
    fn restart_ticker(&mut self, immediate: bool) {
        self.cancel_ticker();
        if !self.engine.is_running() {
            return;
        }
        self.epoch += 1;
        self.ticker = Some(Ticker::spawn(
            self.engine.tick_interval(),
            self.epoch,
            immediate,
            self.tick_tx.clone(),
        ));
    }

    fn snapshot(&self) -> EngineSnapshot {
        let (rows, columns) = self.engine.dimensions();
        EngineSnapshot {
            rows,
            columns,
            generation: self.engine.generation(),
            history_len: self.engine.history().len(),
            run_state: self.engine.run_state(),
            replaying: self.engine.is_replaying(),
            tick_interval: self.engine.tick_interval(),
            grid: self.engine.current_grid().clone(),
        }
    }
}
