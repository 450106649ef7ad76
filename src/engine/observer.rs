//! Outbound notifications from the engine to whatever draws the grid

use crate::game_of_life::GridState;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

/// Run-control state of a [`LifeEngine`](super::LifeEngine)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Paused,
}

/// Receives everything the engine wants displayed
pub trait EngineObserver {
    /// A grid should be shown as generation `generation`
    fn on_render(&mut self, generation: usize, grid: &GridState);

    fn on_generation_changed(&mut self, generation: usize);

    fn on_run_state_changed(&mut self, state: RunState);

    /// The layout must be resized to `rows` x `columns`
    fn on_dimensions_changed(&mut self, rows: usize, columns: usize);
}

/// Owned form of an observer callback
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    Render { generation: usize, grid: GridState },
    GenerationChanged { generation: usize },
    RunStateChanged { state: RunState },
    DimensionsChanged { rows: usize, columns: usize },
}

/// Observer that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl EngineObserver for NullObserver {
    fn on_render(&mut self, _generation: usize, _grid: &GridState) {}
    fn on_generation_changed(&mut self, _generation: usize) {}
    fn on_run_state_changed(&mut self, _state: RunState) {}
    fn on_dimensions_changed(&mut self, _rows: usize, _columns: usize) {}
}

/// Observer that keeps every event in memory
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<EngineEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    pub fn take(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Grids rendered so far, in order
    pub fn renders(&self) -> Vec<(usize, &GridState)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                EngineEvent::Render { generation, grid } => Some((*generation, grid)),
                _ => None,
            })
            .collect()
    }

    pub fn last_render(&self) -> Option<(usize, &GridState)> {
        self.renders().pop()
    }

    pub fn run_states(&self) -> Vec<RunState> {
        self.events
            .iter()
            .filter_map(|event| match event {
                EngineEvent::RunStateChanged { state } => Some(*state),
                _ => None,
            })
            .collect()
    }
}

impl EngineObserver for EventLog {
    fn on_render(&mut self, generation: usize, grid: &GridState) {
        self.events.push(EngineEvent::Render {
            generation,
            grid: grid.clone(),
        });
    }

    fn on_generation_changed(&mut self, generation: usize) {
        self.events.push(EngineEvent::GenerationChanged { generation });
    }

    fn on_run_state_changed(&mut self, state: RunState) {
        self.events.push(EngineEvent::RunStateChanged { state });
    }

    fn on_dimensions_changed(&mut self, rows: usize, columns: usize) {
        self.events.push(EngineEvent::DimensionsChanged { rows, columns });
    }
}

// A closed receiver means the driver went away; the engine keeps running regardless.
impl EngineObserver for UnboundedSender<EngineEvent> {
    fn on_render(&mut self, generation: usize, grid: &GridState) {
        let _ = self.send(EngineEvent::Render {
            generation,
            grid: grid.clone(),
        });
    }

    fn on_generation_changed(&mut self, generation: usize) {
        let _ = self.send(EngineEvent::GenerationChanged { generation });
    }

    fn on_run_state_changed(&mut self, state: RunState) {
        let _ = self.send(EngineEvent::RunStateChanged { state });
    }

    fn on_dimensions_changed(&mut self, rows: usize, columns: usize) {
        let _ = self.send(EngineEvent::DimensionsChanged { rows, columns });
    }
}
