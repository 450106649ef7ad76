//! Generation engine with run control and history-based time travel

use super::history::History;
use super::observer::{EngineObserver, NullObserver, RunState};
use crate::error::EngineError;
use crate::game_of_life::{CellStatus, GridState, LifeRules};
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};
use std::cmp::Ordering;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Interval between automatic steps until the driver picks another one
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// What a call to [`LifeEngine::seek`] ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOutcome {
    /// A stored generation was rendered without recomputation
    Replayed { generation: usize },
    /// The target was before generation 0; the engine moved to generation 0
    Clamped,
    /// The target was the live frontier; its grid was rendered and the engine paused there
    AtFrontier { generation: usize },
    /// The target lies beyond history; the engine is running live and stops at `target`
    Extending { target: usize },
}

/// Result of a dimension change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionChange {
    Applied { rows: usize, columns: usize },
    Unchanged,
    Rejected,
}

/// Owns the grid, its history and the run-control state
///
/// The engine is synchronous: something outside (see [`crate::runtime`]) has to call
/// [`tick`](Self::tick) on a timer while [`run_state`](Self::run_state) is
/// [`RunState::Running`].
///
/// `history[i]` is always the grid that was rendered as generation `i`. While the engine
/// is at the live frontier `generation == history.len()` and `active` holds the next grid
/// to display.
#[derive(Debug)]
pub struct LifeEngine<O: EngineObserver = NullObserver> {
    rows: usize,
    columns: usize,
    initial: Option<GridState>,
    active: GridState,
    history: History,
    generation: usize,
    run_state: RunState,
    replaying: bool,
    stop_at: Option<usize>,
    tick_interval: Duration,
    observer: O,
}

impl<O: EngineObserver> LifeEngine<O> {
    pub fn new(rows: usize, columns: usize, observer: O) -> Result<Self, EngineError> {
        let active = GridState::new(rows, columns)?;
        Ok(Self {
            rows,
            columns,
            initial: None,
            active,
            history: History::new(),
            generation: 0,
            run_state: RunState::Idle,
            replaying: false,
            stop_at: None,
            tick_interval: DEFAULT_TICK_INTERVAL,
            observer,
        })
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// True while the current generation is a stored history entry rather than the live frontier
    pub fn is_replaying(&self) -> bool {
        self.replaying
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Grid the current run started from
    pub fn initial_grid(&self) -> Option<&GridState> {
        self.initial.as_ref()
    }

    /// Grid belonging to the current generation counter
    pub fn current_grid(&self) -> &GridState {
        self.history.get(self.generation).unwrap_or(&self.active)
    }

    /// Next grid live stepping will display
    pub fn frontier(&self) -> &GridState {
        &self.active
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    fn blank_grid(&self) -> GridState {
        GridState::from_cells_unchecked(
            self.rows,
            self.columns,
            vec![CellStatus::Dead; self.rows * self.columns],
        )
    }

    fn set_run_state(&mut self, state: RunState) {
        if self.run_state != state {
            debug!(from = ?self.run_state, to = ?state, "run state changed");
            self.run_state = state;
            self.observer.on_run_state_changed(state);
        }
    }

    fn set_generation(&mut self, generation: usize) {
        self.generation = generation;
        self.observer.on_generation_changed(generation);
    }

    /// Leave replay mode and point the counter at the next generation to compute
    fn return_to_frontier(&mut self) {
        self.replaying = false;
        if self.generation != self.history.len() {
            self.set_generation(self.history.len());
        }
    }

    /// Drop history and counters and make `grid` generation 0
    fn begin_run(&mut self, grid: GridState) {
        self.stop_at = None;
        self.replaying = false;
        self.history.clear();
        self.active = grid;
        self.set_generation(0);
    }

    /// Hand over a grid built by the driver; it is used by the next [`start`](Self::start)
    pub fn submit_initial_grid(&mut self, grid: GridState) -> Result<(), EngineError> {
        let (found_rows, found_columns) = grid.dimensions();
        if (found_rows, found_columns) != (self.rows, self.columns) {
            return Err(EngineError::DimensionMismatch {
                rows: self.rows,
                columns: self.columns,
                found_rows,
                found_columns,
            });
        }

        debug!(alive = grid.alive_count(), "initial grid submitted");
        // Nothing has been displayed yet, so a live seek should begin from this grid too
        if self.history.is_empty() {
            self.active = grid.clone();
        }
        self.initial = Some(grid);
        Ok(())
    }

    /// Start a fresh run from the submitted grid (all dead if none was submitted)
    pub fn start(&mut self) {
        let grid = self.initial.clone().unwrap_or_else(|| self.blank_grid());
        debug!(alive = grid.alive_count(), "starting run");
        self.begin_run(grid);
        self.set_run_state(RunState::Running);
    }

    /// Stop stepping; a pending seek target is kept and honoured after [`resume`](Self::resume)
    pub fn pause(&mut self) {
        if self.run_state == RunState::Running {
            self.set_run_state(RunState::Paused);
        }
    }

    /// Continue stepping from the live frontier without touching history
    pub fn resume(&mut self) {
        if self.run_state != RunState::Paused {
            return;
        }
        self.return_to_frontier();
        self.set_run_state(RunState::Running);
    }

    /// Pause when running, resume when paused
    pub fn toggle_pause(&mut self) {
        match self.run_state {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
            RunState::Idle => {}
        }
    }

    /// Start a fresh run from a grid drawn from the operating system's secure RNG
    pub fn randomize(&mut self) {
        self.randomize_with(&mut OsRng);
    }

    pub fn randomize_with<R: Rng + CryptoRng + ?Sized>(&mut self, rng: &mut R) {
        let mut grid = self.blank_grid();
        grid.fill_random(rng);
        debug!(alive = grid.alive_count(), "randomized grid");
        self.initial = Some(grid.clone());
        self.begin_run(grid);
        self.set_run_state(RunState::Running);
    }

    /// Clear everything back to an all-dead idle grid
    pub fn reset(&mut self) {
        let blank = self.blank_grid();
        self.initial = None;
        self.begin_run(blank);
        self.set_run_state(RunState::Idle);
        self.observer.on_render(0, &self.active);
    }

    /// Display the frontier and advance one generation. Returns false when not running.
    pub fn tick(&mut self) -> bool {
        if self.run_state != RunState::Running {
            return false;
        }

        let displayed = self.generation;
        self.observer.on_render(displayed, &self.active);

        let next = LifeRules::step(&self.active);
        let shown = std::mem::replace(&mut self.active, next);
        let recorded = self.history.record(shown);
        assert_eq!(
            recorded, displayed,
            "live stepping must happen at the history frontier"
        );
        self.set_generation(displayed + 1);
        trace!(generation = self.generation, "tick");

        if let Some(target) = self.stop_at {
            if self.generation >= target {
                self.stop_at = None;
                self.observer.on_render(self.generation, &self.active);
                self.set_run_state(RunState::Paused);
                debug!(generation = self.generation, "reached seek target");
            }
        }

        true
    }

    /// Move the generation counter by `delta`, replaying history or extending it live
    pub fn seek(&mut self, delta: i64) -> SeekOutcome {
        self.pause();
        self.stop_at = None;

        let target = i64::try_from(self.generation)
            .unwrap_or(i64::MAX)
            .saturating_add(delta);

        if target < 0 {
            debug!(delta, "seek before generation 0 clamped");
            if let Some(first) = self.history.get(0) {
                self.replaying = true;
                self.observer.on_render(0, first);
            }
            self.set_generation(0);
            return SeekOutcome::Clamped;
        }

        let target = usize::try_from(target).unwrap_or(usize::MAX);
        let frontier = self.history.len();

        match target.cmp(&frontier) {
            Ordering::Less => {
                debug!(from = self.generation, to = target, "replaying history");
                self.replaying = true;
                if let Some(grid) = self.history.get(target) {
                    self.observer.on_render(target, grid);
                }
                self.set_generation(target);
                SeekOutcome::Replayed { generation: target }
            }
            Ordering::Equal => {
                debug!(generation = frontier, "seek landed on the frontier");
                self.return_to_frontier();
                self.observer.on_render(frontier, &self.active);
                self.set_run_state(RunState::Paused);
                SeekOutcome::AtFrontier { generation: frontier }
            }
            Ordering::Greater => {
                debug!(frontier, stop_at = target, "seeking beyond history");
                self.return_to_frontier();
                self.stop_at = Some(target);
                self.set_run_state(RunState::Running);
                SeekOutcome::Extending { target }
            }
        }
    }

    pub fn set_tick_interval(&mut self, seconds: f64) -> Result<(), EngineError> {
        if !(seconds.is_finite() && seconds > 0.0) {
            warn!(seconds, "rejected tick interval");
            return Err(EngineError::InvalidInterval(seconds));
        }
        self.tick_interval =
            Duration::try_from_secs_f64(seconds).map_err(|_| EngineError::InvalidInterval(seconds))?;
        debug!(interval = ?self.tick_interval, "tick interval changed");
        Ok(())
    }

    /// Resize the grid; non-positive values are ignored
    pub fn set_dimensions(&mut self, rows: i64, columns: i64) -> DimensionChange {
        let (Some(rows), Some(columns)) = (positive(rows), positive(columns)) else {
            warn!(rows, columns, "rejected non-positive dimensions");
            return DimensionChange::Rejected;
        };
        if (rows, columns) == (self.rows, self.columns) {
            return DimensionChange::Unchanged;
        }

        debug!(rows, columns, "dimensions changed");
        self.rows = rows;
        self.columns = columns;
        self.observer.on_dimensions_changed(rows, columns);
        self.reset();
        DimensionChange::Applied { rows, columns }
    }

    pub fn adjust_rows(&mut self, delta: i64) -> DimensionChange {
        let rows = dimension_i64(self.rows).saturating_add(delta);
        self.set_dimensions(rows, dimension_i64(self.columns))
    }

    pub fn adjust_columns(&mut self, delta: i64) -> DimensionChange {
        let columns = dimension_i64(self.columns).saturating_add(delta);
        self.set_dimensions(dimension_i64(self.rows), columns)
    }

    /// Switch to a square `size` x `size` grid
    pub fn apply_preset(&mut self, size: i64) -> DimensionChange {
        self.set_dimensions(size, size)
    }
}

fn positive(value: i64) -> Option<usize> {
    if value > 0 {
        usize::try_from(value).ok()
    } else {
        None
    }
}

fn dimension_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::observer::{EngineEvent, EventLog};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn glider() -> GridState {
        GridState::from_rows([
            [false, true, false, false, false, false, false, false],
            [false, false, true, false, false, false, false, false],
            [true, true, true, false, false, false, false, false],
            [false, false, false, false, false, false, false, false],
            [false, false, false, false, false, false, false, false],
            [false, false, false, false, false, false, false, false],
            [false, false, false, false, false, false, false, false],
            [false, false, false, false, false, false, false, false],
        ])
        .unwrap()
    }

    fn running_engine(grid: GridState) -> LifeEngine<EventLog> {
        let (rows, columns) = grid.dimensions();
        let mut engine = LifeEngine::new(rows, columns, EventLog::new()).unwrap();
        engine.submit_initial_grid(grid).unwrap();
        engine.start();
        engine
    }

    fn run_ticks(engine: &mut LifeEngine<EventLog>, n: usize) {
        for _ in 0..n {
            assert!(engine.tick());
        }
    }

    /// Tick until the engine stops on its own; returns the number of ticks taken
    fn tick_until_stopped(engine: &mut LifeEngine<EventLog>) -> usize {
        let mut ticks = 0;
        while engine.tick() {
            ticks += 1;
            assert!(ticks < 1000, "engine never stopped");
        }
        ticks
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = LifeEngine::new(3, 4, NullObserver).unwrap();
        assert_eq!(engine.run_state(), RunState::Idle);
        assert_eq!(engine.generation(), 0);
        assert!(engine.history().is_empty());
        assert!(engine.current_grid().is_empty());
        assert!(LifeEngine::new(0, 4, NullObserver).is_err());
    }

    #[test]
    fn test_tick_requires_running() {
        let mut engine = LifeEngine::new(3, 3, EventLog::new()).unwrap();
        assert!(!engine.tick());
        assert!(engine.observer().renders().is_empty());
    }

    #[test]
    fn test_submit_rejects_mismatched_grid() {
        let mut engine = LifeEngine::new(3, 3, NullObserver).unwrap();
        let err = engine.submit_initial_grid(GridState::new(4, 3).unwrap()).unwrap_err();
        assert_eq!(
            err,
            EngineError::DimensionMismatch { rows: 3, columns: 3, found_rows: 4, found_columns: 3 }
        );
    }

    #[test]
    fn test_history_matches_rendered_grids() {
        let mut engine = running_engine(glider());
        run_ticks(&mut engine, 5);

        assert_eq!(engine.history().len(), 5);
        assert_eq!(engine.generation(), 5);

        let renders = engine.observer().renders();
        assert_eq!(renders.len(), 5);
        for (index, (generation, grid)) in renders.into_iter().enumerate() {
            assert_eq!(generation, index);
            assert_eq!(engine.history().get(generation), Some(grid));
        }
        assert_eq!(engine.history().get(0), Some(&glider()));
        assert_eq!(engine.frontier(), &LifeRules::step_generations(glider(), 5));
    }

    #[test]
    fn test_pause_and_resume_keep_history() {
        let mut engine = running_engine(glider());
        run_ticks(&mut engine, 2);

        engine.pause();
        assert_eq!(engine.run_state(), RunState::Paused);
        assert!(!engine.tick());
        assert_eq!(engine.history().len(), 2);

        engine.resume();
        assert!(engine.tick());
        assert_eq!(engine.history().len(), 3);
        assert_eq!(engine.generation(), 3);

        engine.toggle_pause();
        assert_eq!(engine.run_state(), RunState::Paused);
        engine.toggle_pause();
        assert_eq!(engine.run_state(), RunState::Running);
    }

    #[test]
    fn test_start_clears_previous_run() {
        let mut engine = running_engine(glider());
        run_ticks(&mut engine, 4);

        engine.start();
        assert!(engine.history().is_empty());
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.current_grid(), &glider());
    }

    #[test]
    fn test_seek_back_replays_history() {
        let mut engine = running_engine(glider());
        run_ticks(&mut engine, 6);
        let frontier = engine.frontier().clone();

        let outcome = engine.seek(-2);

        assert_eq!(outcome, SeekOutcome::Replayed { generation: 4 });
        assert_eq!(engine.run_state(), RunState::Paused);
        assert_eq!(engine.generation(), 4);
        assert!(engine.is_replaying());
        assert_eq!(engine.history().len(), 6);
        assert_eq!(engine.frontier(), &frontier);

        let (generation, grid) = engine.observer().last_render().unwrap();
        assert_eq!(generation, 4);
        assert_eq!(Some(grid), engine.history().get(4));
        assert_eq!(engine.current_grid(), engine.history().get(4).unwrap());
    }

    #[test]
    fn test_seek_within_history_never_recomputes() {
        let mut engine = running_engine(glider());
        run_ticks(&mut engine, 5);
        let before: Vec<GridState> = engine.history().iter().cloned().collect();

        engine.seek(-4);
        engine.seek(2);
        assert_eq!(engine.generation(), 3);
        engine.seek(-1);
        assert_eq!(engine.generation(), 2);

        let after: Vec<GridState> = engine.history().iter().cloned().collect();
        assert_eq!(before, after);
        assert_eq!(engine.run_state(), RunState::Paused);
    }

    #[test]
    fn test_seek_before_start_clamps_to_first_generation() {
        let mut engine = running_engine(glider());
        run_ticks(&mut engine, 3);

        assert_eq!(engine.seek(-10), SeekOutcome::Clamped);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.history().len(), 3);

        let (generation, grid) = engine.observer().last_render().unwrap();
        assert_eq!(generation, 0);
        assert_eq!(grid, &glider());
    }

    #[test]
    fn test_seek_beyond_history_extends_it_live() {
        let mut engine = running_engine(glider());
        run_ticks(&mut engine, 3);

        let outcome = engine.seek(4);
        assert_eq!(outcome, SeekOutcome::Extending { target: 7 });
        assert_eq!(engine.run_state(), RunState::Running);

        let ticks = tick_until_stopped(&mut engine);
        assert_eq!(ticks, 4);
        assert_eq!(engine.history().len(), 7);
        assert_eq!(engine.generation(), 7);
        assert_eq!(engine.run_state(), RunState::Paused);

        // Same outcome as seven plain ticks
        let mut reference = running_engine(glider());
        run_ticks(&mut reference, 7);
        let (generation, grid) = engine.observer().last_render().unwrap();
        assert_eq!(generation, 7);
        assert_eq!(grid, reference.frontier());
        let ours: Vec<&GridState> = engine.history().iter().collect();
        let theirs: Vec<&GridState> = reference.history().iter().collect();
        assert_eq!(ours, theirs);
    }

    #[test]
    fn test_seek_forward_from_replay_continues_at_frontier() {
        let mut engine = running_engine(glider());
        run_ticks(&mut engine, 5);
        engine.seek(-3);
        assert_eq!(engine.generation(), 2);

        assert_eq!(engine.seek(5), SeekOutcome::Extending { target: 7 });
        assert!(!engine.is_replaying());
        assert_eq!(engine.generation(), 5);

        assert_eq!(tick_until_stopped(&mut engine), 2);
        assert_eq!(engine.history().len(), 7);
        assert_eq!(engine.history().get(6), Some(&LifeRules::step_generations(glider(), 6)));
    }

    #[test]
    fn test_seek_to_frontier_from_replay_lands_on_it() {
        let mut engine = running_engine(glider());
        run_ticks(&mut engine, 5);
        engine.seek(-3);
        assert_eq!(engine.generation(), 2);

        assert_eq!(engine.seek(3), SeekOutcome::AtFrontier { generation: 5 });
        assert_eq!(engine.generation(), 5);
        assert_eq!(engine.run_state(), RunState::Paused);
        assert!(!engine.is_replaying());
        assert!(!engine.tick());
        assert_eq!(engine.history().len(), 5);

        let (generation, grid) = engine.observer().last_render().unwrap();
        assert_eq!(generation, 5);
        assert_eq!(grid, &LifeRules::step_generations(glider(), 5));
    }

    #[test]
    fn test_seek_zero_at_frontier_does_not_step() {
        let mut engine = running_engine(glider());
        run_ticks(&mut engine, 2);

        assert_eq!(engine.seek(0), SeekOutcome::AtFrontier { generation: 2 });
        assert_eq!(tick_until_stopped(&mut engine), 0);
        assert_eq!(engine.history().len(), 2);
        assert_eq!(engine.generation(), 2);

        // Stepping forward one frame from there computes exactly one generation
        assert_eq!(engine.seek(1), SeekOutcome::Extending { target: 3 });
        assert_eq!(tick_until_stopped(&mut engine), 1);
        assert_eq!(engine.generation(), 3);
        assert_eq!(engine.history().len(), 3);
    }

    #[test]
    fn test_seek_forward_before_any_tick_uses_submitted_grid() {
        let mut engine = LifeEngine::new(8, 8, EventLog::new()).unwrap();
        engine.submit_initial_grid(glider()).unwrap();

        assert_eq!(engine.seek(2), SeekOutcome::Extending { target: 2 });
        assert_eq!(tick_until_stopped(&mut engine), 2);
        assert_eq!(engine.history().get(0), Some(&glider()));
        assert_eq!(engine.frontier(), &LifeRules::step_generations(glider(), 2));
    }

    #[test]
    fn test_resume_after_replay_returns_to_frontier() {
        let mut engine = running_engine(glider());
        run_ticks(&mut engine, 4);
        engine.seek(-2);

        engine.resume();
        assert_eq!(engine.generation(), 4);
        assert!(!engine.is_replaying());

        assert!(engine.tick());
        assert_eq!(engine.history().len(), 5);
        let (generation, _) = engine.observer().last_render().unwrap();
        assert_eq!(generation, 4);
    }

    #[test]
    fn test_pause_keeps_pending_arrival() {
        let mut engine = running_engine(glider());
        run_ticks(&mut engine, 1);
        assert_eq!(engine.seek(5), SeekOutcome::Extending { target: 6 });
        run_ticks(&mut engine, 1);

        engine.pause();
        assert!(!engine.tick());
        engine.resume();
        assert_eq!(tick_until_stopped(&mut engine), 4);
        assert_eq!(engine.generation(), 6);
        assert_eq!(engine.run_state(), RunState::Paused);
    }

    #[test]
    fn test_seek_back_drops_pending_arrival() {
        let mut engine = running_engine(glider());
        run_ticks(&mut engine, 2);
        engine.seek(4);
        run_ticks(&mut engine, 1);

        engine.seek(-1);
        engine.resume();
        run_ticks(&mut engine, 10);
        assert_eq!(engine.run_state(), RunState::Running);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut engine = running_engine(glider());
        run_ticks(&mut engine, 3);

        engine.reset();
        assert_eq!(engine.run_state(), RunState::Idle);
        assert_eq!(engine.generation(), 0);
        assert!(engine.history().is_empty());
        assert!(engine.current_grid().is_empty());
        assert!(engine.initial_grid().is_none());

        let (generation, grid) = engine.observer().last_render().unwrap();
        assert_eq!(generation, 0);
        assert!(grid.is_empty());

        // A start after reset runs the blank grid
        engine.start();
        assert!(engine.tick());
        assert!(engine.frontier().is_empty());
    }

    #[test]
    fn test_randomize_starts_fresh_run() {
        let mut engine = running_engine(glider());
        run_ticks(&mut engine, 3);

        let mut rng = StdRng::seed_from_u64(42);
        engine.randomize_with(&mut rng);

        assert_eq!(engine.run_state(), RunState::Running);
        assert_eq!(engine.generation(), 0);
        assert!(engine.history().is_empty());
        assert_eq!(engine.initial_grid(), Some(engine.current_grid()));
    }

    #[test]
    fn test_randomize_is_roughly_balanced() {
        let mut engine = LifeEngine::new(100, 100, NullObserver).unwrap();
        let mut alive = 0;
        let trials = 20;
        for _ in 0..trials {
            engine.randomize();
            alive += engine.current_grid().alive_count();
        }
        let ratio = alive as f64 / (trials * 100 * 100) as f64;
        assert!((0.48..0.52).contains(&ratio), "alive ratio {ratio}");
    }

    #[test]
    fn test_dimension_change_clears_history() {
        let mut engine = running_engine(glider());
        run_ticks(&mut engine, 3);

        assert_eq!(engine.set_dimensions(5, 6), DimensionChange::Applied { rows: 5, columns: 6 });
        assert_eq!(engine.dimensions(), (5, 6));
        assert_eq!(engine.generation(), 0);
        assert!(engine.history().is_empty());
        assert_eq!(engine.run_state(), RunState::Idle);
        assert_eq!(engine.current_grid().dimensions(), (5, 6));
        assert!(engine
            .observer()
            .events()
            .contains(&EngineEvent::DimensionsChanged { rows: 5, columns: 6 }));

        // The old grid no longer fits
        assert!(engine.submit_initial_grid(glider()).is_err());
    }

    #[test]
    fn test_invalid_dimension_is_ignored() {
        let mut engine = running_engine(glider());
        run_ticks(&mut engine, 3);

        assert_eq!(engine.set_dimensions(0, 5), DimensionChange::Rejected);
        assert_eq!(engine.set_dimensions(5, -1), DimensionChange::Rejected);
        assert_eq!(engine.adjust_rows(-8), DimensionChange::Rejected);
        assert_eq!(engine.apply_preset(0), DimensionChange::Rejected);

        assert_eq!(engine.dimensions(), (8, 8));
        assert_eq!(engine.history().len(), 3);
        assert_eq!(engine.generation(), 3);
        assert_eq!(engine.run_state(), RunState::Running);
    }

    #[test]
    fn test_adjust_and_preset() {
        let mut engine = LifeEngine::new(3, 3, NullObserver).unwrap();
        assert_eq!(engine.adjust_rows(2), DimensionChange::Applied { rows: 5, columns: 3 });
        assert_eq!(engine.adjust_columns(-1), DimensionChange::Applied { rows: 5, columns: 2 });
        assert_eq!(engine.apply_preset(7), DimensionChange::Applied { rows: 7, columns: 7 });
        assert_eq!(engine.apply_preset(7), DimensionChange::Unchanged);
    }

    #[test]
    fn test_tick_interval_validation() {
        let mut engine = LifeEngine::new(3, 3, NullObserver).unwrap();
        assert_eq!(engine.tick_interval(), DEFAULT_TICK_INTERVAL);

        engine.set_tick_interval(0.25).unwrap();
        assert_eq!(engine.tick_interval(), Duration::from_millis(250));

        assert!(engine.set_tick_interval(0.0).is_err());
        assert!(engine.set_tick_interval(-1.0).is_err());
        assert!(engine.set_tick_interval(f64::NAN).is_err());
        assert!(engine.set_tick_interval(f64::INFINITY).is_err());
        assert_eq!(engine.tick_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_run_state_notifications() {
        let mut engine = running_engine(glider());
        engine.pause();
        engine.resume();
        engine.reset();

        assert_eq!(
            engine.observer().run_states(),
            vec![RunState::Running, RunState::Paused, RunState::Running, RunState::Idle]
        );
    }
}
