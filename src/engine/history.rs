//! Append-only record of displayed generations

use crate::game_of_life::GridState;

/// Every grid that has been displayed, indexed by generation
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<GridState>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the grid displayed at the next generation; returns its index
    pub fn record(&mut self, grid: GridState) -> usize {
        if let Some(first) = self.snapshots.first() {
            assert_eq!(
                first.dimensions(),
                grid.dimensions(),
                "history snapshot dimensions must not change within a run"
            );
        }
        self.snapshots.push(grid);
        self.snapshots.len() - 1
    }

    pub fn get(&self, generation: usize) -> Option<&GridState> {
        self.snapshots.get(generation)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridState> {
        self.snapshots.iter()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
