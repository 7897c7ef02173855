use thiserror::Error;
use tracing::debug;

use crate::grid::Grid;
use crate::grid::PlacementError;
use crate::rle;
use crate::rle::DecodeError;
use crate::rle::Pattern;
use crate::rule_set::RuleError;
use crate::rule_set::RuleSet;

/// The simulation core: one grid, one rule set, one generation counter.
///
/// The world owns its grid exclusively and knows nothing about timing or I/O. A driver calls
/// [`World::advance`] on whatever cadence it likes, and serializes access itself if calls can
/// arrive from more than one thread.
pub struct World {
    grid: Grid,
    set: RuleSet,
    generation: u64,
}

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("Invalid rule: {0}")]
    Rule(#[from] RuleError),

    #[error("Invalid pattern: {0}")]
    Decode(#[from] DecodeError),

    #[error("Pattern does not fit the grid: {0}")]
    Placement(#[from] PlacementError),
}

impl World {
    /// Create a world from startup parameters.
    ///
    /// `rule` defaults to Conway's `B3/S23` when absent. `pattern` is decoded and centered when
    /// given, otherwise the grid is seeded with random noise. Nothing is committed unless every
    /// argument is accepted.
    pub fn new(
        rows: usize,
        columns: usize,
        rule: Option<&str>,
        pattern: Option<&str>,
    ) -> Result<Self, WorldError> {
        let set = match rule {
            Some(rule) => rule.parse()?,
            None => RuleSet::default(),
        };

        let world = match pattern {
            Some(text) => {
                let pattern = rle::decode(text)?;

                Self::from_pattern(&pattern, rows, columns, set)?
            }
            None => Self::random(rows, columns, set),
        };

        Ok(world)
    }

    /// A world with `pattern` centered on an otherwise dead grid.
    pub fn from_pattern(
        pattern: &Pattern,
        rows: usize,
        columns: usize,
        set: RuleSet,
    ) -> Result<Self, PlacementError> {
        let grid = Grid::from_pattern(pattern, rows, columns)?;

        Ok(Self {
            grid,
            set,
            generation: 0,
        })
    }

    /// A world seeded with random noise.
    pub fn random(rows: usize, columns: usize, set: RuleSet) -> Self {
        Self {
            grid: Grid::random(rows, columns),
            set,
            generation: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    pub fn rule_set(&self) -> RuleSet {
        self.set
    }

    /// Generations advanced since construction or the last reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Advance the world by one generation.
    ///
    /// The grid is replaced wholesale; cells of the new generation are never visible to the
    /// computation of their neighbors.
    pub fn advance(&mut self) {
        self.grid = self.grid.step(&self.set);
        self.generation += 1;
    }

    /// Replace the grid, centering `pattern` or reseeding with noise, and zero the generation
    /// counter.
    ///
    /// When placement fails, the previous grid and counter are left exactly as they were.
    pub fn reset(&mut self, pattern: Option<&Pattern>) -> Result<(), PlacementError> {
        let grid = match pattern {
            Some(pattern) => Grid::from_pattern(pattern, self.grid.rows(), self.grid.columns())?,
            None => Grid::random(self.grid.rows(), self.grid.columns()),
        };

        debug!("resetting world after {} generations", self.generation);

        self.grid = grid;
        self.generation = 0;

        Ok(())
    }

    pub fn get(&self, row: usize, column: usize) -> bool {
        self.grid.get(row, column)
    }

    pub fn set(&mut self, row: usize, column: usize, alive: bool) {
        self.grid.set(row, column, alive)
    }

    pub fn toggle(&mut self, row: usize, column: usize) {
        self.grid.toggle(row, column)
    }

    /// Serialize the current grid; see [`Grid::serialize`].
    pub fn serialize(&self) -> String {
        self.grid.serialize()
    }
}
