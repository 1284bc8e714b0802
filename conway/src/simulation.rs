// simulation.rs - Session state: grid, boundary, interval and generation count

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::error::LifeError;
use crate::grid::{Coordinate, Grid};
use crate::neighbors::BoundaryCondition;
use crate::step::next_generation;

/// What a renderer receives after every generation or edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub generation: u64,
    pub rows: usize,
    pub cols: usize,
    /// Row-major.
    pub live_cells: Vec<Coordinate>,
}

impl Snapshot {
    pub fn population(&self) -> usize {
        self.live_cells.len()
    }
}

/// Consumer of published snapshots, called in generation order.
pub trait GenerationSink {
    fn publish(&mut self, snapshot: &Snapshot);
}

impl GenerationSink for Vec<Snapshot> {
    fn publish(&mut self, snapshot: &Snapshot) {
        self.push(snapshot.clone());
    }
}

impl<S: GenerationSink + ?Sized> GenerationSink for &mut S {
    fn publish(&mut self, snapshot: &Snapshot) {
        (**self).publish(snapshot);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Population {
    pub live: usize,
    pub dead: usize,
    /// Live share in percent, `0.0` for an empty board.
    pub percent: f32,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    boundary: BoundaryCondition,
    config: SimulationConfig,
    generation: u64,
}

impl Simulation {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::from_grid(Grid::new(rows, cols))
    }

    pub fn from_grid(grid: Grid) -> Self {
        Self {
            grid,
            boundary: BoundaryCondition::default(),
            config: SimulationConfig::default(),
            generation: 0,
        }
    }

    pub fn with_boundary(mut self, boundary: BoundaryCondition) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn boundary(&self) -> BoundaryCondition {
        self.boundary
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance one generation. The new grid is built from the current one and swapped in.
    pub fn step(&mut self) {
        self.grid = next_generation(&self.grid, self.boundary);
        self.generation += 1;
        debug!(generation = self.generation, live = self.grid.population(), "stepped");
    }

    /// Flip a cell; off-board coordinates are ignored.
    pub fn toggle(&mut self, x: usize, y: usize) {
        if !self.grid.toggle(x, y) {
            debug!(x, y, rows = self.grid.rows(), cols = self.grid.cols(), "ignored out-of-bounds toggle");
        }
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.generation = 0;
        info!("cleared grid");
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, probability: f64) {
        self.grid.randomize(rng, probability);
        self.generation = 0;
        info!(probability, live = self.grid.population(), "randomized grid");
    }

    pub fn set_boundary(&mut self, boundary: BoundaryCondition) {
        if self.boundary != boundary {
            info!(%boundary, "boundary condition changed");
        }
        self.boundary = boundary;
    }

    /// Apply an interval typed by the user. On error the previous interval stays.
    pub fn set_step_interval_ms(&mut self, raw: &str) -> Result<(), LifeError> {
        match self.config.set_step_interval_ms(raw) {
            Ok(()) => {
                info!(interval_ms = self.config.step_interval_ms(), "step interval changed");
                Ok(())
            }
            Err(err) => {
                warn!(%err, kept_ms = self.config.step_interval_ms(), "rejected step interval");
                Err(err)
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            generation: self.generation,
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            live_cells: self.grid.live_cells(),
        }
    }

    pub fn population(&self) -> Population {
        let total = self.grid.cell_count();
        let live = self.grid.population();
        let percent = if total == 0 { 0.0 } else { live as f32 / total as f32 * 100.0 };
        Population { live, dead: total - live, percent }
    }
}
