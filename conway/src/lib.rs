// lib.rs - Conway's Game of Life core: grid, boundary-aware stepping and run loop

pub mod config;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod neighbors;
pub mod run_loop;
pub mod simulation;
pub mod step;

pub use config::SimulationConfig;
pub use driver::{Command, drive};
pub use error::LifeError;
pub use geometry::CanvasGeometry;
pub use grid::{Coordinate, DEFAULT_FILL_PROBABILITY, Grid};
pub use neighbors::{BoundaryCondition, count_live_neighbors};
pub use run_loop::{RunLoop, RunState};
pub use simulation::{GenerationSink, Population, Simulation, Snapshot};
pub use step::next_generation;
