// run_loop.rs - Start/stop scheduling of generation steps
//
// The loop owns a single pending deadline instead of a live timer. Whoever
// hosts it (a UI frame loop, the async driver) polls it with the current
// time; a step fires once the deadline has passed.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::simulation::{GenerationSink, Simulation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

#[derive(Debug, Default)]
pub struct RunLoop {
    state: RunState,
    pending: Option<Instant>,
}

impl RunLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// When the next step is due. `Some` only while running.
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.pending
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.pending.map(|deadline| deadline.saturating_duration_since(now))
    }

    /// `Idle -> Running`: step immediately, then schedule the next tick.
    /// No-op while already running. Returns whether the state changed.
    pub fn start<S>(&mut self, now: Instant, sim: &mut Simulation, sink: &mut S) -> bool
    where
        S: GenerationSink + ?Sized,
    {
        if self.is_running() {
            return false;
        }
        self.state = RunState::Running;
        info!(interval_ms = sim.config().step_interval_ms(), "simulation started");
        self.fire(now, sim, sink);
        true
    }

    /// `Running -> Idle`: drop the pending tick. No-op while idle.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = RunState::Idle;
        self.pending = None;
        info!("simulation stopped");
        true
    }

    /// Run the pending step if it is due. At most one step per call; the
    /// next deadline is measured from `now`.
    pub fn poll<S>(&mut self, now: Instant, sim: &mut Simulation, sink: &mut S) -> bool
    where
        S: GenerationSink + ?Sized,
    {
        match self.pending {
            Some(deadline) if self.is_running() && now >= deadline => {
                self.fire(now, sim, sink);
                true
            }
            _ => false,
        }
    }

    fn fire<S>(&mut self, now: Instant, sim: &mut Simulation, sink: &mut S)
    where
        S: GenerationSink + ?Sized,
    {
        self.pending = None;
        sim.step();
        sink.publish(&sim.snapshot());

        // Interval is read here, so a change only affects ticks scheduled from now on.
        let interval = sim.config().step_interval();
        self.pending = Some(now + interval);
        debug!(generation = sim.generation(), next_in_ms = interval.as_millis() as u64, "scheduled next step");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::neighbors::BoundaryCondition;
    use crate::simulation::Snapshot;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn blinker() -> Simulation {
        Simulation::from_grid(Grid::with_live_cells(5, 5, &[(1, 2), (2, 2), (3, 2)]))
            .with_boundary(BoundaryCondition::Fixed)
    }

    #[test]
    fn start_then_stop_publishes_exactly_one_generation() {
        let t0 = Instant::now();
        let mut sim = blinker();
        let mut frames: Vec<Snapshot> = Vec::new();
        let mut run = RunLoop::new();

        assert!(run.start(t0, &mut sim, &mut frames));
        assert!(run.stop());
        assert!(!run.poll(t0 + ms(10_000), &mut sim, &mut frames));

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].generation, 1);
        assert_eq!(run.pending_deadline(), None);
        assert_eq!(run.state(), RunState::Idle);
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let t0 = Instant::now();
        let mut sim = blinker();
        let mut frames: Vec<Snapshot> = Vec::new();
        let mut run = RunLoop::new();

        assert!(!run.stop());
        assert!(run.start(t0, &mut sim, &mut frames));
        let deadline = run.pending_deadline();
        assert!(!run.start(t0 + ms(1), &mut sim, &mut frames));
        assert_eq!(run.pending_deadline(), deadline);
        assert_eq!(frames.len(), 1);

        assert!(run.stop());
        assert!(!run.stop());
    }

    #[test]
    fn steps_fire_only_when_due() {
        let t0 = Instant::now();
        let mut sim = blinker();
        let mut frames: Vec<Snapshot> = Vec::new();
        let mut run = RunLoop::new();

        run.start(t0, &mut sim, &mut frames);
        assert_eq!(run.time_until_next(t0), Some(ms(100)));
        assert!(!run.poll(t0 + ms(99), &mut sim, &mut frames));
        assert!(run.poll(t0 + ms(100), &mut sim, &mut frames));
        assert!(!run.poll(t0 + ms(150), &mut sim, &mut frames));

        // A late poll runs a single step, never a burst.
        assert!(run.poll(t0 + ms(1_000), &mut sim, &mut frames));
        assert!(!run.poll(t0 + ms(1_000), &mut sim, &mut frames));

        let generations: Vec<u64> = frames.iter().map(|f| f.generation).collect();
        assert_eq!(generations, vec![1, 2, 3]);
    }

    #[test]
    fn interval_change_applies_to_the_next_scheduled_tick() {
        let t0 = Instant::now();
        let mut sim = blinker();
        let mut frames: Vec<Snapshot> = Vec::new();
        let mut run = RunLoop::new();

        run.start(t0, &mut sim, &mut frames);
        sim.set_step_interval_ms("500").unwrap();
        // Already scheduled tick keeps its 100 ms deadline.
        assert_eq!(run.pending_deadline(), Some(t0 + ms(100)));
        assert!(run.poll(t0 + ms(100), &mut sim, &mut frames));
        assert_eq!(run.pending_deadline(), Some(t0 + ms(600)));
        assert!(!run.poll(t0 + ms(300), &mut sim, &mut frames));
        assert!(run.poll(t0 + ms(600), &mut sim, &mut frames));
        assert_eq!(frames.len(), 3);
    }

    #[test]
    fn edits_between_steps_are_seen_by_the_next_step() {
        let t0 = Instant::now();
        let mut sim = blinker();
        let mut frames: Vec<Snapshot> = Vec::new();
        let mut run = RunLoop::new();

        run.start(t0, &mut sim, &mut frames);
        sim.clear();
        // Block in the top-left corner.
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            sim.toggle(x, y);
        }
        run.poll(t0 + ms(100), &mut sim, &mut frames);

        let last = frames.last().unwrap();
        assert_eq!(last.population(), 4);
        assert_eq!(last.generation, 1);
    }

    #[test]
    fn generations_are_published_in_order() {
        let t0 = Instant::now();
        let mut sim = blinker();
        let mut frames: Vec<Snapshot> = Vec::new();
        let mut run = RunLoop::new();

        run.start(t0, &mut sim, &mut frames);
        for i in 1..=4 {
            run.poll(t0 + ms(100 * i), &mut sim, &mut frames);
        }
        let generations: Vec<u64> = frames.iter().map(|f| f.generation).collect();
        assert_eq!(generations, vec![1, 2, 3, 4, 5]);
        // Period-2 oscillator: odd generations vertical, even horizontal.
        assert_eq!(frames[0].live_cells, frames[2].live_cells);
        assert_eq!(frames[1].live_cells, frames[3].live_cells);
        assert_ne!(frames[0].live_cells, frames[1].live_cells);
    }

    #[test]
    fn restart_after_stop_steps_immediately() {
        let t0 = Instant::now();
        let mut sim = blinker();
        let mut frames: Vec<Snapshot> = Vec::new();
        let mut run = RunLoop::new();

        run.start(t0, &mut sim, &mut frames);
        run.stop();
        assert!(run.start(t0 + ms(5), &mut sim, &mut frames));
        assert_eq!(frames.len(), 2);
        assert_eq!(run.pending_deadline(), Some(t0 + ms(105)));
    }
}
