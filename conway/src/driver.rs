// driver.rs - Cooperative async session: user commands and timer ticks on one task

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info};

use crate::grid::DEFAULT_FILL_PROBABILITY;
use crate::neighbors::BoundaryCondition;
use crate::run_loop::RunLoop;
use crate::simulation::{GenerationSink, Simulation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Toggle { x: usize, y: usize },
    Clear,
    /// `None` draws the seed from the OS.
    Randomize { seed: Option<u64> },
    /// Raw user text; invalid values are rejected and logged.
    SetInterval(String),
    SetBoundary(BoundaryCondition),
    Shutdown,
}

/// Drive `sim` until the command channel closes or `Shutdown` arrives.
///
/// Commands and steps run on this task only, so an edit always lands
/// between two steps. Pending commands are handled before a due tick,
/// which means a `Stop` queued ahead of the deadline cancels it.
pub async fn drive<S>(mut sim: Simulation, mut commands: UnboundedReceiver<Command>, sink: &mut S) -> Simulation
where
    S: GenerationSink + ?Sized,
{
    let mut run = RunLoop::new();

    loop {
        let deadline = run.pending_deadline().map(Instant::from_std);

        tokio::select! {
            biased;

            cmd = commands.recv() => {
                let Some(cmd) = cmd else {
                    debug!("command channel closed");
                    break;
                };
                if !apply(cmd, &mut run, &mut sim, sink) {
                    break;
                }
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                run.poll(Instant::now().into_std(), &mut sim, sink);
            }
        }
    }

    run.stop();
    info!(generation = sim.generation(), "driver finished");
    sim
}

/// Returns `false` on `Shutdown`.
fn apply<S>(cmd: Command, run: &mut RunLoop, sim: &mut Simulation, sink: &mut S) -> bool
where
    S: GenerationSink + ?Sized,
{
    debug!(?cmd, "command");
    match cmd {
        Command::Start => {
            run.start(Instant::now().into_std(), sim, sink);
        }
        Command::Stop => {
            run.stop();
        }
        Command::Toggle { x, y } => {
            sim.toggle(x, y);
            sink.publish(&sim.snapshot());
        }
        Command::Clear => {
            sim.clear();
            sink.publish(&sim.snapshot());
        }
        Command::Randomize { seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            sim.randomize(&mut rng, DEFAULT_FILL_PROBABILITY);
            sink.publish(&sim.snapshot());
        }
        Command::SetInterval(raw) => {
            // Rejection is already logged; the previous interval stays in force.
            let _ = sim.set_step_interval_ms(&raw);
        }
        Command::SetBoundary(boundary) => sim.set_boundary(boundary),
        Command::Shutdown => return false,
    }
    true
}
