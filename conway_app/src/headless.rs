// headless.rs - Run the simulation without a window, printing frames as text

use std::fmt::Write as _;
use std::io::{self, Write};

use anyhow::{Context, Result};
use conway::{Command, GenerationSink, Simulation, Snapshot, drive};
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};

use crate::settings::Settings;

/// `#` for live cells, `.` for dead ones, preceded by a header line.
pub fn render_text(snapshot: &Snapshot) -> String {
    let mut out = String::with_capacity((snapshot.cols + 1) * snapshot.rows + 32);
    let _ = writeln!(out, "generation {} (live {})", snapshot.generation, snapshot.population());

    let mut live = snapshot.live_cells.iter().peekable();
    for y in 0..snapshot.rows {
        for x in 0..snapshot.cols {
            // live_cells is row-major, so one forward pass is enough
            let alive = live.next_if(|c| c.x == x && c.y == y).is_some();
            out.push(if alive { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}

struct TextSink<W: Write> {
    out: W,
    limit: u64,
    tx: UnboundedSender<Command>,
    error: Option<io::Error>,
}

impl<W: Write> TextSink<W> {
    fn finish(&self) {
        let _ = self.tx.send(Command::Stop);
        let _ = self.tx.send(Command::Shutdown);
    }
}

impl<W: Write> GenerationSink for TextSink<W> {
    fn publish(&mut self, snapshot: &Snapshot) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{}", render_text(snapshot)) {
            self.error = Some(err);
            self.finish();
            return;
        }
        if snapshot.generation >= self.limit {
            self.finish();
        }
    }
}

/// Randomize, then run `generations` steps on a single-threaded runtime,
/// writing every frame to `out`. Returns the final generation.
pub fn run_with<W: Write>(settings: &Settings, generations: u64, out: W) -> Result<u64> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("build tokio runtime")?;

    let (rows, cols) = settings.geometry().dimensions()?;
    let sim = Simulation::new(rows, cols)
        .with_boundary(settings.boundary)
        .with_config(settings.simulation_config()?);

    let (tx, rx) = unbounded_channel();
    tx.send(Command::Randomize { seed: settings.seed }).context("queue randomize")?;
    if generations > 0 {
        tx.send(Command::Start).context("queue start")?;
    }

    let mut sink = TextSink { out, limit: generations, tx, error: None };
    let sim = runtime.block_on(drive(sim, rx, &mut sink));

    if let Some(err) = sink.error.take() {
        return Err(err).context("write frame");
    }
    sink.out.flush().context("flush output")?;
    Ok(sim.generation())
}

pub fn run(settings: &Settings, generations: u64) -> Result<()> {
    let stdout = io::stdout();
    let last = run_with(settings, generations, stdout.lock())?;
    tracing::info!(generation = last, "headless run complete");
    Ok(())
}
