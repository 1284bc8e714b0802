// main.rs - Conway's Game of Life: desktop window or headless terminal run

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use eframe::egui;

mod headless;  // Text frames on stdout
mod logging;
mod settings;  // TOML file + CLI overrides
mod ui;        // egui front end

use settings::{Overrides, Settings, load_settings};
use ui::LifeApp;

#[derive(Parser)]
#[command(name = "conway", version, about = "Conway's Game of Life")]
struct Cli {
    /// TOML settings file; missing file means defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,

    /// Print generations to stdout instead of opening a window.
    #[arg(long)]
    headless: bool,

    /// Number of generations to run in headless mode.
    #[arg(long, default_value_t = 10)]
    generations: u64,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    settings.apply(&cli.overrides);
    settings.validate()?;
    tracing::debug!(?settings, "settings loaded");

    if cli.headless {
        headless::run(&settings, cli.generations)
    } else {
        run_window(&settings)
    }
}

fn run_window(settings: &Settings) -> Result<()> {
    let app = LifeApp::new(settings)?;
    let (width, height) = settings.geometry().board_size();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width.max(640.0) + 40.0, height + 200.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|err| anyhow!("window: {err}"))
}
