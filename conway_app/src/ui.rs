// ui.rs - egui front end: control panel, board rendering and click-to-toggle

use std::time::Instant;

use anyhow::Result;
use conway::{
    BoundaryCondition, CanvasGeometry, GenerationSink, RunLoop, Simulation, Snapshot,
};
use eframe::egui;
use egui::{Color32, Rect, Sense, Stroke, Vec2, pos2, vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::settings::Settings;

/// Latest published snapshot; the board draws only from this.
struct Board {
    snapshot: Snapshot,
}

impl GenerationSink for Board {
    fn publish(&mut self, snapshot: &Snapshot) {
        self.snapshot = snapshot.clone();
    }
}

pub struct LifeApp {
    geometry: CanvasGeometry,
    sim: Simulation,
    run: RunLoop,
    board: Board,
    rng: StdRng,
    fill_probability: f64,
    interval_text: String,
    interval_error: Option<String>,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub grid_color: Color32,
}

impl LifeApp {
    pub fn new(settings: &Settings) -> Result<Self> {
        let geometry = settings.geometry();
        let (rows, cols) = geometry.dimensions()?;
        let config = settings.simulation_config()?;
        let sim = Simulation::new(rows, cols)
            .with_boundary(settings.boundary)
            .with_config(config);
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            geometry,
            board: Board { snapshot: sim.snapshot() },
            sim,
            run: RunLoop::new(),
            rng,
            fill_probability: settings.fill_probability,
            interval_text: config.step_interval_ms().to_string(),
            interval_error: None,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            grid_color: Color32::from_gray(60),
        })
    }

    /// Push the current state to the board after an edit.
    fn refresh(&mut self) {
        self.board.publish(&self.sim.snapshot());
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Update every");
            let field = ui.add(egui::TextEdit::singleline(&mut self.interval_text).desired_width(60.0));
            ui.label("msec");
            if field.changed() {
                self.interval_error = self
                    .sim
                    .set_step_interval_ms(&self.interval_text)
                    .err()
                    .map(|err| err.to_string());
            }

            let button_text = if self.run.is_running() { "⏹ Stop" } else { "▶ Run" };
            if ui.button(button_text).clicked() {
                if self.run.is_running() {
                    self.run.stop();
                } else {
                    self.run.start(Instant::now(), &mut self.sim, &mut self.board);
                }
            }

            if ui.button("🎲 Random").clicked() {
                self.sim.randomize(&mut self.rng, self.fill_probability);
                self.refresh();
            }

            if ui.button("Clear").clicked() {
                self.sim.clear();
                self.refresh();
            }

            ui.separator();

            let current = self.sim.boundary();
            egui::ComboBox::from_id_source("boundary_selector")
                .selected_text(current.label())
                .show_ui(ui, |ui| {
                    for boundary in BoundaryCondition::ALL {
                        if ui.selectable_label(current == boundary, boundary.label()).clicked() {
                            self.sim.set_boundary(boundary);
                        }
                    }
                });

            ui.separator();
            ui.label(format!("Generation: {}", self.board.snapshot.generation));
        });

        if let Some(err) = &self.interval_error {
            ui.colored_label(Color32::LIGHT_RED, format!("{err}; keeping {} ms", self.sim.config().step_interval_ms()));
        }

        ui.horizontal(|ui| {
            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
        });
    }

    fn board_view(&mut self, ui: &mut egui::Ui) {
        let (width, height) = self.geometry.board_size();
        let (response, painter) = ui.allocate_painter(Vec2::new(width, height), Sense::click());
        let origin = response.rect.min;

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let offset = pos - origin;
                match self.geometry.cell_at(offset.x, offset.y) {
                    Ok(cell) => {
                        self.sim.toggle(cell.x, cell.y);
                        self.refresh();
                    }
                    Err(err) => debug!(%err, "click outside the board"),
                }
            }
        }

        painter.rect_filled(response.rect, 0.0, self.dead_color);

        // Cell lattice
        let size = self.geometry.cell_size_px as f32;
        let stroke = Stroke::new(0.5, self.grid_color);
        for col in 0..=self.board.snapshot.cols {
            let x = origin.x + col as f32 * size;
            painter.line_segment([pos2(x, origin.y), pos2(x, origin.y + height)], stroke);
        }
        for row in 0..=self.board.snapshot.rows {
            let y = origin.y + row as f32 * size;
            painter.line_segment([pos2(origin.x, y), pos2(origin.x + width, y)], stroke);
        }

        for &cell in &self.board.snapshot.live_cells {
            let (left, top, side) = self.geometry.cell_rect(cell);
            let rect = Rect::from_min_size(origin + vec2(left, top), Vec2::splat(side));
            painter.rect_filled(rect, 0.0, self.live_color);
        }
    }

    fn statistics(&self, ui: &mut egui::Ui) {
        let population = self.sim.population();
        ui.horizontal(|ui| {
            ui.label(format!("Live cells: {}", population.live));
            ui.label(format!("Dead cells: {}", population.dead));
            ui.label(format!("Population: {:.1}%", population.percent));
        });
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.run.poll(Instant::now(), &mut self.sim, &mut self.board);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");
            self.controls(ui);
            ui.separator();
            ui.label("Click cells to toggle them alive/dead.");
            self.board_view(ui);
            ui.separator();
            self.statistics(ui);
        });

        // Wake up again when the next step is due.
        if let Some(wait) = self.run.time_until_next(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}
