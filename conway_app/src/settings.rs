// settings.rs - Start-up settings: TOML file with command-line overrides

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;
use conway::geometry::{DEFAULT_CELL_SIZE_PX, DEFAULT_HEIGHT_PX, DEFAULT_WIDTH_PX};
use conway::{BoundaryCondition, CanvasGeometry, DEFAULT_FILL_PROBABILITY, SimulationConfig};
use serde::{Deserialize, Serialize};

/// Every field may be omitted from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width_px: u32,
    pub height_px: u32,
    pub cell_size_px: u32,
    /// Delay between generations while running.
    pub interval_ms: u64,
    pub boundary: BoundaryCondition,
    /// Seed for Random; unset means a fresh seed per session.
    pub seed: Option<u64>,
    /// Chance of each cell being alive after Random.
    pub fill_probability: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width_px: DEFAULT_WIDTH_PX,
            height_px: DEFAULT_HEIGHT_PX,
            cell_size_px: DEFAULT_CELL_SIZE_PX,
            interval_ms: conway::config::DEFAULT_STEP_INTERVAL_MS,
            boundary: BoundaryCondition::default(),
            seed: None,
            fill_probability: DEFAULT_FILL_PROBABILITY,
        }
    }
}

/// Command-line flags that take precedence over the settings file.
#[derive(Debug, Default, Args)]
pub struct Overrides {
    /// Canvas width in pixels.
    #[arg(long = "width")]
    pub width_px: Option<u32>,
    /// Canvas height in pixels.
    #[arg(long = "height")]
    pub height_px: Option<u32>,
    /// Side of one cell in pixels.
    #[arg(long = "cell-size")]
    pub cell_size_px: Option<u32>,
    /// Milliseconds between generations.
    #[arg(long)]
    pub interval_ms: Option<u64>,
    /// Edge policy: fixed or periodic.
    #[arg(long)]
    pub boundary: Option<BoundaryCondition>,
    /// Seed for the random fill.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Settings {
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(v) = overrides.width_px {
            self.width_px = v;
        }
        if let Some(v) = overrides.height_px {
            self.height_px = v;
        }
        if let Some(v) = overrides.cell_size_px {
            self.cell_size_px = v;
        }
        if let Some(v) = overrides.interval_ms {
            self.interval_ms = v;
        }
        if let Some(v) = overrides.boundary {
            self.boundary = v;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.geometry().dimensions()?;
        self.simulation_config()?;
        if !(0.0..=1.0).contains(&self.fill_probability) {
            bail!("fill_probability must be within [0, 1], got {}", self.fill_probability);
        }
        Ok(())
    }

    pub fn geometry(&self) -> CanvasGeometry {
        CanvasGeometry {
            width_px: self.width_px,
            height_px: self.height_px,
            cell_size_px: self.cell_size_px,
        }
    }

    pub fn simulation_config(&self) -> Result<SimulationConfig> {
        SimulationConfig::new(self.interval_ms).context("interval_ms")
    }
}

/// Load settings from a TOML file. No path, or a missing file, gives the defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    if !path.exists() {
        tracing::info!(path = %path.display(), "settings file not found, using defaults");
        return Ok(Settings::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let settings: Settings =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let settings = load_settings(Some(&temp.path().join("conway.toml"))).expect("load");
        assert_eq!(settings, Settings::default());
        assert_eq!(load_settings(None).expect("load"), Settings::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("conway.toml");
        fs::write(&path, "interval_ms = 250\nboundary = \"fixed\"\nseed = 9\n").expect("write");

        let settings = load_settings(Some(&path)).expect("load");
        assert_eq!(settings.interval_ms, 250);
        assert_eq!(settings.boundary, BoundaryCondition::Fixed);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.width_px, DEFAULT_WIDTH_PX);
        settings.validate().expect("valid");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("conway.toml");
        fs::write(&path, "boundary = \"mobius\"\n").expect("write");

        let err = load_settings(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("parse"));
    }

    #[test]
    fn overrides_win() {
        let mut settings = Settings { seed: Some(1), ..Settings::default() };
        settings.apply(&Overrides {
            cell_size_px: Some(10),
            boundary: Some(BoundaryCondition::Fixed),
            ..Overrides::default()
        });
        assert_eq!(settings.cell_size_px, 10);
        assert_eq!(settings.boundary, BoundaryCondition::Fixed);
        assert_eq!(settings.seed, Some(1));
        assert_eq!(settings.geometry().dimensions().expect("dims"), (60, 80));
    }

    #[test]
    fn validate_rejects_bad_values() {
        for bad in [
            Settings { interval_ms: 0, ..Settings::default() },
            Settings { cell_size_px: 0, ..Settings::default() },
            Settings { width_px: 5, ..Settings::default() },
            Settings { fill_probability: 1.5, ..Settings::default() },
        ] {
            assert!(bad.validate().is_err(), "{bad:?}");
        }
    }
}
