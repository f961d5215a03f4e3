//! Dashboard configuration, read from TOML.
//!
//! Lookup order: `$PENGUIN_DASH_CONFIG`, then `./penguin-dash.toml`, then
//! built-in defaults. Every field is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chart::ScatterOptions;
use crate::data::model::{Column, Species};
use crate::data::provider::DatasetSource;
use crate::error::ConfigError;

pub const CONFIG_ENV: &str = "PENGUIN_DASH_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "penguin-dash.toml";

/// Slider bounds for the second bin-count control.
pub const SLIDER_BIN_RANGE: (u32, u32) = (1, 100);
/// Upper bound for the numeric bin-count input.
pub const MAX_BIN_COUNT: u32 = 1000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub window: WindowConfig,
    pub dataset: DatasetConfig,
    pub plot: PlotConfig,
    pub controls: ControlDefaults,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Heading at the top of the page
    pub page_heading: String,
    pub width: f32,
    pub height: f32,
    pub min_width: f32,
    pub min_height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "PyShiny Penguins".to_string(),
            page_heading: "PyShiny Penguins Dashboard (Core)".to_string(),
            width: 1200.0,
            height: 800.0,
            min_width: 600.0,
            min_height: 400.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Replaces the bundled table when set (.csv, .json or .parquet)
    pub path: Option<PathBuf>,
}

impl DatasetConfig {
    pub fn source(&self) -> DatasetSource {
        match &self.path {
            Some(path) => DatasetSource::File(path.clone()),
            None => DatasetSource::Bundled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub title: String,
    pub x: Column,
    pub y: Column,
    pub max_marker_size: f32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        let options = ScatterOptions::default();
        Self {
            title: options.title,
            x: options.x,
            y: options.y,
            max_marker_size: options.max_marker_size,
        }
    }
}

impl PlotConfig {
    pub fn scatter_options(&self) -> ScatterOptions {
        ScatterOptions {
            title: self.title.clone(),
            x: self.x,
            y: self.y,
            max_marker_size: self.max_marker_size,
        }
    }
}

/// Initial values of the sidebar controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlDefaults {
    pub selected_attribute: Column,
    pub plotly_bin_count: u32,
    pub seaborn_bin_count: u32,
    pub selected_species: Vec<Species>,
}

impl Default for ControlDefaults {
    fn default() -> Self {
        Self {
            selected_attribute: Column::BillLengthMm,
            plotly_bin_count: 30,
            seaborn_bin_count: 20,
            selected_species: Species::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl DashConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let mut config: DashConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        if config.links.is_empty() {
            config.links = default_links();
        }
        Ok(config)
    }

    /// Locate the config file (env var, then working directory) or fall
    /// back to defaults.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::load(local);
        }
        log::debug!("no config file found, using defaults");
        Ok(Self::with_defaults())
    }

    pub fn with_defaults() -> Self {
        Self {
            links: default_links(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.plot.x.is_numeric() {
            return Err(ConfigError::NonNumericAxis {
                axis: "x",
                column: self.plot.x,
            });
        }
        if !self.plot.y.is_numeric() {
            return Err(ConfigError::NonNumericAxis {
                axis: "y",
                column: self.plot.y,
            });
        }
        if !self.controls.selected_attribute.is_numeric() {
            return Err(ConfigError::NonNumericAttribute(
                self.controls.selected_attribute,
            ));
        }
        check_range("plotly_bin_count", self.controls.plotly_bin_count, 1, MAX_BIN_COUNT)?;
        let (min, max) = SLIDER_BIN_RANGE;
        check_range("seaborn_bin_count", self.controls.seaborn_bin_count, min, max)?;

        let size = self.plot.max_marker_size;
        if !size.is_finite() || size <= 0.0 {
            return Err(ConfigError::MarkerSize(size));
        }
        Ok(())
    }
}

fn check_range(name: &'static str, value: u32, min: u32, max: u32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::BinCountOutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

fn default_links() -> Vec<Link> {
    vec![
        Link {
            label: "GitHub Source".to_string(),
            url: "https://github.com/denisecase/pyshiny-penguins-dashboard-core".to_string(),
        },
        Link {
            label: "GitHub App".to_string(),
            url: "https://denisecase.github.io/pyshiny-penguins-dashboard-core/".to_string(),
        },
        Link {
            label: "PyShiny".to_string(),
            url: "https://shiny.posit.co/py/".to_string(),
        },
    ]
}
