//! Configuration management for lucy-postproc.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::colormaps::get_colormap;
use crate::error::{LucyError, Result};
use crate::geo::Projection;

/// Command-line arguments for lucy
#[derive(Parser, Debug)]
#[command(name = "lucy")]
#[command(author, version, about = "Plot LUCY anthropogenic heat flux model outputs", long_about = None)]
pub struct Args {
    /// Path to JSON configuration file
    #[arg(short, long, env = "LUCY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LUCY_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(flatten)]
    pub style: StyleArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Plot style overrides shared by all subcommands
#[derive(clap::Args, Debug, Default, Clone)]
pub struct StyleArgs {
    /// Figure width in pixels
    #[arg(long, global = true)]
    pub width: Option<u32>,

    /// Figure height in pixels
    #[arg(long, global = true)]
    pub height: Option<u32>,

    /// Lower bound of the color scale [W/m2]
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub vmin: Option<f64>,

    /// Upper bound of the color scale [W/m2]
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub vmax: Option<f64>,

    /// Colormap name (viridis, plasma, inferno, magma, cividis, turbo, rdbu, rdylbu, spectral)
    #[arg(long, global = true)]
    pub colormap: Option<String>,

    /// Map projection (mercator, plate_carree)
    #[arg(long, global = true)]
    pub projection: Option<Projection>,

    /// GeoJSON file with coastlines or borders to draw over the map (repeatable)
    #[arg(long = "overlay", global = true)]
    pub overlays: Vec<PathBuf>,
}

/// lucy subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Plot a spatial (ESRI ASCII raster) output file
    Spatial {
        /// LUCY raster file, e.g. AHF_Berlin_0_6_1_48_0.8.asc
        file: PathBuf,

        /// Output image (format from extension); defaults to <file stem>.png
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Plot one column of a statistics file as a time series
    Timeseries {
        /// LUCY statistics file, e.g. Statistics_AHF_2005_1_Berlin_48_0.8.txt
        file: PathBuf,

        /// Column to plot
        #[arg(long, default_value = "AHFMean")]
        column: String,

        /// Output image; defaults to <file stem>_<column>.png
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Plot component means, min/max envelopes and standard deviation bands
    Statistics {
        /// LUCY statistics file
        file: PathBuf,

        /// Simulation start date (YYYY-MM-DD), steps are hourly
        #[arg(long, default_value = "2005-01-01")]
        start_date: String,

        /// Output file prefix; defaults to the file stem
        #[arg(short, long)]
        prefix: Option<String>,
    },

    /// Plot a numbered series of raster files as animation frames
    Batch {
        /// Directory holding the raster files
        dir: PathBuf,

        /// File name template, `{index}` is replaced by the frame index
        #[arg(long, default_value = "AHF_Germany_{index}_6_1_48_0.8.asc")]
        template: String,

        /// First index
        #[arg(long, default_value = "0")]
        start: usize,

        /// Number of frames
        #[arg(long, default_value = "24")]
        count: usize,

        /// Output prefix, frames are written as <prefix>_<index>.png
        #[arg(long, default_value = "frame")]
        prefix: String,
    },

    /// Describe a raster or statistics file
    Inspect {
        /// LUCY raster (.asc) or statistics file
        file: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Rendering style passed explicitly to every plot function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotStyle {
    /// Figure width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Figure height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Fixed lower bound of the raster color scale
    #[serde(default = "default_vmin")]
    pub vmin: f64,

    /// Fixed upper bound of the raster color scale
    #[serde(default = "default_vmax")]
    pub vmax: f64,

    #[serde(default = "default_colormap")]
    pub colormap: String,

    #[serde(default)]
    pub projection: Projection,

    /// Spacing of parallels and meridians in degrees
    #[serde(default = "default_grid_spacing")]
    pub grid_spacing: f64,

    #[serde(default = "default_title_font_size")]
    pub title_font_size: u32,

    /// GeoJSON overlays drawn over the map
    #[serde(default)]
    pub overlays: Vec<PathBuf>,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Plot style
    #[serde(default)]
    pub style: PlotStyle,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, Command)> {
        Self::from_args(Args::parse())
    }

    /// Build the configuration from already parsed arguments
    pub fn from_args(args: Args) -> Result<(Self, Command)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        config.apply_style_args(&args.style);
        if let Some(level) = args.log_level {
            config.log_level = level;
        }

        Ok((config, args.command))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LucyError::MissingInput {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.style = other.style;
        self.log_level = other.log_level;
    }

    fn apply_style_args(&mut self, args: &StyleArgs) {
        let style = &mut self.style;
        if let Some(width) = args.width {
            style.width = width;
        }
        if let Some(height) = args.height {
            style.height = height;
        }
        if let Some(vmin) = args.vmin {
            style.vmin = vmin;
        }
        if let Some(vmax) = args.vmax {
            style.vmax = vmax;
        }
        if let Some(colormap) = &args.colormap {
            style.colormap = colormap.clone();
        }
        if let Some(projection) = args.projection {
            style.projection = projection;
        }
        if !args.overlays.is_empty() {
            style.overlays = args.overlays.clone();
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.style.validate()?;

        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(LucyError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        Ok(())
    }
}

/// Smallest accepted figure side in pixels
pub const MIN_FIGURE_SIDE: u32 = 100;
/// Largest accepted figure side in pixels
pub const MAX_FIGURE_SIDE: u32 = 10_000;

impl PlotStyle {
    /// Validate the style values
    pub fn validate(&self) -> Result<()> {
        if self.width < MIN_FIGURE_SIDE || self.height < MIN_FIGURE_SIDE {
            return Err(LucyError::Config {
                message: format!(
                    "Figure size {}x{} is too small, both sides must be at least {} pixels",
                    self.width, self.height, MIN_FIGURE_SIDE
                ),
            });
        }
        if self.width > MAX_FIGURE_SIDE || self.height > MAX_FIGURE_SIDE {
            return Err(LucyError::Config {
                message: format!(
                    "Figure size {}x{} is too large, both sides must be at most {} pixels",
                    self.width, self.height, MAX_FIGURE_SIDE
                ),
            });
        }

        if !(self.vmin < self.vmax) {
            return Err(LucyError::Config {
                message: format!(
                    "vmin ({}) must be smaller than vmax ({})",
                    self.vmin, self.vmax
                ),
            });
        }

        if !(self.grid_spacing > 0.0) {
            return Err(LucyError::Config {
                message: format!("Grid spacing must be positive, got {}", self.grid_spacing),
            });
        }

        get_colormap(&self.colormap).map_err(|e| LucyError::Config {
            message: e.to_string(),
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: PlotStyle::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            vmin: default_vmin(),
            vmax: default_vmax(),
            colormap: default_colormap(),
            projection: Projection::default(),
            grid_spacing: default_grid_spacing(),
            title_font_size: default_title_font_size(),
            overlays: Vec::new(),
        }
    }
}

// Default value functions for serde
fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_vmin() -> f64 {
    0.0
}

fn default_vmax() -> f64 {
    30.0
}

fn default_colormap() -> String {
    "viridis".to_string()
}

fn default_grid_spacing() -> f64 {
    1.0
}

fn default_title_font_size() -> u32 {
    18
}

fn default_log_level() -> String {
    "info".to_string()
}
