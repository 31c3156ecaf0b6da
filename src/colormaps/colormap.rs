//! Colormap trait and utilities.
//!
//! This module defines the common interface for all colormaps and the fixed
//! value range used to map data onto them.

use colorgrad::Gradient;

use crate::error::{LucyError, Result};

/// Names accepted by [`get_colormap`]
pub const COLORMAP_NAMES: [&str; 9] = [
    "viridis", "plasma", "inferno", "magma", "cividis", "turbo", "rdbu", "rdylbu", "spectral",
];

/// Trait for color mapping implementations
pub trait Colormap {
    /// The underlying gradient over `[0, 1]`
    fn gradient(&self) -> Gradient;

    /// Get the name of this colormap
    fn name(&self) -> &str;

    /// Map a normalized value (0.0 to 1.0) to an RGBA color.
    ///
    /// Builds the gradient on every call; use [`ColorScale`] for bulk mapping.
    fn map_normalized(&self, value: f64) -> [u8; 4] {
        self.gradient().at(value.clamp(0.0, 1.0)).to_rgba8()
    }
}

/// Get a colormap by name
pub fn get_colormap(name: &str) -> Result<Box<dyn Colormap>> {
    use super::{diverging::*, sequential::*};

    match name.to_lowercase().as_str() {
        "viridis" => Ok(Box::new(Viridis)),
        "plasma" => Ok(Box::new(Plasma)),
        "inferno" => Ok(Box::new(Inferno)),
        "magma" => Ok(Box::new(Magma)),
        "cividis" => Ok(Box::new(Cividis)),
        "turbo" => Ok(Box::new(Turbo)),
        "rdbu" => Ok(Box::new(RdBu)),
        "rdylbu" => Ok(Box::new(RdYlBu)),
        "spectral" => Ok(Box::new(Spectral)),
        _ => Err(LucyError::InvalidParameter {
            param: "colormap".to_string(),
            message: format!("Unknown colormap: {}", name),
        }),
    }
}

/// A colormap bound to a fixed `[vmin, vmax]` data range.
///
/// Values outside the range saturate at the end colors.
pub struct ColorScale {
    gradient: Gradient,
    vmin: f64,
    vmax: f64,
}

impl ColorScale {
    pub fn new(colormap: &dyn Colormap, vmin: f64, vmax: f64) -> Self {
        Self {
            gradient: colormap.gradient(),
            vmin,
            vmax,
        }
    }

    pub fn vmin(&self) -> f64 {
        self.vmin
    }

    pub fn vmax(&self) -> f64 {
        self.vmax
    }

    /// Position of `value` within the range, clamped to `[0, 1]`
    pub fn normalize(&self, value: f64) -> f64 {
        if self.vmax > self.vmin {
            ((value - self.vmin) / (self.vmax - self.vmin)).clamp(0.0, 1.0)
        } else {
            0.5
        }
    }

    /// RGBA color for a data value
    pub fn map(&self, value: f64) -> [u8; 4] {
        self.gradient.at(self.normalize(value)).to_rgba8()
    }
}
