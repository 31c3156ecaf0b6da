//! Diverging colormaps (two-hue progression with center).
//!
//! Useful for anomaly plots, e.g. the difference between two snapshots.

use colorgrad::Gradient;

use super::colormap::Colormap;

/// RdBu colormap - red through white to blue
pub struct RdBu;

impl Colormap for RdBu {
    fn gradient(&self) -> Gradient {
        colorgrad::rd_bu()
    }

    fn name(&self) -> &str {
        "rdbu"
    }
}

/// RdYlBu colormap - red through yellow to blue
pub struct RdYlBu;

impl Colormap for RdYlBu {
    fn gradient(&self) -> Gradient {
        colorgrad::rd_yl_bu()
    }

    fn name(&self) -> &str {
        "rdylbu"
    }
}

/// Spectral colormap
pub struct Spectral;

impl Colormap for Spectral {
    fn gradient(&self) -> Gradient {
        colorgrad::spectral()
    }

    fn name(&self) -> &str {
        "spectral"
    }
}
