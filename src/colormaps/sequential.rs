//! Sequential colormaps (single-hue progression).
//!
//! These colormaps are suitable for data that progresses from low to high,
//! which is the case for heat flux.

use colorgrad::Gradient;

use super::colormap::Colormap;

/// Viridis colormap - perceptually uniform, colorblind-friendly
pub struct Viridis;

impl Colormap for Viridis {
    fn gradient(&self) -> Gradient {
        colorgrad::viridis()
    }

    fn name(&self) -> &str {
        "viridis"
    }
}

/// Plasma colormap
pub struct Plasma;

impl Colormap for Plasma {
    fn gradient(&self) -> Gradient {
        colorgrad::plasma()
    }

    fn name(&self) -> &str {
        "plasma"
    }
}

/// Inferno colormap
pub struct Inferno;

impl Colormap for Inferno {
    fn gradient(&self) -> Gradient {
        colorgrad::inferno()
    }

    fn name(&self) -> &str {
        "inferno"
    }
}

/// Magma colormap
pub struct Magma;

impl Colormap for Magma {
    fn gradient(&self) -> Gradient {
        colorgrad::magma()
    }

    fn name(&self) -> &str {
        "magma"
    }
}

/// Cividis colormap - colorblind-friendly alternative to viridis
pub struct Cividis;

impl Colormap for Cividis {
    fn gradient(&self) -> Gradient {
        colorgrad::cividis()
    }

    fn name(&self) -> &str {
        "cividis"
    }
}

/// Turbo colormap - improved rainbow
pub struct Turbo;

impl Colormap for Turbo {
    fn gradient(&self) -> Gradient {
        colorgrad::turbo()
    }

    fn name(&self) -> &str {
        "turbo"
    }
}
