//! Colormap implementations for raster rendering.
//!
//! Matplotlib-style colormaps backed by `colorgrad` gradients.

pub mod colormap;
pub mod diverging;
pub mod sequential;

pub use colormap::{get_colormap, ColorScale, Colormap, COLORMAP_NAMES};

// Re-export commonly used colormaps
pub use diverging::{RdBu, RdYlBu, Spectral};
pub use sequential::{Cividis, Inferno, Magma, Plasma, Turbo, Viridis};
