//! Geographic utilities: grid coordinates, map projections and graticules.
//!
//! Raster cells are addressed by their lower-left corner. Row 0 of a loaded
//! grid is the southernmost row, so the latitude axis increases with the row
//! index.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{LucyError, Result};
use crate::raster::RasterHeader;

/// Mercator is undefined at the poles; latitudes are clamped to this value
const MERCATOR_MAX_LAT: f64 = 85.051_128_78;

/// Map projection used by the spatial renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Spherical Mercator
    #[default]
    Mercator,
    /// Equirectangular, latitude used as-is
    PlateCarree,
}

impl Projection {
    /// Create a Projection from a string
    pub fn parse_projection(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mercator" | "merc" => Ok(Projection::Mercator),
            "plate_carree" | "platecarree" | "cyl" => Ok(Projection::PlateCarree),
            _ => Err(LucyError::InvalidParameter {
                param: "projection".to_string(),
                message: format!(
                    "Unknown projection: {}. Must be one of: mercator, plate_carree",
                    s
                ),
            }),
        }
    }

    /// Project a latitude (degrees) onto the vertical map axis.
    ///
    /// Mercator output is scaled to degrees so both axes share units on
    /// the equator.
    pub fn project_lat(&self, lat: f64) -> f64 {
        match self {
            Projection::Mercator => {
                let phi = lat.clamp(-MERCATOR_MAX_LAT, MERCATOR_MAX_LAT).to_radians();
                (std::f64::consts::FRAC_PI_4 + phi / 2.0)
                    .tan()
                    .ln()
                    .to_degrees()
            }
            Projection::PlateCarree => lat,
        }
    }

    /// Inverse of [`Projection::project_lat`]
    pub fn unproject_lat(&self, y: f64) -> f64 {
        match self {
            Projection::Mercator => {
                (2.0 * y.to_radians().exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees()
            }
            Projection::PlateCarree => y,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Projection::Mercator => "mercator",
            Projection::PlateCarree => "plate_carree",
        }
    }
}

impl FromStr for Projection {
    type Err = LucyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Projection::parse_projection(s)
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Geographic bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Full extent covered by a raster
    pub fn from_header(header: &RasterHeader) -> Self {
        Self {
            min_lon: header.xllcorner,
            min_lat: header.yllcorner,
            max_lon: header.xurcorner(),
            max_lat: header.yurcorner(),
        }
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        (self.min_lon..=self.max_lon).contains(&lon) && (self.min_lat..=self.max_lat).contains(&lat)
    }

    /// Clip the segment `a -> b` to the box (Liang-Barsky).
    ///
    /// Returns `None` when the segment lies completely outside.
    pub fn clip_segment(&self, a: (f64, f64), b: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;

        let edges = [
            (-dx, a.0 - self.min_lon),
            (dx, self.max_lon - a.0),
            (-dy, a.1 - self.min_lat),
            (dy, self.max_lat - a.1),
        ];
        for (p, q) in edges {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }

        Some((
            (a.0 + t0 * dx, a.1 + t0 * dy),
            (a.0 + t1 * dx, a.1 + t1 * dy),
        ))
    }
}

/// Values from `start` towards `stop` (exclusive) in increments of `step`
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || stop <= start {
        return Vec::new();
    }
    let count = ((stop - start) / step).ceil() as usize;
    (0..count).map(|i| start + step * i as f64).collect()
}

/// Longitude of the western edge of every column, `ncols` points
pub fn lon_axis(header: &RasterHeader) -> Array1<f64> {
    Array1::from_iter((0..header.ncols).map(|i| header.xllcorner + header.cellsize * i as f64))
}

/// Latitude of the southern edge of every (flipped) row, `nrows` points
pub fn lat_axis(header: &RasterHeader) -> Array1<f64> {
    Array1::from_iter((0..header.nrows).map(|j| header.yllcorner + header.cellsize * j as f64))
}

/// Coordinate matrices of shape `(lats.len(), lons.len())`
pub fn meshgrid(lons: &Array1<f64>, lats: &Array1<f64>) -> (Array2<f64>, Array2<f64>) {
    let shape = (lats.len(), lons.len());
    let lon_mesh = Array2::from_shape_fn(shape, |(_, i)| lons[i]);
    let lat_mesh = Array2::from_shape_fn(shape, |(j, _)| lats[j]);
    (lon_mesh, lat_mesh)
}

/// Graticule line positions covering `[min, max]` at `step` spacing
pub fn graticule(min: f64, max: f64, step: f64) -> Vec<f64> {
    arange(min.floor(), max.ceil(), step)
}
