//! Figure rendering and persistence.
//!
//! Renderers draw into an in-memory RGB buffer through the `plotters`
//! bitmap backend and hand back a [`Figure`]. Nothing is written to disk
//! until [`Figure::save`] is called.

pub mod spatial;
pub mod statistics;
pub mod temporal;

pub use spatial::{load_overlays, render_spatial};
pub use statistics::{render_component_means, render_envelopes, Envelope};
pub use temporal::render_timeseries;

use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

use crate::error::{LucyError, Result};

/// Titles, axis labels and legends need a font backend. Without the `ttf`
/// feature `plotters` panics on any text draw, so text is left out.
pub(crate) const DRAW_TEXT: bool = cfg!(feature = "ttf");

/// Line colors for multi-series plots (blue, orange, green, red)
pub(crate) const SERIES_COLORS: [RGBColor; 4] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
];

/// A rendered figure held in memory
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    image: RgbImage,
}

impl Figure {
    /// Wrap a raw RGB buffer of `width * height * 3` bytes
    pub fn from_rgb(width: u32, height: u32, buffer: Vec<u8>) -> Result<Self> {
        let image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| LucyError::Render {
            message: format!("pixel buffer does not match {}x{}", width, height),
        })?;
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The rendered pixels
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Write the figure to `path`; the format follows the file extension
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.image.save(path)?;
        info!(
            path = %path.display(),
            width = self.width(),
            height = self.height(),
            "Figure saved"
        );
        Ok(())
    }
}

/// Save a figure under `fig_name` (including the extension)
pub fn save_figure(figure: &Figure, fig_name: impl AsRef<Path>) -> Result<()> {
    figure.save(fig_name)
}

/// Draw onto a white `width x height` canvas and return the result
pub(crate) fn draw_figure<F>(width: u32, height: u32, draw: F) -> Result<Figure>
where
    F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()>,
{
    let mut buffer = vec![255u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        draw(&root)?;
        root.present().map_err(render_err)?;
    }
    Figure::from_rgb(width, height, buffer)
}

pub(crate) fn render_err<E: std::fmt::Display>(err: E) -> LucyError {
    LucyError::Render {
        message: err.to_string(),
    }
}

/// Padded `(min, max)` of the finite values, `(0, 1)` when there are none
pub(crate) fn value_range<I: IntoIterator<Item = f64>>(values: I) -> (f64, f64) {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() {
        return (0.0, 1.0);
    }
    if max == min {
        let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
        return (min - pad, max + pad);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_draw_figure_fills_white() {
        let figure = draw_figure(120, 80, |_| Ok(())).unwrap();
        assert_eq!(figure.width(), 120);
        assert_eq!(figure.height(), 80);
        assert_eq!(figure.image().get_pixel(10, 10).0, [255, 255, 255]);
    }

    #[test]
    fn test_from_rgb_rejects_short_buffer() {
        assert!(Figure::from_rgb(10, 10, vec![0; 10]).is_err());
    }

    #[test]
    fn test_save_png_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("figure.png");
        let figure = draw_figure(64, 48, |root| {
            root.fill(&RED).map_err(render_err)?;
            Ok(())
        })
        .unwrap();

        save_figure(&figure, &path).unwrap();
        let reloaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(reloaded.dimensions(), (64, 48));
        assert_eq!(reloaded.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_save_format_from_extension() {
        let dir = tempdir().unwrap();
        let figure = draw_figure(32, 32, |_| Ok(())).unwrap();

        let bmp = dir.path().join("figure.bmp");
        figure.save(&bmp).unwrap();
        assert_eq!(
            image::ImageFormat::from_path(&bmp).unwrap(),
            image::ImageFormat::Bmp
        );
        assert!(bmp.exists());

        assert!(matches!(
            figure.save(dir.path().join("figure.unknown")),
            Err(LucyError::Image { .. })
        ));
    }

    #[test]
    fn test_save_to_unwritable_path() {
        let figure = draw_figure(32, 32, |_| Ok(())).unwrap();
        assert!(matches!(
            figure.save("/nonexistent/dir/figure.png"),
            Err(LucyError::Io(_))
        ));
    }

    #[test]
    fn test_every_renderer_completes() {
        use crate::config::PlotStyle;
        use crate::geo::Projection;
        use crate::raster::{MaskedGrid, RasterHeader};
        use crate::statistics::{Component, ComponentStats, HourlyAxis};
        use ndarray::{array, Array1};

        let style = PlotStyle {
            projection: Projection::PlateCarree,
            width: 320,
            height: 240,
            ..PlotStyle::default()
        };

        let header = RasterHeader {
            ncols: 2,
            nrows: 2,
            xllcorner: 13.0,
            yllcorner: 52.0,
            cellsize: 0.5,
            nodata_value: -9999.0,
        };
        let grid = MaskedGrid::from_file_rows(array![[1.0, 2.0], [3.0, -9999.0]], -9999.0);
        let map = render_spatial(&header, &grid, &[], &style).unwrap();
        assert_eq!((map.width(), map.height()), (320, 240));

        let series = render_timeseries(Array1::from(vec![1.0, 3.0, 2.0]).view(), &style).unwrap();
        assert_eq!(series.width(), 320);

        let stats: Vec<ComponentStats> = Component::ALL
            .iter()
            .map(|&component| ComponentStats {
                component,
                mean: array![10.0, 12.0, 11.0],
                min: array![5.0, 6.0, 5.5],
                max: array![20.0, 22.0, 21.0],
                std: array![2.0, 2.5, 2.0],
            })
            .collect();
        let axis = HourlyAxis::parse("2005-01-01").unwrap();
        assert!(render_component_means(&stats, &axis, &style).is_ok());
        for envelope in [Envelope::MinMax, Envelope::StdDev] {
            assert!(render_envelopes(&stats, &axis, envelope, &style).is_ok());
        }
    }

    #[test]
    fn test_value_range() {
        assert_eq!(value_range(vec![0.0, 10.0]), (-0.5, 10.5));
        assert_eq!(value_range(vec![f64::NAN]), (0.0, 1.0));
        assert_eq!(value_range(vec![0.0, 0.0]), (-1.0, 1.0));
        let (lo, hi) = value_range(vec![5.0]);
        assert!(lo < 5.0 && hi > 5.0);
    }
}
