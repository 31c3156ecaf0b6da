//! Plots of the per-component statistics of a LUCY run.
//!
//! Two kinds of figure: all component means on one hourly axis, and a
//! 2x2 panel (one per component) of the mean inside a shaded envelope.

use ndarray::Array1;
use plotters::prelude::*;

use super::{draw_figure, render_err, value_range, Figure, DRAW_TEXT, SERIES_COLORS};
use crate::config::PlotStyle;
use crate::error::{LucyError, Result};
use crate::statistics::{ComponentStats, HourlyAxis};

/// Band drawn around the mean in an envelope panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// Between the minimum and maximum series
    MinMax,
    /// Between `mean - std` and `mean + std`
    StdDev,
}

impl Envelope {
    /// Lower and upper bound series
    pub fn bounds(&self, stats: &ComponentStats) -> (Array1<f64>, Array1<f64>) {
        match self {
            Envelope::MinMax => (stats.min.clone(), stats.max.clone()),
            Envelope::StdDev => stats.std_band(),
        }
    }

    pub fn title(&self, stats: &ComponentStats) -> String {
        match self {
            Envelope::MinMax => format!("min, mean, max {}", stats.component.label()),
            Envelope::StdDev => format!("mean & stddev {}", stats.component.label()),
        }
    }

    /// Suffix of the output file name
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Envelope::MinMax => "minmax",
            Envelope::StdDev => "stddev",
        }
    }
}

fn check_lengths(stats: &[ComponentStats]) -> Result<usize> {
    let len = stats.first().map(ComponentStats::len).unwrap_or(0);
    if len == 0 {
        return Err(LucyError::InvalidParameter {
            param: "statistics".to_string(),
            message: "no time steps to plot".to_string(),
        });
    }
    if stats.iter().any(|s| s.len() != len) {
        return Err(LucyError::InvalidParameter {
            param: "statistics".to_string(),
            message: "components have different numbers of time steps".to_string(),
        });
    }
    Ok(len)
}

fn indexed(values: &Array1<f64>) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect()
}

/// All component means on one plot, with a legend
pub fn render_component_means(
    stats: &[ComponentStats],
    axis: &HourlyAxis,
    style: &PlotStyle,
) -> Result<Figure> {
    let len = check_lengths(stats)?;
    let x_max = (len - 1).max(1) as f64;
    let (y_min, y_max) = value_range(stats.iter().flat_map(|s| s.mean.iter().copied()));

    draw_figure(style.width, style.height, |root| {
        let mut chart = ChartBuilder::on(root)
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0..x_max, y_min..y_max)
            .map_err(render_err)?;

        let time_label = |x: &f64| axis.label(*x);
        let mut mesh = chart.configure_mesh();
        if DRAW_TEXT {
            mesh.x_desc("Time")
                .y_desc("W/m2")
                .x_labels(6)
                .x_label_formatter(&time_label);
        } else {
            mesh.x_labels(0).y_labels(0);
        }
        mesh.draw().map_err(render_err)?;

        for (series, &color) in stats.iter().zip(SERIES_COLORS.iter().cycle()) {
            chart
                .draw_series(LineSeries::new(indexed(&series.mean), color.stroke_width(2)))
                .map_err(render_err)?
                .label(format!("mean {}", series.component.label()))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        if DRAW_TEXT {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(render_err)?;
        }

        Ok(())
    })
}

/// One panel per component: the mean inside a shaded envelope.
///
/// Panels are laid out row by row in the order of `stats`. Only the bottom
/// row carries time labels.
pub fn render_envelopes(
    stats: &[ComponentStats],
    axis: &HourlyAxis,
    envelope: Envelope,
    style: &PlotStyle,
) -> Result<Figure> {
    let len = check_lengths(stats)?;
    let x_max = (len - 1).max(1) as f64;

    draw_figure(style.width, style.height, |root| {
        let rows = stats.len().div_ceil(2);
        let panels = root.split_evenly((rows, 2));

        for (i, ((panel, series), &color)) in panels
            .iter()
            .zip(stats)
            .zip(SERIES_COLORS.iter().cycle())
            .enumerate()
        {
            let (lower, upper) = envelope.bounds(series);
            let (y_min, y_max) = value_range(
                lower
                    .iter()
                    .chain(upper.iter())
                    .chain(series.mean.iter())
                    .copied(),
            );
            let bottom_row = i / 2 + 1 == rows;

            let mut builder = ChartBuilder::on(panel);
            builder
                .margin(8)
                .x_label_area_size(if bottom_row { 30 } else { 10 })
                .y_label_area_size(50);
            if DRAW_TEXT {
                builder.caption(envelope.title(series), ("sans-serif", 14.0).into_font());
            }
            let mut chart = builder
                .build_cartesian_2d(0.0..x_max, y_min..y_max)
                .map_err(render_err)?;

            let label = |x: &f64| {
                if bottom_row {
                    axis.label(*x)
                } else {
                    String::new()
                }
            };
            let mut mesh = chart.configure_mesh();
            if DRAW_TEXT {
                mesh.x_labels(4).x_label_formatter(&label);
            } else {
                mesh.x_labels(0).y_labels(0);
            }
            mesh.draw().map_err(render_err)?;

            let band: Vec<(f64, f64)> = indexed(&upper)
                .into_iter()
                .chain(indexed(&lower).into_iter().rev())
                .filter(|(_, v)| v.is_finite())
                .collect();
            if band.len() >= 3 {
                chart
                    .draw_series(std::iter::once(Polygon::new(band, color.mix(0.3).filled())))
                    .map_err(render_err)?;
            }
            chart
                .draw_series(LineSeries::new(indexed(&series.mean), color.stroke_width(2)))
                .map_err(render_err)?;
        }

        Ok(())
    })
}
