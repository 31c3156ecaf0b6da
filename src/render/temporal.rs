//! Single-series time plot against the sample index.

use ndarray::ArrayView1;
use plotters::prelude::*;

use super::{draw_figure, render_err, value_range, Figure, DRAW_TEXT, SERIES_COLORS};
use crate::config::PlotStyle;
use crate::error::{LucyError, Result};

pub const TIMESERIES_TITLE: &str = "Time Series";

/// Draw `values` as circles joined by a line, x axis is `0..n`
pub fn render_timeseries(values: ArrayView1<'_, f64>, style: &PlotStyle) -> Result<Figure> {
    if values.is_empty() {
        return Err(LucyError::InvalidParameter {
            param: "values".to_string(),
            message: "cannot plot an empty series".to_string(),
        });
    }

    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();
    let x_max = (points.len() - 1).max(1) as f64;
    let (y_min, y_max) = value_range(values.iter().copied());
    let color = SERIES_COLORS[0];

    draw_figure(style.width, style.height, |root| {
        let mut builder = ChartBuilder::on(root);
        builder.margin(10).x_label_area_size(40).y_label_area_size(60);
        if DRAW_TEXT {
            builder.caption(
                TIMESERIES_TITLE,
                ("sans-serif", f64::from(style.title_font_size)).into_font(),
            );
        }
        let mut chart = builder
            .build_cartesian_2d(0.0..x_max, y_min..y_max)
            .map_err(render_err)?;

        let mut mesh = chart.configure_mesh();
        if DRAW_TEXT {
            mesh.x_desc("Time");
        } else {
            mesh.x_labels(0).y_labels(0);
        }
        mesh.draw().map_err(render_err)?;

        // NaN samples break the line instead of being drawn
        for run in points.split(|(_, v)| !v.is_finite()) {
            chart
                .draw_series(LineSeries::new(run.iter().copied(), color.stroke_width(2)))
                .map_err(render_err)?;
        }
        chart
            .draw_series(
                points
                    .iter()
                    .filter(|(_, v)| v.is_finite())
                    .map(|&p| Circle::new(p, 3, color.filled())),
            )
            .map_err(render_err)?;

        Ok(())
    })
}
