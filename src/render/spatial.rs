//! Map rendering of a raster grid.
//!
//! Every valid cell is drawn as a filled rectangle anchored at its lower-left
//! mesh point, colored on a fixed `[vmin, vmax]` scale. The map is clipped to
//! the raster's bounding box; overlays, graticule and a color bar are drawn
//! on top.

use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{draw_figure, render_err, Figure, DRAW_TEXT};
use crate::colormaps::{get_colormap, ColorScale};
use crate::config::PlotStyle;
use crate::error::Result;
use crate::geo::{graticule, lat_axis, lon_axis, meshgrid, BoundingBox, Projection};
use crate::logging::log_timed_operation;
use crate::overlay::Overlay;
use crate::raster::{MaskedGrid, RasterHeader, SpatialData};

/// Title of every spatial figure
pub const SPATIAL_TITLE: &str = "anthropogenic heat flux [w / m2]";

const COLORBAR_WIDTH: u32 = 110;
const COLORBAR_STEPS: usize = 100;
const GRATICULE_COLOR: RGBColor = RGBColor(170, 170, 170);

/// One grid cell in map coordinates (longitude, projected latitude)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub lower_left: (f64, f64),
    pub upper_right: (f64, f64),
    pub value: f64,
}

/// Rectangles of all valid cells; masked cells produce nothing
pub fn cell_rects(header: &RasterHeader, grid: &MaskedGrid, projection: Projection) -> Vec<CellRect> {
    let (lon_mesh, lat_mesh) = meshgrid(&lon_axis(header), &lat_axis(header));

    grid.valid_cells()
        .filter_map(|(idx, value)| {
            let lon = *lon_mesh.get(idx)?;
            let lat = *lat_mesh.get(idx)?;
            Some(CellRect {
                lower_left: (lon, projection.project_lat(lat)),
                upper_right: (
                    lon + header.cellsize,
                    projection.project_lat(lat + header.cellsize),
                ),
                value,
            })
        })
        .collect()
}

/// Overlay segments clipped to `bbox`, in map coordinates
pub fn overlay_segments(
    overlay: &Overlay,
    bbox: &BoundingBox,
    projection: Projection,
) -> Vec<[(f64, f64); 2]> {
    overlay
        .lines
        .iter()
        .flat_map(|line| line.windows(2))
        .filter_map(|pair| bbox.clip_segment(pair[0], pair[1]))
        .map(|(a, b)| {
            [
                (a.0, projection.project_lat(a.1)),
                (b.0, projection.project_lat(b.1)),
            ]
        })
        .collect()
}

/// Load every overlay named in the style
pub fn load_overlays(paths: &[PathBuf]) -> Result<Vec<Overlay>> {
    paths.iter().map(|path| Overlay::from_file(path)).collect()
}

/// Load a raster file and render it with the given style
pub fn plot_spatial_file(path: &Path, style: &PlotStyle) -> Result<Figure> {
    let data = SpatialData::open(path)?;
    let grid = data.load()?;
    let overlays = load_overlays(&style.overlays)?;
    render_spatial(data.header(), &grid, &overlays, style)
}

/// Render a masked grid on a map
pub fn render_spatial(
    header: &RasterHeader,
    grid: &MaskedGrid,
    overlays: &[Overlay],
    style: &PlotStyle,
) -> Result<Figure> {
    let colormap = get_colormap(&style.colormap)?;
    let scale = ColorScale::new(colormap.as_ref(), style.vmin, style.vmax);
    let projection = style.projection;
    let bbox = BoundingBox::from_header(header);

    let cells = cell_rects(header, grid, projection);
    let segments: Vec<_> = overlays
        .iter()
        .flat_map(|overlay| overlay_segments(&overlay.clipped_to(&bbox), &bbox, projection))
        .collect();

    debug!(
        cells = cells.len(),
        overlay_segments = segments.len(),
        projection = %projection,
        colormap = colormap.name(),
        "Rendering spatial figure"
    );

    let x_range = bbox.min_lon..bbox.max_lon;
    let y_range = projection.project_lat(bbox.min_lat)..projection.project_lat(bbox.max_lat);
    let colorbar_width = COLORBAR_WIDTH.min(style.width / 4);

    log_timed_operation("render_spatial", || {
        draw_figure(style.width, style.height, |root| {
            let (map_area, bar_area) = root.split_horizontally(style.width - colorbar_width);

            let mut builder = ChartBuilder::on(&map_area);
            builder.margin(10).x_label_area_size(40).y_label_area_size(60);
            if DRAW_TEXT {
                builder.caption(
                    SPATIAL_TITLE,
                    ("sans-serif", f64::from(style.title_font_size)).into_font(),
                );
            }
            let mut chart = builder
                .build_cartesian_2d(x_range.clone(), y_range.clone())
                .map_err(render_err)?;

            let lon_label = |lon: &f64| format!("{:.1}", lon);
            let lat_label = |y: &f64| format!("{:.1}", projection.unproject_lat(*y));
            let mut mesh = chart.configure_mesh();
            mesh.disable_mesh();
            if DRAW_TEXT {
                mesh.x_desc("longitude")
                    .y_desc("latitude")
                    .x_label_formatter(&lon_label)
                    .y_label_formatter(&lat_label);
            } else {
                mesh.x_labels(0).y_labels(0);
            }
            mesh.draw().map_err(render_err)?;

            chart
                .draw_series(cells.iter().map(|cell| {
                    let [r, g, b, _] = scale.map(cell.value);
                    Rectangle::new([cell.lower_left, cell.upper_right], RGBColor(r, g, b).filled())
                }))
                .map_err(render_err)?;

            chart
                .draw_series(
                    segments
                        .iter()
                        .map(|segment| PathElement::new(segment.to_vec(), BLACK.stroke_width(1))),
                )
                .map_err(render_err)?;

            // Parallels and meridians
            let label_font = ("sans-serif", 12.0).into_font();
            let meridians: Vec<f64> = graticule(bbox.min_lon, bbox.max_lon, style.grid_spacing)
                .into_iter()
                .filter(|lon| x_range.contains(lon))
                .collect();
            let parallels: Vec<f64> = graticule(bbox.min_lat, bbox.max_lat, style.grid_spacing)
                .into_iter()
                .filter(|lat| (bbox.min_lat..bbox.max_lat).contains(lat))
                .collect();

            chart
                .draw_series(meridians.iter().map(|&lon| {
                    PathElement::new(
                        vec![(lon, y_range.start), (lon, y_range.end)],
                        GRATICULE_COLOR.stroke_width(1),
                    )
                }))
                .map_err(render_err)?;
            if DRAW_TEXT {
                chart
                    .draw_series(meridians.iter().map(|&lon| {
                        Text::new(format!("{}°E", lon), (lon, y_range.start), label_font.clone())
                    }))
                    .map_err(render_err)?;
            }

            chart
                .draw_series(parallels.iter().map(|&lat| {
                    let y = projection.project_lat(lat);
                    PathElement::new(
                        vec![(x_range.start, y), (x_range.end, y)],
                        GRATICULE_COLOR.stroke_width(1),
                    )
                }))
                .map_err(render_err)?;
            if DRAW_TEXT {
                chart
                    .draw_series(parallels.iter().map(|&lat| {
                        Text::new(
                            format!("{}°N", lat),
                            (x_range.start, projection.project_lat(lat)),
                            label_font.clone(),
                        )
                    }))
                    .map_err(render_err)?;
            }

            draw_colorbar(&bar_area, &scale)
        })
    })
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    scale: &ColorScale,
) -> Result<()> {
    let (vmin, vmax) = (scale.vmin(), scale.vmax());

    let mut bar = ChartBuilder::on(area)
        .margin_top(50)
        .margin_bottom(50)
        .margin_left(10)
        .right_y_label_area_size(50)
        .build_cartesian_2d(0.0..1.0, vmin..vmax)
        .map_err(render_err)?;

    let mut mesh = bar.configure_mesh();
    mesh.disable_mesh().disable_x_axis();
    if DRAW_TEXT {
        mesh.y_desc("W/m2");
    } else {
        mesh.y_labels(0);
    }
    mesh.draw().map_err(render_err)?;

    let step = (vmax - vmin) / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|k| {
        let lo = vmin + step * k as f64;
        let [r, g, b, _] = scale.map(lo + step / 2.0);
        Rectangle::new([(0.0, lo), (1.0, lo + step)], RGBColor(r, g, b).filled())
    }))
    .map_err(render_err)?;

    Ok(())
}
