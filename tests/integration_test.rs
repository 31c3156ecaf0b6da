//! Integration tests for lucy-postproc
//!
//! These tests write LUCY-style files to disk, read them back through the
//! public API and render figures end-to-end.

mod common;

use common::assertions::{assert_approx_eq, assert_column_approx_eq};
use common::{image_utils, test_data};
use image::ImageFormat;
use lucy_postproc::batch::{run_batch, BatchPlan, FrameTemplate};
use lucy_postproc::geo::{lat_axis, lon_axis, meshgrid, Projection};
use lucy_postproc::inspect::Report;
use lucy_postproc::render::spatial::plot_spatial_file;
use lucy_postproc::render::{
    render_component_means, render_envelopes, render_spatial, render_timeseries, Envelope,
};
use lucy_postproc::statistics::{all_components, Component, ComponentStats, HourlyAxis};
use lucy_postproc::{save_figure, LucyError, PlotStyle, SpatialData, TemporalData};
use ndarray::array;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn small_style() -> PlotStyle {
    PlotStyle {
        width: 320,
        height: 240,
        projection: Projection::PlateCarree,
        ..PlotStyle::default()
    }
}

#[test]
fn test_two_by_two_end_to_end() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("AHF_Test_0.asc");
    test_data::write_two_by_two(&path).unwrap();

    let data = SpatialData::open(&path).unwrap();
    let header = *data.header();
    assert_eq!(header.ncols, 2);
    assert_eq!(header.nrows, 2);
    assert_eq!(header.xllcorner, 0.0);
    assert_eq!(header.cellsize, 1.0);
    assert_eq!(header.nodata_value, test_data::NODATA);

    let grid = data.load().unwrap();
    assert_eq!(grid.shape(), (2, 2));
    assert_eq!(grid.get(0, 0), Some(3.0));
    assert_eq!(grid.get(0, 1), None);
    assert_eq!(grid.get(1, 0), Some(1.0));
    assert_eq!(grid.get(1, 1), Some(2.0));
    assert_eq!(grid.mask(), &array![[false, true], [false, false]]);

    let figure = render_spatial(&header, &grid, &[], &small_style()).unwrap();
    let out = dir.path().join("ahf.png");
    save_figure(&figure, &out).unwrap();

    let image = image_utils::load_rgb(&out);
    assert_eq!(image.dimensions(), (320, 240));
    assert!(image_utils::count_non_white(&image) > 1000);
}

#[test]
fn test_berlin_axes_and_mesh() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("AHF_Berlin_0_6_1_48_0.8.asc");
    test_data::write_berlin_raster(&path, 0).unwrap();

    let data = SpatialData::open(&path).unwrap();
    let header = data.header();
    let lons = lon_axis(header);
    let lats = lat_axis(header);

    assert_eq!(lons.len(), 67);
    assert_eq!(lats.len(), 32);
    assert_approx_eq(lons[0], 13.1167, None);
    assert_approx_eq(lats[0], 52.3667, None);
    assert!(lons[66] < 13.1167 + 0.0083333 * 67.0);

    let (lon_mesh, lat_mesh) = meshgrid(&lons, &lats);
    assert_eq!(lon_mesh.dim(), (32, 67));
    assert_eq!(lat_mesh.dim(), (32, 67));

    let summary = data.load().unwrap().summary();
    assert_eq!(summary.valid + summary.masked, 67 * 32);
    assert_eq!(summary.masked, 2 * 67 + 2 * 30);
    assert!(summary.max.unwrap() <= 20.0);
}

#[test]
fn test_spatial_figure_formats() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("AHF_Berlin_0_6_1_48_0.8.asc");
    test_data::write_berlin_raster(&path, 5).unwrap();

    let style = PlotStyle {
        projection: Projection::Mercator,
        ..small_style()
    };
    let figure = plot_spatial_file(&path, &style).unwrap();

    let png = dir.path().join("berlin.png");
    let jpg = dir.path().join("berlin.jpg");
    figure.save(&png).unwrap();
    figure.save(&jpg).unwrap();

    assert_eq!(image_utils::detect_image_format(&png), Some(ImageFormat::Png));
    assert_eq!(image_utils::detect_image_format(&jpg), Some(ImageFormat::Jpeg));
}

#[test]
fn test_spatial_with_overlay() {
    let dir = tempdir().unwrap();
    let raster = dir.path().join("AHF_Berlin_0_6_1_48_0.8.asc");
    test_data::write_berlin_raster(&raster, 0).unwrap();
    let overlay = dir.path().join("border.geojson");
    std::fs::write(
        &overlay,
        r#"{"type": "LineString", "coordinates": [[13.0, 52.5], [13.8, 52.5]]}"#,
    )
    .unwrap();

    let style = PlotStyle {
        overlays: vec![overlay],
        ..small_style()
    };
    let figure = plot_spatial_file(&raster, &style).unwrap();
    assert!(image_utils::count_color(figure.image(), [0, 0, 0]) > 0);

    let missing = PlotStyle {
        overlays: vec![dir.path().join("missing.geojson")],
        ..small_style()
    };
    assert!(matches!(
        plot_spatial_file(&raster, &missing),
        Err(LucyError::MissingInput { .. })
    ));
}

#[test]
fn test_batch_renders_in_order_and_aborts() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    for hour in 0..3 {
        let name = format!("AHF_Germany_{}_6_1_48_0.8.asc", hour);
        test_data::write_berlin_raster(&input.path().join(name), hour).unwrap();
    }

    let style = small_style();
    let mut order = Vec::new();
    let plan = BatchPlan {
        input_dir: input.path().to_path_buf(),
        template: FrameTemplate::parse("AHF_Germany_{index}_6_1_48_0.8.asc").unwrap(),
        indices: 0..5,
        prefix: "germany".to_string(),
        output_dir: output.path().to_path_buf(),
    };
    let result = run_batch(&plan, |path| {
        order.push(path.file_name().unwrap().to_string_lossy().into_owned());
        plot_spatial_file(path, &style)
    });

    assert!(result.is_err());
    assert_eq!(
        order,
        vec![
            "AHF_Germany_0_6_1_48_0.8.asc",
            "AHF_Germany_1_6_1_48_0.8.asc",
            "AHF_Germany_2_6_1_48_0.8.asc",
            "AHF_Germany_3_6_1_48_0.8.asc",
        ]
    );
    for index in 0..3 {
        assert!(output.path().join(format!("germany_{}.png", index)).exists());
    }
    assert!(!output.path().join("germany_3.png").exists());
    assert!(!output.path().join("germany_4.png").exists());
}

#[test]
fn test_statistics_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Statistics_AHF_2005_1_Berlin_48_0.8.txt");
    test_data::write_statistics(&path, 48).unwrap();

    let data = TemporalData::open(&path).unwrap();
    assert_eq!(data.columns().to_vec(), test_data::statistics_columns());
    assert_eq!(data.to_array().dim(), (48, 16));

    let qb_mean = data.column("QbMean").unwrap();
    assert_eq!(qb_mean.len(), 48);
    assert_column_approx_eq(qb_mean.slice(ndarray::s![..3]), &[4.0, 4.1, 4.2], Some(1e-9));

    assert!(matches!(
        data.column("QxMean"),
        Err(LucyError::ColumnNotFound { .. })
    ));

    let qm = ComponentStats::from_table(data.table(), Component::Metabolism).unwrap();
    assert_approx_eq(qm.std[0], 15.0, None);
}

#[test]
fn test_statistics_figures() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Statistics_AHF_2005_1_Berlin_48_0.8.txt");
    test_data::write_statistics(&path, 48).unwrap();

    let data = TemporalData::open(&path).unwrap();
    let stats = all_components(data.table()).unwrap();
    let axis = HourlyAxis::parse("2005-01-01").unwrap();
    let style = small_style();

    let means = dir.path().join("berlin_means.png");
    render_component_means(&stats, &axis, &style)
        .unwrap()
        .save(&means)
        .unwrap();
    assert!(means.exists());

    for envelope in [Envelope::MinMax, Envelope::StdDev] {
        let out = dir
            .path()
            .join(format!("berlin_{}.png", envelope.file_suffix()));
        render_envelopes(&stats, &axis, envelope, &style)
            .unwrap()
            .save(&out)
            .unwrap();
        assert_eq!(image_utils::load_rgb(&out).dimensions(), (320, 240));
    }
}

#[test]
fn test_timeseries_figure() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Statistics_AHF_2005_1_Berlin_48_0.8.txt");
    test_data::write_statistics(&path, 24).unwrap();

    let data = TemporalData::open(&path).unwrap();
    let figure = render_timeseries(data.column("AHFMean").unwrap(), &small_style()).unwrap();
    let out = dir.path().join("ahf_mean.bmp");
    figure.save(&out).unwrap();
    assert_eq!(image_utils::detect_image_format(&out), Some(ImageFormat::Bmp));
}

#[test]
fn test_inspect_reports() {
    let dir = tempdir().unwrap();
    let raster = dir.path().join("AHF_Test_0.asc");
    test_data::write_two_by_two(&raster).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&Report::from_path(&raster).unwrap().to_json().unwrap()).unwrap();
    assert_eq!(json["kind"], "raster");
    assert_eq!(json["summary"]["valid"], 3);
    assert_eq!(json["summary"]["masked"], 1);

    let table = dir.path().join("Statistics.txt");
    test_data::write_statistics(&table, 2).unwrap();
    let report = Report::from_path(&table).unwrap();
    assert!(report.to_string().contains("rows:    2"));
}
