//! Test data generation utilities.
//!
//! Writes LUCY-style raster and statistics files with known content.

use std::fmt::Write as _;
use std::path::Path;

/// NODATA sentinel used by every fixture
pub const NODATA: f64 = -9999.0;

/// Header of the Berlin domain used by LUCY
pub const BERLIN_HEADER: (usize, usize, f64, f64, f64) = (67, 32, 13.1167, 52.3667, 0.0083333);

/// Write a raster with the given header fields and rows in file order
/// (north to south).
pub fn write_raster(
    path: &Path,
    (ncols, nrows, xll, yll, cellsize): (usize, usize, f64, f64, f64),
    rows: &[Vec<f64>],
) -> std::io::Result<()> {
    let mut text = String::new();
    writeln!(text, "ncols         {}", ncols).ok();
    writeln!(text, "nrows         {}", nrows).ok();
    writeln!(text, "xllcorner     {}", xll).ok();
    writeln!(text, "yllcorner     {}", yll).ok();
    writeln!(text, "cellsize      {}", cellsize).ok();
    writeln!(text, "NODATA_value  {}", NODATA).ok();
    for row in rows {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(text, "{}", cells.join(" ")).ok();
    }
    std::fs::write(path, text)
}

/// The 2x2 raster `1 2 / 3 NODATA` on a unit grid at the origin
pub fn write_two_by_two(path: &Path) -> std::io::Result<()> {
    write_raster(
        path,
        (2, 2, 0.0, 0.0, 1.0),
        &[vec![1.0, 2.0], vec![3.0, NODATA]],
    )
}

/// A Berlin-sized raster with a smooth heat island and a NODATA border.
///
/// `hour` shifts the intensity so batch frames differ.
pub fn write_berlin_raster(path: &Path, hour: usize) -> std::io::Result<()> {
    let (ncols, nrows, ..) = BERLIN_HEADER;
    let peak = 20.0 + (hour % 24) as f64;
    let rows: Vec<Vec<f64>> = (0..nrows)
        .map(|j| {
            (0..ncols)
                .map(|i| {
                    if i == 0 || j == 0 || i == ncols - 1 || j == nrows - 1 {
                        return NODATA;
                    }
                    let dx = (i as f64 - ncols as f64 / 2.0) / ncols as f64;
                    let dy = (j as f64 - nrows as f64 / 2.0) / nrows as f64;
                    (peak * (-(dx * dx + dy * dy) * 8.0).exp() * 100.0).round() / 100.0
                })
                .collect()
        })
        .collect();
    write_raster(path, BERLIN_HEADER, &rows)
}

/// Statistics column names in LUCY order
pub fn statistics_columns() -> Vec<String> {
    ["AHF", "Qb", "Qv", "Qm"]
        .iter()
        .flat_map(|c| ["Mean", "Min", "Max", "Std"].map(|s| format!("{}{}", c, s)))
        .collect()
}

/// Write a statistics file with `hours` hourly rows.
///
/// Column `k` at hour `h` holds `k + h / 10`.
pub fn write_statistics(path: &Path, hours: usize) -> std::io::Result<()> {
    let columns = statistics_columns();
    let mut text = columns.join(" ");
    text.push('\n');
    for h in 0..hours {
        let row: Vec<String> = (0..columns.len())
            .map(|k| format!("{:.2}", k as f64 + h as f64 / 10.0))
            .collect();
        text.push_str(&row.join(" "));
        text.push('\n');
    }
    std::fs::write(path, text)
}
