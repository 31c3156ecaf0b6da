//! File summaries for `lucy inspect`.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::geo::BoundingBox;
use crate::raster::{GridSummary, RasterHeader, SpatialData};
use crate::table::TemporalData;

/// What `lucy inspect` reports about a file
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Raster {
        path: PathBuf,
        header: RasterHeader,
        bounds: BoundingBox,
        summary: GridSummary,
    },
    Table {
        path: PathBuf,
        columns: Vec<String>,
        rows: usize,
    },
}

/// Whether a path names a raster (`.asc`) rather than a statistics table
pub fn is_raster_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("asc"))
        .unwrap_or(false)
}

impl Report {
    /// Read `path` and summarize it
    pub fn from_path(path: &Path) -> Result<Self> {
        if is_raster_path(path) {
            let data = SpatialData::open(path)?;
            let grid = data.load()?;
            Ok(Report::Raster {
                path: path.to_path_buf(),
                header: *data.header(),
                bounds: BoundingBox::from_header(data.header()),
                summary: grid.summary(),
            })
        } else {
            let data = TemporalData::open(path)?;
            Ok(Report::Table {
                path: path.to_path_buf(),
                columns: data.columns().to_vec(),
                rows: data.table().n_rows(),
            })
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v))
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Raster {
                path,
                header,
                bounds,
                summary,
            } => {
                writeln!(f, "Raster: {}", path.display())?;
                writeln!(f, "  ncols:        {}", header.ncols)?;
                writeln!(f, "  nrows:        {}", header.nrows)?;
                writeln!(f, "  xllcorner:    {}", header.xllcorner)?;
                writeln!(f, "  yllcorner:    {}", header.yllcorner)?;
                writeln!(f, "  cellsize:     {}", header.cellsize)?;
                writeln!(f, "  NODATA_value: {}", header.nodata_value)?;
                writeln!(
                    f,
                    "  extent:       lon [{}, {}] lat [{}, {}]",
                    bounds.min_lon, bounds.max_lon, bounds.min_lat, bounds.max_lat
                )?;
                writeln!(
                    f,
                    "  cells:        {} valid, {} masked",
                    summary.valid, summary.masked
                )?;
                write!(
                    f,
                    "  values:       min {} max {} mean {}",
                    fmt_opt(summary.min),
                    fmt_opt(summary.max),
                    fmt_opt(summary.mean)
                )
            }
            Report::Table {
                path,
                columns,
                rows,
            } => {
                writeln!(f, "Table: {}", path.display())?;
                writeln!(f, "  rows:    {}", rows)?;
                write!(f, "  columns: {}", columns.join(" "))
            }
        }
    }
}
