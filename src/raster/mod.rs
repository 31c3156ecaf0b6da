//! LUCY spatial output in ESRI ASCII raster format.
//!
//! The header is read when the file is opened, the grid itself only when
//! [`SpatialData::load`] is called.

pub mod grid;
pub mod header;

pub use grid::{read_grid, GridSummary, MaskedGrid};
pub use header::{RasterHeader, HEADER_LINES};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use crate::error::{LucyError, Result};
use crate::logging::log_raster_load_stats;

/// A raster file together with its parsed header
#[derive(Debug, Clone)]
pub struct SpatialData {
    path: PathBuf,
    header: RasterHeader,
}

impl SpatialData {
    /// Open a raster file and parse its header
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = open_reader(path)?;
        let header = RasterHeader::parse(reader)?;

        debug!(
            path = %path.display(),
            ncols = header.ncols,
            nrows = header.nrows,
            cellsize = header.cellsize,
            "Parsed raster header"
        );

        Ok(Self {
            path: path.to_path_buf(),
            header,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &RasterHeader {
        &self.header
    }

    /// Read the grid, flip it to south-up order and mask NODATA cells
    pub fn load(&self) -> Result<MaskedGrid> {
        let start = Instant::now();
        let mut reader = open_reader(&self.path)?;

        let mut skipped = String::new();
        for _ in 0..HEADER_LINES {
            skipped.clear();
            reader.read_line(&mut skipped)?;
        }

        let grid = read_grid(reader, &self.header, HEADER_LINES + 1)?;
        let summary = grid.summary();
        log_raster_load_stats(&self.path.display().to_string(), grid.shape(), &summary);
        info!(
            path = %self.path.display(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Raster loaded"
        );

        Ok(grid)
    }
}

/// Open a file for buffered reading, reporting a missing file as NotFound
pub(crate) fn open_reader(path: &Path) -> Result<BufReader<File>> {
    if !path.exists() {
        return Err(LucyError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }
    Ok(BufReader::new(File::open(path)?))
}
