//! ESRI ASCII raster header.
//!
//! LUCY writes a fixed six-line header in front of every gridded snapshot:
//!
//! ```text
//! ncols         67
//! nrows         32
//! xllcorner     13.1167
//! yllcorner     52.3667
//! cellsize      0.0083333
//! NODATA_value  -9999
//! ```
//!
//! Parsing is positional. The field names are not checked, only the last
//! token of each line is read.

use serde::{Deserialize, Serialize};
use std::io::BufRead;
use std::str::FromStr;

use crate::error::{LucyError, Result};

/// Number of header lines in front of the raster data
pub const HEADER_LINES: usize = 6;

/// Header fields in file order
const FIELDS: [&str; HEADER_LINES] = [
    "ncols",
    "nrows",
    "xllcorner",
    "yllcorner",
    "cellsize",
    "NODATA_value",
];

/// Grid geometry and missing-value sentinel of a raster file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterHeader {
    /// Number of columns (longitude direction)
    pub ncols: usize,
    /// Number of rows (latitude direction)
    pub nrows: usize,
    /// Longitude of the lower-left corner
    pub xllcorner: f64,
    /// Latitude of the lower-left corner
    pub yllcorner: f64,
    /// Cell edge length in degrees
    pub cellsize: f64,
    /// Sentinel marking missing cells
    pub nodata_value: f64,
}

impl RasterHeader {
    /// Parse the first six lines of `reader`.
    ///
    /// Lines after the header are left unread.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut values = Vec::with_capacity(HEADER_LINES);

        for (idx, line) in reader.lines().take(HEADER_LINES).enumerate() {
            let line = line?;
            let token = line
                .split_whitespace()
                .last()
                .ok_or_else(|| LucyError::Header {
                    line: idx + 1,
                    field: FIELDS[idx],
                    message: "empty line".to_string(),
                })?;
            values.push(token.to_string());
        }

        if values.len() < HEADER_LINES {
            let line = values.len() + 1;
            return Err(LucyError::Header {
                line,
                field: FIELDS[line - 1],
                message: format!(
                    "expected {} header lines, found {}",
                    HEADER_LINES,
                    values.len()
                ),
            });
        }

        Ok(Self {
            ncols: parse_field(&values, 0)?,
            nrows: parse_field(&values, 1)?,
            xllcorner: parse_field(&values, 2)?,
            yllcorner: parse_field(&values, 3)?,
            cellsize: parse_field(&values, 4)?,
            nodata_value: parse_field(&values, 5)?,
        })
    }

    /// Longitude of the eastern edge
    pub fn xurcorner(&self) -> f64 {
        self.xllcorner + self.cellsize * self.ncols as f64
    }

    /// Latitude of the northern edge
    pub fn yurcorner(&self) -> f64 {
        self.yllcorner + self.cellsize * self.nrows as f64
    }

    /// Whether `value` is the missing-data sentinel
    pub fn is_nodata(&self, value: f64) -> bool {
        value == self.nodata_value
    }
}

fn parse_field<T>(values: &[String], idx: usize) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    values[idx].parse::<T>().map_err(|e| LucyError::Header {
        line: idx + 1,
        field: FIELDS[idx],
        message: format!("cannot parse '{}': {}", values[idx], e),
    })
}
