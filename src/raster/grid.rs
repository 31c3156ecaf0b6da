//! Raster grid loading and NODATA masking.
//!
//! Rows are stored north to south in the file. The loaded grid is flipped so
//! that row 0 is the southernmost row and indices map directly onto
//! increasing latitude.

use ndarray::{s, Array2, Zip};
use serde::Serialize;
use std::io::BufRead;

use super::header::RasterHeader;
use crate::error::{LucyError, Result};

/// A dense grid with missing cells masked out
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedGrid {
    data: Array2<f64>,
    mask: Array2<bool>,
}

/// Aggregate statistics over the valid cells of a grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSummary {
    /// Number of cells holding data
    pub valid: usize,
    /// Number of NODATA cells
    pub masked: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl MaskedGrid {
    /// Build a grid from rows in file order (north to south).
    ///
    /// The rows are flipped and every cell equal to `nodata_value` is masked.
    pub fn from_file_rows(rows: Array2<f64>, nodata_value: f64) -> Self {
        let data = rows.slice(s![..;-1, ..]).to_owned();
        let mask = data.mapv(|v| v == nodata_value);
        Self { data, mask }
    }

    /// Grid shape as `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Raw values, sentinel cells included
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Missing-cell mask, `true` where the cell is NODATA
    pub fn mask(&self) -> &Array2<bool> {
        &self.mask
    }

    pub fn is_masked(&self, row: usize, col: usize) -> bool {
        self.mask.get((row, col)).copied().unwrap_or(true)
    }

    /// Value at `(row, col)`, `None` for masked or out-of-range cells
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if self.is_masked(row, col) {
            None
        } else {
            self.data.get((row, col)).copied()
        }
    }

    /// Iterate over `((row, col), value)` for every valid cell
    pub fn valid_cells(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.data
            .indexed_iter()
            .zip(self.mask.iter())
            .filter(|(_, masked)| !**masked)
            .map(|((idx, &value), _)| (idx, value))
    }

    pub fn masked_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    /// Copy of the data with masked cells replaced by NaN
    pub fn to_nan_filled(&self) -> Array2<f64> {
        let mut out = self.data.clone();
        Zip::from(&mut out).and(&self.mask).for_each(|v, &masked| {
            if masked {
                *v = f64::NAN;
            }
        });
        out
    }

    /// Summary statistics over valid cells
    pub fn summary(&self) -> GridSummary {
        let mut valid = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for (_, value) in self.valid_cells() {
            valid += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }

        let has_data = valid > 0;
        GridSummary {
            valid,
            masked: self.masked_count(),
            min: has_data.then_some(min),
            max: has_data.then_some(max),
            mean: has_data.then(|| sum / valid as f64),
        }
    }
}

/// Upper bound on cells reserved before any row has been read
const MAX_PREALLOC_CELLS: usize = 1 << 20;

/// Read the data rows that follow the header.
///
/// `first_line` is the 1-based file line number of the first row, used in
/// error messages. Blank lines are skipped.
pub fn read_grid<R: BufRead>(
    reader: R,
    header: &RasterHeader,
    first_line: usize,
) -> Result<MaskedGrid> {
    let cells = header
        .nrows
        .checked_mul(header.ncols)
        .filter(|&n| {
            n.checked_mul(std::mem::size_of::<f64>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or(LucyError::Shape {
            expected_rows: header.nrows,
            expected_cols: header.ncols,
            rows: 0,
            cols: 0,
        })?;
    let mut values = Vec::with_capacity(cells.min(MAX_PREALLOC_CELLS));
    let mut rows = 0usize;

    for (offset, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = first_line + offset;
        if line.trim().is_empty() {
            continue;
        }

        let before = values.len();
        for token in line.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| LucyError::DataRow {
                line: line_no,
                message: format!("non-numeric value '{}'", token),
            })?;
            values.push(value);
        }

        let cols = values.len() - before;
        if cols != header.ncols {
            return Err(LucyError::DataRow {
                line: line_no,
                message: format!("expected {} values, found {}", header.ncols, cols),
            });
        }
        rows += 1;
    }

    if rows != header.nrows {
        return Err(LucyError::Shape {
            expected_rows: header.nrows,
            expected_cols: header.ncols,
            rows,
            cols: header.ncols,
        });
    }

    let file_rows =
        Array2::from_shape_vec((rows, header.ncols), values).map_err(|_| LucyError::Shape {
            expected_rows: header.nrows,
            expected_cols: header.ncols,
            rows,
            cols: header.ncols,
        })?;

    Ok(MaskedGrid::from_file_rows(file_rows, header.nodata_value))
}
