//! LUCY statistics output: whitespace-delimited tables.
//!
//! The first non-blank line names the columns, every following line holds
//! one time step:
//!
//! ```text
//! Hour AHFMean AHFMin AHFMax ...
//! 0    12.31   0.0    48.7   ...
//! ```

use ndarray::{Array2, ArrayView1, Axis};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{LucyError, Result};
use crate::raster::open_reader;

/// A numeric table addressable by column name
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    data: Array2<f64>,
}

impl Table {
    /// Parse a table from any buffered reader
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines().enumerate();

        let columns: Vec<String> = loop {
            match lines.next() {
                Some((_, line)) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break line.split_whitespace().map(str::to_string).collect();
                    }
                }
                None => {
                    return Err(LucyError::DataRow {
                        line: 1,
                        message: "missing header row".to_string(),
                    })
                }
            }
        };

        let mut values = Vec::new();
        let mut rows = 0usize;
        for (idx, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let before = values.len();
            for token in line.split_whitespace() {
                let value = token.parse::<f64>().map_err(|_| LucyError::DataRow {
                    line: idx + 1,
                    message: format!("non-numeric value '{}'", token),
                })?;
                values.push(value);
            }

            let found = values.len() - before;
            if found != columns.len() {
                return Err(LucyError::DataRow {
                    line: idx + 1,
                    message: format!("expected {} values, found {}", columns.len(), found),
                });
            }
            rows += 1;
        }

        let data = Array2::from_shape_vec((rows, columns.len()), values).map_err(|e| {
            LucyError::DataRow {
                line: rows + 1,
                message: e.to_string(),
            }
        })?;

        Ok(Self { columns, data })
    }

    /// Column names in file order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows (time steps)
    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// A single column by name
    pub fn column(&self, name: &str) -> Result<ArrayView1<'_, f64>> {
        let idx = self
            .columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| LucyError::ColumnNotFound {
                name: name.to_string(),
            })?;
        Ok(self.data.column(idx))
    }

    /// The whole table as a `rows x columns` matrix
    pub fn to_array(&self) -> Array2<f64> {
        self.data.clone()
    }

    /// `(name, values)` for every column in file order
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, ArrayView1<'_, f64>)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.data.axis_iter(Axis(1)))
    }
}

/// A statistics file on disk and its parsed table
#[derive(Debug, Clone)]
pub struct TemporalData {
    path: PathBuf,
    table: Table,
}

impl TemporalData {
    /// Read and parse a statistics file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let table = Table::parse(open_reader(path)?)?;

        debug!(columns = ?table.columns(), "Parsed table header");
        info!(
            operation = "table_load",
            file_path = %path.display(),
            rows = table.n_rows(),
            columns = table.columns().len(),
            "Table loaded"
        );

        Ok(Self {
            path: path.to_path_buf(),
            table,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        self.table.columns()
    }

    pub fn column(&self, name: &str) -> Result<ArrayView1<'_, f64>> {
        self.table.column(name)
    }

    pub fn to_array(&self) -> Array2<f64> {
        self.table.to_array()
    }
}
