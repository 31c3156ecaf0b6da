//! Error types for lucy-postproc.
//!
//! Every failure is fatal to the current invocation, so there is a single
//! error enum shared by the readers, the renderers and the CLI.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for lucy-postproc operations.
#[derive(Error, Debug)]
pub enum LucyError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input file or directory does not exist
    #[error("{} does not exist", path.display())]
    MissingInput { path: PathBuf },

    /// Malformed raster header line
    #[error("Malformed header at line {line} ({field}): {message}")]
    Header {
        line: usize,
        field: &'static str,
        message: String,
    },

    /// Malformed data row in a raster or table file
    #[error("Malformed data row at line {line}: {message}")]
    DataRow { line: usize, message: String },

    /// Grid shape disagrees with the header
    #[error("Shape mismatch: expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    Shape {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    /// Requested column is not in the table
    #[error("Column not found: {name}")]
    ColumnNotFound { name: String },

    /// Plot drawing errors
    #[error("Render error: {message}")]
    Render { message: String },

    /// Image encoding errors (unsupported extension, encoder failure)
    #[error("Image error: {message}")]
    Image { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<image::ImageError> for LucyError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => LucyError::Io(e),
            other => LucyError::Image {
                message: other.to_string(),
            },
        }
    }
}

/// Convenience type alias for Results with LucyError
pub type Result<T> = std::result::Result<T, LucyError>;
