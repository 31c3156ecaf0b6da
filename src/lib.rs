//! # lucy-postproc
//!
//! Post-processing of LUCY (Large scale Urban Consumption of energY) model
//! outputs.
//!
//! LUCY writes two kinds of flat files: gridded anthropogenic heat flux
//! snapshots in ESRI ASCII raster format, and whitespace-delimited
//! statistics time series. This library reads both into `ndarray` arrays and
//! renders them to image files.
//!
//! ## Architecture
//!
//! - **Readers**: [`raster`] (header, grid, NODATA mask) and [`table`]
//! - **Rendering**: [`render`] draws maps, time series and statistics panels
//!   into in-memory [`render::Figure`]s that are saved on request
//! - **Orchestration**: [`batch`] for indexed file series, [`config`] for the
//!   layered configuration of the `lucy` binary

pub mod batch;
pub mod colormaps;
pub mod config;
pub mod error;
pub mod geo;
pub mod inspect;
pub mod logging;
pub mod overlay;
pub mod raster;
pub mod render;
pub mod statistics;
pub mod table;

pub use config::{Config, PlotStyle};
pub use error::{LucyError, Result};
pub use logging::{
    init_tracing, log_error, log_operation_end, log_operation_start, log_raster_load_stats,
    log_timed_operation,
};
pub use raster::{MaskedGrid, RasterHeader, SpatialData};
pub use render::{save_figure, Figure};
pub use table::{Table, TemporalData};
