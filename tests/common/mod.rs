//! Common test utilities for lucy-postproc.
//!
//! Fixture writers for LUCY raster and statistics files, plus helpers for
//! checking rendered images.
#![allow(dead_code)]

pub mod assertions;
pub mod image_utils;
pub mod test_data;
