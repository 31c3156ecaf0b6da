//! Basemap overlays (coastlines, country borders) read from GeoJSON.
//!
//! Line and polygon geometries are flattened into polylines of
//! `(lon, lat)` points. Point geometries and unknown types are skipped.

use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{LucyError, Result};
use crate::geo::BoundingBox;

/// A single polyline in geographic coordinates
pub type Polyline = Vec<(f64, f64)>;

/// A named set of polylines drawn on top of the raster
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    pub name: String,
    pub lines: Vec<Polyline>,
}

impl Overlay {
    /// Load an overlay from a GeoJSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LucyError::MissingInput {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let overlay = Self::from_geojson(&name, &content)?;
        debug!(
            overlay = %overlay.name,
            lines = overlay.lines.len(),
            "Loaded overlay"
        );
        Ok(overlay)
    }

    /// Parse GeoJSON text (FeatureCollection, Feature or bare geometry)
    pub fn from_geojson(name: &str, content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        let mut lines = Vec::new();
        collect_lines(&value, &mut lines)?;
        Ok(Self {
            name: name.to_string(),
            lines,
        })
    }

    /// Keep only the polylines with at least one vertex inside `bbox`
    pub fn clipped_to(&self, bbox: &BoundingBox) -> Self {
        Self {
            name: self.name.clone(),
            lines: self
                .lines
                .iter()
                .filter(|line| line.iter().any(|&(lon, lat)| bbox.contains(lon, lat)))
                .cloned()
                .collect(),
        }
    }
}

fn collect_lines(value: &Value, out: &mut Vec<Polyline>) -> Result<()> {
    let kind = value.get("type").and_then(Value::as_str).ok_or_else(|| {
        LucyError::InvalidParameter {
            param: "overlay".to_string(),
            message: "GeoJSON object without a type".to_string(),
        }
    })?;

    match kind {
        "FeatureCollection" => {
            let features = value
                .get("features")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for feature in features {
                collect_lines(feature, out)?;
            }
        }
        "Feature" => {
            if let Some(geometry) = value.get("geometry").filter(|g| !g.is_null()) {
                collect_lines(geometry, out)?;
            }
        }
        "GeometryCollection" => {
            let geometries = value
                .get("geometries")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for geometry in geometries {
                collect_lines(geometry, out)?;
            }
        }
        "LineString" => out.push(parse_ring(coordinates(value)?)?),
        "MultiLineString" | "Polygon" => {
            for ring in as_array(coordinates(value)?)? {
                out.push(parse_ring(ring)?);
            }
        }
        "MultiPolygon" => {
            for polygon in as_array(coordinates(value)?)? {
                for ring in as_array(polygon)? {
                    out.push(parse_ring(ring)?);
                }
            }
        }
        other => warn!(geometry = other, "Skipping unsupported overlay geometry"),
    }

    Ok(())
}

fn coordinates(value: &Value) -> Result<&Value> {
    value.get("coordinates").ok_or_else(|| invalid("geometry without coordinates"))
}

fn as_array(value: &Value) -> Result<&Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| invalid("coordinates must be arrays"))
}

fn parse_ring(value: &Value) -> Result<Polyline> {
    as_array(value)?
        .iter()
        .map(|position| {
            let pos = as_array(position)?;
            match (
                pos.first().and_then(Value::as_f64),
                pos.get(1).and_then(Value::as_f64),
            ) {
                (Some(lon), Some(lat)) => Ok((lon, lat)),
                _ => Err(invalid("position must hold numeric lon and lat")),
            }
        })
        .collect()
}

fn invalid(message: &str) -> LucyError {
    LucyError::InvalidParameter {
        param: "overlay".to_string(),
        message: message.to_string(),
    }
}
