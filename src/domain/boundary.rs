//! Province boundary files: one GeoJSON FeatureCollection per province,
//! whose features carry the `tramo` (road segment) identifiers.

use crate::error::{Result, TramosError};
use geojson::GeoJson;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};

pub const BOUNDARY_EXTENSION: &str = "geojson";
pub const SEGMENT_PROPERTY: &str = "tramo";

/// Reads boundary files from a fixed directory. Nothing is cached.
#[derive(Debug, Clone)]
pub struct BoundaryLoader {
    dir: PathBuf,
}

impl BoundaryLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, province_key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", province_key, BOUNDARY_EXTENSION))
    }

    /// Segment identifiers of a province, trimmed, in feature order.
    /// Duplicates are kept.
    pub async fn load_segments(&self, province_key: &str) -> Result<Vec<String>> {
        let path = self.path_for(province_key);
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TramosError::BoundaryNotFound {
                    key: province_key.to_string(),
                    path,
                });
            }
            Err(source) => return Err(TramosError::BoundaryRead { path, source }),
        };

        let segments = parse_segments(&path, &text)?;
        tracing::debug!(
            province = province_key,
            path = %path.display(),
            segments = segments.len(),
            "Loaded boundary file"
        );
        Ok(segments)
    }
}

/// Extracts the `tramo` of every feature of a FeatureCollection document.
pub fn parse_segments(path: &Path, text: &str) -> Result<Vec<String>> {
    let parse_err = |reason: String| TramosError::Parse {
        path: path.to_path_buf(),
        reason,
    };

    let collection = match text.parse::<GeoJson>() {
        Ok(GeoJson::FeatureCollection(fc)) => fc,
        Ok(GeoJson::Feature(_)) => return Err(parse_err("expected a FeatureCollection, found a Feature".into())),
        Ok(GeoJson::Geometry(_)) => return Err(parse_err("expected a FeatureCollection, found a Geometry".into())),
        Err(e) => return Err(parse_err(e.to_string())),
    };

    collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            let integrity_err = |reason: &str| TramosError::DataIntegrity {
                path: path.to_path_buf(),
                index,
                reason: reason.to_string(),
            };
            if feature.properties.is_none() {
                return Err(integrity_err("feature has no properties"));
            }
            let value = feature
                .property(SEGMENT_PROPERTY)
                .ok_or_else(|| integrity_err("property missing"))?;
            segment_id(value)
                .ok_or_else(|| integrity_err(&format!("expected a string or integer, got {}", value)))
        })
        .collect()
}

fn segment_id(value: &JsonValue) -> Option<String> {
    if let Some(s) = value.as_str() {
        return Some(s.trim().to_string());
    }
    if let Some(i) = value.as_i64() {
        return Some(i.to_string());
    }
    if let Some(u) = value.as_u64() {
        return Some(u.to_string());
    }
    None
}
