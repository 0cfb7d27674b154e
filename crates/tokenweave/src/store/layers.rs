//! Reading source layers from disk.
//!
//! A layer is one source file deserialized into a JSON mapping. JSON and
//! YAML are both accepted, picked by file extension. Read problems are
//! reported as [`LayerError`]; the store loader logs them and moves on.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

/// Why a layer contributed nothing.
#[derive(Debug, thiserror::Error)]
pub enum LayerError {
    #[error("layer file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read layer {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse layer {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("layer {} must contain a mapping at the top level", path.display())]
    NotAMapping { path: PathBuf },
}

impl LayerError {
    /// Missing files are expected (optional overlays); everything else is
    /// a broken file.
    pub fn is_missing(&self) -> bool {
        matches!(self, LayerError::Missing { .. })
    }
}

/// Source syntax of a layer file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerFormat {
    Json,
    Yaml,
}

impl LayerFormat {
    /// Picks the format from the extension. Anything unrecognized is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                LayerFormat::Yaml
            }
            _ => LayerFormat::Json,
        }
    }
}

/// Parses layer text in the given format.
pub fn parse_layer(
    text: &str,
    format: LayerFormat,
    path: &Path,
) -> Result<Map<String, Value>, LayerError> {
    let parsed: Value = match format {
        LayerFormat::Json => serde_json::from_str(text).map_err(|e| LayerError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?,
        LayerFormat::Yaml => serde_yaml::from_str(text).map_err(|e| LayerError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?,
    };

    match parsed {
        Value::Object(map) => Ok(map),
        _ => Err(LayerError::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}

/// Reads and parses one layer file.
pub fn read_layer(path: &Path) -> Result<Map<String, Value>, LayerError> {
    if !path.exists() {
        return Err(LayerError::Missing {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| LayerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_layer(&text, LayerFormat::from_path(path), path)
}
