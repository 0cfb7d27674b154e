//! Errors that stop a run.
//!
//! Data-quality problems never show up here: missing or broken layers are
//! logged by the store loader, and unresolved references are collected as
//! diagnostics. What remains is configuration, templates and output I/O.

use std::path::PathBuf;

/// A template failed to load or render.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("template '{name}' failed: {source}")]
    Template {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Why a transform run stopped.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TransformError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TransformError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_the_path() {
        let err = TransformError::io(
            "/out/kotlin/Color.kt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/out/kotlin/Color.kt"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_emit_error_is_transparent() {
        let source = minijinja::Error::new(minijinja::ErrorKind::TemplateNotFound, "missing.kt");
        let err: TransformError = EmitError::Template {
            name: "missing.kt".to_string(),
            source,
        }
        .into();
        assert!(err.to_string().starts_with("template 'missing.kt' failed"));
    }
}
