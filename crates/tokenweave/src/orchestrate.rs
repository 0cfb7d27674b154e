//! Mode orchestration.
//!
//! A [`Transformer`] exports either the default brand/theme into the flat
//! format directories or every configured combination into
//! `<format>/<brand>_<theme>/`. Modes run one after another and share
//! nothing: each gets a freshly loaded [`TokenStore`] and a fresh
//! [`ResolutionSession`], so no cached resolution or diagnostic leaks from
//! one mode into the next.
//!
//! Only output I/O and template failures stop a run. Missing or broken
//! source layers and unresolved references are logged and the run continues
//! with what it has.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::TransformerConfig;
use crate::emit::{Artifact, Emitter, Format, CSS_FILE, KOTLIN_FILES, XML_FILES};
use crate::error::TransformError;
use crate::extract::extract_all;
use crate::mode::{ExportScope, Mode};
use crate::resolve::{ReferenceDiagnostic, ResolutionReport, ResolutionSession};
use crate::store::TokenStore;

/// What one mode produced.
#[derive(Debug, Clone)]
pub struct ModeSummary {
    pub mode: Mode,
    /// Per-category entry counts.
    pub counts: Vec<(&'static str, usize)>,
    pub report: ResolutionReport,
    pub files: Vec<PathBuf>,
}

impl ModeSummary {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

/// Outcome of [`Transformer::run`].
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub scope: ExportScope,
    pub modes: Vec<ModeSummary>,
    /// Flat root files removed before a multi-mode export.
    pub removed: Vec<PathBuf>,
    /// `TokenProvider.kt`, written by multi-mode exports.
    pub provider: Option<PathBuf>,
}

impl RunSummary {
    pub fn files_written(&self) -> usize {
        self.modes.iter().map(|m| m.files.len()).sum::<usize>() + usize::from(self.provider.is_some())
    }

    /// Distinct unresolved reference paths per mode, summed.
    pub fn unresolved(&self) -> usize {
        self.modes.iter().map(|m| m.report.unresolved.len()).sum()
    }
}

/// Drives load, resolve, extract, emit and write for a workspace.
pub struct Transformer {
    workspace: PathBuf,
    config: TransformerConfig,
    emitter: Emitter,
}

impl Transformer {
    pub fn new(workspace: impl Into<PathBuf>, config: TransformerConfig) -> Result<Self, TransformError> {
        let emitter = Emitter::new(config.kotlin.package.clone())?;
        Ok(Transformer {
            workspace: workspace.into(),
            config,
            emitter,
        })
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    pub fn config(&self) -> &TransformerConfig {
        &self.config
    }

    /// The flat output directory of a format.
    pub fn output_dir(&self, format: Format) -> PathBuf {
        let output = &self.config.output;
        let dir = match format {
            Format::Kotlin => &output.kotlin,
            Format::Xml => &output.xml,
            Format::Css => &output.css,
        };
        self.workspace.join(&output.root).join(dir)
    }

    /// Directory an artifact of `format` lands in for `mode`.
    pub fn mode_dir(&self, format: Format, mode: &Mode, scope: ExportScope) -> PathBuf {
        let root = self.output_dir(format);
        if scope.is_multi_mode() {
            root.join(mode.suffix())
        } else {
            root
        }
    }

    pub fn run(&self, scope: ExportScope) -> Result<RunSummary, TransformError> {
        let modes = match scope {
            ExportScope::Default => vec![self.config.modes.default_mode()],
            ExportScope::AllModes => self.config.modes.all_modes(),
        };
        tracing::info!(
            workspace = %self.workspace.display(),
            modes = modes.len(),
            "starting export"
        );

        let removed = if scope.is_multi_mode() {
            self.remove_stale_root_files()?
        } else {
            Vec::new()
        };

        let mut summaries = Vec::with_capacity(modes.len());
        for mode in &modes {
            summaries.push(self.export_mode(mode, scope)?);
        }

        let provider = if scope.is_multi_mode() {
            let modes_config = &self.config.modes;
            let artifact = self.emitter.token_provider(
                &modes,
                &modes_config.default_brand,
                &modes_config.default_theme,
                &modes_config.dark_theme,
            )?;
            Some(write_artifact(&self.output_dir(Format::Kotlin), &artifact)?)
        } else {
            None
        };

        Ok(RunSummary {
            scope,
            modes: summaries,
            removed,
            provider,
        })
    }

    /// Loads, extracts, emits and writes a single mode.
    pub fn export_mode(&self, mode: &Mode, scope: ExportScope) -> Result<ModeSummary, TransformError> {
        tracing::info!(%mode, "exporting mode");

        let paths = self.config.sources.layer_paths(&self.workspace, mode);
        let store = TokenStore::load_files(&paths);
        let mut session = ResolutionSession::new(&store);
        let tokens = extract_all(&mut session, &self.config.extract);
        let report = session.report();
        log_report(mode, &report);

        let artifacts = self.emitter.emit(&tokens, mode, scope)?;
        let mut files = Vec::with_capacity(artifacts.len());
        for artifact in &artifacts {
            let dir = self.mode_dir(artifact.format, mode, scope);
            files.push(write_artifact(&dir, artifact)?);
        }

        Ok(ModeSummary {
            mode: mode.clone(),
            counts: tokens.counts(),
            report,
            files,
        })
    }

    /// Deletes flat single-mode artifacts so they cannot be mistaken for
    /// output of a multi-mode export. `TokenProvider.kt` is kept.
    fn remove_stale_root_files(&self) -> Result<Vec<PathBuf>, TransformError> {
        let stale: [(Format, &[&str]); 3] = [
            (Format::Kotlin, &KOTLIN_FILES),
            (Format::Xml, &XML_FILES),
            (Format::Css, &[CSS_FILE]),
        ];

        let mut removed = Vec::new();
        for (format, names) in stale {
            let dir = self.output_dir(format);
            for name in names {
                let path = dir.join(name);
                if path.is_file() {
                    fs::remove_file(&path).map_err(|err| TransformError::io(&path, err))?;
                    tracing::info!(path = %path.display(), "removed stale root file");
                    removed.push(path);
                }
            }
        }
        Ok(removed)
    }
}

fn write_artifact(dir: &Path, artifact: &Artifact) -> Result<PathBuf, TransformError> {
    fs::create_dir_all(dir).map_err(|err| TransformError::io(dir, err))?;
    let path = dir.join(&artifact.file_name);
    fs::write(&path, &artifact.contents).map_err(|err| TransformError::io(&path, err))?;
    tracing::info!(path = %path.display(), bytes = artifact.contents.len(), "wrote");
    Ok(path)
}

fn log_report(mode: &Mode, report: &ResolutionReport) {
    for diagnostic in report.diagnostics() {
        match diagnostic {
            ReferenceDiagnostic::DepthExceeded { .. } => tracing::warn!(%mode, "{}", diagnostic),
            ReferenceDiagnostic::UnresolvedReference { .. } => tracing::debug!(%mode, "{}", diagnostic),
        }
    }
    if !report.is_clean() {
        tracing::info!(
            %mode,
            unresolved = report.unresolved.len(),
            depth_limited = report.depth_limited.len(),
            "references left unresolved"
        );
    }
}
