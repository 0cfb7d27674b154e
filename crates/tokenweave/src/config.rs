//! Transformer configuration.
//!
//! `defaults/tokenweave.default.toml` is embedded into the crate so the
//! documented defaults and runtime behavior stay in sync. Workspaces layer a
//! `tokenweave.toml` on top via [`ConfigLoader`].

use std::path::{Path, PathBuf};

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;

use crate::mode::Mode;

const DEFAULT_TOML: &str = include_str!("../defaults/tokenweave.default.toml");

/// File name looked up in the workspace root.
pub const WORKSPACE_CONFIG_FILE: &str = "tokenweave.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TransformerConfig {
    pub sources: SourcesConfig,
    pub output: OutputConfig,
    pub kotlin: KotlinConfig,
    pub modes: ModesConfig,
    pub extract: ExtractConfig,
}

/// Where the source layers live, relative to the workspace root.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    pub base: Vec<String>,
    pub brand: String,
    pub theme: String,
    pub shared: Vec<String>,
}

impl SourcesConfig {
    /// Layer paths for `mode`, in merge order.
    pub fn layer_paths(&self, workspace: &Path, mode: &Mode) -> Vec<PathBuf> {
        let brand = self.brand.replace("{brand}", &mode.brand);
        let theme = self.theme.replace("{theme}", &mode.theme);

        self.base
            .iter()
            .map(String::as_str)
            .chain([brand.as_str(), theme.as_str()])
            .chain(self.shared.iter().map(String::as_str))
            .map(|relative| workspace.join(relative))
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Output root, relative to the workspace.
    pub root: String,
    pub kotlin: String,
    pub xml: String,
    pub css: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KotlinConfig {
    pub package: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModesConfig {
    pub brands: Vec<String>,
    pub themes: Vec<String>,
    pub default_brand: String,
    pub default_theme: String,
    /// The theme the generated token provider treats as dark.
    pub dark_theme: String,
}

impl ModesConfig {
    /// The mode exported by single-mode runs.
    pub fn default_mode(&self) -> Mode {
        Mode::new(&self.default_brand, &self.default_theme)
    }

    /// Every brand × theme combination, brands outermost.
    pub fn all_modes(&self) -> Vec<Mode> {
        self.brands
            .iter()
            .flat_map(|brand| self.themes.iter().map(move |theme| Mode::new(brand, theme)))
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    /// Root keys treated as component definitions.
    pub component_roots: Vec<String>,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
}

impl ConfigLoader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer an optional configuration file (ignored if absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `tokenweave.toml` from the workspace root, if present.
    pub fn with_workspace(self, workspace: impl AsRef<Path>) -> Self {
        self.with_optional_file(workspace.as_ref().join(WORKSPACE_CONFIG_FILE))
    }

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<TransformerConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TransformerConfig, ConfigError> {
    ConfigLoader::new().build()
}
