//! Format emitters.
//!
//! Emitters turn one mode's [`ExtractedTokens`] into [`Artifact`]s: Kotlin
//! object modules, Android resource documents and a CSS stylesheet. They
//! only format. Every value they see is already resolved, so unit suffixes,
//! identifier sanitization and the odd degraded value (a gradient where a
//! color resource is expected) are all that happen here.
//!
//! Layout lives in the minijinja templates under `templates/`; see
//! [`TemplateEngine`].

mod css;
mod engine;
mod format;
mod kotlin;
mod xml;

pub use css::{emit_css, CSS_FILE};
pub use engine::{register_filters, TemplateEngine};
pub use format::{android_argb, first_hex_color, kotlin_string, resource_color};
pub use kotlin::{emit_kotlin, token_provider, KOTLIN_FILES, PROVIDED_OBJECTS};
pub use xml::{emit_xml, XML_FILES};

use crate::error::EmitError;
use crate::extract::ExtractedTokens;
use crate::mode::{ExportScope, Mode};

/// Output format of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Kotlin,
    Xml,
    Css,
}

/// One emitted file, named relative to its format's output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub format: Format,
    pub file_name: String,
    pub contents: String,
}

impl Artifact {
    pub fn kotlin(file_name: impl Into<String>, contents: String) -> Self {
        Self::new(Format::Kotlin, file_name, contents)
    }

    pub fn xml(file_name: impl Into<String>, contents: String) -> Self {
        Self::new(Format::Xml, file_name, contents)
    }

    pub fn css(file_name: impl Into<String>, contents: String) -> Self {
        Self::new(Format::Css, file_name, contents)
    }

    fn new(format: Format, file_name: impl Into<String>, contents: String) -> Self {
        Artifact {
            format,
            file_name: file_name.into(),
            contents,
        }
    }
}

/// Renders all three formats for a mode.
pub struct Emitter {
    engine: TemplateEngine,
    package: String,
}

impl Emitter {
    /// `package` is the base Kotlin package; per-mode exports append the
    /// mode suffix to it.
    pub fn new(package: impl Into<String>) -> Result<Self, EmitError> {
        Ok(Emitter {
            engine: TemplateEngine::new()?,
            package: package.into(),
        })
    }

    pub fn package_for(&self, mode: &Mode, scope: ExportScope) -> String {
        if scope.is_multi_mode() {
            format!("{}.{}", self.package, mode.suffix())
        } else {
            self.package.clone()
        }
    }

    /// Every artifact for one mode, Kotlin first, then XML, then CSS.
    pub fn emit(
        &self,
        tokens: &ExtractedTokens,
        mode: &Mode,
        scope: ExportScope,
    ) -> Result<Vec<Artifact>, EmitError> {
        let mut artifacts = emit_kotlin(&self.engine, &self.package_for(mode, scope), tokens)?;
        artifacts.extend(emit_xml(&self.engine, tokens)?);
        artifacts.push(emit_css(&self.engine, mode, tokens)?);
        Ok(artifacts)
    }

    /// The root `TokenProvider.kt` for a multi-mode export.
    pub fn token_provider(
        &self,
        modes: &[Mode],
        default_brand: &str,
        light_theme: &str,
        dark_theme: &str,
    ) -> Result<Artifact, EmitError> {
        token_provider(
            &self.engine,
            &self.package,
            modes,
            default_brand,
            light_theme,
            dark_theme,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_covers_every_format() {
        let emitter = Emitter::new("com.example.theme").unwrap();
        let artifacts = emitter
            .emit(&ExtractedTokens::default(), &Mode::new("Default", "Day"), ExportScope::Default)
            .unwrap();

        let count = |format: Format| artifacts.iter().filter(|a| a.format == format).count();
        assert_eq!(count(Format::Kotlin), 8);
        assert_eq!(count(Format::Xml), 9);
        assert_eq!(count(Format::Css), 1);
    }

    #[test]
    fn test_package_follows_scope() {
        let emitter = Emitter::new("com.example.theme").unwrap();
        let mode = Mode::new("Performance", "Night");

        assert_eq!(emitter.package_for(&mode, ExportScope::Default), "com.example.theme");
        assert_eq!(
            emitter.package_for(&mode, ExportScope::AllModes),
            "com.example.theme.performance_night"
        );

        let artifacts = emitter
            .emit(&ExtractedTokens::default(), &mode, ExportScope::AllModes)
            .unwrap();
        let color = artifacts.iter().find(|a| a.file_name == "Color.kt").unwrap();
        assert!(color
            .contents
            .starts_with("package com.example.theme.performance_night\n"));
    }

    #[test]
    fn test_emitted_file_names_are_known() {
        let emitter = Emitter::new("com.example.theme").unwrap();
        let artifacts = emitter
            .emit(&ExtractedTokens::default(), &Mode::new("Default", "Day"), ExportScope::Default)
            .unwrap();
        for artifact in artifacts {
            let known = match artifact.format {
                Format::Kotlin => KOTLIN_FILES.contains(&artifact.file_name.as_str()),
                Format::Xml => XML_FILES.contains(&artifact.file_name.as_str()),
                Format::Css => artifact.file_name == CSS_FILE,
            };
            assert!(known, "unexpected artifact {}", artifact.file_name);
        }
    }
}
