//! Design-token reference resolution and multi-platform code generation.
//!
//! tokenweave merges layered design-token sources (base values, a brand, a
//! theme, shared motion/interaction/component files) into one tree, resolves
//! the `{dotted.path}` references between tokens, and emits Kotlin objects,
//! Android resource documents and a CSS stylesheet per brand/theme mode.
//!
//! # Pipeline
//!
//! - [`store`]: ordered source layers deep-merged into a [`TokenStore`]
//! - [`resolve`]: a per-mode [`ResolutionSession`] that resolves, caches and
//!   records unresolved references
//! - [`extract`]: type-directed extractors producing [`ExtractedTokens`]
//! - [`emit`]: template-driven Kotlin, XML and CSS emitters
//! - [`orchestrate`]: the [`Transformer`] that runs one or all modes
//!
//! Data only flows forward. Nothing downstream mutates the store.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use tokenweave::{ResolutionSession, TokenStore};
//!
//! let store = TokenStore::from_layers([
//!     json!({"color-primitives": {"blue": {"500": {"value": "#1A73E8"}}}})
//!         .as_object()
//!         .unwrap()
//!         .clone(),
//!     json!({"color": {"brandPrimary": {"primary": {"value": "{color-primitives.blue.500}"}}}})
//!         .as_object()
//!         .unwrap()
//!         .clone(),
//! ]);
//!
//! let mut session = ResolutionSession::new(&store);
//! assert_eq!(session.resolve("{color.brandPrimary.primary}"), "#1A73E8");
//! assert!(session.report().is_clean());
//! ```
//!
//! Running a whole workspace:
//!
//! ```rust,no_run
//! use tokenweave::{ConfigLoader, ExportScope, Transformer};
//!
//! let config = ConfigLoader::new().with_workspace("design").build()?;
//! let summary = Transformer::new("design", config)?.run(ExportScope::AllModes)?;
//! println!("{} files written", summary.files_written());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod case;
pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
pub mod mode;
pub mod orchestrate;
pub mod resolve;
pub mod store;
pub mod value;

pub use crate::config::{ConfigLoader, TransformerConfig};
pub use crate::emit::{Artifact, Emitter, Format};
pub use crate::error::{EmitError, TransformError};
pub use crate::extract::{extract_all, ExtractedTokens};
pub use crate::mode::{ExportScope, Mode};
pub use crate::orchestrate::{ModeSummary, RunSummary, Transformer};
pub use crate::resolve::{ReferenceDiagnostic, ResolutionReport, ResolutionSession};
pub use crate::store::{TokenNode, TokenStore};
pub use crate::value::LiteralValue;
