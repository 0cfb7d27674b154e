//! Reference resolution.
//!
//! Token values may embed `{dotted.path}` placeholders pointing at other
//! tokens. [`ResolutionSession`] replaces them with the referenced literals,
//! following chains of references, caching every result by its original
//! string and recording paths that do not exist.
//!
//! Resolution never fails: a missing reference leaves its placeholder in
//! place, and a reference cycle stops at [`MAX_RESOLUTION_DEPTH`].

mod diagnostics;
mod placeholder;
mod session;

pub use diagnostics::{ReferenceDiagnostic, ResolutionReport};
pub use placeholder::{has_placeholder, placeholder_paths, whole_reference};
pub use session::{ResolutionSession, MAX_RESOLUTION_DEPTH};
