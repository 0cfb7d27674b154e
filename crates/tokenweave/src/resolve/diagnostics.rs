//! Reference diagnostics collected during a resolution session.

use std::collections::BTreeSet;

/// A reference that did not resolve to a literal.
///
/// Diagnostics never change the output; they are reported after a mode has
/// been extracted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReferenceDiagnostic {
    /// A placeholder points at a path that does not exist
    UnresolvedReference { path: String },
    /// Resolution stopped at the nesting limit (usually a reference cycle)
    DepthExceeded { raw: String, depth: usize },
}

impl std::fmt::Display for ReferenceDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceDiagnostic::UnresolvedReference { path } => {
                write!(f, "reference '{{{}}}' does not resolve to a token", path)
            }
            ReferenceDiagnostic::DepthExceeded { raw, depth } => {
                write!(
                    f,
                    "stopped resolving '{}' after {} nested references (possible cycle)",
                    raw, depth
                )
            }
        }
    }
}

/// Snapshot of a session's diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    pub unresolved: BTreeSet<String>,
    pub depth_limited: BTreeSet<String>,
    pub depth_limit: usize,
}

impl ResolutionReport {
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty() && self.depth_limited.is_empty()
    }

    /// All diagnostics, unresolved references first.
    pub fn diagnostics(&self) -> Vec<ReferenceDiagnostic> {
        let unresolved = self
            .unresolved
            .iter()
            .map(|path| ReferenceDiagnostic::UnresolvedReference { path: path.clone() });
        let limited = self
            .depth_limited
            .iter()
            .map(|raw| ReferenceDiagnostic::DepthExceeded {
                raw: raw.clone(),
                depth: self.depth_limit,
            });
        unresolved.chain(limited).collect()
    }
}
