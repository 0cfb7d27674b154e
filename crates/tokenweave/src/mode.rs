//! Brand/theme modes.

use std::fmt;

/// One (brand, theme) combination.
///
/// # Example
///
/// ```rust
/// use tokenweave::Mode;
///
/// let mode = Mode::new("Luxury", "Night");
/// assert_eq!(mode.suffix(), "luxury_night");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mode {
    pub brand: String,
    pub theme: String,
}

impl Mode {
    pub fn new(brand: impl Into<String>, theme: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            theme: theme.into(),
        }
    }

    /// Lowercase `brand_theme`, used for output directories and package names.
    pub fn suffix(&self) -> String {
        format!("{}_{}", self.brand, self.theme).to_lowercase()
    }

    /// Whether this mode's theme is the configured dark theme.
    pub fn is_dark(&self, dark_theme: &str) -> bool {
        self.theme.eq_ignore_ascii_case(dark_theme)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.brand, self.theme)
    }
}

/// Which modes a run exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportScope {
    /// The default brand and theme, written into flat format directories.
    #[default]
    Default,
    /// Every configured brand × theme, each in its own subdirectory.
    AllModes,
}

impl ExportScope {
    pub fn is_multi_mode(self) -> bool {
        matches!(self, ExportScope::AllModes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_is_lowercase() {
        assert_eq!(Mode::new("Performance", "Day").suffix(), "performance_day");
    }

    #[test]
    fn test_is_dark() {
        assert!(Mode::new("Default", "Night").is_dark("Night"));
        assert!(Mode::new("Default", "night").is_dark("Night"));
        assert!(!Mode::new("Default", "Day").is_dark("Night"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Mode::new("Luxury", "Day").to_string(), "Luxury/Day");
    }

    #[test]
    fn test_default_scope() {
        assert_eq!(ExportScope::default(), ExportScope::Default);
        assert!(!ExportScope::Default.is_multi_mode());
        assert!(ExportScope::AllModes.is_multi_mode());
    }
}
