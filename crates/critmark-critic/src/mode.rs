//! Render mode and extension configuration.

use std::fmt;
use std::str::FromStr;

/// How edit marks are rendered.
///
/// Fixed for a whole document render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CriticMode {
    /// Annotate every mark with `<ins>`, `<del>`, `<mark>` and comment spans.
    #[default]
    View,
    /// Keep accepted changes: insertions stay, deletions go.
    Accept,
    /// Keep the original text: insertions go, deletions stay.
    Reject,
}

impl CriticMode {
    /// Resolution applied in this mode, or `None` when marks are annotated.
    #[must_use]
    pub fn resolution(self) -> Option<Resolution> {
        match self {
            Self::View => None,
            Self::Accept => Some(Resolution::Accept),
            Self::Reject => Some(Resolution::Reject),
        }
    }

    /// Lowercase mode name as used in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Accept => "accept",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for CriticMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown critic mode '{0}' (expected 'view', 'accept' or 'reject')")]
pub struct ParseModeError(String);

impl FromStr for CriticMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Self::View),
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            other => Err(ParseModeError(other.to_owned())),
        }
    }
}

/// Which side of every edit mark survives resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Apply the proposed edits.
    Accept,
    /// Discard the proposed edits.
    Reject,
}

/// Configuration for [`CriticExtension`](crate::CriticExtension).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct CriticConfig {
    /// Render mode. Default: `view`.
    pub mode: CriticMode,
    /// Keep raw markup in view mode.
    ///
    /// Accepted for compatibility; it does not change the output.
    pub raw_view: bool,
}

impl CriticConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the render mode.
    #[must_use]
    pub fn with_mode(mut self, mode: CriticMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the raw view flag.
    #[must_use]
    pub fn with_raw_view(mut self, raw_view: bool) -> Self {
        self.raw_view = raw_view;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("view".parse(), Ok(CriticMode::View));
        assert_eq!("accept".parse(), Ok(CriticMode::Accept));
        assert_eq!("reject".parse(), Ok(CriticMode::Reject));
    }

    #[test]
    fn test_parse_unknown_mode() {
        let err = "approve".parse::<CriticMode>().unwrap_err();
        assert!(err.to_string().contains("'approve'"));
        // Case matters, like the config file values
        assert!("View".parse::<CriticMode>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for mode in [CriticMode::View, CriticMode::Accept, CriticMode::Reject] {
            assert_eq!(mode.to_string().parse(), Ok(mode));
        }
    }

    #[test]
    fn test_resolution() {
        assert_eq!(CriticMode::View.resolution(), None);
        assert_eq!(CriticMode::Accept.resolution(), Some(Resolution::Accept));
        assert_eq!(CriticMode::Reject.resolution(), Some(Resolution::Reject));
    }

    #[test]
    fn test_config_defaults_and_builder() {
        let config = CriticConfig::new();
        assert_eq!(config.mode, CriticMode::View);
        assert!(!config.raw_view);

        let config = config.with_mode(CriticMode::Reject).with_raw_view(true);
        assert_eq!(config.mode, CriticMode::Reject);
        assert!(config.raw_view);
    }
}
