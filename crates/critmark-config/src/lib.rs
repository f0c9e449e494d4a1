//! Configuration management for critmark.
//!
//! Parses `critmark.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [critic]
//! mode = "view"      # view | accept | reject
//! raw_view = false
//!
//! [markdown]
//! gfm = true
//! ```

use std::path::{Path, PathBuf};

use critmark_critic::{CriticConfig, CriticMode};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override critic render mode.
    pub mode: Option<CriticMode>,
    /// Override critic raw view flag.
    pub raw_view: Option<bool>,
    /// Override GitHub Flavored Markdown extensions.
    pub gfm: Option<bool>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "critmark.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Critic markup configuration.
    pub critic: CriticConfig,
    /// Markdown parser configuration.
    pub markdown: MarkdownConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Markdown parser configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Enable tables, strikethrough, task lists and the other GFM extensions.
    pub gfm: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self { gfm: true }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error, including unknown critic modes.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `critmark.toml` in current directory and parents,
    /// falling back to defaults when none exists.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(mode) = settings.mode {
            self.critic.mode = mode;
        }
        if let Some(raw_view) = settings.raw_view {
            self.critic.raw_view = raw_view;
        }
        if let Some(gfm) = settings.gfm {
            self.markdown.gfm = gfm;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.critic.mode, CriticMode::View);
        assert!(!config.critic.raw_view);
        assert!(config.markdown.gfm);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.critic, CriticConfig::default());
        assert!(config.markdown.gfm);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[critic]
mode = "reject"
raw_view = true

[markdown]
gfm = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.critic.mode, CriticMode::Reject);
        assert!(config.critic.raw_view);
        assert!(!config.markdown.gfm);
    }

    #[test]
    fn test_parse_partial_critic_section() {
        let toml = r#"
[critic]
mode = "accept"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.critic.mode, CriticMode::Accept);
        assert!(!config.critic.raw_view);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let toml = r#"
[critic]
mode = "approve"
"#;
        let err = toml::from_str::<Config>(toml).unwrap_err();
        assert!(err.to_string().contains("approve"));
    }

    #[test]
    fn test_apply_cli_settings_mode() {
        let mut config = Config::default();
        let overrides = CliSettings {
            mode: Some(CriticMode::Accept),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.critic.mode, CriticMode::Accept);
        assert!(!config.critic.raw_view); // Unchanged
        assert!(config.markdown.gfm); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_multiple() {
        let mut config = Config::default();
        let overrides = CliSettings {
            mode: Some(CriticMode::Reject),
            raw_view: Some(true),
            gfm: Some(false),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.critic.mode, CriticMode::Reject);
        assert!(config.critic.raw_view);
        assert!(!config.markdown.gfm);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config: Config = toml::from_str("[critic]\nmode = \"accept\"").unwrap();

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.critic.mode, CriticMode::Accept);
        assert!(config.markdown.gfm);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[critic]\nmode = \"reject\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.critic.mode, CriticMode::Reject);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_explicit_path_with_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[critic]\nmode = \"reject\"\n").unwrap();
        let settings = CliSettings {
            mode: Some(CriticMode::View),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.critic.mode, CriticMode::View);
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(
            matches!(err, ConfigError::NotFound(ref p) if *p == path),
            "Expected ConfigError::NotFound, got {err:?}"
        );
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[critic\nmode = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(
            matches!(err, ConfigError::Parse(_)),
            "Expected ConfigError::Parse, got {err:?}"
        );
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&config_path, "").unwrap();
        let nested = dir.path().join("docs").join("chapter");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_config(&nested), Some(config_path));
    }

    #[test]
    fn test_discover_config_prefers_closest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();
        let nested = dir.path().join("docs");
        std::fs::create_dir_all(&nested).unwrap();
        let closest = nested.join(CONFIG_FILENAME);
        std::fs::write(&closest, "").unwrap();

        assert_eq!(Config::discover_config(&nested), Some(closest));
    }
}
