//! TOML-based configuration persistence for the panel application.
//!
//! Reads and writes [`PanelConfig`] to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\SimTX\config.toml`
//! - Linux:    `~/.config/simtx/config.toml`
//! - macOS:    `~/Library/Application Support/SimTX/config.toml`
//!
//! Every field carries a `#[serde(default = ...)]` so a partial file – or no
//! file at all on first run – still yields a working configuration. Example:
//!
//! ```toml
//! [panel]
//! default_mode = "hex"
//! log_level = "debug"
//!
//! [timing]
//! message_period_ms = 250
//! event_tick_ms = 250
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use simtx_core::InputMode;
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PanelConfig {
    pub panel: PanelSection,
    pub timing: TimingSection,
}

/// Panel behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PanelSection {
    /// Input interpretation active at startup: `"text"` or `"hex"`.
    #[serde(default = "default_mode")]
    pub default_mode: InputMode,
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Simulated host timing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingSection {
    /// Milliseconds between transmit events (the channel message period).
    #[serde(default = "default_message_period_ms")]
    pub message_period_ms: u64,
    /// Milliseconds between simulated device timer ticks.
    #[serde(default = "default_event_tick_ms")]
    pub event_tick_ms: u64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_mode() -> InputMode {
    InputMode::Text
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_message_period_ms() -> u64 {
    250
}
fn default_event_tick_ms() -> u64 {
    250
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            panel: PanelSection::default(),
            timing: TimingSection::default(),
        }
    }
}

impl Default for PanelSection {
    fn default() -> Self {
        Self {
            default_mode: default_mode(),
            log_level: default_log_level(),
        }
    }
}

impl Default for TimingSection {
    fn default() -> Self {
        Self {
            message_period_ms: default_message_period_ms(),
            event_tick_ms: default_event_tick_ms(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config
/// base directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads [`PanelConfig`] from disk, returning `PanelConfig::default()` if
/// the file does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not
/// found", and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config() -> Result<PanelConfig, ConfigError> {
    let path = config_file_path()?;

    match std::fs::read_to_string(&path) {
        Ok(content) => {
            let cfg: PanelConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PanelConfig::default()),
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Persists `config` to disk, creating the config directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &PanelConfig) -> Result<(), ConfigError> {
    let path = config_file_path()?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(&path, content).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(())
}

/// Resolves the platform config base directory including the app folder.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("SimTX"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("simtx"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("SimTX")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        // Arrange / Act
        let cfg = PanelConfig::default();

        // Assert
        assert_eq!(cfg.panel.default_mode, InputMode::Text);
        assert_eq!(cfg.panel.log_level, "info");
        assert_eq!(cfg.timing.message_period_ms, 250);
        assert_eq!(cfg.timing.event_tick_ms, 250);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        // Arrange
        let mut cfg = PanelConfig::default();
        cfg.panel.default_mode = InputMode::HexBytes;
        cfg.timing.message_period_ms = 500;

        // Act
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let restored: PanelConfig = toml::from_str(&toml_str).expect("deserialize");

        // Assert
        assert_eq!(cfg, restored);
    }

    #[test]
    fn test_deserialize_minimal_toml_uses_defaults() {
        // Arrange: minimal TOML with only the section headers
        let toml_str = r#"
[panel]
[timing]
"#;

        // Act
        let cfg: PanelConfig = toml::from_str(toml_str).expect("deserialize minimal");

        // Assert
        assert_eq!(cfg, PanelConfig::default());
    }

    #[test]
    fn test_deserialize_partial_section_overrides_defaults() {
        // Arrange
        let toml_str = r#"
[panel]
default_mode = "hex"
[timing]
event_tick_ms = 1000
"#;

        // Act
        let cfg: PanelConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.panel.default_mode, InputMode::HexBytes);
        assert_eq!(cfg.timing.event_tick_ms, 1000);
        // Unspecified fields keep their defaults
        assert_eq!(cfg.panel.log_level, "info");
        assert_eq!(cfg.timing.message_period_ms, 250);
    }

    #[test]
    fn test_deserialize_invalid_toml_returns_parse_error() {
        let bad_toml = "[[[ not valid toml";
        let result: Result<PanelConfig, toml::de::Error> = toml::from_str(bad_toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_unknown_mode_is_rejected() {
        let toml_str = r#"
[panel]
default_mode = "octal"
[timing]
"#;
        let result: Result<PanelConfig, toml::de::Error> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load_round_trip_via_temp_dir() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("simtx_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let mut cfg = PanelConfig::default();
        cfg.panel.log_level = "debug".to_string();
        cfg.timing.message_period_ms = 125;

        // Act – serialize and write manually (mirrors save_config logic)
        let content = toml::to_string_pretty(&cfg).unwrap();
        std::fs::write(&path, &content).unwrap();
        let loaded: PanelConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        // Assert
        assert_eq!(loaded, cfg);

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_config_file_path_ends_with_config_toml() {
        if let Ok(path) = config_file_path() {
            assert!(
                path.ends_with("config.toml"),
                "config file must be named config.toml, got {path:?}"
            );
        }
        // NoPlatformConfigDir (e.g. in a stripped CI env) is also acceptable.
    }
}
