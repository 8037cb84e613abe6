// Application configuration
//
// Settings are optional: a missing `applyform.toml` yields the defaults, and
// `APPLYFORM__*` environment variables override individual keys (e.g.
// `APPLYFORM__UI__TICK_MS=50`). Only ambient behavior is configurable; the
// form itself is fixed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Overrides the resolved log folder when set.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Event-poll tick for the terminal UI, in milliseconds.
    pub tick_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            logging: LoggingConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig { tick_ms: 100 }
    }
}

impl AppConfig {
    /// Load `applyform.toml` from the working directory (if present) plus
    /// `APPLYFORM__*` environment overrides.
    pub fn load() -> Result<AppConfig> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("applyform").required(false))
            .add_source(
                config::Environment::with_prefix("APPLYFORM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// Load a specific configuration file (no environment overrides).
    pub fn load_from(path: &Path) -> Result<AppConfig> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .with_context(|| format!("Failed to read configuration file {:?}", path))?;

        settings
            .try_deserialize()
            .context("Invalid configuration values")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_when_nothing_is_configured() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.ui.tick_ms, 100);
        assert!(cfg.logging.dir.is_none());
    }

    #[test]
    fn values_load_from_a_toml_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("applyform.toml");
        let mut f = std::fs::File::create(&path).expect("create config");
        writeln!(f, "[logging]").unwrap();
        writeln!(f, "dir = \"/tmp/applyform-test-logs\"").unwrap();
        writeln!(f, "[ui]").unwrap();
        writeln!(f, "tick_ms = 50").unwrap();

        let cfg = AppConfig::load_from(&path).expect("config parses");
        assert_eq!(cfg.ui.tick_ms, 50);
        assert_eq!(
            cfg.logging.dir.as_deref(),
            Some(Path::new("/tmp/applyform-test-logs"))
        );
    }

    #[test]
    fn partial_files_keep_defaults_for_missing_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("applyform.toml");
        let mut f = std::fs::File::create(&path).expect("create config");
        writeln!(f, "[logging]").unwrap();
        writeln!(f, "dir = \"/tmp/elsewhere\"").unwrap();

        let cfg = AppConfig::load_from(&path).expect("config parses");
        assert_eq!(cfg.ui.tick_ms, 100);
        assert!(cfg.logging.dir.is_some());
    }
}
