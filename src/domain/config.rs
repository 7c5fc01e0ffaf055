use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::render::PrintMode;

/// File name of the configuration inside the data root.
pub const CONFIG_FILE: &str = "donorlabel.toml";

/// Application configuration.
///
/// Stored as TOML in the data root. Missing or malformed configuration is
/// never fatal; the application falls back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Print immediately when a new record is added, bypassing the print
    /// settings prompt. The fast path always prints exactly one copy.
    pub auto_print: bool,

    /// Document mode used when none is given explicitly.
    pub default_mode: PrintMode,

    /// Settle delay, in milliseconds, between committing a print
    /// configuration and invoking the dispatcher. Gives the print surface
    /// time to re-render with the new copy count before the snapshot is
    /// taken.
    pub dispatch_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_print: false,
            default_mode: PrintMode::Label,
            dispatch_delay_ms: default_dispatch_delay_ms(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration, falling back to defaults.
    ///
    /// A missing file is normal on first run. A malformed file is logged at
    /// warn and otherwise ignored.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(error) => {
                warn!(%error, "configuration unusable, falling back to defaults");
                Self::default()
            }
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or
    /// if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }
}

const fn default_dispatch_delay_ms() -> u64 {
    100
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the
/// domain type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        auto_print: bool,

        #[serde(default)]
        default_mode: PrintMode,

        #[serde(default = "default_dispatch_delay_ms")]
        dispatch_delay_ms: u64,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                auto_print,
                default_mode,
                dispatch_delay_ms,
            } => Self {
                auto_print,
                default_mode,
                dispatch_delay_ms,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            auto_print: config.auto_print,
            default_mode: config.default_mode,
            dispatch_delay_ms: config.dispatch_delay_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\nauto_print = true\ndefault_mode = \"form\"\ndispatch_delay_ms = 0\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert!(config.auto_print);
        assert_eq!(config.default_mode, PrintMode::Form);
        assert_eq!(config.dispatch_delay_ms, 0);
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&tmp.path().join("missing.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_or_default_tolerates_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not toml at all {{{{").unwrap();
        let config = Config::load_or_default(file.path());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        let config = Config {
            auto_print: true,
            default_mode: PrintMode::Form,
            dispatch_delay_ms: 25,
        };
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
