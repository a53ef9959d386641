// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Strongly-typed configuration for Plugin Harbor.
//!
//! One small section covering where mirrors live and how manifests are
//! recognized, loadable from a TOML file with environment overrides on
//! top.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for configuration loading
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Mirror and metadata-extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MirrorConfig {
    /// Directory the local mirror tree lives under
    pub mirror_root: PathBuf,
    /// Branch queried when a manifest is requested without a version
    pub default_branch: String,
    /// Filename suffix marking a file as a package manifest
    pub manifest_suffix: String,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            mirror_root: default_mirror_root(),
            default_branch: "master".to_string(),
            manifest_suffix: ".jquery.json".to_string(),
        }
    }
}

impl MirrorConfig {
    /// Load configuration from a TOML file, then apply environment
    /// overrides.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&raw)?;
        config.apply_env();
        Ok(config)
    }

    /// Defaults plus environment overrides, for callers without a
    /// config file.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// `PH_MIRROR_ROOT` relocates the mirror tree wholesale.
    fn apply_env(&mut self) {
        if let Ok(root) = std::env::var("PH_MIRROR_ROOT") {
            if !root.is_empty() {
                self.mirror_root = PathBuf::from(root);
            }
        }
    }
}

/// Platform data directory default, e.g.
/// `~/.local/share/plugin-harbor/mirrors` on Linux.
fn default_mirror_root() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
    path.push("plugin-harbor");
    path.push("mirrors");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MirrorConfig::default();
        assert_eq!(config.default_branch, "master");
        assert_eq!(config.manifest_suffix, ".jquery.json");
        assert!(config.mirror_root.ends_with("plugin-harbor/mirrors"));
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "mirror-root = \"/srv/mirrors\"\ndefault-branch = \"trunk\"\n",
        )
        .unwrap();

        let config = MirrorConfig::load(&path).unwrap();
        assert_eq!(config.mirror_root, PathBuf::from("/srv/mirrors"));
        assert_eq!(config.default_branch, "trunk");
        // Unset keys fall back to defaults
        assert_eq!(config.manifest_suffix, ".jquery.json");
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "mirror-root = [not toml").unwrap();

        assert!(matches!(
            MirrorConfig::load(&path),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = MirrorConfig::load(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_env_override_relocates_mirror_root() {
        std::env::set_var("PH_MIRROR_ROOT", "/var/lib/mirrors");
        let config = MirrorConfig::from_env();
        std::env::remove_var("PH_MIRROR_ROOT");

        assert_eq!(config.mirror_root, PathBuf::from("/var/lib/mirrors"));
        assert_eq!(config.default_branch, "master");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = MirrorConfig {
            mirror_root: PathBuf::from("/srv/mirrors"),
            default_branch: "main".to_string(),
            manifest_suffix: ".plugin.json".to_string(),
        };
        let encoded = toml::to_string(&config).unwrap();
        let decoded: MirrorConfig = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded, config);
    }
}
