use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::formatter::FormatterClass;
use crate::registry::UnknownPolicy;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "FIELDFMT_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldfmtConfig {
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Named formatter definitions, keyed by field-type name
    #[serde(default)]
    pub formatters: BTreeMap<String, FormatterClass>,
}

/// Default file locations, under `~/.fieldfmt` unless `base_dir` is set
#[derive(Debug, Clone, Default)]
pub struct PathsConfig {
    pub base_dir: Option<String>,
}

impl PathsConfig {
    pub fn base_dir(&self) -> PathBuf {
        if let Some(ref base) = self.base_dir {
            PathBuf::from(base)
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".fieldfmt")
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.base_dir().join("config.toml")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir().join("logs")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub unknown: UnknownPolicy,
}

/// Starter configuration written by `fieldfmt config init`
pub const STARTER_CONFIG: &str = r###"# fieldfmt configuration
#
# Each [formatters.<name>] table registers a formatter for a field type.
# Kinds: plain, mask, affix, grouping, escape, chain.

[registry]
# What to do with an unregistered name: "error" or "plain"
unknown = "error"

[formatters.phone]
kind = "mask"
pattern = "## ## ## ##"

[formatters.thousands]
kind = "grouping"
size = 3
separator = " "
align = "right"

[formatters.kr]
kind = "affix"
prefix = "kr "
suffix = ",-"

[formatters.amount]
kind = "chain"
steps = ["thousands", "kr"]
"###;

impl FieldfmtConfig {
    /// Resolve which config file to read: explicit path, then `FIELDFMT_CONFIG`,
    /// then `~/.fieldfmt/config.toml`
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => PathsConfig::default().config_file(),
        }
    }

    /// Load the config, falling back to defaults when the file does not exist
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config_file = Self::resolve_path(explicit);

        if config_file.exists() {
            let shown = config_file.display();
            let content = std::fs::read_to_string(&config_file)
                .with_context(|| format!("Failed to read config file {}", shown))?;
            Self::from_toml_str(&content)
                .with_context(|| format!("Failed to parse config file {}", shown))
        } else {
            tracing::debug!(
                component = "config",
                path = %config_file.display(),
                "No config file, using defaults"
            );
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid config TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::FormatterKind;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = FieldfmtConfig::from_toml_str("").unwrap();
        assert!(config.formatters.is_empty());
        assert_eq!(config.registry.unknown, UnknownPolicy::Error);
    }

    #[test]
    fn test_starter_config_parses() {
        let config = FieldfmtConfig::from_toml_str(STARTER_CONFIG).unwrap();
        assert_eq!(config.formatters.len(), 4);
        assert_eq!(config.formatters["phone"].kind(), FormatterKind::Mask);
        assert_eq!(config.formatters["amount"].kind(), FormatterKind::Chain);
    }

    #[test]
    fn test_starter_config_literal_is_complete() {
        assert!(STARTER_CONFIG.contains("pattern = \"## ## ## ##\""));
        assert!(STARTER_CONFIG.trim_end().ends_with("steps = [\"thousands\", \"kr\"]"));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result = FieldfmtConfig::from_toml_str("[paths]\nbase_dir = \"/srv/x\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_policy_plain() {
        let config = FieldfmtConfig::from_toml_str("[registry]\nunknown = \"plain\"").unwrap();
        assert_eq!(config.registry.unknown, UnknownPolicy::Plain);
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = FieldfmtConfig::resolve_path(Some(Path::new("/tmp/custom.toml")));
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    fn test_base_dir_override() {
        let paths = PathsConfig {
            base_dir: Some("/srv/fieldfmt".to_string()),
        };
        assert_eq!(paths.config_file(), PathBuf::from("/srv/fieldfmt/config.toml"));
        assert_eq!(paths.logs_dir(), PathBuf::from("/srv/fieldfmt/logs"));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = FieldfmtConfig::from_toml_str(STARTER_CONFIG).unwrap();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = FieldfmtConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.formatters, config.formatters);
    }
}
