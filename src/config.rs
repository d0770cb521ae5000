use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::widget::Theme;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tree: TreeConfig,
    /// Style overrides keyed by marker class name
    pub theme: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Nodes shallower than this start expanded
    pub depth: usize,
    /// Expand/collapse transition length in milliseconds
    pub animation_ms: u64,
    /// Show node ids next to labels in `print`
    pub show_ids: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            depth: 1,
            animation_ms: 120,
            show_ids: false,
        }
    }
}

/// Longest transition accepted from configuration.
const MAX_ANIMATION_MS: u64 = 5_000;

impl Config {
    /// Default config file location (`$XDG_CONFIG_HOME/sprig/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sprig").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used when present, and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.clone(),
            source,
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tree.animation_ms > MAX_ANIMATION_MS {
            return Err(ConfigError::Invalid(format!(
                "tree.animation_ms must be at most {}",
                MAX_ANIMATION_MS
            )));
        }
        self.theme().map(|_| ())
    }

    /// Default theme with this config's overrides applied.
    pub fn theme(&self) -> Result<Theme, ConfigError> {
        Theme::with_overrides(&self.theme)
    }

    pub fn animation(&self) -> Duration {
        Duration::from_millis(self.tree.animation_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tree.depth, 1);
        assert_eq!(config.animation(), Duration::from_millis(120));
    }

    #[test]
    fn config_serializes_to_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[tree]"));
    }

    #[test]
    fn theme_keys_use_class_names() {
        let config: Config = toml::from_str(
            r#"
[theme]
tree-switcher = "green"
selected = "black on yellow"
"#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.theme.len(), 2);
    }

    #[test]
    fn animation_limit() {
        let mut config = Config::default();
        config.tree.animation_ms = MAX_ANIMATION_MS + 1;
        assert!(config.validate().is_err());
    }
}
