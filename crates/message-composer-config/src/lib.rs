use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Marker `{field}` in config file at {config_path} must not be empty")]
    EmptyMarker {
        config_path: PathBuf,
        field: &'static str,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub markers: MarkerConfig,
}

/// Overrides for the formatting markers. Unset fields keep the built-in marker.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough_open: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough_close: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_fence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    /// Characters that end a word, e.g. `".,?!"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_punctuation: Option<String>,
}

impl MarkerConfig {
    /// Name of the first marker set to an empty string. An empty
    /// `word_punctuation` is allowed and means no punctuation ends a word.
    pub fn empty_marker(&self) -> Option<&'static str> {
        [
            ("bold", &self.bold),
            ("italics", &self.italics),
            ("strikethrough_open", &self.strikethrough_open),
            ("strikethrough_close", &self.strikethrough_close),
            ("inline_code", &self.inline_code),
            ("code_fence", &self.code_fence),
            ("quote", &self.quote),
        ]
        .into_iter()
        .find(|(_, value)| value.as_deref() == Some(""))
        .map(|(field, _)| field)
    }
}

impl Config {
    /// Load the config at `config_path`; a missing file yields the defaults
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if let Some(field) = config.markers.empty_marker() {
            return Err(ConfigError::EmptyMarker {
                config_path: config_path.to_path_buf(),
                field,
            });
        }
        Ok(config)
    }

    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/message-composer");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expand a leading tilde and environment variables in a user-supplied path
    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
