use crate::checker::session::DEFAULT_IDLE_TIMEOUT;
use crate::checker::suggestions::MAX_SUGGESTIONS;
use crate::checker::CheckerSettings;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub language: String,
    pub dictionary_dir: Option<PathBuf>,
    pub custom_dictionary: Option<PathBuf>,
    pub enable_number_key_selection: bool,
    pub idle_timeout_ms: u64,
    pub max_suggestions: usize,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_idle_timeout_ms() -> u64 {
    DEFAULT_IDLE_TIMEOUT.as_millis() as u64
}

/// One config file as written: only the keys it mentions are set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct ConfigLayer {
    language: Option<String>,
    dictionary_dir: Option<PathBuf>,
    custom_dictionary: Option<PathBuf>,
    enable_number_key_selection: Option<bool>,
    idle_timeout_ms: Option<u64>,
    max_suggestions: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            dictionary_dir: None,
            custom_dictionary: None,
            enable_number_key_selection: true,
            idle_timeout_ms: default_idle_timeout_ms(),
            max_suggestions: MAX_SUGGESTIONS,
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(
        language: Option<String>,
        dictionary_dir: Option<PathBuf>,
        custom_dictionary: Option<PathBuf>,
    ) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config = config.merge(Self::from_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(".spellpick.toml");
        if local_path.exists() {
            config = config.merge(Self::from_file(&local_path)?);
        }

        if let Some(language) = language {
            config.language = language;
        }
        if dictionary_dir.is_some() {
            config.dictionary_dir = dictionary_dir;
        }
        if custom_dictionary.is_some() {
            config.custom_dictionary = custom_dictionary;
        }

        if config.custom_dictionary.is_none() {
            config.custom_dictionary = Self::default_custom_dict_path();
        }

        if let Some(path) = &config.custom_dictionary {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .context("Failed to create custom dictionary directory")?;
            }
            if !path.exists() {
                fs::write(path, "").context("Failed to create custom dictionary file")?;
            }
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<ConfigLayer> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Apply the keys `layer` actually sets; absent keys keep the current value.
    fn merge(mut self, layer: ConfigLayer) -> Self {
        if let Some(language) = layer.language {
            self.language = language;
        }
        if layer.dictionary_dir.is_some() {
            self.dictionary_dir = layer.dictionary_dir;
        }
        if layer.custom_dictionary.is_some() {
            self.custom_dictionary = layer.custom_dictionary;
        }
        if let Some(enabled) = layer.enable_number_key_selection {
            self.enable_number_key_selection = enabled;
        }
        if let Some(timeout) = layer.idle_timeout_ms {
            self.idle_timeout_ms = timeout;
        }
        if let Some(max) = layer.max_suggestions {
            self.max_suggestions = max;
        }
        self
    }

    /// Settings handed to the checker.
    pub fn checker_settings(&self) -> CheckerSettings {
        CheckerSettings {
            number_key_selection: self.enable_number_key_selection,
            idle_timeout: Duration::from_millis(self.idle_timeout_ms),
            max_suggestions: self.max_suggestions.clamp(1, MAX_SUGGESTIONS),
        }
    }

    /// Directory holding one `<code>/index.{aff,dic}` pair per installed language.
    pub fn resolved_dictionary_dir(&self) -> Option<PathBuf> {
        self.dictionary_dir
            .clone()
            .or_else(|| Self::data_dir().map(|dir| dir.join("dic")))
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellpick").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn default_custom_dict_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellpick").map(|dirs| dirs.config_dir().join("custom.txt"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellpick").map(|dirs| dirs.data_dir().to_path_buf())
    }
}
