use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_dictionary")]
    pub dictionary: PathBuf,

    #[serde(default = "default_buckets")]
    pub buckets: usize,

    #[serde(default = "default_show_misspelled")]
    pub show_misspelled: bool,
}

fn default_dictionary() -> PathBuf {
    PathBuf::from("dictionaries/large")
}

fn default_buckets() -> usize {
    crate::DEFAULT_BUCKETS.get()
}

fn default_show_misspelled() -> bool {
    true
}

/// One config file. Keys left out of the file stay `None` and do not
/// override lower layers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    dictionary: Option<PathBuf>,
    buckets: Option<usize>,
    show_misspelled: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: default_dictionary(),
            buckets: default_buckets(),
            show_misspelled: default_show_misspelled(),
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(dictionary: Option<PathBuf>, buckets: Option<usize>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                debug!("Reading global config {}", global_path.display());
                config = config.merge(Self::from_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(".wordcheck.toml");
        if local_path.exists() {
            debug!("Reading local config {}", local_path.display());
            config = config.merge(Self::from_file(&local_path)?);
        }

        if let Some(dictionary) = dictionary {
            config.dictionary = dictionary;
        }
        if let Some(buckets) = buckets {
            config.buckets = buckets;
        }

        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<ConfigLayer> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, layer: ConfigLayer) -> Self {
        if let Some(dictionary) = layer.dictionary {
            self.dictionary = dictionary;
        }
        if let Some(buckets) = layer.buckets {
            self.buckets = buckets;
        }
        if let Some(show_misspelled) = layer.show_misspelled {
            self.show_misspelled = show_misspelled;
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if self.buckets == 0 {
            bail!("Invalid configuration: buckets must be at least 1");
        }
        Ok(())
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "wordcheck").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
