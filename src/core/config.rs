//! Persistent configuration stored as TOML in the platform config directory.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::core::settings::ModelId;

/// On-disk defaults applied at startup unless overridden on the command line.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_model: Option<ModelId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_temperature: Option<f64>,
}

impl Config {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_from_path(&Self::get_config_path())
    }

    fn load_from_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to_path(&Self::get_config_path())
    }

    fn save_to_path(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Path of the config file. `CHARMEUR_CONFIG_DIR` overrides the platform
    /// default, which the tests rely on.
    pub fn get_config_path() -> PathBuf {
        if let Ok(dir) = env::var("CHARMEUR_CONFIG_DIR") {
            return PathBuf::from(dir).join("config.toml");
        }
        ProjectDirs::from("org", "charmeur", "charmeur")
            .expect("Failed to determine config directory")
            .config_dir()
            .join("config.toml")
    }

    /// Print every config key with its current value.
    pub fn print_all(&self) {
        println!("Config file: {}", Self::get_config_path().display());
        match self.default_model {
            Some(model) => println!("  default-model: {model}"),
            None => println!("  default-model: (unset)"),
        }
        match self.default_temperature {
            Some(temperature) => println!("  default-temperature: {temperature}"),
            None => println!("  default-temperature: (unset)"),
        }
    }
}
