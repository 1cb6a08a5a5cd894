// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::DEFAULT_LOGO_PATH;
use crate::logging::LoggingConfig;
use crate::watermark::WatermarkConfig;

fn default_logo_path() -> String {
    DEFAULT_LOGO_PATH.to_string()
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the overlay logo (default: "logo.png")
    #[serde(default = "default_logo_path")]
    pub logo_path: String,

    /// Watermark engine tunables
    #[serde(default)]
    pub watermark: WatermarkConfig,

    /// Log level and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logo_path: default_logo_path(),
            watermark: WatermarkConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, String> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| e.to_string())?;

        // Resolve every referenced variable up front so a missing one names itself
        let mut missing = None;
        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    missing.get_or_insert_with(|| var_name.to_string());
                    String::new()
                }
            }
        });

        if let Some(var_name) = missing {
            return Err(format!(
                "Environment variable '{}' is referenced but not set",
                var_name
            ));
        }

        serde_yaml::from_str(&substituted).map_err(|e| e.to_string())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.logo_path.trim().is_empty() {
            return Err("logo_path cannot be empty".to_string());
        }

        self.watermark.validate()?;
        self.logging.validate()?;

        Ok(())
    }
}
