//! CLI configuration management

use ember_evm::memory::DEFAULT_MEMORY_LIMIT;
use ember_evm::InterpreterConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Maximum instructions per execution (0 = unlimited)
    #[serde(default = "default_step_limit")]
    pub step_limit: u64,
    /// Maximum memory size in bytes
    #[serde(default = "default_memory_limit")]
    pub memory_limit: usize,
    /// Log filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_step_limit() -> u64 {
    ember_evm::config::DEFAULT_STEP_LIMIT
}

fn default_memory_limit() -> usize {
    DEFAULT_MEMORY_LIMIT
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_limit: default_step_limit(),
            memory_limit: default_memory_limit(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".ember"))
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load config from file or return default
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| {
                if path.exists() {
                    std::fs::read_to_string(&path).ok()
                } else {
                    None
                }
            })
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "Cannot determine config path")
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;

        std::fs::write(path, content)
    }

    /// Interpreter guards derived from this config
    pub fn interpreter_config(&self) -> InterpreterConfig {
        let step_limit = (self.step_limit > 0).then_some(self.step_limit);
        InterpreterConfig::default()
            .with_step_limit(step_limit)
            .with_memory_limit(self.memory_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.step_limit, 1_000_000);
        assert_eq!(config.memory_limit, 32 * 1024 * 1024);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_config_serialize() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("step_limit"));
        assert!(toml.contains("log_level"));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            step_limit = 500
            log_level = "debug"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.step_limit, 500);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.memory_limit, DEFAULT_MEMORY_LIMIT);
    }

    #[test]
    fn test_interpreter_config() {
        let mut config = Config::default();
        assert_eq!(config.interpreter_config().step_limit, Some(1_000_000));

        config.step_limit = 0;
        config.memory_limit = 1024;
        let interp = config.interpreter_config();
        assert_eq!(interp.step_limit, None);
        assert_eq!(interp.memory_limit, 1024);
    }
}
