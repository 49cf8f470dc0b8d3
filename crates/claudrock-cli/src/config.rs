use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::CONFIG_FILE_NAME;
use crate::family::Family;

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Family used when `--family` is not given
    pub family: Family,
    /// Region used when `--region` is not given; outranks `AWS_REGION`
    pub region: Option<String>,
    /// Runtime endpoint override
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// Default chat model for the Claude 3 client
    pub claude3_model: String,
    /// Default chat model for the Claude 4 client
    pub claude4_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            family: Family::default(),
            region: None,
            base_url: None,
            timeout_seconds: None,
            claude3_model: Family::Claude3.builtin_chat_model().to_string(),
            claude4_model: Family::Claude4.builtin_chat_model().to_string(),
        }
    }
}

impl Config {
    pub fn load(base_path: &Path) -> Result<Config> {
        let config_path = base_path.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            // Create default config
            let default_config = Config::default();
            default_config.save(base_path)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    pub fn save(&self, base_path: &Path) -> Result<()> {
        let config_path = base_path.join(CONFIG_FILE_NAME);

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn default_model(&self, family: Family) -> &str {
        match family {
            Family::Claude3 => &self.claude3_model,
            Family::Claude4 => &self.claude4_model,
        }
    }

    pub fn set_default_model(&mut self, family: Family, model: &str) {
        match family {
            Family::Claude3 => self.claude3_model = model.to_string(),
            Family::Claude4 => self.claude4_model = model.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("claudrock");

        let config = Config::load(&base).unwrap();

        assert_eq!(config, Config::default());
        assert!(base.join(CONFIG_FILE_NAME).exists());
        assert_eq!(config.default_model(Family::Claude3), "haiku");
        assert_eq!(config.default_model(Family::Claude4), "sonnet4");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let mut config = Config {
            family: Family::Claude3,
            region: Some("eu-west-1".to_string()),
            ..Config::default()
        };
        config.set_default_model(Family::Claude3, "sonnet_v2");
        config.save(dir.path()).unwrap();

        let reloaded = Config::load(dir.path()).unwrap();
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.default_model(Family::Claude3), "sonnet_v2");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "family = \"claude3\"\nregion = \"us-west-2\"\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.family, Family::Claude3);
        assert_eq!(config.region.as_deref(), Some("us-west-2"));
        assert_eq!(config.claude4_model, "sonnet4");
        assert!(config.base_url.is_none());
    }
}
