use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "giftdeck";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

/// Remote content provider. When set, a bare `giftdeck` invocation with no
/// source argument resolves pincodes against this endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windowed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `giftdeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# Giftdeck configuration\n{yaml}");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn volume(&self) -> f32 {
        self.defaults
            .as_ref()
            .and_then(|d| d.volume)
            .unwrap_or(1.0)
            .clamp(0.0, 1.0)
    }

    pub fn windowed(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.windowed)
            .unwrap_or(false)
    }

    pub fn provider_url(&self) -> Option<&str> {
        self.provider.as_ref().and_then(|p| p.url.as_deref())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "provider.url" => {
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    anyhow::bail!("Invalid provider URL: {value}. Must start with http(s)://.");
                }
                self.provider.get_or_insert_with(ProviderConfig::default).url =
                    Some(value.to_string());
            }
            "defaults.windowed" => {
                let parsed: bool = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid value: {value}. Must be true or false."))?;
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .windowed = Some(parsed);
            }
            "defaults.volume" => {
                let parsed: f32 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid volume: {value}. Must be a number."))?;
                if !(0.0..=1.0).contains(&parsed) {
                    anyhow::bail!("Invalid volume: {value}. Must be between 0.0 and 1.0.");
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .volume = Some(parsed);
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: provider.url, defaults.windowed, defaults.volume"
            ),
        }
        Ok(())
    }
}
