use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

const FILENAME: &str = "state.yaml";
const APP_DIR: &str = "giftdeck";

/// Persisted unlock state: the last accepted pincode, so the recipient is
/// not re-prompted on every launch, and which gifts have been opened.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnlockStore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub opened: BTreeSet<String>,
}

impl UnlockStore {
    pub fn path() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
    }

    pub fn load() -> Self {
        Self::path()
            .and_then(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn save_pincode(&mut self, pincode: &str) {
        self.pincode = Some(pincode.to_string());
    }

    pub fn forget_pincode(&mut self) {
        self.pincode = None;
    }

    /// Record a finished presentation. Returns true if this was the first
    /// time the gift was opened.
    pub fn mark_opened(&mut self, gift: &str) -> bool {
        self.opened.insert(gift.to_string())
    }

    pub fn is_opened(&self, gift: &str) -> bool {
        self.opened.contains(gift)
    }
}
