use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::RankingSnapshot;
use crate::errors::store_context;

/// JSON file holding the latest published ranking
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the stored snapshot. Readers never see a half-written file.
    pub fn save(&self, snapshot: &RankingSnapshot) -> Result<()> {
        self.ensure_parent_dir()?;

        let temp_path = self.temp_path();
        let json = serde_json::to_string_pretty(snapshot).context("Failed to serialize rankings")?;
        fs::write(&temp_path, json).with_context(|| store_context("write", &temp_path))?;
        fs::rename(&temp_path, &self.path).with_context(|| store_context("replace", &self.path))?;

        info!("Saved {} ranked teams to {}", snapshot.teams.len(), self.path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<Option<RankingSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path).with_context(|| store_context("read", &self.path))?;
        let snapshot = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse rankings snapshot {:?}. First 200 chars: {}",
                self.path,
                json.chars().take(200).collect::<String>()
            )
        })?;
        Ok(Some(snapshot))
    }

    /// Stored snapshot, or the empty one when nothing has been published
    pub fn load_or_empty(&self) -> Result<RankingSnapshot> {
        Ok(self.load()?.unwrap_or_else(RankingSnapshot::empty))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display())),
            _ => Ok(()),
        }
    }
}
