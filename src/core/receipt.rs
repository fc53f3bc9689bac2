/// Install receipt
///
/// Remembers which shell and profile an install patched, so uninstall
/// doesn't have to guess from whatever shell it happens to run in.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallReceipt {
    /// Raw shell identifier detected at install time
    pub shell: String,
    /// Profile file that received the hook block
    pub profile: PathBuf,
    /// Installed binary
    pub binary: PathBuf,
    pub installed_at: DateTime<Utc>,
}

impl InstallReceipt {
    pub fn new(shell: &str, profile: &Path, binary: &Path) -> Self {
        Self {
            shell: shell.to_string(),
            profile: profile.to_path_buf(),
            binary: binary.to_path_buf(),
            installed_at: Utc::now(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a receipt; `Ok(None)` when none was ever written
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_str(&json)?))
    }
}
