/// Installer
///
/// Copies the running binary somewhere stable and hooks it into the
/// current shell's profile.

use crate::core::layout::InstallLayout;
use crate::core::receipt::InstallReceipt;
use crate::error::{AlertError, Result};
use crate::shell::{BlockWrite, Shell, ShellDetector, ERR_SOUND_BLOCK};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    /// Hook block appended to the profile
    Installed,
    /// Start marker was already there; profile untouched
    AlreadyInstalled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Shell identifier as detected
    pub shell: String,
    pub profile: PathBuf,
    pub binary: PathBuf,
    pub status: InstallStatus,
}

pub struct Installer {
    layout: InstallLayout,
    home: PathBuf,
    current_exe: PathBuf,
}

impl Installer {
    /// Create an installer from the process environment
    ///
    /// # Returns
    /// * `Ok(Installer)` - New installer instance
    /// * `Err(AlertError)` - If the data directory or our own executable
    ///   can't be determined
    pub fn new() -> Result<Self> {
        let layout = InstallLayout::from_env()?;
        let home = dirs::home_dir().unwrap_or_default();
        let current_exe = env::current_exe()?;

        Ok(Self::with_paths(layout, home, current_exe))
    }

    /// Create an installer with explicit locations
    pub fn with_paths(layout: InstallLayout, home: PathBuf, current_exe: PathBuf) -> Self {
        Self {
            layout,
            home,
            current_exe,
        }
    }

    /// Install for the shell we were launched from
    pub fn install_auto(&self) -> Result<InstallReport> {
        let shell_id = ShellDetector::detect();
        self.install(&shell_id)
    }

    /// Install for a specific shell identifier
    ///
    /// The binary is copied before the shell is looked at, so an
    /// unsupported shell still leaves the copy behind.
    pub fn install(&self, shell_id: &str) -> Result<InstallReport> {
        fs::create_dir_all(self.layout.target_dir())?;

        let binary = self.layout.binary_path();
        self.copy_binary(&binary)?;

        let shell = Shell::from_identifier(shell_id).ok_or_else(|| {
            warn!(shell = %shell_id, "no hook template for shell");
            AlertError::UnsupportedShell(shell_id.to_string())
        })?;

        let hook = shell.hook(&self.home, &binary);
        let status = match ERR_SOUND_BLOCK.append_to(&hook.profile_path, &hook.snippet)? {
            BlockWrite::Appended => InstallStatus::Installed,
            BlockWrite::AlreadyPresent => InstallStatus::AlreadyInstalled,
        };

        // Uninstall can do without it, so a failed write is only logged
        let receipt = InstallReceipt::new(shell_id, &hook.profile_path, &binary);
        if let Err(e) = receipt.save(&self.layout.receipt_path()) {
            warn!(error = %e, "could not write install receipt");
        }

        info!(
            shell = %shell,
            profile = %hook.profile_path.display(),
            status = ?status,
            "install finished"
        );

        Ok(InstallReport {
            shell: shell_id.to_string(),
            profile: hook.profile_path,
            binary,
            status,
        })
    }

    /// Copy ourselves to `target`, replacing whatever is there
    fn copy_binary(&self, target: &Path) -> Result<()> {
        // Copying a file onto itself truncates it
        if same_file(&self.current_exe, target) {
            debug!(path = %target.display(), "already running from the install location");
            return Ok(());
        }

        fs::copy(&self.current_exe, target)?;

        // Make binary executable (Unix only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(target)?.permissions();
            perms.set_mode(0o755);
            fs::set_permissions(target, perms)?;
        }

        debug!(from = %self.current_exe.display(), to = %target.display(), "binary copied");
        Ok(())
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
