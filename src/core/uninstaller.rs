/// Uninstaller
///
/// Cuts the hook block back out of the profile and deletes the installed
/// binary directory.

use crate::core::layout::InstallLayout;
use crate::core::receipt::InstallReceipt;
use crate::error::Result;
use crate::shell::{BlockRemoval, Shell, ShellDetector, ERR_SOUND_BLOCK};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UninstallStatus {
    /// Hook block removed and install directory deleted
    Removed,
    /// Profile had no hook block; install directory deleted anyway
    NotInstalled,
    /// Profile unreadable or shell unsupported; nothing touched
    NothingToDo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UninstallReport {
    pub shell: String,
    pub profile: Option<PathBuf>,
    pub status: UninstallStatus,
}

pub struct Uninstaller {
    layout: InstallLayout,
    home: PathBuf,
}

impl Uninstaller {
    /// Create an uninstaller from the process environment
    pub fn new() -> Result<Self> {
        let layout = InstallLayout::from_env()?;
        let home = dirs::home_dir().unwrap_or_default();

        Ok(Self::with_paths(layout, home))
    }

    pub fn with_paths(layout: InstallLayout, home: PathBuf) -> Self {
        Self { layout, home }
    }

    /// Uninstall whatever the last install recorded
    ///
    /// Without a usable receipt this falls back to the shell we're running
    /// in now, which may not be the one that was installed into.
    pub fn uninstall_auto(&self) -> Result<UninstallReport> {
        match self.recorded_install() {
            Some(receipt) => {
                debug!(shell = %receipt.shell, "using install receipt");
                self.uninstall_profile(&receipt.shell, &receipt.profile)
            }
            None => {
                let shell_id = ShellDetector::detect();
                self.uninstall(&shell_id)
            }
        }
    }

    /// Uninstall from the profile of a specific shell identifier
    pub fn uninstall(&self, shell_id: &str) -> Result<UninstallReport> {
        let Some(shell) = Shell::from_identifier(shell_id) else {
            debug!(shell = %shell_id, "no profile for shell, nothing to uninstall");
            return Ok(UninstallReport {
                shell: shell_id.to_string(),
                profile: None,
                status: UninstallStatus::NothingToDo,
            });
        };

        let profile = shell.profile_path(&self.home);
        self.uninstall_profile(shell_id, &profile)
    }

    fn uninstall_profile(&self, shell_id: &str, profile: &Path) -> Result<UninstallReport> {
        let status = match ERR_SOUND_BLOCK.remove_from(profile)? {
            BlockRemoval::Unreadable => {
                return Ok(UninstallReport {
                    shell: shell_id.to_string(),
                    profile: Some(profile.to_path_buf()),
                    status: UninstallStatus::NothingToDo,
                });
            }
            BlockRemoval::Removed => UninstallStatus::Removed,
            BlockRemoval::NotPresent => UninstallStatus::NotInstalled,
        };

        self.remove_target_dir()?;

        info!(shell = %shell_id, profile = %profile.display(), status = ?status, "uninstall finished");

        Ok(UninstallReport {
            shell: shell_id.to_string(),
            profile: Some(profile.to_path_buf()),
            status,
        })
    }

    fn remove_target_dir(&self) -> Result<()> {
        match fs::remove_dir_all(self.layout.target_dir()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn recorded_install(&self) -> Option<InstallReceipt> {
        match InstallReceipt::load(&self.layout.receipt_path()) {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable install receipt");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::Platform;
    use tempfile::TempDir;

    fn create_test_uninstaller() -> (Uninstaller, TempDir) {
        let temp = TempDir::new().unwrap();
        let uninstaller = Uninstaller::with_paths(
            InstallLayout::new(Platform::Unix, temp.path().join("data")),
            temp.path().join("home"),
        );
        (uninstaller, temp)
    }

    #[test]
    fn test_missing_profile_touches_nothing() {
        let (uninstaller, temp) = create_test_uninstaller();
        let target = temp.path().join("data").join("fahhhh");
        fs::create_dir_all(&target).unwrap();

        let report = uninstaller.uninstall("zsh").unwrap();

        assert_eq!(report.status, UninstallStatus::NothingToDo);
        assert!(target.exists());
    }

    #[test]
    fn test_unsupported_shell_is_nothing_to_do() {
        let (uninstaller, _temp) = create_test_uninstaller();

        let report = uninstaller.uninstall("fish").unwrap();

        assert_eq!(report.status, UninstallStatus::NothingToDo);
        assert_eq!(report.profile, None);
    }

    #[test]
    fn test_profile_without_block_is_kept() {
        let (uninstaller, temp) = create_test_uninstaller();
        let home = temp.path().join("home");
        fs::create_dir_all(&home).unwrap();
        fs::write(home.join(".bashrc"), "export A=1\n").unwrap();

        let report = uninstaller.uninstall("bash").unwrap();

        assert_eq!(report.status, UninstallStatus::NotInstalled);
        assert_eq!(fs::read_to_string(home.join(".bashrc")).unwrap(), "export A=1\n");
    }

    #[test]
    fn test_removes_block_and_install_dir() {
        let (uninstaller, temp) = create_test_uninstaller();
        let home = temp.path().join("home");
        let target = temp.path().join("data").join("fahhhh");
        fs::create_dir_all(&home).unwrap();
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("fahhhh"), b"bin").unwrap();
        fs::write(
            home.join(".zshrc"),
            "setopt autocd\n\n### ERR-SOUND-START ###\nhook\n### ERR-SOUND-END ###\n",
        )
        .unwrap();

        let report = uninstaller.uninstall("zsh").unwrap();

        assert_eq!(report.status, UninstallStatus::Removed);
        assert_eq!(fs::read_to_string(home.join(".zshrc")).unwrap(), "setopt autocd");
        assert!(!target.exists());
    }

    #[test]
    fn test_receipt_decides_profile() {
        let (uninstaller, temp) = create_test_uninstaller();
        let home = temp.path().join("home");
        let target = temp.path().join("data").join("fahhhh");
        fs::create_dir_all(&home).unwrap();
        fs::create_dir_all(&target).unwrap();

        let profile = home.join(".zshrc");
        fs::write(&profile, "### ERR-SOUND-START ###\nhook\n### ERR-SOUND-END ###\n").unwrap();
        InstallReceipt::new("zsh", &profile, &target.join("fahhhh"))
            .save(&target.join("install.json"))
            .unwrap();

        let report = uninstaller.uninstall_auto().unwrap();

        assert_eq!(report.shell, "zsh");
        assert_eq!(report.status, UninstallStatus::Removed);
        assert_eq!(fs::read_to_string(&profile).unwrap(), "");
        assert!(!target.exists());
    }
}
