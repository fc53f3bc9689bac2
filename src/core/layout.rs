/// Install layout
///
/// Where the installed binary and its receipt live on each platform.

use crate::error::{AlertError, Result};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Directory created under the platform data dir
pub const APP_DIR_NAME: &str = "fahhhh";

/// Install receipt file name, kept next to the binary
pub const RECEIPT_FILE: &str = "install.json";

/// Platforms with distinct data-dir and binary-name conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    /// Linux and the other Unix-likes: XDG rules
    Unix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    pub fn binary_name(&self) -> &'static str {
        match self {
            Platform::Windows => "fahhhh.exe",
            Platform::Unix => "fahhhh",
        }
    }
}

/// Resolved locations for one install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    platform: Platform,
    data_dir: PathBuf,
}

impl InstallLayout {
    pub fn new(platform: Platform, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            platform,
            data_dir: data_dir.into(),
        }
    }

    /// Resolve the layout from the process environment
    pub fn from_env() -> Result<Self> {
        Self::resolve(Platform::current(), |key| env::var_os(key), dirs::home_dir())
    }

    /// Resolve the layout with an explicit variable lookup and home dir
    ///
    /// Windows uses `APPDATA`. Everything else uses `XDG_DATA_HOME`, falling
    /// back to `<home>/.local/share`. Empty variables count as unset.
    pub fn resolve<F>(platform: Platform, var: F, home: Option<PathBuf>) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let data_dir = match platform {
            Platform::Windows => non_empty(var("APPDATA")),
            Platform::Unix => non_empty(var("XDG_DATA_HOME"))
                .or_else(|| home.map(|h| h.join(".local").join("share"))),
        };

        data_dir
            .map(|dir| Self::new(platform, dir))
            .ok_or(AlertError::DataDirUnavailable)
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// `<data-dir>/fahhhh`
    pub fn target_dir(&self) -> PathBuf {
        self.data_dir.join(APP_DIR_NAME)
    }

    /// `<data-dir>/fahhhh/fahhhh[.exe]`
    pub fn binary_path(&self) -> PathBuf {
        self.target_dir().join(self.platform.binary_name())
    }

    pub fn receipt_path(&self) -> PathBuf {
        self.target_dir().join(RECEIPT_FILE)
    }
}

fn non_empty(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}
