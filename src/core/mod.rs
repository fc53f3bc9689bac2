/// Core functionality modules
///
/// Install layout, the install receipt, and the installer/uninstaller pair
/// built on top of the shell module.

pub mod installer;
pub mod layout;
pub mod receipt;
pub mod uninstaller;

pub use installer::{InstallReport, InstallStatus, Installer};
pub use layout::{InstallLayout, Platform};
pub use receipt::InstallReceipt;
pub use uninstaller::{UninstallReport, UninstallStatus, Uninstaller};
