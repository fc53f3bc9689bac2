/// Error types for fahhhh
///
/// Every failure is reported to the user as a single line on stdout,
/// so each variant carries a matching `user_message`.

use thiserror::Error;

/// Main error type for fahhhh operations
#[derive(Error, Debug)]
pub enum AlertError {
    /// Neither the platform data variable nor the home directory is available
    #[error("Could not determine the platform data directory")]
    DataDirUnavailable,

    /// The parent shell has no hook template
    #[error("Unsupported shell: {0}")]
    UnsupportedShell(String),

    /// I/O errors (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Install receipt could not be read or written
    #[error("Receipt error: {0}")]
    Receipt(#[from] serde_json::Error),

    /// Bundled asset lookup failed
    #[error("Asset not found: {0}")]
    AssetMissing(String),

    /// The bundled asset is not a decodable audio stream
    #[error("Decode error: {0}")]
    Decode(String),

    /// No usable audio output device
    #[error("Audio output error: {0}")]
    Audio(String),
}

/// Result type alias for fahhhh operations
pub type Result<T> = std::result::Result<T, AlertError>;

/// Convert AlertError to the line printed for the user
impl AlertError {
    pub fn user_message(&self) -> String {
        match self {
            AlertError::DataDirUnavailable => "Cannot retrieve appdata directory.".to_string(),
            AlertError::UnsupportedShell(_) => {
                "We don't support anything other than bash, pwsh and zsh at this moment."
                    .to_string()
            }
            AlertError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            AlertError::Receipt(e) => format!("Install receipt is damaged. Details: {}", e),
            AlertError::AssetMissing(_) => "No file found".to_string(),
            AlertError::Decode(_) => "Cannot decode file".to_string(),
            AlertError::Audio(e) => format!("Cannot open audio output. Details: {}", e),
        }
    }
}
