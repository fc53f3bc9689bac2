/// fahhhh library
///
/// Shell hooks that play a sound whenever the last command failed.

pub mod core;
pub mod error;
pub mod shell;
pub mod sound;

// Re-exports for convenience
pub use error::{AlertError, Result};
