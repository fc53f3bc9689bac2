/// Shell integration module
///
/// Shell detection, hook templates, and the profile-file patching they
/// feed into.

pub mod hook_template;
pub mod path_normalizer;
pub mod profile_block;
pub mod shell_detector;

pub use hook_template::{hook_for_identifier, Hook, Shell};
pub use path_normalizer::to_posix_dir;
pub use profile_block::{BlockRemoval, BlockWrite, MarkedBlock, ERR_SOUND_BLOCK};
pub use shell_detector::ShellDetector;
