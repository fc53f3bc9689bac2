/// Path normalization for POSIX-style shell snippets
///
/// Git Bash and friends want `/c/Users/me`, not `C:\Users\me`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static DRIVE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    // A single drive letter, a colon, then a separator
    Regex::new(r"^([a-zA-Z]):/").expect("drive prefix pattern is valid")
});

/// Convert a native directory path into the form POSIX shells expect
///
/// Backslashes become forward slashes, and a leading `X:/` becomes `/x/`.
/// Anything else passes through untouched, so normalizing twice is the
/// same as normalizing once.
///
/// # Examples
/// ```
/// use fahhhh_lib::shell::to_posix_dir;
///
/// assert_eq!(to_posix_dir(r"C:\Users\x"), "/c/Users/x");
/// assert_eq!(to_posix_dir("/already/posix"), "/already/posix");
/// ```
pub fn to_posix_dir(path: &str) -> String {
    let path = path.replace('\\', "/");

    DRIVE_PREFIX
        .replace(&path, |caps: &Captures| {
            format!("/{}/", caps[1].to_ascii_lowercase())
        })
        .into_owned()
}
