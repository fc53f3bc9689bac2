/// Marker-delimited blocks in shell profile files
///
/// Install appends one block, uninstall cuts it back out. The start marker
/// being present anywhere in the file is the only installed-check.
///
/// Profiles are handled as raw bytes: rc files with a stray Latin-1 comment
/// are still patched, and whatever we keep is written back untouched.

use crate::error::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::debug;

pub const START_MARKER: &str = "### ERR-SOUND-START ###";
pub const END_MARKER: &str = "### ERR-SOUND-END ###";

/// The block our hook lives in
pub const ERR_SOUND_BLOCK: MarkedBlock = MarkedBlock::new(START_MARKER, END_MARKER);

/// Outcome of appending a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockWrite {
    Appended,
    AlreadyPresent,
}

/// Outcome of removing a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRemoval {
    Removed,
    NotPresent,
    /// File missing or not readable; nothing was touched
    Unreadable,
}

/// A pair of sentinel lines bounding generated text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkedBlock {
    start: &'static str,
    end: &'static str,
}

impl MarkedBlock {
    pub const fn new(start: &'static str, end: &'static str) -> Self {
        Self { start, end }
    }

    pub fn is_present(&self, content: impl AsRef<[u8]>) -> bool {
        contains(content.as_ref(), self.start.as_bytes())
    }

    /// Text appended to a profile: blank line, start, body, end, newline
    pub fn render(&self, body: &str) -> String {
        format!("\n{}\n{}\n{}\n", self.start, body, self.end)
    }

    /// Drop every line from a start-marker line through the next end-marker
    /// line inclusive, then trim the surrounding ASCII whitespace
    ///
    /// A start marker with no end swallows the rest of the file. Kept lines
    /// come back byte for byte.
    pub fn strip(&self, content: impl AsRef<[u8]>) -> Vec<u8> {
        let mut kept: Vec<&[u8]> = Vec::new();
        let mut skipping = false;

        for line in content.as_ref().split(|&b| b == b'\n') {
            if contains(line, self.start.as_bytes()) {
                skipping = true;
                continue;
            }
            if contains(line, self.end.as_bytes()) {
                skipping = false;
                continue;
            }
            if !skipping {
                kept.push(line);
            }
        }

        kept.join(&b'\n').trim_ascii().to_vec()
    }

    /// Append the block to `path` unless it's already there
    ///
    /// A missing or unreadable file counts as empty. The file and its
    /// parent directories are created when needed.
    pub fn append_to(&self, path: &Path, body: &str) -> Result<BlockWrite> {
        let existing = fs::read(path).unwrap_or_default();
        if self.is_present(&existing) {
            debug!(path = %path.display(), "block already present");
            return Ok(BlockWrite::AlreadyPresent);
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(self.render(body).as_bytes())?;

        debug!(path = %path.display(), "block appended");
        Ok(BlockWrite::Appended)
    }

    /// Remove the block from `path`, rewriting the file in place
    ///
    /// Files without a start marker are left exactly as they are.
    pub fn remove_from(&self, path: &Path) -> Result<BlockRemoval> {
        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "profile not readable");
                return Ok(BlockRemoval::Unreadable);
            }
        };

        if !self.is_present(&content) {
            return Ok(BlockRemoval::NotPresent);
        }

        fs::write(path, self.strip(&content))?;

        debug!(path = %path.display(), "block removed");
        Ok(BlockRemoval::Removed)
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BODY: &str = "\nexport PATH=\"/opt/fahhhh:$PATH\"\n";

    #[test]
    fn test_render_layout() {
        let rendered = ERR_SOUND_BLOCK.render(BODY);
        assert_eq!(
            rendered,
            "\n### ERR-SOUND-START ###\n\nexport PATH=\"/opt/fahhhh:$PATH\"\n\n### ERR-SOUND-END ###\n"
        );
    }

    #[test]
    fn test_strip_keeps_surroundings() {
        let content = format!("alias ll='ls -l'{}echo after\n", ERR_SOUND_BLOCK.render(BODY));
        let stripped = String::from_utf8(ERR_SOUND_BLOCK.strip(&content)).unwrap();

        assert!(stripped.starts_with("alias ll='ls -l'\n"));
        assert!(stripped.ends_with("echo after"));
        assert!(!stripped.contains("ERR-SOUND"));
        assert!(!stripped.contains("/opt/fahhhh"));
    }

    #[test]
    fn test_strip_unterminated_block_drops_tail() {
        let content = "keep\n### ERR-SOUND-START ###\ngone\ngone too\n";
        assert_eq!(ERR_SOUND_BLOCK.strip(content), b"keep");
    }

    #[test]
    fn test_strip_without_block_only_trims() {
        assert_eq!(
            ERR_SOUND_BLOCK.strip("\n\nexport A=1\nexport B=2\n\n"),
            b"export A=1\nexport B=2"
        );
    }

    #[test]
    fn test_append_creates_file_and_parents() {
        let temp = TempDir::new().unwrap();
        let profile = temp.path().join("Documents").join("PowerShell").join("profile.ps1");

        let result = ERR_SOUND_BLOCK.append_to(&profile, BODY).unwrap();
        assert_eq!(result, BlockWrite::Appended);

        let content = fs::read_to_string(&profile).unwrap();
        assert_eq!(content, ERR_SOUND_BLOCK.render(BODY));
    }

    #[test]
    fn test_append_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let profile = temp.path().join(".zshrc");
        fs::write(&profile, "setopt autocd\n").unwrap();

        assert_eq!(ERR_SOUND_BLOCK.append_to(&profile, BODY).unwrap(), BlockWrite::Appended);
        let first = fs::read_to_string(&profile).unwrap();

        assert_eq!(
            ERR_SOUND_BLOCK.append_to(&profile, BODY).unwrap(),
            BlockWrite::AlreadyPresent
        );
        let second = fs::read_to_string(&profile).unwrap();

        assert_eq!(first, second);
        assert_eq!(second.matches(START_MARKER).count(), 1);
    }

    #[test]
    fn test_remove_missing_file_is_unreadable() {
        let temp = TempDir::new().unwrap();
        let result = ERR_SOUND_BLOCK.remove_from(&temp.path().join("nope")).unwrap();
        assert_eq!(result, BlockRemoval::Unreadable);
    }

    #[test]
    fn test_remove_without_block_leaves_file_alone() {
        let temp = TempDir::new().unwrap();
        let profile = temp.path().join(".bashrc");
        fs::write(&profile, "\nexport A=1\n\n").unwrap();

        let result = ERR_SOUND_BLOCK.remove_from(&profile).unwrap();
        assert_eq!(result, BlockRemoval::NotPresent);
        assert_eq!(fs::read_to_string(&profile).unwrap(), "\nexport A=1\n\n");
    }

    #[test]
    fn test_append_then_remove_round_trip() {
        let temp = TempDir::new().unwrap();
        let profile = temp.path().join(".bashrc");
        let original = "# my bashrc\nexport EDITOR=vim\n";
        fs::write(&profile, original).unwrap();

        ERR_SOUND_BLOCK.append_to(&profile, BODY).unwrap();
        assert_eq!(ERR_SOUND_BLOCK.remove_from(&profile).unwrap(), BlockRemoval::Removed);

        assert_eq!(fs::read_to_string(&profile).unwrap(), original.trim());
    }

    #[test]
    fn test_non_utf8_profile_install_twice_then_remove() {
        let temp = TempDir::new().unwrap();
        let profile = temp.path().join(".bashrc");
        let original: &[u8] = b"# caf\xe9 au lait\nexport A=1\n";
        fs::write(&profile, original).unwrap();

        assert_eq!(ERR_SOUND_BLOCK.append_to(&profile, BODY).unwrap(), BlockWrite::Appended);
        let first = fs::read(&profile).unwrap();

        assert_eq!(
            ERR_SOUND_BLOCK.append_to(&profile, BODY).unwrap(),
            BlockWrite::AlreadyPresent
        );
        let second = fs::read(&profile).unwrap();

        assert_eq!(first, second);
        assert_eq!(String::from_utf8_lossy(&second).matches(START_MARKER).count(), 1);

        assert_eq!(ERR_SOUND_BLOCK.remove_from(&profile).unwrap(), BlockRemoval::Removed);
        assert_eq!(fs::read(&profile).unwrap(), original.trim_ascii());
    }

    #[test]
    fn test_strip_keeps_non_utf8_lines_byte_for_byte() {
        let mut content = b"\xff\xfe odd\n".to_vec();
        content.extend_from_slice(ERR_SOUND_BLOCK.render(BODY).as_bytes());
        content.extend_from_slice(b"tail \xe9\n");

        assert_eq!(ERR_SOUND_BLOCK.strip(&content), b"\xff\xfe odd\n\ntail \xe9");
    }
}
