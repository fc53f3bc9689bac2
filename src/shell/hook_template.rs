/// Hook templates
///
/// Maps each supported shell to the profile file it reads on startup and
/// the snippet we inject there.

use crate::shell::path_normalizer::to_posix_dir;
use std::fmt;
use std::path::{Path, PathBuf};

/// Placeholder for the installed binary's directory
const BIN_DIR: &str = "@BIN_DIR@";

/// Placeholder for shell-specific lines right after the PATH export
const EXTRA: &str = "@EXTRA@";

const BASH_HOOK: &str = r#"
export PATH="@BIN_DIR@:$PATH"
@EXTRA@_err_sound_hook() {
  local status=$?
  if [ $status -ne 0 ]; then
    ( fahhhh play > /dev/null 2>&1 & disown)
  fi
}
PROMPT_COMMAND="_err_sound_hook; $PROMPT_COMMAND"
"#;

// `status` is read-only in zsh, hence `code`
const ZSH_HOOK: &str = r#"
export PATH="@BIN_DIR@:$PATH"
_err_sound_hook() {
	local code=$?
	if [ $code -ne 0 ]; then
		(fahhhh play > /dev/null 2>&1 & )
	fi
}
precmd_functions+=(_err_sound_hook)
"#;

const POWERSHELL_HOOK: &str = r#"
$env:PATH = "@BIN_DIR@;" + $env:PATH
function Prompt {
	$lastCommandSucceeded = $?
    if (-not $lastCommandSucceeded) {
        Start-Process "fahhhh" -ArgumentList "play" -WindowStyle Hidden
    }
    return "PS $($ExecutionContext.SessionState.Path.CurrentLocation)> "
}
"#;

/// Git Bash runs Windows binaries, which keep their `.exe` suffix
const GIT_BASH_ALIAS: &str = "alias fahhhh=fahhhh.exe\n";

const POWERSHELL_PROFILE: &str = "Microsoft.PowerShell_profile.ps1";

/// Supported shells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    /// Bash shipped with Git for Windows
    GitBash,
    Zsh,
    /// Windows PowerShell, or PowerShell Core when only its profile dir exists
    PowerShell,
}

impl Shell {
    /// Map a parent-process executable name to a shell
    ///
    /// Exact match only: `bash.exe` is Git Bash, `bash` is Bash, and
    /// `fish` or `/bin/bash` are not supported.
    pub fn from_identifier(identifier: &str) -> Option<Shell> {
        match identifier {
            "bash" => Some(Shell::Bash),
            "bash.exe" | "git-bash.exe" => Some(Shell::GitBash),
            "zsh" => Some(Shell::Zsh),
            "powershell.exe" => Some(Shell::PowerShell),
            _ => None,
        }
    }

    /// Get the shell name as a string
    pub fn name(&self) -> &str {
        match self {
            Shell::Bash => "bash",
            Shell::GitBash => "git-bash",
            Shell::Zsh => "zsh",
            Shell::PowerShell => "powershell",
        }
    }

    /// Get the profile file this shell reads on interactive startup
    ///
    /// PowerShell Desktop and Core keep their profiles in different
    /// directories; Desktop wins whenever its directory exists.
    pub fn profile_path(&self, home: &Path) -> PathBuf {
        match self {
            Shell::Bash | Shell::GitBash => home.join(".bashrc"),
            Shell::Zsh => home.join(".zshrc"),
            Shell::PowerShell => {
                let documents = home.join("Documents");
                let desktop = documents.join("WindowsPowerShell");
                let dir = if desktop.exists() {
                    desktop
                } else {
                    documents.join("PowerShell")
                };
                dir.join(POWERSHELL_PROFILE)
            }
        }
    }

    /// Render the hook snippet for a binary installed in `bin_dir`
    pub fn snippet(&self, bin_dir: &Path) -> String {
        let native = bin_dir.to_string_lossy();

        match self {
            Shell::Bash => BASH_HOOK
                .replace(BIN_DIR, &to_posix_dir(&native))
                .replace(EXTRA, ""),
            Shell::GitBash => BASH_HOOK
                .replace(BIN_DIR, &to_posix_dir(&native))
                .replace(EXTRA, GIT_BASH_ALIAS),
            Shell::Zsh => ZSH_HOOK.replace(BIN_DIR, &to_posix_dir(&native)),
            Shell::PowerShell => POWERSHELL_HOOK.replace(BIN_DIR, &native),
        }
    }

    /// Profile path and snippet for a binary installed at `binary`
    pub fn hook(&self, home: &Path, binary: &Path) -> Hook {
        let bin_dir = binary.parent().unwrap_or_else(|| Path::new(""));

        Hook {
            profile_path: self.profile_path(home),
            snippet: self.snippet(bin_dir),
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Where a hook goes and what it says
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hook {
    pub profile_path: PathBuf,
    pub snippet: String,
}

/// String-level view of the template table
///
/// Returns `(profile path, snippet)`, or two empty strings when the
/// identifier names a shell we have no template for. Callers that only
/// hold a raw process name (scripts, other front ends) use this instead
/// of matching on [`Shell`] themselves.
///
/// # Examples
/// ```
/// use fahhhh_lib::shell::hook_for_identifier;
/// use std::path::Path;
///
/// let (profile, snippet) =
///     hook_for_identifier("zsh", Path::new("/home/u"), Path::new("/opt/fahhhh/fahhhh"));
/// assert!(profile.ends_with(".zshrc"));
/// assert!(snippet.contains("precmd_functions"));
///
/// let (profile, snippet) = hook_for_identifier("fish", Path::new("/home/u"), Path::new("/opt/fahhhh/fahhhh"));
/// assert!(profile.is_empty() && snippet.is_empty());
/// ```
pub fn hook_for_identifier(identifier: &str, home: &Path, binary: &Path) -> (String, String) {
    match Shell::from_identifier(identifier) {
        Some(shell) => {
            let hook = shell.hook(home, binary);
            (hook.profile_path.to_string_lossy().into_owned(), hook.snippet)
        }
        None => (String::new(), String::new()),
    }
}
