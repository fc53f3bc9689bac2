// fahhhh - plays a sound whenever your last shell command fails
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use fahhhh_lib::{
    core::{InstallStatus, Installer, UninstallStatus, Uninstaller},
    sound::SoundPlayer,
    Result,
};
use std::env;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Log filter variable, `EnvFilter` syntax
const LOG_ENV: &str = "FAHHHH_LOG";

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let command = &args[1];

    // Trailing arguments are accepted and ignored
    let result = match command.as_str() {
        "install" => handle_install(&args[2..]),
        "uninstall" => handle_uninstall(&args[2..]),
        "play" => handle_play(&args[2..]),
        "version" | "-V" | "--version" => {
            println!("fahhhh v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            println!("unknown command: {}", command);
            print_usage();
            return ExitCode::from(1);
        }
    };

    // Failures are reported, not signalled through the exit status
    if let Err(e) = result {
        println!("{}", e.user_message());
    }

    ExitCode::SUCCESS
}

fn handle_install(_args: &[String]) -> Result<()> {
    let installer = Installer::new()?;
    let report = installer.install_auto()?;

    match report.status {
        InstallStatus::Installed => {
            println!("Installed for {}. Restart your shell.", report.shell)
        }
        InstallStatus::AlreadyInstalled => {
            println!("Already installed for {}.", report.shell)
        }
    }

    Ok(())
}

fn handle_uninstall(_args: &[String]) -> Result<()> {
    let uninstaller = Uninstaller::new()?;
    let report = uninstaller.uninstall_auto()?;

    match report.status {
        UninstallStatus::Removed | UninstallStatus::NotInstalled => {
            println!("Uninstalled for {}. Restart your shell.", report.shell)
        }
        // Nothing readable to patch; stay quiet
        UninstallStatus::NothingToDo => {}
    }

    Ok(())
}

fn handle_play(_args: &[String]) -> Result<()> {
    SoundPlayer::new().play()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout belongs to the user-facing messages
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

fn print_usage() {
    println!(
        r#"fahhhh v{} - hear it when a command fails

USAGE:
    fahhhh <COMMAND>

COMMANDS:
    install      Install the hook for the current shell
    uninstall    Remove the hook for the current shell
    play         Play the sound (used by the hook)
    version      Show version
    help         Show this help

Supported shells: bash, zsh, PowerShell.
Set FAHHHH_SHELL to override shell detection, FAHHHH_LOG=debug for diagnostics."#,
        env!("CARGO_PKG_VERSION")
    );
}
