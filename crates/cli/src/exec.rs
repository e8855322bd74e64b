use std::{
    io,
    path::Path,
    process::{Command, ExitStatus},
};

use log::{info, warn};

/// Run `<command> <path>` through the platform shell and wait for it.
pub fn run_for(command: &str, path: &Path) -> io::Result<ExitStatus> {
    shell_command(command, path).status()
}

#[cfg(not(windows))]
fn shell_command(command: &str, path: &Path) -> Command {
    // The path travels as "$1" so spaces and quotes in it survive.
    let mut cmd = Command::new("sh");
    cmd.arg("-c")
        .arg(format!("{command} \"$1\""))
        .arg("sh")
        .arg(path);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str, path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(format!("{command} \"{}\"", path.display()));
    cmd
}

/// Run the hook for one match. Failures are logged and never stop the scan.
pub fn run_hook(command: &str, path: &Path) {
    match run_for(command, path) {
        Ok(status) if status.success() => {
            info!("[exec] {command} {:?}: {status}", path);
        }
        Ok(status) => {
            warn!("[exec] {command} {:?}: {status}", path);
        }
        Err(e) => {
            warn!("[exec] cannot run {command:?}: {e}");
        }
    }
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
