//! Common helpers for gantry CLI integration tests.
//!
//! Each test runs the real binary in an isolated temp project directory.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured result of one gantry invocation.
#[derive(Debug)]
pub struct CmdResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_gantry")
}

/// Run gantry inside `project` and capture its output.
pub fn gantry(project: &Path, args: &[&str]) -> CmdResult {
    let output = Command::new(bin())
        .current_dir(project)
        .env("GANTRY_NO_COLOR", "1")
        .args(args)
        .output()
        .expect("failed to execute gantry");

    CmdResult {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Location of the default profile document inside a project.
pub fn profile_path(project: &Path) -> PathBuf {
    project.join(".gantry/profiles/default.toml")
}

/// Read the default profile document, panicking when it is missing.
pub fn read_profile(project: &Path) -> String {
    std::fs::read_to_string(profile_path(project)).expect("profile document missing")
}
