//! Error types for Gantry
//!
//! Uses `thiserror` for library errors; the CLI wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Gantry operations
pub type GantryResult<T> = Result<T, GantryError>;

/// Main error type for Gantry operations
#[derive(Error, Debug)]
pub enum GantryError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Profile document exists but cannot be parsed
    #[error(
        "build profile corrupted: {file}\n  → Fix: Repair the TOML by hand, or recreate the default profile\n  → Run: gantry init --force\n  → Details: {message}"
    )]
    InvalidProfile { file: PathBuf, message: String },

    /// Profile document written by an incompatible gantry version
    #[error(
        "unsupported profile format version {found} (this build reads version {expected})\n  → Fix: Upgrade gantry, or recreate the profile\n  → Run: gantry init --force"
    )]
    VersionMismatch { found: u32, expected: u32 },

    /// No profile document on disk where one is required
    #[error(
        "no build profile found at {path}\n  → Fix: Create the default profile\n  → Run: gantry init"
    )]
    ProfileMissing { path: PathBuf },

    /// Step name not present in the profile registry
    #[error("no build step named '{name}' in the profile")]
    UnknownStep { name: String },

    /// Profile could not be rendered to TOML
    #[error("failed to serialize profile: {message}")]
    Serialize { message: String },
}
