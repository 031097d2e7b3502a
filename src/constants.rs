//! App-wide constants.
//!
//! Centralises the tool name, config paths, and environment variable names
//! so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "changelens";

/// Crate version from Cargo metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compilation target triple, exported by `build.rs`.
pub const TARGET: &str = env!("TARGET");

/// Local config filename (e.g. `.changelens.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".changelens.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "changelens";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_THRESHOLD: &str = "CHANGELENS_THRESHOLD";
pub const ENV_HEADER_WEIGHT: &str = "CHANGELENS_HEADER_WEIGHT";
pub const ENV_LOG: &str = "CHANGELENS_LOG";
