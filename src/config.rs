//! # Configuration Module
//!
//! Locates the playlist database in the platform-standard data directory
//! and ensures it exists:
//!
//! - Linux: `~/.local/share/encore/playlists.db`
//! - macOS: `~/Library/Application Support/encore/playlists.db`
//! - Windows: `%APPDATA%\encore\playlists.db`
//!
//! The `--db-path` flag (or `ENCORE_DB_PATH`) overrides this per
//! invocation; resolution of that override happens in `main`, not here.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Returns the platform-appropriate database file path, creating the
/// `encore` data subdirectory if it doesn't exist.
///
/// # Errors
///
/// Fails when the system data directory cannot be determined or the
/// subdirectory cannot be created.
pub fn get_db_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!("Could not determine the system data directory for this platform.")
    })?;

    let encore_dir = data_dir.join("encore");
    fs::create_dir_all(&encore_dir).with_context(|| {
        format!(
            "Failed to create the data directory at {}. Please check file permissions.",
            encore_dir.display()
        )
    })?;

    Ok(encore_dir.join("playlists.db"))
}
