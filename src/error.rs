//! Error types shared by the store, repository and command layers.
//!
//! The enum mirrors how failures propagate: playlist-level duplicates and
//! missing playlists abort the whole command, song-level duplicates are
//! recovered per item by the repository, and input conflicts are caught
//! before any store access.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the playlist core.
#[derive(Debug, Error)]
pub enum Error {
    /// A unique constraint would be violated: either a playlist name, or a
    /// `(path, playlist)` pair. Fatal for playlist-level operations; for
    /// bulk song insertion the repository converts it to a skip.
    #[error("{0} already exists")]
    DuplicateKey(String),

    /// The requested playlist does not exist.
    #[error("there is no playlist `{0}`")]
    NotFound(String),

    /// Mutually exclusive options were combined on the command line.
    #[error("{0}")]
    UserInputConflict(String),

    /// Malformed interactive input (e.g. a non-numeric count).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The external duration probe failed. Duration is required to store a
    /// song, so this aborts the command.
    #[error("unable to probe duration for `{file}`: {message}", file = .path.display())]
    ExternalTool { path: PathBuf, message: String },

    #[error(transparent)]
    Database(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
