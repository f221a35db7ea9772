//! SQLite connection and schema management.
//!
//! Two tables, `playlist` and `song`, with the unique constraints the rest
//! of the crate relies on: `playlist.name` and `(song.path, song.playlist_id)`.
//! Songs are owned by their playlist and removed with it (`ON DELETE
//! CASCADE`), so a delete can never leave dangling song rows.

use crate::error::Result;
use log::debug;
use rusqlite::Connection;
use std::path::Path;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS playlist (
        id          INTEGER PRIMARY KEY,
        name        TEXT NOT NULL UNIQUE,
        created_at  TEXT NOT NULL,
        updated_at  TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_playlist_created_at ON playlist(created_at);

    CREATE TABLE IF NOT EXISTS song (
        id          INTEGER PRIMARY KEY,
        path        TEXT NOT NULL,
        duration    INTEGER NOT NULL,
        created_at  TEXT NOT NULL,
        playlist_id INTEGER NOT NULL REFERENCES playlist(id) ON DELETE CASCADE,
        UNIQUE(path, playlist_id)
    );
    CREATE INDEX IF NOT EXISTS idx_song_path ON song(path);
    CREATE INDEX IF NOT EXISTS idx_song_created_at ON song(created_at);
";

/// Opens the database at `path`, creating the file and schema on first use.
pub fn open(path: &Path) -> Result<Connection> {
    debug!("Opening playlist database at {}", path.display());
    let conn = Connection::open(path)?;
    configure(&conn)?;
    Ok(conn)
}

/// In-memory database with the same schema. Used by tests.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure(&conn)?;
    Ok(conn)
}

/// SQLite leaves foreign keys off by default; the cascade from playlist to
/// song depends on them, so every connection turns them on.
fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// True when `err` is a UNIQUE (or primary key) constraint violation.
///
/// Callers use this to tell "this row already exists" apart from every other
/// database failure, so bulk insertion can skip the row and continue instead
/// of aborting.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}
