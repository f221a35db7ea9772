//! Records stored in the playlist database.
//! These map directly to the SQLite tables created by [`crate::db`].

use chrono::{DateTime, Utc};

/// A named, ordered collection of songs.
#[derive(Debug, Clone)]
pub struct Playlist {
    /// Surrogate key assigned by the store on creation.
    pub id: i64,
    /// Unique across all playlists, case-sensitive.
    pub name: String,
    /// Set once at creation, never mutated afterwards.
    pub created_at: DateTime<Utc>,
    /// `None` until the row is first mutated (e.g. renamed).
    pub updated_at: Option<DateTime<Utc>>,
    /// Owned songs in insertion order. Empty unless loaded eagerly.
    pub songs: Vec<Song>,
}

/// A single audio file reference scoped to one playlist.
///
/// The same path may appear in different playlists, but only once per
/// playlist.
#[derive(Debug, Clone)]
pub struct Song {
    pub id: i64,
    /// Absolute filesystem path in canonical slash form.
    pub path: String,
    /// Whole seconds, probed externally at insertion time.
    pub duration: i64,
    pub created_at: DateTime<Utc>,
    /// Owning playlist; the song's lifetime is tied to it.
    pub playlist_id: i64,
}

/// The `(name, created_at, updated_at)` triple shown by `playlist list`.
#[derive(Debug, Clone)]
pub struct PlaylistSummary {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
