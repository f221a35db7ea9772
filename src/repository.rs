//! Transactional CRUD over the playlist store.
//!
//! The repository is the only component that translates user intent into
//! store transactions. Every mutating operation owns its transaction;
//! bulk song insertion deliberately uses one statement per item so a
//! duplicate on item 5 never rolls back items 1-4.

use crate::db;
use crate::error::{Error, Result};
use crate::media::{self, DurationProbe};
use crate::models::{Playlist, PlaylistSummary, Song};
use crate::paths::canonical_form;
use chrono::Utc;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Outcome of a single song insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The `(path, playlist)` pair already exists; the row was skipped.
    Duplicate,
}

/// Per-path report from a bulk insertion, in request order.
#[derive(Debug, Clone)]
pub struct AddReport {
    /// Canonical form of the requested path.
    pub path: String,
    pub outcome: AddOutcome,
}

/// Which of the requested paths were deleted and which did not exist.
#[derive(Debug, Default)]
pub struct RemoveReport {
    pub removed: BTreeSet<String>,
    pub not_found: BTreeSet<String>,
}

pub struct PlaylistRepository {
    conn: Connection,
}

impl PlaylistRepository {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(db::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(db::open_in_memory()?))
    }

    /// Inserts a new empty playlist and returns its id.
    ///
    /// A name collision is fatal here, unlike song duplicates: the caller
    /// reports it and aborts the whole command.
    pub fn create_playlist(&mut self, name: &str) -> Result<i64> {
        let tx = self.conn.transaction()?;
        let inserted = tx.execute(
            "INSERT INTO playlist (name, created_at) VALUES (?1, ?2)",
            params![name, Utc::now()],
        );
        match inserted {
            Ok(_) => {
                let id = tx.last_insert_rowid();
                tx.commit()?;
                info!("Created playlist `{name}` (id {id})");
                Ok(id)
            }
            Err(err) if db::is_unique_violation(&err) => {
                Err(Error::DuplicateKey(format!("playlist `{name}`")))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Exact, case-sensitive lookup by name. With `with_songs`, the owned
    /// songs are loaded eagerly in insertion order (a single extra query,
    /// not one per song).
    pub fn get_playlist_by_name(&self, name: &str, with_songs: bool) -> Result<Playlist> {
        let mut playlist = self
            .conn
            .query_row(
                "SELECT id, name, created_at, updated_at FROM playlist WHERE name = ?1",
                [name],
                |row| {
                    Ok(Playlist {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        created_at: row.get(2)?,
                        updated_at: row.get(3)?,
                        songs: Vec::new(),
                    })
                },
            )
            .optional()?
            .ok_or_else(|| Error::NotFound(name.to_string()))?;

        if with_songs {
            playlist.songs = self.songs_for(playlist.id)?;
        }
        Ok(playlist)
    }

    fn songs_for(&self, playlist_id: i64) -> Result<Vec<Song>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, path, duration, created_at, playlist_id
             FROM song WHERE playlist_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map([playlist_id], |row| {
            Ok(Song {
                id: row.get(0)?,
                path: row.get(1)?,
                duration: row.get(2)?,
                created_at: row.get(3)?,
                playlist_id: row.get(4)?,
            })
        })?;

        let mut songs = Vec::new();
        for song in rows {
            songs.push(song?);
        }
        Ok(songs)
    }

    /// Inserts one song. A duplicate `(path, playlist)` pair is an
    /// [`AddOutcome::Duplicate`], not an error; the single statement is its
    /// own transaction, so a skip never disturbs neighboring insertions.
    pub fn add_song(&mut self, playlist_id: i64, path: &str, duration: i64) -> Result<AddOutcome> {
        let inserted = self.conn.execute(
            "INSERT INTO song (path, duration, created_at, playlist_id) VALUES (?1, ?2, ?3, ?4)",
            params![path, duration, Utc::now(), playlist_id],
        );
        match inserted {
            Ok(_) => Ok(AddOutcome::Added),
            Err(err) if db::is_unique_violation(&err) => {
                debug!("Song {path} already in playlist {playlist_id}, skipped");
                Ok(AddOutcome::Duplicate)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Applies [`Self::add_song`] to each path in order, probing durations
    /// through `probe`, and collects a per-path outcome. Duplicates never
    /// stop the loop; a probe failure does, since a song cannot be stored
    /// without its duration.
    pub fn add_songs_from_paths(
        &mut self,
        playlist_id: i64,
        songs: &[PathBuf],
        probe: &dyn DurationProbe,
    ) -> Result<Vec<AddReport>> {
        let mut reports = Vec::with_capacity(songs.len());
        for song in songs {
            let canonical = canonical_form(song)?;
            let duration = probe.duration_seconds(song)? as i64;
            let outcome = self.add_song(playlist_id, &canonical, duration)?;
            reports.push(AddReport {
                path: canonical,
                outcome,
            });
        }
        Ok(reports)
    }

    /// Expands `folder` to every recognized audio file under it (recursive,
    /// lexical order) and defers to [`Self::add_songs_from_paths`].
    pub fn add_songs_from_folder(
        &mut self,
        playlist_id: i64,
        folder: &Path,
        probe: &dyn DurationProbe,
    ) -> Result<Vec<AddReport>> {
        let files = media::find_audio_files(folder)?;
        self.add_songs_from_paths(playlist_id, &files, probe)
    }

    /// Deletes the requested paths that exist for the playlist, in one
    /// transaction, and reports the removed / not-found split so the
    /// caller can print both accurately.
    ///
    /// Requesting nothing is a no-op, never an error.
    pub fn remove_songs(
        &mut self,
        playlist_id: i64,
        requested: &BTreeSet<String>,
    ) -> Result<RemoveReport> {
        if requested.is_empty() {
            return Ok(RemoveReport::default());
        }

        let tx = self.conn.transaction()?;
        let mut removed = BTreeSet::new();
        {
            let mut stmt = tx.prepare("SELECT path FROM song WHERE playlist_id = ?1")?;
            let rows = stmt.query_map([playlist_id], |row| row.get::<_, String>(0))?;
            for path in rows {
                let path = path?;
                if requested.contains(&path) {
                    removed.insert(path);
                }
            }
        }
        {
            let mut stmt = tx.prepare("DELETE FROM song WHERE playlist_id = ?1 AND path = ?2")?;
            for path in &removed {
                stmt.execute(params![playlist_id, path])?;
            }
        }
        tx.commit()?;

        let not_found = requested.difference(&removed).cloned().collect();
        Ok(RemoveReport { removed, not_found })
    }

    /// Renames a playlist, touching `updated_at`. Fails with
    /// [`Error::NotFound`] when `old_name` does not exist and with
    /// [`Error::DuplicateKey`] when `new_name` is taken; neither failure
    /// leaves a partial update behind.
    pub fn rename_playlist(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        let tx = self.conn.transaction()?;
        let updated = tx.execute(
            "UPDATE playlist SET name = ?1, updated_at = ?2 WHERE name = ?3",
            params![new_name, Utc::now(), old_name],
        );
        match updated {
            Ok(0) => Err(Error::NotFound(old_name.to_string())),
            Ok(_) => {
                tx.commit()?;
                info!("Renamed playlist `{old_name}` to `{new_name}`");
                Ok(())
            }
            Err(err) if db::is_unique_violation(&err) => {
                Err(Error::DuplicateKey(format!("playlist `{new_name}`")))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Deletes a playlist and, through the cascade, all of its songs in
    /// the same transaction.
    pub fn delete_playlist(&mut self, name: &str) -> Result<()> {
        let tx = self.conn.transaction()?;
        let deleted = tx.execute("DELETE FROM playlist WHERE name = ?1", [name])?;
        if deleted == 0 {
            return Err(Error::NotFound(name.to_string()));
        }
        tx.commit()?;
        info!("Deleted playlist `{name}`");
        Ok(())
    }

    /// Deletes every playlist and song unconditionally. Idempotent;
    /// confirmation, if any, is the caller's concern.
    pub fn clear_all(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM playlist", [])?;
        tx.execute("DELETE FROM song", [])?;
        tx.commit()?;
        info!("Cleared the playlist database");
        Ok(())
    }

    /// Every playlist's summary in store iteration order. Display ordering
    /// (fuzzy ranking) is the caller's responsibility.
    pub fn list_playlists(&self) -> Result<Vec<PlaylistSummary>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, created_at, updated_at FROM playlist ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(PlaylistSummary {
                name: row.get(0)?,
                created_at: row.get(1)?,
                updated_at: row.get(2)?,
            })
        })?;

        let mut summaries = Vec::new();
        for summary in rows {
            summaries.push(summary?);
        }
        Ok(summaries)
    }
}
