//! Playlist persistence and fuzzy lookup for a command-line audio player.
//!
//! Core modules:
//! - [`db`] - SQLite schema and connection management
//! - [`repository`] - Transactional playlist/song operations
//! - [`fuzzy`] - Weighted-ratio name matching for `playlist list`
//! - [`commands`] - Orchestration behind each `playlist` subcommand
//!
//! ### Supporting Modules
//!
//! - [`cli`] - Command-line definitions with clap integration
//! - [`config`] - Data directory management
//! - [`error`] - The crate's typed error enum
//! - [`media`] - ffmpeg duration probing and audio file discovery
//! - [`models`] - Playlist and Song records
//! - [`paths`] - Canonical path normalization
//! - [`prompt`] - Interactive selection behind a trait seam
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use encore::repository::PlaylistRepository;
//!
//! let mut repo = PlaylistRepository::open_in_memory()?;
//! let id = repo.create_playlist("morning jazz")?;
//! repo.add_song(id, "/music/sunrise.wav", 205)?;
//!
//! let playlist = repo.get_playlist_by_name("morning jazz", true)?;
//! assert_eq!(playlist.songs.len(), 1);
//! # Ok::<(), encore::error::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Library functions return `Result<T, encore::error::Error>`. Duplicate
//! playlist names and missing playlists are fatal to a command; duplicate
//! songs inside a bulk add are skipped and reported per item, which is why
//! bulk insertion runs one transaction per song rather than one for the
//! whole batch.
//!
//! ## Logging
//!
//! Diagnostics go through the `log` facade; the binary installs
//! `env_logger`, so `RUST_LOG=debug encore playlist list` shows them.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod fuzzy;
pub mod media;
pub mod models;
pub mod paths;
pub mod prompt;
pub mod repository;
