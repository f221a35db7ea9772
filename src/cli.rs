//! # Command-Line Interface Module
//!
//! Defines the command-line surface with Clap derive macros. All
//! functionality hangs off the `playlist` command group; doc comments on
//! the variants double as help text.
//!
//! ## Examples
//!
//! ```bash
//! encore playlist create "morning jazz" -s sunrise.wav -f ~/Music/jazz
//! encore playlist list -n jazz -c 5
//! encore playlist rm-songs "morning jazz" -i
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main application arguments structure.
#[derive(Parser)]
#[command(name = "encore")]
#[command(about = "Encore - Playlist management for the command line")]
#[command(version)]
pub struct Args {
    /// Database file location
    #[arg(long, env = "ENCORE_DB_PATH", global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Manage audio playlists
    Playlist {
        #[command(subcommand)]
        action: PlaylistCommand,
    },
}

/// The `playlist` command group.
///
/// Every mutating command resolves its playlist by exact name; `list` is
/// the only place fuzzy matching applies.
#[derive(Subcommand)]
pub enum PlaylistCommand {
    /// Create a playlist, optionally seeding it with songs
    ///
    /// Fails if a playlist with the same name already exists; in that case
    /// no songs are added.
    Create {
        /// Name of the playlist
        name: String,

        /// Song to add to the playlist (repeatable). Only ".wav" files are
        /// supported
        #[arg(short = 's', long = "song", value_name = "SONG")]
        songs: Vec<PathBuf>,

        /// Folder whose ".wav" files are added recursively (repeatable)
        #[arg(short = 'f', long = "folder", value_name = "FOLDER")]
        folders: Vec<PathBuf>,

        /// Choose additional songs and folders interactively
        #[arg(short, long)]
        interactive: bool,
    },

    /// List playlists
    ///
    /// Without a query, every playlist is shown in store order. With one,
    /// playlists are ranked by fuzzy name similarity.
    List {
        /// Filter playlists by performing a fuzzy search on this name
        #[arg(short, long)]
        name: Option<String>,

        /// Number of results to return for the fuzzy search
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },

    /// Show a playlist's timestamps and songs
    Describe {
        /// Name of the playlist
        name: String,
    },

    /// Rename a playlist
    Rename {
        /// Current name of the playlist
        old_name: String,

        /// New name of the playlist
        new_name: String,
    },

    /// Delete a playlist and all of its songs
    Delete {
        /// Name of the playlist
        name: String,
    },

    /// Delete every playlist and song
    Clear,

    /// Add songs to an existing playlist
    AddSongs {
        /// Name of the playlist
        name: String,

        /// Song to add to the playlist (repeatable). Only ".wav" files are
        /// supported
        #[arg(short = 's', long = "song", value_name = "SONG")]
        songs: Vec<PathBuf>,

        /// Folder whose ".wav" files are added recursively (repeatable)
        #[arg(short = 'f', long = "folder", value_name = "FOLDER")]
        folders: Vec<PathBuf>,

        /// Choose additional songs and folders interactively
        #[arg(short, long)]
        interactive: bool,
    },

    /// Remove songs from a playlist
    ///
    /// Explicit songs and interactive mode are mutually exclusive.
    RmSongs {
        /// Name of the playlist
        name: String,

        /// Song to remove, by its full path (repeatable)
        #[arg(short = 's', long = "song", value_name = "SONG")]
        songs: Vec<PathBuf>,

        /// Choose songs to remove from a displayed selection
        #[arg(short, long)]
        interactive: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_create_with_songs_and_folders() {
        let args = Args::parse_from([
            "encore", "playlist", "create", "my playlist", "-s", "a.wav", "-s", "b.wav", "-f",
            "folder",
        ]);
        let Command::Playlist { action } = args.command;
        match action {
            PlaylistCommand::Create {
                name,
                songs,
                folders,
                interactive,
            } => {
                assert_eq!(name, "my playlist");
                assert_eq!(songs.len(), 2);
                assert_eq!(folders.len(), 1);
                assert!(!interactive);
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_parse_list_defaults() {
        let args = Args::parse_from(["encore", "playlist", "list"]);
        let Command::Playlist { action } = args.command;
        match action {
            PlaylistCommand::List { name, count } => {
                assert!(name.is_none());
                assert_eq!(count, 10);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_subcommands_use_kebab_case() {
        let args = Args::parse_from(["encore", "playlist", "rm-songs", "p", "-i"]);
        let Command::Playlist { action } = args.command;
        assert!(matches!(
            action,
            PlaylistCommand::RmSongs {
                interactive: true,
                ..
            }
        ));
    }
}
