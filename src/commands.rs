//! Orchestration for the `playlist` command group.
//!
//! Each function maps to one CLI subcommand: it resolves the playlist,
//! drives the repository, and prints the outcome. Policy lives here, not
//! in the repository: which failures abort the command, which are
//! reported and skipped, and what the user sees for each.

use crate::error::{Error, Result};
use crate::fuzzy;
use crate::media::DurationProbe;
use crate::models::PlaylistSummary;
use crate::paths::canonical_form;
use crate::prompt::Prompter;
use crate::repository::{AddOutcome, AddReport, PlaylistRepository, RemoveReport};
use chrono::{DateTime, Utc};
use log::info;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Default number of results for the fuzzy `list` query.
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// `playlist create NAME [-s SONG]... [-f FOLDER]... [-i]`
///
/// A name collision aborts before any song insertion is attempted.
pub fn create(
    repo: &mut PlaylistRepository,
    name: &str,
    songs: &[PathBuf],
    folders: &[PathBuf],
    interactive: bool,
    probe: &dyn DurationProbe,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let playlist_id = repo.create_playlist(name)?;
    add_paths_and_folders(repo, playlist_id, songs, folders, probe)?;
    if interactive {
        add_interactively(repo, playlist_id, probe, prompter)?;
    }
    println!("Playlist `{name}` created.");
    Ok(())
}

/// `playlist add-songs NAME [-s SONG]... [-f FOLDER]... [-i]`
pub fn add_songs(
    repo: &mut PlaylistRepository,
    name: &str,
    songs: &[PathBuf],
    folders: &[PathBuf],
    interactive: bool,
    probe: &dyn DurationProbe,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let playlist = repo.get_playlist_by_name(name, false)?;
    add_paths_and_folders(repo, playlist.id, songs, folders, probe)?;
    if interactive {
        add_interactively(repo, playlist.id, probe, prompter)?;
    }
    Ok(())
}

/// `playlist rm-songs NAME [-s SONG]... [-i]`
///
/// Explicit songs and interactive mode are mutually exclusive; the
/// conflict is rejected before any store access. An empty song set (or an
/// empty interactive selection) is a reported no-op.
pub fn remove_songs(
    repo: &mut PlaylistRepository,
    name: &str,
    songs: &[PathBuf],
    interactive: bool,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    if !songs.is_empty() && interactive {
        return Err(Error::UserInputConflict(
            "you cannot use interactive mode and pass songs to remove".to_string(),
        ));
    }

    if interactive {
        let playlist = repo.get_playlist_by_name(name, true)?;
        let options: Vec<String> = playlist.songs.iter().map(|s| s.path.clone()).collect();
        let chosen = prompter.choose_songs(&options)?;
        if chosen.is_empty() {
            println!("No songs were selected, so nothing to do.");
            return Ok(());
        }
        let report = repo.remove_songs(playlist.id, &chosen.into_iter().collect())?;
        print_removal(&report);
    } else {
        if songs.is_empty() {
            println!("No songs were provided, so nothing to do.");
            return Ok(());
        }
        let playlist = repo.get_playlist_by_name(name, false)?;
        let mut requested = BTreeSet::new();
        for song in songs {
            requested.insert(canonical_form(song)?);
        }
        let report = repo.remove_songs(playlist.id, &requested)?;
        print_removal(&report);
    }
    Ok(())
}

/// `playlist rename OLD_NAME NEW_NAME`
pub fn rename(repo: &mut PlaylistRepository, old_name: &str, new_name: &str) -> Result<()> {
    repo.rename_playlist(old_name, new_name)?;
    println!("Renamed playlist `{old_name}` to `{new_name}`.");
    Ok(())
}

/// `playlist delete NAME`
pub fn delete(repo: &mut PlaylistRepository, name: &str) -> Result<()> {
    repo.delete_playlist(name)?;
    println!("Playlist `{name}` deleted.");
    Ok(())
}

/// `playlist clear`
pub fn clear(repo: &mut PlaylistRepository) -> Result<()> {
    repo.clear_all()?;
    println!("Database cleared.");
    Ok(())
}

/// `playlist list [-n QUERY] [-c COUNT]`
///
/// Without a query, every playlist in store order; with one, the fuzzy
/// top-`count` ranked by [`fuzzy::extract`].
pub fn list(repo: &PlaylistRepository, query: Option<&str>, count: usize) -> Result<()> {
    let summaries = repo.list_playlists()?;
    let selected: Vec<&PlaylistSummary> = match query {
        Some(query) if !query.is_empty() => {
            let names: Vec<String> = summaries.iter().map(|s| s.name.clone()).collect();
            fuzzy::extract(query, &names, count)
                .into_iter()
                .map(|(index, _)| &summaries[index])
                .collect()
        }
        _ => summaries.iter().collect(),
    };

    let rows: Vec<Vec<String>> = selected
        .iter()
        .map(|summary| {
            vec![
                summary.name.clone(),
                summary.created_at.to_rfc3339(),
                format_optional_datetime(summary.updated_at.as_ref()),
            ]
        })
        .collect();
    print_table("Playlists", &["name", "created_at", "updated_at"], &rows);
    Ok(())
}

/// `playlist describe NAME`
///
/// Prints the playlist's timestamps, then its songs with the title derived
/// from the path's file name without extension.
pub fn describe(repo: &PlaylistRepository, name: &str) -> Result<()> {
    let playlist = repo.get_playlist_by_name(name, true)?;

    println!("{name}");
    println!("  creation date : {}", format_datetime(&playlist.created_at));
    println!(
        "  last update   : {}",
        match playlist.updated_at.as_ref() {
            Some(updated) => format_datetime(updated),
            None => String::new(),
        }
    );
    println!();

    let rows: Vec<Vec<String>> = playlist
        .songs
        .iter()
        .map(|song| {
            vec![
                song_title(&song.path),
                song.path.clone(),
                format_datetime(&song.created_at),
                format_duration(song.duration),
            ]
        })
        .collect();
    print_table("Songs", &["title", "path", "creation date", "duration"], &rows);
    Ok(())
}

fn add_paths_and_folders(
    repo: &mut PlaylistRepository,
    playlist_id: i64,
    songs: &[PathBuf],
    folders: &[PathBuf],
    probe: &dyn DurationProbe,
) -> Result<()> {
    let reports = repo.add_songs_from_paths(playlist_id, songs, probe)?;
    report_additions(&reports);
    for folder in folders {
        let reports = repo.add_songs_from_folder(playlist_id, folder, probe)?;
        report_additions(&reports);
    }
    Ok(())
}

fn add_interactively(
    repo: &mut PlaylistRepository,
    playlist_id: i64,
    probe: &dyn DurationProbe,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let collected = prompter.collect_paths()?;
    info!("Collected {} path(s) interactively", collected.len());
    let (folders, songs): (Vec<PathBuf>, Vec<PathBuf>) =
        collected.into_iter().partition(|path| path.is_dir());
    add_paths_and_folders(repo, playlist_id, &songs, &folders, probe)
}

fn report_additions(reports: &[AddReport]) {
    for report in reports {
        match report.outcome {
            AddOutcome::Added => println!("Song {} was added to playlist.", report.path),
            AddOutcome::Duplicate => {
                println!("Song {} already exists and was not added.", report.path);
            }
        }
    }
}

fn print_removal(report: &RemoveReport) {
    if !report.not_found.is_empty() {
        println!("The following songs were not found:");
        for path in &report.not_found {
            println!("  - {path}");
        }
    }
    if report.removed.is_empty() {
        println!("No songs were removed.");
    } else {
        println!("The following songs were removed:");
        for path in &report.removed {
            println!("  - {path}");
        }
    }
}

/// File name without extension, used as the displayed song title.
fn song_title(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn format_optional_datetime(dt: Option<&DateTime<Utc>>) -> String {
    dt.map(|dt| dt.to_rfc3339()).unwrap_or_default()
}

/// `3723` seconds renders as `1h2m3s`; zero components are omitted, so a
/// zero duration renders as an empty string.
fn format_duration(total_seconds: i64) -> String {
    let (minutes, seconds) = (total_seconds / 60, total_seconds % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);

    let mut rendered = String::new();
    if hours > 0 {
        rendered.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        rendered.push_str(&format!("{minutes}m"));
    }
    if seconds > 0 {
        rendered.push_str(&format!("{seconds}s"));
    }
    rendered
}

fn print_table(title: &str, headers: &[&str], rows: &[Vec<String>]) {
    println!("{title}");
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.len());
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| format!("{:width$}", header, width = widths[index]))
        .collect();
    println!("  {}", header_line.join("  "));

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(index, cell)| format!("{:width$}", cell, width = widths[index]))
            .collect();
        println!("  {}", cells.join("  "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::PlaylistRepository;

    struct FixedProbe(f64);

    impl DurationProbe for FixedProbe {
        fn duration_seconds(&self, _path: &Path) -> Result<f64> {
            Ok(self.0)
        }
    }

    /// Prompter whose answers are scripted in advance.
    struct ScriptedPrompter {
        selection: Vec<String>,
        paths: Vec<PathBuf>,
    }

    impl Prompter for ScriptedPrompter {
        fn choose_songs(&mut self, _options: &[String]) -> Result<Vec<String>> {
            Ok(self.selection.clone())
        }

        fn collect_paths(&mut self) -> Result<Vec<PathBuf>> {
            Ok(self.paths.clone())
        }
    }

    fn noop_prompter() -> ScriptedPrompter {
        ScriptedPrompter {
            selection: Vec::new(),
            paths: Vec::new(),
        }
    }

    #[test]
    fn test_create_rejects_duplicate_before_adding_songs() {
        let mut repo = PlaylistRepository::open_in_memory().unwrap();
        let id = repo.create_playlist("taken").unwrap();

        let err = create(
            &mut repo,
            "taken",
            &[PathBuf::from("/m/new.wav")],
            &[],
            false,
            &FixedProbe(1.0),
            &mut noop_prompter(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::DuplicateKey(_)));
        // the existing playlist gained nothing
        assert!(repo.get_playlist_by_name("taken", true).unwrap().songs.is_empty());
        let _ = id;
    }

    #[test]
    fn test_remove_songs_conflict_detected_before_store_access() {
        let mut repo = PlaylistRepository::open_in_memory().unwrap();
        // no playlist exists; the conflict must win over NotFound
        let err = remove_songs(
            &mut repo,
            "absent",
            &[PathBuf::from("/m/a.wav")],
            true,
            &mut noop_prompter(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UserInputConflict(_)));
    }

    #[test]
    fn test_remove_songs_empty_set_is_noop() {
        let mut repo = PlaylistRepository::open_in_memory().unwrap();
        // even a missing playlist is fine: the no-op returns before lookup
        remove_songs(&mut repo, "absent", &[], false, &mut noop_prompter()).unwrap();
    }

    #[test]
    fn test_remove_songs_interactive_selection() {
        let mut repo = PlaylistRepository::open_in_memory().unwrap();
        let id = repo.create_playlist("p").unwrap();
        repo.add_song(id, "/m/a.wav", 1).unwrap();
        repo.add_song(id, "/m/b.wav", 1).unwrap();

        let mut prompter = ScriptedPrompter {
            selection: vec!["/m/a.wav".to_string()],
            paths: Vec::new(),
        };
        remove_songs(&mut repo, "p", &[], true, &mut prompter).unwrap();

        let playlist = repo.get_playlist_by_name("p", true).unwrap();
        assert_eq!(playlist.songs.len(), 1);
        assert_eq!(playlist.songs[0].path, "/m/b.wav");
    }

    #[test]
    fn test_remove_songs_interactive_empty_selection_is_noop() {
        let mut repo = PlaylistRepository::open_in_memory().unwrap();
        let id = repo.create_playlist("p").unwrap();
        repo.add_song(id, "/m/a.wav", 1).unwrap();

        remove_songs(&mut repo, "p", &[], true, &mut noop_prompter()).unwrap();
        assert_eq!(repo.get_playlist_by_name("p", true).unwrap().songs.len(), 1);
    }

    #[test]
    fn test_add_songs_requires_existing_playlist() {
        let mut repo = PlaylistRepository::open_in_memory().unwrap();
        let err = add_songs(
            &mut repo,
            "absent",
            &[PathBuf::from("/m/a.wav")],
            &[],
            false,
            &FixedProbe(1.0),
            &mut noop_prompter(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_interactive_add_splits_files_and_folders() {
        use std::fs;
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("direct.wav"), []).unwrap();
        let folder = dir.path().join("more");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("inner.wav"), []).unwrap();

        let mut repo = PlaylistRepository::open_in_memory().unwrap();
        let mut prompter = ScriptedPrompter {
            selection: Vec::new(),
            paths: vec![dir.path().join("direct.wav"), folder.clone()],
        };
        create(
            &mut repo,
            "p",
            &[],
            &[],
            true,
            &FixedProbe(2.0),
            &mut prompter,
        )
        .unwrap();

        let playlist = repo.get_playlist_by_name("p", true).unwrap();
        let stored: Vec<&str> = playlist.songs.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().any(|p| p.ends_with("direct.wav")));
        assert!(stored.iter().any(|p| p.ends_with("inner.wav")));
    }

    #[test]
    fn test_song_title_strips_directory_and_extension() {
        assert_eq!(song_title("/music/morning/sunrise.wav"), "sunrise");
        assert_eq!(song_title("plain.wav"), "plain");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(3723), "1h2m3s");
        assert_eq!(format_duration(205), "3m25s");
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(3600), "1h");
        assert_eq!(format_duration(0), "");
    }

    #[test]
    fn test_list_and_describe_do_not_fail() {
        let mut repo = PlaylistRepository::open_in_memory().unwrap();
        let id = repo.create_playlist("morning jazz").unwrap();
        repo.add_song(id, "/m/sunrise.wav", 205).unwrap();

        list(&repo, None, DEFAULT_LIST_LIMIT).unwrap();
        list(&repo, Some("jazz"), 5).unwrap();
        describe(&repo, "morning jazz").unwrap();
    }
}
