//! Media probing and audio file discovery.
//!
//! Durations come from an external `ffmpeg` process: it prints a
//! `Duration: hh:mm:ss.cc` line in its banner, which is the only part of
//! its output this crate reads. The probe sits behind a trait so the
//! repository can be tested without ffmpeg installed.

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;
use walkdir::WalkDir;

/// The only audio extension the playlist store recognizes.
pub const AUDIO_EXTENSION: &str = "wav";

lazy_static! {
    static ref DURATION_RE: Regex =
        Regex::new(r"Duration: (\d{2}):(\d{2}):(\d{2})\.(\d{2})").expect("valid duration regex");
}

/// Resolves a media file's duration in seconds.
pub trait DurationProbe {
    fn duration_seconds(&self, path: &Path) -> Result<f64>;
}

/// Probes durations by running `ffmpeg -i FILE` and parsing its banner.
///
/// Without an output argument ffmpeg exits non-zero and prints the banner
/// on stderr; that is expected and not treated as a failure as long as the
/// duration line is present.
#[derive(Debug, Default)]
pub struct FfmpegProbe;

impl DurationProbe for FfmpegProbe {
    fn duration_seconds(&self, path: &Path) -> Result<f64> {
        let output = Command::new("ffmpeg")
            .arg("-i")
            .arg(path)
            .output()
            .map_err(|err| Error::ExternalTool {
                path: path.to_path_buf(),
                message: format!("could not run ffmpeg: {err}"),
            })?;

        let banner = String::from_utf8_lossy(&output.stderr);
        debug!("ffmpeg banner for {}: {} bytes", path.display(), banner.len());
        parse_duration(&banner).ok_or_else(|| Error::ExternalTool {
            path: path.to_path_buf(),
            message: format!("no duration line in ffmpeg output:\n{banner}"),
        })
    }
}

/// Extracts the duration in seconds from an ffmpeg banner, if present.
pub fn parse_duration(output: &str) -> Option<f64> {
    let caps = DURATION_RE.captures(output)?;
    let hours: f64 = caps[1].parse().ok()?;
    let minutes: f64 = caps[2].parse().ok()?;
    let seconds: f64 = caps[3].parse().ok()?;
    let centis: f64 = caps[4].parse().ok()?;
    Some(hours * 3600.0 + minutes * 60.0 + seconds + centis / 100.0)
}

/// True when `path` has the recognized audio extension.
pub fn is_audio_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(AUDIO_EXTENSION)
}

/// Every audio file anywhere under `folder`, in lexical traversal order.
///
/// Other file types are skipped silently, matching how the original folder
/// expansion only ever looked for the recognized extension.
pub fn find_audio_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && is_audio_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    debug!(
        "Found {} audio file(s) under {}",
        files.len(),
        folder.display()
    );
    Ok(files)
}
