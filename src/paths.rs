//! Canonical path form shared by the store and the command layer.
//!
//! Songs are keyed by path, so every path crossing into the store goes
//! through [`canonical_form`] first: the same file referenced as
//! `./a.wav`, `songs/../a.wav` or by its absolute path must produce the
//! same key, or duplicate detection and removal both break.

use crate::error::Result;
use path_absolutize::Absolutize;
use std::path::Path;

/// Normalizes `path` to an absolute string with forward slashes.
///
/// Does not require the file to exist and does not resolve symlinks; `.`
/// and `..` components are collapsed against the current directory.
pub fn canonical_form(path: &Path) -> Result<String> {
    let absolute = path.absolutize()?;
    Ok(to_slash(&absolute.to_string_lossy()))
}

#[cfg(windows)]
fn to_slash(raw: &str) -> String {
    raw.replace('\\', "/")
}

#[cfg(not(windows))]
fn to_slash(raw: &str) -> String {
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_relative_path_becomes_absolute() {
        let canonical = canonical_form(Path::new("a.wav")).unwrap();
        assert!(Path::new(&canonical).is_absolute());
        assert!(canonical.ends_with("a.wav"));
    }

    #[test]
    fn test_dot_components_are_collapsed() {
        let direct = canonical_form(Path::new("songs/a.wav")).unwrap();
        let indirect = canonical_form(Path::new("songs/./sub/../a.wav")).unwrap();
        assert_eq!(direct, indirect);
    }

    #[test]
    fn test_absolute_path_is_preserved() {
        let input = PathBuf::from("/music/morning/a.wav");
        assert_eq!(canonical_form(&input).unwrap(), "/music/morning/a.wav");
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        assert!(canonical_form(Path::new("/does/not/exist.wav")).is_ok());
    }
}
