//! Interactive prompts used by the `-i` flows.
//!
//! The command layer only talks to the [`Prompter`] trait; the stdin
//! implementation below is what the binary wires in, while tests inject
//! scripted implementations.

use crate::error::{Error, Result};
use crate::media;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Collaborator that asks the user questions during interactive flows.
pub trait Prompter {
    /// Checkbox-style multi-select over `options`; returns the chosen
    /// subset. An empty selection is valid and means "do nothing".
    fn choose_songs(&mut self, options: &[String]) -> Result<Vec<String>>;

    /// Asks how many paths to add, then collects that many song or folder
    /// paths.
    fn collect_paths(&mut self) -> Result<Vec<PathBuf>>;
}

/// Stdin/stdout prompter used by the CLI binary.
///
/// The multi-select is a numbered list answered with indices ("1 3 4" or
/// "1,3,4"); an empty answer selects nothing.
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn choose_songs(&mut self, options: &[String]) -> Result<Vec<String>> {
        if options.is_empty() {
            return Ok(Vec::new());
        }
        println!("Select songs to remove (numbers separated by spaces or commas, empty for none):");
        for (index, option) in options.iter().enumerate() {
            println!("  [{}] {}", index + 1, option);
        }
        let answer = read_line("> ")?;
        let indices = parse_selection(&answer, options.len())?;
        Ok(indices.into_iter().map(|i| options[i].clone()).collect())
    }

    fn collect_paths(&mut self) -> Result<Vec<PathBuf>> {
        let answer = read_line("How many songs/folders to add? ")?;
        let count = parse_count(&answer)?;
        let mut paths = Vec::with_capacity(count);
        for _ in 0..count {
            let answer = read_line("Path to song/folder: ")?;
            let path = PathBuf::from(answer.trim());
            validate_path(&path)?;
            paths.push(path);
        }
        Ok(paths)
    }
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

/// Parses a positive count, rejecting anything else as user error.
fn parse_count(input: &str) -> Result<usize> {
    match input.trim().parse::<usize>() {
        Ok(count) if count >= 1 => Ok(count),
        _ => Err(Error::InvalidInput(
            "you must enter a positive number".to_string(),
        )),
    }
}

/// Parses 1-based indices out of "1 3,4"; rejects anything out of range.
fn parse_selection(input: &str, max: usize) -> Result<Vec<usize>> {
    let mut indices = Vec::new();
    for token in input.split(|c: char| c == ',' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        let number: usize = token.parse().map_err(|_| {
            Error::InvalidInput(format!("`{token}` is not a number"))
        })?;
        if number < 1 || number > max {
            return Err(Error::InvalidInput(format!(
                "`{number}` is out of range (1-{max})"
            )));
        }
        if !indices.contains(&(number - 1)) {
            indices.push(number - 1);
        }
    }
    Ok(indices)
}

/// Files must carry the recognized audio extension; directories are
/// accepted as-is and expanded later.
fn validate_path(path: &Path) -> Result<()> {
    if path.is_file() && !media::is_audio_file(path) {
        return Err(Error::InvalidInput(format!(
            "you must select a .{} file, got `{}`",
            media::AUDIO_EXTENSION,
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_accepts_positive_numbers() {
        assert_eq!(parse_count("3\n").unwrap(), 3);
        assert_eq!(parse_count(" 1 ").unwrap(), 1);
    }

    #[test]
    fn test_parse_count_rejects_bad_input() {
        assert!(parse_count("0").is_err());
        assert!(parse_count("-2").is_err());
        assert!(parse_count("many").is_err());
        assert!(parse_count("").is_err());
    }

    #[test]
    fn test_parse_selection_mixed_separators() {
        assert_eq!(parse_selection("1 3,4\n", 5).unwrap(), vec![0, 2, 3]);
    }

    #[test]
    fn test_parse_selection_empty_means_none() {
        assert!(parse_selection("\n", 5).unwrap().is_empty());
    }

    #[test]
    fn test_parse_selection_deduplicates() {
        assert_eq!(parse_selection("2 2 2", 3).unwrap(), vec![1]);
    }

    #[test]
    fn test_parse_selection_rejects_out_of_range() {
        assert!(parse_selection("0", 3).is_err());
        assert!(parse_selection("4", 3).is_err());
        assert!(parse_selection("x", 3).is_err());
    }
}
