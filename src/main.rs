//! # Encore - Playlist Management CLI
//!
//! Thin binary over the `encore` library: initializes logging, parses
//! arguments, opens the repository and routes each `playlist` subcommand
//! to its command function. Any command-aborting error propagates out of
//! `main` and exits with status 1.

use anyhow::Result;
use clap::Parser;
use encore::cli::{Args, Command, PlaylistCommand};
use encore::media::FfmpegProbe;
use encore::prompt::StdinPrompter;
use encore::repository::PlaylistRepository;
use encore::{commands, config};
use log::info;

fn main() -> Result<()> {
    // Initialize environment logger; controlled via RUST_LOG
    env_logger::init();

    let args = Args::parse();

    let db_path = match args.db_path {
        Some(path) => path,
        None => config::get_db_path()?,
    };
    info!("Using playlist database at {}", db_path.display());
    let mut repo = PlaylistRepository::open(&db_path)?;

    let probe = FfmpegProbe;
    let mut prompter = StdinPrompter;

    let Command::Playlist { action } = args.command;
    match action {
        PlaylistCommand::Create {
            name,
            songs,
            folders,
            interactive,
        } => {
            commands::create(
                &mut repo,
                &name,
                &songs,
                &folders,
                interactive,
                &probe,
                &mut prompter,
            )?;
        }
        PlaylistCommand::List { name, count } => {
            commands::list(&repo, name.as_deref(), count)?;
        }
        PlaylistCommand::Describe { name } => {
            commands::describe(&repo, &name)?;
        }
        PlaylistCommand::Rename { old_name, new_name } => {
            commands::rename(&mut repo, &old_name, &new_name)?;
        }
        PlaylistCommand::Delete { name } => {
            commands::delete(&mut repo, &name)?;
        }
        PlaylistCommand::Clear => {
            commands::clear(&mut repo)?;
        }
        PlaylistCommand::AddSongs {
            name,
            songs,
            folders,
            interactive,
        } => {
            commands::add_songs(
                &mut repo,
                &name,
                &songs,
                &folders,
                interactive,
                &probe,
                &mut prompter,
            )?;
        }
        PlaylistCommand::RmSongs {
            name,
            songs,
            interactive,
        } => {
            commands::remove_songs(&mut repo, &name, &songs, interactive, &mut prompter)?;
        }
    }

    Ok(())
}
