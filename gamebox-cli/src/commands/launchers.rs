//! `gamebox launchers` - manage launcher shortcuts.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use gamebox::{Gamebox, Launcher};

use crate::error::CliError;

#[derive(Subcommand)]
pub enum LaunchersCommand {
    /// List launchers.
    List(ListArgs),
    /// Add a launcher.
    Add(AddArgs),
    /// Remove a launcher by position.
    Remove(RemoveArgs),
    /// Change or clear the default launcher.
    SetDefault(SetDefaultArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Path to the gamebox directory.
    pub path: PathBuf,
}

#[derive(Args)]
pub struct AddArgs {
    /// Path to the gamebox directory.
    pub path: PathBuf,

    /// Display name of the launcher.
    pub title: String,

    /// Program path, relative to the gamebox root.
    pub program: String,

    /// Launch-time arguments.
    #[arg(long, default_value = "")]
    pub arguments: String,

    /// Make this the default launcher.
    #[arg(long)]
    pub default: bool,

    /// Insert at this position instead of appending.
    #[arg(long)]
    pub index: Option<usize>,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Path to the gamebox directory.
    pub path: PathBuf,

    /// Position of the launcher to remove.
    pub index: usize,
}

#[derive(Args)]
pub struct SetDefaultArgs {
    /// Path to the gamebox directory.
    pub path: PathBuf,

    /// Position of the new default launcher.
    pub index: Option<usize>,

    /// Clear the default launcher instead.
    #[arg(long, conflicts_with = "index")]
    pub clear: bool,
}

pub fn run(command: LaunchersCommand) -> Result<(), CliError> {
    match command {
        LaunchersCommand::List(args) => list(args),
        LaunchersCommand::Add(args) => add(args),
        LaunchersCommand::Remove(args) => remove(args),
        LaunchersCommand::SetDefault(args) => set_default(args),
    }
}

fn list(args: ListArgs) -> Result<(), CliError> {
    let gamebox = Gamebox::open(&args.path)?;
    for (index, launcher) in gamebox.launchers().iter().enumerate() {
        let marker = if launcher.is_default { "*" } else { " " };
        println!(
            "{}[{}] {} -> {} {}",
            marker, index, launcher.title, launcher.path, launcher.arguments
        );
    }
    Ok(())
}

fn add(args: AddArgs) -> Result<(), CliError> {
    let mut gamebox = Gamebox::open(&args.path)?;

    let mut launcher = Launcher::new(args.title, args.program).with_arguments(args.arguments);
    if args.default {
        launcher = launcher.as_default();
    }

    match args.index {
        Some(index) => gamebox.insert_launcher(launcher, index)?,
        None => gamebox.add_launcher(launcher)?,
    }
    Ok(())
}

fn remove(args: RemoveArgs) -> Result<(), CliError> {
    let mut gamebox = Gamebox::open(&args.path)?;
    let removed = gamebox.remove_launcher_at(args.index)?;
    println!("removed {:?}", removed.title);
    Ok(())
}

fn set_default(args: SetDefaultArgs) -> Result<(), CliError> {
    let mut gamebox = Gamebox::open(&args.path)?;
    if !args.clear && args.index.is_none() {
        return Err(CliError::Usage(
            "give a launcher position or --clear".to_string(),
        ));
    }
    gamebox.set_default_launcher_index(args.index)?;
    Ok(())
}
