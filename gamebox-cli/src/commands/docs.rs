//! `gamebox docs` - manage the documentation folder.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use gamebox::{ConflictBehaviour, Gamebox};

use crate::error::CliError;

#[derive(Subcommand)]
pub enum DocsCommand {
    /// List the gamebox's documentation.
    List(ListArgs),
    /// Create (if needed) and populate the documentation folder.
    Populate(PopulateArgs),
    /// Import a file into the documentation folder.
    Import(ImportArgs),
    /// Move a documentation entry to the trash.
    Trash(TrashArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Path to the gamebox directory.
    pub path: PathBuf,
}

#[derive(Args)]
pub struct PopulateArgs {
    /// Path to the gamebox directory.
    pub path: PathBuf,

    /// Create the documentation folder if it is missing.
    #[arg(long)]
    pub create: bool,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Path to the gamebox directory.
    pub path: PathBuf,

    /// File to import.
    pub source: PathBuf,

    /// Name for the imported file (the source's extension is kept).
    #[arg(long)]
    pub title: Option<String>,

    /// Overwrite an existing entry instead of renaming.
    #[arg(long)]
    pub replace: bool,

    /// Create a symlink instead of copying.
    #[arg(long)]
    pub symlink: bool,
}

#[derive(Args)]
pub struct TrashArgs {
    /// Path to the gamebox directory.
    pub path: PathBuf,

    /// Documentation entry to move to the trash.
    pub entry: PathBuf,
}

pub fn run(command: DocsCommand) -> Result<(), CliError> {
    match command {
        DocsCommand::List(args) => list(args),
        DocsCommand::Populate(args) => populate(args),
        DocsCommand::Import(args) => import(args),
        DocsCommand::Trash(args) => trash(args),
    }
}

fn list(args: ListArgs) -> Result<(), CliError> {
    let mut gamebox = Gamebox::open(&args.path)?;
    for url in gamebox.documentation_urls()? {
        println!("{}", url.display());
    }
    Ok(())
}

fn populate(args: PopulateArgs) -> Result<(), CliError> {
    let mut gamebox = Gamebox::open(&args.path)?;

    if args.create {
        gamebox.documentation().ensure_folder(true)?;
    }
    let report = gamebox.populate_documentation()?;

    println!(
        "linked {}, skipped {} already present",
        report.created.len(),
        report.skipped
    );
    for (candidate, reason) in &report.failures {
        tracing::warn!(candidate = %candidate.display(), %reason, "could not link documentation");
        eprintln!("failed: {}: {}", candidate.display(), reason);
    }
    Ok(())
}

fn import(args: ImportArgs) -> Result<(), CliError> {
    let gamebox = Gamebox::open(&args.path)?;
    let docs = gamebox.documentation();

    let conflict = if args.replace {
        ConflictBehaviour::Replace
    } else {
        ConflictBehaviour::Rename
    };

    let dest = if args.symlink {
        docs.import_symlink(&args.source, args.title.as_deref(), conflict)?
    } else {
        docs.import_file(&args.source, args.title.as_deref(), conflict)?
    };
    println!("{}", dest.display());
    Ok(())
}

fn trash(args: TrashArgs) -> Result<(), CliError> {
    let gamebox = Gamebox::open(&args.path)?;
    let trashed = gamebox.documentation().trash(&args.entry)?;
    println!("moved to {}", trashed.display());
    Ok(())
}
