//! Gamebox CLI - inspect and maintain directory-backed game packages.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use commands::docs::DocsCommand;
use commands::identify::IdentifyArgs;
use commands::info::InfoArgs;
use commands::launchers::LaunchersCommand;

#[derive(Parser)]
#[command(name = "gamebox", version, about = "Inspect and maintain gamebox packages")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a summary of a gamebox.
    Info(InfoArgs),

    /// Manage launcher shortcuts.
    #[command(subcommand)]
    Launchers(LaunchersCommand),

    /// Manage the documentation folder.
    #[command(subcommand)]
    Docs(DocsCommand),

    /// Show or assign the gamebox identifier.
    Identify(IdentifyArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Info(args) => commands::info::run(args),
        Command::Launchers(command) => commands::launchers::run(command),
        Command::Docs(command) => commands::docs::run(command),
        Command::Identify(args) => commands::identify::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
