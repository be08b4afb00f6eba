//! `gamebox info` - summarize a gamebox.

use std::path::PathBuf;

use clap::Args;

use gamebox::Gamebox;

use crate::error::CliError;

#[derive(Args)]
pub struct InfoArgs {
    /// Path to the gamebox directory.
    pub path: PathBuf,
}

pub fn run(args: InfoArgs) -> Result<(), CliError> {
    let mut gamebox = Gamebox::open(&args.path)?;

    println!("Name:        {}", gamebox.game_name());
    println!("Identifier:  {}", gamebox.game_identifier()?);

    match gamebox.target_program() {
        Some(target) => println!("Target:      {}", target.display()),
        None => println!("Target:      (none)"),
    }
    println!("Close on exit: {}", gamebox.close_on_exit());

    match gamebox.configuration_file() {
        Some(conf) => println!("Config:      {}", conf.display()),
        None => println!("Config:      (missing)"),
    }

    println!(
        "Volumes:     {} hdd, {} cd, {} floppy",
        gamebox.hdd_volumes()?.len(),
        gamebox.cd_volumes()?.len(),
        gamebox.floppy_volumes()?.len()
    );
    println!("Executables: {}", gamebox.executables()?.len());

    let launchers = gamebox.launchers();
    if launchers.is_empty() {
        println!("Launchers:   (none)");
    } else {
        println!("Launchers:");
        for (index, launcher) in launchers.iter().enumerate() {
            let marker = if launcher.is_default { "*" } else { " " };
            println!(
                "  {}[{}] {} -> {} {}",
                marker, index, launcher.title, launcher.path, launcher.arguments
            );
        }
    }

    println!("Documents:   {}", gamebox.documentation_urls()?.len());
    Ok(())
}
