//! `gamebox identify` - show or assign the gamebox identifier.

use std::path::PathBuf;

use clap::Args;

use gamebox::{Gamebox, IdentifierKind};

use crate::error::CliError;

#[derive(Args)]
pub struct IdentifyArgs {
    /// Path to the gamebox directory.
    pub path: PathBuf,

    /// Assign this identifier instead of resolving the current one.
    #[arg(long)]
    pub set: Option<String>,

    /// Kind tag for the assigned identifier
    /// (user-specified or reverse-dns).
    #[arg(long, requires = "set", default_value = "user-specified")]
    pub kind: String,
}

pub fn run(args: IdentifyArgs) -> Result<(), CliError> {
    let mut gamebox = Gamebox::open(&args.path)?;

    if let Some(value) = args.set {
        let kind = IdentifierKind::from_str_tag(&args.kind).ok_or_else(|| {
            CliError::Usage(format!("unknown identifier kind {:?}", args.kind))
        })?;
        if !matches!(
            kind,
            IdentifierKind::UserSpecified | IdentifierKind::ReverseDns
        ) {
            return Err(CliError::Usage(
                "only user-specified and reverse-dns identifiers can be assigned".to_string(),
            ));
        }
        gamebox.set_game_identifier(value, kind)?;
    }

    println!("{}", gamebox.game_identifier()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_set_user_specified_identifier() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("Game.gamebox");
        fs::create_dir(&root).unwrap();

        run(IdentifyArgs {
            path: root.clone(),
            set: Some("my-game".to_string()),
            kind: "user-specified".to_string(),
        })
        .unwrap();

        let mut gamebox = Gamebox::open(&root).unwrap();
        let id = gamebox.game_identifier().unwrap();
        assert_eq!(id.value, "my-game");
        assert_eq!(id.kind, IdentifierKind::UserSpecified);
    }

    #[test]
    fn test_digest_kind_cannot_be_assigned() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("Game.gamebox");
        fs::create_dir(&root).unwrap();

        let result = run(IdentifyArgs {
            path: root,
            set: Some("abc123".to_string()),
            kind: "executable-digest".to_string(),
        });
        assert!(matches!(result, Err(CliError::Usage(_))));
    }
}
