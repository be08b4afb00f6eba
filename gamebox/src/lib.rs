//! Gamebox - directory-backed game package management
//!
//! A gamebox bundles an installed DOS game's executables, emulated drive
//! volumes, configuration, launch shortcuts and documentation into one
//! self-describing directory. This library derives a stable identity for
//! the package, discovers and classifies the files it contains, maintains
//! the ordered launcher list, and keeps a `Documentation/` mirror folder
//! synchronized with documents found anywhere in the package.
//!
//! # Example
//!
//! ```no_run
//! use gamebox::{ConflictBehaviour, Gamebox, Launcher};
//!
//! # fn main() -> gamebox::GameboxResult<()> {
//! let mut gamebox = Gamebox::open("/games/Alone in the Dark.gamebox")?;
//!
//! let identifier = gamebox.game_identifier()?;
//! println!("{}: {}", gamebox.game_name(), identifier);
//!
//! gamebox.add_launcher(Launcher::new("Play", "C.harddisk/ALONE.EXE").as_default())?;
//!
//! let docs = gamebox.documentation();
//! docs.ensure_folder(true)?;
//! # Ok(())
//! # }
//! ```
//!
//! Operations are synchronous and expect one logical owner per gamebox;
//! concurrent instances over the same directory are a caller error.

pub mod documentation;
pub mod error;
pub mod guard;
pub mod identifier;
pub mod launchers;
pub mod metadata;
pub mod package;
pub mod scan;

pub use documentation::{
    ConflictBehaviour, DocumentationSynchronizer, PopulationReport, DOCUMENTATION_FOLDER_NAME,
};
pub use error::{GameboxError, GameboxResult};
pub use identifier::{GameIdentifier, IdentifierKind};
pub use launchers::{Launcher, LauncherRegistry};
pub use metadata::{GameInfo, GameInfoKey, GAME_INFO_FILENAME};
pub use package::{
    Gamebox, UndoScope, CONFIGURATION_FILE_EXTENSION, CONFIGURATION_FILE_NAME, GAMEBOX_EXTENSION,
};
pub use scan::{ExclusionPatterns, ResourceSet, ScanResults, VolumeKind};
