//! The gamebox package type.
//!
//! A [`Gamebox`] is a directory-backed bundle holding an installed DOS
//! game: its executables, drive volumes, configuration, launch shortcuts
//! and documentation. The type composes a root path with the game info
//! store, the launcher registry and cached scan results; it does not wrap
//! any host bundle abstraction.
//!
//! All operations are synchronous and intended for one logical owner per
//! gamebox at a time. There is no internal locking, and two `Gamebox`
//! instances opened on the same directory are not coordinated — callers
//! must serialize access externally.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::documentation::{DocumentationSynchronizer, PopulationReport};
use crate::error::{GameboxError, GameboxResult};
use crate::guard;
use crate::identifier::{digest_executables, GameIdentifier, IdentifierKind};
use crate::launchers::{Launcher, LauncherRegistry};
use crate::metadata::{GameInfo, GameInfoKey, GAME_INFO_FILENAME};
use crate::scan::{self, ExclusionPatterns, ScanResults, VolumeKind};

/// Extension carried by gamebox directories (`Alone in the Dark.gamebox`).
pub const GAMEBOX_EXTENSION: &str = "gamebox";

/// File name of the emulator configuration file inside the gamebox.
pub const CONFIGURATION_FILE_NAME: &str = "DOSBox Preferences";

/// Extension of the emulator configuration file.
pub const CONFIGURATION_FILE_EXTENSION: &str = "conf";

/// Hook invoked around undoable mutations (launcher edits, target program
/// changes).
///
/// The gamebox calls `begin` before applying a mutation and `end` after,
/// and never inspects the implementation — undo bookkeeping belongs to the
/// host application.
pub trait UndoScope {
    /// A mutation named `operation` is about to be applied.
    fn begin(&self, operation: &str);
    /// The mutation named `operation` has been applied.
    fn end(&self, operation: &str);
}

/// A directory-backed game package.
pub struct Gamebox {
    path: PathBuf,
    game_info: GameInfo,
    launchers: LauncherRegistry,
    scan_cache: Option<ScanResults>,
    executable_exclusions: ExclusionPatterns,
    documentation_exclusions: ExclusionPatterns,
    trash_dir: PathBuf,
    undo_scope: Option<Box<dyn UndoScope>>,
}

impl Gamebox {
    /// Open the gamebox at `path`.
    ///
    /// The path must be an existing directory. Game info and launchers are
    /// loaded immediately; resources are not scanned until first requested.
    ///
    /// # Errors
    ///
    /// Returns [`GameboxError::OpenFailed`] if the path is missing or not a
    /// directory, or a metadata error if `GameInfo.json` is malformed.
    pub fn open(path: impl AsRef<Path>) -> GameboxResult<Self> {
        let path = path.as_ref();
        let path = fs::canonicalize(path).map_err(|e| GameboxError::OpenFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !path.is_dir() {
            return Err(GameboxError::OpenFailed {
                path,
                reason: "not a directory".to_string(),
            });
        }

        let game_info = GameInfo::load(&path.join(GAME_INFO_FILENAME))?;
        let launchers = load_launchers(&game_info);

        Ok(Self {
            path,
            game_info,
            launchers,
            scan_cache: None,
            executable_exclusions: ExclusionPatterns::executable_defaults(),
            documentation_exclusions: ExclusionPatterns::documentation_defaults(),
            trash_dir: default_trash_dir(),
            undo_scope: None,
        })
    }

    /// The gamebox root directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The game's display name: the directory name minus any `.gamebox`
    /// extension.
    pub fn game_name(&self) -> String {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        match file_name.strip_suffix(&format!(".{}", GAMEBOX_EXTENSION)) {
            Some(stem) => stem.to_string(),
            None => file_name,
        }
    }

    /// Drop all cached state and reload game info and launchers from disk.
    ///
    /// This is the only way to force a rescan of the gamebox's resources.
    pub fn refresh(&mut self) -> GameboxResult<()> {
        self.scan_cache = None;
        self.game_info = GameInfo::load(&self.path.join(GAME_INFO_FILENAME))?;
        self.launchers = load_launchers(&self.game_info);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Resources
    // ------------------------------------------------------------------

    fn scan_results(&mut self) -> GameboxResult<&ScanResults> {
        if self.scan_cache.is_none() {
            let results = scan::scan(
                &self.path,
                &self.executable_exclusions,
                &self.documentation_exclusions,
            )?;
            self.scan_cache = Some(results);
        }
        match self.scan_cache.as_ref() {
            Some(results) => Ok(results),
            None => unreachable!("scan cache was just filled"),
        }
    }

    /// Absolute paths of DOS executables found inside the gamebox.
    pub fn executables(&mut self) -> GameboxResult<&[PathBuf]> {
        Ok(&self.scan_results()?.resources.executables)
    }

    /// Hard disk volumes bundled in the gamebox.
    pub fn hdd_volumes(&mut self) -> GameboxResult<&[PathBuf]> {
        Ok(&self.scan_results()?.resources.hdd_volumes)
    }

    /// CD-ROM volumes and images bundled in the gamebox.
    pub fn cd_volumes(&mut self) -> GameboxResult<&[PathBuf]> {
        Ok(&self.scan_results()?.resources.cd_volumes)
    }

    /// Floppy volumes bundled in the gamebox.
    pub fn floppy_volumes(&mut self) -> GameboxResult<&[PathBuf]> {
        Ok(&self.scan_results()?.resources.floppy_volumes)
    }

    /// Volumes of the requested kinds.
    pub fn volumes_of_kinds(&mut self, kinds: &[VolumeKind]) -> GameboxResult<Vec<PathBuf>> {
        Ok(self.scan_results()?.resources.volumes_of_kinds(kinds))
    }

    // ------------------------------------------------------------------
    // Configuration file
    // ------------------------------------------------------------------

    /// Where the configuration file is located, or would be if it existed.
    pub fn configuration_file_path(&self) -> PathBuf {
        self.path.join(format!(
            "{}.{}",
            CONFIGURATION_FILE_NAME, CONFIGURATION_FILE_EXTENSION
        ))
    }

    /// The configuration file, if one exists.
    pub fn configuration_file(&self) -> Option<PathBuf> {
        let path = self.configuration_file_path();
        path.is_file().then_some(path)
    }

    // ------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------

    /// Resolve the gamebox's stable identifier.
    ///
    /// A stored user-specified, reverse-DNS or generated identifier is
    /// returned unchanged. A stored executable-digest identifier is
    /// recomputed from the current executable set, so it tracks content
    /// changes across [`refresh`](Self::refresh). With nothing stored, an
    /// empty gamebox gets a fresh UUID and anything else gets the digest of
    /// its executables; either result is persisted.
    pub fn game_identifier(&mut self) -> GameboxResult<GameIdentifier> {
        let stored = self
            .game_info
            .get_str(GameInfoKey::Identifier)
            .map(str::to_string)
            .zip(
                self.game_info
                    .get_str(GameInfoKey::IdentifierKind)
                    .and_then(IdentifierKind::from_str_tag),
            );

        if let Some((value, kind)) = stored {
            if kind != IdentifierKind::ExecutableDigest {
                return Ok(GameIdentifier::new(value, kind));
            }
        }

        let executables = self.scan_results()?.resources.executables.clone();
        let identifier = if executables.is_empty() {
            GameIdentifier::generated()
        } else {
            GameIdentifier::new(
                digest_executables(&executables)?,
                IdentifierKind::ExecutableDigest,
            )
        };
        self.store_identifier(&identifier)?;
        Ok(identifier)
    }

    /// Assign an identifier explicitly.
    ///
    /// This is the only way a reverse-DNS identifier enters a gamebox; the
    /// resolver never produces one on its own.
    pub fn set_game_identifier(
        &mut self,
        value: impl Into<String>,
        kind: IdentifierKind,
    ) -> GameboxResult<()> {
        let identifier = GameIdentifier::new(value, kind);
        self.store_identifier(&identifier)
    }

    fn store_identifier(&mut self, identifier: &GameIdentifier) -> GameboxResult<()> {
        self.game_info.set_unchecked(
            GameInfoKey::Identifier.as_str(),
            Value::String(identifier.value.clone()),
        );
        self.game_info.set_unchecked(
            GameInfoKey::IdentifierKind.as_str(),
            Value::String(identifier.kind.as_str().to_string()),
        );
        self.persist_game_info()
    }

    // ------------------------------------------------------------------
    // Target program and flags
    // ------------------------------------------------------------------

    /// Absolute path of the target program, if one is set.
    pub fn target_program(&self) -> Option<PathBuf> {
        self.game_info
            .get_str(GameInfoKey::TargetProgram)
            .map(|relative| self.path.join(relative))
    }

    /// Set or clear the target program.
    ///
    /// The path may be absolute or relative to the gamebox root; it is
    /// stored relative. Paths that resolve outside the gamebox are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`GameboxError::TargetPathOutsideGamebox`] if the candidate
    /// escapes the gamebox after resolving symlinks and `..` segments.
    pub fn set_target_program(&mut self, target: Option<&Path>) -> GameboxResult<()> {
        let relative = match target {
            None => None,
            Some(candidate) => {
                let absolute = if candidate.is_absolute() {
                    candidate.to_path_buf()
                } else {
                    self.path.join(candidate)
                };
                let resolved = guard::resolve_within(&absolute, &self.path).map_err(|_| {
                    GameboxError::TargetPathOutsideGamebox {
                        path: candidate.to_path_buf(),
                    }
                })?;
                let relative = resolved.strip_prefix(&self.path).map_err(|_| {
                    GameboxError::TargetPathOutsideGamebox {
                        path: candidate.to_path_buf(),
                    }
                })?;
                Some(relative.to_string_lossy().to_string())
            }
        };

        self.with_undo("set target program", |gamebox| {
            match relative {
                Some(relative) => gamebox
                    .game_info
                    .set_unchecked(GameInfoKey::TargetProgram.as_str(), Value::String(relative)),
                None => gamebox
                    .game_info
                    .remove_unchecked(GameInfoKey::TargetProgram.as_str()),
            }
            gamebox.persist_game_info()
        })
    }

    /// Whether emulation should end once the target program exits.
    pub fn close_on_exit(&self) -> bool {
        self.game_info
            .get(GameInfoKey::CloseOnExit.as_str())
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Set the close-on-exit flag.
    pub fn set_close_on_exit(&mut self, close_on_exit: bool) -> GameboxResult<()> {
        self.game_info.set_unchecked(
            GameInfoKey::CloseOnExit.as_str(),
            Value::Bool(close_on_exit),
        );
        self.persist_game_info()
    }

    // ------------------------------------------------------------------
    // Game info
    // ------------------------------------------------------------------

    /// Get a game info value by key.
    pub fn game_info(&self, key: &str) -> Option<&Value> {
        self.game_info.get(key)
    }

    /// Set a game info value, validating recognized keys.
    pub fn set_game_info(&mut self, key: &str, value: Value) -> GameboxResult<()> {
        self.game_info.set(key, value)?;
        self.persist_game_info()
    }

    fn persist_game_info(&mut self) -> GameboxResult<()> {
        self.game_info.persist(&self.path.join(GAME_INFO_FILENAME))
    }

    // ------------------------------------------------------------------
    // Launchers
    // ------------------------------------------------------------------

    /// The launcher shortcuts, in order.
    pub fn launchers(&self) -> &[Launcher] {
        self.launchers.launchers()
    }

    /// Insert a launcher at the given position.
    pub fn insert_launcher(&mut self, launcher: Launcher, index: usize) -> GameboxResult<()> {
        self.with_undo("insert launcher", |gamebox| {
            gamebox.launchers.insert(launcher, index)?;
            gamebox.sync_launchers()
        })
    }

    /// Append a launcher at the end of the list.
    pub fn add_launcher(&mut self, launcher: Launcher) -> GameboxResult<()> {
        self.with_undo("add launcher", |gamebox| {
            gamebox.launchers.append(launcher);
            gamebox.sync_launchers()
        })
    }

    /// Remove the first launcher equal to `launcher`.
    pub fn remove_launcher(&mut self, launcher: &Launcher) -> GameboxResult<Launcher> {
        self.with_undo("remove launcher", |gamebox| {
            let removed = gamebox.launchers.remove(launcher)?;
            gamebox.sync_launchers()?;
            Ok(removed)
        })
    }

    /// Remove the launcher at the given position.
    pub fn remove_launcher_at(&mut self, index: usize) -> GameboxResult<Launcher> {
        self.with_undo("remove launcher", |gamebox| {
            let removed = gamebox.launchers.remove_at(index)?;
            gamebox.sync_launchers()?;
            Ok(removed)
        })
    }

    /// The default launcher, if any.
    pub fn default_launcher(&self) -> Option<&Launcher> {
        self.launchers.default_launcher()
    }

    /// Position of the default launcher, or `None`.
    pub fn default_launcher_index(&self) -> Option<usize> {
        self.launchers.default_index()
    }

    /// Make the launcher at `index` the default, or clear the default with
    /// `None`.
    pub fn set_default_launcher_index(&mut self, index: Option<usize>) -> GameboxResult<()> {
        self.with_undo("set default launcher", |gamebox| {
            gamebox.launchers.set_default_index(index)?;
            gamebox.sync_launchers()
        })
    }

    fn sync_launchers(&mut self) -> GameboxResult<()> {
        let value = serde_json::to_value(self.launchers.launchers()).map_err(|e| {
            GameboxError::MetadataParseFailed {
                path: self.path.join(GAME_INFO_FILENAME),
                reason: e.to_string(),
            }
        })?;
        self.game_info
            .set_unchecked(GameInfoKey::Launchers.as_str(), value);
        self.launchers.mark_clean();
        self.persist_game_info()
    }

    // ------------------------------------------------------------------
    // Documentation
    // ------------------------------------------------------------------

    /// The documentation synchronizer for this gamebox.
    pub fn documentation(&self) -> DocumentationSynchronizer {
        DocumentationSynchronizer::new(self.path.clone(), self.trash_dir.clone())
    }

    /// Documentation candidates discovered by the scanner, anywhere in the
    /// gamebox.
    pub fn documentation_candidates(&mut self) -> GameboxResult<&[PathBuf]> {
        Ok(&self.scan_results()?.documentation)
    }

    /// The gamebox's documentation.
    ///
    /// If a documentation folder exists its contents are returned;
    /// otherwise the rest of the gamebox is searched for documentation.
    pub fn documentation_urls(&mut self) -> GameboxResult<Vec<PathBuf>> {
        let synchronizer = self.documentation();
        if synchronizer.has_folder() {
            synchronizer.entries()
        } else {
            Ok(self.documentation_candidates()?.to_vec())
        }
    }

    /// Populate an existing documentation folder with symlinks to
    /// documentation found elsewhere in the gamebox.
    pub fn populate_documentation(&mut self) -> GameboxResult<PopulationReport> {
        let candidates = self.documentation_candidates()?.to_vec();
        self.documentation().populate(&candidates)
    }

    // ------------------------------------------------------------------
    // Collaborators
    // ------------------------------------------------------------------

    /// Install the undo hook invoked around undoable mutations.
    pub fn set_undo_scope(&mut self, scope: Option<Box<dyn UndoScope>>) {
        self.undo_scope = scope;
    }

    /// Override where trashed documentation entries are moved.
    ///
    /// The default lives under the user's data directory; packages on a
    /// different filesystem need a trash directory on that filesystem for
    /// the move to succeed.
    pub fn set_trash_dir(&mut self, trash_dir: impl Into<PathBuf>) {
        self.trash_dir = trash_dir.into();
    }

    /// Override the executable exclusion patterns. Clears the scan cache.
    pub fn set_executable_exclusions(&mut self, exclusions: ExclusionPatterns) {
        self.executable_exclusions = exclusions;
        self.scan_cache = None;
    }

    /// Override the documentation exclusion patterns. Clears the scan cache.
    pub fn set_documentation_exclusions(&mut self, exclusions: ExclusionPatterns) {
        self.documentation_exclusions = exclusions;
        self.scan_cache = None;
    }

    fn with_undo<T>(
        &mut self,
        operation: &str,
        f: impl FnOnce(&mut Self) -> GameboxResult<T>,
    ) -> GameboxResult<T> {
        if let Some(scope) = &self.undo_scope {
            scope.begin(operation);
        }
        let result = f(self);
        if let Some(scope) = &self.undo_scope {
            scope.end(operation);
        }
        result
    }
}

fn load_launchers(game_info: &GameInfo) -> LauncherRegistry {
    let launchers = game_info
        .get(GameInfoKey::Launchers.as_str())
        .cloned()
        .and_then(|value| serde_json::from_value::<Vec<Launcher>>(value).ok())
        .unwrap_or_default();
    LauncherRegistry::from_launchers(launchers)
}

fn default_trash_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("gamebox")
        .join("Trash")
}
