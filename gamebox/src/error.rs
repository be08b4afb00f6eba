//! Error types for gamebox operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for gamebox operations.
pub type GameboxResult<T> = Result<T, GameboxError>;

/// Errors that can occur while managing a gamebox.
///
/// Validation failures (paths outside the package, bad indices, unknown
/// launchers) are always reported to the caller and never silently corrected.
/// I/O failures carry the path involved and the underlying error. None of
/// these are fatal to the [`Gamebox`](crate::Gamebox) itself: after a failed
/// operation the package remains usable and only the state touched by that
/// operation is left unchanged.
#[derive(Debug, Error)]
pub enum GameboxError {
    /// The gamebox path does not exist or is not a directory.
    #[error("cannot open gamebox at {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    /// A candidate path escapes the root it must stay within.
    #[error("path {path} is outside {root}")]
    PathOutsideRoot { path: PathBuf, root: PathBuf },

    /// The requested target program lies outside the gamebox.
    #[error("target program {path} is outside the gamebox")]
    TargetPathOutsideGamebox { path: PathBuf },

    /// A launcher index beyond the end of the launcher list.
    #[error("launcher index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The launcher to remove is not in the registry.
    #[error("launcher {title:?} not found")]
    LauncherNotFound { title: String },

    /// Failed to read a file or directory.
    #[error("failed to read {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write a file.
    #[error("failed to write {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to create the documentation folder.
    #[error("failed to create documentation folder {path}")]
    FolderCreationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The documentation folder does not exist and the operation will not
    /// create it.
    #[error("documentation folder {path} does not exist")]
    DocumentationFolderMissing { path: PathBuf },

    /// A documentation import could not be completed.
    #[error("failed to import {path}: {reason}")]
    ImportFailed { path: PathBuf, reason: String },

    /// The path is not an entry of the documentation folder, or it resolves
    /// to a location outside the gamebox.
    #[error("{path} is not inside the documentation folder")]
    NotInDocumentationFolder { path: PathBuf },

    /// Failed to move a documentation entry to the trash.
    #[error("failed to trash {path}: {reason}")]
    TrashFailed { path: PathBuf, reason: String },

    /// A recognized game-info key was given a value of the wrong shape, or
    /// the key is managed internally and cannot be set directly.
    #[error("invalid game info value for {key:?}: {reason}")]
    InvalidMetadata { key: String, reason: String },

    /// The game info file exists but could not be parsed.
    #[error("failed to parse game info at {path}: {reason}")]
    MetadataParseFailed { path: PathBuf, reason: String },
}
