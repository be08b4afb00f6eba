//! Resource discovery and classification.
//!
//! A gamebox is scanned in a single recursive pass that classifies every
//! entry into DOS executables, emulated drive volumes (by the drive-folder
//! naming conventions) and documentation candidates. The scan never follows
//! symlinks, so links pointing outside the package cannot drag foreign
//! files into the results.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

use crate::error::{GameboxError, GameboxResult};

/// Extensions recognized as DOS executables.
pub const EXECUTABLE_EXTENSIONS: &[&str] = &["exe", "com", "bat"];

/// Extensions recognized as documentation.
pub const DOCUMENTATION_EXTENSIONS: &[&str] = &[
    "txt", "doc", "rtf", "wri", "pdf", "htm", "html", "jpg", "jpeg", "png", "gif", "bmp",
];

/// Default filename patterns for executables excluded from discovery.
///
/// These are installer and setup artifacts that are never the game itself
/// and would otherwise pollute the executable digest.
pub const DEFAULT_EXECUTABLE_EXCLUSIONS: &[&str] = &["install*", "setup*", "uninstal*"];

/// Default filename patterns for documentation excluded from discovery.
///
/// Order forms, installation notes and license boilerplate shipped alongside
/// real manuals.
pub const DEFAULT_DOCUMENTATION_EXCLUSIONS: &[&str] =
    &["install*", "interp*", "order*", "orderfrm*", "license*"];

/// The kind of an emulated drive volume bundled in a gamebox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeKind {
    /// Hard disk drive folder (`*.harddisk`).
    Hdd,
    /// CD-ROM folder or image (`*.cdrom`, `*.cdmedia`, `*.iso`).
    Cd,
    /// Floppy disk folder (`*.floppy`).
    Floppy,
}

impl VolumeKind {
    /// Classify an extension into a volume kind, if it matches one of the
    /// drive-container conventions.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "harddisk" => Some(VolumeKind::Hdd),
            "cdrom" | "cdmedia" | "iso" => Some(VolumeKind::Cd),
            "floppy" => Some(VolumeKind::Floppy),
            _ => None,
        }
    }
}

/// Filename glob patterns used to exclude entries from classification.
///
/// Patterns match against the file name only (never the full path) and are
/// case-insensitive, since DOS-era packages mix `README.TXT` with
/// `readme.txt` freely.
#[derive(Debug, Clone)]
pub struct ExclusionPatterns {
    patterns: Vec<Pattern>,
}

impl ExclusionPatterns {
    /// Compile a set of glob patterns. Invalid patterns are skipped with a
    /// warning rather than failing the whole set.
    pub fn new(patterns: &[&str]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|p| match Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::warn!(pattern = p, error = %e, "Skipping invalid exclusion pattern");
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    /// Default exclusions for executable discovery.
    pub fn executable_defaults() -> Self {
        Self::new(DEFAULT_EXECUTABLE_EXCLUSIONS)
    }

    /// Default exclusions for documentation discovery.
    pub fn documentation_defaults() -> Self {
        Self::new(DEFAULT_DOCUMENTATION_EXCLUSIONS)
    }

    /// Whether the given file name matches any exclusion pattern.
    pub fn matches(&self, file_name: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::default()
        };
        self.patterns
            .iter()
            .any(|p| p.matches_with(file_name, options))
    }
}

/// Discovered resources of one scan pass.
///
/// The four sequences are disjoint, path-sorted, and are always invalidated
/// together by [`Gamebox::refresh`](crate::Gamebox::refresh).
#[derive(Debug, Clone, Default)]
pub struct ResourceSet {
    /// Absolute paths of DOS executables found inside the gamebox.
    pub executables: Vec<PathBuf>,
    /// Hard disk volumes.
    pub hdd_volumes: Vec<PathBuf>,
    /// CD-ROM volumes and images.
    pub cd_volumes: Vec<PathBuf>,
    /// Floppy volumes.
    pub floppy_volumes: Vec<PathBuf>,
}

impl ResourceSet {
    /// Volumes of the requested kinds, in kind order then path order.
    pub fn volumes_of_kinds(&self, kinds: &[VolumeKind]) -> Vec<PathBuf> {
        let mut volumes = Vec::new();
        for kind in kinds {
            let source = match kind {
                VolumeKind::Hdd => &self.hdd_volumes,
                VolumeKind::Cd => &self.cd_volumes,
                VolumeKind::Floppy => &self.floppy_volumes,
            };
            volumes.extend(source.iter().cloned());
        }
        volumes
    }
}

/// Everything one scan pass produces: the resource set plus documentation
/// candidates. Documentation candidates are kept separate because they feed
/// the documentation synchronizer, not the resource accessors.
#[derive(Debug, Clone, Default)]
pub struct ScanResults {
    /// Classified executables and volumes.
    pub resources: ResourceSet,
    /// Files recognized as documentation, anywhere in the gamebox
    /// (including inside the documentation folder itself).
    pub documentation: Vec<PathBuf>,
}

fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
}

/// Walk the gamebox tree once and classify everything.
///
/// Subdirectories are followed (drive folders included — a hard disk volume
/// contains executables and manuals of its own), symlinks are not. Unreadable
/// entries are skipped with a warning; only a completely unreadable root is
/// an error.
pub fn scan(
    root: &Path,
    executable_exclusions: &ExclusionPatterns,
    documentation_exclusions: &ExclusionPatterns,
) -> GameboxResult<ScanResults> {
    if !root.is_dir() {
        return Err(GameboxError::ReadFailed {
            path: root.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let mut results = ScanResults::default();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable entry during scan");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy();
        let extension = extension_of(&file_name);

        // Volume containers may be directories (drive folders) or files
        // (disc images).
        if let Some(kind) = extension.as_deref().and_then(VolumeKind::from_extension) {
            let target = match kind {
                VolumeKind::Hdd => &mut results.resources.hdd_volumes,
                VolumeKind::Cd => &mut results.resources.cd_volumes,
                VolumeKind::Floppy => &mut results.resources.floppy_volumes,
            };
            target.push(path.to_path_buf());
            if entry.file_type().is_file() {
                continue;
            }
        }

        if !entry.file_type().is_file() {
            continue;
        }

        let extension = match extension {
            Some(ext) => ext,
            None => continue,
        };

        if EXECUTABLE_EXTENSIONS.contains(&extension.as_str())
            && !executable_exclusions.matches(&file_name)
        {
            results.resources.executables.push(path.to_path_buf());
        }

        // Classification sets are independent: a file excluded from one may
        // still match the other.
        if DOCUMENTATION_EXTENSIONS.contains(&extension.as_str())
            && !documentation_exclusions.matches(&file_name)
        {
            results.documentation.push(path.to_path_buf());
        }
    }

    // walkdir sorts per directory; sort globally so digest ordering and the
    // public accessors are stable regardless of tree shape.
    results.resources.executables.sort();
    results.resources.hdd_volumes.sort();
    results.resources.cd_volumes.sort();
    results.resources.floppy_volumes.sort();
    results.documentation.sort();

    tracing::debug!(
        executables = results.resources.executables.len(),
        hdd = results.resources.hdd_volumes.len(),
        cd = results.resources.cd_volumes.len(),
        floppy = results.resources.floppy_volumes.len(),
        documentation = results.documentation.len(),
        "Scanned gamebox"
    );

    Ok(results)
}
