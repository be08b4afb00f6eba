//! Documentation mirror folder management.
//!
//! A gamebox may carry a `Documentation/` folder at its root mirroring the
//! manuals, reference cards and artwork scattered through the package. Its
//! members are either files imported by the user or symlinks to
//! documentation discovered elsewhere in the gamebox. The synchronizer
//! creates and populates the folder, resolves name collisions on import, and
//! removes entries safely: nothing is deleted unless it sits inside the
//! folder and resolves to a location still inside the package, and removal
//! moves entries to a recoverable trash directory rather than deleting them.

use std::collections::HashSet;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};

use crate::error::{GameboxError, GameboxResult};
use crate::guard;

/// Name of the documentation folder inside the gamebox.
pub const DOCUMENTATION_FOLDER_NAME: &str = "Documentation";

/// How a name collision during import is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictBehaviour {
    /// Append a numeric suffix to produce a unique name; never overwrites.
    Rename,
    /// Overwrite the existing entry.
    Replace,
}

/// Outcome of populating the documentation folder.
///
/// A failure on one candidate does not abort the others; per-candidate
/// failures are collected here so partial success stays visible.
#[derive(Debug, Default)]
pub struct PopulationReport {
    /// Symlinks created by this run.
    pub created: Vec<PathBuf>,
    /// Candidates skipped because an entry already links to them.
    pub skipped: usize,
    /// Candidates that could not be linked, with the reason.
    pub failures: Vec<(PathBuf, String)>,
}

impl PopulationReport {
    /// Whether every candidate was linked or already present.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Manages the documentation mirror folder of one gamebox.
///
/// Holds no filesystem state between calls; every operation inspects the
/// folder afresh.
#[derive(Debug, Clone)]
pub struct DocumentationSynchronizer {
    package_root: PathBuf,
    folder: PathBuf,
    trash_dir: PathBuf,
}

impl DocumentationSynchronizer {
    /// Create a synchronizer for the gamebox rooted at `package_root`.
    ///
    /// `trash_dir` receives entries removed by [`trash`](Self::trash); it is
    /// created on first use.
    pub fn new(package_root: impl Into<PathBuf>, trash_dir: impl Into<PathBuf>) -> Self {
        let package_root = package_root.into();
        let folder = package_root.join(DOCUMENTATION_FOLDER_NAME);
        Self {
            package_root,
            folder,
            trash_dir: trash_dir.into(),
        }
    }

    /// Path of the documentation folder (whether or not it exists).
    pub fn folder_path(&self) -> &Path {
        &self.folder
    }

    /// Whether the gamebox has a documentation folder.
    pub fn has_folder(&self) -> bool {
        self.folder.is_dir()
    }

    /// Return the documentation folder, optionally creating it.
    ///
    /// Returns `Ok(None)` if the folder is absent and `create_if_missing` is
    /// false — absence is a valid state, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`GameboxError::FolderCreationFailed`] if creation was
    /// requested and failed.
    pub fn ensure_folder(&self, create_if_missing: bool) -> GameboxResult<Option<PathBuf>> {
        if self.folder.is_dir() {
            return Ok(Some(self.folder.clone()));
        }
        if !create_if_missing {
            return Ok(None);
        }
        fs::create_dir_all(&self.folder).map_err(|e| GameboxError::FolderCreationFailed {
            path: self.folder.clone(),
            source: e,
        })?;
        tracing::info!(path = %self.folder.display(), "Created documentation folder");
        Ok(Some(self.folder.clone()))
    }

    /// Sorted listing of the documentation folder's members.
    ///
    /// # Errors
    ///
    /// Returns [`GameboxError::DocumentationFolderMissing`] if the folder
    /// does not exist.
    pub fn entries(&self) -> GameboxResult<Vec<PathBuf>> {
        if !self.has_folder() {
            return Err(GameboxError::DocumentationFolderMissing {
                path: self.folder.clone(),
            });
        }
        let mut entries = Vec::new();
        let reader = fs::read_dir(&self.folder).map_err(|e| GameboxError::ReadFailed {
            path: self.folder.clone(),
            source: e,
        })?;
        for entry in reader {
            let entry = entry.map_err(|e| GameboxError::ReadFailed {
                path: self.folder.clone(),
                source: e,
            })?;
            entries.push(entry.path());
        }
        entries.sort();
        Ok(entries)
    }

    /// Fill the folder with symlinks to documentation found elsewhere in the
    /// gamebox.
    ///
    /// Candidates already inside the folder are ignored, as are candidates
    /// some existing entry already links to, so repeated population is a
    /// no-op. New links are added under the rename conflict policy. A
    /// failure on one candidate is recorded in the report and does not stop
    /// the rest.
    ///
    /// # Errors
    ///
    /// Returns [`GameboxError::DocumentationFolderMissing`] if the folder
    /// does not exist; this operation never creates it.
    pub fn populate(&self, candidates: &[PathBuf]) -> GameboxResult<PopulationReport> {
        if !self.has_folder() {
            return Err(GameboxError::DocumentationFolderMissing {
                path: self.folder.clone(),
            });
        }

        let linked = self.linked_targets()?;
        let mut report = PopulationReport::default();

        for candidate in candidates {
            if candidate.starts_with(&self.folder) {
                continue;
            }

            let resolved = match fs::canonicalize(candidate) {
                Ok(resolved) => resolved,
                Err(e) => {
                    tracing::warn!(
                        candidate = %candidate.display(),
                        error = %e,
                        "Skipping unresolvable documentation candidate"
                    );
                    report.failures.push((candidate.clone(), e.to_string()));
                    continue;
                }
            };

            if linked.contains(&resolved) {
                report.skipped += 1;
                continue;
            }

            match self.import_symlink(&resolved, None, ConflictBehaviour::Rename) {
                Ok(link) => report.created.push(link),
                Err(e) => {
                    tracing::warn!(
                        candidate = %candidate.display(),
                        error = %e,
                        "Failed to link documentation candidate"
                    );
                    report.failures.push((candidate.clone(), e.to_string()));
                }
            }
        }

        tracing::debug!(
            created = report.created.len(),
            skipped = report.skipped,
            failures = report.failures.len(),
            "Populated documentation folder"
        );
        Ok(report)
    }

    /// Copy a file into the documentation folder, creating the folder first
    /// if it is missing.
    ///
    /// `title`, if given, replaces the file stem; the source's extension is
    /// kept either way. Collisions are resolved per `conflict`. The copy is
    /// staged to a temporary sibling and renamed into place, so a failed
    /// copy leaves no corrupt destination behind.
    ///
    /// Returns the final destination path.
    pub fn import_file(
        &self,
        source: &Path,
        title: Option<&str>,
        conflict: ConflictBehaviour,
    ) -> GameboxResult<PathBuf> {
        self.ensure_folder(true)?;
        let dest = self.destination_for(source, title, conflict)?;

        let staging = self.folder.join(format!(
            ".{}.import",
            dest.file_name().unwrap_or_default().to_string_lossy()
        ));
        if let Err(e) = fs::copy(source, &staging) {
            let _ = fs::remove_file(&staging);
            return Err(GameboxError::ImportFailed {
                path: source.to_path_buf(),
                reason: e.to_string(),
            });
        }
        // Replace semantics come for free: rename overwrites the existing
        // entry atomically.
        if let Err(e) = fs::rename(&staging, &dest) {
            let _ = fs::remove_file(&staging);
            return Err(GameboxError::ImportFailed {
                path: source.to_path_buf(),
                reason: e.to_string(),
            });
        }

        tracing::debug!(
            source = %source.display(),
            dest = %dest.display(),
            "Imported documentation file"
        );
        Ok(dest)
    }

    /// Add a symlink to `source` inside the documentation folder, creating
    /// the folder first if it is missing.
    ///
    /// Naming and collision handling match [`import_file`](Self::import_file).
    /// Returns the path of the created symlink.
    pub fn import_symlink(
        &self,
        source: &Path,
        title: Option<&str>,
        conflict: ConflictBehaviour,
    ) -> GameboxResult<PathBuf> {
        self.ensure_folder(true)?;
        let dest = self.destination_for(source, title, conflict)?;

        if conflict == ConflictBehaviour::Replace && dest.symlink_metadata().is_ok() {
            if dest.is_dir() && !dest.is_symlink() {
                return Err(GameboxError::ImportFailed {
                    path: source.to_path_buf(),
                    reason: format!("a directory already exists at {}", dest.display()),
                });
            }
            fs::remove_file(&dest).map_err(|e| GameboxError::ImportFailed {
                path: source.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        symlink(source, &dest).map_err(|e| GameboxError::ImportFailed {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;

        tracing::debug!(
            source = %source.display(),
            link = %dest.display(),
            "Linked documentation file"
        );
        Ok(dest)
    }

    /// Move a documentation entry to the trash directory, returning its new
    /// location.
    ///
    /// # Errors
    ///
    /// Returns [`GameboxError::NotInDocumentationFolder`] if the entry does
    /// not sit inside the documentation folder or resolves to a location
    /// outside the gamebox, and [`GameboxError::TrashFailed`] if the move
    /// itself fails.
    pub fn trash(&self, entry: &Path) -> GameboxResult<PathBuf> {
        self.check_trashable(entry)?;

        fs::create_dir_all(&self.trash_dir).map_err(|e| GameboxError::TrashFailed {
            path: entry.to_path_buf(),
            reason: format!("cannot create trash directory: {}", e),
        })?;

        let file_name = entry
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "untitled".to_string());
        let dest = unique_destination(&self.trash_dir, &file_name);

        fs::rename(entry, &dest).map_err(|e| GameboxError::TrashFailed {
            path: entry.to_path_buf(),
            reason: e.to_string(),
        })?;

        tracing::info!(
            entry = %entry.display(),
            trash = %dest.display(),
            "Trashed documentation entry"
        );
        Ok(dest)
    }

    /// Whether [`trash`](Self::trash) would accept this entry.
    ///
    /// Pure predicate with no side effects; agrees with `trash` for every
    /// input.
    pub fn can_trash(&self, entry: &Path) -> bool {
        self.check_trashable(entry).is_ok()
    }

    /// The location check shared by `trash` and `can_trash`: the entry must
    /// sit inside the documentation folder (the final component is not
    /// followed, so symlink entries qualify by position) and must resolve,
    /// following symlinks, to a location still inside the gamebox.
    fn check_trashable(&self, entry: &Path) -> GameboxResult<()> {
        let reject = || GameboxError::NotInDocumentationFolder {
            path: entry.to_path_buf(),
        };

        let positioned =
            guard::resolve_entry_within(entry, &self.folder).map_err(|_| reject())?;
        if positioned == self.folder {
            // The folder itself is not one of its entries.
            return Err(reject());
        }
        let metadata = positioned.symlink_metadata().map_err(|_| reject())?;

        if metadata.file_type().is_symlink() {
            let target = fs::read_link(&positioned).map_err(|_| reject())?;
            let target = if target.is_absolute() {
                target
            } else {
                positioned
                    .parent()
                    .unwrap_or(&self.folder)
                    .join(target)
            };
            guard::resolve_within(&target, &self.package_root).map_err(|_| reject())?;
            // A dangling link resolves to nothing inside the package.
            fs::canonicalize(&target).map_err(|_| reject())?;
        } else {
            guard::resolve_within(&positioned, &self.package_root).map_err(|_| reject())?;
        }
        Ok(())
    }

    /// Canonical targets of every symlink currently in the folder.
    fn linked_targets(&self) -> GameboxResult<HashSet<PathBuf>> {
        let mut targets = HashSet::new();
        for entry in self.entries()? {
            if !entry.is_symlink() {
                continue;
            }
            // Dangling links simply contribute no target.
            if let Ok(resolved) = fs::canonicalize(&entry) {
                targets.insert(resolved);
            }
        }
        Ok(targets)
    }

    /// Pick the destination name for an import: the title (or source stem)
    /// plus the source extension, uniqued per the conflict policy.
    fn destination_for(
        &self,
        source: &Path,
        title: Option<&str>,
        conflict: ConflictBehaviour,
    ) -> GameboxResult<PathBuf> {
        let stem = match title {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => source
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .ok_or_else(|| GameboxError::ImportFailed {
                    path: source.to_path_buf(),
                    reason: "source has no file name".to_string(),
                })?,
        };
        let extension = source
            .extension()
            .map(|e| e.to_string_lossy().to_string());

        let file_name = join_name(&stem, extension.as_deref());
        let dest = self.folder.join(&file_name);

        match conflict {
            ConflictBehaviour::Replace => Ok(dest),
            ConflictBehaviour::Rename => {
                if dest.symlink_metadata().is_err() {
                    return Ok(dest);
                }
                // Smallest positive suffix not already in use.
                for n in 1.. {
                    let candidate = self
                        .folder
                        .join(join_name(&format!("{}-{}", stem, n), extension.as_deref()));
                    if candidate.symlink_metadata().is_err() {
                        return Ok(candidate);
                    }
                }
                unreachable!("suffix search is unbounded")
            }
        }
    }
}

fn join_name(stem: &str, extension: Option<&str>) -> String {
    match extension {
        Some(ext) if !ext.is_empty() => format!("{}.{}", stem, ext),
        _ => stem.to_string(),
    }
}

/// First free name in `dir` for `file_name`, appending `-N` before the
/// extension on collision.
fn unique_destination(dir: &Path, file_name: &str) -> PathBuf {
    let dest = dir.join(file_name);
    if dest.symlink_metadata().is_err() {
        return dest;
    }
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string());
    let extension = path.extension().map(|e| e.to_string_lossy().to_string());
    for n in 1.. {
        let candidate = dir.join(join_name(&format!("{}-{}", stem, n), extension.as_deref()));
        if candidate.symlink_metadata().is_err() {
            return candidate;
        }
    }
    unreachable!("suffix search is unbounded")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Fixture {
        package: TempDir,
        trash: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                package: TempDir::new().unwrap(),
                trash: TempDir::new().unwrap(),
            }
        }

        fn sync(&self) -> DocumentationSynchronizer {
            DocumentationSynchronizer::new(
                self.package.path().canonicalize().unwrap(),
                self.trash.path().join("trash"),
            )
        }

        fn write_doc(&self, name: &str, contents: &str) -> PathBuf {
            let path = self.package.path().join(name);
            fs::write(&path, contents).unwrap();
            path
        }
    }

    #[test]
    fn test_ensure_folder_absent_without_create() {
        let fixture = Fixture::new();
        let sync = fixture.sync();

        assert_eq!(sync.ensure_folder(false).unwrap(), None);
        assert!(!sync.has_folder());
    }

    #[test]
    fn test_ensure_folder_creates_when_asked() {
        let fixture = Fixture::new();
        let sync = fixture.sync();

        let folder = sync.ensure_folder(true).unwrap().unwrap();
        assert!(folder.is_dir());
        assert!(sync.has_folder());

        // Idempotent once present.
        assert_eq!(sync.ensure_folder(false).unwrap(), Some(folder));
    }

    #[test]
    fn test_populate_requires_existing_folder() {
        let fixture = Fixture::new();
        let sync = fixture.sync();
        let doc = fixture.write_doc("MANUAL.TXT", "manual");

        let result = sync.populate(&[doc]);
        assert!(matches!(
            result,
            Err(GameboxError::DocumentationFolderMissing { .. })
        ));
    }

    #[test]
    fn test_populate_links_candidates_and_is_idempotent() {
        let fixture = Fixture::new();
        let sync = fixture.sync();
        let manual = fixture.write_doc("MANUAL.TXT", "manual");
        let map = fixture.write_doc("MAP.PDF", "map");
        sync.ensure_folder(true).unwrap();

        let report = sync.populate(&[manual.clone(), map.clone()]).unwrap();
        assert!(report.is_complete());
        assert_eq!(report.created.len(), 2);
        for link in &report.created {
            assert!(link.is_symlink());
        }

        // Second run finds everything already linked.
        let report = sync.populate(&[manual, map]).unwrap();
        assert!(report.created.is_empty());
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn test_populate_ignores_candidates_inside_folder() {
        let fixture = Fixture::new();
        let sync = fixture.sync();
        sync.ensure_folder(true).unwrap();
        let inside = sync.folder_path().join("ALREADY.TXT");
        fs::write(&inside, "here").unwrap();

        let report = sync.populate(&[inside]).unwrap();
        assert!(report.created.is_empty());
        assert_eq!(report.skipped, 0);
        assert!(report.is_complete());
    }

    #[test]
    fn test_populate_partial_failure_keeps_going() {
        let fixture = Fixture::new();
        let sync = fixture.sync();
        let good = fixture.write_doc("MANUAL.TXT", "manual");
        let missing = fixture.package.path().join("GONE.TXT");
        sync.ensure_folder(true).unwrap();

        let report = sync.populate(&[missing.clone(), good]).unwrap();
        assert_eq!(report.created.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, missing);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_import_file_copies_into_folder() {
        let fixture = Fixture::new();
        let sync = fixture.sync();
        let source = fixture.write_doc("README.TXT", "read me");

        let dest = sync
            .import_file(&source, None, ConflictBehaviour::Rename)
            .unwrap();
        assert!(dest.ends_with("Documentation/README.TXT"));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "read me");
        // Source is untouched.
        assert!(source.exists());
    }

    #[test]
    fn test_import_file_with_title_keeps_extension() {
        let fixture = Fixture::new();
        let sync = fixture.sync();
        let source = fixture.write_doc("REF1234.TXT", "reference card");

        let dest = sync
            .import_file(&source, Some("Reference Card"), ConflictBehaviour::Rename)
            .unwrap();
        assert!(dest.ends_with("Documentation/Reference Card.TXT"));
    }

    #[test]
    fn test_import_rename_collision_produces_distinct_entries() {
        let fixture = Fixture::new();
        let sync = fixture.sync();
        let source = fixture.write_doc("doc.txt", "first");

        let first = sync
            .import_file(&source, None, ConflictBehaviour::Rename)
            .unwrap();
        fs::write(&source, "second").unwrap();
        let second = sync
            .import_file(&source, None, ConflictBehaviour::Rename)
            .unwrap();

        assert_ne!(first, second);
        assert!(second.ends_with("Documentation/doc-1.txt"));
        assert_eq!(fs::read_to_string(&first).unwrap(), "first");
        assert_eq!(fs::read_to_string(&second).unwrap(), "second");
    }

    #[test]
    fn test_import_rename_picks_smallest_free_suffix() {
        let fixture = Fixture::new();
        let sync = fixture.sync();
        let source = fixture.write_doc("doc.txt", "x");
        sync.ensure_folder(true).unwrap();
        fs::write(sync.folder_path().join("doc.txt"), "taken").unwrap();
        fs::write(sync.folder_path().join("doc-2.txt"), "taken").unwrap();

        let dest = sync
            .import_file(&source, None, ConflictBehaviour::Rename)
            .unwrap();
        assert!(dest.ends_with("doc-1.txt"));
    }

    #[test]
    fn test_import_replace_collision_overwrites() {
        let fixture = Fixture::new();
        let sync = fixture.sync();
        let source = fixture.write_doc("doc.txt", "first");

        let first = sync
            .import_file(&source, None, ConflictBehaviour::Replace)
            .unwrap();
        fs::write(&source, "second").unwrap();
        let second = sync
            .import_file(&source, None, ConflictBehaviour::Replace)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read_to_string(&second).unwrap(), "second");
        assert_eq!(sync.entries().unwrap().len(), 1);
    }

    #[test]
    fn test_import_missing_source_fails_cleanly() {
        let fixture = Fixture::new();
        let sync = fixture.sync();
        let missing = fixture.package.path().join("GONE.TXT");

        let result = sync.import_file(&missing, None, ConflictBehaviour::Rename);
        assert!(matches!(result, Err(GameboxError::ImportFailed { .. })));
        // No partial destination left behind.
        assert_eq!(sync.entries().unwrap().len(), 0);
    }

    #[test]
    fn test_import_symlink_replace_overwrites_existing_link() {
        let fixture = Fixture::new();
        let sync = fixture.sync();
        let first = fixture.write_doc("MANUAL.TXT", "v1");
        let second_dir = fixture.package.path().join("C.harddisk");
        fs::create_dir(&second_dir).unwrap();
        let second = second_dir.join("MANUAL.TXT");
        fs::write(&second, "v2").unwrap();

        sync.import_symlink(&first, None, ConflictBehaviour::Replace)
            .unwrap();
        let link = sync
            .import_symlink(&second, None, ConflictBehaviour::Replace)
            .unwrap();

        assert_eq!(sync.entries().unwrap().len(), 1);
        assert_eq!(fs::canonicalize(&link).unwrap(), fs::canonicalize(&second).unwrap());
    }

    #[test]
    fn test_trash_moves_entry_and_returns_new_location() {
        let fixture = Fixture::new();
        let sync = fixture.sync();
        let source = fixture.write_doc("doc.txt", "contents");
        let imported = sync
            .import_file(&source, None, ConflictBehaviour::Rename)
            .unwrap();

        assert!(sync.can_trash(&imported));
        let trashed = sync.trash(&imported).unwrap();
        assert!(!imported.exists());
        assert_eq!(fs::read_to_string(&trashed).unwrap(), "contents");
    }

    #[test]
    fn test_trash_rejects_paths_outside_folder() {
        let fixture = Fixture::new();
        let sync = fixture.sync();
        let outside = fixture.write_doc("doc.txt", "contents");
        sync.ensure_folder(true).unwrap();

        assert!(!sync.can_trash(&outside));
        let result = sync.trash(&outside);
        assert!(matches!(
            result,
            Err(GameboxError::NotInDocumentationFolder { .. })
        ));
        assert!(outside.exists());
    }

    #[test]
    fn test_trash_rejects_the_folder_itself() {
        let fixture = Fixture::new();
        let sync = fixture.sync();
        sync.ensure_folder(true).unwrap();

        assert!(!sync.can_trash(sync.folder_path()));
        assert!(sync.trash(sync.folder_path()).is_err());
    }

    #[test]
    fn test_trash_accepts_symlink_entries_into_package() {
        let fixture = Fixture::new();
        let sync = fixture.sync();
        let doc = fixture.write_doc("MANUAL.TXT", "manual");
        let link = sync
            .import_symlink(
                &fs::canonicalize(&doc).unwrap(),
                None,
                ConflictBehaviour::Rename,
            )
            .unwrap();

        assert!(sync.can_trash(&link));
        let trashed = sync.trash(&link).unwrap();
        assert!(trashed.is_symlink());
        // The original document is untouched.
        assert!(doc.exists());
    }

    #[test]
    fn test_trash_rejects_symlink_escaping_package() {
        let fixture = Fixture::new();
        let sync = fixture.sync();
        sync.ensure_folder(true).unwrap();

        let foreign = TempDir::new().unwrap();
        let target = foreign.path().join("outside.txt");
        fs::write(&target, "outside").unwrap();
        let link = sync.folder_path().join("outside.txt");
        symlink(&target, &link).unwrap();

        assert!(!sync.can_trash(&link));
        assert!(sync.trash(&link).is_err());
        assert!(link.symlink_metadata().is_ok());
    }

    #[test]
    fn test_can_trash_agrees_with_trash() {
        let fixture = Fixture::new();
        let sync = fixture.sync();
        let doc = fixture.write_doc("doc.txt", "x");
        let imported = sync
            .import_file(&doc, None, ConflictBehaviour::Rename)
            .unwrap();

        let inputs = vec![
            imported,
            doc,
            fixture.package.path().join("nonexistent.txt"),
            sync.folder_path().to_path_buf(),
        ];
        for input in inputs {
            let predicted = sync.can_trash(&input);
            let actual = sync.trash(&input).is_ok();
            assert_eq!(predicted, actual, "disagreement for {}", input.display());
        }
    }

    #[test]
    fn test_trash_collisions_are_uniqued() {
        let fixture = Fixture::new();
        let sync = fixture.sync();
        let doc = fixture.write_doc("doc.txt", "one");

        let first = sync
            .import_file(&doc, None, ConflictBehaviour::Rename)
            .unwrap();
        let first_trashed = sync.trash(&first).unwrap();

        fs::write(&doc, "two").unwrap();
        let second = sync
            .import_file(&doc, None, ConflictBehaviour::Rename)
            .unwrap();
        let second_trashed = sync.trash(&second).unwrap();

        assert_ne!(first_trashed, second_trashed);
        assert_eq!(fs::read_to_string(&first_trashed).unwrap(), "one");
        assert_eq!(fs::read_to_string(&second_trashed).unwrap(), "two");
    }

    #[test]
    fn test_entries_requires_folder() {
        let fixture = Fixture::new();
        let sync = fixture.sync();
        assert!(matches!(
            sync.entries(),
            Err(GameboxError::DocumentationFolderMissing { .. })
        ));
    }
}
