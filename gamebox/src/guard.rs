//! Path containment checks.
//!
//! Every path the gamebox accepts from a caller — a target program, a
//! documentation entry to remove — must stay inside the directory it belongs
//! to after `..` segments and symlinks are resolved. These checks have no
//! side effects.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GameboxError, GameboxResult};

/// Resolve `candidate` fully (symlinks and `..` included) and verify it is a
/// descendant of `root`.
///
/// The candidate itself need not exist: if it does not, its nearest existing
/// ancestor is resolved and the remaining components are appended unchanged.
/// Returns the resolved path on success.
///
/// # Errors
///
/// Returns [`GameboxError::PathOutsideRoot`] if the resolved path escapes
/// `root`, or a read error if `root` itself cannot be resolved.
pub fn resolve_within(candidate: &Path, root: &Path) -> GameboxResult<PathBuf> {
    let root = canonicalized(root)?;
    let resolved = resolve_lenient(candidate)?;

    if resolved.starts_with(&root) {
        Ok(resolved)
    } else {
        Err(GameboxError::PathOutsideRoot {
            path: candidate.to_path_buf(),
            root,
        })
    }
}

/// Like [`resolve_within`], but the final path component is not followed if
/// it is a symlink.
///
/// This judges where an entry *sits* rather than where it points, which is
/// what the documentation folder needs: its members are symlinks whose
/// targets legitimately live elsewhere in the gamebox.
pub fn resolve_entry_within(candidate: &Path, root: &Path) -> GameboxResult<PathBuf> {
    let root = canonicalized(root)?;

    let file_name = match candidate.file_name() {
        Some(name) => name,
        None => {
            return Err(GameboxError::PathOutsideRoot {
                path: candidate.to_path_buf(),
                root,
            })
        }
    };
    let parent = candidate.parent().unwrap_or_else(|| Path::new("."));
    let resolved = resolve_lenient(parent)?.join(file_name);

    if resolved.starts_with(&root) {
        Ok(resolved)
    } else {
        Err(GameboxError::PathOutsideRoot {
            path: candidate.to_path_buf(),
            root,
        })
    }
}

/// Canonicalize a path that is required to exist.
fn canonicalized(path: &Path) -> GameboxResult<PathBuf> {
    fs::canonicalize(path).map_err(|e| GameboxError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Canonicalize as much of `path` as exists, appending the non-existent tail
/// verbatim. `..` in the tail is rejected by resolving it against the
/// canonical prefix component by component.
fn resolve_lenient(path: &Path) -> GameboxResult<PathBuf> {
    let mut existing = path.to_path_buf();
    let mut tail = Vec::new();

    loop {
        match fs::canonicalize(&existing) {
            Ok(resolved) => {
                let mut result = resolved;
                for component in tail.iter().rev() {
                    if component == ".." {
                        result.pop();
                    } else if component == "." {
                        // skip
                    } else {
                        result.push(component);
                    }
                }
                return Ok(result);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                match existing.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => {
                        if let Some(component) = existing.components().next_back() {
                            tail.push(component.as_os_str().to_os_string());
                        }
                        existing = parent.to_path_buf();
                    }
                    _ => {
                        return Err(GameboxError::ReadFailed {
                            path: path.to_path_buf(),
                            source: e,
                        })
                    }
                }
            }
            Err(e) => {
                return Err(GameboxError::ReadFailed {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        }
    }
}
