//! Launcher shortcuts.
//!
//! A gamebox keeps an ordered list of launch shortcuts, each naming a
//! program inside the package with optional arguments. At most one launcher
//! is the default. The registry owns the list and the single-default
//! invariant; persistence into game info is handled by the owning
//! [`Gamebox`](crate::Gamebox).

use serde::{Deserialize, Serialize};

use crate::error::{GameboxError, GameboxResult};

/// A launch shortcut for a program inside the gamebox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Launcher {
    /// Display name for the shortcut.
    pub title: String,

    /// Path of the program, relative to the gamebox root.
    pub path: String,

    /// Launch-time arguments passed to the program.
    #[serde(default)]
    pub arguments: String,

    /// Whether this is the launcher run when the gamebox is first opened.
    #[serde(default)]
    pub is_default: bool,
}

impl Launcher {
    /// Create a non-default launcher.
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            arguments: String::new(),
            is_default: false,
        }
    }

    /// Set the launch arguments (builder pattern).
    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = arguments.into();
        self
    }

    /// Mark as the default launcher (builder pattern).
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// The ordered launcher list of a gamebox.
///
/// Invariant: at most one launcher has `is_default` set. Inserting a new
/// default clears any existing one; removing the default leaves the registry
/// with no default rather than promoting another entry.
#[derive(Debug, Clone, Default)]
pub struct LauncherRegistry {
    launchers: Vec<Launcher>,
    dirty: bool,
}

impl LauncherRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the registry from a persisted launcher list.
    ///
    /// If the persisted list violates the single-default invariant, the
    /// first default wins and the rest are cleared.
    pub fn from_launchers(launchers: Vec<Launcher>) -> Self {
        let mut registry = Self {
            launchers,
            dirty: false,
        };
        let mut seen_default = false;
        for launcher in &mut registry.launchers {
            if launcher.is_default {
                if seen_default {
                    launcher.is_default = false;
                    registry.dirty = true;
                } else {
                    seen_default = true;
                }
            }
        }
        registry
    }

    /// The launchers, in order.
    pub fn launchers(&self) -> &[Launcher] {
        &self.launchers
    }

    /// Number of launchers.
    pub fn len(&self) -> usize {
        self.launchers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.launchers.is_empty()
    }

    /// Insert a launcher at the given position.
    ///
    /// If the new launcher is marked default, every other default flag is
    /// cleared first.
    ///
    /// # Errors
    ///
    /// Returns [`GameboxError::IndexOutOfRange`] if `index` is greater than
    /// the current length.
    pub fn insert(&mut self, launcher: Launcher, index: usize) -> GameboxResult<()> {
        if index > self.launchers.len() {
            return Err(GameboxError::IndexOutOfRange {
                index,
                len: self.launchers.len(),
            });
        }
        if launcher.is_default {
            self.clear_defaults();
        }
        self.launchers.insert(index, launcher);
        self.dirty = true;
        Ok(())
    }

    /// Append a launcher at the end of the list.
    pub fn append(&mut self, launcher: Launcher) {
        // Appending at the current length cannot be out of range.
        let index = self.launchers.len();
        let _ = self.insert(launcher, index);
    }

    /// Remove the first launcher equal to `launcher`.
    ///
    /// # Errors
    ///
    /// Returns [`GameboxError::LauncherNotFound`] if no launcher matches.
    pub fn remove(&mut self, launcher: &Launcher) -> GameboxResult<Launcher> {
        let index = self
            .launchers
            .iter()
            .position(|l| l == launcher)
            .ok_or_else(|| GameboxError::LauncherNotFound {
                title: launcher.title.clone(),
            })?;
        self.remove_at(index)
    }

    /// Remove the launcher at the given position.
    ///
    /// Removing the default launcher leaves the registry with no default.
    ///
    /// # Errors
    ///
    /// Returns [`GameboxError::IndexOutOfRange`] if `index` is past the end.
    pub fn remove_at(&mut self, index: usize) -> GameboxResult<Launcher> {
        if index >= self.launchers.len() {
            return Err(GameboxError::IndexOutOfRange {
                index,
                len: self.launchers.len(),
            });
        }
        self.dirty = true;
        Ok(self.launchers.remove(index))
    }

    /// The default launcher, if any.
    pub fn default_launcher(&self) -> Option<&Launcher> {
        self.launchers.iter().find(|l| l.is_default)
    }

    /// Position of the default launcher, or `None`.
    pub fn default_index(&self) -> Option<usize> {
        self.launchers.iter().position(|l| l.is_default)
    }

    /// Make the launcher at `index` the default, or clear the default
    /// entirely with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`GameboxError::IndexOutOfRange`] if `index` is past the end.
    pub fn set_default_index(&mut self, index: Option<usize>) -> GameboxResult<()> {
        if let Some(index) = index {
            if index >= self.launchers.len() {
                return Err(GameboxError::IndexOutOfRange {
                    index,
                    len: self.launchers.len(),
                });
            }
            self.clear_defaults();
            self.launchers[index].is_default = true;
        } else {
            self.clear_defaults();
        }
        self.dirty = true;
        Ok(())
    }

    /// Whether the registry has unpersisted changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the registry as persisted.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn clear_defaults(&mut self) {
        for launcher in &mut self.launchers {
            launcher.is_default = false;
        }
    }
}
