//! Persisted game info.
//!
//! Each gamebox carries a `GameInfo.json` manifest at its root holding the
//! identifier, the target program, the close-on-exit flag, the launcher list
//! and any extra keys a caller wants to stash. Recognized keys are validated
//! at this boundary; everything else passes through untyped.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{GameboxError, GameboxResult};
use crate::identifier::IdentifierKind;

/// File name of the game info manifest inside the gamebox.
pub const GAME_INFO_FILENAME: &str = "GameInfo.json";

/// The game info keys this crate manages itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInfoKey {
    /// The gamebox identifier string.
    Identifier,
    /// The identifier kind tag.
    IdentifierKind,
    /// Path of the target program, relative to the gamebox root.
    TargetProgram,
    /// Whether emulation should end when the target program exits.
    CloseOnExit,
    /// The launcher array. Managed through the launcher registry and not
    /// settable directly.
    Launchers,
}

impl GameInfoKey {
    /// The persisted key string.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameInfoKey::Identifier => "game_identifier",
            GameInfoKey::IdentifierKind => "game_identifier_kind",
            GameInfoKey::TargetProgram => "target_program",
            GameInfoKey::CloseOnExit => "close_on_exit",
            GameInfoKey::Launchers => "launchers",
        }
    }

    /// Which recognized key a raw string refers to, if any.
    pub fn recognized(key: &str) -> Option<Self> {
        match key {
            "game_identifier" => Some(GameInfoKey::Identifier),
            "game_identifier_kind" => Some(GameInfoKey::IdentifierKind),
            "target_program" => Some(GameInfoKey::TargetProgram),
            "close_on_exit" => Some(GameInfoKey::CloseOnExit),
            "launchers" => Some(GameInfoKey::Launchers),
            _ => None,
        }
    }
}

/// The game info store: recognized keys plus arbitrary caller keys.
#[derive(Debug, Clone, Default)]
pub struct GameInfo {
    values: Map<String, Value>,
    dirty: bool,
}

impl GameInfo {
    /// Load game info from the manifest file. A missing file yields an
    /// empty store; a malformed one is an error.
    pub fn load(path: &Path) -> GameboxResult<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(GameboxError::ReadFailed {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        let values: Map<String, Value> =
            serde_json::from_str(&contents).map_err(|e| GameboxError::MetadataParseFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            values,
            dirty: false,
        })
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Set a value, validating recognized keys at the boundary.
    ///
    /// # Errors
    ///
    /// Returns [`GameboxError::InvalidMetadata`] if a recognized key is given
    /// a value of the wrong shape, or for the launcher array, which is
    /// managed through the launcher registry.
    pub fn set(&mut self, key: &str, value: Value) -> GameboxResult<()> {
        if let Some(recognized) = GameInfoKey::recognized(key) {
            validate(recognized, &value)?;
        }
        self.set_unchecked(key, value);
        Ok(())
    }

    /// Remove a value by key, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`GameboxError::InvalidMetadata`] for the launcher array.
    pub fn remove(&mut self, key: &str) -> GameboxResult<Option<Value>> {
        if GameInfoKey::recognized(key) == Some(GameInfoKey::Launchers) {
            return Err(launchers_are_managed());
        }
        let previous = self.values.remove(key);
        if previous.is_some() {
            self.dirty = true;
        }
        Ok(previous)
    }

    /// Set a value bypassing boundary validation. Used internally for the
    /// keys this crate owns.
    pub(crate) fn set_unchecked(&mut self, key: &str, value: Value) {
        if self.values.get(key) != Some(&value) {
            self.values.insert(key.to_string(), value);
            self.dirty = true;
        }
    }

    pub(crate) fn remove_unchecked(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.dirty = true;
        }
    }

    /// Get a recognized key's string value, if present and a string.
    pub(crate) fn get_str(&self, key: GameInfoKey) -> Option<&str> {
        self.get(key.as_str()).and_then(Value::as_str)
    }

    /// Whether the store has unpersisted changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the store to the manifest file if dirty.
    ///
    /// The manifest is written to a temporary sibling and renamed into
    /// place, so a failed write never leaves a truncated manifest behind.
    pub fn persist(&mut self, path: &Path) -> GameboxResult<()> {
        if !self.dirty {
            return Ok(());
        }

        let contents = serde_json::to_string_pretty(&self.values).map_err(|e| {
            GameboxError::MetadataParseFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        let staging = path.with_extension("json.tmp");
        fs::write(&staging, contents).map_err(|e| GameboxError::WriteFailed {
            path: staging.clone(),
            source: e,
        })?;
        fs::rename(&staging, path).map_err(|e| GameboxError::WriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.dirty = false;
        Ok(())
    }
}

fn validate(key: GameInfoKey, value: &Value) -> GameboxResult<()> {
    match key {
        GameInfoKey::Identifier | GameInfoKey::TargetProgram => {
            if !value.is_string() {
                return Err(GameboxError::InvalidMetadata {
                    key: key.as_str().to_string(),
                    reason: "expected a string".to_string(),
                });
            }
        }
        GameInfoKey::IdentifierKind => {
            let valid = value
                .as_str()
                .and_then(IdentifierKind::from_str_tag)
                .is_some();
            if !valid {
                return Err(GameboxError::InvalidMetadata {
                    key: key.as_str().to_string(),
                    reason: "expected a known identifier kind tag".to_string(),
                });
            }
        }
        GameInfoKey::CloseOnExit => {
            if !value.is_boolean() {
                return Err(GameboxError::InvalidMetadata {
                    key: key.as_str().to_string(),
                    reason: "expected a boolean".to_string(),
                });
            }
        }
        GameInfoKey::Launchers => return Err(launchers_are_managed()),
    }
    Ok(())
}

fn launchers_are_managed() -> GameboxError {
    GameboxError::InvalidMetadata {
        key: GameInfoKey::Launchers.as_str().to_string(),
        reason: "launchers are managed through the launcher registry".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let info = GameInfo::load(&temp.path().join(GAME_INFO_FILENAME)).unwrap();
        assert!(info.get("anything").is_none());
        assert!(!info.is_dirty());
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(GAME_INFO_FILENAME);
        fs::write(&path, "not json").unwrap();

        let result = GameInfo::load(&path);
        assert!(matches!(
            result,
            Err(GameboxError::MetadataParseFailed { .. })
        ));
    }

    #[test]
    fn test_set_get_persist_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(GAME_INFO_FILENAME);

        let mut info = GameInfo::default();
        info.set("publisher", json!("Legend Entertainment")).unwrap();
        info.set("close_on_exit", json!(true)).unwrap();
        assert!(info.is_dirty());
        info.persist(&path).unwrap();
        assert!(!info.is_dirty());

        let reloaded = GameInfo::load(&path).unwrap();
        assert_eq!(
            reloaded.get("publisher"),
            Some(&json!("Legend Entertainment"))
        );
        assert_eq!(reloaded.get("close_on_exit"), Some(&json!(true)));
    }

    #[test]
    fn test_recognized_keys_are_validated() {
        let mut info = GameInfo::default();

        assert!(info.set("close_on_exit", json!("yes")).is_err());
        assert!(info.set("game_identifier", json!(42)).is_err());
        assert!(info.set("game_identifier_kind", json!("bogus-kind")).is_err());
        assert!(info
            .set("game_identifier_kind", json!("executable-digest"))
            .is_ok());
    }

    #[test]
    fn test_launchers_key_is_not_settable_directly() {
        let mut info = GameInfo::default();
        assert!(info.set("launchers", json!([])).is_err());
        assert!(info.remove("launchers").is_err());
    }

    #[test]
    fn test_arbitrary_keys_pass_through() {
        let mut info = GameInfo::default();
        info.set("custom", json!({ "nested": [1, 2, 3] })).unwrap();
        assert_eq!(info.get("custom").unwrap()["nested"][2], json!(3));
    }

    #[test]
    fn test_unchanged_set_does_not_dirty() {
        let mut info = GameInfo::default();
        info.set("key", json!("value")).unwrap();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(GAME_INFO_FILENAME);
        info.persist(&path).unwrap();

        info.set("key", json!("value")).unwrap();
        assert!(!info.is_dirty());
    }

    #[test]
    fn test_persist_skips_when_clean() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(GAME_INFO_FILENAME);

        let mut info = GameInfo::default();
        info.persist(&path).unwrap();
        // Nothing was ever set, so no file should be created.
        assert!(!path.exists());
    }
}
