//! Gamebox identity.
//!
//! Every gamebox carries a stable identifier in its game info. Identifiers
//! come in four kinds: manually assigned strings, generated UUIDs for empty
//! packages, content digests over the package's executables, and
//! reverse-DNS identifiers assigned by publishers. Only the digest kind is
//! ever recomputed automatically.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::{GameboxError, GameboxResult};

/// Buffer size for streaming executables through the hasher (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// The kind of a gamebox identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    /// Manually specified by the user.
    UserSpecified,
    /// Random UUID, generated for gameboxes with no executables.
    GeneratedUuid,
    /// SHA-256 digest over the gamebox's executables.
    ExecutableDigest,
    /// Reverse-DNS style identifier (`net.example.game`), assigned by a
    /// caller and never produced automatically.
    ReverseDns,
}

impl IdentifierKind {
    /// The tag persisted in game info for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierKind::UserSpecified => "user-specified",
            IdentifierKind::GeneratedUuid => "generated-uuid",
            IdentifierKind::ExecutableDigest => "executable-digest",
            IdentifierKind::ReverseDns => "reverse-dns",
        }
    }

    /// Parse a persisted kind tag.
    pub fn from_str_tag(tag: &str) -> Option<Self> {
        match tag {
            "user-specified" => Some(IdentifierKind::UserSpecified),
            "generated-uuid" => Some(IdentifierKind::GeneratedUuid),
            "executable-digest" => Some(IdentifierKind::ExecutableDigest),
            "reverse-dns" => Some(IdentifierKind::ReverseDns),
            _ => None,
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A gamebox identifier: the value plus how it was derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameIdentifier {
    /// The identifier string.
    pub value: String,
    /// How the identifier was derived.
    pub kind: IdentifierKind,
}

impl GameIdentifier {
    /// Create an identifier of the given kind.
    pub fn new(value: impl Into<String>, kind: IdentifierKind) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }

    /// Generate a fresh random identifier for a gamebox with no executables.
    pub fn generated() -> Self {
        Self::new(Uuid::new_v4().to_string(), IdentifierKind::GeneratedUuid)
    }
}

impl fmt::Display for GameIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.value, self.kind)
    }
}

/// Compute the combined digest over a set of executables.
///
/// Each file is streamed through SHA-256; the raw per-file digests are then
/// concatenated in the order given and hashed once more. Callers pass the
/// scanner's path-sorted executable list, which makes the result
/// deterministic for an unchanged executable set.
///
/// # Errors
///
/// Returns a read error if any executable cannot be opened or read.
pub fn digest_executables(executables: &[PathBuf]) -> GameboxResult<String> {
    let mut combined = Sha256::new();
    for path in executables {
        let digest = digest_file(path)?;
        combined.update(digest);
    }
    Ok(format!("{:x}", combined.finalize()))
}

/// Stream one file through SHA-256, returning the raw digest bytes.
fn digest_file(path: &Path) -> GameboxResult<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| GameboxError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];
    loop {
        let bytes_read = file.read(&mut buffer).map_err(|e| GameboxError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }
    Ok(hasher.finalize().to_vec())
}
