//! Record identity using type-prefixed ULIDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Record type prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordPrefix {
    /// Project row
    Prj,
    /// Destination link (precise destination + contact)
    Dst,
}

impl RecordPrefix {
    /// Get the string representation of the prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordPrefix::Prj => "PRJ",
            RecordPrefix::Dst => "DST",
        }
    }

    /// Get all valid prefixes
    pub fn all() -> &'static [RecordPrefix] {
        &[RecordPrefix::Prj, RecordPrefix::Dst]
    }
}

impl fmt::Display for RecordPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordPrefix {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PRJ" => Ok(RecordPrefix::Prj),
            "DST" => Ok(RecordPrefix::Dst),
            _ => Err(IdParseError::InvalidPrefix(s.to_string())),
        }
    }
}

/// An opaque record identifier.
///
/// Identifiers generated by this crate look like `PRJ-<ULID>`. Identifiers read
/// back from a document are kept verbatim, so hand-written ids such as `proj1`
/// stay valid for the lifetime of their record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh identifier with the given prefix
    pub fn new(prefix: RecordPrefix) -> Self {
        Self(format!("{}-{}", prefix, Ulid::new()))
    }

    /// Parse an identifier typed by a user
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix of a generated identifier, `None` for legacy ids
    pub fn prefix(&self) -> Option<RecordPrefix> {
        let (prefix, ulid) = self.0.split_once('-')?;
        Ulid::from_string(ulid).ok()?;
        prefix.parse().ok()
    }

    /// ULID component of a generated identifier
    pub fn ulid(&self) -> Option<Ulid> {
        let (_, ulid) = self.0.split_once('-')?;
        Ulid::from_string(ulid).ok()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(IdParseError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(IdParseError::Whitespace(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Errors that can occur when parsing record IDs
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdParseError {
    #[error("invalid record prefix: '{0}' (valid: PRJ, DST)")]
    InvalidPrefix(String),

    #[error("record ID must not be empty")]
    Empty,

    #[error("record ID must not contain whitespace: '{0}'")]
    Whitespace(String),
}
