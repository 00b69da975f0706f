//! Controlled-vocabulary lists
//!
//! Each dimension (project type, project name, global destination, due date)
//! is a plain list of strings kept free of duplicates and sorted with a
//! locale-style collation. Precise destinations are not a dimension list: they
//! are derived from the destination link table.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The four stored dimension lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    /// Project type (`bdd1_TypeProjet`)
    Type,
    /// Project name (`bdd2_NomProjet`)
    Name,
    /// Global destination (`bdd3_DestinationGlobale`)
    GlobalDestination,
    /// Due date history, `MM/YYYY` (`bdd4_DateEcheance`)
    DueDate,
}

impl DimensionKind {
    pub fn all() -> &'static [DimensionKind] {
        &[
            DimensionKind::Type,
            DimensionKind::Name,
            DimensionKind::GlobalDestination,
            DimensionKind::DueDate,
        ]
    }

    /// Short machine name used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionKind::Type => "type",
            DimensionKind::Name => "name",
            DimensionKind::GlobalDestination => "global",
            DimensionKind::DueDate => "due",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            DimensionKind::Type => "project type",
            DimensionKind::Name => "project name",
            DimensionKind::GlobalDestination => "global destination",
            DimensionKind::DueDate => "due date",
        }
    }

    /// Key of this list in the persisted document
    pub fn document_key(&self) -> &'static str {
        match self {
            DimensionKind::Type => "bdd1_TypeProjet",
            DimensionKind::Name => "bdd2_NomProjet",
            DimensionKind::GlobalDestination => "bdd3_DestinationGlobale",
            DimensionKind::DueDate => "bdd4_DateEcheance",
        }
    }

    /// Due dates accumulate as history and are never deleted
    pub fn deletable(&self) -> bool {
        !matches!(self, DimensionKind::DueDate)
    }
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DimensionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "type" | "project-type" => Ok(DimensionKind::Type),
            "name" | "project-name" => Ok(DimensionKind::Name),
            "global" | "global-destination" => Ok(DimensionKind::GlobalDestination),
            "due" | "due-date" => Ok(DimensionKind::DueDate),
            _ => Err(format!("Unknown dimension: {}", s)),
        }
    }
}

/// Insert `value` if it is non-empty and not already present, then re-sort.
///
/// Returns `true` when the list changed. Matching is exact and case-sensitive.
pub fn add_unique_sorted(collection: &mut Vec<String>, value: &str) -> bool {
    if value.is_empty() || collection.iter().any(|v| v == value) {
        return false;
    }
    collection.push(value.to_string());
    collection.sort_by(|a, b| collate(a, b));
    true
}

/// Remove every exact match of `value`, returning how many were removed.
pub fn remove(collection: &mut Vec<String>, value: &str) -> usize {
    let before = collection.len();
    collection.retain(|v| v != value);
    before - collection.len()
}

/// Sort a list and drop blanks and duplicates.
pub fn normalize(collection: &mut Vec<String>) {
    collection.retain(|v| !v.is_empty());
    collection.sort_by(|a, b| collate(a, b));
    collection.dedup();
}

/// Locale-style string ordering.
///
/// Letters compare case- and accent-insensitively first ("Amérique" sorts
/// before "Asie"), then unaccented before accented, then lowercase before
/// uppercase. Strings that are byte-identical compare equal.
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| case_key(a).cmp(&case_key(b)))
        .then_with(|| a.cmp(b))
}

fn primary_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    for c in s.chars().flat_map(char::to_lowercase) {
        fold_accent(c, &mut key);
    }
    key
}

fn case_key(s: &str) -> Vec<bool> {
    s.chars().map(char::is_uppercase).collect()
}

fn fold_accent(c: char, out: &mut String) {
    let base = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'æ' => {
            out.push_str("ae");
            return;
        }
        'œ' => {
            out.push_str("oe");
            return;
        }
        'ß' => {
            out.push_str("ss");
            return;
        }
        other => other,
    };
    out.push(base);
}
