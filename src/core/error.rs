//! Engine error kinds

use std::path::PathBuf;
use thiserror::Error;

use crate::core::dimension::DimensionKind;
use crate::core::wizard::WizardError;
use crate::entities::ProjectField;

/// A rejected operation. The state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no {} was written", .0.label())]
    EmptyValue(DimensionKind),

    #[error("no precise destination was written")]
    EmptyPreciseDestination,

    #[error("nothing selected")]
    NothingSelected,

    #[error("missing required field(s): {}", join_fields(.0))]
    MissingFields(Vec<ProjectField>),

    #[error("a global destination is required")]
    MissingGlobalDestination,

    #[error("{} values cannot be deleted", .0.label())]
    NotDeletable(DimensionKind),

    #[error("the project table is empty")]
    EmptyTable,
}

fn join_fields(fields: &[ProjectField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load, save or import failure
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("document is not valid JSON: {0}")]
    Parse(String),

    #[error("document is not a project catalog: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("failed to encode document: {0}")]
    Encode(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Any error surfaced by [`crate::core::Catalog`]
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Wizard(#[from] WizardError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::EmptyValue(DimensionKind::Type).to_string(),
            "no project type was written"
        );
        assert_eq!(
            ValidationError::MissingFields(vec![
                ProjectField::ProjectName,
                ProjectField::DueDate
            ])
            .to_string(),
            "missing required field(s): project name, due date"
        );
        assert_eq!(
            ValidationError::NotDeletable(DimensionKind::DueDate).to_string(),
            "due date values cannot be deleted"
        );
    }

    #[test]
    fn test_invalid_document_message_joins_reasons() {
        let err = PersistenceError::Invalid(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "document is not a project catalog: a; b");
    }
}
