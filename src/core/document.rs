//! Encoding and decoding of the persisted catalog document

use tracing::debug;

use crate::core::dimension::{self, DimensionKind};
use crate::core::error::PersistenceError;
use crate::core::state::AppState;
use crate::schema::{SchemaRegistry, Validator};

/// Pretty-printed JSON for a state
pub fn encode(state: &AppState) -> Result<String, PersistenceError> {
    serde_json::to_string_pretty(state).map_err(|e| PersistenceError::Encode(e.to_string()))
}

/// Parse and schema-check a document, then build the state from it.
///
/// Dimension lists are normalized on the way in so hand-edited documents
/// still satisfy the sorted/unique invariant.
pub fn decode(content: &str) -> Result<AppState, PersistenceError> {
    decode_named(content, "catalog.json")
}

/// [`decode`] with a file name used in error reports
pub fn decode_named(content: &str, filename: &str) -> Result<AppState, PersistenceError> {
    let validator = Validator::new(&SchemaRegistry)
        .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;

    let value = validator.validate(content, filename).map_err(|e| {
        if e.is_syntax_error() {
            PersistenceError::Parse(e.messages().join("; "))
        } else {
            PersistenceError::Invalid(e.messages())
        }
    })?;

    let mut state: AppState =
        serde_json::from_value(value).map_err(|e| PersistenceError::Parse(e.to_string()))?;
    for kind in DimensionKind::all() {
        dimension::normalize(state.dimension_mut(*kind));
    }
    debug!(
        projects = state.projects.len(),
        destinations = state.destinations.len(),
        "document decoded"
    );
    Ok(state)
}
