//! Project table operations

use tracing::debug;

use crate::core::dimension::{self, DimensionKind};
use crate::core::error::ValidationError;
use crate::core::identity::{RecordId, RecordPrefix};
use crate::core::state::AppState;
use crate::entities::{Project, ProjectDraft};

/// What an upsert did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upserted {
    /// A new row was appended under a fresh id
    Created(RecordId),
    /// The row with this id was replaced in place
    Updated(RecordId),
}

impl Upserted {
    pub fn id(&self) -> &RecordId {
        match self {
            Upserted::Created(id) | Upserted::Updated(id) => id,
        }
    }
}

/// Insert or replace a project.
///
/// Rejects the draft before touching the state if any required field is blank.
/// On success the due date is merged into the due-date list.
pub fn upsert(state: &mut AppState, draft: ProjectDraft) -> Result<Upserted, ValidationError> {
    let missing = draft.missing_fields();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let due_date = draft.due_date.clone();
    let existing = draft
        .id
        .as_ref()
        .and_then(|id| state.project_position(id));

    let outcome = match existing {
        Some(position) => {
            let id = state.projects[position].id.clone();
            state.projects[position] = draft.into_project(id.clone());
            Upserted::Updated(id)
        }
        None => {
            let id = fresh_id(state);
            state.projects.push(draft.into_project(id.clone()));
            Upserted::Created(id)
        }
    };

    dimension::add_unique_sorted(state.dimension_mut(DimensionKind::DueDate), &due_date);
    debug!(id = %outcome.id(), created = matches!(outcome, Upserted::Created(_)), "project upserted");
    Ok(outcome)
}

/// Delete the project with the given id. Returns `false` if absent.
pub fn remove(projects: &mut Vec<Project>, id: &RecordId) -> bool {
    let before = projects.len();
    projects.retain(|p| &p.id != id);
    before != projects.len()
}

/// Bulk delete every project matching `predicate`, returning the count.
pub fn remove_where<F>(projects: &mut Vec<Project>, mut predicate: F) -> usize
where
    F: FnMut(&Project) -> bool,
{
    let before = projects.len();
    projects.retain(|p| !predicate(p));
    before - projects.len()
}

fn fresh_id(state: &AppState) -> RecordId {
    loop {
        let id = RecordId::new(RecordPrefix::Prj);
        if !state.contains_id(&id) {
            return id;
        }
    }
}
