//! Cascading delete rules
//!
//! Each deletable dimension maps to one [`CascadeRule`] in [`CASCADE_RULES`].
//! A rule names the list entry to drop, the project field that references the
//! value, and which destination links go with it. Applying a rule is a pure
//! `AppState -> AppState` transformation: the caller swaps in the returned
//! state, so the lists and tables always change together.

use serde::Serialize;
use std::fmt;
use tracing::info;

use crate::core::dimension::{self, DimensionKind};
use crate::core::error::ValidationError;
use crate::core::links;
use crate::core::projects;
use crate::core::state::AppState;
use crate::entities::{ProjectDraft, ProjectField};

/// What is being deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeTarget {
    Type,
    Name,
    GlobalDestination,
    PreciseDestination,
}

impl CascadeTarget {
    /// Cascade target for a stored dimension list, `None` for due dates
    pub fn from_dimension(kind: DimensionKind) -> Option<Self> {
        match kind {
            DimensionKind::Type => Some(CascadeTarget::Type),
            DimensionKind::Name => Some(CascadeTarget::Name),
            DimensionKind::GlobalDestination => Some(CascadeTarget::GlobalDestination),
            DimensionKind::DueDate => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CascadeTarget::Type => "project type",
            CascadeTarget::Name => "project name",
            CascadeTarget::GlobalDestination => "global destination",
            CascadeTarget::PreciseDestination => "precise destination",
        }
    }

    fn rule(&self) -> &'static CascadeRule {
        // CASCADE_RULES is indexed in declaration order of CascadeTarget
        &CASCADE_RULES[*self as usize]
    }
}

impl fmt::Display for CascadeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which destination links a cascade removes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkPurge {
    Keep,
    ByGlobal,
    ByPrecise,
}

#[derive(Debug)]
struct CascadeRule {
    target: CascadeTarget,
    /// Dimension list the value is removed from
    list: Option<DimensionKind>,
    /// Project field that references the value
    field: ProjectField,
    links: LinkPurge,
    /// Whether a global destination scope narrows the cascade
    scoped: bool,
}

const CASCADE_RULES: [CascadeRule; 4] = [
    CascadeRule {
        target: CascadeTarget::Type,
        list: Some(DimensionKind::Type),
        field: ProjectField::ProjectType,
        links: LinkPurge::Keep,
        scoped: false,
    },
    CascadeRule {
        target: CascadeTarget::Name,
        list: Some(DimensionKind::Name),
        field: ProjectField::ProjectName,
        links: LinkPurge::Keep,
        scoped: false,
    },
    CascadeRule {
        target: CascadeTarget::GlobalDestination,
        list: Some(DimensionKind::GlobalDestination),
        field: ProjectField::GlobalDestination,
        links: LinkPurge::ByGlobal,
        scoped: false,
    },
    CascadeRule {
        target: CascadeTarget::PreciseDestination,
        list: None,
        field: ProjectField::PreciseDestination,
        links: LinkPurge::ByPrecise,
        scoped: true,
    },
];

/// A confirmed delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeRequest {
    pub target: CascadeTarget,
    pub value: String,
    /// Global destination narrowing a precise destination delete
    pub scope: Option<String>,
}

impl CascadeRequest {
    pub fn new(target: CascadeTarget, value: impl Into<String>) -> Self {
        Self {
            target,
            value: value.into(),
            scope: None,
        }
    }

    pub fn scoped(mut self, global_destination: impl Into<String>) -> Self {
        let scope = global_destination.into();
        self.scope = (!scope.is_empty()).then_some(scope);
        self
    }
}

/// What a cascade removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub target: CascadeTarget,
    pub value: String,
    pub scope: Option<String>,
    /// Whether the value was present in its dimension list
    pub list_entry_removed: bool,
    pub projects_removed: usize,
    pub links_removed: usize,
}

/// Apply the cascade for `request` to a copy of `state`.
///
/// An empty value is rejected as "nothing selected" and nothing is computed.
pub fn cascade_delete(
    state: &AppState,
    request: &CascadeRequest,
) -> Result<(AppState, CascadeReport), ValidationError> {
    if request.value.is_empty() {
        return Err(ValidationError::NothingSelected);
    }

    let rule = request.target.rule();
    debug_assert_eq!(rule.target, request.target);
    let value = request.value.as_str();
    let scope = if rule.scoped {
        request.scope.as_deref().filter(|s| !s.is_empty())
    } else {
        None
    };

    let mut next = state.clone();

    let list_entry_removed = match rule.list {
        Some(kind) => dimension::remove(next.dimension_mut(kind), value) > 0,
        None => false,
    };

    let projects_removed = projects::remove_where(&mut next.projects, |p| {
        rule.field.value(p) == value && scope.map_or(true, |g| p.global_destination == g)
    });

    let links_removed = match rule.links {
        LinkPurge::Keep => 0,
        LinkPurge::ByGlobal => links::remove_by_global_destination(&mut next.destinations, value),
        LinkPurge::ByPrecise => {
            links::remove_by_precise_destination(&mut next.destinations, value, scope)
        }
    };

    info!(
        target_kind = %request.target,
        value,
        scope = scope.unwrap_or(""),
        projects_removed,
        links_removed,
        "cascade applied"
    );

    let report = CascadeReport {
        target: request.target,
        value: value.to_string(),
        scope: scope.map(str::to_string),
        list_entry_removed,
        projects_removed,
        links_removed,
    };
    Ok((next, report))
}

/// References in a draft that do not resolve against the current state.
///
/// Type, name and global destination must be present in their lists; the
/// precise destination must be linked to the draft's global destination.
/// Blank fields are not reported here (upsert rejects them).
pub fn unresolved_references(state: &AppState, draft: &ProjectDraft) -> Vec<ProjectField> {
    let mut unresolved = Vec::new();
    let checks = [
        (ProjectField::ProjectType, DimensionKind::Type),
        (ProjectField::ProjectName, DimensionKind::Name),
        (ProjectField::GlobalDestination, DimensionKind::GlobalDestination),
    ];
    for (field, kind) in checks {
        let value = draft.get(field);
        if !value.is_empty() && !state.dimension(kind).iter().any(|v| v == value) {
            unresolved.push(field);
        }
    }
    let precise = draft.get(ProjectField::PreciseDestination);
    if !precise.is_empty()
        && !links::contains_pair(&state.destinations, &draft.global_destination, precise)
    {
        unresolved.push(ProjectField::PreciseDestination);
    }
    unresolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::RecordId;
    use crate::entities::DestinationLink;

    fn ids(state: &AppState) -> Vec<&str> {
        state.projects.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_rule_table_is_indexed_by_target() {
        for (index, rule) in CASCADE_RULES.iter().enumerate() {
            assert_eq!(rule.target as usize, index);
        }
    }

    #[test]
    fn test_delete_type_removes_referencing_projects_only() {
        let state = AppState::seed();
        let (next, report) =
            cascade_delete(&state, &CascadeRequest::new(CascadeTarget::Type, "Type A")).unwrap();

        assert_eq!(next.project_types, vec!["Type B", "Urgent"]);
        assert_eq!(ids(&next), vec!["proj2"]);
        assert_eq!(next.destinations, state.destinations);
        assert!(report.list_entry_removed);
        assert_eq!(report.projects_removed, 1);
        assert_eq!(report.links_removed, 0);
    }

    #[test]
    fn test_delete_name() {
        let state = AppState::seed();
        let (next, _) =
            cascade_delete(&state, &CascadeRequest::new(CascadeTarget::Name, "Beta")).unwrap();
        assert_eq!(next.project_names, vec!["Alpha", "Gamma"]);
        assert_eq!(ids(&next), vec!["proj1"]);
    }

    #[test]
    fn test_delete_global_destination_removes_projects_and_links() {
        let state = AppState::seed();
        let (next, report) = cascade_delete(
            &state,
            &CascadeRequest::new(CascadeTarget::GlobalDestination, "Europe"),
        )
        .unwrap();

        assert_eq!(next.global_destinations, vec!["Amérique", "Asie"]);
        assert_eq!(ids(&next), vec!["proj2"]);
        assert_eq!(next.destinations.len(), 1);
        assert_eq!(next.destinations[0].id, RecordId::from("dest2"));
        assert_eq!(report.links_removed, 2);
    }

    #[test]
    fn test_delete_precise_destination_unscoped() {
        let mut state = AppState::seed();
        state
            .destinations
            .push(DestinationLink::new("Asie", "Paris", "", ""));
        let (next, report) = cascade_delete(
            &state,
            &CascadeRequest::new(CascadeTarget::PreciseDestination, "Paris"),
        )
        .unwrap();

        assert_eq!(ids(&next), vec!["proj2"]);
        assert_eq!(report.links_removed, 2);
        assert!(!report.list_entry_removed);
        assert_eq!(next.global_destinations, state.global_destinations);
    }

    #[test]
    fn test_delete_precise_destination_scoped_to_global() {
        let mut state = AppState::seed();
        state
            .destinations
            .push(DestinationLink::new("Asie", "Paris", "", ""));
        let request =
            CascadeRequest::new(CascadeTarget::PreciseDestination, "Paris").scoped("Asie");
        let (next, report) = cascade_delete(&state, &request).unwrap();

        assert_eq!(ids(&next), vec!["proj1", "proj2"]);
        assert_eq!(report.links_removed, 1);
        assert!(links::contains_pair(&next.destinations, "Europe", "Paris"));
        assert!(!links::contains_pair(&next.destinations, "Asie", "Paris"));
    }

    #[test]
    fn test_scope_ignored_for_unscoped_rules() {
        let state = AppState::seed();
        let request = CascadeRequest::new(CascadeTarget::Type, "Type A").scoped("Asie");
        let (next, report) = cascade_delete(&state, &request).unwrap();
        assert_eq!(ids(&next), vec!["proj2"]);
        assert_eq!(report.scope, None);
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let state = AppState::seed();
        let err = cascade_delete(&state, &CascadeRequest::new(CascadeTarget::Name, ""))
            .unwrap_err();
        assert_eq!(err, ValidationError::NothingSelected);
    }

    #[test]
    fn test_unknown_value_is_a_no_op() {
        let state = AppState::seed();
        let (next, report) =
            cascade_delete(&state, &CascadeRequest::new(CascadeTarget::Type, "Nope")).unwrap();
        assert_eq!(next, state);
        assert!(!report.list_entry_removed);
    }

    #[test]
    fn test_due_dates_survive_cascades() {
        let state = AppState::seed();
        let (next, _) = cascade_delete(
            &state,
            &CascadeRequest::new(CascadeTarget::GlobalDestination, "Europe"),
        )
        .unwrap();
        assert_eq!(next.due_dates, state.due_dates);
        assert_eq!(CascadeTarget::from_dimension(DimensionKind::DueDate), None);
    }

    #[test]
    fn test_unresolved_references() {
        let state = AppState::seed();
        let mut draft = ProjectDraft {
            project_name: "Alpha".to_string(),
            project_type: "Type Z".to_string(),
            global_destination: "Asie".to_string(),
            precise_destination: "Paris".to_string(),
            due_date: "01/2026".to_string(),
            ..Default::default()
        };
        assert_eq!(
            unresolved_references(&state, &draft),
            vec![ProjectField::ProjectType, ProjectField::PreciseDestination]
        );

        draft.project_type = "Type A".to_string();
        draft.global_destination = "Europe".to_string();
        assert!(unresolved_references(&state, &draft).is_empty());
    }
}
