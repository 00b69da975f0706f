//! Project filtering
//!
//! Filtering is a pure function of the project table and the criteria. Nothing
//! is cached; callers recompute on every change.

use crate::entities::{Project, ProjectField};

/// Exact-match criteria. An empty string means "no criterion".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub project_type: String,
    pub project_name: String,
    pub global_destination: String,
    pub precise_destination: String,
    pub due_date: String,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project_type(mut self, value: impl Into<String>) -> Self {
        self.project_type = value.into();
        self
    }

    pub fn project_name(mut self, value: impl Into<String>) -> Self {
        self.project_name = value.into();
        self
    }

    pub fn global_destination(mut self, value: impl Into<String>) -> Self {
        self.global_destination = value.into();
        self
    }

    pub fn precise_destination(mut self, value: impl Into<String>) -> Self {
        self.precise_destination = value.into();
        self
    }

    pub fn due_date(mut self, value: impl Into<String>) -> Self {
        self.due_date = value.into();
        self
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }

    /// The criteria that are set, paired with the field they constrain
    pub fn active(&self) -> Vec<(ProjectField, &str)> {
        [
            (ProjectField::ProjectType, self.project_type.as_str()),
            (ProjectField::ProjectName, self.project_name.as_str()),
            (ProjectField::GlobalDestination, self.global_destination.as_str()),
            (ProjectField::PreciseDestination, self.precise_destination.as_str()),
            (ProjectField::DueDate, self.due_date.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }

    /// Whether a single project satisfies every active criterion
    pub fn matches(&self, project: &Project) -> bool {
        self.active()
            .iter()
            .all(|(field, value)| field.value(project) == *value)
    }
}

/// Projects matching every non-empty criterion, in table order
pub fn compute_visible<'a>(projects: &'a [Project], criteria: &FilterCriteria) -> Vec<&'a Project> {
    let active = criteria.active();
    projects
        .iter()
        .filter(|p| active.iter().all(|(field, value)| field.value(p) == *value))
        .collect()
}
