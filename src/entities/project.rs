//! Project entity type

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::identity::RecordId;

/// A catalogued project (one row of `bddTb1_Projects`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: RecordId,

    #[serde(rename = "nomProjet", default)]
    pub project_name: String,

    #[serde(rename = "typeProjet", default)]
    pub project_type: String,

    #[serde(rename = "destinationGlobale", default)]
    pub global_destination: String,

    #[serde(rename = "destinationPrecise", default)]
    pub precise_destination: String,

    /// Due date, `MM/YYYY`
    #[serde(rename = "dateEcheance", default)]
    pub due_date: String,

    #[serde(default)]
    pub description: String,

    #[serde(rename = "travailEnCours", default)]
    pub work_in_progress: String,

    #[serde(rename = "commentaires", default)]
    pub comments: String,
}

/// Addressable project fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectField {
    ProjectName,
    ProjectType,
    GlobalDestination,
    PreciseDestination,
    DueDate,
    Description,
    WorkInProgress,
    Comments,
}

impl ProjectField {
    /// Fields that must be non-empty on upsert
    pub const REQUIRED: [ProjectField; 5] = [
        ProjectField::ProjectName,
        ProjectField::ProjectType,
        ProjectField::GlobalDestination,
        ProjectField::PreciseDestination,
        ProjectField::DueDate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProjectField::ProjectName => "project name",
            ProjectField::ProjectType => "project type",
            ProjectField::GlobalDestination => "global destination",
            ProjectField::PreciseDestination => "precise destination",
            ProjectField::DueDate => "due date",
            ProjectField::Description => "description",
            ProjectField::WorkInProgress => "work in progress",
            ProjectField::Comments => "comments",
        }
    }

    /// Read this field from a project
    pub fn value<'a>(&self, project: &'a Project) -> &'a str {
        match self {
            ProjectField::ProjectName => &project.project_name,
            ProjectField::ProjectType => &project.project_type,
            ProjectField::GlobalDestination => &project.global_destination,
            ProjectField::PreciseDestination => &project.precise_destination,
            ProjectField::DueDate => &project.due_date,
            ProjectField::Description => &project.description,
            ProjectField::WorkInProgress => &project.work_in_progress,
            ProjectField::Comments => &project.comments,
        }
    }

    fn draft_value<'a>(&self, draft: &'a ProjectDraft) -> &'a str {
        match self {
            ProjectField::ProjectName => &draft.project_name,
            ProjectField::ProjectType => &draft.project_type,
            ProjectField::GlobalDestination => &draft.global_destination,
            ProjectField::PreciseDestination => &draft.precise_destination,
            ProjectField::DueDate => &draft.due_date,
            ProjectField::Description => &draft.description,
            ProjectField::WorkInProgress => &draft.work_in_progress,
            ProjectField::Comments => &draft.comments,
        }
    }
}

impl fmt::Display for ProjectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Input to a project upsert.
///
/// `id: None` (or an id that matches no row) appends a new project; an id that
/// matches an existing row replaces it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub id: Option<RecordId>,
    pub project_name: String,
    pub project_type: String,
    pub global_destination: String,
    pub precise_destination: String,
    pub due_date: String,
    pub description: String,
    pub work_in_progress: String,
    pub comments: String,
}

impl ProjectDraft {
    /// Pre-fill a draft from an existing project (edit flow)
    pub fn from_project(project: &Project) -> Self {
        Self {
            id: Some(project.id.clone()),
            project_name: project.project_name.clone(),
            project_type: project.project_type.clone(),
            global_destination: project.global_destination.clone(),
            precise_destination: project.precise_destination.clone(),
            due_date: project.due_date.clone(),
            description: project.description.clone(),
            work_in_progress: project.work_in_progress.clone(),
            comments: project.comments.clone(),
        }
    }

    /// Read a field from the draft
    pub fn get(&self, field: ProjectField) -> &str {
        field.draft_value(self)
    }

    /// Required fields that are empty or blank
    pub fn missing_fields(&self) -> Vec<ProjectField> {
        ProjectField::REQUIRED
            .iter()
            .copied()
            .filter(|field| field.draft_value(self).trim().is_empty())
            .collect()
    }

    /// Build the stored row under the given id
    pub fn into_project(self, id: RecordId) -> Project {
        Project {
            id,
            project_name: self.project_name,
            project_type: self.project_type,
            global_destination: self.global_destination,
            precise_destination: self.precise_destination,
            due_date: self.due_date,
            description: self.description,
            work_in_progress: self.work_in_progress,
            comments: self.comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha() -> Project {
        Project {
            id: RecordId::from("proj1"),
            project_name: "Alpha".to_string(),
            project_type: "Type A".to_string(),
            global_destination: "Europe".to_string(),
            precise_destination: "Paris".to_string(),
            due_date: "12/2024".to_string(),
            description: "Développement initial".to_string(),
            work_in_progress: "Phase 1".to_string(),
            comments: "RAS".to_string(),
        }
    }

    #[test]
    fn test_project_uses_document_field_names() {
        let json = serde_json::to_value(alpha()).unwrap();
        assert_eq!(json["nomProjet"], "Alpha");
        assert_eq!(json["typeProjet"], "Type A");
        assert_eq!(json["destinationGlobale"], "Europe");
        assert_eq!(json["destinationPrecise"], "Paris");
        assert_eq!(json["dateEcheance"], "12/2024");
        assert_eq!(json["travailEnCours"], "Phase 1");
        assert_eq!(json["commentaires"], "RAS");
    }

    #[test]
    fn test_optional_text_fields_default_to_empty() {
        let project: Project = serde_json::from_str(
            r#"{"id":"p","nomProjet":"Alpha","typeProjet":"Type A","destinationGlobale":"Europe","destinationPrecise":"Paris","dateEcheance":"12/2024"}"#,
        )
        .unwrap();
        assert_eq!(project.description, "");
        assert_eq!(project.work_in_progress, "");
        assert_eq!(project.comments, "");
    }

    #[test]
    fn test_missing_fields_lists_blank_required_fields() {
        let draft = ProjectDraft {
            project_name: "Alpha".to_string(),
            project_type: "  ".to_string(),
            due_date: "12/2024".to_string(),
            ..Default::default()
        };
        assert_eq!(
            draft.missing_fields(),
            vec![
                ProjectField::ProjectType,
                ProjectField::GlobalDestination,
                ProjectField::PreciseDestination,
            ]
        );
    }

    #[test]
    fn test_draft_round_trips_project() {
        let project = alpha();
        let draft = ProjectDraft::from_project(&project);
        assert!(draft.missing_fields().is_empty());
        assert_eq!(draft.get(ProjectField::Comments), "RAS");
        assert_eq!(draft.into_project(project.id.clone()), project);
    }
}
