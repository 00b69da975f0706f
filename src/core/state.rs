//! The aggregate application state and its seed dataset

use serde::{Deserialize, Serialize};

use crate::core::dimension::{self, DimensionKind};
use crate::core::identity::RecordId;
use crate::entities::{DestinationLink, Project};

/// Everything that is persisted, always saved and loaded as a whole.
///
/// Field names follow the on-disk document. The four dimension lists other
/// than `bdd1_TypeProjet` default to empty when a document omits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(rename = "bdd1_TypeProjet")]
    pub project_types: Vec<String>,

    #[serde(rename = "bdd2_NomProjet", default)]
    pub project_names: Vec<String>,

    #[serde(rename = "bdd3_DestinationGlobale", default)]
    pub global_destinations: Vec<String>,

    #[serde(rename = "bdd4_DateEcheance", default)]
    pub due_dates: Vec<String>,

    #[serde(rename = "bddTb1_Projects")]
    pub projects: Vec<Project>,

    #[serde(rename = "bddTb2_Destinations")]
    pub destinations: Vec<DestinationLink>,
}

impl AppState {
    /// The dataset used on first run and whenever the stored document is
    /// missing or unreadable.
    pub fn seed() -> Self {
        let mut state = Self {
            project_types: strings(&["Type A", "Type B", "Urgent"]),
            project_names: strings(&["Alpha", "Beta", "Gamma"]),
            global_destinations: strings(&["Europe", "Asie", "Amérique"]),
            due_dates: strings(&["06/2024", "12/2024", "03/2025"]),
            projects: vec![
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
                },
                Project {
                    id: RecordId::from("proj2"),
                    project_name: "Beta".to_string(),
                    project_type: "Type B".to_string(),
                    global_destination: "Asie".to_string(),
                    precise_destination: "Tokyo".to_string(),
                    due_date: "03/2025".to_string(),
                    description: "Extension fonctionnalités".to_string(),
                    work_in_progress: "Analyse".to_string(),
                    comments: "Attente validation".to_string(),
                },
            ],
            destinations: vec![
                seed_link("dest1", "Europe", "Paris", "Jean Dupont", "jean.dupont@example.com"),
                seed_link("dest2", "Asie", "Tokyo", "Yoko Tanaka", "yoko.tanaka@example.com"),
                seed_link("dest3", "Europe", "Berlin", "Hans Müller", "hans.muller@example.com"),
            ],
        };
        for kind in DimensionKind::all() {
            dimension::normalize(state.dimension_mut(*kind));
        }
        state
    }

    /// Read one dimension list
    pub fn dimension(&self, kind: DimensionKind) -> &[String] {
        match kind {
            DimensionKind::Type => &self.project_types,
            DimensionKind::Name => &self.project_names,
            DimensionKind::GlobalDestination => &self.global_destinations,
            DimensionKind::DueDate => &self.due_dates,
        }
    }

    pub fn dimension_mut(&mut self, kind: DimensionKind) -> &mut Vec<String> {
        match kind {
            DimensionKind::Type => &mut self.project_types,
            DimensionKind::Name => &mut self.project_names,
            DimensionKind::GlobalDestination => &mut self.global_destinations,
            DimensionKind::DueDate => &mut self.due_dates,
        }
    }

    /// Look up a project by id
    pub fn project(&self, id: &RecordId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    /// Position of a project in table order
    pub fn project_position(&self, id: &RecordId) -> Option<usize> {
        self.projects.iter().position(|p| &p.id == id)
    }

    pub fn contains_id(&self, id: &RecordId) -> bool {
        self.projects.iter().any(|p| &p.id == id) || self.destinations.iter().any(|d| &d.id == id)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn seed_link(id: &str, global: &str, precise: &str, name: &str, info: &str) -> DestinationLink {
    DestinationLink {
        id: RecordId::from(id),
        global_destination: global.to_string(),
        precise_destination: precise.to_string(),
        contact_name: name.to_string(),
        contact_info: info.to_string(),
    }
}
