//! The catalog owner
//!
//! [`Catalog`] is the only holder of the [`AppState`]. Every operation that
//! changes the state saves it through the [`Store`] before returning. A save
//! failure does not roll anything back: the in-memory state stays
//! authoritative and the failure is reported in [`Applied::persisted`].

use tracing::{debug, info, warn};

use crate::core::dimension::{self, DimensionKind};
use crate::core::document;
use crate::core::error::{CatalogError, PersistenceError, ValidationError};
use crate::core::filter::{self, FilterCriteria};
use crate::core::identity::RecordId;
use crate::core::integrity::{self, CascadeReport, CascadeRequest, CascadeTarget};
use crate::core::links;
use crate::core::projects::{self, Upserted};
use crate::core::state::AppState;
use crate::core::store::Store;
use crate::core::wizard::{DestinationWizard, Transition, WizardStep};
use crate::entities::{DestinationLink, Project, ProjectDraft, ProjectField};

/// Result of a successful mutation together with the outcome of saving it
#[derive(Debug)]
#[must_use]
pub struct Applied<T> {
    pub value: T,
    pub persisted: Result<(), PersistenceError>,
}

impl<T> Applied<T> {
    fn unsaved(value: T) -> Self {
        Self {
            value,
            persisted: Ok(()),
        }
    }

    /// Turn a save failure into an error, keeping the value otherwise
    pub fn into_result(self) -> Result<T, PersistenceError> {
        self.persisted.map(|()| self.value)
    }
}

/// How the catalog came to hold its state
#[derive(Debug)]
pub enum LoadOutcome {
    /// The stored document was read
    Loaded,
    /// The seed dataset was installed. `reason` is `None` when nothing was
    /// stored yet, otherwise why the stored document was rejected.
    Seeded {
        reason: Option<String>,
        persisted: Result<(), PersistenceError>,
    },
}

pub struct Catalog<S: Store> {
    state: AppState,
    store: S,
    wizard: DestinationWizard,
}

impl<S: Store> Catalog<S> {
    /// Load the stored document, falling back to (and saving) the seed
    /// dataset when it is missing or unusable.
    pub fn open(store: S) -> (Self, LoadOutcome) {
        let (state, reason) = match store.load() {
            Ok(Some(state)) => {
                debug!(location = %store.describe(), "catalog loaded");
                return (Self::with_state(store, state), LoadOutcome::Loaded);
            }
            Ok(None) => (AppState::seed(), None),
            Err(e) => {
                warn!(location = %store.describe(), error = %e, "stored catalog unusable, reseeding");
                (AppState::seed(), Some(e.to_string()))
            }
        };
        let catalog = Self::with_state(store, state);
        let persisted = catalog.save();
        (catalog, LoadOutcome::Seeded { reason, persisted })
    }

    /// Wrap an existing state without touching the store
    pub fn with_state(store: S, state: AppState) -> Self {
        Self {
            state,
            store,
            wizard: DestinationWizard::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn wizard(&self) -> &DestinationWizard {
        &self.wizard
    }

    fn save(&self) -> Result<(), PersistenceError> {
        let result = self.store.save(&self.state);
        if let Err(e) = &result {
            warn!(location = %self.store.describe(), error = %e, "save failed, keeping in-memory state");
        }
        result
    }

    fn saved<T>(&self, value: T) -> Applied<T> {
        Applied {
            value,
            persisted: self.save(),
        }
    }

    // Dimension lists

    /// Add a value to a dimension list. Returns whether it was inserted; an
    /// existing value is a no-op and nothing is saved.
    pub fn add_dimension_value(
        &mut self,
        kind: DimensionKind,
        value: &str,
    ) -> Result<Applied<bool>, CatalogError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::EmptyValue(kind).into());
        }
        let inserted = dimension::add_unique_sorted(self.state.dimension_mut(kind), value);
        debug!(kind = %kind, value, inserted, "dimension value added");
        if inserted {
            Ok(self.saved(true))
        } else {
            Ok(Applied::unsaved(false))
        }
    }

    /// Delete a dimension value and everything that references it
    pub fn delete_dimension_value(
        &mut self,
        kind: DimensionKind,
        value: &str,
    ) -> Result<Applied<CascadeReport>, CatalogError> {
        let target = CascadeTarget::from_dimension(kind)
            .ok_or(ValidationError::NotDeletable(kind))?;
        self.cascade(CascadeRequest::new(target, value))
    }

    /// Delete a precise destination, optionally only under one global
    /// destination
    pub fn delete_precise_destination(
        &mut self,
        value: &str,
        scope: Option<&str>,
    ) -> Result<Applied<CascadeReport>, CatalogError> {
        let mut request = CascadeRequest::new(CascadeTarget::PreciseDestination, value);
        if let Some(scope) = scope {
            request = request.scoped(scope);
        }
        self.cascade(request)
    }

    /// Apply a confirmed cascade
    pub fn cascade(&mut self, request: CascadeRequest) -> Result<Applied<CascadeReport>, CatalogError> {
        let (next, report) = integrity::cascade_delete(&self.state, &request)?;
        self.state = next;
        Ok(self.saved(report))
    }

    // Projects

    pub fn upsert_project(&mut self, draft: ProjectDraft) -> Result<Applied<Upserted>, CatalogError> {
        let outcome = projects::upsert(&mut self.state, draft)?;
        Ok(self.saved(outcome))
    }

    /// Delete one project. Returns whether it existed.
    pub fn remove_project(&mut self, id: &RecordId) -> Applied<bool> {
        if projects::remove(&mut self.state.projects, id) {
            debug!(id = %id, "project removed");
            self.saved(true)
        } else {
            Applied::unsaved(false)
        }
    }

    pub fn project(&self, id: &RecordId) -> Option<&Project> {
        self.state.project(id)
    }

    pub fn visible_projects(&self, criteria: &FilterCriteria) -> Vec<&Project> {
        filter::compute_visible(&self.state.projects, criteria)
    }

    /// References in a draft that do not currently exist
    pub fn unresolved_references(&self, draft: &ProjectDraft) -> Vec<ProjectField> {
        integrity::unresolved_references(&self.state, draft)
    }

    // Destination links

    pub fn lookup_contact(
        &self,
        precise_destination: &str,
        global_destination: Option<&str>,
    ) -> Option<&DestinationLink> {
        links::lookup_contact(&self.state.destinations, precise_destination, global_destination)
    }

    pub fn distinct_precise_destinations(&self, global_destination: Option<&str>) -> Vec<String> {
        links::distinct_precise_destinations(&self.state.destinations, global_destination)
    }

    pub fn has_link(&self, global_destination: &str, precise_destination: &str) -> bool {
        links::contains_pair(&self.state.destinations, global_destination, precise_destination)
    }

    pub fn wizard_start(&mut self, precise_destination: &str) -> Result<Transition, CatalogError> {
        Ok(self.wizard.start(precise_destination)?)
    }

    /// Answer the current wizard question. The final answer appends the link
    /// and saves.
    pub fn wizard_submit(&mut self, answer: &str) -> Result<Applied<Transition>, CatalogError> {
        let transition = self.wizard.submit(answer)?;
        match &transition {
            Transition::Committed(draft) => {
                let link = draft.clone().into_link();
                info!(
                    id = %link.id,
                    global = %link.global_destination,
                    precise = %link.precise_destination,
                    "destination link created"
                );
                links::add(&mut self.state.destinations, link);
                Ok(self.saved(transition))
            }
            _ => Ok(Applied::unsaved(transition)),
        }
    }

    pub fn wizard_cancel(&mut self) -> Result<Transition, CatalogError> {
        Ok(self.wizard.cancel()?)
    }

    pub fn wizard_step(&self) -> WizardStep {
        self.wizard.step()
    }

    // Whole document

    pub fn export_document(&self) -> Result<String, PersistenceError> {
        document::encode(&self.state)
    }

    /// Replace the whole state with an imported document. A document that
    /// fails to decode leaves the state untouched.
    pub fn import_document(&mut self, content: &str) -> Result<Applied<()>, CatalogError> {
        let state = document::decode(content)?;
        info!(
            projects = state.projects.len(),
            destinations = state.destinations.len(),
            "catalog imported"
        );
        self.state = state;
        self.wizard = DestinationWizard::new();
        Ok(self.saved(()))
    }

    /// Replace the whole state with the seed dataset
    pub fn reset_to_seed(&mut self) -> Applied<()> {
        info!("catalog reset to seed");
        self.state = AppState::seed();
        self.wizard = DestinationWizard::new();
        self.saved(())
    }
}
