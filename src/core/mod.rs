//! Core engine: state, integrity rules, filtering, wizard and persistence

pub mod catalog;
pub mod config;
pub mod dimension;
pub mod document;
pub mod error;
pub mod filter;
pub mod identity;
pub mod integrity;
pub mod links;
pub mod month;
pub mod projects;
pub mod state;
pub mod store;
pub mod wizard;

pub use catalog::{Applied, Catalog, LoadOutcome};
pub use config::Config;
pub use dimension::DimensionKind;
pub use error::{CatalogError, PersistenceError, ValidationError};
pub use filter::FilterCriteria;
pub use identity::{IdParseError, RecordId, RecordPrefix};
pub use integrity::{CascadeReport, CascadeRequest, CascadeTarget};
pub use projects::Upserted;
pub use state::AppState;
pub use store::{JsonFileStore, MemoryStore, Store};
pub use wizard::{DestinationWizard, LinkDraft, Transition, WizardError, WizardStep};
