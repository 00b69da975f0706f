//! Schema system: document validation, export templates and the interactive wizard

pub mod registry;
pub mod template;
pub mod validator;
pub mod wizard;

pub use registry::SchemaRegistry;
pub use template::{TemplateError, TemplateGenerator};
pub use validator::{DocumentError, Validator};
pub use wizard::{LinkWizard, WizardAnswers, WizardOutcome};
