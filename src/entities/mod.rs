//! Entity type definitions
//!
//! - [`Project`] - a catalogued project classified along the dimensions
//! - [`DestinationLink`] - a precise destination, its global destination and
//!   an optional contact

pub mod destination;
pub mod project;

pub use destination::DestinationLink;
pub use project::{Project, ProjectDraft, ProjectField};
