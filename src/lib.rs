//! pcat: a project catalog with relational integrity
//!
//! Projects are classified by type, name, global destination, precise
//! destination and due date. Precise destinations are bound to a global
//! destination and a contact through destination links. Deleting a
//! classification value cascades to the projects and links that use it.
//!
//! - [`core`]: state, cascades, filtering, the link wizard and persistence
//! - [`entities`]: the stored record types
//! - [`schema`]: document validation, embedded schema and export templates
//! - [`cli`]: the `pcat` command line

pub mod cli;
pub mod core;
pub mod entities;
pub mod schema;
