//! Embedded JSON Schemas

use rust_embed::Embed;

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

/// Name of the schema describing the persisted catalog document
pub const CATALOG_SCHEMA: &str = "catalog.schema.json";

/// Lookup of the schemas compiled into the binary
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaRegistry;

impl SchemaRegistry {
    /// Raw schema text by file name
    pub fn get(&self, name: &str) -> Option<String> {
        let file = EmbeddedSchemas::get(name)?;
        String::from_utf8(file.data.into_owned()).ok()
    }

    /// The catalog document schema
    pub fn catalog(&self) -> Option<String> {
        self.get(CATALOG_SCHEMA)
    }

    /// Names of every embedded schema
    pub fn names(&self) -> Vec<String> {
        EmbeddedSchemas::iter().map(|name| name.into_owned()).collect()
    }
}
