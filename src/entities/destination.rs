//! Destination link entity type

use serde::{Deserialize, Serialize};

use crate::core::identity::{RecordId, RecordPrefix};

/// Binds a precise destination to its global destination and an optional
/// contact (one row of `bddTb2_Destinations`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationLink {
    /// Unique identifier
    pub id: RecordId,

    #[serde(rename = "destinationGlobale", default)]
    pub global_destination: String,

    #[serde(rename = "destinationPrecise", default)]
    pub precise_destination: String,

    /// Contact name, empty when not given
    #[serde(rename = "nomContact", default)]
    pub contact_name: String,

    /// Email or phone, empty when not given
    #[serde(rename = "contactInfo", default)]
    pub contact_info: String,
}

impl DestinationLink {
    /// Create a link with a freshly generated id
    pub fn new(
        global_destination: impl Into<String>,
        precise_destination: impl Into<String>,
        contact_name: impl Into<String>,
        contact_info: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::new(RecordPrefix::Dst),
            global_destination: global_destination.into(),
            precise_destination: precise_destination.into(),
            contact_name: contact_name.into(),
            contact_info: contact_info.into(),
        }
    }

    pub fn has_contact(&self) -> bool {
        !self.contact_name.is_empty() || !self.contact_info.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_link_gets_dst_id() {
        let link = DestinationLink::new("Europe", "Lyon", "", "");
        assert_eq!(link.id.prefix(), Some(RecordPrefix::Dst));
        assert!(!link.has_contact());
    }

    #[test]
    fn test_link_document_field_names() {
        let link = DestinationLink::new("Asie", "Tokyo", "Yoko Tanaka", "yoko.tanaka@example.com");
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["destinationGlobale"], "Asie");
        assert_eq!(json["destinationPrecise"], "Tokyo");
        assert_eq!(json["nomContact"], "Yoko Tanaka");
        assert_eq!(json["contactInfo"], "yoko.tanaka@example.com");
        assert!(link.has_contact());
    }
}
