//! Field provisioning for the target collection.
//!
//! Each [`FieldDefinition`] is declared with one `POST {base}/api/collections/{c}/fields`.
//! The service is expected to treat existing fields tolerantly; the loader does not check
//! first. The first failure aborts provisioning and earlier fields are left in place.

use log::info;
use reqwest::Method;

use crate::error::LoaderResult;
use crate::http::HttpClient;
use crate::types::{FieldDefinition, FieldType};

/// Field definitions for every document field except `id`.
pub fn trip_fields() -> Vec<FieldDefinition> {
    [
        ("tripduration", FieldType::Int),
        ("starttime", FieldType::Date),
        ("stoptime", FieldType::Date),
        ("start_station_id", FieldType::Int),
        ("start_station_name", FieldType::String),
        ("start_location", FieldType::Location),
        ("end_station_id", FieldType::Int),
        ("end_station_name", FieldType::String),
        ("end_location", FieldType::Location),
        ("bikeid", FieldType::Int),
        ("user_type", FieldType::String),
        ("birth_year", FieldType::Int),
        ("gender", FieldType::Int),
    ]
    .into_iter()
    .map(|(name, ty)| FieldDefinition::new(name, ty))
    .collect()
}

/// Declares fields against one collection.
#[derive(Debug, Clone)]
pub struct SchemaProvisioner {
    client: HttpClient,
    fields_url: String,
}

impl SchemaProvisioner {
    /// `fields_url` is the collection's field endpoint, see
    /// [`crate::LoaderConfig::fields_url`].
    pub fn new(client: HttpClient, fields_url: impl Into<String>) -> Self {
        Self {
            client,
            fields_url: fields_url.into(),
        }
    }

    pub fn fields_url(&self) -> &str {
        &self.fields_url
    }

    /// Create each field in order. Returns the number of fields created.
    pub fn provision(&self, fields: &[FieldDefinition]) -> LoaderResult<usize> {
        for (i, field) in fields.iter().enumerate() {
            info!(
                "creating field {}/{}: {} ({:?})",
                i + 1,
                fields.len(),
                field.name,
                field.field_type
            );
            self.client.json_request(Method::POST, &self.fields_url, Some(field))?;
        }
        Ok(fields.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IndexDocument;

    #[test]
    fn trip_fields_cover_every_document_field_but_id() {
        let names: Vec<String> = trip_fields().into_iter().map(|f| f.name).collect();
        assert_eq!(names.len(), 13);
        assert_eq!(names, IndexDocument::FIELD_NAMES[1..]);
    }

    #[test]
    fn locations_are_typed_as_location() {
        let fields = trip_fields();
        let loc: Vec<&str> = fields
            .iter()
            .filter(|f| f.field_type == FieldType::Location)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(loc, vec!["start_location", "end_location"]);
        assert!(fields.iter().all(|f| f.indexed && f.stored && f.facet && f.include_in_results));
    }
}
