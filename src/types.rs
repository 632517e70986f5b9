//! Core data model types.
//!
//! A raw input line becomes a [`TripRecord`] (15 positional text fields), which the row
//! transformer turns into an [`IndexDocument`]. The index schema is described by a list of
//! [`FieldDefinition`]s.

use serde::{Deserialize, Serialize};

use crate::error::{LoaderError, LoaderResult};
use crate::options::OptionMap;

/// Number of positional fields in one trip export line.
pub const TRIP_FIELD_COUNT: usize = 15;

/// Logical type of an index field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Integer.
    Int,
    /// ISO-8601 UTC timestamp.
    Date,
    /// Untokenized string.
    String,
    /// `"lat,lon"` point.
    Location,
}

impl FieldType {
    /// Parse a field type from its wire name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "int" => Some(Self::Int),
            "date" => Some(Self::Date),
            "string" => Some(Self::String),
            "location" => Some(Self::Location),
            _ => None,
        }
    }
}

/// A single named, typed field declared against the target collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name.
    pub name: String,
    /// Field type.
    pub field_type: FieldType,
    pub indexed: bool,
    pub stored: bool,
    pub facet: bool,
    pub include_in_results: bool,
}

impl FieldDefinition {
    /// Create a field with every flag enabled.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            indexed: true,
            stored: true,
            facet: true,
            include_in_results: true,
        }
    }

    /// Build a field from `key=value` options.
    ///
    /// `name` and `field_type` are required; the flags `indexed`, `stored`, `facet` and
    /// `include_in_results` default to `true`. Each key may appear at most once.
    pub fn from_options(opts: &OptionMap) -> LoaderResult<Self> {
        let name = opts.required("name")?.to_owned();
        let raw_type = opts.required("field_type")?;
        let field_type = FieldType::from_name(raw_type).ok_or_else(|| LoaderError::InvalidOption {
            message: format!("unknown field_type '{raw_type}' for field '{name}'"),
        })?;

        Ok(Self {
            indexed: opts.flag("indexed", true)?,
            stored: opts.flag("stored", true)?,
            facet: opts.flag("facet", true)?,
            include_in_results: opts.flag("include_in_results", true)?,
            name,
            field_type,
        })
    }
}

/// One raw trip export row, quote characters already removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRecord {
    pub duration: String,
    pub start_time: String,
    pub stop_time: String,
    pub start_station_id: String,
    pub start_station_name: String,
    pub start_lat: String,
    pub start_lon: String,
    pub end_station_id: String,
    pub end_station_name: String,
    pub end_lat: String,
    pub end_lon: String,
    pub bike_id: String,
    pub user_type: String,
    pub birth_year: String,
    pub gender: String,
}

impl TripRecord {
    /// Build a record from raw positional fields, stripping quote characters from each.
    ///
    /// Fails with [`LoaderError::MalformedRow`] unless exactly [`TRIP_FIELD_COUNT`] fields are
    /// given.
    pub fn from_fields<'a, I>(line: u64, fields: I) -> LoaderResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let vals: Vec<String> = fields.into_iter().map(|f| f.replace('"', "")).collect();
        let vals: [String; TRIP_FIELD_COUNT] =
            vals.try_into().map_err(|v: Vec<String>| LoaderError::MalformedRow {
                line,
                expected: TRIP_FIELD_COUNT,
                found: v.len(),
            })?;
        let [
            duration,
            start_time,
            stop_time,
            start_station_id,
            start_station_name,
            start_lat,
            start_lon,
            end_station_id,
            end_station_name,
            end_lat,
            end_lon,
            bike_id,
            user_type,
            birth_year,
            gender,
        ] = vals;

        Ok(Self {
            duration,
            start_time,
            stop_time,
            start_station_id,
            start_station_name,
            start_lat,
            start_lon,
            end_station_id,
            end_station_name,
            end_lat,
            end_lon,
            bike_id,
            user_type,
            birth_year,
            gender,
        })
    }
}

/// A document ready to be sent to the index.
///
/// Numeric fields are carried as the text found in the input; the index parses them according
/// to the declared [`FieldType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDocument {
    pub id: String,
    pub tripduration: String,
    pub starttime: String,
    pub stoptime: String,
    pub start_station_id: String,
    pub start_station_name: String,
    pub start_location: String,
    pub end_station_id: String,
    pub end_station_name: String,
    pub end_location: String,
    pub bikeid: String,
    pub user_type: String,
    pub birth_year: String,
    pub gender: String,
}

impl IndexDocument {
    /// Field names in encoding order.
    pub const FIELD_NAMES: [&'static str; 14] = [
        "id",
        "tripduration",
        "starttime",
        "stoptime",
        "start_station_id",
        "start_station_name",
        "start_location",
        "end_station_id",
        "end_station_name",
        "end_location",
        "bikeid",
        "user_type",
        "birth_year",
        "gender",
    ];

    /// `(name, value)` pairs in encoding order.
    pub fn fields(&self) -> [(&'static str, &str); 14] {
        [
            ("id", self.id.as_str()),
            ("tripduration", self.tripduration.as_str()),
            ("starttime", self.starttime.as_str()),
            ("stoptime", self.stoptime.as_str()),
            ("start_station_id", self.start_station_id.as_str()),
            ("start_station_name", self.start_station_name.as_str()),
            ("start_location", self.start_location.as_str()),
            ("end_station_id", self.end_station_id.as_str()),
            ("end_station_name", self.end_station_name.as_str()),
            ("end_location", self.end_location.as_str()),
            ("bikeid", self.bikeid.as_str()),
            ("user_type", self.user_type.as_str()),
            ("birth_year", self.birth_year.as_str()),
            ("gender", self.gender.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_round_trips_through_wire_name() {
        assert_eq!(FieldType::from_name("Location"), Some(FieldType::Location));
        assert_eq!(FieldType::from_name("float"), None);
        assert_eq!(serde_json::to_string(&FieldType::Date).unwrap(), "\"date\"");
    }

    #[test]
    fn field_definition_serializes_lucidworks_body() {
        let field = FieldDefinition::new("bikeid", FieldType::Int);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "bikeid",
                "field_type": "int",
                "indexed": true,
                "stored": true,
                "facet": true,
                "include_in_results": true,
            })
        );
    }

    #[test]
    fn trip_record_rejects_wrong_field_count() {
        let err = TripRecord::from_fields(7, ["\"1\"", "\"2\""]).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::MalformedRow {
                line: 7,
                expected: 15,
                found: 2
            }
        ));
    }

    #[test]
    fn document_fields_follow_declared_order() {
        let doc = IndexDocument {
            id: "a".into(),
            tripduration: "1".into(),
            starttime: "s".into(),
            stoptime: "t".into(),
            start_station_id: "2".into(),
            start_station_name: "n1".into(),
            start_location: "0,0".into(),
            end_station_id: "3".into(),
            end_station_name: "n2".into(),
            end_location: "1,1".into(),
            bikeid: "4".into(),
            user_type: "Customer".into(),
            birth_year: "-1".into(),
            gender: "0".into(),
        };
        let names: Vec<&str> = doc.fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(names, IndexDocument::FIELD_NAMES);
        assert_eq!(doc.fields()[12], ("birth_year", "-1"));
    }
}
