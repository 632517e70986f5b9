//! Row transformation: one trip export line to one [`IndexDocument`].

use chrono::NaiveDateTime;

use crate::error::{LoaderError, LoaderResult};
use crate::types::{IndexDocument, TripRecord};

/// Prefix of the export's header line.
pub const HEADER_PREFIX: &str = "\"tripduration";

/// Birth-year value the export uses for "unknown".
pub const NULL_MARKER: &str = "\\N";

/// Birth year written in place of [`NULL_MARKER`].
pub const NULL_BIRTH_YEAR: &str = "-1";

const SOURCE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const INDEX_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const ID_TIME_FORMAT: &str = "%Y_%m_%d_%H_%M_%S";

/// Transform one raw input line.
///
/// Returns `Ok(None)` for the header line, `#` comments and blank lines. `line_no` is only used
/// in error messages.
pub fn transform_line(line_no: u64, line: &str) -> LoaderResult<Option<IndexDocument>> {
    let line = line.trim();
    if line.is_empty() || is_header_or_comment(line) {
        return Ok(None);
    }
    let record = TripRecord::from_fields(line_no, line.split(','))?;
    to_document(line_no, &record).map(Some)
}

/// Transform one record read by the csv reader (quoting disabled, so quotes are still present).
pub fn transform_record(record: &csv::StringRecord) -> LoaderResult<Option<IndexDocument>> {
    let line_no = record.position().map(|p| p.line()).unwrap_or(0);
    let first = record.get(0).unwrap_or("");
    if record.len() <= 1 && first.trim().is_empty() {
        return Ok(None);
    }
    if is_header_or_comment(first) {
        return Ok(None);
    }
    let record_fields = TripRecord::from_fields(line_no, record.iter())?;
    to_document(line_no, &record_fields).map(Some)
}

fn is_header_or_comment(line: &str) -> bool {
    line.starts_with(HEADER_PREFIX) || line.starts_with('#')
}

/// Build the document for a parsed record.
pub fn to_document(line_no: u64, rec: &TripRecord) -> LoaderResult<IndexDocument> {
    let start = parse_time(line_no, "starttime", &rec.start_time)?;
    let stop = parse_time(line_no, "stoptime", &rec.stop_time)?;

    Ok(IndexDocument {
        id: document_id(&start, &stop, &rec.start_station_id, &rec.end_station_id),
        tripduration: rec.duration.clone(),
        starttime: start.format(INDEX_TIME_FORMAT).to_string(),
        stoptime: stop.format(INDEX_TIME_FORMAT).to_string(),
        start_station_id: rec.start_station_id.clone(),
        start_station_name: rec.start_station_name.clone(),
        start_location: format!("{},{}", rec.start_lat, rec.start_lon),
        end_station_id: rec.end_station_id.clone(),
        end_station_name: rec.end_station_name.clone(),
        end_location: format!("{},{}", rec.end_lat, rec.end_lon),
        bikeid: rec.bike_id.clone(),
        user_type: rec.user_type.clone(),
        birth_year: normalize_birth_year(&rec.birth_year),
        gender: rec.gender.clone(),
    })
}

/// `{start}_{stop}_{start station}{end station}`, timestamps as `YYYY_MM_DD_HH_MM_SS`.
///
/// Trips sharing start, stop and both stations get the same id.
pub fn document_id(
    start: &NaiveDateTime,
    stop: &NaiveDateTime,
    start_station_id: &str,
    end_station_id: &str,
) -> String {
    format!(
        "{}_{}_{}{}",
        start.format(ID_TIME_FORMAT),
        stop.format(ID_TIME_FORMAT),
        start_station_id,
        end_station_id
    )
}

fn normalize_birth_year(raw: &str) -> String {
    if raw == NULL_MARKER {
        NULL_BIRTH_YEAR.to_string()
    } else {
        raw.to_string()
    }
}

// Export timestamps carry no zone; they are re-emitted with a `Z` suffix as-is.
fn parse_time(line_no: u64, column: &str, raw: &str) -> LoaderResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), SOURCE_TIME_FORMAT).map_err(|e| {
        LoaderError::ParseError {
            line: line_no,
            column: column.to_owned(),
            raw: raw.to_owned(),
            message: e.to_string(),
        }
    })
}
