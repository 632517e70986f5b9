//! CSV input reading.
//!
//! The export is read with quoting disabled: every `,` separates two fields and quote
//! characters are removed by the row transformer. Lines starting with `#` are dropped by the
//! reader; the header line is recognised and skipped by the transformer.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::LoaderResult;
use crate::types::IndexDocument;

use super::transform::transform_record;

/// Build the reader configuration used for trip exports.
pub fn trip_reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'));
    builder
}

/// Open a trip export for reading.
pub fn open_trip_reader(path: impl AsRef<Path>) -> LoaderResult<csv::Reader<File>> {
    Ok(trip_reader_builder().from_path(path)?)
}

/// Iterate the documents of a trip export, skipping header and comment lines.
///
/// The iterator yields an error for the first malformed line; callers are expected to stop
/// there.
pub fn documents<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = LoaderResult<IndexDocument>> + '_ {
    rdr.records().filter_map(|result| match result {
        Ok(record) => transform_record(&record).transpose(),
        Err(e) => Some(Err(e.into())),
    })
}

/// Read a whole trip export into memory.
pub fn read_documents_from_path(path: impl AsRef<Path>) -> LoaderResult<Vec<IndexDocument>> {
    let mut rdr = open_trip_reader(path)?;
    documents(&mut rdr).collect()
}
