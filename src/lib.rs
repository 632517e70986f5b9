//! `citibike-loader` reads a Citi Bike trip export (CSV), turns each row into an index document
//! and pushes the documents to a Solr collection in fixed-size batches, optionally declaring the
//! collection's fields first.
//!
//! ## Pipeline
//!
//! ```text
//! input lines -> ingestion::transform -> indexing::BatchIndexer -> UpdateSink -> Solr
//! ```
//!
//! - Header (`"tripduration",...`), `#` comment and blank lines are skipped.
//! - Each data line must have exactly 15 comma-separated fields; quote characters are removed.
//! - Timestamps `YYYY-MM-DD HH:MM:SS` are re-emitted as `YYYY-MM-DDTHH:MM:SSZ`.
//! - The document id is `{start}_{stop}_{start station}{end station}` with timestamps written
//!   as `YYYY_MM_DD_HH_MM_SS`. Trips sharing all four values overwrite each other.
//! - A birth year of `\N` becomes `-1`.
//!
//! ## Quick example: transform one line
//!
//! ```rust
//! use citibike_loader::ingestion::transform_line;
//!
//! let line = r#""634","2013-07-01 00:00:00","2013-07-01 00:10:34","1","Station A","40.0","-73.0","7","Station B","40.1","-73.1","123","Subscriber","1990","1""#;
//! let doc = transform_line(2, line).unwrap().unwrap();
//! assert_eq!(doc.id, "2013_07_01_00_00_00_2013_07_01_00_10_34_17");
//! assert_eq!(doc.starttime, "2013-07-01T00:00:00Z");
//! assert_eq!(doc.start_location, "40.0,-73.0");
//! ```
//!
//! ## Loading a file
//!
//! ```no_run
//! use citibike_loader::http::HttpClient;
//! use citibike_loader::indexing::{BatchIndexer, SolrUpdateSink};
//! use citibike_loader::schema::{trip_fields, SchemaProvisioner};
//! use citibike_loader::LoaderConfig;
//!
//! # fn main() -> Result<(), citibike_loader::LoaderError> {
//! let cfg = LoaderConfig::default();
//! let client = HttpClient::new(cfg.timeout)?;
//!
//! SchemaProvisioner::new(client.clone(), cfg.fields_url()).provision(&trip_fields())?;
//!
//! let sink = SolrUpdateSink::new(client, cfg.solr_url());
//! let stats = BatchIndexer::new(sink, cfg.batch_size)?
//!     .ingest_path("201307-citibike-tripdata.csv")?;
//! println!("docs={} requests={}", stats.documents, stats.requests);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: input reading and the row transformer
//! - [`indexing`]: batching, update encoding and sinks
//! - [`schema`]: field provisioning
//! - [`http`]: blocking HTTP client
//! - [`config`], [`options`]: loader configuration and `key=value` option lists
//! - [`types`], [`error`]: data model and error type

pub mod config;
pub mod error;
pub mod http;
pub mod indexing;
pub mod ingestion;
pub mod options;
pub mod schema;
pub mod types;

pub use config::LoaderConfig;
pub use error::{LoaderError, LoaderResult};
