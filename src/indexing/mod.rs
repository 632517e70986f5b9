//! Batched delivery of documents to the index.
//!
//! The [`BatchIndexer`] buffers transformed documents and hands them to an [`UpdateSink`] in
//! batches of `batch_size`:
//!
//! - every time the running document count reaches a multiple of `batch_size`, the buffer is
//!   sent with `commit=false` and the id of its last document as correlation token
//! - once the input is exhausted the remainder is sent, even when it is empty
//!
//! Batches leave in input order and the first failing request aborts the run; batches that
//! were already accepted stay in the index.
//!
//! ```no_run
//! use citibike_loader::http::HttpClient;
//! use citibike_loader::indexing::{BatchIndexer, SolrUpdateSink};
//! use citibike_loader::LoaderConfig;
//!
//! # fn main() -> Result<(), citibike_loader::LoaderError> {
//! let cfg = LoaderConfig::default();
//! let sink = SolrUpdateSink::new(HttpClient::new(cfg.timeout)?, cfg.solr_url());
//! let stats = BatchIndexer::new(sink, cfg.batch_size)?.ingest_path("trips.csv")?;
//! println!("sent {} docs", stats.documents);
//! # Ok(())
//! # }
//! ```

mod observer;
pub mod sink;
pub mod update;

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{LoaderError, LoaderResult};
use crate::ingestion::csv::{open_trip_reader, trip_reader_builder};
use crate::ingestion::{transform_line, transform_record};
use crate::types::IndexDocument;

pub use observer::{
    CompositeObserver, IndexEvent, IndexMetrics, IndexMetricsSnapshot, IndexObserver, LogObserver,
};
pub use sink::{NdjsonSink, SolrUpdateSink, UpdateSink};
pub use update::{UpdateParams, build_add_message, update_path};

/// Summary of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexStats {
    /// Documents handed to the sink.
    pub documents: usize,
    /// Update requests issued, including the final one.
    pub requests: usize,
    /// Lines the transformer skipped. Line input counts header, comment and blank lines; the
    /// csv reader drops comment and empty lines itself, so reader input counts only headers.
    pub skipped: usize,
}

/// Accumulates documents and flushes them to an [`UpdateSink`] in fixed-size batches.
pub struct BatchIndexer<S: UpdateSink> {
    sink: S,
    batch_size: usize,
    commit_on_finish: bool,
    observer: Option<Arc<dyn IndexObserver>>,
    buffer: Vec<IndexDocument>,
    rows: usize,
    requests: usize,
    skipped: usize,
    started_at: Option<Instant>,
}

impl<S: UpdateSink> fmt::Debug for BatchIndexer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchIndexer")
            .field("batch_size", &self.batch_size)
            .field("commit_on_finish", &self.commit_on_finish)
            .field("observer_set", &self.observer.is_some())
            .field("buffered", &self.buffer.len())
            .field("rows", &self.rows)
            .field("requests", &self.requests)
            .finish()
    }
}

impl<S: UpdateSink> BatchIndexer<S> {
    /// Create an indexer. `batch_size` must be > 0.
    pub fn new(sink: S, batch_size: usize) -> LoaderResult<Self> {
        if batch_size == 0 {
            return Err(LoaderError::InvalidConfig {
                message: "batch_size must be > 0".to_string(),
            });
        }
        Ok(Self {
            sink,
            batch_size,
            commit_on_finish: false,
            observer: None,
            buffer: Vec::with_capacity(batch_size.min(16_384)),
            rows: 0,
            requests: 0,
            skipped: 0,
            started_at: None,
        })
    }

    /// Attach an observer for progress events.
    pub fn with_observer(mut self, observer: Arc<dyn IndexObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Send the final update with `commit=true`. Threshold flushes never commit.
    pub fn with_commit_on_finish(mut self, commit: bool) -> Self {
        self.commit_on_finish = commit;
        self
    }

    /// Documents currently held in the buffer.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Add a document, flushing when the running count reaches a multiple of the batch size.
    pub fn push(&mut self, doc: IndexDocument) -> LoaderResult<()> {
        self.begin();
        self.rows += 1;
        let at_threshold = self.rows % self.batch_size == 0;
        let correlation_id = at_threshold.then(|| doc.id.clone());
        self.buffer.push(doc);

        if let Some(id) = correlation_id {
            self.flush(&UpdateParams::batch(id), false)
                .inspect_err(|e| self.fail(e))?;
        }
        Ok(())
    }

    /// Send whatever is buffered (possibly nothing) and end the run.
    pub fn finish(mut self) -> LoaderResult<IndexStats> {
        self.begin();
        let params = UpdateParams::last(self.commit_on_finish);
        if let Err(e) = self.flush(&params, true) {
            self.fail(&e);
            return Err(e);
        }

        let stats = IndexStats {
            documents: self.rows,
            requests: self.requests,
            skipped: self.skipped,
        };
        let elapsed = self.started_at.map(|t| t.elapsed()).unwrap_or_default();
        self.emit(IndexEvent::RunFinished {
            elapsed,
            documents: stats.documents,
            requests: stats.requests,
        });
        Ok(stats)
    }

    /// Transform and index raw lines. Line numbers in errors start at 1.
    pub fn ingest_lines<I, L>(mut self, lines: I) -> LoaderResult<IndexStats>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        self.begin();
        for (idx, line) in lines.into_iter().enumerate() {
            let line_no = idx as u64 + 1;
            match transform_line(line_no, line.as_ref()).inspect_err(|e| self.fail(e))? {
                Some(doc) => self.push(doc)?,
                None => self.skipped += 1,
            }
        }
        self.finish()
    }

    /// Index every record of a csv reader built with
    /// [`crate::ingestion::csv::trip_reader_builder`].
    pub fn ingest_reader<R: Read>(mut self, rdr: &mut csv::Reader<R>) -> LoaderResult<IndexStats> {
        self.begin();
        for result in rdr.records() {
            let record = result.map_err(LoaderError::from).inspect_err(|e| self.fail(e))?;
            match transform_record(&record).inspect_err(|e| self.fail(e))? {
                Some(doc) => self.push(doc)?,
                None => self.skipped += 1,
            }
        }
        self.finish()
    }

    /// Index a trip export file.
    pub fn ingest_path(self, path: impl AsRef<Path>) -> LoaderResult<IndexStats> {
        let mut rdr = open_trip_reader(path)?;
        self.ingest_reader(&mut rdr)
    }

    /// Index trip export text held in memory.
    pub fn ingest_bytes(self, input: &[u8]) -> LoaderResult<IndexStats> {
        let mut rdr = trip_reader_builder().from_reader(input);
        self.ingest_reader(&mut rdr)
    }

    fn flush(&mut self, params: &UpdateParams, last: bool) -> LoaderResult<()> {
        let documents = self.buffer.len();
        self.emit(IndexEvent::BatchFlushing {
            rows: self.rows,
            documents,
            last,
        });
        self.sink.send_update(&self.buffer, params)?;
        self.buffer.clear();
        self.requests += 1;
        self.emit(IndexEvent::BatchFlushed {
            rows: self.rows,
            documents,
            last,
        });
        Ok(())
    }

    fn begin(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
            self.emit(IndexEvent::RunStarted {
                batch_size: self.batch_size,
            });
        }
    }

    fn fail(&self, e: &LoaderError) {
        self.emit(IndexEvent::RunFailed {
            rows: self.rows,
            error: e.to_string(),
        });
    }

    fn emit(&self, event: IndexEvent) {
        if let Some(obs) = self.observer.as_ref() {
            obs.on_event(&event);
        }
    }
}
