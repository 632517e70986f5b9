use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::{error, info};

/// Events emitted by the [`super::BatchIndexer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexEvent {
    RunStarted { batch_size: usize },
    /// A batch is about to be sent. `rows` counts every document seen so far.
    BatchFlushing { rows: usize, documents: usize, last: bool },
    BatchFlushed { rows: usize, documents: usize, last: bool },
    RunFinished { elapsed: Duration, documents: usize, requests: usize },
    RunFailed { rows: usize, error: String },
}

/// Observer hook for indexing events.
pub trait IndexObserver: Send + Sync {
    fn on_event(&self, event: &IndexEvent);
}

/// Reports progress through the `log` facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl IndexObserver for LogObserver {
    fn on_event(&self, event: &IndexEvent) {
        match event {
            IndexEvent::BatchFlushing {
                rows, last: false, ..
            } => info!("Indexing row: {rows}"),
            IndexEvent::BatchFlushing {
                documents,
                last: true,
                ..
            } => info!("Indexing final batch of {documents} docs"),
            IndexEvent::RunFinished {
                elapsed,
                documents,
                requests,
            } => info!(
                "indexed {documents} docs in {requests} requests ({:.2}s)",
                elapsed.as_secs_f64()
            ),
            IndexEvent::RunFailed { rows, error: err } => {
                error!("indexing failed after {rows} rows: {err}")
            }
            _ => {}
        }
    }
}

/// Fans out events to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IndexObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn IndexObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl IndexObserver for CompositeObserver {
    fn on_event(&self, event: &IndexEvent) {
        for o in &self.observers {
            o.on_event(event);
        }
    }
}

/// Counters updated from indexing events; callers can snapshot them at any time.
#[derive(Debug, Default)]
pub struct IndexMetrics {
    rows: AtomicU64,
    requests_sent: AtomicU64,
    documents_sent: AtomicU64,
    failures: AtomicU64,
    elapsed_ns: AtomicU64,
}

/// Point-in-time copy of [`IndexMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexMetricsSnapshot {
    pub rows: u64,
    pub requests_sent: u64,
    pub documents_sent: u64,
    pub failures: u64,
    pub elapsed: Duration,
}

impl IndexMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> IndexMetricsSnapshot {
        IndexMetricsSnapshot {
            rows: self.rows.load(Ordering::SeqCst),
            requests_sent: self.requests_sent.load(Ordering::SeqCst),
            documents_sent: self.documents_sent.load(Ordering::SeqCst),
            failures: self.failures.load(Ordering::SeqCst),
            elapsed: Duration::from_nanos(self.elapsed_ns.load(Ordering::SeqCst)),
        }
    }
}

impl IndexObserver for IndexMetrics {
    fn on_event(&self, event: &IndexEvent) {
        match event {
            IndexEvent::RunStarted { .. } => {
                self.rows.store(0, Ordering::SeqCst);
                self.requests_sent.store(0, Ordering::SeqCst);
                self.documents_sent.store(0, Ordering::SeqCst);
                self.failures.store(0, Ordering::SeqCst);
                self.elapsed_ns.store(0, Ordering::SeqCst);
            }
            IndexEvent::BatchFlushed {
                rows, documents, ..
            } => {
                self.rows.store(*rows as u64, Ordering::SeqCst);
                self.requests_sent.fetch_add(1, Ordering::SeqCst);
                self.documents_sent
                    .fetch_add(*documents as u64, Ordering::SeqCst);
            }
            IndexEvent::RunFinished { elapsed, .. } => {
                let ns = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
                self.elapsed_ns.store(ns, Ordering::SeqCst);
            }
            IndexEvent::RunFailed { rows, .. } => {
                self.rows.store(*rows as u64, Ordering::SeqCst);
                self.failures.fetch_add(1, Ordering::SeqCst);
            }
            IndexEvent::BatchFlushing { .. } => {}
        }
    }
}
