//! Destinations for update requests.

use std::io::Write;

use log::debug;

use crate::error::LoaderResult;
use crate::http::HttpClient;
use crate::types::IndexDocument;

use super::update::{UpdateParams, build_add_message, update_path};

/// Receives one update request per flushed batch.
pub trait UpdateSink {
    /// Build and send an update for `docs`. An empty slice is still sent.
    fn send_update(&mut self, docs: &[IndexDocument], params: &UpdateParams) -> LoaderResult<()>;
}

impl<S: UpdateSink + ?Sized> UpdateSink for &mut S {
    fn send_update(&mut self, docs: &[IndexDocument], params: &UpdateParams) -> LoaderResult<()> {
        (**self).send_update(docs, params)
    }
}

/// Posts XML `<add>` messages to `{solr_url}/update/`.
#[derive(Debug, Clone)]
pub struct SolrUpdateSink {
    client: HttpClient,
    solr_url: String,
}

impl SolrUpdateSink {
    /// `solr_url` is the collection root, e.g. `http://localhost:8888/solr/citibike`.
    pub fn new(client: HttpClient, solr_url: impl Into<String>) -> Self {
        Self {
            client,
            solr_url: solr_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn update_url(&self, params: &UpdateParams) -> String {
        format!("{}/{}", self.solr_url, update_path(params))
    }
}

impl UpdateSink for SolrUpdateSink {
    fn send_update(&mut self, docs: &[IndexDocument], params: &UpdateParams) -> LoaderResult<()> {
        let url = self.update_url(params);
        let message = build_add_message(docs);
        let ack = self.client.post_markup(&url, &message)?;
        debug!("update of {} docs acknowledged: {}", docs.len(), ack.trim());
        Ok(())
    }
}

/// Writes documents as newline-delimited JSON instead of sending them.
#[derive(Debug)]
pub struct NdjsonSink<W: Write> {
    out: W,
    requests: usize,
}

impl<W: Write> NdjsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, requests: 0 }
    }

    /// Number of updates received so far.
    pub fn requests(&self) -> usize {
        self.requests
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> UpdateSink for NdjsonSink<W> {
    fn send_update(&mut self, docs: &[IndexDocument], _params: &UpdateParams) -> LoaderResult<()> {
        for doc in docs {
            serde_json::to_writer(&mut self.out, doc)?;
            self.out.write_all(b"\n")?;
        }
        self.out.flush()?;
        self.requests += 1;
        Ok(())
    }
}
