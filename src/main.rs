//! `citibike-loader` command-line entry point.
//!
//! ```bash
//! # Declare the collection fields, then load the export
//! citibike-loader -i 201307-citibike-tripdata.csv --api-host localhost --api-port 8888 -f
//!
//! # Print documents as NDJSON without talking to the index
//! citibike-loader -i 201307-citibike-tripdata.csv --dry-run
//! ```
//!
//! Logging is configured with `RUST_LOG` (default `info`).

use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::{error, info};

use citibike_loader::LoaderResult;
use citibike_loader::config::{DEFAULT_BATCH_SIZE, LoaderConfig};
use citibike_loader::http::HttpClient;
use citibike_loader::indexing::{
    BatchIndexer, CompositeObserver, IndexMetrics, IndexObserver, IndexStats, LogObserver,
    NdjsonSink, SolrUpdateSink, UpdateSink,
};
use citibike_loader::options::OptionMap;
use citibike_loader::schema::{SchemaProvisioner, trip_fields};
use citibike_loader::types::FieldDefinition;

/// Load a Citi Bike trip export into a Solr collection
#[derive(Parser, Debug)]
#[command(name = "citibike-loader")]
#[command(version, about)]
struct Args {
    /// Trip export (CSV) to load
    #[arg(short, long)]
    input: PathBuf,

    /// Host of the search service
    #[arg(long, alias = "api_host", env = "CITIBIKE_API_HOST", default_value = "localhost")]
    api_host: String,

    /// Port of the search service
    #[arg(long, alias = "api_port", env = "CITIBIKE_API_PORT", default_value_t = 8888)]
    api_port: u16,

    /// Collection to write to
    #[arg(short = 'l', long, env = "CITIBIKE_COLLECTION", default_value = "citibike")]
    collection: String,

    /// Declare the collection fields before loading
    #[arg(short, long)]
    fields: bool,

    /// Extra field to declare with --fields, e.g. `name=station_tag,field_type=string,facet=false`
    #[arg(long = "field", value_name = "OPTIONS")]
    extra_fields: Vec<String>,

    /// Documents per update request
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// HTTP connect/read timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Commit with the final update request
    #[arg(long)]
    commit: bool,

    /// Write documents to stdout as NDJSON instead of sending them
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    fn config(&self) -> LoaderConfig {
        LoaderConfig {
            host: self.api_host.clone(),
            port: self.api_port,
            collection: self.collection.clone(),
            batch_size: self.batch_size,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    fn field_definitions(&self) -> LoaderResult<Vec<FieldDefinition>> {
        let mut fields = trip_fields();
        for spec in &self.extra_fields {
            fields.push(FieldDefinition::from_options(&OptionMap::parse_list(spec)?)?);
        }
        Ok(fields)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> LoaderResult<()> {
    let cfg = args.config();
    cfg.validate()?;
    let fields = args.field_definitions()?;

    let metrics = Arc::new(IndexMetrics::new());
    let log_observer: Arc<dyn IndexObserver> = Arc::new(LogObserver);
    let metrics_observer: Arc<dyn IndexObserver> = metrics.clone();
    let observer: Arc<dyn IndexObserver> =
        Arc::new(CompositeObserver::new(vec![log_observer, metrics_observer]));

    let stats = if args.dry_run {
        let sink = NdjsonSink::new(io::stdout().lock());
        load(sink, &cfg, args, observer)?
    } else {
        let client = HttpClient::new(cfg.timeout)?;
        if args.fields {
            let provisioner = SchemaProvisioner::new(client.clone(), cfg.fields_url());
            let created = provisioner.provision(&fields)?;
            info!("declared {created} fields on {}", cfg.collection);
        }
        let sink = SolrUpdateSink::new(client, cfg.solr_url());
        load(sink, &cfg, args, observer)?
    };

    let snapshot = metrics.snapshot();
    info!(
        "done: docs={} requests={} skipped={} elapsed={:?}",
        stats.documents, stats.requests, stats.skipped, snapshot.elapsed
    );
    Ok(())
}

fn load<S: UpdateSink>(
    sink: S,
    cfg: &LoaderConfig,
    args: &Args,
    observer: Arc<dyn IndexObserver>,
) -> LoaderResult<IndexStats> {
    BatchIndexer::new(sink, cfg.batch_size)?
        .with_observer(observer)
        .with_commit_on_finish(args.commit)
        .ingest_path(&args.input)
}
