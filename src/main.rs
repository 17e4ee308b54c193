use anyhow::Context;
use clap::{Parser, ValueEnum};
use semstore::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Load documents into an in-memory store and query them
#[derive(Parser, Debug)]
#[command(name = "semstore")]
#[command(about = "Ingest JSONL documents and run hybrid, vector or text search", long_about = None)]
struct Args {
    /// JSONL file, one `{"content": ..., "metadata": {...}, "id": ...}` per line
    #[arg(short, long)]
    input: PathBuf,

    /// Query text
    #[arg(short, long)]
    query: String,

    /// Search mode
    #[arg(long, value_enum, default_value_t = Mode::Hybrid)]
    mode: Mode,

    /// Number of results
    #[arg(short, default_value_t = 4)]
    k: usize,

    /// Re-rank with Maximal Marginal Relevance
    #[arg(long)]
    mmr: bool,

    /// Candidates fetched before MMR re-ranking
    #[arg(long, default_value_t = 20)]
    fetch_k: usize,

    /// MMR trade-off, 1 for relevance and 0 for diversity
    #[arg(long, default_value_t = 0.5)]
    lambda: f32,

    /// Ingest and search within this tenant
    #[arg(long)]
    tenant: Option<String>,

    /// Keyword side of a hybrid query, defaults to the query text
    #[arg(long)]
    keyword_query: Option<String>,

    /// Store configuration as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Embedding dimension
    #[arg(long, default_value_t = semstore::HashEmbeddings::default().dim())]
    dim: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    Hybrid,
    Vector,
    Text,
}

impl From<Mode> for SearchMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Hybrid => SearchMode::Hybrid,
            Mode::Vector => SearchMode::Vector,
            Mode::Text => SearchMode::Text,
        }
    }
}

#[derive(Deserialize)]
struct InputRecord {
    #[serde(alias = "page_content", alias = "text")]
    content: String,
    #[serde(default)]
    metadata: Metadata,
    id: Option<String>,
}

#[derive(Serialize)]
struct OutputRecord<'a> {
    content: &'a str,
    metadata: &'a Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    explain_score: Option<&'a str>,
}

fn read_records(path: &PathBuf) -> anyhow::Result<Vec<InputRecord>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut records = Vec::new();
    for (lineno, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid record", path.display(), lineno + 1))?;
        records.push(record);
    }
    Ok(records)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => StoreConfig::from_json_file(path)?,
        None => StoreConfig::new("Documents", "text"),
    };
    if args.tenant.is_some() {
        config.use_multi_tenancy = true;
    }

    let embedding: Arc<dyn Embeddings> = Arc::new(HashEmbeddings::new(args.dim));
    let engine = Arc::new(MemoryEngine::new().with_vectorizer(embedding.clone()));
    let store = VectorStore::new(engine, config, Some(embedding.clone()))?;
    let tenant = args.tenant.as_deref();

    let records = read_records(&args.input)?;
    let texts: Vec<&str> = records.iter().map(|r| r.content.as_str()).collect();
    let metadatas: Vec<Metadata> = records.iter().map(|r| r.metadata.clone()).collect();
    let ids: Vec<String> = records
        .iter()
        .map(|r| r.id.clone().unwrap_or_else(|| uuid::Uuid::new_v4().to_string()))
        .collect();

    let report = store.add_texts_with_report(&texts, Some(&metadatas), Some(&ids), tenant)?;
    info!(
        collection = store.index_name(),
        written = report.ids.len().saturating_sub(report.failed.len()),
        failed = report.failed.len(),
        "ingested {}",
        args.input.display()
    );

    let mut options = SearchOptions::new(args.mode.into());
    options.tenant = args.tenant.clone();
    options.keyword_query = args.keyword_query.clone();

    let hits: Vec<(Document, Option<Score>)> = if args.mmr {
        store
            .max_marginal_relevance_search(&args.query, args.k, args.fetch_k, args.lambda, &options)?
            .into_iter()
            .map(|doc| (doc, None))
            .collect()
    } else {
        if options.mode == SearchMode::Vector {
            options.params.near_vector = Some(embedding.embed_query(&args.query)?);
        }
        store
            .search(Some(args.query.as_str()), args.k, &options, true)?
            .into_iter()
            .map(|r| (r.document, r.score))
            .collect()
    };

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for (doc, score) in &hits {
        let record = OutputRecord {
            content: &doc.content,
            metadata: &doc.metadata,
            score: score.as_ref().map(|s| s.value),
            explain_score: score
                .as_ref()
                .map(|s| s.explanation.as_str())
                .filter(|e| !e.is_empty()),
        };
        serde_json::to_writer(&mut out, &record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    Ok(())
}
