use addrmatch_api::RestApi;
use addrmatch_core::{RawAddress, RuleTagger};
use addrmatch_similarity::{AddressPair, PairScorer, ScoreSummary, ScoringConfig};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Similarity at or above which a scored pair counts as a match in summaries
const MATCH_THRESHOLD: f64 = 0.8;

/// Postal address pair matching
#[derive(Parser, Debug)]
#[command(name = "addrmatch")]
#[command(about = "Score pairs of postal addresses for likely equivalence", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP API port
    #[arg(long, default_value_t = 8000, global = true)]
    http_port: u16,

    /// Address to bind the HTTP API to
    #[arg(long, default_value = "0.0.0.0", global = true)]
    bind: String,

    /// Scoring configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Score the pairs in a JSON file and print the results
    Score {
        /// JSON array of pairs, or an object with a "pairs" array
        input: PathBuf,
    },
    /// Print every step of scoring one pair
    Explain {
        address1: String,
        address2: String,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PairsFile {
    Wrapped { pairs: Vec<AddressPair> },
    Bare(Vec<AddressPair>),
}

impl PairsFile {
    fn into_pairs(self) -> Vec<AddressPair> {
        match self {
            PairsFile::Wrapped { pairs } => pairs,
            PairsFile::Bare(pairs) => pairs,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
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

    let config = match &args.config {
        Some(path) => ScoringConfig::from_file(path)
            .with_context(|| format!("loading config {:?}", path))?,
        None => ScoringConfig::default(),
    };
    info!(
        "Scoring config: bypass_threshold={} mismatch_multiplier={}",
        config.bypass_threshold, config.mismatch_multiplier
    );

    let scorer = Arc::new(PairScorer::with_config(Arc::new(RuleTagger::new()), &config));

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(scorer, args.bind, args.http_port).await,
        Command::Score { input } => score_file(&scorer, &input),
        Command::Explain { address1, address2 } => {
            let breakdown = scorer.explain(&RawAddress::from(address1), &RawAddress::from(address2))?;
            println!("{}", serde_json::to_string_pretty(&breakdown)?);
            Ok(())
        }
    }
}

fn score_file(scorer: &PairScorer, input: &Path) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(input).with_context(|| format!("reading {:?}", input))?;
    let pairs = serde_json::from_str::<PairsFile>(&json)
        .with_context(|| format!("parsing pairs from {:?}", input))?
        .into_pairs();

    let results = scorer.score_pairs(&pairs)?;
    let summary = ScoreSummary::compute(&results, MATCH_THRESHOLD);
    info!(
        "Scored {} pairs: avg={:.4} min={:.4} max={:.4} matches={}",
        summary.pairs_count,
        summary.avg_similarity,
        summary.min_similarity,
        summary.max_similarity,
        summary.matches_count
    );

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

async fn serve(scorer: Arc<PairScorer>, bind: String, http_port: u16) -> anyhow::Result<()> {
    info!("Starting addrmatch v{}", env!("CARGO_PKG_VERSION"));

    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on {}:{}", bind, http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(scorer, &bind, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://localhost:{}/score", http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
