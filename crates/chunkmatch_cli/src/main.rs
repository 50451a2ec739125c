use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;

use chunkmatch_core::consts::{DEFAULT_CHUNK_LEN, DEFAULT_MODULUS};
use chunkmatch_core::{match_documents, normalize, MatchConfig, MatchMode, MatchReport};

#[derive(Parser)]
#[command(name = "chunkmatch", about = "Find which chunks of a query document occur in a target")]
struct Cli {
    /// Matching algorithm
    #[arg(short = 't', long = "algo", value_enum, default_value_t = CliAlgo::Naive)]
    algo: CliAlgo,

    /// Chunk length in bytes
    #[arg(short = 'k', long = "chunk-len", default_value_t = DEFAULT_CHUNK_LEN)]
    chunk_len: usize,

    /// Rolling-hash modulus (prime; m * 256 must fit in 64 bits)
    #[arg(short = 'q', long = "modulus", default_value_t = DEFAULT_MODULUS)]
    modulus: u64,

    /// Emit the report as JSON instead of plain lines
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Query document (X): split into chunks to look for
    query: PathBuf,

    /// Target document (Y): searched for chunk occurrences
    target: PathBuf,
}

#[derive(ValueEnum, Clone, Copy)]
enum CliAlgo {
    Naive,
    Rolling,
    RollingBatch,
}

fn load_normalized(path: &Path) -> Result<Vec<u8>> {
    let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(normalize(&raw))
}

fn report_json(report: &MatchReport) -> serde_json::Value {
    serde_json::json!({
        "ratio": report.ratio(),
        "matched": report.matched,
        "total_chunks": report.total_chunks,
        "window_hashes": report.window_hashes,
        "bloom_prefix_hex": report.bloom_prefix_hex,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let query = load_normalized(&cli.query)?;
    let target = load_normalized(&cli.target)?;
    debug!(
        query_len = query.len(),
        target_len = target.len(),
        "documents loaded and normalized"
    );

    let mode = match cli.algo {
        CliAlgo::Naive => MatchMode::Naive,
        CliAlgo::Rolling => MatchMode::Rolling,
        CliAlgo::RollingBatch => MatchMode::RollingBatch,
    };
    let cfg = MatchConfig {
        chunk_len: cli.chunk_len,
        mode,
        modulus: cli.modulus,
    };
    debug!(mode = ?mode, chunk_len = cfg.chunk_len, "dispatching match");
    let report = match_documents(&cfg, &query, &target)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
        return Ok(());
    }

    if !report.window_hashes.is_empty() {
        let hashes: Vec<String> = report.window_hashes.iter().map(|h| h.to_string()).collect();
        println!("{}", hashes.join(" "));
    }
    if let Some(prefix) = &report.bloom_prefix_hex {
        println!("{prefix}");
    }
    println!(
        "{:.2} matched: {} out of {}",
        report.ratio(),
        report.matched,
        report.total_chunks
    );
    Ok(())
}
