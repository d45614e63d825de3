//! # Main — CLI Entry Point
//!
//! Thin wrapper around the sieve engine: parse the bound, run one sieve
//! pass, stream the semiprimes to stdout, print the summary line.
//!
//! The bound is deliberately not routed through a clap value parser: an
//! absent, malformed, or out-of-range bound is a usage-help request, not an
//! error — the help text is printed and the process exits 0. Diagnostics go
//! to stderr (tracing, filtered via `RUST_LOG`) so stdout stays a clean
//! semiprime stream.

use std::io::Write;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::info;

use semisieve::sieve::{SemiprimeSieve, MIN_BOUND};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "semisieve",
    about = "Print all semiprimes s (products of exactly two primes) with 4 <= s <= x",
    after_help = "The bound must satisfy 4 <= x < 2^32. An absent or unusable bound prints\n\
                  this help and exits 0. Memory: the sieve allocates two arrays totalling\n\
                  just over 5*x bytes."
)]
struct Cli {
    /// Upper bound x (inclusive), 4 <= x < 2^32
    x: Option<String>,

    /// Print only the final count/sum summary line
    #[arg(long)]
    totals_only: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let bound = match cli.x.as_deref().and_then(|raw| raw.parse::<u64>().ok()) {
        Some(x) if x >= MIN_BOUND as u64 && x <= u32::MAX as u64 => x as u32,
        _ => {
            Cli::command().print_long_help()?;
            return Ok(());
        }
    };

    let sieve = SemiprimeSieve::new(bound);

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    let mut count = 0u64;
    let mut sum = 0u64;
    for s in sieve.iter() {
        if !cli.totals_only {
            writeln!(out, "{}", s)?;
        }
        count += 1;
        sum += s as u64;
    }
    writeln!(
        out,
        "Found {} semiprimes with sum {} in [1, {}].",
        count, sum, bound
    )?;
    out.flush()?;

    info!(bound, count, sum, "enumeration complete");
    Ok(())
}
