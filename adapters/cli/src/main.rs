#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that answers each tick record on stdin with one move
//! on stdout.

mod framing;
mod record;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use gem_scout_system_pathing::{PathSearchConfig, DEFAULT_STALE_AFTER_TICKS};
use gem_scout_system_pilot::{Pilot, PilotConfig};
use gem_scout_world::World;
use tracing::{debug, info, trace, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::framing::{FramingError, RecordReader, MAX_RECORD_BYTES};

#[derive(Debug, Parser)]
#[command(name = "gem-scout")]
#[command(about = "Grid agent that seeks gems and explores stale ground", version)]
struct Cli {
    /// Ticks after which a remembered cell becomes worth re-observing.
    #[arg(long, value_name = "TICKS", default_value_t = DEFAULT_STALE_AFTER_TICKS)]
    stale_after: u64,

    /// Largest record accepted before it is discarded unread.
    #[arg(long, value_name = "BYTES", default_value_t = MAX_RECORD_BYTES)]
    max_record_bytes: usize,

    /// Debug logging on stderr when RUST_LOG is unset.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the gem-scout command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = PilotConfig::new(PathSearchConfig::new(cli.stale_after));
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(stdin.lock(), stdout.lock(), config, cli.max_record_bytes)
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Drives the pilot until `input` is exhausted, writing one line per record.
fn run<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    config: PilotConfig,
    record_limit: usize,
) -> Result<()> {
    let mut reader = RecordReader::new(input, record_limit);
    let mut world = World::new();
    let mut pilot = Pilot::new(config);
    let mut events = Vec::new();
    let mut records: u64 = 0;
    let mut announced = false;

    loop {
        let text = match reader.next_record() {
            Ok(Some(text)) => Some(text),
            Ok(None) => break,
            Err(error) if error.is_fatal() => {
                return Err(anyhow::Error::from(error).context("reading tick records"));
            }
            Err(error @ FramingError::Truncated { .. }) => {
                warn!(%error, "discarding unfinished record");
                continue;
            }
            Err(error) => {
                warn!(record = records + 1, %error, "skipping malformed record");
                None
            }
        };
        records += 1;
        events.clear();

        let decision = match text.map(|text| record::decode(&text)) {
            Some(Ok(record)) => {
                if !announced {
                    if let Some((width, height)) = record.dimensions() {
                        info!(width, height, "map dimensions");
                        announced = true;
                    }
                }
                match record.into_state() {
                    Some(state) => pilot.step(&mut world, state, &mut events),
                    None => {
                        debug!(record = records, "record carries no agent position");
                        pilot.hold(&mut world, &mut events)
                    }
                }
            }
            Some(Err(error)) => {
                warn!(record = records, %error, "skipping malformed record");
                pilot.hold(&mut world, &mut events)
            }
            None => pilot.hold(&mut world, &mut events),
        };

        for event in &events {
            trace!(record = records, ?event, "event");
        }

        writeln!(output, "{}", decision.direction).context("writing action")?;
        output.flush().context("flushing action")?;
    }

    info!(records, "input exhausted");
    Ok(())
}
