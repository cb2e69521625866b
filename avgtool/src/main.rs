// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![forbid(unsafe_code)]

mod input;
mod process;

use crate::process::process;
use anyhow::{self as ah, Context as _};
use clap::Parser;
use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};
use tracing_subscriber::EnvFilter;

/// Smooth a stream of integer samples with an exponential moving average.
///
/// Prints `<num_samples> <mean> <avg_deviation>` separated by tabs.
#[derive(Parser, Debug)]
struct Opts {
    /// Text file with one integer sample per line. Reads stdin if omitted.
    input: Option<PathBuf>,

    /// Inverted gain (steady state window length in samples).
    #[arg(short, long, default_value_t = 20)]
    gain: u32,

    /// Only print the final state.
    #[arg(short, long)]
    summary: bool,

    /// Increase log verbosity. May be given multiple times.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ah::Result<()> {
    let opts = Opts::parse();
    init_logging(opts.verbose);

    let out = io::stdout().lock();
    match &opts.input {
        Some(path) => {
            tracing::info!("Reading samples from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Open input file '{}'", path.display()))?;
            process(opts.gain, BufReader::new(file), out, opts.summary)?;
        }
        None => {
            tracing::info!("Reading samples from stdin");
            process(opts.gain, io::stdin().lock(), out, opts.summary)?;
        }
    }
    Ok(())
}


// vim: ts=4 sw=4 expandtab
