// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::input::Samples;
use anyhow::{self as ah, Context as _};
use sliding_average::SlidingAverage;
use std::{
    fmt,
    io::{BufRead, Write},
};

/// Inverted gains that can be selected at runtime.
pub const GAINS: [u32; 12] = [2, 4, 5, 8, 10, 16, 20, 32, 64, 100, 128, 256];

/// Snapshot of the accumulator, as printed.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Report {
    pub num_samples: u32,
    pub mean: i64,
    pub avg_deviation: i64,
}

impl<const G: u32> From<&SlidingAverage<i64, G>> for Report {
    fn from(avg: &SlidingAverage<i64, G>) -> Self {
        Self {
            num_samples: avg.num_samples(),
            mean: avg.mean(),
            avg_deviation: avg.avg_deviation(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.num_samples, self.mean, self.avg_deviation)
    }
}

fn process_gain<const G: u32>(
    input: impl BufRead,
    mut out: impl Write,
    summary: bool,
) -> ah::Result<Report> {
    let mut avg = SlidingAverage::<i64, G>::new();
    let mut count = 0_usize;

    for sample in Samples::new(input) {
        let sample = sample?;
        avg.add_sample(sample);
        count += 1;

        let report = Report::from(&avg);
        tracing::trace!(
            sample,
            mean_fixpt = avg.mean_fixpt(),
            avg_deviation_fixpt = avg.avg_deviation_fixpt(),
            "{report}"
        );
        if !summary {
            writeln!(out, "{report}").context("Write output")?;
        }
    }

    let report = Report::from(&avg);
    if summary {
        writeln!(out, "{report}").context("Write output")?;
    }
    out.flush().context("Flush output")?;

    tracing::info!(
        samples = count,
        gain = G,
        mean = report.mean,
        avg_deviation = report.avg_deviation,
        "Done"
    );
    Ok(report)
}

/// Feed all samples from `input` through an accumulator with the
/// inverted gain `gain` and write the reports to `out`.
pub fn process(
    gain: u32,
    input: impl BufRead,
    out: impl Write,
    summary: bool,
) -> ah::Result<Report> {
    macro_rules! dispatch {
        ($($g:literal),*) => {
            match gain {
                $( $g => process_gain::<$g>(input, out, summary), )*
                _ => ah::bail!("Unsupported inverted gain {gain}. Supported: {:?}", GAINS),
            }
        };
    }
    tracing::debug!(gain, summary, "Processing samples");
    dispatch!(2, 4, 5, 8, 10, 16, 20, 32, 64, 100, 128, 256)
}


// vim: ts=4 sw=4 expandtab
