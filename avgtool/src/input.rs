// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use anyhow::{self as ah, Context as _};
use sliding_average::SlidingInt;
use std::io::BufRead;

/// Iterator over the integer samples of a text stream.
///
/// One sample per line. Empty lines and `#` comments are skipped.
pub struct Samples<R> {
    lines: std::io::Lines<R>,
    lineno: usize,
}

impl<R: BufRead> Samples<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            lineno: 0,
        }
    }
}

/// Exclusive bound of the sample magnitude.
///
/// The difference of two scaled samples must still fit into an `i64`.
pub const SAMPLE_MAGNITUDE_LIMIT: i64 = <i64 as SlidingInt>::SAMPLE_LIMIT / 2;

fn parse_sample(line: &str) -> ah::Result<i64> {
    let sample: i64 = line.parse()?;
    let limit = SAMPLE_MAGNITUDE_LIMIT;
    if sample >= limit || sample <= -limit {
        ah::bail!("Sample {sample} is out of range (-{limit}, {limit})");
    }
    Ok(sample)
}

impl<R: BufRead> Iterator for Samples<R> {
    type Item = ah::Result<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.lineno += 1;
            let line = match line.with_context(|| format!("Read line {}", self.lineno)) {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            return Some(
                parse_sample(line)
                    .with_context(|| format!("Line {}: invalid sample '{line}'", self.lineno)),
            );
        }
    }
}


// vim: ts=4 sw=4 expandtab
