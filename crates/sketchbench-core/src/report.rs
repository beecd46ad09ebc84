// Sketchbench - Benchmark report analysis for sketch evaluations
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Report readers.
//!
//! [`parse_report`] reads single-line reports (benchstat summaries or raw
//! `go test -bench` output). [`parse_paired_latency`] reads the paired-line
//! latency format, where a header naming the client count, merge rate and
//! stream rate is followed by a line of nanosecond samples:
//!
//! ```text
//! Clients: 10, MergeRate: 1000, StreamRate: 500
//! [120500 98000 143250]
//! ```
//!
//! Neither reader fails on bad lines. Lines that do not match are counted in
//! [`ParseStats`] and skipped; only I/O errors end a read early.

use crate::error::{BenchError, Result};
use crate::limits::ParseOptions;
use crate::reader::LineReader;
use crate::record::{build, MeasurementRecord, RecordShape};
use crate::tokenizer::Tokenizer;
use regex::Regex;
use std::collections::BTreeMap;
use std::io::Read;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Parameter names of the paired-line header, in order.
pub const PAIRED_HEADER_PARAMS: [&str; 3] = ["Clients", "MergeRate", "StreamRate"];

fn metadata_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(goos|goarch|pkg|cpu):\s*(.+)$").expect("metadata regex is valid")
    })
}

fn footnote_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[¹²³⁴⁵⁶⁷⁸⁹]\s*(.*)$").expect("footnote regex is valid"))
}

fn integer_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("integer regex is valid"))
}

fn signed_integer_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-?\d+").expect("signed integer regex is valid"))
}

/// Line counters for one read.
///
/// For single-line reports `lines == records + metadata + no_match +
/// malformed + unknown_shape`. For paired-line reports `records` counts
/// samples rather than lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParseStats {
    /// Lines read.
    pub lines: usize,
    /// Records produced.
    pub records: usize,
    /// Metadata and footnote lines.
    pub metadata: usize,
    /// Lines outside the grammar (blank lines, table rules, prose).
    pub no_match: usize,
    /// Result-shaped lines rejected for bad numbers or parameters, or over
    /// the length limit.
    pub malformed: usize,
    /// Lines whose metric field count matched no variant.
    pub unknown_shape: usize,
}

impl ParseStats {
    /// Lines that produced nothing and were not metadata.
    pub fn skipped(&self) -> usize {
        self.no_match + self.malformed + self.unknown_shape
    }

    /// Add another read's counters to this one.
    pub fn merge(&mut self, other: &ParseStats) {
        self.lines += other.lines;
        self.records += other.records;
        self.metadata += other.metadata;
        self.no_match += other.no_match;
        self.malformed += other.malformed;
        self.unknown_shape += other.unknown_shape;
    }

    fn record_error(&mut self, line_number: usize, err: &BenchError) {
        match err {
            BenchError::UnknownMetricShape { .. } => {
                warn!(line = line_number, error = %err, "skipping line");
                self.unknown_shape += 1;
            }
            _ => {
                debug!(line = line_number, error = %err, "skipping line");
                self.malformed += 1;
            }
        }
    }
}

/// Everything read from one report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedReport {
    /// Name of the input source, when read through [`crate::load_source`].
    pub source: Option<String>,
    /// Records in order of appearance.
    pub records: Vec<MeasurementRecord>,
    /// Metadata header values (`goos`, `goarch`, `pkg`, `cpu`).
    pub metadata: BTreeMap<String, String>,
    /// Footnote texts, marker stripped.
    pub footnotes: Vec<String>,
    /// Line counters.
    pub stats: ParseStats,
}

/// Read a single-line report.
///
/// # Errors
///
/// Returns [`BenchError::Io`] only when the underlying reader fails.
///
/// # Examples
///
/// ```
/// use sketchbench_core::{parse_report, ParseOptions};
///
/// let text = "goos: linux\n\
///             CountThroughput/StreamRate:_4780-4   924.4m ± 14%\n\
///             garbage text not matching grammar\n\
///             CountThroughput/StreamRate:_4810-4   1.033 ± 11%\n";
///
/// let report = parse_report(text.as_bytes(), &ParseOptions::default()).unwrap();
/// assert_eq!(report.records.len(), 2);
/// assert_eq!(report.metadata["goos"], "linux");
/// assert_eq!(report.stats.no_match, 1);
/// ```
pub fn parse_report<R: Read>(reader: R, options: &ParseOptions) -> Result<ParsedReport> {
    let tokenizer = Tokenizer::with_name_prefix(options.name_prefix.clone());
    let mut report = ParsedReport::default();

    for line in LineReader::new(reader) {
        let (line_number, line) = line?;
        report.stats.lines += 1;

        if line.len() > options.limits.max_line_length {
            debug!(line = line_number, len = line.len(), "line exceeds length limit");
            report.stats.malformed += 1;
            continue;
        }

        let trimmed = line.trim();

        if let Some(caps) = metadata_regex().captures(trimmed) {
            report
                .metadata
                .insert(caps[1].to_string(), caps[2].trim().to_string());
            report.stats.metadata += 1;
            continue;
        }

        if let Some(caps) = footnote_regex().captures(trimmed) {
            report.footnotes.push(caps[1].trim().to_string());
            report.stats.metadata += 1;
            continue;
        }

        match tokenizer.tokenize(trimmed).and_then(|t| t.map(build).transpose()) {
            Ok(Some(record)) => {
                report.records.push(record);
                report.stats.records += 1;
            }
            Ok(None) => report.stats.no_match += 1,
            Err(err) => report.stats.record_error(line_number, &err),
        }
    }

    Ok(report)
}

/// Read a single-line report held in memory.
pub fn parse_report_str(text: &str, options: &ParseOptions) -> Result<ParsedReport> {
    parse_report(text.as_bytes(), options)
}

fn is_sample_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('[')
        || trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || c == ',')
}

fn parse_integers(line: &str) -> std::result::Result<Vec<u64>, BenchError> {
    integer_regex()
        .find_iter(line)
        .map(|m| {
            m.as_str()
                .parse::<u64>()
                .map_err(|e| BenchError::malformed_number(m.as_str(), e.to_string()))
        })
        .collect()
}

/// Header values keep their sign and must fit in `i64`.
fn parse_header_values(line: &str) -> std::result::Result<Vec<i64>, BenchError> {
    signed_integer_regex()
        .find_iter(line)
        .map(|m| {
            m.as_str()
                .parse::<i64>()
                .map_err(|e| BenchError::malformed_number(m.as_str(), e.to_string()))
        })
        .collect()
}

/// Read a paired-line latency report.
///
/// Each sample becomes one [`RecordShape::Sample`] record named
/// `benchmark_name`, with the header's three integers as the `Clients`,
/// `MergeRate` and `StreamRate` parameters and the sample converted from
/// nanoseconds to milliseconds. Blank lines between pairs are ignored.
///
/// # Errors
///
/// Returns [`BenchError::Io`] only when the underlying reader fails.
///
/// # Examples
///
/// ```
/// use sketchbench_core::{parse_paired_latency, ParseOptions};
///
/// let text = "Clients: 10, MergeRate: 1000, StreamRate: 500\n[1000000 3000000]\n";
/// let report = parse_paired_latency(text.as_bytes(), "KllLatency", &ParseOptions::default()).unwrap();
///
/// assert_eq!(report.records.len(), 2);
/// assert_eq!(report.records[0].param("Clients"), Some(10));
/// assert_eq!(report.records[1].latency_ms(), 3.0);
/// ```
pub fn parse_paired_latency<R: Read>(
    reader: R,
    benchmark_name: &str,
    options: &ParseOptions,
) -> Result<ParsedReport> {
    let mut report = ParsedReport::default();
    let mut lines = LineReader::new(reader);
    let mut pending: Option<(usize, String)> = None;

    loop {
        let next = match pending.take() {
            Some(line) => Some(line),
            None => next_non_blank(&mut lines, &mut report.stats)?,
        };
        let Some((header_number, header)) = next else {
            break;
        };

        if header.len() > options.limits.max_line_length || is_sample_line(&header) {
            debug!(line = header_number, "expected a paired-line header");
            report.stats.malformed += 1;
            continue;
        }

        let Some((sample_number, samples)) = next_non_blank(&mut lines, &mut report.stats)? else {
            debug!(line = header_number, "header without sample line");
            report.stats.malformed += 1;
            break;
        };

        if !is_sample_line(&samples) {
            debug!(line = header_number, "header without sample line");
            report.stats.malformed += 1;
            pending = Some((sample_number, samples));
            continue;
        }

        let header_values = match parse_header_values(&header) {
            Ok(values) if values.len() == PAIRED_HEADER_PARAMS.len() => values,
            Ok(values) => {
                debug!(line = header_number, found = values.len(), "header needs exactly three integers");
                report.stats.malformed += 2;
                continue;
            }
            Err(err) => {
                report.stats.record_error(header_number, &err);
                report.stats.malformed += 1;
                continue;
            }
        };

        let sample_values = match parse_integers(&samples) {
            Ok(values) => values,
            Err(err) => {
                report.stats.record_error(sample_number, &err);
                report.stats.malformed += 1;
                continue;
            }
        };

        for sample_ns in sample_values {
            let params = PAIRED_HEADER_PARAMS
                .iter()
                .zip(&header_values)
                .map(|(name, value)| (name.to_string(), *value));
            let record = MeasurementRecord::new(
                benchmark_name,
                params,
                RecordShape::Sample {
                    latency_ms: sample_ns as f64 / 1_000_000.0,
                },
            )?;
            report.records.push(record);
            report.stats.records += 1;
        }
    }

    Ok(report)
}

fn next_non_blank<R: Read>(
    lines: &mut LineReader<R>,
    stats: &mut ParseStats,
) -> Result<Option<(usize, String)>> {
    while let Some((number, line)) = lines.next_line()? {
        stats.lines += 1;
        if line.trim().is_empty() {
            stats.no_match += 1;
            continue;
        }
        return Ok(Some((number, line)));
    }
    Ok(None)
}
