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

//! Long-table rendering.

use crate::error::{LatexError, Result};
use sketchbench_core::DerivedRecord;
use std::collections::BTreeMap;
use std::io::Write;

const UNKNOWN: &str = "unknown";

/// Configuration for LaTeX output.
#[derive(Debug, Clone)]
pub struct LatexConfig {
    /// Table label. When `None` a label is derived from the table content, so
    /// the same input always yields the same label.
    pub label: Option<String>,
    /// Subject named in the caption (default: "Throughput").
    pub caption_subject: String,
    /// Header of the rate column (default: "Throughput (tuples/s)").
    pub value_header: String,
    /// Sort rows by (benchmark, stream rate) descending (default: true).
    pub descending: bool,
}

impl Default for LatexConfig {
    fn default() -> Self {
        Self {
            label: None,
            caption_subject: "Throughput".to_string(),
            value_header: "Throughput (tuples/s)".to_string(),
            descending: true,
        }
    }
}

struct Row<'a> {
    benchmark: &'a str,
    stream_rate: f64,
    rate: f64,
}

/// Render derived records as a `longtable` environment.
///
/// `metadata` supplies `goos`, `goarch` and `pkg` for the caption; missing
/// entries read "unknown".
///
/// # Errors
///
/// Returns [`LatexError::MissingStreamRate`] when a record has no stream
/// rate.
///
/// # Examples
///
/// ```
/// use sketchbench_core::{DerivedRecord, GroupKey};
/// use sketchbench_latex::{to_longtable, LatexConfig};
/// use std::collections::BTreeMap;
///
/// let records = vec![DerivedRecord {
///     key: GroupKey::new("CountThroughput", vec![("StreamRate".to_string(), 4780)]),
///     stream_rate_tuples_per_sec: Some(209_205.0209),
///     processing_rate_tuples_per_sec: 7572.479,
/// }];
/// let metadata = BTreeMap::from([("goos".to_string(), "linux".to_string())]);
///
/// let table = to_longtable(&records, &metadata, &LatexConfig::default()).unwrap();
/// assert!(table.contains("on linux (unknown)"));
/// assert!(table.contains("CountThroughput & 209,205.021 & 7572.479 \\\\"));
/// ```
pub fn to_longtable(
    records: &[DerivedRecord],
    metadata: &BTreeMap<String, String>,
    config: &LatexConfig,
) -> Result<String> {
    let mut buffer = Vec::new();
    to_longtable_writer(records, metadata, config, &mut buffer)?;
    // every piece written is a &str, so the buffer is valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write the long-table to `writer`.
pub fn to_longtable_writer<W: Write>(
    records: &[DerivedRecord],
    metadata: &BTreeMap<String, String>,
    config: &LatexConfig,
    mut writer: W,
) -> Result<()> {
    let mut rows = records
        .iter()
        .map(|record| -> Result<Row> {
            let stream_rate = record
                .stream_rate_tuples_per_sec
                .ok_or_else(|| LatexError::MissingStreamRate {
                    group: record.key.to_string(),
                })?;
            Ok(Row {
                benchmark: record.key.benchmark_name(),
                stream_rate,
                rate: record.processing_rate_tuples_per_sec,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    rows.sort_by(|a, b| {
        let order = a
            .benchmark
            .cmp(b.benchmark)
            .then_with(|| a.stream_rate.total_cmp(&b.stream_rate));
        if config.descending {
            order.reverse()
        } else {
            order
        }
    });

    let meta = |key: &str| escape(metadata.get(key).map(String::as_str).unwrap_or(UNKNOWN));
    let label = config
        .label
        .clone()
        .unwrap_or_else(|| derived_label(&config.caption_subject, metadata, &rows));
    let header = format!(
        "\\textbf{{Benchmark}} & \\textbf{{Stream Rate}} & \\textbf{{{}}} \\\\",
        escape(&config.value_header)
    );

    writeln!(writer, "\\begin{{center}}")?;
    writeln!(writer, "\\begin{{longtable}}{{|l|r|r|}}")?;
    writeln!(
        writer,
        "\\caption{{Benchmark results for {} on {} ({}) for package \\texttt{{{}}}.}} \\label{{{}}} \\\\",
        escape(&config.caption_subject),
        meta("goos"),
        meta("goarch"),
        meta("pkg"),
        label
    )?;
    writeln!(writer, "\\hline")?;
    writeln!(writer, "{}", header)?;
    writeln!(writer, "\\hline")?;
    writeln!(writer, "\\endfirsthead")?;
    writeln!(writer, "\\hline {} \\hline", header)?;
    writeln!(writer, "\\endhead")?;
    writeln!(writer, "\\hline \\multicolumn{{3}}{{r}}{{{{Continued on next page}}}} \\\\")?;
    writeln!(writer, "\\endfoot")?;
    writeln!(writer, "\\hline")?;
    writeln!(writer, "\\endlastfoot")?;

    for row in &rows {
        writeln!(
            writer,
            "{} & {} & {:.3} \\\\",
            escape(row.benchmark),
            group_thousands(row.stream_rate),
            row.rate
        )?;
    }

    writeln!(writer, "\\end{{longtable}}")?;
    write!(writer, "\\end{{center}}")?;
    Ok(())
}

/// Escape LaTeX special characters.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

/// Format with comma thousands separators and at most three decimals.
fn group_thousands(value: f64) -> String {
    let formatted = format!("{:.3}", value);
    let (sign, digits) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

/// `tab:benchmark_<8 hex digits>` from an FNV-1a hash of the table content.
fn derived_label(subject: &str, metadata: &BTreeMap<String, String>, rows: &[Row<'_>]) -> String {
    const OFFSET: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;

    let mut hash = OFFSET;
    let mut feed = |bytes: &[u8]| {
        for byte in bytes {
            hash ^= u32::from(*byte);
            hash = hash.wrapping_mul(PRIME);
        }
    };

    feed(subject.as_bytes());
    for (key, value) in metadata {
        feed(key.as_bytes());
        feed(value.as_bytes());
    }
    for row in rows {
        feed(row.benchmark.as_bytes());
        feed(&row.stream_rate.to_bits().to_le_bytes());
    }

    format!("tab:benchmark_{:08x}", hash)
}
