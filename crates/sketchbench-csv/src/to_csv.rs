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

//! Write aggregated and derived records as CSV tables.
//!
//! Every table starts with a `benchmark` column followed by one column per
//! parameter name seen in any row, sorted by name. Rows that lack a parameter
//! or metric leave the cell empty.

use crate::error::{CsvError, Result};
use sketchbench_core::{AggregatedRecord, DerivedRecord, GroupKey, MetricName};
use std::collections::BTreeSet;
use std::io::Write;

/// Configuration for CSV output.
#[derive(Debug, Clone)]
pub struct ToCsvConfig {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Include header row (default: true)
    pub include_headers: bool,
    /// Quote style for fields (default: necessary)
    pub quote_style: csv::QuoteStyle,
}

impl Default for ToCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            include_headers: true,
            quote_style: csv::QuoteStyle::Necessary,
        }
    }
}

/// Convert aggregated records to a CSV string.
///
/// Metric columns follow the parameter columns, one per metric present in
/// any row, then `sample_count`.
///
/// # Example
/// ```
/// use sketchbench_core::{aggregate, parse_report_str, ParseOptions};
/// use sketchbench_csv::aggregated_to_csv;
///
/// let report = parse_report_str(
///     "CountThroughput/StreamRate:_4780-4   924.4m ± 14%\n",
///     &ParseOptions::default(),
/// ).unwrap();
/// let csv = aggregated_to_csv(&aggregate(&report.records)).unwrap();
///
/// assert_eq!(csv, "benchmark,StreamRate,latency_ms,sample_count\nCountThroughput,4780,924.4,1\n");
/// ```
pub fn aggregated_to_csv(records: &[AggregatedRecord]) -> Result<String> {
    aggregated_to_csv_with_config(records, ToCsvConfig::default())
}

/// Convert aggregated records to a CSV string with custom configuration.
pub fn aggregated_to_csv_with_config(records: &[AggregatedRecord], config: ToCsvConfig) -> Result<String> {
    let mut buffer = Vec::with_capacity(estimate_size(records.len()));
    aggregated_to_csv_writer_with_config(records, &mut buffer, config)?;
    into_string(buffer)
}

/// Write aggregated records as CSV to a writer.
pub fn aggregated_to_csv_writer<W: Write>(records: &[AggregatedRecord], writer: W) -> Result<()> {
    aggregated_to_csv_writer_with_config(records, writer, ToCsvConfig::default())
}

/// Write aggregated records as CSV to a writer with custom configuration.
pub fn aggregated_to_csv_writer_with_config<W: Write>(
    records: &[AggregatedRecord],
    writer: W,
    config: ToCsvConfig,
) -> Result<()> {
    let params = param_columns(records.iter().map(|r| &r.key));
    let metrics: Vec<MetricName> = MetricName::ALL
        .into_iter()
        .filter(|m| records.iter().any(|r| r.averaged_metrics.contains_key(m)))
        .collect();

    let mut wtr = writer_for(writer, &config);

    if config.include_headers {
        let mut header: Vec<&str> = vec!["benchmark"];
        header.extend(params.iter().map(String::as_str));
        header.extend(metrics.iter().map(|m| m.as_str()));
        header.push("sample_count");
        wtr.write_record(&header)?;
    }

    for record in records {
        let mut row = key_cells(&record.key, &params);
        row.extend(
            metrics
                .iter()
                .map(|m| optional_cell(record.averaged_metrics.get(m).copied())),
        );
        row.push(record.sample_count.to_string());
        write_row(&mut wtr, &record.key, &row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Convert derived records to a CSV string.
///
/// Rate columns are `stream_rate_tuples_per_sec` and
/// `processing_rate_tuples_per_sec`. The stream rate cell is empty for groups
/// without an inter-arrival parameter.
pub fn derived_to_csv(records: &[DerivedRecord]) -> Result<String> {
    derived_to_csv_with_config(records, ToCsvConfig::default())
}

/// Convert derived records to a CSV string with custom configuration.
pub fn derived_to_csv_with_config(records: &[DerivedRecord], config: ToCsvConfig) -> Result<String> {
    let mut buffer = Vec::with_capacity(estimate_size(records.len()));
    derived_to_csv_writer_with_config(records, &mut buffer, config)?;
    into_string(buffer)
}

/// Write derived records as CSV to a writer.
pub fn derived_to_csv_writer<W: Write>(records: &[DerivedRecord], writer: W) -> Result<()> {
    derived_to_csv_writer_with_config(records, writer, ToCsvConfig::default())
}

/// Write derived records as CSV to a writer with custom configuration.
pub fn derived_to_csv_writer_with_config<W: Write>(
    records: &[DerivedRecord],
    writer: W,
    config: ToCsvConfig,
) -> Result<()> {
    let params = param_columns(records.iter().map(|r| &r.key));
    let mut wtr = writer_for(writer, &config);

    if config.include_headers {
        let mut header: Vec<&str> = vec!["benchmark"];
        header.extend(params.iter().map(String::as_str));
        header.push("stream_rate_tuples_per_sec");
        header.push("processing_rate_tuples_per_sec");
        wtr.write_record(&header)?;
    }

    for record in records {
        let mut row = key_cells(&record.key, &params);
        row.push(optional_cell(record.stream_rate_tuples_per_sec));
        row.push(record.processing_rate_tuples_per_sec.to_string());
        write_row(&mut wtr, &record.key, &row)?;
    }

    wtr.flush()?;
    Ok(())
}

fn writer_for<W: Write>(writer: W, config: &ToCsvConfig) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .quote_style(config.quote_style)
        .from_writer(writer)
}

/// Sorted union of parameter names.
fn param_columns<'a>(keys: impl Iterator<Item = &'a GroupKey>) -> Vec<String> {
    let names: BTreeSet<&str> = keys
        .flat_map(|key| key.params().iter().map(|(name, _)| name.as_str()))
        .collect();
    names.into_iter().map(str::to_string).collect()
}

fn key_cells(key: &GroupKey, params: &[String]) -> Vec<String> {
    let mut row = Vec::with_capacity(params.len() + 4);
    row.push(key.benchmark_name().to_string());
    row.extend(params.iter().map(|p| optional_cell(key.param(p))));
    row
}

fn optional_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_row<W: Write>(wtr: &mut csv::Writer<W>, key: &GroupKey, row: &[String]) -> Result<()> {
    wtr.write_record(row).map_err(|e| CsvError::WriteRow {
        group: key.to_string(),
        message: e.to_string(),
    })
}

fn into_string(buffer: Vec<u8>) -> Result<String> {
    String::from_utf8(buffer).map_err(|_| CsvError::InvalidUtf8 {
        context: "CSV output".to_string(),
    })
}

/// Rough output size: ~64 bytes per row plus a header.
fn estimate_size(rows: usize) -> usize {
    128 + rows * 64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn key(name: &str, params: &[(&str, i64)]) -> GroupKey {
        GroupKey::new(name, params.iter().map(|(k, v)| (k.to_string(), *v)))
    }

    fn agg(key: GroupKey, metrics: &[(MetricName, f64)], sample_count: usize) -> AggregatedRecord {
        AggregatedRecord {
            key,
            averaged_metrics: metrics.iter().copied().collect::<BTreeMap<_, _>>(),
            sample_count,
        }
    }

    // ==================== Aggregated tables ====================

    #[test]
    fn test_empty_input_header_only() {
        let csv = aggregated_to_csv(&[]).unwrap();
        assert_eq!(csv, "benchmark,sample_count\n");
    }

    #[test]
    fn test_param_union_sorted_with_empty_cells() {
        let records = vec![
            agg(key("Count", &[("StreamRate", 500)]), &[(MetricName::Latency, 1.5)], 2),
            agg(key("Kll", &[("Clients", 4), ("StreamRate", 0)]), &[(MetricName::Latency, 3.0)], 1),
        ];

        let csv = aggregated_to_csv(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "benchmark,Clients,StreamRate,latency_ms,sample_count");
        assert_eq!(lines[1], "Count,,500,1.5,2");
        assert_eq!(lines[2], "Kll,4,0,3,1");
    }

    #[test]
    fn test_detailed_metric_columns() {
        let records = vec![
            agg(
                key("SystemCount", &[("Clients", 5)]),
                &[
                    (MetricName::Latency, 8342.0),
                    (MetricName::Iterations, 1.0),
                    (MetricName::BytesPerOp, 100.0),
                    (MetricName::AllocsPerOp, 7.0),
                ],
                2,
            ),
            agg(key("SystemKll", &[("Clients", 5)]), &[(MetricName::Latency, 10.0)], 1),
        ];

        let csv = aggregated_to_csv(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "benchmark,Clients,latency_ms,iterations,bytes_per_op,allocs_per_op,sample_count"
        );
        assert_eq!(lines[1], "SystemCount,5,8342,1,100,7,2");
        assert_eq!(lines[2], "SystemKll,5,10,,,,1");
    }

    #[test]
    fn test_custom_delimiter_no_headers() {
        let records = vec![agg(key("Count", &[("StreamRate", 1)]), &[(MetricName::Latency, 2.0)], 1)];
        let config = ToCsvConfig {
            delimiter: b';',
            include_headers: false,
            ..Default::default()
        };
        let csv = aggregated_to_csv_with_config(&records, config).unwrap();
        assert_eq!(csv, "Count;1;2;1\n");
    }

    // ==================== Derived tables ====================

    #[test]
    fn test_derived_columns() {
        let records = vec![
            DerivedRecord {
                key: key("Count", &[("StreamRate", 1000)]),
                stream_rate_tuples_per_sec: Some(1_000_000.0),
                processing_rate_tuples_per_sec: 14_000.0,
            },
            DerivedRecord {
                key: key("Center", &[]),
                stream_rate_tuples_per_sec: None,
                processing_rate_tuples_per_sec: 0.5,
            },
        ];

        let csv = derived_to_csv(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "benchmark,StreamRate,stream_rate_tuples_per_sec,processing_rate_tuples_per_sec"
        );
        assert_eq!(lines[1], "Count,1000,1000000,14000");
        assert_eq!(lines[2], "Center,,,0.5");
    }

    #[test]
    fn test_writer_output_matches_string() {
        let records = vec![DerivedRecord {
            key: key("Count", &[("StreamRate", 2)]),
            stream_rate_tuples_per_sec: Some(500_000_000.0),
            processing_rate_tuples_per_sec: 7.0,
        }];

        let mut buffer = Vec::new();
        derived_to_csv_writer(&records, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), derived_to_csv(&records).unwrap());
    }

    #[test]
    fn test_quote_style_always() {
        let records = vec![agg(key("Count", &[]), &[(MetricName::Latency, 1.0)], 1)];
        let config = ToCsvConfig {
            quote_style: csv::QuoteStyle::Always,
            include_headers: false,
            ..Default::default()
        };
        let csv = aggregated_to_csv_with_config(&records, config).unwrap();
        assert_eq!(csv, "\"Count\",\"1\",\"1\"\n");
    }
}
