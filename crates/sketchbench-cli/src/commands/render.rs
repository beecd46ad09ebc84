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

//! Table rendering shared by the report commands.

use crate::cli::OutputFormat;
use crate::error::CliError;
use sketchbench_core::{AggregatedRecord, DerivedRecord, MetricName};
use sketchbench_csv::{aggregated_to_csv, derived_to_csv};
use sketchbench_latex::{to_longtable, LatexConfig};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Render aggregated groups.
pub(crate) fn render_aggregated(
    records: &[AggregatedRecord],
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Csv => Ok(aggregated_to_csv(records)?),
        OutputFormat::Text => {
            let mut out = String::new();
            for record in records {
                let _ = writeln!(
                    out,
                    "{}  n={}  {}",
                    record.key,
                    record.sample_count,
                    format_metrics(&record.averaged_metrics)
                );
            }
            Ok(out)
        }
        OutputFormat::Latex => Err(CliError::invalid_input(
            "LaTeX output needs derived rates; use the rates command",
        )),
    }
}

/// Render derived rates.
pub(crate) fn render_derived(
    records: &[DerivedRecord],
    metadata: &BTreeMap<String, String>,
    format: OutputFormat,
    caption: &str,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Csv => Ok(derived_to_csv(records)?),
        OutputFormat::Latex => {
            let config = LatexConfig {
                caption_subject: caption.to_string(),
                ..Default::default()
            };
            let mut table = to_longtable(records, metadata, &config)?;
            table.push('\n');
            Ok(table)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for record in records {
                let stream = record
                    .stream_rate_tuples_per_sec
                    .map(|r| format!("{:.3}", r))
                    .unwrap_or_else(|| "-".to_string());
                let _ = writeln!(
                    out,
                    "{}  stream_rate={}  processing_rate={:.3}",
                    record.key, stream, record.processing_rate_tuples_per_sec
                );
            }
            Ok(out)
        }
    }
}

/// `name=value` pairs in column order.
pub(crate) fn format_metrics(metrics: &BTreeMap<MetricName, f64>) -> String {
    metrics
        .iter()
        .map(|(name, value)| format!("{}={}", name.as_str(), value))
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchbench_core::GroupKey;

    fn agg() -> AggregatedRecord {
        AggregatedRecord {
            key: GroupKey::new("Count", vec![("StreamRate".to_string(), 500)]),
            averaged_metrics: BTreeMap::from([(MetricName::Latency, 150.0)]),
            sample_count: 2,
        }
    }

    #[test]
    fn test_aggregated_text() {
        let text = render_aggregated(&[agg()], OutputFormat::Text).unwrap();
        assert_eq!(text, "Count/StreamRate=500  n=2  latency_ms=150\n");
    }

    #[test]
    fn test_aggregated_latex_rejected() {
        let err = render_aggregated(&[agg()], OutputFormat::Latex).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }

    #[test]
    fn test_derived_text_without_stream_rate() {
        let records = vec![DerivedRecord {
            key: GroupKey::new("Center", Vec::new()),
            stream_rate_tuples_per_sec: None,
            processing_rate_tuples_per_sec: 12.5,
        }];
        let text = render_derived(&records, &BTreeMap::new(), OutputFormat::Text, "Throughput").unwrap();
        assert_eq!(text, "Center  stream_rate=-  processing_rate=12.500\n");
    }
}
