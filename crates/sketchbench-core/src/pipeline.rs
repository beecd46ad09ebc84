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

//! End-to-end pipeline over named sources.
//!
//! Sources are parsed one after another, each to completion. Aggregation runs
//! once over the union of their records, then rates are derived. Each group is
//! derived with the inter-arrival unit of the sources its records came from;
//! a group fed by sources with different units is skipped with
//! [`SkipReason::MixedInterArrivalUnits`].

use crate::aggregate::{aggregate, AggregatedRecord, GroupKey, Observation};
use crate::error::{BenchError, Result};
use crate::limits::ParseOptions;
use crate::rates::{derive_with_config, Derivation, DerivationReport, InterArrivalUnit, RateConfig, SkipReason};
use crate::record::MeasurementRecord;
use crate::report::ParseStats;
use crate::source::{load_sources, InputSource};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Per-source result of a pipeline run.
#[derive(Debug)]
pub struct SourceOutcome {
    /// Source name.
    pub name: String,
    /// Line counters, or the error that stopped this source.
    pub result: std::result::Result<ParseStats, BenchError>,
}

/// Output of a pipeline run.
#[derive(Debug, Default)]
pub struct PipelineOutput {
    /// One entry per input source, in input order.
    pub sources: Vec<SourceOutcome>,
    /// Metadata headers of all sources; later sources win on conflicts.
    pub metadata: BTreeMap<String, String>,
    /// Footnotes of all sources, in order.
    pub footnotes: Vec<String>,
    /// Every parsed record.
    pub records: Vec<MeasurementRecord>,
    /// Aggregated groups, sorted.
    pub aggregated: Vec<AggregatedRecord>,
    /// Derived rates and skipped groups, sorted.
    pub derived: DerivationReport,
}

impl PipelineOutput {
    /// Sources that could not be read.
    pub fn failed_sources(&self) -> impl Iterator<Item = (&str, &BenchError)> {
        self.sources
            .iter()
            .filter_map(|s| s.result.as_ref().err().map(|e| (s.name.as_str(), e)))
    }

    /// Combined line counters of the readable sources.
    pub fn total_stats(&self) -> ParseStats {
        let mut total = ParseStats::default();
        for stats in self.sources.iter().filter_map(|s| s.result.as_ref().ok()) {
            total.merge(stats);
        }
        total
    }
}

/// Parse → aggregate → derive, configured once.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    /// Reader options.
    pub options: ParseOptions,
    /// Rate derivation settings. `inter_arrival_unit` is ignored; each
    /// group uses the unit declared by its sources.
    pub rates: RateConfig,
}

impl Pipeline {
    /// Create a pipeline.
    pub fn new(options: ParseOptions, rates: RateConfig) -> Self {
        Self { options, rates }
    }

    /// Run the pipeline over `sources`.
    ///
    /// # Errors
    ///
    /// Unreadable sources are reported in [`PipelineOutput::sources`] and do
    /// not fail the run. Returns [`BenchError::MissingLatencyMetric`] when a
    /// group cannot be derived.
    pub fn run(&self, sources: &[InputSource]) -> Result<PipelineOutput> {
        let mut output = PipelineOutput::default();
        let mut units: BTreeMap<GroupKey, BTreeSet<InterArrivalUnit>> = BTreeMap::new();

        for (source, (name, result)) in sources.iter().zip(load_sources(sources, &self.options)) {
            match result {
                Ok(report) => {
                    output.metadata.extend(report.metadata);
                    output.footnotes.extend(report.footnotes);
                    for record in &report.records {
                        units
                            .entry(record.group_key())
                            .or_default()
                            .insert(source.inter_arrival_unit);
                    }
                    output.records.extend(report.records);
                    output.sources.push(SourceOutcome {
                        name,
                        result: Ok(report.stats),
                    });
                }
                Err(err) => output.sources.push(SourceOutcome {
                    name,
                    result: Err(err),
                }),
            }
        }

        output.aggregated = aggregate(&output.records);

        for agg in &output.aggregated {
            let unit = match units.get(&agg.key) {
                Some(set) if set.len() > 1 => {
                    debug!(group = %agg.key, "sources disagree on the inter-arrival unit");
                    output
                        .derived
                        .skipped
                        .push((agg.key.clone(), SkipReason::MixedInterArrivalUnits));
                    continue;
                }
                Some(set) => set.first().copied().unwrap_or_default(),
                None => InterArrivalUnit::default(),
            };

            let config = RateConfig {
                inter_arrival_unit: unit,
                ..self.rates.clone()
            };
            match derive_with_config(agg, &config)? {
                Derivation::Derived(record) => output.derived.records.push(record),
                Derivation::Skipped(reason) => {
                    debug!(group = %agg.key, %reason, "skipping group");
                    output.derived.skipped.push((agg.key.clone(), reason));
                }
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_report(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn test_union_of_sources_is_aggregated() {
        let a = temp_report("X/StreamRate:_100-4 100.0m\n");
        let b = temp_report("X/StreamRate:_100-4 300.0m\n");
        let pipeline = Pipeline::new(ParseOptions::default(), RateConfig::new(1000.0));
        let out = pipeline
            .run(&[InputSource::new("a", a.path()), InputSource::new("b", b.path())])
            .unwrap();

        assert_eq!(out.records.len(), 2);
        assert_eq!(out.aggregated.len(), 1);
        assert_eq!(out.aggregated[0].sample_count, 2);
        assert_eq!(out.aggregated[0].latency_ms(), Some(200.0));
        assert_eq!(out.derived.records[0].processing_rate_tuples_per_sec, 5000.0);
    }

    #[test]
    fn test_source_order_does_not_change_output() {
        let a = temp_report("X/StreamRate:_100-4 100.0m\nY/StreamRate:_5-4 1.0m\n");
        let b = temp_report("X/StreamRate:_200-4 300.0m\n");
        let pipeline = Pipeline::default();
        let forward = pipeline
            .run(&[InputSource::new("a", a.path()), InputSource::new("b", b.path())])
            .unwrap();
        let backward = pipeline
            .run(&[InputSource::new("b", b.path()), InputSource::new("a", a.path())])
            .unwrap();
        assert_eq!(forward.aggregated, backward.aggregated);
        assert_eq!(forward.derived, backward.derived);
    }

    #[test]
    fn test_failed_source_does_not_stop_others() {
        let good = temp_report("X/StreamRate:_100-4 100.0m\n");
        let out = Pipeline::default()
            .run(&[
                InputSource::new("missing", "/nonexistent/report"),
                InputSource::new("good", good.path()),
            ])
            .unwrap();
        let failed: Vec<&str> = out.failed_sources().map(|(name, _)| name).collect();
        assert_eq!(failed, vec!["missing"]);
        assert_eq!(out.aggregated.len(), 1);
        assert_eq!(out.total_stats().records, 1);
    }

    #[test]
    fn test_per_source_inter_arrival_unit() {
        let ns = temp_report("X/StreamRate:_1000-4 1.0m\n");
        let us = temp_report("Y/StreamRate:_1000-4 1.0m\n");
        let mut micro = InputSource::new("us", us.path());
        micro.inter_arrival_unit = InterArrivalUnit::Microseconds;

        let out = Pipeline::default()
            .run(&[InputSource::new("ns", ns.path()), micro])
            .unwrap();
        let rates: Vec<Option<f64>> = out
            .derived
            .records
            .iter()
            .map(|r| r.stream_rate_tuples_per_sec)
            .collect();
        assert_eq!(rates, vec![Some(1_000_000.0), Some(1_000.0)]);
    }

    #[test]
    fn test_mixed_units_give_one_group_and_no_rates() {
        let ns = temp_report("X/StreamRate:_100-4 100.0m\n");
        let us = temp_report("X/StreamRate:_100-4 300.0m\n");
        let mut micro = InputSource::new("us", us.path());
        micro.inter_arrival_unit = InterArrivalUnit::Microseconds;

        let out = Pipeline::default()
            .run(&[InputSource::new("ns", ns.path()), micro])
            .unwrap();
        assert_eq!(out.aggregated.len(), 1);
        assert_eq!(out.aggregated[0].sample_count, 2);
        assert_eq!(out.aggregated[0].latency_ms(), Some(200.0));
        assert!(out.derived.records.is_empty());
        assert_eq!(out.derived.skipped[0].1, SkipReason::MixedInterArrivalUnits);
    }

    #[test]
    fn test_source_unit_overrides_config_unit() {
        let file = temp_report("X/StreamRate:_1000-4 1.0m\n");
        let config = RateConfig::new(1.0).with_inter_arrival("StreamRate", InterArrivalUnit::Microseconds);
        let out = Pipeline::new(ParseOptions::default(), config)
            .run(&[InputSource::new("ns", file.path())])
            .unwrap();
        assert_eq!(out.derived.records[0].stream_rate_tuples_per_sec, Some(1_000_000.0));
    }

    #[test]
    fn test_zero_stream_rate_aggregated_but_not_derived() {
        let file = temp_report("X/StreamRate:_0-4 1.0m\nX/StreamRate:_10-4 1.0m\n");
        let out = Pipeline::default()
            .run(&[InputSource::new("f", file.path())])
            .unwrap();
        assert_eq!(out.aggregated.len(), 2);
        assert_eq!(out.derived.records.len(), 1);
        assert_eq!(out.derived.skipped.len(), 1);
    }
}
