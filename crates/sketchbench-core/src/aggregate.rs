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

//! Grouping and averaging of measurement records.
//!
//! Records sharing the same benchmark name and the same full parameter set
//! form a group. Each group yields one [`AggregatedRecord`] whose metrics are
//! the arithmetic means of the members' metrics. Output is sorted by
//! [`GroupKey`], so it does not depend on input order.

use crate::record::{MeasurementRecord, MetricName};
use std::collections::BTreeMap;
use std::fmt;

/// Identity under which repeated measurements are averaged.
///
/// Parameters are sorted by key, so two records that list the same
/// parameters in a different order share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GroupKey {
    benchmark_name: String,
    params: Vec<(String, i64)>,
}

impl GroupKey {
    /// Create a key. Parameters are sorted here.
    pub fn new(benchmark_name: impl Into<String>, params: impl IntoIterator<Item = (String, i64)>) -> Self {
        let mut params: Vec<(String, i64)> = params.into_iter().collect();
        params.sort();
        Self {
            benchmark_name: benchmark_name.into(),
            params,
        }
    }

    /// Benchmark name.
    pub fn benchmark_name(&self) -> &str {
        &self.benchmark_name
    }

    /// Sorted `(key, value)` pairs.
    pub fn params(&self) -> &[(String, i64)] {
        &self.params
    }

    /// Look up one parameter.
    pub fn param(&self, key: &str) -> Option<i64> {
        self.params
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
            .ok()
            .map(|idx| self.params[idx].1)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.benchmark_name)?;
        for (i, (key, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '/' } else { ',' };
            write!(f, "{}{}={}", sep, key, value)?;
        }
        Ok(())
    }
}

/// Anything the aggregator can fold: a group identity plus named metrics.
pub trait Observation {
    /// The group this observation belongs to.
    fn group_key(&self) -> GroupKey;

    /// Metric values of this observation.
    fn metric_values(&self) -> BTreeMap<MetricName, f64>;
}

impl Observation for MeasurementRecord {
    fn group_key(&self) -> GroupKey {
        GroupKey::new(
            self.benchmark_name(),
            self.params().iter().map(|(k, v)| (k.clone(), *v)),
        )
    }

    fn metric_values(&self) -> BTreeMap<MetricName, f64> {
        self.metrics()
    }
}

/// Averaged metrics of one group.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AggregatedRecord {
    /// Group identity.
    pub key: GroupKey,
    /// Mean of each metric present in every member.
    pub averaged_metrics: BTreeMap<MetricName, f64>,
    /// Number of observations folded into this record (≥ 1).
    pub sample_count: usize,
}

impl AggregatedRecord {
    /// Averaged latency in milliseconds, if every member carried one.
    pub fn latency_ms(&self) -> Option<f64> {
        self.averaged_metrics.get(&MetricName::Latency).copied()
    }
}

/// An aggregated record re-enters the aggregator as one observation.
impl Observation for AggregatedRecord {
    fn group_key(&self) -> GroupKey {
        self.key.clone()
    }

    fn metric_values(&self) -> BTreeMap<MetricName, f64> {
        self.averaged_metrics.clone()
    }
}

#[derive(Default)]
struct GroupAccumulator {
    members: usize,
    sums: BTreeMap<MetricName, (f64, usize)>,
}

impl GroupAccumulator {
    fn add(&mut self, metrics: BTreeMap<MetricName, f64>) {
        self.members += 1;
        for (name, value) in metrics {
            let entry = self.sums.entry(name).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    fn finish(self, key: GroupKey) -> AggregatedRecord {
        let members = self.members;
        let averaged_metrics = self
            .sums
            .into_iter()
            .filter(|(_, (_, count))| *count == members)
            .map(|(name, (sum, count))| (name, sum / count as f64))
            .collect();

        AggregatedRecord {
            key,
            averaged_metrics,
            sample_count: members,
        }
    }
}

/// Group observations by [`GroupKey`] and average their metrics.
///
/// A metric missing from some members of a group is dropped from that
/// group's averages. An empty input yields an empty output.
///
/// # Examples
///
/// ```
/// use sketchbench_core::{aggregate, MeasurementRecord, RecordShape};
///
/// let params = || vec![("Clients".to_string(), 10), ("StreamRate".to_string(), 500)];
/// let records = vec![
///     MeasurementRecord::new("Sys", params(), RecordShape::SimpleTiming { latency_ms: 100.0 }).unwrap(),
///     MeasurementRecord::new("Sys", params(), RecordShape::SimpleTiming { latency_ms: 200.0 }).unwrap(),
/// ];
///
/// let groups = aggregate(&records);
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].sample_count, 2);
/// assert_eq!(groups[0].latency_ms(), Some(150.0));
/// ```
pub fn aggregate<O: Observation>(records: &[O]) -> Vec<AggregatedRecord> {
    let mut groups: BTreeMap<GroupKey, GroupAccumulator> = BTreeMap::new();

    for record in records {
        groups
            .entry(record.group_key())
            .or_default()
            .add(record.metric_values());
    }

    groups
        .into_iter()
        .map(|(key, acc)| acc.finish(key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordShape;

    fn simple(name: &str, params: &[(&str, i64)], latency_ms: f64) -> MeasurementRecord {
        MeasurementRecord::new(
            name,
            params.iter().map(|(k, v)| (k.to_string(), *v)),
            RecordShape::SimpleTiming { latency_ms },
        )
        .unwrap()
    }

    fn detailed(name: &str, params: &[(&str, i64)], latency_ms: f64) -> MeasurementRecord {
        MeasurementRecord::new(
            name,
            params.iter().map(|(k, v)| (k.to_string(), *v)),
            RecordShape::Detailed {
                iterations: 1,
                latency_ms,
                bytes_per_op: 100,
                allocs_per_op: 10,
            },
        )
        .unwrap()
    }

    // ==================== GroupKey tests ====================

    #[test]
    fn test_group_key_sorts_params() {
        let a = GroupKey::new("X", vec![("B".to_string(), 2), ("A".to_string(), 1)]);
        let b = GroupKey::new("X", vec![("A".to_string(), 1), ("B".to_string(), 2)]);
        assert_eq!(a, b);
        assert_eq!(a.param("B"), Some(2));
        assert_eq!(a.param("C"), None);
    }

    #[test]
    fn test_group_key_display() {
        let key = GroupKey::new("Count", vec![("StreamRate".to_string(), 500), ("Clients".to_string(), 4)]);
        assert_eq!(key.to_string(), "Count/Clients=4,StreamRate=500");
        assert_eq!(GroupKey::new("Bare", Vec::new()).to_string(), "Bare");
    }

    // ==================== Aggregation tests ====================

    #[test]
    fn test_empty_input() {
        let records: Vec<MeasurementRecord> = Vec::new();
        assert!(aggregate(&records).is_empty());
    }

    #[test]
    fn test_average_of_identical_params() {
        let p = [("Clients", 10), ("MergeRate", 1000), ("StreamRate", 500)];
        let records = vec![simple("Sys", &p, 100.0), simple("Sys", &p, 200.0)];
        let groups = aggregate(&records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].sample_count, 2);
        assert_eq!(groups[0].latency_ms(), Some(150.0));
    }

    #[test]
    fn test_param_order_does_not_split_groups() {
        let records = vec![
            simple("Sys", &[("A", 1), ("B", 2)], 1.0),
            simple("Sys", &[("B", 2), ("A", 1)], 3.0),
        ];
        let groups = aggregate(&records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].latency_ms(), Some(2.0));
    }

    #[test]
    fn test_subset_params_are_distinct_groups() {
        let records = vec![
            simple("Sys", &[("A", 1)], 1.0),
            simple("Sys", &[("A", 1), ("B", 2)], 3.0),
        ];
        assert_eq!(aggregate(&records).len(), 2);
    }

    #[test]
    fn test_output_sorted_regardless_of_input_order() {
        let records = vec![
            simple("Kll", &[("StreamRate", 10)], 1.0),
            simple("Count", &[("StreamRate", 20)], 1.0),
            simple("Count", &[("StreamRate", 10)], 1.0),
        ];
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = aggregate(&records);
        let backward = aggregate(&reversed);
        assert_eq!(forward, backward);

        let names: Vec<String> = forward.iter().map(|g| g.key.to_string()).collect();
        assert_eq!(
            names,
            vec!["Count/StreamRate=10", "Count/StreamRate=20", "Kll/StreamRate=10"]
        );
    }

    #[test]
    fn test_partial_metrics_dropped() {
        let p = [("A", 1)];
        let records = vec![detailed("Sys", &p, 10.0), simple("Sys", &p, 20.0)];
        let groups = aggregate(&records);
        assert_eq!(groups.len(), 1);
        let metrics = &groups[0].averaged_metrics;
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[&MetricName::Latency], 15.0);
    }

    #[test]
    fn test_reaggregating_equal_sized_groups() {
        let p1 = [("A", 1)];
        let p2 = [("A", 2)];
        let records = vec![
            simple("S", &p1, 1.0),
            simple("S", &p1, 3.0),
            simple("S", &p2, 5.0),
            simple("S", &p2, 9.0),
        ];
        let once = aggregate(&records);
        let twice = aggregate(&once);
        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(&twice) {
            assert_eq!(a.key, b.key);
            assert_eq!(a.averaged_metrics, b.averaged_metrics);
            assert_eq!(b.sample_count, 1);
        }
    }
}
