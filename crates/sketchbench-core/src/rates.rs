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

//! Rate derivation from aggregated records.
//!
//! Two rates are derived per group:
//!
//! - **Stream rate**: `per_second / inter_arrival`, where the inter-arrival
//!   time is read from a group parameter (`StreamRate` by default) in
//!   nanoseconds or microseconds.
//! - **Processing rate**: `workload_size / latency_ms * 1000`, multiplied by
//!   `units_per_second_factor` and optionally by the value of a group
//!   parameter such as `Clients`.
//!
//! A zero or negative inter-arrival time or a zero latency skips the group
//! instead of dividing by zero. The workload size and scaling are caller configuration;
//! nothing is inferred from the data.

use crate::aggregate::{AggregatedRecord, GroupKey};
use crate::error::{BenchError, Result};
use std::fmt;
use tracing::debug;

/// Default name of the inter-arrival-time parameter.
pub const DEFAULT_INTER_ARRIVAL_PARAM: &str = "StreamRate";

/// Unit of the inter-arrival-time parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InterArrivalUnit {
    #[default]
    Nanoseconds,
    Microseconds,
}

impl InterArrivalUnit {
    /// Number of units in one second.
    pub fn per_second(self) -> f64 {
        match self {
            Self::Nanoseconds => 1e9,
            Self::Microseconds => 1e6,
        }
    }
}

/// Configuration for rate derivation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RateConfig {
    /// Work performed by one benchmark operation, in tuples (default: 1).
    pub workload_size: f64,
    /// Extra multiplier applied to the processing rate (default: 1).
    pub units_per_second_factor: f64,
    /// Parameter holding the inter-arrival time (default: `StreamRate`).
    pub inter_arrival_param: String,
    /// Unit of the inter-arrival parameter (default: nanoseconds).
    ///
    /// [`Pipeline`](crate::Pipeline) ignores this field and uses the unit
    /// declared by each [`InputSource`](crate::InputSource).
    pub inter_arrival_unit: InterArrivalUnit,
    /// Parameter whose value multiplies the processing rate, e.g. `Clients`.
    pub scale_by_param: Option<String>,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            workload_size: 1.0,
            units_per_second_factor: 1.0,
            inter_arrival_param: DEFAULT_INTER_ARRIVAL_PARAM.to_string(),
            inter_arrival_unit: InterArrivalUnit::Nanoseconds,
            scale_by_param: None,
        }
    }
}

impl RateConfig {
    /// Config with the given workload size and defaults elsewhere.
    pub fn new(workload_size: f64) -> Self {
        Self {
            workload_size,
            ..Default::default()
        }
    }

    /// Set the processing-rate multiplier.
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.units_per_second_factor = factor;
        self
    }

    /// Multiply the processing rate by the value of `param`.
    pub fn with_scale_by(mut self, param: impl Into<String>) -> Self {
        self.scale_by_param = Some(param.into());
        self
    }

    /// Use a different inter-arrival parameter and unit.
    pub fn with_inter_arrival(mut self, param: impl Into<String>, unit: InterArrivalUnit) -> Self {
        self.inter_arrival_param = param.into();
        self.inter_arrival_unit = unit;
        self
    }
}

/// Derived rates of one group.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DerivedRecord {
    /// Group identity.
    pub key: GroupKey,
    /// Arrival rate in tuples per second; `None` when the group has no
    /// inter-arrival parameter.
    pub stream_rate_tuples_per_sec: Option<f64>,
    /// Processing rate in tuples per second.
    pub processing_rate_tuples_per_sec: f64,
}

/// Why a group produced no derived record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The inter-arrival parameter is zero or negative.
    NonPositiveInterArrival(i64),
    /// The averaged latency is zero.
    ZeroLatency,
    /// The configured scaling parameter is absent from the group.
    MissingScaleParam(String),
    /// The group's records come from sources with different inter-arrival units.
    MixedInterArrivalUnits,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveInterArrival(value) => {
                write!(f, "inter-arrival time {} is not positive", value)
            }
            Self::ZeroLatency => write!(f, "averaged latency is zero"),
            Self::MissingScaleParam(param) => write!(f, "scaling parameter '{}' is missing", param),
            Self::MixedInterArrivalUnits => write!(f, "sources disagree on the inter-arrival unit"),
        }
    }
}

/// Outcome of deriving rates for one group.
#[derive(Debug, Clone, PartialEq)]
pub enum Derivation {
    Derived(DerivedRecord),
    Skipped(SkipReason),
}

impl Derivation {
    /// The derived record, if any.
    pub fn into_record(self) -> Option<DerivedRecord> {
        match self {
            Self::Derived(record) => Some(record),
            Self::Skipped(_) => None,
        }
    }
}

/// Derive rates with a workload size and multiplier, other settings default.
///
/// # Errors
///
/// Returns [`BenchError::MissingLatencyMetric`] when the group has no
/// averaged latency.
pub fn derive(agg: &AggregatedRecord, workload_size: u64, units_per_second_factor: f64) -> Result<Derivation> {
    derive_with_config(
        agg,
        &RateConfig::new(workload_size as f64).with_factor(units_per_second_factor),
    )
}

/// Derive rates for one group.
///
/// # Errors
///
/// Returns [`BenchError::MissingLatencyMetric`] when the group has no
/// averaged latency.
///
/// # Examples
///
/// ```
/// use sketchbench_core::{derive_with_config, AggregatedRecord, Derivation, GroupKey, MetricName, RateConfig};
/// use std::collections::BTreeMap;
///
/// let agg = AggregatedRecord {
///     key: GroupKey::new("CountThroughput", vec![("StreamRate".to_string(), 1000)]),
///     averaged_metrics: BTreeMap::from([(MetricName::Latency, 500.0)]),
///     sample_count: 1,
/// };
///
/// let Derivation::Derived(rates) = derive_with_config(&agg, &RateConfig::new(7000.0)).unwrap() else {
///     panic!("expected rates");
/// };
/// assert_eq!(rates.stream_rate_tuples_per_sec, Some(1_000_000.0));
/// assert_eq!(rates.processing_rate_tuples_per_sec, 14_000.0);
/// ```
pub fn derive_with_config(agg: &AggregatedRecord, config: &RateConfig) -> Result<Derivation> {
    let latency_ms = agg
        .latency_ms()
        .ok_or_else(|| BenchError::MissingLatencyMetric {
            group: agg.key.to_string(),
        })?;

    let stream_rate = match agg.key.param(&config.inter_arrival_param) {
        Some(value) if value <= 0 => {
            return Ok(Derivation::Skipped(SkipReason::NonPositiveInterArrival(value)))
        }
        Some(inter_arrival) => Some(config.inter_arrival_unit.per_second() / inter_arrival as f64),
        None => None,
    };

    if latency_ms == 0.0 {
        return Ok(Derivation::Skipped(SkipReason::ZeroLatency));
    }

    let scale = match &config.scale_by_param {
        Some(param) => match agg.key.param(param) {
            Some(value) => value as f64,
            None => return Ok(Derivation::Skipped(SkipReason::MissingScaleParam(param.clone()))),
        },
        None => 1.0,
    };

    let processing_rate =
        (config.workload_size / latency_ms) * 1000.0 * config.units_per_second_factor * scale;

    Ok(Derivation::Derived(DerivedRecord {
        key: agg.key.clone(),
        stream_rate_tuples_per_sec: stream_rate,
        processing_rate_tuples_per_sec: processing_rate,
    }))
}

/// Derived records of a batch plus the groups that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivationReport {
    /// Derived records in group order.
    pub records: Vec<DerivedRecord>,
    /// Groups that were skipped, with the reason.
    pub skipped: Vec<(GroupKey, SkipReason)>,
}

/// Derive rates for every group.
///
/// # Errors
///
/// Stops at the first group without a latency metric and returns
/// [`BenchError::MissingLatencyMetric`].
pub fn derive_all(aggs: &[AggregatedRecord], config: &RateConfig) -> Result<DerivationReport> {
    let mut report = DerivationReport::default();

    for agg in aggs {
        match derive_with_config(agg, config)? {
            Derivation::Derived(record) => report.records.push(record),
            Derivation::Skipped(reason) => {
                debug!(group = %agg.key, %reason, "skipping group");
                report.skipped.push((agg.key.clone(), reason));
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MetricName;
    use std::collections::BTreeMap;

    fn agg(params: &[(&str, i64)], latency_ms: Option<f64>) -> AggregatedRecord {
        let mut averaged_metrics = BTreeMap::new();
        if let Some(latency) = latency_ms {
            averaged_metrics.insert(MetricName::Latency, latency);
        }
        AggregatedRecord {
            key: GroupKey::new("Bench", params.iter().map(|(k, v)| (k.to_string(), *v))),
            averaged_metrics,
            sample_count: 1,
        }
    }

    fn derived(d: Derivation) -> DerivedRecord {
        d.into_record().expect("expected derived record")
    }

    // ==================== Stream rate ====================

    #[test]
    fn test_stream_rate_nanoseconds() {
        let d = derived(derive(&agg(&[("StreamRate", 4780)], Some(924.4)), 7000, 1.0).unwrap());
        let expected = 1e9 / 4780.0;
        assert!((d.stream_rate_tuples_per_sec.unwrap() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_stream_rate_microseconds() {
        let config = RateConfig::new(1.0).with_inter_arrival("Gap", InterArrivalUnit::Microseconds);
        let d = derived(derive_with_config(&agg(&[("Gap", 4)], Some(1.0)), &config).unwrap());
        assert_eq!(d.stream_rate_tuples_per_sec, Some(250_000.0));
    }

    #[test]
    fn test_zero_inter_arrival_skipped() {
        let out = derive(&agg(&[("StreamRate", 0)], Some(10.0)), 7000, 1.0).unwrap();
        assert_eq!(out, Derivation::Skipped(SkipReason::NonPositiveInterArrival(0)));
    }

    #[test]
    fn test_negative_inter_arrival_skipped() {
        let out = derive(&agg(&[("StreamRate", -5)], Some(1.0)), 1000, 1.0).unwrap();
        assert_eq!(out, Derivation::Skipped(SkipReason::NonPositiveInterArrival(-5)));
    }

    #[test]
    fn test_missing_inter_arrival_gives_no_stream_rate() {
        let d = derived(derive(&agg(&[("MergeRate", 100)], Some(10.0)), 1000, 1.0).unwrap());
        assert_eq!(d.stream_rate_tuples_per_sec, None);
        assert_eq!(d.processing_rate_tuples_per_sec, 100_000.0);
    }

    // ==================== Processing rate ====================

    #[test]
    fn test_processing_rate_formula() {
        let d = derived(derive(&agg(&[("StreamRate", 1)], Some(500.0)), 7000, 1.0).unwrap());
        assert_eq!(d.processing_rate_tuples_per_sec, 14_000.0);
    }

    #[test]
    fn test_processing_rate_factor_and_scale() {
        let config = RateConfig::new(14_000.0).with_factor(2.0).with_scale_by("Clients");
        let d = derived(
            derive_with_config(&agg(&[("Clients", 5), ("StreamRate", 200)], Some(1000.0)), &config)
                .unwrap(),
        );
        assert_eq!(d.processing_rate_tuples_per_sec, 14_000.0 * 2.0 * 5.0);
    }

    #[test]
    fn test_missing_scale_param_skipped() {
        let config = RateConfig::new(1.0).with_scale_by("Clients");
        let out = derive_with_config(&agg(&[("StreamRate", 5)], Some(1.0)), &config).unwrap();
        assert_eq!(
            out,
            Derivation::Skipped(SkipReason::MissingScaleParam("Clients".to_string()))
        );
    }

    #[test]
    fn test_zero_latency_skipped() {
        let out = derive(&agg(&[("StreamRate", 5)], Some(0.0)), 1, 1.0).unwrap();
        assert_eq!(out, Derivation::Skipped(SkipReason::ZeroLatency));
    }

    // ==================== Errors ====================

    #[test]
    fn test_missing_latency_is_error() {
        let err = derive(&agg(&[("StreamRate", 5)], None), 1, 1.0).unwrap_err();
        assert!(matches!(err, BenchError::MissingLatencyMetric { .. }));
    }

    #[test]
    fn test_derive_all_collects_skips() {
        let aggs = vec![
            agg(&[("StreamRate", 0)], Some(1.0)),
            agg(&[("StreamRate", 10)], Some(1.0)),
        ];
        let report = derive_all(&aggs, &RateConfig::new(1.0)).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].1, SkipReason::NonPositiveInterArrival(0));
    }

    #[test]
    fn test_derive_all_surfaces_missing_latency() {
        let aggs = vec![agg(&[("StreamRate", 10)], None)];
        assert!(derive_all(&aggs, &RateConfig::default()).is_err());
    }
}
