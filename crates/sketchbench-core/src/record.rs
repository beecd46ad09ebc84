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

//! Measurement records built from tokenized report lines.

use crate::error::{BenchError, Result};
use crate::tokenizer::ParsedToken;
use crate::units::{normalize_to_milliseconds, parse_count};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::fmt;

/// Name of a metric carried by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MetricName {
    /// Time per operation, in milliseconds.
    #[cfg_attr(feature = "serde", serde(rename = "latency_ms"))]
    Latency,
    /// Iteration count reported by the harness.
    #[cfg_attr(feature = "serde", serde(rename = "iterations"))]
    Iterations,
    /// Bytes allocated per operation.
    #[cfg_attr(feature = "serde", serde(rename = "bytes_per_op"))]
    BytesPerOp,
    /// Allocations per operation.
    #[cfg_attr(feature = "serde", serde(rename = "allocs_per_op"))]
    AllocsPerOp,
}

impl MetricName {
    /// All metric names in column order.
    pub const ALL: [MetricName; 4] = [
        MetricName::Latency,
        MetricName::Iterations,
        MetricName::BytesPerOp,
        MetricName::AllocsPerOp,
    ];

    /// Column-friendly name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Latency => "latency_ms",
            Self::Iterations => "iterations",
            Self::BytesPerOp => "bytes_per_op",
            Self::AllocsPerOp => "allocs_per_op",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The metric layout of a record, one variant per report variant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "shape", rename_all = "snake_case"))]
pub enum RecordShape {
    /// One timing field (benchstat summaries).
    SimpleTiming {
        /// Time per operation in milliseconds.
        latency_ms: f64,
    },
    /// Raw `go test -bench` output with memory statistics.
    Detailed {
        /// Iterations run.
        iterations: u64,
        /// Time per operation in milliseconds.
        latency_ms: f64,
        /// Bytes allocated per operation.
        bytes_per_op: u64,
        /// Allocations per operation.
        allocs_per_op: u64,
    },
    /// One latency sample from a paired-line latency report.
    Sample {
        /// Sample latency in milliseconds.
        latency_ms: f64,
    },
}

impl RecordShape {
    /// Time per operation in milliseconds.
    pub fn latency_ms(&self) -> f64 {
        match self {
            Self::SimpleTiming { latency_ms }
            | Self::Detailed { latency_ms, .. }
            | Self::Sample { latency_ms } => *latency_ms,
        }
    }

    /// Metrics as a name → value map.
    ///
    /// Counts are widened to `f64` so they can be averaged.
    pub fn metrics(&self) -> BTreeMap<MetricName, f64> {
        let mut map = BTreeMap::new();
        match *self {
            Self::SimpleTiming { latency_ms } | Self::Sample { latency_ms } => {
                map.insert(MetricName::Latency, latency_ms);
            }
            Self::Detailed {
                iterations,
                latency_ms,
                bytes_per_op,
                allocs_per_op,
            } => {
                map.insert(MetricName::Iterations, iterations as f64);
                map.insert(MetricName::Latency, latency_ms);
                map.insert(MetricName::BytesPerOp, bytes_per_op as f64);
                map.insert(MetricName::AllocsPerOp, allocs_per_op as f64);
            }
        }
        map
    }
}

/// One parsed measurement.
///
/// Parameter keys are unique and keep their order of appearance on the line.
/// Records are immutable once built.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MeasurementRecord {
    benchmark_name: String,
    params: IndexMap<String, i64>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    shape: RecordShape,
}

impl MeasurementRecord {
    /// Create a record, rejecting repeated parameter keys.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::DuplicateParameter`] if a key appears twice.
    pub fn new(
        benchmark_name: impl Into<String>,
        params: impl IntoIterator<Item = (String, i64)>,
        shape: RecordShape,
    ) -> Result<Self> {
        let mut map = IndexMap::new();
        for (key, value) in params {
            if map.contains_key(&key) {
                return Err(BenchError::DuplicateParameter { key });
            }
            map.insert(key, value);
        }

        Ok(Self {
            benchmark_name: benchmark_name.into(),
            params: map,
            shape,
        })
    }

    /// Benchmark name.
    pub fn benchmark_name(&self) -> &str {
        &self.benchmark_name
    }

    /// Parameters in order of appearance.
    pub fn params(&self) -> &IndexMap<String, i64> {
        &self.params
    }

    /// Look up one parameter.
    pub fn param(&self, key: &str) -> Option<i64> {
        self.params.get(key).copied()
    }

    /// Metric layout.
    pub fn shape(&self) -> &RecordShape {
        &self.shape
    }

    /// Time per operation in milliseconds.
    pub fn latency_ms(&self) -> f64 {
        self.shape.latency_ms()
    }

    /// Metrics as a name → value map.
    pub fn metrics(&self) -> BTreeMap<MetricName, f64> {
        self.shape.metrics()
    }
}

/// Build a [`MeasurementRecord`] from a tokenized line.
///
/// One metric field is a simple timing; four fields are
/// iterations / time / bytes / allocations.
///
/// # Errors
///
/// - [`BenchError::UnknownMetricShape`] for any other field count
/// - [`BenchError::MalformedNumber`] when a field does not parse
/// - [`BenchError::DuplicateParameter`] when a key repeats
///
/// # Examples
///
/// ```
/// use sketchbench_core::{build, tokenize};
///
/// let token = tokenize("CountThroughput/StreamRate:_4810-4         1.033 ±   11%")
///     .unwrap()
///     .unwrap();
/// let record = build(token).unwrap();
/// assert_eq!(record.param("StreamRate"), Some(4810));
/// assert_eq!(record.latency_ms(), 1033.0);
/// ```
pub fn build(token: ParsedToken) -> Result<MeasurementRecord> {
    let shape = match token.raw_metrics.as_slice() {
        [time] => RecordShape::SimpleTiming {
            latency_ms: normalize_to_milliseconds(time)?,
        },
        [iterations, time, bytes, allocs] => RecordShape::Detailed {
            iterations: parse_count(iterations)?,
            latency_ms: normalize_to_milliseconds(time)?,
            bytes_per_op: parse_count(bytes)?,
            allocs_per_op: parse_count(allocs)?,
        },
        other => {
            return Err(BenchError::UnknownMetricShape { count: other.len() });
        }
    };

    MeasurementRecord::new(token.benchmark_name, token.params, shape)
}
