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

//! Latency distribution summaries.
//!
//! Paired-line latency reports carry many samples per group. Besides the mean
//! produced by [`crate::aggregate`], these summaries keep the shape of the
//! distribution: quartiles by linear interpolation and Tukey whiskers at
//! 1.5 × IQR.

use crate::aggregate::{GroupKey, Observation};
use crate::record::MeasurementRecord;
use std::collections::BTreeMap;

/// Whisker reach in multiples of the interquartile range.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Five-number summary plus mean, whiskers and outlier count.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LatencySummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
    /// Lowest sample at or above `q1 - 1.5 * iqr`.
    pub lower_whisker: f64,
    /// Highest sample at or below `q3 + 1.5 * iqr`.
    pub upper_whisker: f64,
    /// Samples outside the whiskers.
    pub outliers: usize,
}

/// Percentile of sorted data, `p` in `[0, 1]`, linear interpolation.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

impl LatencySummary {
    /// Summarize samples. Returns `None` for an empty slice or when any
    /// sample is NaN.
    ///
    /// # Examples
    ///
    /// ```
    /// use sketchbench_core::LatencySummary;
    ///
    /// let s = LatencySummary::from_samples(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
    /// assert_eq!(s.median, 3.0);
    /// assert_eq!(s.q1, 2.0);
    /// assert_eq!(s.q3, 4.0);
    /// assert_eq!(s.upper_whisker, 4.0);
    /// assert_eq!(s.outliers, 1);
    /// ```
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() || samples.iter().any(|s| s.is_nan()) {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = percentile(&sorted, 0.25);
        let median = percentile(&sorted, 0.5);
        let q3 = percentile(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR_FACTOR * iqr;
        let high_fence = q3 + WHISKER_IQR_FACTOR * iqr;

        let inside: Vec<f64> = sorted
            .iter()
            .copied()
            .filter(|v| *v >= low_fence && *v <= high_fence)
            .collect();
        let lower_whisker = inside.first().copied().unwrap_or(q1);
        let upper_whisker = inside.last().copied().unwrap_or(q3);
        let outliers = sorted.len() - inside.len();

        Some(Self {
            count: sorted.len(),
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

/// Summarize the latency samples of every group, sorted by [`GroupKey`].
pub fn summarize_groups(records: &[MeasurementRecord]) -> Vec<(GroupKey, LatencySummary)> {
    let mut groups: BTreeMap<GroupKey, Vec<f64>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.group_key())
            .or_default()
            .push(record.latency_ms());
    }

    groups
        .into_iter()
        .filter_map(|(key, samples)| LatencySummary::from_samples(&samples).map(|s| (key, s)))
        .collect()
}
