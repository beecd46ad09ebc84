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

//! Frequency analysis of item streams.

use std::collections::HashMap;

/// Item counts sorted by descending count, ties by ascending item id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: Vec<(u64, u64)>,
    total: u64,
}

impl FrequencyTable {
    /// Count the items of a stream.
    ///
    /// # Examples
    ///
    /// ```
    /// use sketchbench_zipf::FrequencyTable;
    ///
    /// let table = FrequencyTable::from_items(&[4, 1, 4, 2, 1, 4]);
    /// assert_eq!(table.top_k(2), &[(4, 3), (1, 2)]);
    /// assert_eq!(table.share_of_top(1), 50.0);
    /// ```
    pub fn from_items(items: &[u64]) -> Self {
        let mut map: HashMap<u64, u64> = HashMap::new();
        for &item in items {
            *map.entry(item).or_insert(0) += 1;
        }

        let mut counts: Vec<(u64, u64)> = map.into_iter().collect();
        counts.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        Self {
            counts,
            total: items.len() as u64,
        }
    }

    /// Number of items in the stream.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct items.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// The `k` most frequent `(item, count)` pairs.
    pub fn top_k(&self, k: usize) -> &[(u64, u64)] {
        &self.counts[..k.min(self.counts.len())]
    }

    /// Percentage of the stream taken by the `k` most frequent items.
    pub fn share_of_top(&self, k: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let top: u64 = self.top_k(k).iter().map(|(_, count)| count).sum();
        top as f64 / self.total as f64 * 100.0
    }

    /// `(rank, count)` pairs, rank starting at 1.
    pub fn rank_frequency(&self) -> Vec<(usize, u64)> {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, (_, count))| (i + 1, *count))
            .collect()
    }

    /// Running share of the stream covered by the top 1, 2, ... items, in percent.
    pub fn cumulative_percentages(&self) -> Vec<f64> {
        let mut running = 0u64;
        self.counts
            .iter()
            .map(|(_, count)| {
                running += count;
                running as f64 / self.total as f64 * 100.0
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stream() {
        let table = FrequencyTable::from_items(&[]);
        assert_eq!(table.total(), 0);
        assert_eq!(table.distinct(), 0);
        assert!(table.top_k(10).is_empty());
        assert_eq!(table.share_of_top(32), 0.0);
        assert!(table.cumulative_percentages().is_empty());
    }

    #[test]
    fn test_ties_broken_by_item_id() {
        let table = FrequencyTable::from_items(&[9, 3, 7, 3, 9, 7]);
        assert_eq!(table.top_k(3), &[(3, 2), (7, 2), (9, 2)]);
    }

    #[test]
    fn test_top_k_beyond_distinct() {
        let table = FrequencyTable::from_items(&[1, 2]);
        assert_eq!(table.top_k(32).len(), 2);
        assert_eq!(table.share_of_top(32), 100.0);
    }

    #[test]
    fn test_rank_frequency_and_cumulative() {
        let table = FrequencyTable::from_items(&[0, 0, 0, 1, 2, 2, 0, 0, 1, 3]);
        assert_eq!(table.rank_frequency(), vec![(1, 5), (2, 2), (3, 2), (4, 1)]);
        assert_eq!(table.cumulative_percentages(), vec![50.0, 70.0, 90.0, 100.0]);
    }
}
