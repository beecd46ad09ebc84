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

//! Synthetic Zipf workloads for sketch evaluations.
//!
//! - [`generate`] draws a stream of item ids from a Zipf distribution.
//! - [`write_dataset`] and [`read_item_column`] move streams through
//!   `timestamp,item_id` CSV files.
//! - [`FrequencyTable`] reports heavy hitters, rank-frequency pairs and
//!   cumulative shares.
//! - [`count_matching`] counts CSV rows by column value.
//!
//! # Examples
//!
//! ```
//! use sketchbench_zipf::{generate, FrequencyTable, ZipfConfig};
//!
//! let config = ZipfConfig {
//!     size: 10_000,
//!     distinct: 2_500,
//!     seed: Some(1),
//!     ..Default::default()
//! };
//! let items = generate(&config).unwrap();
//! let table = FrequencyTable::from_items(&items);
//!
//! assert_eq!(table.total(), 10_000);
//! assert_eq!(table.top_k(1)[0].0, 0);
//! ```

mod analysis;
mod dataset;
mod error;
mod generator;

pub use analysis::FrequencyTable;
pub use dataset::{count_matching, read_item_column, write_dataset, ITEM_COLUMN, TIMESTAMP_COLUMN};
pub use error::{Result, ZipfError};
pub use generator::{generate, generate_with_rng, ZipfConfig, ZipfSampler};
