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

//! CSV tables for sketchbench results.
//!
//! Writes [`AggregatedRecord`](sketchbench_core::AggregatedRecord) and
//! [`DerivedRecord`](sketchbench_core::DerivedRecord) lists as CSV, one row
//! per group, with a column per parameter name.
//!
//! # Examples
//!
//! ```
//! use sketchbench_core::{aggregate, derive_all, parse_report_str, ParseOptions, RateConfig};
//! use sketchbench_csv::{derived_to_csv_with_config, ToCsvConfig};
//!
//! let report = parse_report_str(
//!     "CountThroughput/StreamRate:_1000-4   500.0m\n",
//!     &ParseOptions::default(),
//! ).unwrap();
//! let derived = derive_all(&aggregate(&report.records), &RateConfig::new(7000.0)).unwrap();
//!
//! let config = ToCsvConfig {
//!     delimiter: b'\t',
//!     ..Default::default()
//! };
//! let tsv = derived_to_csv_with_config(&derived.records, config).unwrap();
//! assert!(tsv.ends_with("CountThroughput\t1000\t1000000\t14000\n"));
//! ```

mod error;
mod to_csv;

pub use error::{CsvError, Result};
pub use to_csv::{
    aggregated_to_csv, aggregated_to_csv_with_config, aggregated_to_csv_writer,
    aggregated_to_csv_writer_with_config, derived_to_csv, derived_to_csv_with_config,
    derived_to_csv_writer, derived_to_csv_writer_with_config, ToCsvConfig,
};
