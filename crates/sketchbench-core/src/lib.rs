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

//! Parsing and aggregation core for sketch benchmark reports.
//!
//! Benchmark harnesses print one line per parameterized run: a name, a set of
//! `Key:_Value` parameters, and one or more timing values with mixed units.
//! This crate turns such reports into structured records, averages repeated
//! runs, and derives stream and processing rates.
//!
//! # Pipeline
//!
//! ```text
//! text ─▶ Tokenizer ─▶ build ─▶ aggregate ─▶ derive ─▶ presentation
//!        (ParsedToken) (MeasurementRecord) (AggregatedRecord) (DerivedRecord)
//! ```
//!
//! - [`normalize_to_milliseconds`]: unit-suffixed timing tokens to milliseconds
//! - [`Tokenizer`]: matches one line against the report grammar
//! - [`build`]: turns a token into a [`MeasurementRecord`]
//! - [`aggregate`]: groups by [`GroupKey`] and averages metrics
//! - [`derive_with_config`]: stream and processing rates per group
//! - [`Pipeline`]: all of the above over a list of [`InputSource`]s
//!
//! # Examples
//!
//! ```
//! use sketchbench_core::{aggregate, derive_all, parse_report_str, ParseOptions, RateConfig};
//!
//! let text = "\
//! CountThroughput/StreamRate:_4780-4        924.4m ±   14%
//! CountThroughput/StreamRate:_4810-4         1.033 ±   11%
//! CountThroughput/StreamRate:_0-4            1.200 ±   11%
//! ";
//!
//! let report = parse_report_str(text, &ParseOptions::default()).unwrap();
//! let groups = aggregate(&report.records);
//! let rates = derive_all(&groups, &RateConfig::new(7000.0)).unwrap();
//!
//! assert_eq!(groups.len(), 3);
//! assert_eq!(rates.records.len(), 2);
//! assert_eq!(rates.skipped.len(), 1);
//! ```
//!
//! # Error Handling
//!
//! Parse-stage errors never abort a read: the line is skipped and counted in
//! [`ParseStats`]. Missing files and groups without a latency metric are
//! surfaced as [`BenchError`].

pub mod aggregate;
pub mod error;
pub mod limits;
pub mod pipeline;
pub mod rates;
pub mod reader;
pub mod record;
pub mod report;
pub mod source;
pub mod summary;
pub mod tokenizer;
pub mod units;

pub use aggregate::{aggregate, AggregatedRecord, GroupKey, Observation};
pub use error::{BenchError, Result};
pub use limits::{Limits, ParseOptions};
pub use pipeline::{Pipeline, PipelineOutput, SourceOutcome};
pub use rates::{
    derive, derive_all, derive_with_config, Derivation, DerivationReport, DerivedRecord,
    InterArrivalUnit, RateConfig, SkipReason,
};
pub use reader::LineReader;
pub use record::{build, MeasurementRecord, MetricName, RecordShape};
pub use report::{parse_paired_latency, parse_report, parse_report_str, ParseStats, ParsedReport};
pub use source::{load_source, load_sources, InputSource, SourceFormat};
pub use summary::{summarize_groups, LatencySummary};
pub use tokenizer::{parse_params, tokenize, ParsedToken, Tokenizer};
pub use units::{normalize_to_milliseconds, parse_count, TimeUnit};
