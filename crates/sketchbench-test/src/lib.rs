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

//! Shared test fixtures for sketchbench crates.
//!
//! Fixtures are plain report texts as the benchmark harnesses print them,
//! plus a builder for synthesizing result lines.
//!
//! # Quick Start
//!
//! ```rust
//! use sketchbench_test::{fixtures, ReportLine};
//!
//! let text = fixtures::benchstat_throughput();
//! assert!(text.contains("CountThroughput"));
//!
//! let line = ReportLine::new("KllThroughput")
//!     .param("StreamRate", 4780)
//!     .metric("924.4m")
//!     .error_margin("14%")
//!     .render();
//! assert_eq!(line, "KllThroughput/StreamRate:_4780-4 924.4m ± 14%");
//! ```

/// Canonical report texts.
pub mod fixtures;

mod builder;

pub use builder::ReportLine;

/// Type alias for a list of named fixtures.
pub type FixtureList = Vec<(&'static str, fn() -> String)>;

/// All single-line report fixtures as (name, generator) pairs.
pub fn single_line_fixtures() -> FixtureList {
    vec![
        ("benchstat_throughput", fixtures::benchstat_throughput),
        ("benchstat_infinite_margin", fixtures::benchstat_infinite_margin),
        ("go_bench_server", fixtures::go_bench_server),
        ("noisy_report", fixtures::noisy_report),
    ]
}
