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

//! Sketchbench CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! ## Reports
//!
//! - **parse**: print the records of one report and its line counters
//! - **aggregate**: average records across reports (CSV or text)
//! - **rates**: derive stream and processing rates (CSV or LaTeX)
//! - **latency**: box-plot summaries of a paired-line latency report
//! - **run**: process the sources listed in a YAML manifest
//!
//! ## Workloads
//!
//! - **zipf generate** / **zipf analyze**: synthetic Zipf datasets
//! - **count**: count CSV rows by column value
//!
//! # Examples
//!
//! ```no_run
//! use sketchbench_cli::cli::OutputFormat;
//! use sketchbench_cli::commands::aggregate;
//!
//! # fn main() -> Result<(), sketchbench_cli::error::CliError> {
//! aggregate(&["count.txt".to_string(), "kll.txt".to_string()], OutputFormat::Csv, None)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! The binary logs to stderr through `tracing`; set `RUST_LOG` (for example
//! `RUST_LOG=sketchbench_core=debug`) to see every skipped line.

pub mod cli;
pub mod commands;
pub mod error;
pub mod manifest;
