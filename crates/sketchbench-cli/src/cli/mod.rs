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

//! CLI command definitions and argument parsing.
//!
//! Commands are grouped by what they work on:
//!
//! - [`report`]: benchmark reports (parse, aggregate, rates, latency, run)
//! - [`workload`]: synthetic datasets and CSV utilities (zipf, count)

mod report;
mod workload;

use crate::error::CliError;
use clap::{Subcommand, ValueEnum};
use serde::Deserialize;

pub use report::{RateArgs, ReportCommands};
pub use workload::{WorkloadCommands, ZipfCommands};

/// Table output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated values
    Csv,
    /// Aligned plain text
    Text,
    /// LaTeX long-table (derived rates only)
    Latex,
}

/// Top-level CLI commands enum.
///
/// ```text
/// Commands
/// ├── Report (parse, aggregate, rates, latency, run)
/// └── Workload (zipf generate|analyze, count)
/// ```
#[derive(Subcommand)]
pub enum Commands {
    // Report commands - flattened to appear at top level
    #[command(flatten)]
    Report(ReportCommands),

    // Workload commands - flattened to appear at top level
    #[command(flatten)]
    Workload(WorkloadCommands),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` when a file cannot be read or written, a source fails,
    /// or rates cannot be derived.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Report(cmd) => cmd.execute(),
            Commands::Workload(cmd) => cmd.execute(),
        }
    }
}
