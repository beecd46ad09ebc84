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

//! Workload and dataset commands.

use crate::commands;
use crate::error::CliError;
use clap::Subcommand;

/// Commands for synthetic workloads and CSV datasets.
#[derive(Subcommand)]
pub enum WorkloadCommands {
    /// Generate or analyze Zipf-distributed datasets
    Zipf {
        #[command(subcommand)]
        action: ZipfCommands,
    },

    /// Count CSV rows whose column equals a value
    Count {
        /// CSV file path
        #[arg(value_name = "CSV")]
        file: String,

        /// Column header
        #[arg(value_name = "COLUMN")]
        column: String,

        /// Value to match (compared after trimming whitespace and quotes)
        #[arg(value_name = "VALUE")]
        value: String,
    },
}

/// Zipf dataset subcommands.
#[derive(Subcommand)]
pub enum ZipfCommands {
    /// Generate a `timestamp,item_id` dataset
    Generate {
        /// Output CSV file
        #[arg(short, long)]
        output: String,

        /// Stream size
        #[arg(short, long, default_value_t = 1_000_000)]
        size: usize,

        /// Number of distinct items
        #[arg(short, long, default_value_t = 250_000)]
        distinct: u64,

        /// Zipf skew, greater than 1
        #[arg(short = 'z', long, default_value_t = 1.5)]
        skew: f64,

        /// RNG seed for reproducible datasets
        #[arg(long)]
        seed: Option<u64>,

        /// Print a frequency analysis of the generated data
        #[arg(long)]
        analyze: bool,
    },

    /// Print heavy hitters and cumulative shares of a dataset
    Analyze {
        /// Dataset CSV file
        #[arg(value_name = "CSV")]
        file: String,

        /// Number of top items to list
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Column holding item ids
        #[arg(long, default_value = "item_id")]
        column: String,
    },
}

impl WorkloadCommands {
    /// Execute the workload command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the command execution fails.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            WorkloadCommands::Zipf { action } => match action {
                ZipfCommands::Generate {
                    output,
                    size,
                    distinct,
                    skew,
                    seed,
                    analyze,
                } => commands::zipf_generate(&output, size, distinct, skew, seed, analyze),
                ZipfCommands::Analyze { file, top, column } => {
                    commands::zipf_analyze(&file, top, &column)
                }
            },
            WorkloadCommands::Count {
                file,
                column,
                value,
            } => commands::count(&file, &column, &value),
        }
    }
}
