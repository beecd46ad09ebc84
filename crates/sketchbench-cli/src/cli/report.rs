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

//! Benchmark report commands.

use super::OutputFormat;
use crate::commands;
use crate::error::CliError;
use clap::{Args, Subcommand};
use sketchbench_core::{InterArrivalUnit, RateConfig};

/// Rate derivation arguments.
#[derive(Args, Debug, Clone)]
pub struct RateArgs {
    /// Tuples processed by one benchmark operation
    #[arg(short, long)]
    pub workload_size: f64,

    /// Extra multiplier for the processing rate
    #[arg(long, default_value_t = 1.0)]
    pub factor: f64,

    /// Multiply the processing rate by this parameter's value (e.g. Clients)
    #[arg(long, value_name = "PARAM")]
    pub scale_by: Option<String>,

    /// Parameter holding the inter-arrival time
    #[arg(long, value_name = "PARAM", default_value = "StreamRate")]
    pub inter_arrival_param: String,

    /// Inter-arrival times are in microseconds instead of nanoseconds
    #[arg(long)]
    pub micros: bool,
}

impl RateArgs {
    /// Inter-arrival unit selected by `--micros`.
    pub fn unit(&self) -> InterArrivalUnit {
        if self.micros {
            InterArrivalUnit::Microseconds
        } else {
            InterArrivalUnit::Nanoseconds
        }
    }

    /// Rate configuration for these arguments.
    pub fn to_config(&self) -> RateConfig {
        let config = RateConfig::new(self.workload_size)
            .with_factor(self.factor)
            .with_inter_arrival(self.inter_arrival_param.clone(), self.unit());
        match &self.scale_by {
            Some(param) => config.with_scale_by(param.clone()),
            None => config,
        }
    }
}

/// Commands that read benchmark reports.
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Parse one report and print its records
    ///
    /// Prints every record followed by a summary of matched and skipped lines.
    Parse {
        /// Report file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Read the paired-line latency format
        #[arg(long)]
        paired: bool,

        /// Benchmark name for paired-line records (defaults to the file stem)
        #[arg(long, requires = "paired")]
        name: Option<String>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Aggregate the records of one or more reports
    ///
    /// Records with the same benchmark name and parameters are averaged across
    /// all files. Unreadable files are reported and skipped.
    Aggregate {
        /// Report file paths
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,

        /// Output format (csv, text)
        #[arg(short, long, value_enum, default_value = "csv")]
        format: OutputFormat,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Derive stream and processing rates
    ///
    /// Aggregates the reports, then converts the inter-arrival parameter to a
    /// stream rate and the averaged latency to a processing rate.
    Rates {
        /// Report file paths
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,

        #[command(flatten)]
        rates: RateArgs,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Write a LaTeX long-table instead of CSV
        #[arg(long)]
        latex: bool,

        /// Subject named in the LaTeX caption
        #[arg(long, default_value = "Throughput")]
        caption: String,
    },

    /// Summarize a paired-line latency report
    ///
    /// Prints quartiles, whiskers and outliers per configuration.
    Latency {
        /// Report file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Benchmark name for the records (defaults to the file stem)
        #[arg(long)]
        name: Option<String>,
    },

    /// Process the sources listed in a manifest
    Run {
        /// Manifest file path
        #[arg(short, long, value_name = "FILE")]
        manifest: String,

        /// Override the manifest's workload size
        #[arg(long)]
        workload_size: Option<f64>,

        /// Override the manifest's output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Override the manifest's output file
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl ReportCommands {
    /// Execute the report command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the command execution fails.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            ReportCommands::Parse {
                file,
                paired,
                name,
                json,
            } => commands::parse(&file, paired, name.as_deref(), json),
            ReportCommands::Aggregate {
                files,
                format,
                output,
            } => commands::aggregate(&files, format, output.as_deref()),
            ReportCommands::Rates {
                files,
                rates,
                output,
                latex,
                caption,
            } => commands::rates(
                &files,
                &rates.to_config(),
                output.as_deref(),
                latex,
                &caption,
            ),
            ReportCommands::Latency { file, name } => commands::latency(&file, name.as_deref()),
            ReportCommands::Run {
                manifest,
                workload_size,
                format,
                output,
            } => commands::run(&manifest, workload_size, format, output.as_deref()),
        }
    }
}
