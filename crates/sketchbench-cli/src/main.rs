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

//! Sketchbench Command Line Interface

use clap::Parser;
use sketchbench_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Sketchbench - benchmark report analysis for sketch evaluations
///
/// # Examples
///
/// ```bash
/// # Aggregate repeated runs into one CSV table
/// sketchbench aggregate run1.txt run2.txt -o aggregated.csv
///
/// # Derive rates for a 7000-tuple workload as a LaTeX appendix table
/// sketchbench rates client.txt --workload-size 7000 --latex
///
/// # Generate a skewed workload
/// sketchbench zipf generate -o zipf.csv --skew 1.2 --analyze
/// ```
#[derive(Parser)]
#[command(name = "sketchbench")]
#[command(author, version, about = "Sketchbench - benchmark report analysis for sketch evaluations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("sketchbench=info".parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
