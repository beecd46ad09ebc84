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

//! Aggregate command - average records across reports

use super::render::render_aggregated;
use super::{check_sources, parse_options, source_for, write_output};
use crate::cli::OutputFormat;
use crate::error::CliError;
use sketchbench_core::{aggregate as aggregate_records, load_sources, InputSource, SourceOutcome};
use std::path::Path;

/// Aggregate the records of all readable reports.
///
/// Output is written even when some files fail; the command then returns
/// [`CliError::SourcesFailed`].
///
/// # Errors
///
/// Returns `Err` if the output cannot be written or any file failed.
pub fn aggregate(files: &[String], format: OutputFormat, output: Option<&str>) -> Result<(), CliError> {
    let sources: Vec<InputSource> = files.iter().map(|f| source_for(f)).collect();
    let options = parse_options();

    let mut records = Vec::new();
    let mut outcomes = Vec::with_capacity(sources.len());
    for (name, result) in load_sources(&sources, &options) {
        match result {
            Ok(report) => {
                records.extend(report.records);
                outcomes.push(SourceOutcome {
                    name,
                    result: Ok(report.stats),
                });
            }
            Err(err) => outcomes.push(SourceOutcome {
                name,
                result: Err(err),
            }),
        }
    }

    let groups = aggregate_records(&records);
    let content = render_aggregated(&groups, format)?;
    write_output(&content, output.map(Path::new))?;

    check_sources(&outcomes)
}
