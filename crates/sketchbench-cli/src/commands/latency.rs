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

//! Latency command - distribution summaries of paired-line reports

use super::{parse_options, source_for};
use crate::error::CliError;
use sketchbench_core::{load_source, summarize_groups, SourceFormat};

/// Print one box-plot summary per configuration of a paired-line report.
///
/// Values are in milliseconds.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read.
pub fn latency(file: &str, name: Option<&str>) -> Result<(), CliError> {
    let mut source = source_for(file);
    source.format = SourceFormat::PairedLine;
    source.benchmark_name = name.map(str::to_string);

    let report = load_source(&source, &parse_options())?;

    for (key, s) in summarize_groups(&report.records) {
        println!(
            "{}  n={}  min={:.3}  q1={:.3}  median={:.3}  q3={:.3}  max={:.3}  mean={:.3}  whiskers=[{:.3}, {:.3}]  outliers={}",
            key, s.count, s.min, s.q1, s.median, s.q3, s.max, s.mean, s.lower_whisker, s.upper_whisker, s.outliers
        );
    }

    if report.stats.malformed > 0 {
        eprintln!("{} malformed line(s) skipped", report.stats.malformed);
    }
    Ok(())
}
