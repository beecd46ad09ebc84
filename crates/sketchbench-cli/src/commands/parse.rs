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

//! Parse command - print the records of one report

use super::render::format_metrics;
use super::{parse_options, source_for};
use crate::error::CliError;
use colored::Colorize;
use sketchbench_core::{load_source, InputSource, SourceFormat};

/// Parse one report and print its records.
///
/// Records go to stdout, one per line, or as a JSON document with `--json`.
/// The line counters are printed to stderr.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read.
pub fn parse(file: &str, paired: bool, name: Option<&str>, json: bool) -> Result<(), CliError> {
    let mut source: InputSource = source_for(file);
    if paired {
        source.format = SourceFormat::PairedLine;
        source.benchmark_name = name.map(str::to_string);
    }

    let report = load_source(&source, &parse_options())?;

    if json {
        let doc = serde_json::json!({
            "source": report.source,
            "metadata": report.metadata,
            "footnotes": report.footnotes,
            "records": report.records,
            "stats": report.stats,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        for record in &report.records {
            let params: Vec<String> = record
                .params()
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            println!(
                "{}/{}  {}",
                record.benchmark_name(),
                params.join(","),
                format_metrics(&record.metrics())
            );
        }
    }

    let stats = &report.stats;
    eprintln!(
        "{} {} record(s) from {} line(s); skipped {} (no match {}, malformed {}, unknown shape {})",
        "✓".green().bold(),
        stats.records,
        stats.lines,
        stats.skipped(),
        stats.no_match,
        stats.malformed,
        stats.unknown_shape
    );

    Ok(())
}
