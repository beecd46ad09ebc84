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

//! CLI command implementations

mod aggregate;
mod count;
mod latency;
mod parse;
mod rates;
mod render;
mod run;
mod zipf;

pub use aggregate::aggregate;
pub use count::count;
pub use latency::latency;
pub use parse::parse;
pub use rates::rates;
pub use run::run;
pub use zipf::{zipf_analyze, zipf_generate};

use crate::error::CliError;
use colored::Colorize;
use sketchbench_core::{InputSource, ParseOptions, SourceOutcome};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Default maximum file size (1 GB).
/// Can be overridden via the SKETCHBENCH_MAX_FILE_SIZE environment variable
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Environment variable overriding [`DEFAULT_MAX_FILE_SIZE`].
pub const MAX_FILE_SIZE_ENV: &str = "SKETCHBENCH_MAX_FILE_SIZE";

/// Maximum file size from the environment, or the default when unset or
/// not a number.
fn get_max_file_size() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Report reader options with the file size limit applied.
pub fn parse_options() -> ParseOptions {
    let mut options = ParseOptions::default();
    options.limits.max_file_size = get_max_file_size();
    options
}

fn check_size(path: &Path) -> Result<(), CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;
    let max_file_size = get_max_file_size();

    if metadata.len() > max_file_size {
        return Err(CliError::file_too_large(path, metadata.len(), max_file_size));
    }
    Ok(())
}

/// Read a file from disk with size validation.
///
/// # Errors
///
/// Returns `Err` if the file is missing, larger than the limit (configurable
/// via `SKETCHBENCH_MAX_FILE_SIZE`), unreadable, or not UTF-8.
pub fn read_file(path: impl AsRef<Path>) -> Result<String, CliError> {
    let path = path.as_ref();
    check_size(path)?;
    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Open a file for streaming with size validation.
pub fn open_file(path: impl AsRef<Path>) -> Result<File, CliError> {
    let path = path.as_ref();
    check_size(path)?;
    File::open(path).map_err(|e| CliError::io_error(path, e))
}

/// Write content to a file or stdout.
///
/// # Errors
///
/// Returns `Err` if the file or stdout cannot be written.
pub fn write_output(content: &str, path: Option<&Path>) -> Result<(), CliError> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| CliError::io_error(p, e)),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| CliError::io_error("<stdout>", e)),
    }
}

/// Source named after the file stem.
fn source_for(path: &str) -> InputSource {
    let name = Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    InputSource::new(name, path)
}

/// Print one ✓/✗ line per source to stderr and fail when any source failed.
fn check_sources(outcomes: &[SourceOutcome]) -> Result<(), CliError> {
    let mut failed = 0;
    for outcome in outcomes {
        match &outcome.result {
            Ok(stats) => eprintln!(
                "{} {}: {} record(s), {} line(s) skipped",
                "✓".green().bold(),
                outcome.name,
                stats.records,
                stats.skipped()
            ),
            Err(err) => {
                failed += 1;
                eprintln!("{} {}: {}", "✗".red().bold(), outcome.name, err);
            }
        }
    }

    if failed > 0 {
        return Err(CliError::SourcesFailed {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}

/// Format an integer with comma thousands separators.
fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
