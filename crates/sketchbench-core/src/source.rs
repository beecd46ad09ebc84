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

//! Named input sources.
//!
//! Every report the pipeline reads is described by an [`InputSource`]: a
//! name, a path, the line format and the unit of its inter-arrival
//! parameter. Sources are parsed independently; a source that cannot be
//! opened fails alone.

use crate::error::{BenchError, Result};
use crate::limits::ParseOptions;
use crate::rates::InterArrivalUnit;
use crate::report::{parse_paired_latency, parse_report, ParsedReport};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Line format of a report file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SourceFormat {
    /// One benchmark result per line.
    #[default]
    SingleLine,
    /// Header line followed by a line of latency samples.
    PairedLine,
}

/// A named report file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputSource {
    /// Display name, e.g. `count` or `kll-pinned`.
    pub name: String,
    /// Report file path.
    pub path: PathBuf,
    /// Line format (default: single-line).
    #[cfg_attr(feature = "serde", serde(default))]
    pub format: SourceFormat,
    /// Unit of the inter-arrival parameter (default: nanoseconds).
    #[cfg_attr(feature = "serde", serde(default))]
    pub inter_arrival_unit: InterArrivalUnit,
    /// Benchmark name given to paired-line records (default: the source name).
    #[cfg_attr(feature = "serde", serde(default))]
    pub benchmark_name: Option<String>,
}

impl InputSource {
    /// A single-line source with default units.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            format: SourceFormat::SingleLine,
            inter_arrival_unit: InterArrivalUnit::Nanoseconds,
            benchmark_name: None,
        }
    }

    /// A paired-line source.
    pub fn paired(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            format: SourceFormat::PairedLine,
            ..Self::new(name, path)
        }
    }

    /// Benchmark name for paired-line records.
    pub fn paired_benchmark_name(&self) -> &str {
        self.benchmark_name.as_deref().unwrap_or(&self.name)
    }
}

fn open_checked(path: &Path, options: &ParseOptions) -> Result<File> {
    let metadata = std::fs::metadata(path).map_err(|e| BenchError::file_access(path, &e))?;

    if !metadata.is_file() {
        return Err(BenchError::FileAccess {
            path: path.to_path_buf(),
            message: "not a regular file".to_string(),
        });
    }

    if metadata.len() > options.limits.max_file_size {
        return Err(BenchError::FileAccess {
            path: path.to_path_buf(),
            message: format!(
                "file is too large ({} bytes, maximum {} bytes)",
                metadata.len(),
                options.limits.max_file_size
            ),
        });
    }

    File::open(path).map_err(|e| BenchError::file_access(path, &e))
}

/// Parse one source to completion.
///
/// The file handle is dropped on every return path.
///
/// # Errors
///
/// Returns [`BenchError::FileAccess`] when the file is missing, unreadable,
/// or over the size limit.
pub fn load_source(source: &InputSource, options: &ParseOptions) -> Result<ParsedReport> {
    let file = open_checked(&source.path, options)?;

    let mut report = match source.format {
        SourceFormat::SingleLine => parse_report(file, options),
        SourceFormat::PairedLine => {
            parse_paired_latency(file, source.paired_benchmark_name(), options)
        }
    }
    .map_err(|e| match e {
        BenchError::Io(io) => BenchError::file_access(&source.path, &io),
        other => other,
    })?;

    report.source = Some(source.name.clone());
    info!(
        source = %source.name,
        records = report.stats.records,
        skipped = report.stats.skipped(),
        "parsed source"
    );
    Ok(report)
}

/// Parse several sources independently.
///
/// Results come back in input order, one per source. A failing source is
/// logged and reported in its slot; the others are still parsed.
pub fn load_sources(sources: &[InputSource], options: &ParseOptions) -> Vec<(String, Result<ParsedReport>)> {
    sources
        .iter()
        .map(|source| {
            let result = load_source(source, options);
            if let Err(err) = &result {
                warn!(source = %source.name, error = %err, "failed to load source");
            }
            (source.name.clone(), result)
        })
        .collect()
}
