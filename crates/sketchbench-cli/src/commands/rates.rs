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

//! Rates command - derive stream and processing rates

use super::render::render_derived;
use super::{check_sources, parse_options, source_for, write_output};
use crate::cli::OutputFormat;
use crate::error::CliError;
use sketchbench_core::{InputSource, Pipeline, PipelineOutput, RateConfig};
use std::path::Path;
use tracing::info;

/// Derive rates from one or more reports.
///
/// Every file uses the inter-arrival unit of `config`.
///
/// # Errors
///
/// Returns `Err` if a group has no latency metric, the output cannot be
/// written, or any file failed.
pub fn rates(
    files: &[String],
    config: &RateConfig,
    output: Option<&str>,
    latex: bool,
    caption: &str,
) -> Result<(), CliError> {
    let sources: Vec<InputSource> = files
        .iter()
        .map(|f| {
            let mut source = source_for(f);
            source.inter_arrival_unit = config.inter_arrival_unit;
            source
        })
        .collect();

    let format = if latex {
        OutputFormat::Latex
    } else {
        OutputFormat::Csv
    };

    let result = Pipeline::new(parse_options(), config.clone()).run(&sources)?;
    write_rates(&result, format, output.map(Path::new), caption)?;
    check_sources(&result.sources)
}

/// Write derived rates and note skipped groups.
pub(crate) fn write_rates(
    result: &PipelineOutput,
    format: OutputFormat,
    output: Option<&Path>,
    caption: &str,
) -> Result<(), CliError> {
    for (key, reason) in &result.derived.skipped {
        info!(group = %key, %reason, "group skipped");
    }

    let content = render_derived(&result.derived.records, &result.metadata, format, caption)?;
    write_output(&content, output)?;

    eprintln!(
        "Derived {} group(s), skipped {}",
        result.derived.records.len(),
        result.derived.skipped.len()
    );
    Ok(())
}
