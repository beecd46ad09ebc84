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

//! Run command - process a manifest

use super::rates::write_rates;
use super::render::render_aggregated;
use super::{check_sources, parse_options, write_output};
use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::manifest::Manifest;
use sketchbench_core::{Pipeline, RateConfig};
use std::path::{Path, PathBuf};

/// Process the sources of a manifest.
///
/// With a `rates` section the derived rates are written, otherwise the
/// aggregated groups. Command-line values override the manifest's.
///
/// # Errors
///
/// Returns `Err` if the manifest is invalid, rates cannot be derived, the
/// output cannot be written, or any source failed.
pub fn run(
    manifest_path: &str,
    workload_size: Option<f64>,
    format: Option<OutputFormat>,
    output: Option<&str>,
) -> Result<(), CliError> {
    let manifest = Manifest::load(Path::new(manifest_path))?;

    let format = format.or(manifest.format).unwrap_or(OutputFormat::Csv);
    let output: Option<PathBuf> = output.map(PathBuf::from).or(manifest.output.clone());

    let mut options = parse_options();
    options.name_prefix = manifest.name_prefix.clone();

    let mut rates: Option<RateConfig> = manifest.rates.clone().map(RateConfig::from);
    if let Some(size) = workload_size {
        rates.get_or_insert_with(Default::default).workload_size = size;
    }

    let derive = rates.is_some();
    let pipeline = Pipeline::new(options, rates.unwrap_or_default());
    let result = pipeline.run(&manifest.sources)?;

    if derive {
        write_rates(&result, format, output.as_deref(), "Throughput")?;
    } else {
        let content = render_aggregated(&result.aggregated, format)?;
        write_output(&content, output.as_deref())?;
    }

    check_sources(&result.sources)
}
