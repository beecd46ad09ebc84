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

//! Source manifests.
//!
//! A manifest is a YAML file naming the reports of one evaluation, the rate
//! settings to derive with, and where the table goes:
//!
//! ```yaml
//! sources:
//!   - name: count
//!     path: results/count.txt
//!   - name: kll-latency
//!     path: results/kll-latency.txt
//!     format: paired-line
//!     benchmark_name: KllLatency
//!   - name: client
//!     path: results/client.txt
//!     inter_arrival_unit: microseconds
//! rates:
//!   workload_size: 14000
//!   scale_by_param: Clients
//! format: csv
//! output: rates.csv
//! ```
//!
//! Relative paths are resolved against the manifest's directory. The
//! inter-arrival unit belongs to each source; `rates` does not accept one.

use crate::cli::OutputFormat;
use crate::error::CliError;
use serde::Deserialize;
use sketchbench_core::{InputSource, RateConfig};
use sketchbench_core::rates::DEFAULT_INTER_ARRIVAL_PARAM;
use std::path::{Path, PathBuf};

/// A parsed manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Report files to read.
    pub sources: Vec<InputSource>,
    /// Rate settings; without them only aggregated groups are written.
    #[serde(default)]
    pub rates: Option<ManifestRates>,
    /// Output format (default: csv).
    #[serde(default)]
    pub format: Option<OutputFormat>,
    /// Output file (default: stdout).
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Benchmark-name prefix to strip; `null` keeps names as printed.
    #[serde(default = "default_name_prefix")]
    pub name_prefix: Option<String>,
}

/// The `rates` section of a manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestRates {
    /// Work performed by one benchmark operation, in tuples.
    pub workload_size: f64,
    /// Extra multiplier applied to the processing rate.
    pub units_per_second_factor: f64,
    /// Parameter holding the inter-arrival time.
    pub inter_arrival_param: String,
    /// Parameter whose value multiplies the processing rate.
    pub scale_by_param: Option<String>,
}

impl Default for ManifestRates {
    fn default() -> Self {
        Self {
            workload_size: 1.0,
            units_per_second_factor: 1.0,
            inter_arrival_param: DEFAULT_INTER_ARRIVAL_PARAM.to_string(),
            scale_by_param: None,
        }
    }
}

impl From<ManifestRates> for RateConfig {
    fn from(rates: ManifestRates) -> Self {
        RateConfig {
            workload_size: rates.workload_size,
            units_per_second_factor: rates.units_per_second_factor,
            inter_arrival_param: rates.inter_arrival_param,
            scale_by_param: rates.scale_by_param,
            ..RateConfig::default()
        }
    }
}

fn default_name_prefix() -> Option<String> {
    Some(sketchbench_core::tokenizer::DEFAULT_NAME_PREFIX.to_string())
}

impl Manifest {
    /// Parse a manifest from YAML text. Paths are left as written.
    pub fn from_yaml(text: &str, path: &Path) -> Result<Self, CliError> {
        let manifest: Manifest =
            serde_yaml::from_str(text).map_err(|e| CliError::manifest(path, e.to_string()))?;

        if manifest.sources.is_empty() {
            return Err(CliError::manifest(path, "no sources listed"));
        }

        let mut names: Vec<&str> = manifest.sources.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        if let Some(pair) = names.windows(2).find(|w| w[0] == w[1]) {
            return Err(CliError::manifest(
                path,
                format!("source name '{}' is used twice", pair[0]),
            ));
        }

        Ok(manifest)
    }

    /// Read a manifest file and resolve its relative paths.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = crate::commands::read_file(path)?;
        let mut manifest = Self::from_yaml(&text, path)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for source in &mut manifest.sources {
            if source.path.is_relative() {
                source.path = base.join(&source.path);
            }
        }
        if let Some(output) = manifest.output.as_mut() {
            if output.is_relative() {
                *output = base.join(&*output);
            }
        }

        Ok(manifest)
    }
}
