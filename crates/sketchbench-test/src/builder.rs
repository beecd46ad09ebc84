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

//! Builder for synthetic benchmark result lines.

/// A benchmark result line under construction.
#[derive(Debug, Clone)]
pub struct ReportLine {
    name: String,
    params: Vec<(String, i64)>,
    procs: u32,
    metrics: Vec<String>,
    error_margin: Option<String>,
}

impl ReportLine {
    /// Start a line for `name` with `-4` as the processor suffix.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            procs: 4,
            metrics: Vec::new(),
            error_margin: None,
        }
    }

    /// Append a parameter.
    pub fn param(mut self, key: impl Into<String>, value: i64) -> Self {
        self.params.push((key.into(), value));
        self
    }

    /// Set the processor suffix.
    pub fn procs(mut self, procs: u32) -> Self {
        self.procs = procs;
        self
    }

    /// Append a metric field as printed, e.g. `924.4m` or `8342760500 ns/op`.
    pub fn metric(mut self, field: impl Into<String>) -> Self {
        self.metrics.push(field.into());
        self
    }

    /// Set the `± <margin>` annotation.
    pub fn error_margin(mut self, margin: impl Into<String>) -> Self {
        self.error_margin = Some(margin.into());
        self
    }

    /// Render the line.
    pub fn render(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|(k, v)| format!("{}:_{}", k, v))
            .collect();

        let mut line = format!("{}/{}-{} {}", self.name, params.join(","), self.procs, self.metrics.join(" "));
        if let Some(margin) = &self.error_margin {
            line.push_str(" ± ");
            line.push_str(margin);
        }
        line
    }
}
