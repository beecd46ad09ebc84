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

//! Resource limits and parse options.

use crate::tokenizer::DEFAULT_NAME_PREFIX;

/// Configurable limits for report reading.
///
/// Report files are small; the limits only guard against pointing the reader
/// at something that is not a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum file size in bytes (default: 1GB).
    pub max_file_size: u64,
    /// Maximum line length in bytes (default: 1MB).
    pub max_line_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_size: 1024 * 1024 * 1024, // 1GB
            max_line_length: 1024 * 1024,      // 1MB
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_file_size: u64::MAX,
            max_line_length: usize::MAX,
        }
    }
}

/// Options for the report readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Resource limits.
    pub limits: Limits,
    /// Prefix stripped from benchmark names (default: `Benchmark`).
    pub name_prefix: Option<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            name_prefix: Some(DEFAULT_NAME_PREFIX.to_string()),
        }
    }
}
