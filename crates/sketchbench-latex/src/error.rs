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

//! Error types for LaTeX output.

use thiserror::Error;

/// LaTeX output errors.
#[derive(Debug, Error)]
pub enum LatexError {
    /// A row has no stream rate to print.
    #[error("Group '{group}' has no stream rate; the table needs one per row")]
    MissingStreamRate {
        /// Group identity.
        group: String,
    },

    /// I/O error while writing the table.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for LaTeX operations.
pub type Result<T> = std::result::Result<T, LatexError>;
