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

//! Error types for dataset generation and analysis.

use thiserror::Error;

/// Zipf dataset errors.
#[derive(Debug, Error)]
pub enum ZipfError {
    /// The exponent must be greater than 1.
    #[error("Invalid skew {0}: must be greater than 1")]
    InvalidSkew(f64),

    /// The item range must not be empty.
    #[error("Number of distinct items must be at least 1")]
    ZeroDistinct,

    /// The CSV header has no such column.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A cell in the item column is not an unsigned integer.
    #[error("Invalid item '{value}' in row {row}")]
    InvalidItem {
        /// Data row number (1-based, header excluded).
        row: usize,
        /// The offending cell.
        value: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the underlying CSV library.
    #[error("CSV library error: {0}")]
    CsvLib(#[from] csv::Error),
}

/// Result type for Zipf operations.
pub type Result<T> = std::result::Result<T, ZipfError>;
