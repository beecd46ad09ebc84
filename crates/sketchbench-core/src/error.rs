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

//! Error types for benchmark report processing.
//!
//! Errors fall into two groups:
//!
//! - **Parse-stage errors** ([`BenchError::MalformedNumber`],
//!   [`BenchError::MalformedParameter`], [`BenchError::DuplicateParameter`],
//!   [`BenchError::UnknownMetricShape`]) are recovered locally by skipping the
//!   offending line. The report reader counts them in
//!   [`ParseStats`](crate::ParseStats).
//! - **Structural errors** ([`BenchError::MissingLatencyMetric`],
//!   [`BenchError::FileAccess`], [`BenchError::Io`]) are surfaced to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Benchmark processing error types.
///
/// # Examples
///
/// ```
/// use sketchbench_core::BenchError;
///
/// let err = BenchError::MalformedNumber {
///     token: "12.x".to_string(),
///     reason: "invalid float literal".to_string(),
/// };
/// assert_eq!(err.to_string(), "Malformed number '12.x': invalid float literal");
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, Error)]
pub enum BenchError {
    /// A numeric token failed to parse or carried an unknown unit suffix.
    #[error("Malformed number '{token}': {reason}")]
    MalformedNumber {
        /// The offending token.
        token: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A parameter segment lacked the `:_` delimiter or had a non-integer value.
    #[error("Malformed parameter '{segment}': {reason}")]
    MalformedParameter {
        /// The offending `Key:_Value` segment.
        segment: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The same parameter key appeared twice on one line.
    #[error("Duplicate parameter '{key}'")]
    DuplicateParameter {
        /// The repeated key.
        key: String,
    },

    /// The number of metric fields matches no known report variant.
    #[error("Unknown metric shape: {count} metric field(s), expected 1 or 4")]
    UnknownMetricShape {
        /// Number of metric fields found.
        count: usize,
    },

    /// Rate derivation was asked for a group with no latency metric.
    #[error("Group '{group}' has no averaged latency metric")]
    MissingLatencyMetric {
        /// Display form of the group key.
        group: String,
    },

    /// An input source could not be opened or read.
    #[error("Cannot access '{path}': {message}")]
    FileAccess {
        /// The path that failed.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// I/O error while reading an already opened source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for `Result` with `BenchError`.
pub type Result<T> = std::result::Result<T, BenchError>;

impl BenchError {
    /// Create a [`BenchError::MalformedNumber`].
    pub fn malformed_number(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedNumber {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Create a [`BenchError::MalformedParameter`].
    pub fn malformed_parameter(segment: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedParameter {
            segment: segment.into(),
            reason: reason.into(),
        }
    }

    /// Create a [`BenchError::FileAccess`] from an I/O error.
    pub fn file_access(path: impl Into<PathBuf>, source: &std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Whether the error is a parse-stage error that the readers recover from
    /// by skipping the line.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MalformedNumber { .. }
                | Self::MalformedParameter { .. }
                | Self::DuplicateParameter { .. }
                | Self::UnknownMetricShape { .. }
        )
    }
}
