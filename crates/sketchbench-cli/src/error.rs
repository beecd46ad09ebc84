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

//! Structured error types for the sketchbench CLI.
//!
//! Every command returns `Result<(), CliError>`; lower-level errors from the
//! library crates convert into it with `?`.

use sketchbench_core::BenchError;
use sketchbench_csv::CsvError;
use sketchbench_latex::LatexError;
use sketchbench_zipf::ZipfError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for CLI operations.
///
/// Implements `Clone` so results can be collected and reported after the
/// fact.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed (file read, write, or metadata access).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// File exceeds the size limit.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)")]
    FileTooLarge {
        /// The file path
        path: PathBuf,
        /// Actual size in bytes
        actual: u64,
        /// Limit in bytes
        max: u64,
        /// Limit in MB
        max_mb: u64,
    },

    /// Report processing failed.
    #[error("Report error: {0}")]
    Report(String),

    /// CSV output failed.
    #[error("CSV output error: {0}")]
    Csv(String),

    /// LaTeX output failed.
    #[error("LaTeX output error: {0}")]
    Latex(String),

    /// Dataset generation or analysis failed.
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// JSON output failed.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },

    /// Manifest could not be loaded.
    #[error("Invalid manifest '{path}': {message}")]
    Manifest {
        /// Manifest path
        path: PathBuf,
        /// What is wrong with it
        message: String,
    },

    /// Some sources could not be read; output was still produced from the rest.
    #[error("{failed} of {total} source(s) could not be read")]
    SourcesFailed {
        /// Number of failed sources
        failed: usize,
        /// Number of sources
        total: usize,
    },

    /// Invalid argument combination or value.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a file-too-large error.
    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    /// Create a manifest error.
    pub fn manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<BenchError> for CliError {
    fn from(source: BenchError) -> Self {
        match source {
            BenchError::FileAccess { path, message } => Self::Io { path, message },
            other => Self::Report(other.to_string()),
        }
    }
}

impl From<CsvError> for CliError {
    fn from(source: CsvError) -> Self {
        Self::Csv(source.to_string())
    }
}

impl From<LatexError> for CliError {
    fn from(source: LatexError) -> Self {
        Self::Latex(source.to_string())
    }
}

impl From<ZipfError> for CliError {
    fn from(source: ZipfError) -> Self {
        Self::Dataset(source.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: source.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = CliError::io_error(
            "report.txt",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("report.txt"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_file_too_large_display() {
        let err = CliError::file_too_large("big.txt", 200_000_000, 100 * 1024 * 1024);
        let msg = err.to_string();
        assert!(msg.contains("big.txt"));
        assert!(msg.contains("200000000 bytes"));
        assert!(msg.contains("100 MB"));
    }

    #[test]
    fn test_file_access_keeps_path() {
        let err: CliError = BenchError::FileAccess {
            path: PathBuf::from("/tmp/missing.txt"),
            message: "No such file or directory".to_string(),
        }
        .into();
        match err {
            CliError::Io { path, .. } => assert_eq!(path, PathBuf::from("/tmp/missing.txt")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_missing_latency_becomes_report_error() {
        let err: CliError = BenchError::MissingLatencyMetric {
            group: "Count/StreamRate=1".to_string(),
        }
        .into();
        assert!(matches!(err, CliError::Report(_)));
        assert!(err.to_string().contains("Count/StreamRate=1"));
    }

    #[test]
    fn test_sources_failed_display() {
        let err = CliError::SourcesFailed { failed: 1, total: 3 };
        assert_eq!(err.to_string(), "1 of 3 source(s) could not be read");
    }

    #[test]
    fn test_clone() {
        let err = CliError::invalid_input("bad");
        assert_eq!(err.clone().to_string(), err.to_string());
    }
}
