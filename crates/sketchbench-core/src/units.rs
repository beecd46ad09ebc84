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

//! Unit normalization for timing tokens.
//!
//! Benchmark reports print durations with a compact unit suffix. Every
//! duration is normalized to milliseconds:
//!
//! | Suffix             | Unit         | Factor to ms |
//! |--------------------|--------------|--------------|
//! | none, `s`          | seconds      | × 1000       |
//! | `m`, `ms`          | milliseconds | × 1          |
//! | `µ`, `µs`, `us`    | microseconds | ÷ 1000       |
//! | `n`, `ns`          | nanoseconds  | ÷ 1 000 000  |
//!
//! Both the micro sign (U+00B5) and the Greek small mu (U+03BC) are accepted.

use crate::error::{BenchError, Result};
use std::fmt;

/// A time unit recognized in report tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl TimeUnit {
    /// Resolve a unit suffix. The empty suffix means seconds.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" | "s" => Some(Self::Seconds),
            "m" | "ms" => Some(Self::Milliseconds),
            "µ" | "μ" | "µs" | "μs" | "us" => Some(Self::Microseconds),
            "n" | "ns" => Some(Self::Nanoseconds),
            _ => None,
        }
    }

    /// Multiplier that converts a value in this unit to milliseconds.
    pub fn to_millis_factor(self) -> f64 {
        match self {
            Self::Seconds => 1_000.0,
            Self::Milliseconds => 1.0,
            Self::Microseconds => 1e-3,
            Self::Nanoseconds => 1e-6,
        }
    }

    /// Convert `value` expressed in this unit to milliseconds.
    #[inline]
    pub fn to_millis(self, value: f64) -> f64 {
        match self {
            Self::Seconds => value * 1_000.0,
            Self::Milliseconds => value,
            Self::Microseconds => value / 1_000.0,
            Self::Nanoseconds => value / 1_000_000.0,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Seconds => "s",
            Self::Milliseconds => "ms",
            Self::Microseconds => "µs",
            Self::Nanoseconds => "ns",
        };
        f.write_str(s)
    }
}

/// Split a token into its numeric part and unit suffix.
fn split_numeric(token: &str) -> (&str, &str) {
    let end = token
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(token.len());
    token.split_at(end)
}

/// Normalize a timing token to milliseconds.
///
/// # Errors
///
/// Returns [`BenchError::MalformedNumber`] when the numeric part is not a
/// decimal number or the suffix is not a known unit.
///
/// # Examples
///
/// ```
/// use sketchbench_core::normalize_to_milliseconds;
///
/// assert_eq!(normalize_to_milliseconds("924.4m").unwrap(), 924.4);
/// assert_eq!(normalize_to_milliseconds("1.033").unwrap(), 1033.0);
/// assert_eq!(normalize_to_milliseconds("500.0µ").unwrap(), 0.5);
/// assert!(normalize_to_milliseconds("1.0x").is_err());
/// ```
pub fn normalize_to_milliseconds(token: &str) -> Result<f64> {
    let token = token.trim();
    let (number, suffix) = split_numeric(token);

    if number.is_empty() {
        return Err(BenchError::malformed_number(token, "missing numeric value"));
    }

    let unit = TimeUnit::from_suffix(suffix).ok_or_else(|| {
        BenchError::malformed_number(token, format!("unknown unit suffix '{}'", suffix))
    })?;

    let value: f64 = number
        .parse()
        .map_err(|e| BenchError::malformed_number(token, format!("{}", e)))?;

    Ok(unit.to_millis(value))
}

/// Parse a plain count token (iterations, bytes, allocations).
///
/// # Errors
///
/// Returns [`BenchError::MalformedNumber`] when the token is not a
/// non-negative integer.
pub fn parse_count(token: &str) -> Result<u64> {
    let token = token.trim();
    token
        .parse::<u64>()
        .map_err(|e| BenchError::malformed_number(token, format!("{}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    // ==================== Suffix tests ====================

    #[test]
    fn test_seconds_without_suffix() {
        assert!(approx_eq(normalize_to_milliseconds("1.033").unwrap(), 1033.0));
        assert!(approx_eq(normalize_to_milliseconds("2s").unwrap(), 2000.0));
    }

    #[test]
    fn test_milliseconds() {
        assert!(approx_eq(normalize_to_milliseconds("924.4m").unwrap(), 924.4));
        assert!(approx_eq(normalize_to_milliseconds("12ms").unwrap(), 12.0));
    }

    #[test]
    fn test_microseconds_both_signs() {
        assert!(approx_eq(normalize_to_milliseconds("500.0µ").unwrap(), 0.5));
        assert!(approx_eq(normalize_to_milliseconds("500.0μ").unwrap(), 0.5));
        assert!(approx_eq(normalize_to_milliseconds("250µs").unwrap(), 0.25));
        assert!(approx_eq(normalize_to_milliseconds("250us").unwrap(), 0.25));
    }

    #[test]
    fn test_nanoseconds() {
        assert!(approx_eq(
            normalize_to_milliseconds("8342760500ns").unwrap(),
            8342.7605
        ));
        assert!(approx_eq(normalize_to_milliseconds("1500n").unwrap(), 0.0015));
    }

    #[test]
    fn test_zero_is_valid() {
        assert_eq!(normalize_to_milliseconds("0").unwrap(), 0.0);
        assert_eq!(normalize_to_milliseconds("0.0m").unwrap(), 0.0);
    }

    // ==================== Error tests ====================

    #[test]
    fn test_unknown_suffix() {
        let err = normalize_to_milliseconds("12.5h").unwrap_err();
        assert!(matches!(err, BenchError::MalformedNumber { .. }));
        assert!(err.to_string().contains("unknown unit suffix 'h'"));
    }

    #[test]
    fn test_missing_number() {
        assert!(normalize_to_milliseconds("ms").is_err());
        assert!(normalize_to_milliseconds("").is_err());
    }

    #[test]
    fn test_bad_decimal() {
        assert!(normalize_to_milliseconds("1.2.3m").is_err());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("179960240").unwrap(), 179_960_240);
        assert!(parse_count("12.5").is_err());
        assert!(parse_count("-1").is_err());
    }

    // ==================== Unit table tests ====================

    #[test]
    fn test_factor_matches_conversion() {
        for unit in [
            TimeUnit::Seconds,
            TimeUnit::Milliseconds,
            TimeUnit::Microseconds,
            TimeUnit::Nanoseconds,
        ] {
            assert!(approx_eq(unit.to_millis(3.0), 3.0 * unit.to_millis_factor()));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(TimeUnit::Microseconds.to_string(), "µs");
        assert_eq!(TimeUnit::Seconds.to_string(), "s");
    }
}
