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

//! Line tokenizer for benchmark report lines.
//!
//! The accepted grammar is
//!
//! ```text
//! <Name>/<Key>:_<Int>(,_?<Key>:_<Int>)*-<Procs>  <metric>... [± <error>[%|∞][¹]]
//! ```
//!
//! Two variants occur in practice:
//!
//! ```text
//! CountThroughput/StreamRate:_4780-4        924.4m ±   14%
//! BenchmarkSystemCount/Clients:_5,MergeRate:_100,StreamRate:_200-14   1   8342760500 ns/op   179960240 B/op   2156157 allocs/op
//! ```
//!
//! The trailing `-<Procs>` is recognized and dropped. Everything after `±` is
//! an error annotation and is discarded. Unit labels of the form `<unit>/op`
//! are folded into the preceding value when `<unit>` is a time unit
//! (`8342760500 ns/op` becomes `8342760500ns`) and dropped otherwise.

use crate::error::{BenchError, Result};
use crate::units::TimeUnit;
use regex::Regex;
use std::sync::OnceLock;

/// Default benchmark-name prefix stripped from raw `go test` output.
pub const DEFAULT_NAME_PREFIX: &str = "Benchmark";

/// Symbol separating measurements from their error annotation.
const ERROR_MARGIN_SEPARATOR: char = '±';

/// Delimiter between a parameter key and its value.
const PARAM_DELIMITER: &str = ":_";

/// Raw result of matching one line against the report grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedToken {
    /// Benchmark name with any configured prefix stripped.
    pub benchmark_name: String,
    /// Parameters in order of appearance.
    pub params: Vec<(String, i64)>,
    /// Metric fields in order of appearance, unit labels already folded.
    pub raw_metrics: Vec<String>,
}

fn line_regex() -> &'static Regex {
    static LINE_RE: OnceLock<Regex> = OnceLock::new();
    LINE_RE.get_or_init(|| {
        Regex::new(r"^(?P<name>[A-Za-z0-9_]+)/(?P<params>\S+)-(?P<procs>\d+)\s+(?P<rest>.*)$")
            .expect("line grammar regex is valid")
    })
}

/// Tokenizer for benchmark report lines.
///
/// # Examples
///
/// ```
/// use sketchbench_core::Tokenizer;
///
/// let tokenizer = Tokenizer::new();
/// let token = tokenizer
///     .tokenize("CountThroughput/StreamRate:_4780-4        924.4m ±   14%")
///     .unwrap()
///     .unwrap();
///
/// assert_eq!(token.benchmark_name, "CountThroughput");
/// assert_eq!(token.params, vec![("StreamRate".to_string(), 4780)]);
/// assert_eq!(token.raw_metrics, vec!["924.4m".to_string()]);
///
/// assert!(tokenizer.tokenize("goos: linux").unwrap().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer {
    name_prefix: Option<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Create a tokenizer that strips the default `Benchmark` name prefix.
    pub fn new() -> Self {
        Self {
            name_prefix: Some(DEFAULT_NAME_PREFIX.to_string()),
        }
    }

    /// Create a tokenizer with a custom (or no) name prefix.
    pub fn with_name_prefix(prefix: Option<String>) -> Self {
        Self {
            name_prefix: prefix.filter(|p| !p.is_empty()),
        }
    }

    /// Match one line against the report grammar.
    ///
    /// Returns `Ok(None)` for lines that are not benchmark results at all
    /// (blank lines, metadata headers, footnotes, table rules, and prose
    /// such as `results/run-1 done` whose parameter part has no key/value
    /// separator).
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::MalformedParameter`] when the line has the shape
    /// of a result but a parameter segment is broken.
    pub fn tokenize(&self, line: &str) -> Result<Option<ParsedToken>> {
        let line = line.trim();
        let Some(caps) = line_regex().captures(line) else {
            return Ok(None);
        };

        if !caps["params"].contains([':', '=']) {
            return Ok(None);
        }

        let raw_metrics = split_metrics(&caps["rest"]);
        if raw_metrics.is_empty() {
            return Ok(None);
        }

        let params = parse_params(&caps["params"])?;
        let benchmark_name = self.strip_prefix(&caps["name"]).to_string();

        Ok(Some(ParsedToken {
            benchmark_name,
            params,
            raw_metrics,
        }))
    }

    fn strip_prefix<'a>(&self, name: &'a str) -> &'a str {
        match &self.name_prefix {
            Some(prefix) => match name.strip_prefix(prefix.as_str()) {
                Some(rest) if !rest.is_empty() => rest,
                _ => name,
            },
            None => name,
        }
    }
}

/// Tokenize with the default [`Tokenizer`].
pub fn tokenize(line: &str) -> Result<Option<ParsedToken>> {
    Tokenizer::new().tokenize(line)
}

/// Parse a `Key:_Value,_Key:_Value` parameter list.
///
/// Go replaces spaces in sub-benchmark names with `_`, so segments may carry a
/// leading underscore which is trimmed. Empty segments (trailing comma) are
/// ignored.
///
/// # Errors
///
/// Returns [`BenchError::MalformedParameter`] when a segment has no `:_`
/// delimiter, an empty key, or a non-integer value.
pub fn parse_params(params: &str) -> Result<Vec<(String, i64)>> {
    let mut out = Vec::new();

    for raw in params.split(',') {
        let segment = raw.trim_start_matches('_');
        if segment.is_empty() {
            continue;
        }

        let (key, value) = segment.split_once(PARAM_DELIMITER).ok_or_else(|| {
            BenchError::malformed_parameter(raw, format!("missing '{}' delimiter", PARAM_DELIMITER))
        })?;

        if key.is_empty() {
            return Err(BenchError::malformed_parameter(raw, "empty key"));
        }

        let value: i64 = value.parse().map_err(|_| {
            BenchError::malformed_parameter(raw, format!("value '{}' is not an integer", value))
        })?;

        out.push((key.to_string(), value));
    }

    Ok(out)
}

/// Split the measurement part of a line into metric fields.
fn split_metrics(rest: &str) -> Vec<String> {
    let measurements = match rest.split_once(ERROR_MARGIN_SEPARATOR) {
        Some((before, _annotation)) => before,
        None => rest,
    };

    let mut fields: Vec<String> = Vec::new();
    for word in measurements.split_whitespace() {
        match word.split_once('/') {
            Some((unit, _per)) if !fields.is_empty() => {
                if !unit.is_empty() && TimeUnit::from_suffix(unit).is_some() {
                    if let Some(last) = fields.last_mut() {
                        last.push_str(unit);
                    }
                }
            }
            _ => fields.push(word.to_string()),
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, i64)]) -> Vec<(String, i64)> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    // ==================== Simple timing variant ====================

    #[test]
    fn test_benchstat_milliseconds_line() {
        let token = tokenize("CountThroughput/StreamRate:_4780-4        924.4m ±   14%")
            .unwrap()
            .unwrap();
        assert_eq!(token.benchmark_name, "CountThroughput");
        assert_eq!(token.params, params(&[("StreamRate", 4780)]));
        assert_eq!(token.raw_metrics, vec!["924.4m"]);
    }

    #[test]
    fn test_benchstat_infinity_and_footnote() {
        let token = tokenize("KllThroughput/StreamRate:_100-4   1.002 ± ∞ ¹")
            .unwrap()
            .unwrap();
        assert_eq!(token.raw_metrics, vec!["1.002"]);
    }

    #[test]
    fn test_without_error_margin() {
        let token = tokenize("CenterThroughput/StreamRate:_0-4   500.0µ")
            .unwrap()
            .unwrap();
        assert_eq!(token.params, params(&[("StreamRate", 0)]));
        assert_eq!(token.raw_metrics, vec!["500.0µ"]);
    }

    // ==================== Go bench variant ====================

    #[test]
    fn test_go_bench_line_folds_units() {
        let line = "BenchmarkSystemCount/Clients:_5,MergeRate:_100,StreamRate:_200-14                    1        8342760500 ns/op       179960240 B/op    2156157 allocs/op";
        let token = tokenize(line).unwrap().unwrap();
        assert_eq!(token.benchmark_name, "SystemCount");
        assert_eq!(
            token.params,
            params(&[("Clients", 5), ("MergeRate", 100), ("StreamRate", 200)])
        );
        assert_eq!(
            token.raw_metrics,
            vec!["1", "8342760500ns", "179960240", "2156157"]
        );
    }

    #[test]
    fn test_underscore_prefixed_segment() {
        let token = tokenize(
            "BenchmarkSystem/Clients:_10,MergeRate:_1000,StreamRate:_500,_DataPoints:_5000-8   1   100 ns/op   1 B/op   1 allocs/op",
        )
        .unwrap()
        .unwrap();
        assert_eq!(token.params.len(), 4);
        assert_eq!(token.params[3], ("DataPoints".to_string(), 5000));
    }

    #[test]
    fn test_custom_prefix_disabled() {
        let tokenizer = Tokenizer::with_name_prefix(None);
        let token = tokenizer
            .tokenize("BenchmarkX/A:_1-4 1.0m")
            .unwrap()
            .unwrap();
        assert_eq!(token.benchmark_name, "BenchmarkX");
    }

    #[test]
    fn test_prefix_only_name_kept() {
        let token = tokenize("Benchmark/A:_1-4 1.0m").unwrap().unwrap();
        assert_eq!(token.benchmark_name, "Benchmark");
    }

    // ==================== NoMatch tests ====================

    #[test]
    fn test_no_match_lines() {
        for line in [
            "",
            "goos: linux",
            "pkg: github.com/example/sketches",
            "garbage text not matching grammar",
            "¹ need >= 6 samples for confidence interval at level 0.95",
            "                 │ pi-count-parsed │",
            "geomean   1.2",
            "CountThroughput/StreamRate:_4780-4",
            "results/run-1 here",
            "see docs/v2-1 for details",
        ] {
            assert!(tokenize(line).unwrap().is_none(), "line matched: {:?}", line);
        }
    }

    // ==================== Parameter error tests ====================

    #[test]
    fn test_missing_delimiter() {
        let err = tokenize("CountThroughput/StreamRate=4780-4 924.4m").unwrap_err();
        assert!(matches!(err, BenchError::MalformedParameter { .. }));
    }

    #[test]
    fn test_non_integer_value() {
        let err = tokenize("CountThroughput/StreamRate:_fast-4 924.4m").unwrap_err();
        assert!(err.to_string().contains("not an integer"));
    }

    #[test]
    fn test_parse_params_trailing_comma() {
        assert_eq!(
            parse_params("A:_1,B:_2,").unwrap(),
            params(&[("A", 1), ("B", 2)])
        );
    }

    #[test]
    fn test_parse_params_empty_key() {
        assert!(parse_params(":_5").is_err());
    }
}
