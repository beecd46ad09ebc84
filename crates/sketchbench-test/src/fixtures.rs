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

//! Report text fixtures.

/// Benchstat summary of client throughput with percentage margins.
pub fn benchstat_throughput() -> String {
    "goos: linux
goarch: arm64
pkg: github.com/example/sketches/client
                                  │ pi-count-parsed │
                                  │     sec/op      │
CountThroughput/StreamRate:_4780-4        924.4m ±   14%
CountThroughput/StreamRate:_4810-4         1.033 ±   11%
CountThroughput/StreamRate:_4840-4        991.6m ±    9%
CountThroughput/StreamRate:_0-4            1.402 ±    3%
geomean                                    1.077
"
    .to_string()
}

/// Benchstat summary with infinite margins and a footnote.
pub fn benchstat_infinite_margin() -> String {
    "goos: linux
goarch: amd64
pkg: github.com/example/sketches/server
cpu: Intel(R) Xeon(R) CPU @ 2.20GHz
KllThroughput/StreamRate:_100-4       1.002 ± ∞ ¹
KllThroughput/StreamRate:_200-4       500.0µ ± ∞ ¹
CenterThroughput/StreamRate:_100-4    991.6m ± ∞ ¹
¹ need >= 6 samples for confidence interval at level 0.95
"
    .to_string()
}

/// Raw `go test -bench` output with repeated runs.
pub fn go_bench_server() -> String {
    "goos: linux
goarch: amd64
pkg: github.com/example/sketches/server
BenchmarkSystemCount/Clients:_5,MergeRate:_100,StreamRate:_200-14                    1        8342760500 ns/op       179960240 B/op    2156157 allocs/op
BenchmarkSystemCount/Clients:_5,MergeRate:_100,StreamRate:_200-14                    1        8311962900 ns/op       112735448 B/op    1840107 allocs/op
BenchmarkSystemCount/Clients:_10,MergeRate:_100,StreamRate:_200-14                   1        8581953600 ns/op       104282752 B/op    1800362 allocs/op
BenchmarkSystemKll/Clients:_5,MergeRate:_100,StreamRate:_200-14                      1        8352640300 ns/op        97442824 B/op    1768114 allocs/op
PASS
ok  	github.com/example/sketches/server	42.118s
"
    .to_string()
}

/// A report with noise and broken lines around two good results.
pub fn noisy_report() -> String {
    "garbage text not matching grammar
CountThroughput/StreamRate:_4780-4        924.4m ±   14%

CountThroughput/StreamRate:_oops-4        924.4m ±   14%
CountThroughput/StreamRate:_4790-4        12.0x ±   14%
CountThroughput/StreamRate:_4800-4        1.0m 2.0m ±   14%
CountThroughput/StreamRate:_4810-4         1.033 ±   11%
"
    .to_string()
}

/// Paired-line latency report: headers followed by nanosecond samples.
pub fn paired_latency() -> String {
    "Clients: 10, MergeRate: 1000, StreamRate: 500
[100000000 200000000 150000000]
Clients: 20, MergeRate: 1000, StreamRate: 500
[120000000 180000000]

Clients: 10, MergeRate: 2000, StreamRate: 500
[90000000]
"
    .to_string()
}
