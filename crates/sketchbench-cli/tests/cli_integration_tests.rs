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

//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use sketchbench_test::fixtures;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// Test helper to create a sketchbench command
fn sketchbench_cmd() -> Command {
    Command::cargo_bin("sketchbench").expect("Failed to find sketchbench binary")
}

// Test helper to write a file into a temporary directory
fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write temp file");
    path
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    sketchbench_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sketchbench - benchmark report analysis"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_output() {
    sketchbench_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sketchbench"));
}

#[test]
fn test_no_subcommand_fails() {
    sketchbench_cmd().assert().failure();
}

// ===== Parse Command Tests =====

#[test]
fn test_parse_benchstat_report() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "client.txt", &fixtures::benchstat_throughput());

    sketchbench_cmd()
        .arg("parse")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("CountThroughput/StreamRate=4780  latency_ms=924.4"))
        .stdout(predicate::str::contains("CountThroughput/StreamRate=4810  latency_ms=1033"))
        .stderr(predicate::str::contains("4 record(s) from 10 line(s)"));
}

#[test]
fn test_parse_json() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "server.txt", &fixtures::go_bench_server());

    let output = sketchbench_cmd().arg("parse").arg(&file).arg("--json").output().unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["source"], "server");
    assert_eq!(doc["metadata"]["goarch"], "amd64");
    assert_eq!(doc["records"].as_array().unwrap().len(), 4);
    assert_eq!(doc["records"][0]["benchmark_name"], "SystemCount");
    assert_eq!(doc["records"][0]["shape"], "detailed");
    assert_eq!(doc["records"][0]["params"]["Clients"], 5);
    assert_eq!(doc["stats"]["records"], 4);
}

#[test]
fn test_parse_paired_with_name() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "latency.txt", &fixtures::paired_latency());

    sketchbench_cmd()
        .args(["parse", "--paired", "--name", "KllLatency"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "KllLatency/Clients=10,MergeRate=1000,StreamRate=500  latency_ms=100",
        ));
}

#[test]
fn test_parse_missing_file() {
    sketchbench_cmd()
        .args(["parse", "/nonexistent/report.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("/nonexistent/report.txt"));
}

#[test]
fn test_parse_file_size_limit() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "client.txt", &fixtures::benchstat_throughput());

    sketchbench_cmd()
        .env("SKETCHBENCH_MAX_FILE_SIZE", "10")
        .arg("parse")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large"));
}

// ===== Aggregate Command Tests =====

#[test]
fn test_aggregate_two_reports() {
    let dir = TempDir::new().unwrap();
    let a = write_file(&dir, "a.txt", &fixtures::benchstat_throughput());
    let b = write_file(&dir, "b.txt", &fixtures::noisy_report());

    sketchbench_cmd()
        .arg("aggregate")
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("benchmark,StreamRate,latency_ms,sample_count\n"))
        .stdout(predicate::str::contains("CountThroughput,4780,924.4,2"))
        .stdout(predicate::str::contains("CountThroughput,4840,991.6,1"))
        .stderr(predicate::str::contains("a: 4 record(s)"));
}

#[test]
fn test_aggregate_text_to_file() {
    let dir = TempDir::new().unwrap();
    let a = write_file(&dir, "a.txt", &fixtures::benchstat_throughput());
    let out = dir.path().join("out.txt");

    sketchbench_cmd()
        .arg("aggregate")
        .arg(&a)
        .args(["--format", "text", "-o"])
        .arg(&out)
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("CountThroughput/StreamRate=0  n=1  latency_ms=1402"));
}

#[test]
fn test_aggregate_missing_file_still_writes() {
    let dir = TempDir::new().unwrap();
    let a = write_file(&dir, "a.txt", &fixtures::benchstat_throughput());

    sketchbench_cmd()
        .arg("aggregate")
        .arg(&a)
        .arg(dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("CountThroughput,4780,924.4,1"))
        .stderr(predicate::str::contains("missing: "))
        .stderr(predicate::str::contains("1 of 2 source(s) could not be read"));
}

#[test]
fn test_aggregate_latex_rejected() {
    let dir = TempDir::new().unwrap();
    let a = write_file(&dir, "a.txt", &fixtures::benchstat_throughput());

    sketchbench_cmd()
        .arg("aggregate")
        .arg(&a)
        .args(["--format", "latex"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

// ===== Rates Command Tests =====

#[test]
fn test_rates_csv() {
    let dir = TempDir::new().unwrap();
    let a = write_file(&dir, "client.txt", &fixtures::benchstat_throughput());

    sketchbench_cmd()
        .arg("rates")
        .arg(&a)
        .args(["--workload-size", "7000"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "benchmark,StreamRate,stream_rate_tuples_per_sec,processing_rate_tuples_per_sec\n",
        ))
        .stdout(predicate::str::contains("CountThroughput,4780,209205.02"))
        .stdout(predicate::str::contains("CountThroughput,0,").not())
        .stderr(predicate::str::contains("Derived 3 group(s), skipped 1"));
}

#[test]
fn test_rates_micros_and_scale() {
    let dir = TempDir::new().unwrap();
    let a = write_file(&dir, "client.txt", "Count/Clients:_4,StreamRate:_500-4   2.0m\n");

    sketchbench_cmd()
        .arg("rates")
        .arg(&a)
        .args(["-w", "1000", "--micros", "--scale-by", "Clients"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Count,4,500,2000,2000000"));
}

#[test]
fn test_rates_latex() {
    let dir = TempDir::new().unwrap();
    let a = write_file(&dir, "client.txt", &fixtures::benchstat_throughput());

    sketchbench_cmd()
        .arg("rates")
        .arg(&a)
        .args(["--workload-size", "7000", "--latex"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\\begin{longtable}{|l|r|r|}"))
        .stdout(predicate::str::contains("on linux (arm64)"))
        .stdout(predicate::str::contains("CountThroughput & 209,205.021 &"));
}

#[test]
fn test_rates_requires_workload_size() {
    let dir = TempDir::new().unwrap();
    let a = write_file(&dir, "client.txt", &fixtures::benchstat_throughput());

    sketchbench_cmd().arg("rates").arg(&a).assert().failure();
}

// ===== Latency Command Tests =====

#[test]
fn test_latency_summary() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "kll.txt", &fixtures::paired_latency());

    sketchbench_cmd()
        .arg("latency")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("kll/Clients=10,MergeRate=1000,StreamRate=500  n=3"))
        .stdout(predicate::str::contains("median=150.000"));
}

// ===== Run Command Tests =====

#[test]
fn test_run_manifest_with_rates() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "client.txt", &fixtures::benchstat_throughput());
    let manifest = write_file(
        &dir,
        "sources.yaml",
        "sources:\n  - name: client\n    path: client.txt\nrates:\n  workload_size: 7000\noutput: rates.csv\n",
    );

    sketchbench_cmd()
        .args(["run", "--manifest"])
        .arg(&manifest)
        .assert()
        .success()
        .stderr(predicate::str::contains("Derived 3 group(s), skipped 1"));

    let content = fs::read_to_string(dir.path().join("rates.csv")).unwrap();
    assert!(content.contains("CountThroughput,4780,209205.02"));
}

#[test]
fn test_run_manifest_without_rates() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "server.txt", &fixtures::go_bench_server());
    let manifest = write_file(&dir, "sources.yaml", "sources:\n  - name: server\n    path: server.txt\n");

    sketchbench_cmd()
        .args(["run", "-m"])
        .arg(&manifest)
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SystemCount/Clients=5,MergeRate=100,StreamRate=200  n=2"));
}

#[test]
fn test_run_manifest_missing_source() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "client.txt", &fixtures::benchstat_throughput());
    let manifest = write_file(
        &dir,
        "sources.yaml",
        "sources:\n  - name: client\n    path: client.txt\n  - name: gone\n    path: gone.txt\n",
    );

    sketchbench_cmd()
        .args(["run", "-m"])
        .arg(&manifest)
        .assert()
        .failure()
        .stdout(predicate::str::contains("CountThroughput,4780,924.4,1"))
        .stderr(predicate::str::contains("gone: "));
}

#[test]
fn test_run_invalid_manifest() {
    let dir = TempDir::new().unwrap();
    let manifest = write_file(&dir, "sources.yaml", "sources: []\n");

    sketchbench_cmd()
        .args(["run", "-m"])
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid manifest"));
}

// ===== Zipf Command Tests =====

#[test]
fn test_zipf_generate_and_analyze() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("zipf.csv");

    sketchbench_cmd()
        .args(["zipf", "generate", "-s", "1000", "-d", "100", "--seed", "1", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 1,000 items"));

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("timestamp,item_id\n0,"));
    assert_eq!(content.lines().count(), 1001);

    sketchbench_cmd()
        .args(["zipf", "analyze", "--top", "3"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total items: 1,000"))
        .stdout(predicate::str::contains("#1: Item 0"))
        .stdout(predicate::str::contains("Top-32 items account for"));
}

#[test]
fn test_zipf_invalid_skew() {
    let dir = TempDir::new().unwrap();

    sketchbench_cmd()
        .args(["zipf", "generate", "-z", "1.0", "-s", "10", "-o"])
        .arg(dir.path().join("zipf.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid skew"));
}

// ===== Count Command Tests =====

#[test]
fn test_count_matching_rows() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "gt.csv", "id,status\n1,ok\n2,fail\n3, \"ok\" \n");

    sketchbench_cmd()
        .arg("count")
        .arg(&file)
        .args(["status", "ok"])
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn test_count_missing_column() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "gt.csv", "id,status\n1,ok\n");

    sketchbench_cmd()
        .arg("count")
        .arg(&file)
        .args(["state", "ok"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing column: state"));
}
