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

//! Zipf commands - dataset generation and frequency analysis

use super::{group_digits, open_file};
use crate::error::CliError;
use colored::Colorize;
use sketchbench_zipf::{generate, read_item_column, write_dataset, FrequencyTable, ZipfConfig};
use std::fs::File;
use std::io::{BufReader, BufWriter};

/// Items reported as heavy hitters in the summary share line.
const HEAVY_HITTERS: usize = 32;

/// Generate a Zipf dataset and write it as CSV.
///
/// # Errors
///
/// Returns `Err` if the parameters are invalid or the file cannot be written.
pub fn zipf_generate(
    output: &str,
    size: usize,
    distinct: u64,
    skew: f64,
    seed: Option<u64>,
    analyze: bool,
) -> Result<(), CliError> {
    let config = ZipfConfig {
        size,
        distinct,
        skew,
        seed,
    };

    println!(
        "Generating Zipf data: size={}, distinct={}, skew={}",
        group_digits(size as u64),
        group_digits(distinct),
        skew
    );
    let items = generate(&config)?;

    if analyze {
        print_analysis(&FrequencyTable::from_items(&items), 10);
    }

    let file = File::create(output).map_err(|e| CliError::io_error(output, e))?;
    write_dataset(BufWriter::new(file), &items)?;

    println!("{} Saved {} items to {}", "✓".green().bold(), group_digits(items.len() as u64), output);
    Ok(())
}

/// Print the frequency analysis of a dataset file.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read or the column is missing.
pub fn zipf_analyze(file: &str, top: usize, column: &str) -> Result<(), CliError> {
    let reader = BufReader::new(open_file(file)?);
    let items = read_item_column(reader, column)?;
    print_analysis(&FrequencyTable::from_items(&items), top);
    Ok(())
}

fn print_analysis(table: &FrequencyTable, top: usize) {
    let total = table.total();

    println!("\n{}", "=== Data Analysis ===".bold());
    println!("Total items: {}", group_digits(total));
    println!("Distinct items: {}", group_digits(table.distinct() as u64));

    println!("\nTop-{} most frequent items:", top);
    for (rank, (item, count)) in table.top_k(top).iter().enumerate() {
        let percentage = *count as f64 / total as f64 * 100.0;
        println!(
            "  #{}: Item {} → {} times ({:.2}%)",
            rank + 1,
            item,
            group_digits(*count),
            percentage
        );
    }

    println!(
        "\nTop-{} items account for: {:.2}% of all items",
        HEAVY_HITTERS,
        table.share_of_top(HEAVY_HITTERS)
    );
}
