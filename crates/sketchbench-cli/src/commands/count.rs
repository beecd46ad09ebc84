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

//! Count command - count CSV rows by column value

use super::open_file;
use crate::error::CliError;
use sketchbench_zipf::count_matching;
use std::io::BufReader;

/// Print the number of rows whose `column` equals `value`.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read or has no such column.
pub fn count(file: &str, column: &str, value: &str) -> Result<(), CliError> {
    let reader = BufReader::new(open_file(file)?);
    let matches = count_matching(reader, column, value)?;
    println!("{}", matches);
    Ok(())
}
