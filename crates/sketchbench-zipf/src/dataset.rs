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

//! Dataset CSV files.
//!
//! Datasets are two-column CSV files with a `timestamp,item_id` header, where
//! the timestamp is the item's position in the stream.

use crate::error::{Result, ZipfError};
use std::io::{Read, Write};
use tracing::debug;

/// Header of the timestamp column.
pub const TIMESTAMP_COLUMN: &str = "timestamp";
/// Header of the item column.
pub const ITEM_COLUMN: &str = "item_id";

/// Write `items` as a dataset.
///
/// # Examples
///
/// ```
/// use sketchbench_zipf::write_dataset;
///
/// let mut out = Vec::new();
/// write_dataset(&mut out, &[3, 0, 0]).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "timestamp,item_id\n0,3\n1,0\n2,0\n");
/// ```
pub fn write_dataset<W: Write>(writer: W, items: &[u64]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([TIMESTAMP_COLUMN, ITEM_COLUMN])?;
    for (timestamp, item) in items.iter().enumerate() {
        wtr.write_record(&[timestamp.to_string(), item.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read one integer column of a dataset.
///
/// # Errors
///
/// Returns [`ZipfError::MissingColumn`] when the header lacks `column` and
/// [`ZipfError::InvalidItem`] when a cell is not an unsigned integer.
pub fn read_item_column<R: Read>(reader: R, column: &str) -> Result<Vec<u64>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let index = column_index(&mut rdr, column)?;

    let mut items = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let cell = record.get(index).unwrap_or("").trim();
        let item = cell.parse::<u64>().map_err(|_| ZipfError::InvalidItem {
            row: row + 1,
            value: cell.to_string(),
        })?;
        items.push(item);
    }

    debug!(column, items = items.len(), "read dataset column");
    Ok(items)
}

/// Count rows whose `column` cell equals `value`.
///
/// Cells are compared after trimming whitespace and stray double quotes.
/// Rows too short to have the column count as empty cells.
///
/// # Errors
///
/// Returns [`ZipfError::MissingColumn`] when the header lacks `column`.
///
/// # Examples
///
/// ```
/// use sketchbench_zipf::count_matching;
///
/// let data = "id,status\n1, ok \n2,\"\"\"ok\"\"\"\n3,fail\n";
/// assert_eq!(count_matching(data.as_bytes(), "status", "ok").unwrap(), 2);
/// ```
pub fn count_matching<R: Read>(reader: R, column: &str, value: &str) -> Result<usize> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let index = column_index(&mut rdr, column)?;

    let mut count = 0;
    for record in rdr.records() {
        let record = record?;
        let cell = record.get(index).unwrap_or("").trim().trim_matches('"');
        if cell == value {
            count += 1;
        }
    }
    Ok(count)
}

fn column_index<R: Read>(rdr: &mut csv::Reader<R>, column: &str) -> Result<usize> {
    rdr.headers()?
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| ZipfError::MissingColumn(column.to_string()))
}
