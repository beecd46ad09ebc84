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

//! Buffered line reader with line number tracking.

use crate::error::Result;
use std::io::{BufRead, BufReader, Read};

/// Buffered line reader with line number tracking.
///
/// Handles LF and CRLF endings and numbers lines from 1. Invalid UTF-8 is
/// replaced rather than reported, so one damaged line cannot end the read.
///
/// # Examples
///
/// ```rust
/// use sketchbench_core::LineReader;
/// use std::io::Cursor;
///
/// let mut reader = LineReader::new(Cursor::new("line1\r\nline2"));
///
/// assert_eq!(reader.next_line().unwrap(), Some((1, "line1".to_string())));
/// assert_eq!(reader.next_line().unwrap(), Some((2, "line2".to_string())));
/// assert_eq!(reader.next_line().unwrap(), None);
/// ```
pub struct LineReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: Vec<u8>,
}

impl<R: Read> LineReader<R> {
    /// Create a new line reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: Vec::new(),
        }
    }

    /// Number of the last line returned.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next line.
    pub fn next_line(&mut self) -> Result<Option<(usize, String)>> {
        self.buffer.clear();

        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        if self.buffer.ends_with(b"\n") {
            self.buffer.pop();
            if self.buffer.ends_with(b"\r") {
                self.buffer.pop();
            }
        }

        let line = String::from_utf8_lossy(&self.buffer).into_owned();
        Ok(Some((self.line_number, line)))
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
