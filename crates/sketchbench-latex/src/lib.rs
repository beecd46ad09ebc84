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

//! LaTeX appendix tables for derived benchmark rates.
//!
//! Renders [`DerivedRecord`](sketchbench_core::DerivedRecord) lists as a
//! `longtable` environment: a caption built from the report's `goos`,
//! `goarch` and `pkg` headers, a repeated header on every page, and one row
//! per group with the stream rate and processing rate.
//!
//! Requires `\usepackage{longtable}` in the including document.

mod error;
mod table;

pub use error::{LatexError, Result};
pub use table::{escape, to_longtable, to_longtable_writer, LatexConfig};
