// Dweve Toolbench - Toolchain Benchmark Comparison
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

//! Report renderers.
//!
//! # Modules
//!
//! - `text`: pipe delimited, column aligned table (renders as Markdown)
//! - `html`: standalone HTML page
//! - `json`: machine-readable export
//!
//! All renderers share the same column layout. Each result set contributes,
//! in order, a value column (baseline and compared toolchains) followed by a
//! difference and a percentage column (compared toolchains and the
//! first-to-last summary). Missing data renders as an empty cell; rendering
//! only fails on an empty catalog or a result set that does not belong to the
//! catalog.

mod html;
mod json;
mod text;

pub use html::HtmlRenderer;
pub use json::JsonRenderer;
pub use text::TextRenderer;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::report::ComparisonReport;
use crate::results::{ResultRole, ResultSet, FIRST_TO_LAST};
use crate::store::Benchmark;
use std::io::Write;

/// Header of sequential difference columns.
pub const DIFFERENCE_HEADING: &str = "difference";

/// Header of percentage columns.
pub const PERCENTAGE_HEADING: &str = "pct";

/// Writes a [`ComparisonReport`] in one output format.
pub trait Renderer {
    /// Renders `report` to `out`.
    ///
    /// # Errors
    ///
    /// - [`crate::BenchError::EmptyCatalog`] if the report has no benchmarks
    /// - [`crate::BenchError::CatalogMismatch`] if a result set references a
    ///   benchmark outside the catalog
    /// - [`crate::BenchError::Io`] if writing fails
    fn render(&self, report: &ComparisonReport, out: &mut dyn Write) -> Result<()>;
}

/// Returns the renderer for `format`.
pub fn renderer_for(format: OutputFormat) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer),
        OutputFormat::Html => Box::new(HtmlRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    Value,
    Difference,
    Percentage,
}

/// One rendered column of a report.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Column<'a> {
    pub set: &'a ResultSet,
    /// Index of the owning result set; drives odd/even styling.
    pub group: usize,
    pub kind: ColumnKind,
    pub label: &'a str,
    /// max(label, widest cell), in characters.
    pub width: usize,
}

impl Column<'_> {
    pub fn cell(&self, benchmark: &Benchmark) -> Option<String> {
        match self.kind {
            ColumnKind::Value => self.set.value_text(benchmark.id, &benchmark.units),
            ColumnKind::Difference => self.set.difference_text(benchmark.id, &benchmark.units),
            ColumnKind::Percentage => self.set.percentage_text(benchmark.id),
        }
    }
}

pub(crate) fn columns(results: &[ResultSet]) -> Vec<Column<'_>> {
    let mut columns = Vec::new();
    for (group, set) in results.iter().enumerate() {
        let widths = set.widths();
        if set.role().has_values() {
            columns.push(column(set, group, ColumnKind::Value, set.name(), widths.value));
        }
        if set.role().has_deltas() {
            let label = match set.role() {
                ResultRole::FirstToLast => FIRST_TO_LAST,
                _ => DIFFERENCE_HEADING,
            };
            columns.push(column(set, group, ColumnKind::Difference, label, widths.difference));
            columns.push(column(
                set,
                group,
                ColumnKind::Percentage,
                PERCENTAGE_HEADING,
                widths.percentage,
            ));
        }
    }
    columns
}

fn column<'a>(
    set: &'a ResultSet,
    group: usize,
    kind: ColumnKind,
    label: &'a str,
    data_width: usize,
) -> Column<'a> {
    Column {
        set,
        group,
        kind,
        label,
        width: data_width.max(label.chars().count()),
    }
}
