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

//! Aligned text export that renders as a Markdown table on GitHub.

use super::{columns, Column, Renderer};
use crate::error::Result;
use crate::report::ComparisonReport;
use std::io::Write;

/// Pipe delimited table with one header block per section.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, report: &ComparisonReport, out: &mut dyn Write) -> Result<()> {
        report.validate()?;

        let columns = columns(report.results());
        let name_width = report.catalog().name_width();
        let separator = separator_row(name_width, &columns);

        for (index, section) in report.catalog().sections().into_iter().enumerate() {
            if index > 0 {
                writeln!(out)?;
            }

            let mut header = format!("| {:<width$} |", section.name, width = name_width);
            for column in &columns {
                header.push_str(&format!(" {:<width$} |", column.label, width = column.width));
            }
            writeln!(out, "{}", header)?;
            writeln!(out, "{}", separator)?;

            for benchmark in section.benchmarks {
                let mut row = format!("| {:<width$} |", benchmark.name, width = name_width);
                for column in &columns {
                    let cell = column.cell(benchmark).unwrap_or_default();
                    row.push_str(&format!(" {:>width$} |", cell, width = column.width));
                }
                writeln!(out, "{}", row)?;
            }
        }

        out.flush()?;
        Ok(())
    }
}

fn separator_row(name_width: usize, columns: &[Column<'_>]) -> String {
    let mut row = format!("|{}|", "-".repeat(name_width + 2));
    for column in columns {
        row.push_str(&"-".repeat(column.width + 2));
        row.push('|');
    }
    row
}
