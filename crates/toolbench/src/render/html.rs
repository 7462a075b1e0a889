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

//! Standalone HTML page export.

use super::{columns, Column, ColumnKind, Renderer};
use crate::error::Result;
use crate::report::ComparisonReport;
use std::io::Write;

const TITLE: &str = "Toolchain Benchmarks";

/// One table for the whole report, with a spacer row between sections and
/// alternating shading per toolchain.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, report: &ComparisonReport, out: &mut dyn Write) -> Result<()> {
        report.validate()?;

        let columns = columns(report.results());
        let sections = report.catalog().sections();

        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html>\n<head>")?;
        writeln!(out, "<meta charset=\"utf-8\">")?;
        writeln!(out, "<title>{}</title>", TITLE)?;
        writeln!(out, "<style>\n{}</style>", include_str!("styles.css"))?;
        writeln!(out, "</head>\n<body>\n<table>")?;

        for (index, section) in sections.iter().enumerate() {
            let name = escape(section.name);
            writeln!(out, "\t<!-- Start of {} -->", name)?;
            writeln!(out, "\t{}", header_row(&name, &columns))?;

            for benchmark in section.benchmarks {
                let mut row = format!("<tr><td align=\"left\">{}</td>", escape(&benchmark.name));
                for column in &columns {
                    let class = shading(column);
                    match column.cell(benchmark) {
                        Some(text) => row.push_str(&format!(
                            "<td align=\"right\" class=\"{}\">{}</td>",
                            class,
                            escape(&text)
                        )),
                        None => row.push_str(&format!("<td class=\"{}\"></td>", class)),
                    }
                }
                row.push_str("</tr>");
                writeln!(out, "\t{}", row)?;
            }

            writeln!(out, "\t<!-- End of {} -->", name)?;
            if index + 1 < sections.len() {
                writeln!(out, "\t<tr><td class=\"spacer\" colspan=\"100%\"></td></tr>")?;
            }
        }

        writeln!(out, "</table>\n</body>\n</html>")?;
        out.flush()?;
        Ok(())
    }
}

// The difference header spans its percentage column.
fn header_row(section: &str, columns: &[Column<'_>]) -> String {
    let mut row = format!("<tr><th align=\"left\">{}</th>", section);
    for column in columns {
        let class = shading(column);
        match column.kind {
            ColumnKind::Value => {
                row.push_str(&format!("<th class=\"{}\">{}</th>", class, escape(column.label)))
            }
            ColumnKind::Difference => row.push_str(&format!(
                "<th class=\"{}\" colspan=\"2\">{}</th>",
                class,
                escape(column.label)
            )),
            ColumnKind::Percentage => {}
        }
    }
    row.push_str("</tr>");
    row
}

fn shading(column: &Column<'_>) -> &'static str {
    if column.group % 2 == 0 {
        "odd"
    } else {
        "even"
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
