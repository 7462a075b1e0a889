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

//! JSON export.
//!
//! Decimals are written as strings so no precision is lost.

use super::Renderer;
use crate::error::Result;
use crate::report::ComparisonReport;
use crate::results::{ResultRole, ResultSet};
use crate::store::Benchmark;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// Pretty printed JSON document mirroring the table layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonReport<'a> {
    toolchains: Vec<JsonToolchain<'a>>,
    sections: Vec<JsonSection<'a>>,
}

#[derive(Serialize)]
struct JsonToolchain<'a> {
    name: &'a str,
    toolchain_id: i64,
    role: ResultRole,
}

#[derive(Serialize)]
struct JsonSection<'a> {
    name: &'a str,
    benchmarks: Vec<JsonBenchmark<'a>>,
}

#[derive(Serialize)]
struct JsonBenchmark<'a> {
    name: &'a str,
    units: &'a str,
    results: Vec<JsonCell<'a>>,
}

#[derive(Serialize)]
struct JsonCell<'a> {
    toolchain: &'a str,
    value: Option<Decimal>,
    difference: Option<Decimal>,
    percentage: Option<Decimal>,
}

impl<'a> JsonCell<'a> {
    fn new(set: &'a ResultSet, benchmark: &Benchmark) -> Self {
        let delta = set.delta(benchmark.id);
        Self {
            toolchain: set.name(),
            value: set.value(benchmark.id),
            difference: delta.map(|d| d.difference),
            percentage: delta.and_then(|d| d.percentage),
        }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, report: &ComparisonReport, out: &mut dyn Write) -> Result<()> {
        report.validate()?;

        let document = JsonReport {
            toolchains: report
                .results()
                .iter()
                .map(|set| JsonToolchain {
                    name: set.name(),
                    toolchain_id: set.toolchain_id(),
                    role: set.role(),
                })
                .collect(),
            sections: report
                .catalog()
                .sections()
                .into_iter()
                .map(|section| JsonSection {
                    name: section.name,
                    benchmarks: section
                        .benchmarks
                        .iter()
                        .map(|benchmark| JsonBenchmark {
                            name: &benchmark.name,
                            units: &benchmark.units,
                            results: report
                                .results()
                                .iter()
                                .map(|set| JsonCell::new(set, benchmark))
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        };

        serde_json::to_writer_pretty(&mut *out, &document)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}
