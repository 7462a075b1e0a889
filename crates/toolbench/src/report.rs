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

//! Comparison reports.
//!
//! Ties the pipeline together: store → result sets → diff engine → renderer.
//!
//! # Example
//!
//! ```no_run
//! use toolbench::catalog::SectionFilter;
//! use toolbench::report::render_text_report;
//! use toolbench::store::BenchmarkStore;
//!
//! # fn main() -> toolbench::Result<()> {
//! let store = BenchmarkStore::open_existing("benchmarks.sqlite3")?;
//! let toolchains = store.list_toolchains()?;
//! render_text_report(&store, &toolchains, &SectionFilter::all(), &mut std::io::stdout())?;
//! # Ok(())
//! # }
//! ```

use crate::catalog::{BenchmarkCatalog, SectionFilter};
use crate::config::{OutputFormat, ReportConfig};
use crate::diff::DiffEngine;
use crate::error::{BenchError, Result};
use crate::render::renderer_for;
use crate::results::ResultSet;
use crate::store::{BenchmarkStore, ToolChain};
use std::io::Write;
use tracing::debug;

/// A benchmark catalog together with the compared result sets to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonReport {
    catalog: BenchmarkCatalog,
    results: Vec<ResultSet>,
}

impl ComparisonReport {
    /// Wraps result sets that have already been through the [`DiffEngine`].
    pub fn new(catalog: BenchmarkCatalog, results: Vec<ResultSet>) -> Self {
        Self { catalog, results }
    }

    /// Runs the diff engine over per-toolchain result sets, in report order.
    pub fn from_results(catalog: BenchmarkCatalog, results: Vec<ResultSet>) -> Self {
        let results = DiffEngine::new(&catalog).apply(results);
        Self { catalog, results }
    }

    /// Loads the latest results of `toolchains` for every benchmark whose
    /// section passes `filter`, and compares them.
    pub fn build(
        store: &BenchmarkStore,
        toolchains: &[ToolChain],
        filter: &SectionFilter,
    ) -> Result<Self> {
        let catalog = store.list_benchmark_catalog()?.filtered(filter);
        let results = store.results_for(toolchains, &catalog)?;
        debug!(
            toolchains = toolchains.len(),
            benchmarks = catalog.len(),
            "building comparison report"
        );
        Ok(Self::from_results(catalog, results))
    }

    pub fn catalog(&self) -> &BenchmarkCatalog {
        &self.catalog
    }

    /// Result sets in column order, including any synthetic summary.
    pub fn results(&self) -> &[ResultSet] {
        &self.results
    }

    /// Checks the rendering contract: a non-empty catalog that covers every
    /// benchmark referenced by the result sets.
    pub fn validate(&self) -> Result<()> {
        if self.catalog.is_empty() {
            return Err(BenchError::EmptyCatalog);
        }
        for set in &self.results {
            if let Some(benchmark_id) = set.benchmark_ids().find(|&id| !self.catalog.contains(id)) {
                return Err(BenchError::CatalogMismatch {
                    toolchain: set.name().to_string(),
                    benchmark_id,
                });
            }
        }
        Ok(())
    }

    /// Renders the report in `format`.
    pub fn render(&self, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
        renderer_for(format).render(self, out)
    }

    /// Renders the report to a string.
    pub fn render_to_string(&self, format: OutputFormat) -> Result<String> {
        let mut buffer = Vec::new();
        self.render(format, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| BenchError::Io(e.to_string()))
    }
}

/// Builds and renders a report as configured.
pub fn render_report(
    store: &BenchmarkStore,
    toolchains: &[ToolChain],
    config: &ReportConfig,
    out: &mut dyn Write,
) -> Result<()> {
    ComparisonReport::build(store, toolchains, &config.sections)?.render(config.format, out)
}

/// Builds and renders a report as an aligned text table.
pub fn render_text_report(
    store: &BenchmarkStore,
    toolchains: &[ToolChain],
    filter: &SectionFilter,
    out: &mut dyn Write,
) -> Result<()> {
    ComparisonReport::build(store, toolchains, filter)?.render(OutputFormat::Text, out)
}

/// Builds and renders a report as an HTML page.
pub fn render_html_report(
    store: &BenchmarkStore,
    toolchains: &[ToolChain],
    filter: &SectionFilter,
    out: &mut dyn Write,
) -> Result<()> {
    ComparisonReport::build(store, toolchains, filter)?.render(OutputFormat::Html, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Benchmark;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn catalog() -> BenchmarkCatalog {
        BenchmarkCatalog::new(vec![Benchmark {
            id: 1,
            section_id: 1,
            section: "s".to_string(),
            name: "b".to_string(),
            units: "ms".to_string(),
        }])
    }

    #[test]
    fn test_empty_catalog_fails_to_render() {
        let report = ComparisonReport::from_results(BenchmarkCatalog::default(), Vec::new());
        assert_eq!(
            report.render_to_string(OutputFormat::Text).unwrap_err(),
            BenchError::EmptyCatalog
        );
    }

    #[test]
    fn test_foreign_benchmark_fails_to_render() {
        let set = ResultSet::from_values(
            &ToolChain::new(1, "t"),
            BTreeMap::from([(1, dec!(1)), (7, dec!(2))]),
            &catalog(),
        );
        let report = ComparisonReport::from_results(catalog(), vec![set]);
        for format in [OutputFormat::Text, OutputFormat::Html, OutputFormat::Json] {
            let err = report.render_to_string(format).unwrap_err();
            assert_eq!(
                err,
                BenchError::CatalogMismatch {
                    toolchain: "t".to_string(),
                    benchmark_id: 7
                }
            );
        }
    }

    #[test]
    fn test_build_applies_filter() {
        let store = BenchmarkStore::open_in_memory().unwrap();
        let t = store.find_or_create_toolchain("t").unwrap();
        let keep = store.find_or_create_section("json.decode").unwrap();
        let drop = store.find_or_create_section("base64.encode").unwrap();
        let a = store.find_or_create_benchmark(keep, "a", "ms").unwrap();
        let b = store.find_or_create_benchmark(drop, "b", "ms").unwrap();
        store.record_entry(t, a, dec!(1)).unwrap();
        store.record_entry(t, b, dec!(2)).unwrap();

        let toolchains = store.list_toolchains().unwrap();
        let report =
            ComparisonReport::build(&store, &toolchains, &SectionFilter::new(["json"])).unwrap();

        assert_eq!(report.catalog().len(), 1);
        assert_eq!(report.results()[0].value(a), Some(dec!(1)));
        assert_eq!(report.results()[0].value(b), None);
        report.validate().unwrap();
    }
}
