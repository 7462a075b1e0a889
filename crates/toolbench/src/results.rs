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

//! Per-toolchain result sets.
//!
//! A [`ResultSet`] is the in-memory view of one report column group: the
//! latest value of each benchmark for a toolchain, optionally annotated with
//! the change against another result set. It also tracks the widest rendered
//! cell of each column kind so renderers can align output without a second
//! pass over the data.

use crate::catalog::BenchmarkCatalog;
use crate::diff::format_percentage;
use crate::store::ToolChain;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Label of the synthetic first-to-last comparison.
pub const FIRST_TO_LAST: &str = "First to Last";

/// Toolchain id used by synthetic result sets.
pub const SYNTHETIC_TOOLCHAIN_ID: i64 = -1;

/// How a result set takes part in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultRole {
    /// First toolchain: values only.
    Baseline,
    /// Later toolchain: values plus the change against its predecessor.
    Compared,
    /// Synthetic summary: change between the first and last toolchain only.
    FirstToLast,
}

impl ResultRole {
    /// Whether the role renders a value column.
    pub fn has_values(self) -> bool {
        matches!(self, Self::Baseline | Self::Compared)
    }

    /// Whether the role renders difference and percentage columns.
    pub fn has_deltas(self) -> bool {
        matches!(self, Self::Compared | Self::FirstToLast)
    }
}

/// Change of one benchmark between two result sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Delta {
    /// `current - previous`.
    pub difference: Decimal,
    /// Percentage change rounded to an integer; `None` when the previous value is zero.
    pub percentage: Option<Decimal>,
}

/// Everything a result set knows about one benchmark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResultEntry {
    pub value: Option<Decimal>,
    pub delta: Option<Delta>,
}

/// Widest rendered cell per column kind, in characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ColumnWidths {
    pub value: usize,
    pub difference: usize,
    pub percentage: usize,
}

/// Benchmark values (and deltas) for one toolchain or synthetic comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    toolchain_id: i64,
    name: String,
    role: ResultRole,
    entries: BTreeMap<i64, ResultEntry>,
    widths: ColumnWidths,
}

impl ResultSet {
    /// Creates a baseline result set from the latest values of `toolchain`.
    ///
    /// Benchmarks without a value are simply absent from `values`.
    pub fn from_values(
        toolchain: &ToolChain,
        values: BTreeMap<i64, Decimal>,
        catalog: &BenchmarkCatalog,
    ) -> Self {
        let mut set = Self {
            toolchain_id: toolchain.id,
            name: toolchain.name.clone(),
            role: ResultRole::Baseline,
            entries: BTreeMap::new(),
            widths: ColumnWidths::default(),
        };
        for (benchmark_id, value) in values {
            let units = units_of(catalog, benchmark_id);
            set.widths.value = set.widths.value.max(format_value(value, units).chars().count());
            set.entries.entry(benchmark_id).or_default().value = Some(value);
        }
        set
    }

    /// Creates the empty first-to-last summary.
    pub fn first_to_last() -> Self {
        Self {
            toolchain_id: SYNTHETIC_TOOLCHAIN_ID,
            name: FIRST_TO_LAST.to_string(),
            role: ResultRole::FirstToLast,
            entries: BTreeMap::new(),
            widths: ColumnWidths::default(),
        }
    }

    pub fn toolchain_id(&self) -> i64 {
        self.toolchain_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> ResultRole {
        self.role
    }

    pub fn widths(&self) -> ColumnWidths {
        self.widths
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Benchmark ids with a value or delta, ascending.
    pub fn benchmark_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.entries.keys().copied()
    }

    /// Benchmark ids paired with their value, for benchmarks that have one.
    pub fn values(&self) -> impl Iterator<Item = (i64, Decimal)> + '_ {
        self.entries
            .iter()
            .filter_map(|(&id, entry)| entry.value.map(|value| (id, value)))
    }

    pub fn entry(&self, benchmark_id: i64) -> Option<&ResultEntry> {
        self.entries.get(&benchmark_id)
    }

    pub fn value(&self, benchmark_id: i64) -> Option<Decimal> {
        self.entry(benchmark_id).and_then(|e| e.value)
    }

    pub fn delta(&self, benchmark_id: i64) -> Option<Delta> {
        self.entry(benchmark_id).and_then(|e| e.delta)
    }

    /// Rendered value cell, e.g. `100 ms`.
    pub fn value_text(&self, benchmark_id: i64, units: &str) -> Option<String> {
        self.value(benchmark_id).map(|v| format_value(v, units))
    }

    /// Rendered difference cell, e.g. `-10 ms`.
    pub fn difference_text(&self, benchmark_id: i64, units: &str) -> Option<String> {
        self.delta(benchmark_id)
            .map(|d| format_value(d.difference, units))
    }

    /// Rendered percentage cell, e.g. `+25%`.
    pub fn percentage_text(&self, benchmark_id: i64) -> Option<String> {
        self.delta(benchmark_id)
            .and_then(|d| d.percentage)
            .map(format_percentage)
    }

    pub(crate) fn set_role(&mut self, role: ResultRole) {
        self.role = role;
    }

    pub(crate) fn set_delta(&mut self, benchmark_id: i64, delta: Delta, units: &str) {
        self.widths.difference = self
            .widths
            .difference
            .max(format_value(delta.difference, units).chars().count());
        if let Some(percentage) = delta.percentage {
            self.widths.percentage = self
                .widths
                .percentage
                .max(format_percentage(percentage).chars().count());
        }
        self.entries.entry(benchmark_id).or_default().delta = Some(delta);
    }
}

/// Formats a value with its units label.
pub fn format_value(value: Decimal, units: &str) -> String {
    if units.is_empty() {
        value.to_string()
    } else {
        format!("{} {}", value, units)
    }
}

pub(crate) fn units_of(catalog: &BenchmarkCatalog, benchmark_id: i64) -> &str {
    catalog
        .get(benchmark_id)
        .map(|b| b.units.as_str())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Benchmark;
    use rust_decimal_macros::dec;

    fn catalog() -> BenchmarkCatalog {
        BenchmarkCatalog::new(vec![
            Benchmark {
                id: 1,
                section_id: 1,
                section: "s".to_string(),
                name: "fast".to_string(),
                units: "ms".to_string(),
            },
            Benchmark {
                id: 2,
                section_id: 1,
                section: "s".to_string(),
                name: "count".to_string(),
                units: String::new(),
            },
        ])
    }

    #[test]
    fn test_from_values_tracks_value_width() {
        let values = BTreeMap::from([(1, dec!(1234.5)), (2, dec!(7))]);
        let set = ResultSet::from_values(&ToolChain::new(3, "stable"), values, &catalog());

        assert_eq!(set.toolchain_id(), 3);
        assert_eq!(set.name(), "stable");
        assert_eq!(set.role(), ResultRole::Baseline);
        assert_eq!(set.widths().value, "1234.5 ms".len());
        assert_eq!(set.value_text(1, "ms").as_deref(), Some("1234.5 ms"));
        assert_eq!(set.value_text(2, "").as_deref(), Some("7"));
    }

    #[test]
    fn test_absent_values_have_no_text() {
        let set = ResultSet::from_values(&ToolChain::new(1, "t"), BTreeMap::new(), &catalog());
        assert!(set.is_empty());
        assert_eq!(set.value_text(1, "ms"), None);
        assert_eq!(set.difference_text(1, "ms"), None);
        assert_eq!(set.percentage_text(1), None);
    }

    #[test]
    fn test_set_delta_updates_widths() {
        let mut set = ResultSet::first_to_last();
        set.set_delta(
            1,
            Delta {
                difference: dec!(-28),
                percentage: Some(dec!(-28)),
            },
            "ms",
        );
        assert_eq!(set.toolchain_id(), SYNTHETIC_TOOLCHAIN_ID);
        assert_eq!(set.name(), FIRST_TO_LAST);
        assert_eq!(set.widths().difference, "-28 ms".len());
        assert_eq!(set.widths().percentage, "-28%".len());
        assert_eq!(set.widths().value, 0);
        assert_eq!(set.value(1), None);
        assert_eq!(set.percentage_text(1).as_deref(), Some("-28%"));
    }

    #[test]
    fn test_roles() {
        assert!(ResultRole::Baseline.has_values());
        assert!(!ResultRole::Baseline.has_deltas());
        assert!(ResultRole::Compared.has_values() && ResultRole::Compared.has_deltas());
        assert!(!ResultRole::FirstToLast.has_values());
        assert!(ResultRole::FirstToLast.has_deltas());
    }
}
