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

//! Differences between successive toolchains.
//!
//! Given the result sets of `n` toolchains in report order, [`DiffEngine`]
//! annotates every toolchain after the first with its change against the one
//! before it, and for `n > 2` appends a synthetic "First to Last" result set
//! comparing the first and last toolchain directly.
//!
//! # Arithmetic
//!
//! All arithmetic is exact decimal arithmetic:
//!
//! ```text
//! difference = current - previous
//! percentage = round(difference * 100 / previous)
//! ```
//!
//! The percentage is rounded to the nearest integer, with exact halves
//! rounded away from zero (`12.5` → `13`, `-12.5` → `-13`). When `previous`
//! is zero the percentage is undefined and omitted; the difference is still
//! reported.

use crate::catalog::BenchmarkCatalog;
use crate::results::{units_of, Delta, ResultRole, ResultSet};
use rust_decimal::{Decimal, RoundingStrategy};

/// Compares one benchmark value against its predecessor.
pub fn compare(previous: Decimal, current: Decimal) -> Delta {
    let difference = current - previous;
    Delta {
        difference,
        percentage: percentage_change(previous, difference),
    }
}

/// Rounded percentage `difference` represents of `previous`.
///
/// Returns `None` for a zero `previous` or if the intermediate result does
/// not fit a decimal.
pub fn percentage_change(previous: Decimal, difference: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    let raw = difference
        .checked_mul(Decimal::ONE_HUNDRED)?
        .checked_div(previous)?;
    Some(
        raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .normalize(),
    )
}

/// Formats a rounded percentage: `+25%`, `-25%`, `0%`.
pub fn format_percentage(percentage: Decimal) -> String {
    if percentage.is_zero() {
        "0%".to_string()
    } else if percentage.is_sign_positive() {
        format!("+{}%", percentage.normalize())
    } else {
        format!("{}%", percentage.normalize())
    }
}

/// Annotates result sets with their sequential and first-to-last changes.
#[derive(Debug, Clone, Copy)]
pub struct DiffEngine<'a> {
    catalog: &'a BenchmarkCatalog,
}

impl<'a> DiffEngine<'a> {
    pub fn new(catalog: &'a BenchmarkCatalog) -> Self {
        Self { catalog }
    }

    /// Returns the report sequence for `results`.
    ///
    /// The first result set is kept as the baseline, each later one is
    /// annotated against its predecessor, and when more than two toolchains
    /// are compared a "First to Last" result set is appended.
    pub fn apply(&self, mut results: Vec<ResultSet>) -> Vec<ResultSet> {
        if let Some(first) = results.first_mut() {
            first.set_role(ResultRole::Baseline);
        }

        for i in 1..results.len() {
            let (before, after) = results.split_at_mut(i);
            let previous = &before[i - 1];
            let current = &mut after[0];
            current.set_role(ResultRole::Compared);
            for (benchmark_id, delta) in self.deltas(previous, current) {
                current.set_delta(benchmark_id, delta, units_of(self.catalog, benchmark_id));
            }
        }

        if results.len() > 2 {
            let mut summary = ResultSet::first_to_last();
            let (first, last) = (&results[0], &results[results.len() - 1]);
            for (benchmark_id, delta) in self.deltas(first, last) {
                summary.set_delta(benchmark_id, delta, units_of(self.catalog, benchmark_id));
            }
            results.push(summary);
        }

        results
    }

    // Only benchmarks present on both sides produce a delta.
    fn deltas(&self, previous: &ResultSet, current: &ResultSet) -> Vec<(i64, Delta)> {
        previous
            .values()
            .filter_map(|(id, before)| current.value(id).map(|after| (id, compare(before, after))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{FIRST_TO_LAST, SYNTHETIC_TOOLCHAIN_ID};
    use crate::store::{Benchmark, ToolChain};
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn catalog() -> BenchmarkCatalog {
        BenchmarkCatalog::new(
            (1..=2)
                .map(|id| Benchmark {
                    id,
                    section_id: 1,
                    section: "parser".to_string(),
                    name: format!("bench{}", id),
                    units: "ms".to_string(),
                })
                .collect(),
        )
    }

    fn set(
        id: i64,
        name: &str,
        values: &[(i64, Decimal)],
        catalog: &BenchmarkCatalog,
    ) -> ResultSet {
        ResultSet::from_values(
            &ToolChain::new(id, name),
            values.iter().copied().collect::<BTreeMap<_, _>>(),
            catalog,
        )
    }

    #[test]
    fn test_compare_exact() {
        let delta = compare(dec!(200), dec!(150));
        assert_eq!(delta.difference, dec!(-50));
        assert_eq!(delta.percentage, Some(dec!(-25)));
    }

    #[test]
    fn test_compare_rounds_to_nearest() {
        assert_eq!(compare(dec!(3), dec!(4)).percentage, Some(dec!(33)));
        assert_eq!(compare(dec!(3), dec!(5)).percentage, Some(dec!(67)));
        assert_eq!(compare(dec!(3), dec!(2)).percentage, Some(dec!(-33)));
    }

    #[test]
    fn test_compare_rounds_halves_away_from_zero() {
        assert_eq!(compare(dec!(8), dec!(9)).percentage, Some(dec!(13)));
        assert_eq!(compare(dec!(8), dec!(7)).percentage, Some(dec!(-13)));
    }

    #[test]
    fn test_compare_zero_previous_has_no_percentage() {
        let delta = compare(dec!(0), dec!(5));
        assert_eq!(delta.difference, dec!(5));
        assert_eq!(delta.percentage, None);
    }

    #[test]
    fn test_compare_keeps_decimal_places() {
        let delta = compare(dec!(1.25), dec!(1.5));
        assert_eq!(delta.difference.to_string(), "0.25");
        assert_eq!(delta.percentage, Some(dec!(20)));
    }

    #[test]
    fn test_format_percentage_signs() {
        assert_eq!(format_percentage(dec!(25)), "+25%");
        assert_eq!(format_percentage(dec!(-25)), "-25%");
        assert_eq!(format_percentage(dec!(0)), "0%");
        assert_eq!(format_percentage(dec!(-0)), "0%");
    }

    #[test]
    fn test_tiny_negative_change_rounds_to_unsigned_zero() {
        let percentage = compare(dec!(1000), dec!(999)).percentage.unwrap();
        assert_eq!(format_percentage(percentage), "0%");
    }

    #[test]
    fn test_two_toolchains_have_no_summary() {
        let catalog = catalog();
        let results = DiffEngine::new(&catalog).apply(vec![
            set(1, "a", &[(1, dec!(10))], &catalog),
            set(2, "b", &[(1, dec!(12))], &catalog),
        ]);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].role(), ResultRole::Baseline);
        assert_eq!(results[0].delta(1), None);
        assert_eq!(results[1].role(), ResultRole::Compared);
        assert_eq!(results[1].value(1), Some(dec!(12)));
        assert_eq!(results[1].delta(1).unwrap().difference, dec!(2));
        assert_eq!(results[1].delta(1).unwrap().percentage, Some(dec!(20)));
    }

    #[test]
    fn test_three_toolchains_compare_first_and_last_directly() {
        let catalog = catalog();
        let results = DiffEngine::new(&catalog).apply(vec![
            set(1, "v1", &[(1, dec!(100))], &catalog),
            set(2, "v2", &[(1, dec!(90))], &catalog),
            set(3, "v3", &[(1, dec!(72))], &catalog),
        ]);

        assert_eq!(results.len(), 4);
        let summary = &results[3];
        assert_eq!(summary.role(), ResultRole::FirstToLast);
        assert_eq!(summary.toolchain_id(), SYNTHETIC_TOOLCHAIN_ID);
        assert_eq!(summary.name(), FIRST_TO_LAST);
        assert_eq!(summary.value(1), None);

        let delta = summary.delta(1).unwrap();
        assert_eq!(delta.difference, dec!(-28));
        assert_eq!(delta.percentage, Some(dec!(-28)));
        assert_eq!(results[1].delta(1).unwrap().percentage, Some(dec!(-10)));
        assert_eq!(results[2].delta(1).unwrap().percentage, Some(dec!(-20)));
    }

    #[test]
    fn test_summary_is_not_accumulated_through_middle() {
        let catalog = catalog();
        let results = DiffEngine::new(&catalog).apply(vec![
            set(1, "a", &[(1, dec!(100))], &catalog),
            set(2, "b", &[(1, dec!(50))], &catalog),
            set(3, "c", &[(1, dec!(100))], &catalog),
        ]);
        let delta = results[3].delta(1).unwrap();
        assert_eq!(delta.difference, dec!(0));
        assert_eq!(delta.percentage, Some(dec!(0)));
        assert_eq!(results[2].delta(1).unwrap().percentage, Some(dec!(100)));
    }

    #[test]
    fn test_sparse_benchmarks_have_no_delta() {
        let catalog = catalog();
        let results = DiffEngine::new(&catalog).apply(vec![
            set(1, "a", &[(1, dec!(10)), (2, dec!(20))], &catalog),
            set(2, "b", &[(1, dec!(11))], &catalog),
            set(3, "c", &[(1, dec!(12)), (2, dec!(40))], &catalog),
        ]);

        assert_eq!(results[1].delta(2), None);
        assert_eq!(results[2].delta(2), None);
        assert_eq!(results[2].value(2), Some(dec!(40)));
        // first and last both have benchmark 2
        assert_eq!(results[3].delta(2).unwrap().difference, dec!(20));
    }

    #[test]
    fn test_single_and_empty_inputs() {
        let catalog = catalog();
        let single = DiffEngine::new(&catalog).apply(vec![set(1, "a", &[(1, dec!(1))], &catalog)]);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].role(), ResultRole::Baseline);
        assert!(DiffEngine::new(&catalog).apply(Vec::new()).is_empty());
    }

    #[test]
    fn test_widths_follow_deltas() {
        let catalog = catalog();
        let results = DiffEngine::new(&catalog).apply(vec![
            set(1, "a", &[(1, dec!(1000))], &catalog),
            set(2, "b", &[(1, dec!(1))], &catalog),
        ]);
        assert_eq!(results[1].widths().difference, "-999 ms".len());
        assert_eq!(results[1].widths().percentage, "-100%".len());
    }
}
