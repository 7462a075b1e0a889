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

//! Benchmark catalog and section filtering.
//!
//! The catalog is the ordered list of benchmarks a report covers. Its order
//! (section id, then benchmark name) fixes the row order of every report and
//! guarantees that the benchmarks of one section are contiguous.

use crate::store::Benchmark;
use std::collections::HashMap;
use std::convert::Infallible;
use std::str::FromStr;

/// Ordered list of benchmarks with an id index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BenchmarkCatalog {
    benchmarks: Vec<Benchmark>,
    index: HashMap<i64, usize>,
}

/// A run of consecutive catalog entries sharing one section name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionGroup<'a> {
    /// Section name.
    pub name: &'a str,
    /// Benchmarks of the section, in catalog order.
    pub benchmarks: &'a [Benchmark],
}

impl BenchmarkCatalog {
    /// Creates a catalog, keeping the given order.
    pub fn new(benchmarks: Vec<Benchmark>) -> Self {
        let index = benchmarks
            .iter()
            .enumerate()
            .map(|(position, benchmark)| (benchmark.id, position))
            .collect();
        Self { benchmarks, index }
    }

    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Benchmark> {
        self.benchmarks.iter()
    }

    /// Looks up a benchmark by id.
    pub fn get(&self, id: i64) -> Option<&Benchmark> {
        self.index.get(&id).map(|&position| &self.benchmarks[position])
    }

    pub fn contains(&self, id: i64) -> bool {
        self.index.contains_key(&id)
    }

    /// Returns a catalog holding only the benchmarks whose section passes `filter`.
    pub fn filtered(&self, filter: &SectionFilter) -> Self {
        if filter.is_all() {
            return self.clone();
        }
        Self::new(
            self.benchmarks
                .iter()
                .filter(|benchmark| filter.matches(&benchmark.section))
                .cloned()
                .collect(),
        )
    }

    /// Splits the catalog into groups, starting a new one whenever the
    /// section name changes from the previous row.
    pub fn sections(&self) -> Vec<SectionGroup<'_>> {
        let mut groups = Vec::new();
        let mut start = 0;
        for position in 1..=self.benchmarks.len() {
            let boundary = position == self.benchmarks.len()
                || self.benchmarks[position].section != self.benchmarks[start].section;
            if boundary {
                groups.push(SectionGroup {
                    name: &self.benchmarks[start].section,
                    benchmarks: &self.benchmarks[start..position],
                });
                start = position;
            }
        }
        groups
    }

    /// Widest section or benchmark name, in characters.
    pub fn name_width(&self) -> usize {
        self.benchmarks
            .iter()
            .map(|b| b.name.chars().count().max(b.section.chars().count()))
            .max()
            .unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a BenchmarkCatalog {
    type Item = &'a Benchmark;
    type IntoIter = std::slice::Iter<'a, Benchmark>;

    fn into_iter(self) -> Self::IntoIter {
        self.benchmarks.iter()
    }
}

/// Restricts a report to sections whose name starts with one of a set of
/// prefixes. An empty prefix list matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionFilter {
    prefixes: Vec<String>,
}

impl SectionFilter {
    /// A filter that matches every section.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn matches(&self, section: &str) -> bool {
        self.is_all() || self.prefixes.iter().any(|p| section.starts_with(p.as_str()))
    }
}

/// Parses `all` or a comma separated prefix list.
impl FromStr for SectionFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(Self::all());
        }
        Ok(Self::new(s.split(',').map(str::trim)))
    }
}
