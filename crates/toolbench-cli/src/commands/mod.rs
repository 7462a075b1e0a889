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

//! CLI command implementations

mod benchmark;
mod manage;
mod show;

pub use benchmark::benchmark;
pub use manage::{delete, list, rename};
pub use show::show;

use crate::error::{CliError, Result};
use std::io::{self, Write};
use toolbench::{render_report, BenchError, BenchmarkStore, ReportConfig, SectionFilter, ToolChain};

/// Finds a toolchain by exact name, then by numeric id.
pub fn lookup_toolchain(store: &BenchmarkStore, argument: &str) -> Result<ToolChain> {
    if let Some(toolchain) = store.toolchain_by_name(argument)? {
        return Ok(toolchain);
    }
    match argument.parse::<i64>() {
        Ok(id) => Ok(store.toolchain(id)?),
        Err(_) => Err(BenchError::not_found("toolchain", argument).into()),
    }
}

/// Fails on a `--tests` prefix that matches no recorded section.
pub fn check_sections(store: &BenchmarkStore, filter: &SectionFilter) -> Result<()> {
    if filter.is_all() {
        return Ok(());
    }
    let sections: Vec<String> = store.list_sections()?.into_iter().map(|s| s.name).collect();
    for prefix in filter.prefixes() {
        if !sections.iter().any(|s| s.starts_with(prefix.as_str())) {
            let mut available = sections.clone();
            available.sort();
            return Err(CliError::UnknownTestFilter {
                name: prefix.clone(),
                available,
            });
        }
    }
    Ok(())
}

/// Renders the comparison of `toolchains` to stdout.
pub fn print_report(
    store: &BenchmarkStore,
    toolchains: &[ToolChain],
    config: &ReportConfig,
) -> Result<()> {
    check_sections(store, &config.sections)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_report(store, toolchains, config, &mut out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> BenchmarkStore {
        let store = BenchmarkStore::open_in_memory().unwrap();
        store.find_or_create_toolchain("stable").unwrap();
        store.find_or_create_toolchain("42").unwrap();
        store.find_or_create_section("json.decode").unwrap();
        store.find_or_create_section("base64.encode").unwrap();
        store
    }

    #[test]
    fn test_lookup_by_name_then_id() {
        let store = store();
        assert_eq!(lookup_toolchain(&store, "stable").unwrap().id, 1);
        assert_eq!(lookup_toolchain(&store, "1").unwrap().name, "stable");
        // an exact name wins over an id
        assert_eq!(lookup_toolchain(&store, "42").unwrap().id, 2);
    }

    #[test]
    fn test_lookup_unknown() {
        let store = store();
        for argument in ["beta", "99"] {
            let err = lookup_toolchain(&store, argument).unwrap_err();
            assert!(matches!(err, CliError::Bench(ref e) if e.is_not_found()), "{}", err);
        }
    }

    #[test]
    fn test_check_sections() {
        let store = store();
        check_sections(&store, &SectionFilter::all()).unwrap();
        check_sections(&store, &SectionFilter::new(["json", "base64.enc"])).unwrap();

        let err = check_sections(&store, &SectionFilter::new(["json", "xml"])).unwrap_err();
        assert_eq!(
            err,
            CliError::UnknownTestFilter {
                name: "xml".to_string(),
                available: vec!["base64.encode".to_string(), "json.decode".to_string()],
            }
        );
    }
}
