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

//! Benchmark command - run the suite for each toolchain and report

use super::print_report;
use crate::error::Result;
use crate::runner::TestRun;
use crate::toolchain::{NameRewrite, Toolchain, DEFAULT_TOOLCHAIN};
use std::path::Path;
use toolbench::{BenchmarkStore, ReportConfig};
use tracing::info;

/// Registers and runs every toolchain, then reports on them.
///
/// The suite is run once per `--tests` prefix (passed to `cargo test` as a
/// test name filter), or once unfiltered. A failed run aborts the command;
/// results recorded by earlier runs stay in the database.
pub fn benchmark(
    database: &Path,
    rewrite: &NameRewrite,
    config: &ReportConfig,
    arguments: &[String],
) -> Result<()> {
    let store = BenchmarkStore::open(database)?;

    let arguments = if arguments.is_empty() {
        info!("no toolchain specified, running the default cargo in PATH");
        vec![DEFAULT_TOOLCHAIN.to_string()]
    } else {
        arguments.to_vec()
    };

    let mut toolchains = Vec::with_capacity(arguments.len());
    for argument in &arguments {
        let toolchain = Toolchain::resolve(argument, rewrite)?;
        let id = store.find_or_create_toolchain(&toolchain.name)?;
        info!(toolchain = %toolchain.name, id, program = ?toolchain.program(), "adding toolchain");
        toolchains.push((toolchain, id));
    }

    let filters: Vec<Option<&str>> = if config.sections.is_all() {
        vec![None]
    } else {
        config.sections.prefixes().iter().map(|p| Some(p.as_str())).collect()
    };

    for (toolchain, id) in &toolchains {
        for filter in &filters {
            TestRun {
                toolchain,
                toolchain_id: *id,
                database,
                filter: *filter,
            }
            .run()?;
        }
    }

    let recorded = toolchains
        .iter()
        .map(|(_, id)| store.toolchain(*id))
        .collect::<toolbench::Result<Vec<_>>>()?;
    print_report(&store, &recorded, config)
}
