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

//! Maintenance commands - list, rename and delete toolchains

use super::lookup_toolchain;
use crate::error::Result;
use colored::Colorize;
use std::path::Path;
use toolbench::BenchmarkStore;
use tracing::info;

/// Prints `id:<tab>name` for every recorded toolchain.
pub fn list(database: &Path) -> Result<()> {
    let store = BenchmarkStore::open_existing(database)?;
    for toolchain in store.list_toolchains()? {
        println!("{}\t{}", format!("{}:", toolchain.id).as_str().bold(), toolchain.name);
    }
    Ok(())
}

pub fn rename(database: &Path, toolchain: &str, new_name: &str) -> Result<()> {
    let store = BenchmarkStore::open_existing(database)?;
    let toolchain = lookup_toolchain(&store, toolchain)?;
    store.rename_toolchain(toolchain.id, new_name)?;
    info!(from = %toolchain.name, to = new_name, "renamed toolchain");
    Ok(())
}

/// Deletes each toolchain with all of its results. Stops at the first
/// unknown toolchain; earlier deletions are kept.
pub fn delete(database: &Path, toolchains: &[String]) -> Result<()> {
    let mut store = BenchmarkStore::open_existing(database)?;
    for argument in toolchains {
        let toolchain = lookup_toolchain(&store, argument)?;
        store.delete_toolchain(toolchain.id)?;
        info!(toolchain = %toolchain.name, "deleted toolchain");
    }
    Ok(())
}
