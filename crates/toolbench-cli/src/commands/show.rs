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

//! Show command - report recorded results

use super::{lookup_toolchain, print_report};
use crate::error::Result;
use std::path::Path;
use toolbench::{BenchmarkStore, ReportConfig};

/// Compares `toolchains` (names or ids, in the order given), or every
/// recorded toolchain in id order when none are given.
pub fn show(database: &Path, config: &ReportConfig, toolchains: &[String]) -> Result<()> {
    let store = BenchmarkStore::open_existing(database)?;
    let toolchains = if toolchains.is_empty() {
        store.list_toolchains()?
    } else {
        toolchains
            .iter()
            .map(|argument| lookup_toolchain(&store, argument))
            .collect::<Result<Vec<_>>>()?
    };
    print_report(&store, &toolchains, config)
}
