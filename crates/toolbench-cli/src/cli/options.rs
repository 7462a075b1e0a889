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

//! Option groups shared between subcommands.

use crate::toolchain::NameRewrite;
use clap::Args;
use std::path::PathBuf;
use toolbench::{OutputFormat, ReportConfig, SectionFilter, DEFAULT_DATABASE};

/// Location of the benchmark database.
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// SQLite benchmarks file
    #[arg(long, value_name = "FILE", default_value = DEFAULT_DATABASE)]
    pub filename: PathBuf,
}

impl Default for DatabaseArgs {
    fn default() -> Self {
        Self {
            filename: PathBuf::from(DEFAULT_DATABASE),
        }
    }
}

/// Report output.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Output format (text, html or json)
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// Use HTML for output (same as --format html)
    #[arg(long, conflicts_with = "format")]
    pub html: bool,

    /// Benchmark sections to include: "all" or a comma separated list of
    /// section name prefixes
    #[arg(long, value_name = "TESTS", default_value = "all")]
    pub tests: SectionFilter,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            html: false,
            tests: SectionFilter::all(),
        }
    }
}

impl ReportArgs {
    pub fn config(&self) -> ReportConfig {
        let format = if self.html { OutputFormat::Html } else { self.format };
        ReportConfig::new(format).with_sections(self.tests.clone())
    }
}

/// Toolchain name shortening.
#[derive(Args, Debug, Clone, Default)]
pub struct NameArgs {
    /// Prefixes to remove from all toolchain names. Comma separated list,
    /// removed sequentially, e.g. --remove-prefixes=nightly-
    #[arg(long, value_name = "PREFIXES")]
    pub remove_prefixes: Option<String>,

    /// Suffixes to remove from all toolchain names. Comma separated list,
    /// removed sequentially, e.g. --remove-suffixes=-x86_64-unknown-linux-gnu
    #[arg(long, value_name = "SUFFIXES")]
    pub remove_suffixes: Option<String>,
}

impl NameArgs {
    pub fn rewrite(&self) -> NameRewrite {
        NameRewrite::new(self.remove_prefixes.as_deref(), self.remove_suffixes.as_deref())
    }
}
