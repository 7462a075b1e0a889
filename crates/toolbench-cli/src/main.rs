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

//! Toolbench command line interface

use clap::Parser;
use colored::Colorize;
use std::io::IsTerminal;
use std::process::ExitCode;
use toolbench_cli::cli::Commands;
use tracing_subscriber::EnvFilter;

/// Toolbench - compare benchmark results across Rust toolchains
///
/// # Examples
///
/// ```bash
/// # Benchmark the default toolchain
/// toolbench
///
/// # Benchmark two installed toolchains
/// toolbench benchmark ~/.rustup/toolchains/1.79.0-x86_64-unknown-linux-gnu \
///     ~/.rustup/toolchains/1.80.0-x86_64-unknown-linux-gnu \
///     --remove-suffixes=-x86_64-unknown-linux-gnu
///
/// # Show the recorded results as HTML
/// toolbench show --html > results.html
/// ```
#[derive(Parser)]
#[command(name = "toolbench")]
#[command(
    author,
    version,
    about = "Toolbench - compare benchmark results across toolchains",
    long_about = None
)]
struct Cli {
    /// Defaults to `benchmark`
    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> ExitCode {
    // Logs go to stderr so reports can be redirected
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("toolbench=info,toolbench_cli=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();

    match cli.command.unwrap_or_default().execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
