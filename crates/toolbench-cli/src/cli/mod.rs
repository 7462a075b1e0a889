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

//! CLI command definitions and argument parsing.
//!
//! ```text
//! Commands
//! ├── benchmark  run the suite per toolchain, then report (default)
//! ├── show       report recorded results
//! ├── list       list recorded toolchains
//! ├── rename     rename a toolchain
//! └── delete     delete toolchains and their results
//! ```

mod options;

pub use options::{DatabaseArgs, NameArgs, ReportArgs};

use crate::commands;
use crate::error::Result;
use clap::Subcommand;

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the benchmarks and show the results
    ///
    /// Registers each toolchain, runs `cargo test --release` with it and
    /// prints a comparison of the toolchains just run. Without toolchains,
    /// the `cargo` in PATH is used.
    Benchmark {
        #[command(flatten)]
        database: DatabaseArgs,

        #[command(flatten)]
        names: NameArgs,

        #[command(flatten)]
        report: ReportArgs,

        /// Toolchains: "default" or toolchain directories containing bin/cargo
        #[arg(value_name = "TOOLCHAINS")]
        toolchains: Vec<String>,
    },

    /// Show the results
    ///
    /// Compares the given toolchains, in the order given, or every recorded
    /// toolchain when none are given.
    Show {
        #[command(flatten)]
        database: DatabaseArgs,

        #[command(flatten)]
        report: ReportArgs,

        /// Toolchain names or ids
        #[arg(value_name = "TOOLCHAINS")]
        toolchains: Vec<String>,
    },

    /// List the available toolchains in the results file
    List {
        #[command(flatten)]
        database: DatabaseArgs,
    },

    /// Rename a toolchain in the results file
    Rename {
        #[command(flatten)]
        database: DatabaseArgs,

        /// Toolchain to rename
        #[arg(value_name = "TOOLCHAIN")]
        toolchain: String,

        /// New name
        #[arg(value_name = "NEW_NAME")]
        new_name: String,
    },

    /// Delete toolchains and their results from the results file
    Delete {
        #[command(flatten)]
        database: DatabaseArgs,

        /// Toolchains to delete
        #[arg(value_name = "TOOLCHAINS", required = true)]
        toolchains: Vec<String>,
    },
}

/// `toolbench` without a subcommand runs `benchmark` with default options.
impl Default for Commands {
    fn default() -> Self {
        Commands::Benchmark {
            database: DatabaseArgs::default(),
            names: NameArgs::default(),
            report: ReportArgs::default(),
            toolchains: Vec::new(),
        }
    }
}

impl Commands {
    /// Execute the command.
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Benchmark {
                database,
                names,
                report,
                toolchains,
            } => commands::benchmark(
                &database.filename,
                &names.rewrite(),
                &report.config(),
                &toolchains,
            ),
            Commands::Show {
                database,
                report,
                toolchains,
            } => commands::show(&database.filename, &report.config(), &toolchains),
            Commands::List { database } => commands::list(&database.filename),
            Commands::Rename {
                database,
                toolchain,
                new_name,
            } => commands::rename(&database.filename, &toolchain, &new_name),
            Commands::Delete {
                database,
                toolchains,
            } => commands::delete(&database.filename, &toolchains),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use toolbench::OutputFormat;

    #[derive(Parser)]
    struct Cli {
        #[command(subcommand)]
        command: Commands,
    }

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(std::iter::once("toolbench").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_show_defaults() {
        let Commands::Show {
            database,
            report,
            toolchains,
        } = parse(&["show"])
        else {
            panic!("expected show");
        };
        assert_eq!(
            database.filename,
            std::path::PathBuf::from(toolbench::DEFAULT_DATABASE)
        );
        assert_eq!(report.config().format, OutputFormat::Text);
        assert!(report.config().sections.is_all());
        assert!(toolchains.is_empty());
    }

    #[test]
    fn test_html_flag() {
        let Commands::Show { report, .. } =
            parse(&["show", "--html", "--tests", "json,base64", "a", "b"])
        else {
            panic!("expected show");
        };
        let config = report.config();
        assert_eq!(config.format, OutputFormat::Html);
        assert_eq!(config.sections.prefixes(), ["json", "base64"]);
    }

    #[test]
    fn test_benchmark_options() {
        let Commands::Benchmark { names, report, .. } = parse(&[
            "benchmark",
            "--remove-prefixes=nightly-",
            "--format",
            "json",
            "/opt/nightly-2024-06-01",
        ]) else {
            panic!("expected benchmark");
        };
        assert_eq!(names.rewrite().apply("nightly-2024-06-01"), "2024-06-01");
        assert_eq!(report.config().format, OutputFormat::Json);
    }

    #[test]
    fn test_default_command_matches_bare_benchmark() {
        let Commands::Benchmark {
            database,
            names,
            report,
            toolchains,
        } = Commands::default()
        else {
            panic!("expected benchmark");
        };
        let Commands::Benchmark {
            database: parsed_database,
            names: parsed_names,
            report: parsed_report,
            toolchains: parsed_toolchains,
        } = parse(&["benchmark"])
        else {
            panic!("expected benchmark");
        };

        assert_eq!(database.filename, parsed_database.filename);
        assert_eq!(names.remove_prefixes, parsed_names.remove_prefixes);
        assert_eq!(names.remove_suffixes, parsed_names.remove_suffixes);
        assert_eq!(report.config().format, parsed_report.config().format);
        assert!(report.config().sections.is_all());
        assert!(parsed_report.config().sections.is_all());
        assert_eq!(toolchains, parsed_toolchains);
    }

    #[test]
    fn test_rejects_bad_input() {
        let cli = |args: &[&str]| {
            Cli::try_parse_from(std::iter::once("toolbench").chain(args.iter().copied()))
        };
        assert!(cli(&["show", "--format", "csv"]).is_err());
        assert!(cli(&["show", "--html", "--format", "json"]).is_err());
        assert!(cli(&["delete"]).is_err());
        assert!(cli(&["rename", "only-one"]).is_err());
    }
}
