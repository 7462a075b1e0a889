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

//! Toolbench CLI library.
//!
//! Drives benchmark runs across toolchains and reports the recorded results.
//!
//! # Commands
//!
//! - **benchmark**: run `cargo test --release` under each toolchain with the
//!   recording session enabled, then print the comparison
//! - **show**: print the comparison of recorded toolchains
//! - **list**: list recorded toolchains
//! - **rename** / **delete**: maintain the results file
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use toolbench::ReportConfig;
//! use toolbench_cli::commands::show;
//!
//! # fn main() -> Result<(), toolbench_cli::error::CliError> {
//! show(Path::new("benchmarks.sqlite3"), &ReportConfig::default(), &[])?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod runner;
pub mod toolchain;

pub use error::CliError;
