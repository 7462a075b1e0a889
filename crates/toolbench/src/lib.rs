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

//! Toolbench
//!
//! Records benchmark measurements per toolchain and compares toolchains side
//! by side.
//!
//! ## Pipeline
//!
//! - **Store** ([`store`]): SQLite database of toolchains, sections,
//!   benchmarks and append-only result entries
//! - **Results** ([`results`]): latest value per benchmark for one toolchain
//! - **Diff** ([`diff`]): sequential and first-to-last changes with exact
//!   decimal arithmetic
//! - **Render** ([`render`]): aligned text (Markdown), HTML and JSON tables
//!
//! Benchmark suites record through a [`session::Session`]; the reporting
//! side goes through [`report`]:
//!
//! ```no_run
//! use toolbench::config::{OutputFormat, ReportConfig};
//! use toolbench::report::render_report;
//! use toolbench::store::BenchmarkStore;
//!
//! # fn main() -> toolbench::Result<()> {
//! let store = BenchmarkStore::open_existing("benchmarks.sqlite3")?;
//! let toolchains = store.list_toolchains()?;
//! let config = ReportConfig::new(OutputFormat::Html);
//! render_report(&store, &toolchains, &config, &mut std::io::stdout())?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod diff;
pub mod error;
pub mod render;
pub mod report;
pub mod results;
pub mod session;
pub mod store;

pub use catalog::{BenchmarkCatalog, SectionFilter};
pub use config::{OutputFormat, ReportConfig};
pub use diff::DiffEngine;
pub use error::{BenchError, Result};
pub use render::{HtmlRenderer, JsonRenderer, Renderer, TextRenderer};
pub use report::{render_html_report, render_report, render_text_report, ComparisonReport};
pub use results::{Delta, ResultRole, ResultSet};
pub use session::{Session, SessionConfig};
pub use store::{Benchmark, BenchmarkStore, Section, ToolChain, DEFAULT_DATABASE};
