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

//! SQLite backed benchmark store.
//!
//! Maps `(toolchain, section, benchmark)` to recorded measurements. Toolchains,
//! sections and benchmarks are registered with find-or-create semantics and
//! reused across runs; entries are append-only and the most recently inserted
//! entry (highest id) of a `(toolchain, benchmark)` pair is the one reported.
//!
//! # Example
//!
//! ```no_run
//! use rust_decimal::Decimal;
//! use toolbench::store::BenchmarkStore;
//!
//! # fn main() -> toolbench::Result<()> {
//! let store = BenchmarkStore::open("benchmarks.sqlite3")?;
//! let toolchain = store.find_or_create_toolchain("stable")?;
//! let section = store.find_or_create_section("json.decode")?;
//! let benchmark = store.find_or_create_benchmark(section, "ints", "ms")?;
//! store.record_entry(toolchain, benchmark, Decimal::new(1520, 1))?;
//! # Ok(())
//! # }
//! ```

mod model;
mod schema;

pub use model::{Benchmark, Section, ToolChain};

use crate::catalog::BenchmarkCatalog;
use crate::error::{BenchError, Result};
use crate::results::ResultSet;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

/// Default database file name used by the CLI.
pub const DEFAULT_DATABASE: &str = "benchmarks.sqlite3";

/// How long a write waits for another connection holding the database lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// Durable store of toolchains, sections, benchmarks and entries.
///
/// One connection is opened per store and used for its whole lifetime. The
/// store performs no internal locking; callers sharing one between threads
/// must serialize access. Separate stores may be open on the same file at
/// once: registration is a single conflict-tolerant insert, so concurrent
/// writers agree on one id per name.
#[derive(Debug)]
pub struct BenchmarkStore {
    connection: Connection,
    path: Option<PathBuf>,
}

impl BenchmarkStore {
    /// Opens (creating if needed) the database at `path` and ensures the
    /// schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let connection = Connection::open(path)
            .map_err(|e| BenchError::storage(format!("cannot open '{}': {}", path.display(), e)))?;
        Self::initialize(connection, Some(path.to_path_buf()))
    }

    /// Opens a database that must already exist.
    ///
    /// Used by read and maintenance commands so that a mistyped path reports
    /// an error instead of silently creating an empty database.
    pub fn open_existing(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(BenchError::not_found("database", path.display()));
        }
        Self::open(path)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::initialize(Connection::open_in_memory()?, None)
    }

    fn initialize(connection: Connection, path: Option<PathBuf>) -> Result<Self> {
        connection.busy_timeout(BUSY_TIMEOUT)?;
        connection.pragma_update(None, "foreign_keys", true)?;
        connection
            .execute_batch(schema::CREATE_SCHEMA)
            .map_err(|e| BenchError::storage(format!("schema creation failed: {}", e)))?;
        debug!(path = ?path, "benchmark store opened");
        Ok(Self { connection, path })
    }

    /// Backing file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // ===== Toolchains =====

    /// Returns the id of the toolchain called `name`, registering it first if
    /// needed.
    pub fn find_or_create_toolchain(&self, name: &str) -> Result<i64> {
        if self.connection.execute(schema::INSERT_TOOLCHAIN, params![name])? == 1 {
            let id = self.connection.last_insert_rowid();
            debug!(id, name, "registered toolchain");
            return Ok(id);
        }
        self.toolchain_by_name(name)?
            .map(|toolchain| toolchain.id)
            .ok_or_else(|| BenchError::not_found("toolchain", name))
    }

    /// Looks up a toolchain by exact name.
    pub fn toolchain_by_name(&self, name: &str) -> Result<Option<ToolChain>> {
        Ok(self
            .connection
            .query_row(schema::SELECT_TOOLCHAIN_BY_NAME, params![name], ToolChain::from_row)
            .optional()?)
    }

    /// Looks up a toolchain by id.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::NotFound`] if no toolchain has this id.
    pub fn toolchain(&self, id: i64) -> Result<ToolChain> {
        self.connection
            .query_row(schema::SELECT_TOOLCHAIN_BY_ID, params![id], ToolChain::from_row)
            .optional()?
            .ok_or_else(|| BenchError::not_found("toolchain", id))
    }

    pub fn contains_toolchain(&self, id: i64) -> Result<bool> {
        match self.toolchain(id) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// All toolchains, ordered by id.
    pub fn list_toolchains(&self) -> Result<Vec<ToolChain>> {
        let mut stmt = self.connection.prepare(schema::SELECT_TOOLCHAINS)?;
        let rows = stmt.query_map([], ToolChain::from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Renames a toolchain.
    ///
    /// # Errors
    ///
    /// - [`BenchError::NotFound`] if `id` does not exist
    /// - [`BenchError::AlreadyExists`] if another toolchain already uses `new_name`
    pub fn rename_toolchain(&self, id: i64, new_name: &str) -> Result<()> {
        let updated = self
            .connection
            .execute(schema::RENAME_TOOLCHAIN, params![id, new_name])
            .map_err(|e| match e.sqlite_error_code() {
                Some(ErrorCode::ConstraintViolation) => BenchError::AlreadyExists {
                    kind: "toolchain",
                    name: new_name.to_string(),
                },
                _ => e.into(),
            })?;
        if updated == 0 {
            return Err(BenchError::not_found("toolchain", id));
        }
        debug!(id, new_name, "renamed toolchain");
        Ok(())
    }

    /// Deletes a toolchain and all of its entries in one transaction.
    pub fn delete_toolchain(&mut self, id: i64) -> Result<()> {
        let tx = self.connection.transaction()?;
        let entries = tx.execute(schema::DELETE_TOOLCHAIN_ENTRIES, params![id])?;
        let deleted = tx.execute(schema::DELETE_TOOLCHAIN, params![id])?;
        if deleted == 0 {
            // Dropping the transaction rolls back.
            return Err(BenchError::not_found("toolchain", id));
        }
        tx.commit()?;
        debug!(id, entries, "deleted toolchain");
        Ok(())
    }

    // ===== Sections and benchmarks =====

    /// Returns the id of the section called `name`, registering it first if
    /// needed.
    pub fn find_or_create_section(&self, name: &str) -> Result<i64> {
        if self.connection.execute(schema::INSERT_SECTION, params![name])? == 1 {
            return Ok(self.connection.last_insert_rowid());
        }
        self.connection
            .query_row(schema::SELECT_SECTION_BY_NAME, params![name], |row| row.get(0))
            .optional()?
            .ok_or_else(|| BenchError::not_found("section", name))
    }

    /// All sections, ordered by id.
    pub fn list_sections(&self) -> Result<Vec<Section>> {
        let mut stmt = self.connection.prepare(schema::SELECT_SECTIONS)?;
        let rows = stmt.query_map([], Section::from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Returns the id of benchmark `name` in section `section_id`, registering
    /// it first if needed.
    ///
    /// `units` is only recorded on first registration. Registering an existing
    /// benchmark again with different units keeps the stored units and logs a
    /// warning.
    pub fn find_or_create_benchmark(
        &self,
        section_id: i64,
        name: &str,
        units: &str,
    ) -> Result<i64> {
        let inserted = self
            .connection
            .execute(schema::INSERT_BENCHMARK, params![section_id, name, units])
            .map_err(|e| match e.sqlite_error_code() {
                Some(ErrorCode::ConstraintViolation) => {
                    BenchError::not_found("section", section_id)
                }
                _ => e.into(),
            })?;
        if inserted == 1 {
            return Ok(self.connection.last_insert_rowid());
        }

        let (id, stored_units): (i64, String) = self.connection.query_row(
            schema::SELECT_BENCHMARK_BY_NAME,
            params![section_id, name],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        if stored_units != units {
            warn!(
                benchmark = name,
                stored = %stored_units,
                requested = units,
                "benchmark already registered with different units, keeping the stored units"
            );
        }
        Ok(id)
    }

    /// Every benchmark with its section name, ordered by section id then
    /// benchmark name.
    pub fn list_benchmark_catalog(&self) -> Result<BenchmarkCatalog> {
        let mut stmt = self.connection.prepare(schema::SELECT_CATALOG)?;
        let rows = stmt.query_map([], Benchmark::from_row)?;
        Ok(BenchmarkCatalog::new(rows.collect::<rusqlite::Result<Vec<_>>>()?))
    }

    fn contains_benchmark(&self, id: i64) -> Result<bool> {
        Ok(self
            .connection
            .query_row(schema::SELECT_BENCHMARK_EXISTS, params![id], |_| Ok(()))
            .optional()?
            .is_some())
    }

    // ===== Entries =====

    /// Appends a measurement. Earlier entries for the same pair are kept.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::NotFound`] if the toolchain or benchmark does not exist.
    pub fn record_entry(
        &self,
        toolchain_id: i64,
        benchmark_id: i64,
        value: Decimal,
    ) -> Result<i64> {
        if !self.contains_toolchain(toolchain_id)? {
            return Err(BenchError::not_found("toolchain", toolchain_id));
        }
        if !self.contains_benchmark(benchmark_id)? {
            return Err(BenchError::not_found("benchmark", benchmark_id));
        }
        self.connection.execute(
            schema::INSERT_ENTRY,
            params![toolchain_id, benchmark_id, value.to_string()],
        )?;
        let id = self.connection.last_insert_rowid();
        debug!(id, toolchain_id, benchmark_id, %value, "recorded entry");
        Ok(id)
    }

    /// The most recently recorded value for the pair, if any.
    pub fn latest_result(&self, toolchain_id: i64, benchmark_id: i64) -> Result<Option<Decimal>> {
        let text: Option<String> = self
            .connection
            .query_row(
                schema::SELECT_LATEST_ENTRY,
                params![toolchain_id, benchmark_id],
                |row| row.get(0),
            )
            .optional()?;
        text.map(|t| parse_result(&t)).transpose()
    }

    /// Builds one [`ResultSet`] per toolchain, in the order given, holding the
    /// latest value of every catalog benchmark that has one.
    pub fn results_for(
        &self,
        toolchains: &[ToolChain],
        catalog: &BenchmarkCatalog,
    ) -> Result<Vec<ResultSet>> {
        let mut stmt = self.connection.prepare(schema::SELECT_LATEST_ENTRIES)?;
        let mut results = Vec::with_capacity(toolchains.len());

        for toolchain in toolchains {
            let rows = stmt.query_map(params![toolchain.id], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })?;

            let mut values = BTreeMap::new();
            for row in rows {
                let (benchmark_id, text) = row?;
                if catalog.contains(benchmark_id) {
                    values.insert(benchmark_id, parse_result(&text)?);
                }
            }
            debug!(toolchain = %toolchain.name, count = values.len(), "loaded results");
            results.push(ResultSet::from_values(toolchain, values, catalog));
        }

        Ok(results)
    }
}

fn parse_result(text: &str) -> Result<Decimal> {
    Decimal::from_str(text.trim()).map_err(|e| {
        BenchError::data_shape(format!("stored result '{}' is not a decimal: {}", text, e))
    })
}
