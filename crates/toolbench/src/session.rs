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

//! Benchmark-side recording session.
//!
//! The runner registers a toolchain, then launches the benchmark suite with
//! the database location and toolchain id in the environment. Inside the
//! suite a [`Session`] reads them back and records each measurement under
//! the current section and benchmark:
//!
//! ```no_run
//! use toolbench::session::{Session, SessionConfig};
//!
//! # fn main() -> toolbench::Result<()> {
//! if let Some(config) = SessionConfig::from_env()? {
//!     let mut session = Session::open(config)?;
//!     session.section("json.decode")?;
//!     session.time("ints", || {
//!         // workload
//!     })?;
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{BenchError, Result};
use crate::store::{BenchmarkStore, ToolChain};
use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Set (to any value) while the runner drives a benchmark run.
pub const ENV_MODE: &str = "TOOLBENCH_MODE";

/// Id of the toolchain results are recorded for.
pub const ENV_TOOLCHAIN_ID: &str = "TOOLBENCH_DBID";

/// Path of the benchmark database.
pub const ENV_DATABASE: &str = "TOOLBENCH_DBFILE";

/// Units recorded by [`Session::time`].
pub const TIME_UNITS: &str = "ms";

/// Returns true when running under the benchmark runner.
pub fn is_benchmark_mode() -> bool {
    env::var_os(ENV_MODE).is_some()
}

/// Where a session records to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub database: PathBuf,
    pub toolchain_id: i64,
}

impl SessionConfig {
    pub fn new(database: impl Into<PathBuf>, toolchain_id: i64) -> Self {
        Self {
            database: database.into(),
            toolchain_id,
        }
    }

    /// Reads the handoff variables from the process environment.
    ///
    /// Returns `Ok(None)` when either variable is missing, meaning results
    /// are not recorded.
    pub fn from_env() -> Result<Option<Self>> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`SessionConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (Some(id), Some(database)) = (lookup(ENV_TOOLCHAIN_ID), lookup(ENV_DATABASE)) else {
            return Ok(None);
        };
        let toolchain_id = id.trim().parse::<i64>().map_err(|_| {
            BenchError::invalid_config(ENV_TOOLCHAIN_ID, format!("'{}' is not an integer id", id))
        })?;
        Ok(Some(Self::new(database, toolchain_id)))
    }
}

#[derive(Debug, Clone)]
struct CurrentBenchmark {
    id: i64,
    name: String,
    units: String,
}

/// Records measurements for one toolchain.
#[derive(Debug)]
pub struct Session {
    store: BenchmarkStore,
    toolchain: ToolChain,
    section_id: Option<i64>,
    benchmark: Option<CurrentBenchmark>,
}

impl Session {
    /// Opens the configured database and checks that the toolchain exists.
    pub fn open(config: SessionConfig) -> Result<Self> {
        let store = BenchmarkStore::open_existing(&config.database)?;
        Self::with_store(store, config.toolchain_id)
    }

    /// Records into an already open store.
    pub fn with_store(store: BenchmarkStore, toolchain_id: i64) -> Result<Self> {
        let toolchain = store.toolchain(toolchain_id)?;
        info!(toolchain = %toolchain.name, "recording benchmarks");
        Ok(Self {
            store,
            toolchain,
            section_id: None,
            benchmark: None,
        })
    }

    pub fn toolchain(&self) -> &ToolChain {
        &self.toolchain
    }

    pub fn store(&self) -> &BenchmarkStore {
        &self.store
    }

    /// Starts a new section; the current benchmark is cleared.
    pub fn section(&mut self, name: &str) -> Result<()> {
        self.benchmark = None;
        self.section_id = Some(self.store.find_or_create_section(name)?);
        info!(section = name, "section");
        Ok(())
    }

    /// Selects the benchmark subsequent values are recorded for.
    pub fn benchmark(&mut self, name: &str, units: &str) -> Result<()> {
        let section_id = self.section_id.ok_or_else(|| {
            BenchError::InvalidState(format!("benchmark '{}' started outside of a section", name))
        })?;
        let id = self.store.find_or_create_benchmark(section_id, name, units)?;
        self.benchmark = Some(CurrentBenchmark {
            id,
            name: name.to_string(),
            units: units.to_string(),
        });
        Ok(())
    }

    /// Records `value` for the current benchmark and returns the entry id.
    pub fn record(&mut self, value: Decimal) -> Result<i64> {
        let benchmark = self
            .benchmark
            .as_ref()
            .ok_or_else(|| BenchError::InvalidState("no benchmark selected".to_string()))?;
        let entry = self.store.record_entry(self.toolchain.id, benchmark.id, value)?;
        info!(
            benchmark = %benchmark.name,
            value = %value,
            units = %benchmark.units,
            "recorded"
        );
        Ok(entry)
    }

    /// Runs `f` as benchmark `name` and records its wall-clock time in
    /// milliseconds.
    pub fn time<T, F>(&mut self, name: &str, f: F) -> Result<T>
    where
        F: FnOnce() -> T,
    {
        self.benchmark(name, TIME_UNITS)?;
        let start = Instant::now();
        let output = f();
        let millis = i64::try_from(start.elapsed().as_millis()).unwrap_or(i64::MAX);
        self.record(Decimal::from(millis))?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn session() -> Session {
        let store = BenchmarkStore::open_in_memory().unwrap();
        let id = store.find_or_create_toolchain("stable").unwrap();
        Session::with_store(store, id).unwrap()
    }

    #[test]
    fn test_config_from_variables() {
        let config = SessionConfig::from_lookup(lookup(&[
            (ENV_TOOLCHAIN_ID, "3"),
            (ENV_DATABASE, "bench.sqlite3"),
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(config, SessionConfig::new("bench.sqlite3", 3));
    }

    #[test]
    fn test_config_absent_disables_recording() {
        assert_eq!(SessionConfig::from_lookup(lookup(&[])).unwrap(), None);
        assert_eq!(
            SessionConfig::from_lookup(lookup(&[(ENV_TOOLCHAIN_ID, "3")])).unwrap(),
            None
        );
    }

    #[test]
    fn test_config_rejects_bad_id() {
        let err = SessionConfig::from_lookup(lookup(&[
            (ENV_TOOLCHAIN_ID, "three"),
            (ENV_DATABASE, "bench.sqlite3"),
        ]))
        .unwrap_err();
        assert!(matches!(err, BenchError::InvalidConfig { .. }));
    }

    #[test]
    fn test_open_validates_toolchain() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bench.sqlite3");
        let id = BenchmarkStore::open(&path)
            .unwrap()
            .find_or_create_toolchain("stable")
            .unwrap();

        let session = Session::open(SessionConfig::new(&path, id)).unwrap();
        assert_eq!(session.toolchain().name, "stable");

        let err = Session::open(SessionConfig::new(&path, id + 1)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_open_missing_database() {
        let dir = TempDir::new().unwrap();
        let config = SessionConfig::new(dir.path().join("absent.sqlite3"), 1);
        let err = Session::open(config).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_record_latest_wins() {
        let mut session = session();
        session.section("json.decode").unwrap();
        session.benchmark("ints", "ms").unwrap();
        let first = session.record(dec!(10)).unwrap();
        let second = session.record(dec!(12)).unwrap();
        assert!(second > first);

        let catalog = session.store().list_benchmark_catalog().unwrap();
        let benchmark = catalog.iter().next().unwrap();
        assert_eq!(benchmark.name, "ints");
        assert_eq!(
            session
                .store()
                .latest_result(session.toolchain().id, benchmark.id)
                .unwrap(),
            Some(dec!(12))
        );
    }

    #[test]
    fn test_benchmark_requires_section() {
        let mut session = session();
        assert!(matches!(
            session.benchmark("ints", "ms"),
            Err(BenchError::InvalidState(_))
        ));
    }

    #[test]
    fn test_record_requires_benchmark() {
        let mut session = session();
        session.section("json.decode").unwrap();
        assert!(matches!(session.record(dec!(1)), Err(BenchError::InvalidState(_))));

        session.benchmark("ints", "ms").unwrap();
        session.section("json.encode").unwrap();
        assert!(matches!(session.record(dec!(1)), Err(BenchError::InvalidState(_))));
    }

    #[test]
    fn test_time_records_milliseconds() {
        let mut session = session();
        session.section("sleep").unwrap();
        let output = session
            .time("short", || {
                std::thread::sleep(std::time::Duration::from_millis(5));
                42
            })
            .unwrap();
        assert_eq!(output, 42);

        let catalog = session.store().list_benchmark_catalog().unwrap();
        let benchmark = catalog.iter().next().unwrap();
        assert_eq!(benchmark.units, TIME_UNITS);
        let value = session
            .store()
            .latest_result(session.toolchain().id, benchmark.id)
            .unwrap()
            .unwrap();
        assert!(value >= dec!(5));
    }
}
