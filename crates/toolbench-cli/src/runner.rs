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

//! Runs the benchmark suite under one toolchain.
//!
//! The suite is run as `cargo test --release -- --test-threads=1` in the
//! current directory. The database location and toolchain id are handed over
//! through the environment, where the suite's `toolbench::session::Session`
//! picks them up.

use crate::error::{CliError, Result};
use crate::toolchain::Toolchain;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use toolbench::session::{ENV_DATABASE, ENV_MODE, ENV_TOOLCHAIN_ID};
use tracing::info;

/// One `cargo test` invocation.
#[derive(Debug, Clone)]
pub struct TestRun<'a> {
    pub toolchain: &'a Toolchain,
    pub toolchain_id: i64,
    pub database: &'a Path,
    /// Test name filter passed to `cargo test`.
    pub filter: Option<&'a str>,
}

impl TestRun<'_> {
    /// Separate target directory per toolchain so builds do not clobber
    /// each other.
    pub fn target_dir(&self) -> String {
        format!("target-{}", self.toolchain.name)
    }

    pub fn command(&self) -> Result<Command> {
        let mut command = Command::new(self.toolchain.program());
        command
            .args(["test", "--release", "--target-dir"])
            .arg(self.target_dir());
        if let Some(filter) = self.filter {
            command.arg(filter);
        }
        // One test at a time, so measurements do not compete for the CPU.
        command.args(["--", "--test-threads=1"]);
        command
            .env(ENV_MODE, "1")
            .env(ENV_TOOLCHAIN_ID, self.toolchain_id.to_string())
            .env(ENV_DATABASE, absolute(self.database)?);
        Ok(command)
    }

    /// Runs the suite and waits for it, failing on a non-zero exit.
    pub fn run(&self) -> Result<()> {
        info!(
            toolchain = %self.toolchain.name,
            filter = self.filter.unwrap_or("all"),
            target_dir = %self.target_dir(),
            "running benchmarks"
        );
        let status = self
            .command()?
            .status()
            .map_err(|e| CliError::io(format!("cannot run {:?}", self.toolchain.program()), e))?;
        if !status.success() {
            return Err(CliError::TestRunFailed {
                toolchain: self.toolchain.name.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

// The suite may run in another working directory (workspace member).
fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn toolchain() -> Toolchain {
        Toolchain {
            name: "1.79.0".to_string(),
            cargo: Some(PathBuf::from("/opt/rust/1.79.0/bin/cargo")),
        }
    }

    #[test]
    fn test_command_line() {
        let toolchain = toolchain();
        let run = TestRun {
            toolchain: &toolchain,
            toolchain_id: 7,
            database: Path::new("/data/benchmarks.sqlite3"),
            filter: Some("json"),
        };
        let command = run.command().unwrap();

        assert_eq!(command.get_program(), OsStr::new("/opt/rust/1.79.0/bin/cargo"));
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(
            args,
            [
                "test",
                "--release",
                "--target-dir",
                "target-1.79.0",
                "json",
                "--",
                "--test-threads=1"
            ]
        );

        let envs: Vec<_> = command.get_envs().collect();
        assert!(envs.contains(&(OsStr::new(ENV_MODE), Some(OsStr::new("1")))));
        assert!(envs.contains(&(OsStr::new(ENV_TOOLCHAIN_ID), Some(OsStr::new("7")))));
        assert!(envs.contains(&(
            OsStr::new(ENV_DATABASE),
            Some(OsStr::new("/data/benchmarks.sqlite3"))
        )));
    }

    #[test]
    fn test_relative_database_is_made_absolute() {
        let toolchain = toolchain();
        let run = TestRun {
            toolchain: &toolchain,
            toolchain_id: 1,
            database: Path::new("benchmarks.sqlite3"),
            filter: None,
        };
        let command = run.command().unwrap();
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args.len(), 6);
        assert_eq!(args[4..], ["--", "--test-threads=1"]);

        let database = command
            .get_envs()
            .find(|(key, _)| *key == OsStr::new(ENV_DATABASE))
            .and_then(|(_, value)| value)
            .unwrap();
        assert!(Path::new(database).is_absolute());
        assert!(Path::new(database).ends_with("benchmarks.sqlite3"));
    }
}
