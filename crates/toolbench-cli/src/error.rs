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

//! Structured error types for the toolbench CLI.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use toolbench::BenchError;

/// Errors reported by CLI commands.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// Storage or reporting failed.
    #[error(transparent)]
    Bench(#[from] BenchError),

    /// A toolchain argument is neither `default` nor a toolchain directory.
    #[error("Invalid toolchain '{toolchain}': cant find executable {}", .executable.display())]
    InvalidToolchain {
        /// The argument as given
        toolchain: String,
        /// Where the cargo executable was expected
        executable: PathBuf,
    },

    /// The benchmark suite exited unsuccessfully.
    #[error("Failed to run tests for toolchain '{toolchain}' ({status})")]
    TestRunFailed {
        /// Toolchain name
        toolchain: String,
        /// Exit status description
        status: String,
    },

    /// A `--tests` entry matches no recorded section.
    #[error("Unknown benchmark '{name}'. Available benchmarks: {}", .available.join(","))]
    UnknownTestFilter {
        /// The unmatched filter
        name: String,
        /// Recorded section names
        available: Vec<String>,
    },

    /// Spawning a process or writing output failed.
    #[error("I/O error: {message}")]
    Io {
        /// The error message
        message: String,
    },
}

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl std::fmt::Display, source: io::Error) -> Self {
        Self::Io {
            message: format!("{}: {}", context, source),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(source: io::Error) -> Self {
        Self::Io {
            message: source.to_string(),
        }
    }
}

/// Result type for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bench_errors_are_transparent() {
        let err: CliError = BenchError::not_found("toolchain", "nightly").into();
        assert_eq!(err.to_string(), "Cant find toolchain 'nightly'");
    }

    #[test]
    fn test_messages() {
        let err = CliError::InvalidToolchain {
            toolchain: "/opt/rust".to_string(),
            executable: PathBuf::from("/opt/rust/bin/cargo"),
        };
        assert_eq!(
            err.to_string(),
            "Invalid toolchain '/opt/rust': cant find executable /opt/rust/bin/cargo"
        );

        let err = CliError::UnknownTestFilter {
            name: "xml".to_string(),
            available: vec!["base64".to_string(), "json".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Unknown benchmark 'xml'. Available benchmarks: base64,json"
        );
    }

    #[test]
    fn test_io_context() {
        let source = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err = CliError::io("spawning cargo", source);
        assert_eq!(err.to_string(), "I/O error: spawning cargo: missing");
    }
}
