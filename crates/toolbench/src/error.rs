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

//! Error types for benchmark storage and reporting.
//!
//! Every fallible operation in this crate returns [`Result`]. Storage
//! failures are never retried: a caller that sees an error must treat any
//! output produced so far as incomplete.

use std::io;
use thiserror::Error;

/// Result type for benchmark storage and reporting operations
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors that can occur while recording or reporting benchmarks
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BenchError {
    /// The persistence engine failed (open, schema creation, read or write).
    #[error("Storage error: {message}")]
    Storage {
        /// Message reported by the engine
        message: String,
    },

    /// A referenced toolchain, benchmark or database does not exist.
    #[error("Cant find {kind} '{key}'")]
    NotFound {
        /// What was looked up ("toolchain", "benchmark", ...)
        kind: &'static str,
        /// The name or id that was requested
        key: String,
    },

    /// A rename would collide with an existing unique name.
    #[error("A {kind} named '{name}' already exists")]
    AlreadyExists {
        /// Entity kind
        kind: &'static str,
        /// The conflicting name
        name: String,
    },

    /// A stored row could not be decoded into the expected shape.
    #[error("Unexpected data shape: {message}")]
    DataShape {
        /// Description of the mismatch
        message: String,
    },

    /// A report was requested over an empty benchmark catalog.
    #[error("No benchmarks to report")]
    EmptyCatalog,

    /// A result set holds a benchmark that is not part of the catalog being rendered.
    #[error("Result set '{toolchain}' references benchmark {benchmark_id} which is not in the catalog")]
    CatalogMismatch {
        /// Name of the offending result set
        toolchain: String,
        /// The unknown benchmark id
        benchmark_id: i64,
    },

    /// An operation was called out of sequence.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Invalid configuration parameter
    #[error("Invalid configuration parameter '{parameter}': {reason}")]
    InvalidConfig {
        /// Parameter name
        parameter: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Writing report output failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl BenchError {
    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a not-found error for `kind` identified by `key`.
    pub fn not_found(kind: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    /// Create a data shape error.
    pub fn data_shape(message: impl Into<String>) -> Self {
        Self::DataShape {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error means the referenced entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// Column decoding failures are shape errors; everything else is the engine.
impl From<rusqlite::Error> for BenchError {
    fn from(source: rusqlite::Error) -> Self {
        match source {
            rusqlite::Error::InvalidColumnType(index, name, ty) => Self::data_shape(format!(
                "column {} ('{}') has unexpected type {}",
                index, name, ty
            )),
            rusqlite::Error::FromSqlConversionFailure(index, ty, err) => Self::data_shape(format!(
                "column {} of type {} could not be converted: {}",
                index, ty, err
            )),
            rusqlite::Error::InvalidColumnIndex(index) => {
                Self::data_shape(format!("column index {} out of range", index))
            }
            rusqlite::Error::InvalidColumnName(name) => {
                Self::data_shape(format!("no column named '{}'", name))
            }
            other => Self::storage(other.to_string()),
        }
    }
}

impl From<io::Error> for BenchError {
    fn from(source: io::Error) -> Self {
        Self::Io(source.to_string())
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(source: serde_json::Error) -> Self {
        Self::Io(source.to_string())
    }
}
