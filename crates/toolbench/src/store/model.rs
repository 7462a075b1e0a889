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

//! Persisted entities and their typed row mappings.

use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// A named variant of the system under benchmark.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolChain {
    /// Database id.
    pub id: i64,
    /// Unique, human-assigned name.
    pub name: String,
}

impl ToolChain {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Maps a `(id, name)` row.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

/// A named group of benchmarks, usually one per test-suite file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Database id.
    pub id: i64,
    /// Unique section name.
    pub name: String,
}

impl Section {
    /// Maps a `(id, name)` row.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

/// A single measurable quantity, joined with the name of its section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benchmark {
    /// Database id.
    pub id: i64,
    /// Owning section id.
    pub section_id: i64,
    /// Owning section name.
    pub section: String,
    /// Benchmark name, unique within its section.
    pub name: String,
    /// Units label, e.g. `ms`.
    pub units: String,
}

impl Benchmark {
    /// Maps an `(id, section_id, section, name, units)` row.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            section_id: row.get(1)?,
            section: row.get(2)?,
            name: row.get(3)?,
            units: row.get(4)?,
        })
    }
}
