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

//! SQL schema and statements used by [`super::BenchmarkStore`].

/// Schema creation, safe to run against an existing database.
pub const CREATE_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS toolchains (
    id   INTEGER PRIMARY KEY,
    name TEXT    NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS sections (
    id   INTEGER PRIMARY KEY,
    name TEXT    NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS benchmarks (
    id         INTEGER PRIMARY KEY,
    section_id INTEGER NOT NULL REFERENCES sections(id),
    name       TEXT    NOT NULL,
    units      TEXT    NOT NULL,
    UNIQUE (section_id, name)
);

CREATE TABLE IF NOT EXISTS entries (
    id           INTEGER PRIMARY KEY,
    toolchain_id INTEGER NOT NULL REFERENCES toolchains(id),
    benchmark_id INTEGER NOT NULL REFERENCES benchmarks(id),
    result       TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS entries_lookup
    ON entries (toolchain_id, benchmark_id, id);
";

pub const SELECT_TOOLCHAIN_BY_NAME: &str = "SELECT id, name FROM toolchains WHERE name = ?1";

pub const SELECT_TOOLCHAIN_BY_ID: &str = "SELECT id, name FROM toolchains WHERE id = ?1";

pub const INSERT_TOOLCHAIN: &str =
    "INSERT INTO toolchains (name) VALUES (?1) ON CONFLICT DO NOTHING";

pub const SELECT_TOOLCHAINS: &str = "SELECT id, name FROM toolchains ORDER BY id";

pub const RENAME_TOOLCHAIN: &str = "UPDATE toolchains SET name = ?2 WHERE id = ?1";

pub const DELETE_TOOLCHAIN_ENTRIES: &str = "DELETE FROM entries WHERE toolchain_id = ?1";

pub const DELETE_TOOLCHAIN: &str = "DELETE FROM toolchains WHERE id = ?1";

pub const SELECT_SECTION_BY_NAME: &str = "SELECT id FROM sections WHERE name = ?1";

pub const INSERT_SECTION: &str =
    "INSERT INTO sections (name) VALUES (?1) ON CONFLICT DO NOTHING";

pub const SELECT_SECTIONS: &str = "SELECT id, name FROM sections ORDER BY id";

pub const SELECT_BENCHMARK_BY_NAME: &str =
    "SELECT id, units FROM benchmarks WHERE section_id = ?1 AND name = ?2";

pub const SELECT_BENCHMARK_EXISTS: &str = "SELECT 1 FROM benchmarks WHERE id = ?1";

pub const INSERT_BENCHMARK: &str = "
INSERT INTO benchmarks (section_id, name, units) VALUES (?1, ?2, ?3)
    ON CONFLICT DO NOTHING";

pub const SELECT_CATALOG: &str = "
SELECT b.id, b.section_id, s.name, b.name, b.units
  FROM benchmarks b
  JOIN sections s ON s.id = b.section_id
 ORDER BY b.section_id, b.name";

pub const INSERT_ENTRY: &str =
    "INSERT INTO entries (toolchain_id, benchmark_id, result) VALUES (?1, ?2, ?3)";

pub const SELECT_LATEST_ENTRY: &str = "
SELECT result
  FROM entries
 WHERE toolchain_id = ?1 AND benchmark_id = ?2
 ORDER BY id DESC
 LIMIT 1";

/// Latest entry per benchmark for one toolchain.
pub const SELECT_LATEST_ENTRIES: &str = "
SELECT e.benchmark_id, e.result
  FROM entries e
 WHERE e.toolchain_id = ?1
   AND e.id = (SELECT MAX(l.id)
                 FROM entries l
                WHERE l.toolchain_id = e.toolchain_id
                  AND l.benchmark_id = e.benchmark_id)";
