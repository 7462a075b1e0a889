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

//! Toolchain arguments.
//!
//! A toolchain argument is either `default`, meaning the `cargo` found on
//! `PATH`, or a toolchain directory containing an executable `bin/cargo`
//! (for example a rustup toolchain under `~/.rustup/toolchains`). Directory
//! toolchains are named after their last path component, optionally
//! shortened with `--remove-prefixes` / `--remove-suffixes`.

use crate::error::{CliError, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::warn;

/// Argument selecting the `cargo` on `PATH`.
pub const DEFAULT_TOOLCHAIN: &str = "default";

/// Prefix and suffix removal applied to directory toolchain names.
///
/// Each list is applied in order and each entry is removed at most once, so
/// the prefixes `nightly-,2024-` turn `nightly-2024-06-01` into `06-01`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameRewrite {
    prefixes: Vec<String>,
    suffixes: Vec<String>,
}

impl NameRewrite {
    /// Builds a rewrite from comma separated prefix and suffix lists.
    pub fn new(prefixes: Option<&str>, suffixes: Option<&str>) -> Self {
        Self {
            prefixes: split_list(prefixes),
            suffixes: split_list(suffixes),
        }
    }

    pub fn apply(&self, name: &str) -> String {
        let mut name = name.to_string();
        for prefix in &self.prefixes {
            if let Some(rest) = name.strip_prefix(prefix.as_str()) {
                name = rest.to_string();
            }
        }
        for suffix in &self.suffixes {
            if let Some(rest) = name.strip_suffix(suffix.as_str()) {
                name = rest.to_string();
            }
        }
        name
    }
}

fn split_list(list: Option<&str>) -> Vec<String> {
    list.map(|l| {
        l.split(',')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// A resolved toolchain ready to run the benchmark suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// Name recorded in the database.
    pub name: String,
    /// Explicit cargo executable; `None` runs `cargo` from `PATH`.
    pub cargo: Option<PathBuf>,
}

impl Toolchain {
    /// Resolves a command line toolchain argument.
    pub fn resolve(argument: &str, rewrite: &NameRewrite) -> Result<Self> {
        if argument == DEFAULT_TOOLCHAIN {
            return Ok(Self::default_toolchain());
        }
        Self::from_directory(Path::new(argument), rewrite)
    }

    /// The `cargo` on `PATH`, named after the `rustc` version it reports.
    pub fn default_toolchain() -> Self {
        let version = Command::new("rustc")
            .arg("--version")
            .output()
            .ok()
            .filter(|output| output.status.success())
            .and_then(|output| parse_version(&String::from_utf8_lossy(&output.stdout)));
        let name = match version {
            Some(version) => format!("{}-{}", DEFAULT_TOOLCHAIN, version),
            None => {
                warn!(
                    "could not determine the rustc version, recording as '{}'",
                    DEFAULT_TOOLCHAIN
                );
                DEFAULT_TOOLCHAIN.to_string()
            }
        };
        Self { name, cargo: None }
    }

    /// A toolchain directory holding `bin/cargo`.
    pub fn from_directory(directory: &Path, rewrite: &NameRewrite) -> Result<Self> {
        let executable = directory
            .join("bin")
            .join(format!("cargo{}", std::env::consts::EXE_SUFFIX));
        if !is_executable(&executable) {
            return Err(CliError::InvalidToolchain {
                toolchain: directory.display().to_string(),
                executable,
            });
        }

        let base_name = directory
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| directory.display().to_string());
        let rewritten = rewrite.apply(&base_name);
        let name = if rewritten.is_empty() { base_name } else { rewritten };

        Ok(Self {
            name,
            cargo: Some(executable),
        })
    }

    /// Program to spawn for `cargo test`.
    pub fn program(&self) -> &OsStr {
        match &self.cargo {
            Some(path) => path.as_os_str(),
            None => OsStr::new("cargo"),
        }
    }
}

/// Extracts the version from `rustc --version` style output, e.g. `1.80.0`
/// from `rustc 1.80.0 (051478957 2024-07-21)`.
pub fn parse_version(output: &str) -> Option<String> {
    output
        .lines()
        .next()?
        .split_whitespace()
        .nth(1)
        .map(str::to_string)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rewrite_sequential() {
        let rewrite = NameRewrite::new(
            Some("nightly-,2024-"),
            Some("-x86_64-unknown-linux-gnu,-a"),
        );
        assert_eq!(rewrite.apply("nightly-2024-06-01-x86_64-unknown-linux-gnu"), "06-01");
        assert_eq!(rewrite.apply("nightly-snapshot-a"), "snapshot");
    }

    #[test]
    fn test_rewrite_only_when_present() {
        let rewrite = NameRewrite::new(Some("nightly-"), Some("-x86_64-unknown-linux-gnu"));
        assert_eq!(rewrite.apply("stable"), "stable");
        assert_eq!(
            rewrite.apply("nightly-2024-06-01-x86_64-unknown-linux-gnu"),
            "2024-06-01"
        );
        // removed at the start only
        assert_eq!(rewrite.apply("my-nightly-"), "my-nightly-");
    }

    #[test]
    fn test_no_rewrite() {
        assert_eq!(NameRewrite::default().apply("1.79.0"), "1.79.0");
        assert_eq!(NameRewrite::new(Some(""), None).apply("1.79.0"), "1.79.0");
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(
            parse_version("rustc 1.80.0 (051478957 2024-07-21)\n").as_deref(),
            Some("1.80.0")
        );
        assert_eq!(
            parse_version("rustc 1.82.0-nightly (1f12b9b0f 2024-08-27)").as_deref(),
            Some("1.82.0-nightly")
        );
        assert_eq!(parse_version(""), None);
        assert_eq!(parse_version("rustc"), None);
    }

    #[test]
    fn test_directory_without_cargo() {
        let dir = TempDir::new().unwrap();
        let err = Toolchain::from_directory(dir.path(), &NameRewrite::default()).unwrap_err();
        assert!(matches!(err, CliError::InvalidToolchain { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_toolchain() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let root = dir.path().join("1.79.0-x86_64-unknown-linux-gnu");
        std::fs::create_dir_all(root.join("bin")).unwrap();
        let cargo = root.join("bin").join("cargo");
        std::fs::write(&cargo, "#!/bin/sh\n").unwrap();

        // not executable yet
        assert!(Toolchain::from_directory(&root, &NameRewrite::default()).is_err());

        std::fs::set_permissions(&cargo, std::fs::Permissions::from_mode(0o755)).unwrap();
        let rewrite = NameRewrite::new(None, Some("-x86_64-unknown-linux-gnu"));
        let toolchain = Toolchain::from_directory(&root, &rewrite).unwrap();
        assert_eq!(toolchain.name, "1.79.0");
        assert_eq!(toolchain.program(), cargo.as_os_str());
    }

    #[test]
    fn test_default_toolchain_uses_path() {
        let toolchain = Toolchain::resolve(DEFAULT_TOOLCHAIN, &NameRewrite::default()).unwrap();
        assert!(toolchain.name.starts_with(DEFAULT_TOOLCHAIN));
        assert_eq!(toolchain.program(), OsStr::new("cargo"));
    }
}
