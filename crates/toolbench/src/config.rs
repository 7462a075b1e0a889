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

//! Report configuration.

use crate::catalog::SectionFilter;
use crate::error::BenchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format of a comparison report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pipe delimited table that renders as Markdown.
    #[default]
    Text,
    /// Standalone HTML page.
    Html,
    /// Machine-readable JSON.
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "markdown" | "md" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(BenchError::invalid_config(
                "format",
                format!("unknown output format '{}', expected text, html or json", other),
            )),
        }
    }
}

/// What to report and how.
///
/// # Example
///
/// ```
/// use toolbench::config::{OutputFormat, ReportConfig};
///
/// let config = ReportConfig::default()
///     .with_format(OutputFormat::Html)
///     .with_sections("json,base64".parse().unwrap());
/// assert_eq!(config.format, OutputFormat::Html);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportConfig {
    /// Output format.
    pub format: OutputFormat,
    /// Sections included in the report.
    pub sections: SectionFilter,
}

impl ReportConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            sections: SectionFilter::all(),
        }
    }

    /// Sets the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Restricts the report to matching sections.
    pub fn with_sections(mut self, sections: SectionFilter) -> Self {
        self.sections = sections;
        self
    }
}
