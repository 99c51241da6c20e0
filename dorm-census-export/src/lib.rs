//! Serialize report results to JSON or XML.

use std::fmt;
use std::str::FromStr;

use dorm_census_db::ReportResult;
use thiserror::Error;

mod json;
mod xml;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{0} is not supported as an output file format")]
    UnsupportedFormat(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
}

impl Format {
    /// File extension for the result file, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }
}

impl FromStr for Format {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Format::Json),
            "xml" => Ok(Format::Xml),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Serialize the full ordered sequence of report results.
pub fn render(results: &[ReportResult], format: Format) -> Result<String, ExportError> {
    match format {
        Format::Json => json::render(results),
        Format::Xml => Ok(xml::render(results)),
    }
}
