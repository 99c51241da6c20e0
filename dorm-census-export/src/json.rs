//! JSON rendering of report results.

use dorm_census_db::ReportResult;
use serde_json::{Map, Value};

use crate::ExportError;

/// Render the results as an array of `{report_name: [records…]}` objects.
///
/// Key order within records and record order within reports are preserved.
pub fn render(results: &[ReportResult]) -> Result<String, ExportError> {
    let value = Value::Array(
        results
            .iter()
            .map(|result| {
                let mut entry = Map::new();
                entry.insert(
                    result.name.clone(),
                    Value::Array(result.records.iter().cloned().map(Value::Object).collect()),
                );
                Value::Object(entry)
            })
            .collect(),
    );
    Ok(serde_json::to_string_pretty(&value)?)
}
