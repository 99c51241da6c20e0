//! The fixed report catalog and its extractor.
//!
//! Each report pairs an aggregate SQL statement with the ordered key names for
//! its result columns. Reports that look at student ages take the reference
//! date as a bound parameter so runs are reproducible.

use chrono::NaiveDate;
use rusqlite::Connection;
use rusqlite::types::ValueRef;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Unknown report: {0}")]
    UnknownReport(String),
}

/// One output row: field name → value, in the report's key order.
pub type Record = Map<String, Value>;

/// A named aggregate query plus the keys its columns map to.
#[derive(Debug)]
pub struct ReportDef {
    pub name: &'static str,
    pub sql: &'static str,
    pub keys: &'static [&'static str],
}

/// All records produced by one report, in query order.
#[derive(Debug, PartialEq)]
pub struct ReportResult {
    pub name: String,
    pub records: Vec<Record>,
}

/// The four built-in reports, in their default output order.
///
/// The `strftime('%Y.%m%d', ...)` subtraction yields completed years between
/// a birthday and the reference date bound as `?1`.
pub const REPORTS: &[ReportDef] = &[
    ReportDef {
        name: "by_students",
        sql: "SELECT rooms.id, rooms.name, COUNT(students.room)
              FROM rooms LEFT JOIN students ON rooms.id = students.room
              GROUP BY rooms.id
              ORDER BY rooms.id",
        keys: &["room_id", "room_name", "number_of_students"],
    },
    ReportDef {
        name: "by_minimal_average_age",
        sql: "SELECT rooms.id, rooms.name,
                     CAST(ROUND(AVG(CAST(strftime('%Y.%m%d', ?1) - strftime('%Y.%m%d', students.birthday) AS INTEGER))) AS INTEGER) AS average
              FROM rooms LEFT JOIN students ON rooms.id = students.room
              GROUP BY rooms.id
              HAVING COUNT(students.room) > 0
              ORDER BY average
              LIMIT 6",
        keys: &["room_id", "room_name", "average_age"],
    },
    ReportDef {
        name: "by_age_difference",
        sql: "SELECT rooms.id, rooms.name,
                     MAX(CAST(strftime('%Y.%m%d', ?1) - strftime('%Y.%m%d', students.birthday) AS INTEGER)) -
                     MIN(CAST(strftime('%Y.%m%d', ?1) - strftime('%Y.%m%d', students.birthday) AS INTEGER)) AS diff
              FROM rooms LEFT JOIN students ON rooms.id = students.room
              GROUP BY rooms.id
              ORDER BY diff DESC
              LIMIT 5",
        keys: &["room_id", "room_name", "age_difference"],
    },
    ReportDef {
        name: "that_have_both_sex_students",
        sql: "SELECT rooms.id, rooms.name, COUNT(students.room),
                     SUM(CASE WHEN students.sex = 'F' THEN 1 ELSE 0 END) AS female,
                     SUM(CASE WHEN students.sex = 'M' THEN 1 ELSE 0 END) AS male
              FROM rooms LEFT JOIN students ON rooms.id = students.room
              GROUP BY rooms.id
              HAVING female > 0 AND male > 0
              ORDER BY rooms.id",
        keys: &[
            "room_id",
            "room_name",
            "number_of_students",
            "female_students_number",
            "male_students_number",
        ],
    },
];

/// Look up a report definition by name.
pub fn report(name: &str) -> Option<&'static ReportDef> {
    REPORTS.iter().find(|def| def.name == name)
}

/// Run the named reports in the order given.
///
/// Each result row is zipped with the report's key list into an ordered
/// record. Ages are computed as of `as_of`. Re-running re-executes every
/// query; nothing is cached.
pub fn run_reports(
    conn: &Connection,
    names: &[&str],
    as_of: NaiveDate,
) -> Result<Vec<ReportResult>, ReportError> {
    let as_of = as_of.format("%Y-%m-%d").to_string();
    let mut results = Vec::with_capacity(names.len());

    for name in names {
        let def = report(name).ok_or_else(|| ReportError::UnknownReport(name.to_string()))?;
        results.push(ReportResult {
            name: def.name.to_string(),
            records: run_report(conn, def, &as_of)?,
        });
    }

    log::info!("completed {} report(s)", results.len());
    Ok(results)
}

fn run_report(
    conn: &Connection,
    def: &ReportDef,
    as_of: &str,
) -> Result<Vec<Record>, ReportError> {
    let mut stmt = conn.prepare(def.sql)?;

    // A key list that disagrees with the query's column count is a bug in the
    // catalog, not a runtime condition.
    debug_assert_eq!(stmt.column_count(), def.keys.len());

    let mut rows = if stmt.parameter_count() > 0 {
        stmt.query([as_of])?
    } else {
        stmt.query([])?
    };

    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        let mut record = Record::new();
        for (i, key) in def.keys.iter().enumerate() {
            record.insert((*key).to_string(), column_to_json(row.get_ref(i)?));
        }
        records.push(record);
    }
    Ok(records)
}

fn column_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(n) => Value::Number(n.into()),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(String::from_utf8_lossy(b).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookup() {
        assert!(report("by_students").is_some());
        assert!(report("by_minimal_average_age").is_some());
        assert!(report("nonexistent").is_none());
    }

    #[test]
    fn catalog_keys_are_unique_per_report() {
        for def in REPORTS {
            let mut keys: Vec<_> = def.keys.to_vec();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), def.keys.len(), "{}", def.name);
        }
    }
}
