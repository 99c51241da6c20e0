//! Best-effort bulk insertion with duplicate skipping.

use rusqlite::{Connection, ErrorCode};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("unsupported value for column '{column}' in table '{table}'")]
    UnsupportedValue { table: String, column: String },
}

/// Counts from a single bulk load.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub inserted: u64,
    pub skipped: u64,
}

/// Column order for inserting into `rooms`.
pub const ROOM_COLUMNS: &[&str] = &["id", "name"];

/// Column order for inserting into `students`.
pub const STUDENT_COLUMNS: &[&str] = &["id", "name", "birthday", "sex", "room"];

/// Insert every record into `table` using the fixed column list.
///
/// A column absent from a record binds SQL NULL. Rows the database rejects
/// with a constraint violation (duplicate key, bad foreign key, failed check)
/// are logged and skipped; any other database error aborts the load. Partial
/// success is the expected outcome, and the rows inserted before a skip stay
/// inserted.
pub fn load_records(
    conn: &Connection,
    table: &str,
    columns: &[&str],
    records: &[Map<String, Value>],
) -> Result<LoadStats, LoadError> {
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders.join(", "),
    );

    let tx = conn.unchecked_transaction()?;
    let mut stats = LoadStats::default();

    {
        let mut stmt = tx.prepare(&sql)?;
        for record in records {
            let values = columns
                .iter()
                .map(|column| bind_value(table, column, record.get(*column)))
                .collect::<Result<Vec<_>, _>>()?;

            match stmt.execute(rusqlite::params_from_iter(values)) {
                Ok(_) => stats.inserted += 1,
                Err(rusqlite::Error::SqliteFailure(e, msg))
                    if e.code == ErrorCode::ConstraintViolation =>
                {
                    stats.skipped += 1;
                    log::warn!(
                        "skipped row in {}: {}",
                        table,
                        msg.as_deref().unwrap_or("constraint violation"),
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    tx.commit()?;
    log::info!(
        "loaded {}: {} inserted, {} skipped",
        table,
        stats.inserted,
        stats.skipped,
    );
    Ok(stats)
}

fn bind_value(
    table: &str,
    column: &str,
    value: Option<&Value>,
) -> Result<rusqlite::types::Value, LoadError> {
    use rusqlite::types::Value as Sql;

    match value {
        None | Some(Value::Null) => Ok(Sql::Null),
        Some(Value::Bool(b)) => Ok(Sql::Integer(*b as i64)),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(Sql::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Sql::Real(f))
            } else {
                Err(LoadError::UnsupportedValue {
                    table: table.to_string(),
                    column: column.to_string(),
                })
            }
        }
        Some(Value::String(s)) => Ok(Sql::Text(s.clone())),
        Some(Value::Array(_)) | Some(Value::Object(_)) => Err(LoadError::UnsupportedValue {
            table: table.to_string(),
            column: column.to_string(),
        }),
    }
}
