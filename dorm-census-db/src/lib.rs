//! SQLite persistence layer for the dorm census.
//!
//! Provides schema creation for the `rooms` and `students` tables and the
//! fixed aggregate report catalog that runs against them.

pub mod reports;
pub mod schema;

pub use reports::{REPORTS, Record, ReportDef, ReportError, ReportResult, report, run_reports};
pub use schema::{SchemaError, create_schema, open_database, open_memory};
