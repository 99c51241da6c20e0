//! Ingest JSON rosters into the census database.
//!
//! This crate owns the ETL input side: reading a JSON file into records and
//! bulk-inserting those records, skipping rows the database rejects.

pub mod loader;
pub mod reader;

pub use loader::{LoadError, LoadStats, ROOM_COLUMNS, STUDENT_COLUMNS, load_records};
pub use reader::{ReadError, read_records};
