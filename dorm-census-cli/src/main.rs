//! dorm-census CLI
//!
//! Loads room and student rosters into the census database, runs the report
//! catalog, and writes the results to `result.json` or `result.xml`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use chrono::Local;
use clap::Parser;

use dorm_census_db::{REPORTS, open_database, run_reports};
use dorm_census_export::{Format, render};
use dorm_census_ingest::{ROOM_COLUMNS, STUDENT_COLUMNS, load_records, read_records};

mod error;
use error::CliError;

const DEFAULT_LOG_FILE: &str = "dorm-census.log";

#[derive(Parser)]
#[command(name = "dorm-census")]
#[command(about = "Load room and student rosters and export occupancy reports", long_about = None)]
struct Cli {
    /// JSON file with rooms
    rooms_file: PathBuf,

    /// JSON file with students
    students_file: PathBuf,

    /// Output file format (json or xml)
    ///
    /// Kept as a plain string here so an unsupported token is rejected after
    /// logging is up and lands in the log like any other fatal error.
    format: String,

    /// Database file (overrides the DATABASE environment variable)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Log file
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,
}

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        // Help and version exit through the normal path; real argument
        // errors also land in the log.
        if err.use_stderr() && init_logging(Path::new(DEFAULT_LOG_FILE)).is_ok() {
            log::error!("{err}");
        }
        err.exit();
    });

    if let Err(err) = run(cli) {
        log::error!("{err}");
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    init_logging(&cli.log_file)?;

    // Validate everything the user gave us before touching the database, so
    // a failed run leaves no half-created database file behind.
    let format: Format = cli.format.parse()?;
    let rooms = read_records(&cli.rooms_file)?;
    let students = read_records(&cli.students_file)?;

    let conn = open_database(&database_path(&cli))?;

    // Rooms first: students carry a foreign key into them.
    load_records(&conn, "rooms", ROOM_COLUMNS, &rooms)?;
    load_records(&conn, "students", STUDENT_COLUMNS, &students)?;

    let names: Vec<&str> = REPORTS.iter().map(|def| def.name).collect();
    let results = run_reports(&conn, &names, Local::now().date_naive())?;

    let output = render(&results, format)?;
    let out_path = format!("result.{}", format.extension());
    fs::write(&out_path, output)?;
    log::info!("wrote {out_path}");

    Ok(())
}

/// `--database`, then the DATABASE environment variable, then a default
/// next to the working directory.
fn database_path(cli: &Cli) -> PathBuf {
    cli.database
        .clone()
        .or_else(|| std::env::var_os("DATABASE").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("dorm-census.db"))
}

/// Append-only file log; RUST_LOG overrides the `info` default.
fn init_logging(path: &Path) -> Result<(), CliError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.target(),
                record.level(),
                record.args(),
            )
        })
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .ok();

    Ok(())
}
