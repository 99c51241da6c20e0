use thiserror::Error;

/// Errors that can occur while running the pipeline.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Schema(#[from] dorm_census_db::SchemaError),

    #[error("{0}")]
    Read(#[from] dorm_census_ingest::ReadError),

    #[error("{0}")]
    Load(#[from] dorm_census_ingest::LoadError),

    #[error("{0}")]
    Report(#[from] dorm_census_db::ReportError),

    #[error("{0}")]
    Export(#[from] dorm_census_export::ExportError),
}
