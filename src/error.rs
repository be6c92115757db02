use crate::ingest::error::IngestError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AirQualityError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("Failed to build report table")]
    Frame(#[from] PolarsError),

    #[error("Failed to serialize report")]
    Json(#[from] serde_json::Error),
}
