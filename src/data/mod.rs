//! Data layer: fetching, the in-memory dataset, and synthetic samples.
//!
//! ```text
//!  URL / local CSV
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  fetch    │  bytes from HTTPS or disk
//!   └──────────┘
//!        │  io::ingest parses + validates
//!        ▼
//!   ┌──────────┐
//!   │ Dataset   │  Vec<SalesRecord>, recession view, years
//!   └──────────┘
//! ```

use thiserror::Error;

pub mod dataset;
pub mod fetch;
pub mod sample;

pub use dataset::Dataset;
pub use fetch::{load_dataset, DataFetcher};
pub use sample::{generate_sample, write_sample_csv, SampleConfig};

/// Failures while obtaining or validating the dataset.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to fetch dataset: {0}")]
    Fetch(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Line {line}, column '{column}': {message}")]
    Row {
        line: usize,
        column: String,
        message: String,
    },
    #[error("Dataset contains no rows")]
    Empty,
    #[error("Invalid sample settings: {0}")]
    InvalidSample(String),
}
