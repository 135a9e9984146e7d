//! Errors raised at the loading and export edges
//!
//! Projection itself is infallible; only reading scenarios and writing
//! results can fail.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("duplicate {entity} id '{id}' in scenario '{scenario}'")]
    DuplicateId {
        scenario: String,
        entity: &'static str,
        id: String,
    },
}

pub type Result<T> = std::result::Result<T, ScenarioError>;
