// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Dynamics — Errors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Invalid cluster descriptor at line {line}: {message}")]
    InvalidDescriptor { line: usize, message: String },

    #[error("Duplicate cluster composition: {0}")]
    DuplicateCluster(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Grouping conflict: {0}")]
    GroupingConflict(String),

    #[error("Network not reinitialized: {0}")]
    NotInitialized(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
