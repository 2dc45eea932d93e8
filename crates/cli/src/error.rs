// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rollno::{CoreError, OrderError, StoreError};
use rollno_domain::RollNumberError;
use rollno_persistence::PersistenceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Rejected: {0}")]
    Rejected(#[from] RollNumberError),

    #[error("Order canceled: {0}")]
    Order(#[from] OrderError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Question '{identifier}' not found in event '{event}'")]
    QuestionNotFound { event: String, identifier: String },

    #[error("Event '{0}' has no roll number question")]
    NotConfigured(String),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}
