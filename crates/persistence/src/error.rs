// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rollno::StoreError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested event was not found.
    EventNotFound(String),
    /// The requested student was not found.
    StudentNotFound { event_id: i64, roll_number: String },
    /// A student with this roll number already exists for the event.
    DuplicateStudent { event_id: i64, roll_number: String },
    /// A stored value could not be interpreted.
    InvalidData(String),
    /// Work run inside a transaction failed.
    Store(StoreError),
    /// The requested resource was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::EventNotFound(slug) => write!(f, "Event not found: {slug}"),
            Self::StudentNotFound {
                event_id,
                roll_number,
            } => write!(
                f,
                "Student {roll_number} not found in event {event_id}"
            ),
            Self::DuplicateStudent {
                event_id,
                roll_number,
            } => write!(
                f,
                "Student {roll_number} already exists in event {event_id}"
            ),
            Self::InvalidData(msg) => write!(f, "Invalid stored data: {msg}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<StoreError> for PersistenceError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::Store(inner) => inner,
            PersistenceError::NotFound(msg) => Self::NotFound(msg),
            PersistenceError::SerializationError(msg) | PersistenceError::InvalidData(msg) => {
                Self::Corrupt(msg)
            }
            other => Self::Backend(other.to_string()),
        }
    }
}
