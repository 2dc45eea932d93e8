// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rollno_domain::{ConfigurationError, RollNumberError};
use thiserror::Error;

/// Failures reported by a storage collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backend failed to execute a read or write.
    #[error("Storage backend error: {0}")]
    Backend(String),
    /// A referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
    /// A stored value could not be interpreted.
    #[error("Corrupt stored value: {0}")]
    Corrupt(String),
}

/// Errors from administrative operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The requested configuration is not acceptable.
    Configuration(ConfigurationError),
    /// A storage collaborator failed.
    Storage(StoreError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(err) => write!(f, "Configuration error: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<ConfigurationError> for CoreError {
    fn from(err: ConfigurationError) -> Self {
        Self::Configuration(err)
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err)
    }
}

/// Cart-time validation failures.
///
/// `Rejected` is recoverable by the registrant: checkout is blocked and the
/// cart is kept.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    /// An answer failed validation.
    #[error("{source}")]
    Rejected {
        /// The rejection shown to the registrant.
        source: RollNumberError,
    },
    /// The configured question could not be looked up.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Commit-time validation failures.
///
/// The order has been canceled by the time the caller sees this error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderError {
    /// An answer of the order failed validation.
    #[error("{source}")]
    Rejected {
        /// The canceled order.
        order_id: i64,
        /// The rejection that caused the cancellation.
        source: RollNumberError,
    },
    /// Validation could not complete.
    #[error("Order {order_id} could not be validated: {source}")]
    Storage {
        /// The canceled order.
        order_id: i64,
        /// The underlying failure.
        source: StoreError,
    },
}

impl OrderError {
    /// Returns the order this error refers to.
    #[must_use]
    pub const fn order_id(&self) -> i64 {
        match self {
            Self::Rejected { order_id, .. } | Self::Storage { order_id, .. } => *order_id,
        }
    }
}
