// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Reasons a roll number answer is rejected.
///
/// The `Display` output is the human-readable message shown to the
/// registrant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollNumberError {
    /// No input was given.
    EmptyInput,
    /// The canonical value is shorter than the lower bound.
    TooShort {
        /// The violated lower bound.
        min: usize,
    },
    /// The canonical value is longer than the upper bound.
    TooLong {
        /// The violated upper bound.
        max: usize,
    },
    /// The value does not match `<DEPT>(-)?<DIGITS>`.
    InvalidFormat,
    /// The department code is not accepted for the event.
    InvalidDepartment {
        /// The accepted codes, sorted.
        accepted: Vec<String>,
    },
    /// The value is not in the event roster.
    NotInRoster {
        /// One line per roster entry, in stored order.
        listing: String,
    },
    /// The roster could not be consulted.
    RosterUnavailable {
        /// Description of the underlying failure.
        reason: String,
    },
    /// Another active order already holds the value.
    DuplicateRollNumber(String),
}

impl std::fmt::Display for RollNumberError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Roll number cannot be empty"),
            Self::TooShort { min } => {
                write!(f, "Roll number must be at least {min} characters long")
            }
            Self::TooLong { max } => {
                write!(f, "Roll number cannot be longer than {max} characters")
            }
            Self::InvalidFormat => write!(
                f,
                "Roll number must start with a valid department code (e.g., CSE, ECE) followed by numbers"
            ),
            Self::InvalidDepartment { accepted } => write!(
                f,
                "Invalid department code. Valid codes are: {}",
                accepted.join(", ")
            ),
            Self::NotInRoster { listing } => write!(
                f,
                "Invalid roll number. Please use one of the following:\n{listing}"
            ),
            Self::RosterUnavailable { reason } => {
                write!(f, "Error validating against predefined list: {reason}")
            }
            Self::DuplicateRollNumber(number) => {
                write!(f, "Roll number \"{number}\" is already in use")
            }
        }
    }
}

impl std::error::Error for RollNumberError {}

/// Problems with how an event is configured for roll number validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The selected question is not marked as required.
    #[error("The selected question must be marked as required")]
    QuestionNotRequired,

    /// The selected question is not a text or number question.
    #[error("The selected question must be of type text or number")]
    UnsupportedQuestionKind {
        /// The kind of the selected question.
        kind: String,
    },

    /// The selected question belongs to another event.
    #[error("The selected question does not belong to this event")]
    QuestionEventMismatch {
        /// The selected question.
        question_id: i64,
        /// The event being configured.
        event_id: i64,
    },

    /// The selected question does not exist or is inactive.
    #[error("Roll number question {question_id} not found or inactive")]
    QuestionNotFound {
        /// The selected question.
        question_id: i64,
    },

    /// A stored question kind could not be interpreted.
    #[error("Unknown question kind: {0}")]
    UnknownQuestionKind(String),

    /// A stored order status could not be interpreted.
    #[error("Unknown order status: {0}")]
    UnknownOrderStatus(String),
}
