// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::constants::DEFAULT_DEPARTMENT_CODES;
use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// A roll number in canonical form.
///
/// Only the format validator constructs values of this type, so holding a
/// `RollNumber` means the value passed the length, grammar, and department
/// checks for some event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RollNumber(String);

impl RollNumber {
    pub(crate) const fn from_canonical(value: String) -> Self {
        Self(value)
    }

    /// Returns the canonical value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the roll number, returning the canonical value.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for RollNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RollNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The department codes accepted for one event.
///
/// Never empty: an event that configures no codes gets the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentCodeSet {
    codes: BTreeSet<String>,
}

impl Default for DepartmentCodeSet {
    fn default() -> Self {
        Self {
            codes: DEFAULT_DEPARTMENT_CODES
                .iter()
                .map(|code| (*code).to_string())
                .collect(),
        }
    }
}

impl DepartmentCodeSet {
    /// Builds the set from configured codes.
    ///
    /// Codes are trimmed and upper-cased; blank entries are ignored. If
    /// nothing remains, the default set is used.
    ///
    /// # Arguments
    ///
    /// * `configured` - The codes stored in the event configuration
    #[must_use]
    pub fn from_configured<I, S>(configured: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes: BTreeSet<String> = configured
            .into_iter()
            .map(|code| code.as_ref().trim().to_ascii_uppercase())
            .filter(|code| !code.is_empty())
            .collect();

        if codes.is_empty() {
            return Self::default();
        }
        Self { codes }
    }

    /// Returns whether `code` is accepted.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Returns the accepted codes in sorted order.
    #[must_use]
    pub fn sorted(&self) -> Vec<String> {
        self.codes.iter().cloned().collect()
    }

    /// Returns the number of accepted codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns whether no code is accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Lifecycle status of a host order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Awaiting payment.
    Pending,
    /// Paid.
    Paid,
    /// Payment deadline passed.
    Expired,
    /// Terminal; the order holds nothing.
    Canceled,
}

impl OrderStatus {
    /// Statuses that count when searching for duplicates.
    pub const ACTIVE: [Self; 2] = [Self::Pending, Self::Paid];

    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Expired => "expired",
            Self::Canceled => "canceled",
        }
    }

    /// Returns whether an order in this status holds its roll number.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Paid)
    }
}

impl FromStr for OrderStatus {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "expired" => Ok(Self::Expired),
            "canceled" => Ok(Self::Canceled),
            _ => Err(ConfigurationError::UnknownOrderStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The answer type of a host question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    /// Free text.
    Text,
    /// Number.
    Number,
    /// Yes/no.
    Boolean,
    /// Choice from a list.
    Choice,
    /// Calendar date.
    Date,
    /// File upload.
    File,
}

impl QuestionKind {
    /// Returns the short code used for persistence.
    #[must_use]
    pub const fn as_code(&self) -> &'static str {
        match self {
            Self::Text => "T",
            Self::Number => "N",
            Self::Boolean => "B",
            Self::Choice => "C",
            Self::Date => "D",
            Self::File => "F",
        }
    }

    /// Returns whether questions of this kind can hold a roll number.
    #[must_use]
    pub const fn accepts_roll_numbers(&self) -> bool {
        matches!(self, Self::Text | Self::Number)
    }
}

impl FromStr for QuestionKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "T" => Ok(Self::Text),
            "N" => Ok(Self::Number),
            "B" => Ok(Self::Boolean),
            "C" => Ok(Self::Choice),
            "D" => Ok(Self::Date),
            "F" => Ok(Self::File),
            _ => Err(ConfigurationError::UnknownQuestionKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Host question metadata relevant to roll number validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question id.
    pub question_id: i64,
    /// The event the question belongs to.
    pub event_id: i64,
    /// Stable identifier chosen by the organizer.
    pub identifier: String,
    /// The answer type.
    pub kind: QuestionKind,
    /// Whether an answer is mandatory.
    pub required: bool,
    /// Whether the question is currently asked.
    pub active: bool,
}
