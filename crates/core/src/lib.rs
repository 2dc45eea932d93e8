// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roll-number validation engine.
//!
//! [`RollNumberValidator`] runs the format, roster, and duplicate checks for
//! an event, reading configuration through a [`SettingsCache`] and the
//! host's storage traits. Hosts call [`RollNumberValidator::validate_cart`]
//! before checkout and [`RollNumberValidator::on_order_placed`] after an
//! order is written.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod admin;
mod cache;
mod duplicate;
mod error;
mod orchestrator;
mod registry;
mod roster;
mod store;

#[cfg(test)]
mod tests;

pub use cache::{CachedSetting, MokaSettingsCache, SettingsCache};
pub use error::{CartError, CoreError, OrderError, StoreError};
pub use orchestrator::{CartLine, CommitOutcome};
pub use registry::RollNumberValidator;
pub use store::{
    AnswerRecord, DuplicateQuery, OrderRef, OrderStore, SettingsStore, Storage, UnitOfWork,
};
