// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-event settings, stored as JSON values keyed by name.

use diesel::prelude::*;
use diesel::SqliteConnection;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::diesel_schema::event_settings;
use crate::error::PersistenceError;

/// Reads and decodes a setting. Returns `Ok(None)` when it is unset.
///
/// # Errors
///
/// Returns an error if the query fails or the stored value does not decode
/// as `T`.
pub fn read_setting<T: DeserializeOwned>(
    conn: &mut SqliteConnection,
    event_id: i64,
    key: &str,
) -> Result<Option<T>, PersistenceError> {
    let raw: Option<String> = event_settings::table
        .find((event_id, key))
        .select(event_settings::value_json)
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("read_setting: {e}")))?;

    debug!(event_id, key, present = raw.is_some(), "Read event setting");

    raw.map(|json| {
        serde_json::from_str(&json)
            .map_err(|e| PersistenceError::InvalidData(format!("setting {key} of event {event_id}: {e}")))
    })
    .transpose()
}
