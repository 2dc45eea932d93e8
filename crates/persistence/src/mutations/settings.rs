// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use serde::Serialize;
use tracing::debug;

use crate::diesel_schema::event_settings;
use crate::error::PersistenceError;

/// Writes a setting, replacing any previous value.
///
/// # Errors
///
/// Returns an error if the value cannot be encoded or written.
pub fn write_setting<T: Serialize + ?Sized>(
    conn: &mut SqliteConnection,
    event_id: i64,
    key: &str,
    value: &T,
) -> Result<(), PersistenceError> {
    let json: String = serde_json::to_string(value)?;

    diesel::replace_into(event_settings::table)
        .values((
            event_settings::event_id.eq(event_id),
            event_settings::key.eq(key),
            event_settings::value_json.eq(&json),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("write_setting: {e}")))?;

    debug!(event_id, key, "Wrote event setting");
    Ok(())
}

/// Removes a setting. Removing an unset setting is not an error.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_setting(
    conn: &mut SqliteConnection,
    event_id: i64,
    key: &str,
) -> Result<(), PersistenceError> {
    diesel::delete(event_settings::table.find((event_id, key)))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("delete_setting: {e}")))?;

    debug!(event_id, key, "Deleted event setting");
    Ok(())
}
