// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::cache::{CachedSetting, SettingsCache};
use crate::error::StoreError;
use crate::registry::RollNumberValidator;
use crate::store::Storage;
use rollno_domain::{
    CACHE_KIND_VALID_STUDENTS, CACHE_TTL, RollNumberError, StudentRecord, cache_key, match_roster,
};
use tracing::error;

impl<C: SettingsCache> RollNumberValidator<C> {
    /// Returns the roster of an event, through the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster cannot be read or the cached entry is
    /// not a roster.
    pub fn roster<S>(&self, storage: &mut S, event_id: i64) -> Result<Vec<StudentRecord>, StoreError>
    where
        S: Storage + ?Sized,
    {
        let key: String = cache_key(event_id, CACHE_KIND_VALID_STUDENTS);
        match self.cache().get_or_compute(&key, CACHE_TTL, || {
            storage.roster(event_id).map(CachedSetting::Roster)
        })? {
            CachedSetting::Roster(roster) => Ok(roster),
            other => Err(StoreError::Corrupt(format!(
                "cache entry {key} holds {other:?}"
            ))),
        }
    }

    /// Checks a roll number against the event roster.
    ///
    /// An empty roster accepts every roll number.
    ///
    /// # Errors
    ///
    /// Returns `NotInRoster` when the roster is non-empty and lacks the roll
    /// number, and `RosterUnavailable` when the roster cannot be loaded.
    pub fn check_roster<S>(
        &self,
        storage: &mut S,
        roll_number: &str,
        event_id: i64,
    ) -> Result<(), RollNumberError>
    where
        S: Storage + ?Sized,
    {
        let roster: Vec<StudentRecord> = self.roster(storage, event_id).map_err(|err| {
            error!(event_id, error = %err, "Roster could not be loaded");
            RollNumberError::RosterUnavailable {
                reason: err.to_string(),
            }
        })?;

        match_roster(roll_number, &roster)
    }
}
