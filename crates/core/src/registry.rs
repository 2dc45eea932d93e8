// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cached per-event configuration lookups: department codes and the
//! configured roll number question.

use crate::cache::{CachedSetting, SettingsCache};
use crate::error::StoreError;
use crate::store::Storage;
use rollno_domain::{
    CACHE_KIND_DEPARTMENT_CODES, CACHE_KIND_QUESTION_ID, CACHE_TTL, DepartmentCodeSet, Question,
    cache_key,
};
use tracing::{debug, warn};

/// The roll-number validation engine.
///
/// Holds the settings cache; storage is passed into each call so the same
/// engine serves both plain reads and transactional commit-time work.
#[derive(Debug, Clone, Default)]
pub struct RollNumberValidator<C: SettingsCache> {
    cache: C,
}

impl<C: SettingsCache> RollNumberValidator<C> {
    /// Creates an engine using `cache` for per-event settings.
    #[must_use]
    pub const fn new(cache: C) -> Self {
        Self { cache }
    }

    /// Returns the settings cache.
    #[must_use]
    pub const fn cache(&self) -> &C {
        &self.cache
    }

    /// Resolves the department codes accepted for an event.
    ///
    /// Never fails. If the configuration cannot be read the defaults are
    /// returned and nothing is cached.
    pub fn department_codes<S>(&self, storage: &mut S, event_id: i64) -> DepartmentCodeSet
    where
        S: Storage + ?Sized,
    {
        let key: String = cache_key(event_id, CACHE_KIND_DEPARTMENT_CODES);
        let resolved = self.cache.get_or_compute(&key, CACHE_TTL, || {
            storage
                .department_codes(event_id)
                .map(|codes| CachedSetting::DepartmentCodes(DepartmentCodeSet::from_configured(codes)))
        });

        match resolved {
            Ok(CachedSetting::DepartmentCodes(codes)) => codes,
            Ok(other) => {
                warn!(event_id, key, ?other, "Unexpected cache entry for department codes");
                DepartmentCodeSet::default()
            }
            Err(err) => {
                warn!(event_id, error = %err, "Falling back to default department codes");
                DepartmentCodeSet::default()
            }
        }
    }

    /// Returns the configured roll number question id of an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the setting cannot be read.
    pub fn question_id<S>(&self, storage: &mut S, event_id: i64) -> Result<Option<i64>, StoreError>
    where
        S: Storage + ?Sized,
    {
        let key: String = cache_key(event_id, CACHE_KIND_QUESTION_ID);
        match self.cache.get_or_compute(&key, CACHE_TTL, || {
            storage.question_id(event_id).map(CachedSetting::QuestionId)
        })? {
            CachedSetting::QuestionId(question_id) => Ok(question_id),
            other => Err(StoreError::Corrupt(format!(
                "cache entry {key} holds {other:?}"
            ))),
        }
    }

    /// Returns the roll number question if validation is enabled for the
    /// event.
    ///
    /// `None` means the feature is not configured: no question is set, or
    /// the question no longer exists or is inactive.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the question cannot be read.
    pub fn active_question<S>(
        &self,
        storage: &mut S,
        event_id: i64,
    ) -> Result<Option<Question>, StoreError>
    where
        S: Storage + ?Sized,
    {
        let Some(question_id) = self.question_id(storage, event_id)? else {
            debug!(event_id, "No roll number question configured");
            return Ok(None);
        };

        match storage.find_question(question_id)? {
            Some(question) if question.event_id == event_id && question.active => {
                Ok(Some(question))
            }
            _ => {
                warn!(
                    event_id,
                    question_id, "Roll number question not found or inactive"
                );
                Ok(None)
            }
        }
    }
}
