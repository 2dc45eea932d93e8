// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Organizer-facing configuration changes.
//!
//! Each change writes through to storage and then refreshes or drops the
//! affected cache entry, so this process sees it immediately. Other
//! processes see it once their entry expires.

use crate::cache::{CachedSetting, SettingsCache};
use crate::error::CoreError;
use crate::registry::RollNumberValidator;
use crate::store::Storage;
use rollno_domain::{
    CACHE_KIND_DEPARTMENT_CODES, CACHE_KIND_QUESTION_ID, CACHE_KIND_VALID_STUDENTS, CACHE_TTL,
    ConfigurationError, Question, cache_key, validate_question_eligibility,
};
use tracing::{info, warn};

impl<C: SettingsCache> RollNumberValidator<C> {
    /// Selects the roll number question of an event; `None` disables
    /// validation.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the question does not exist, is
    /// inactive, or is not eligible, and a storage error if the setting
    /// cannot be written.
    pub fn configure_question<S>(
        &self,
        storage: &mut S,
        event_id: i64,
        question_id: Option<i64>,
    ) -> Result<(), CoreError>
    where
        S: Storage + ?Sized,
    {
        if let Some(question_id) = question_id {
            let question: Question = storage
                .find_question(question_id)?
                .filter(|q| q.active)
                .ok_or(ConfigurationError::QuestionNotFound { question_id })?;
            validate_question_eligibility(&question, event_id)?;
        }

        storage.set_question_id(event_id, question_id)?;
        self.cache().set(
            &cache_key(event_id, CACHE_KIND_QUESTION_ID),
            CachedSetting::QuestionId(question_id),
            CACHE_TTL,
        );

        info!(event_id, ?question_id, "Roll number question configured");
        Ok(())
    }

    /// Stores the department codes accepted by an event.
    ///
    /// Codes are trimmed and upper-cased; blank entries are dropped. An
    /// empty list restores the defaults. Returns the stored codes.
    ///
    /// # Errors
    ///
    /// Returns an error if the setting cannot be written.
    pub fn set_department_codes<S>(
        &self,
        storage: &mut S,
        event_id: i64,
        codes: &[String],
    ) -> Result<Vec<String>, CoreError>
    where
        S: Storage + ?Sized,
    {
        let cleaned: Vec<String> = codes
            .iter()
            .map(|code| code.trim().to_ascii_uppercase())
            .filter(|code| !code.is_empty())
            .collect();

        storage.set_department_codes(event_id, &cleaned)?;
        self.cache()
            .delete(&cache_key(event_id, CACHE_KIND_DEPARTMENT_CODES));

        info!(event_id, codes = ?cleaned, "Department codes updated");
        Ok(cleaned)
    }

    /// Carries the roll number question over to a copied event.
    ///
    /// The target question is the one sharing the source question's
    /// identifier. If there is none the target stays unconfigured. Returns
    /// the question id set on the target, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if either event's configuration cannot be accessed.
    pub fn copy_settings<S>(
        &self,
        storage: &mut S,
        from_event: i64,
        to_event: i64,
    ) -> Result<Option<i64>, CoreError>
    where
        S: Storage + ?Sized,
    {
        let Some(source_id) = storage.question_id(from_event)? else {
            return Ok(None);
        };

        let Some(source) = storage.find_question(source_id)? else {
            warn!(from_event, question_id = source_id, "Source question no longer exists");
            return Ok(None);
        };

        let Some(target) = storage.find_question_by_identifier(to_event, &source.identifier)? else {
            warn!(
                from_event,
                to_event,
                question_id = source_id,
                identifier = %source.identifier,
                "Question not found in target event"
            );
            return Ok(None);
        };

        storage.set_question_id(to_event, Some(target.question_id))?;
        self.cache().set(
            &cache_key(to_event, CACHE_KIND_QUESTION_ID),
            CachedSetting::QuestionId(Some(target.question_id)),
            CACHE_TTL,
        );

        info!(
            from_event,
            to_event,
            question_id = target.question_id,
            "Roll number settings copied"
        );
        Ok(Some(target.question_id))
    }

    /// Drops every cached setting of an event.
    pub fn invalidate_event(&self, event_id: i64) {
        for kind in [
            CACHE_KIND_DEPARTMENT_CODES,
            CACHE_KIND_VALID_STUDENTS,
            CACHE_KIND_QUESTION_ID,
        ] {
            self.cache().delete(&cache_key(event_id, kind));
        }
    }
}
