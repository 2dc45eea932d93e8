// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::cache::SettingsCache;
use crate::registry::RollNumberValidator;
use crate::store::{DuplicateQuery, Storage};
use rollno_domain::{identity_key, normalize};
use tracing::{error, warn};

impl<C: SettingsCache> RollNumberValidator<C> {
    /// Searches the event's active orders for a roll number.
    ///
    /// The roll number is normalized before searching. Stored answers match
    /// on their identity key, ignoring case and hyphenation. Answers of
    /// `exclude_order` are ignored.
    ///
    /// Returns whether a duplicate was found and, if so, a message for the
    /// registrant. A failed search counts as a duplicate.
    ///
    /// # Arguments
    ///
    /// * `storage` - Order data of the host
    /// * `question_id` - The roll number question
    /// * `roll_number` - The candidate roll number
    /// * `event_id` - The event to search within
    /// * `exclude_order` - An order whose own answers are not duplicates
    pub fn check_duplicate<S>(
        &self,
        storage: &mut S,
        question_id: i64,
        roll_number: &str,
        event_id: i64,
        exclude_order: Option<i64>,
    ) -> (bool, Option<String>)
    where
        S: Storage + ?Sized,
    {
        let canonical: String = normalize(roll_number);
        let key: String = identity_key(&canonical);
        let query: DuplicateQuery<'_> = DuplicateQuery {
            event_id,
            question_id,
            key: &key,
            exclude_order,
        };

        match storage.active_answer_exists(&query) {
            Ok(false) => (false, None),
            Ok(true) => {
                warn!(
                    event_id,
                    question_id,
                    roll_number = %canonical,
                    ?exclude_order,
                    "Duplicate roll number"
                );
                (
                    true,
                    Some(format!("Roll number \"{canonical}\" is already in use")),
                )
            }
            Err(err) => {
                error!(
                    event_id,
                    question_id,
                    roll_number = %canonical,
                    error = %err,
                    "Duplicate search failed"
                );
                (
                    true,
                    Some(String::from(
                        "Roll number could not be checked for duplicates",
                    )),
                )
            }
        }
    }
}
