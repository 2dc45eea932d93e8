// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-through cache for per-event settings.
//!
//! Entries expire after their TTL. There is no cross-process invalidation,
//! so a reader may see a value up to one TTL old.

use crate::error::StoreError;
use moka::Expiry;
use moka::sync::Cache;
use rollno_domain::{DepartmentCodeSet, StudentRecord};
use std::time::{Duration, Instant};

/// A cached per-event setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedSetting {
    /// Resolved department codes.
    DepartmentCodes(DepartmentCodeSet),
    /// The materialized roster.
    Roster(Vec<StudentRecord>),
    /// The configured roll number question, if any.
    QuestionId(Option<i64>),
}

/// Key/value cache with per-entry TTL.
///
/// Only single-key get and set are required to be atomic.
pub trait SettingsCache {
    /// Returns the live entry for `key`, if any.
    fn get(&self, key: &str) -> Option<CachedSetting>;

    /// Stores `value` under `key` for `ttl`.
    fn set(&self, key: &str, value: CachedSetting, ttl: Duration);

    /// Drops the entry for `key`.
    fn delete(&self, key: &str);

    /// Returns the cached entry, computing and storing it on a miss.
    ///
    /// A failed computation is returned as-is and nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `compute`.
    fn get_or_compute<F>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<CachedSetting, StoreError>
    where
        Self: Sized,
        F: FnOnce() -> Result<CachedSetting, StoreError>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let value: CachedSetting = compute()?;
        self.set(key, value.clone(), ttl);
        Ok(value)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    value: CachedSetting,
    ttl: Duration,
}

/// Expires each entry after the TTL it was stored with.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process settings cache backed by `moka`.
///
/// Clones share the same underlying storage.
#[derive(Clone)]
pub struct MokaSettingsCache {
    inner: Cache<String, Entry>,
}

impl MokaSettingsCache {
    /// Default upper bound on cached entries.
    pub const DEFAULT_CAPACITY: u64 = 10_000;

    /// Creates a cache holding at most `max_capacity` entries.
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .expire_after(PerEntryTtl)
                .build(),
        }
    }
}

impl Default for MokaSettingsCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for MokaSettingsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaSettingsCache")
            .field("entry_count", &self.inner.entry_count())
            .finish()
    }
}

impl SettingsCache for MokaSettingsCache {
    fn get(&self, key: &str) -> Option<CachedSetting> {
        self.inner.get(key).map(|entry| entry.value)
    }

    fn set(&self, key: &str, value: CachedSetting, ttl: Duration) {
        self.inner.insert(key.to_string(), Entry { value, ttl });
    }

    fn delete(&self, key: &str) {
        self.inner.invalidate(key);
    }
}
