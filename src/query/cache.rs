// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory read cache keyed by [`QueryKey`].
//!
//! Each key tracks a monotonically increasing request sequence. A fetch takes
//! a [`FetchTicket`] before going to the network and hands it back with the
//! result; the result is only stored if no newer fetch for the same key has
//! started since. Invalidation marks everything fetched so far as stale, so a
//! request already in flight when a write lands cannot make the entry fresh
//! again.

use super::key::{QueryKey, Resource};
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::{debug, warn};

type Value = Arc<dyn Any + Send + Sync>;

#[derive(Default)]
struct Entry {
    value: Option<Value>,
    /// Last sequence number handed out for this key.
    issued: u64,
    /// Sequence number of the stored value.
    applied: u64,
    /// Values with `applied <= stale_through` are stale.
    stale_through: u64,
    /// Tickets handed out and not yet completed or abandoned.
    in_flight: u32,
    updated_at: Option<Instant>,
}

impl Entry {
    fn is_fresh(&self) -> bool {
        self.value.is_some() && self.applied > self.stale_through
    }

    fn finish(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    fn is_unused(&self) -> bool {
        self.value.is_none() && self.in_flight == 0
    }
}

#[derive(Default)]
struct State {
    /// Bumped by [`QueryCache::clear`]; tickets from an older generation
    /// are never stored.
    generation: u64,
    entries: HashMap<QueryKey, Entry>,
}

/// Proof that a fetch was started; returned to [`QueryCache::complete`] or
/// [`QueryCache::abandon`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    key: QueryKey,
    seq: u64,
    generation: u64,
}

impl FetchTicket {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Why a finished fetch was not stored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Superseded {
    #[error("response for {key} (request {seq}) superseded by request {latest}")]
    NewerRequest { key: QueryKey, seq: u64, latest: u64 },

    #[error("response for {key} arrived after the cache was cleared")]
    Cleared { key: QueryKey },
}

#[derive(Default)]
pub struct QueryCache {
    state: Mutex<State>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached value for `key`, fresh or stale.
    pub fn get<T: Any + Send + Sync>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let state = self.lock();
        let value = state.entries.get(key)?.value.clone()?;
        value.downcast::<T>().ok()
    }

    /// Cached value for `key` only if it has not been invalidated.
    pub fn get_fresh<T: Any + Send + Sync>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let state = self.lock();
        let entry = state.entries.get(key)?;
        if !entry.is_fresh() {
            return None;
        }
        entry.value.clone()?.downcast::<T>().ok()
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.lock()
            .entries
            .get(key)
            .is_some_and(|e| e.value.is_some())
    }

    /// True when a value is cached for `key` but has been invalidated.
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.lock()
            .entries
            .get(key)
            .is_some_and(|e| e.value.is_some() && !e.is_fresh())
    }

    pub fn updated_at(&self, key: &QueryKey) -> Option<Instant> {
        self.lock().entries.get(key).and_then(|e| e.updated_at)
    }

    pub fn begin_fetch(&self, key: &QueryKey) -> FetchTicket {
        let mut state = self.lock();
        let generation = state.generation;
        let entry = state.entries.entry(key.clone()).or_default();
        entry.issued += 1;
        entry.in_flight += 1;
        FetchTicket {
            key: key.clone(),
            seq: entry.issued,
            generation,
        }
    }

    /// Stores the result of the fetch behind `ticket` unless a newer fetch
    /// for the same key has started in the meantime or the cache was
    /// cleared after the ticket was issued.
    pub fn complete<T: Any + Send + Sync>(
        &self,
        ticket: FetchTicket,
        value: T,
    ) -> Result<Arc<T>, Superseded> {
        let mut state = self.lock();
        if ticket.generation != state.generation {
            warn!(key = %ticket.key, seq = ticket.seq, "discarding response from before the cache was cleared");
            return Err(Superseded::Cleared { key: ticket.key });
        }
        let entry = state.entries.entry(ticket.key.clone()).or_default();
        entry.finish();
        if ticket.seq < entry.issued {
            warn!(key = %ticket.key, seq = ticket.seq, latest = entry.issued, "discarding superseded response");
            let latest = entry.issued;
            if entry.is_unused() {
                state.entries.remove(&ticket.key);
            }
            return Err(Superseded::NewerRequest {
                key: ticket.key,
                seq: ticket.seq,
                latest,
            });
        }
        let value = Arc::new(value);
        entry.value = Some(value.clone());
        entry.applied = ticket.seq;
        entry.updated_at = Some(Instant::now());
        debug!(key = %ticket.key, seq = ticket.seq, "cached response");
        Ok(value)
    }

    /// Gives back a ticket whose fetch failed. Keys left with no value and
    /// no outstanding fetch are dropped.
    pub fn abandon(&self, ticket: FetchTicket) {
        let mut state = self.lock();
        if ticket.generation != state.generation {
            return;
        }
        let Some(entry) = state.entries.get_mut(&ticket.key) else {
            return;
        };
        entry.finish();
        if entry.is_unused() {
            state.entries.remove(&ticket.key);
        }
    }

    /// Writes `value` directly, as if a fetch had just returned it.
    pub fn set<T: Any + Send + Sync>(&self, key: &QueryKey, value: T) -> Arc<T> {
        let mut state = self.lock();
        let entry = state.entries.entry(key.clone()).or_default();
        entry.issued += 1;
        let value = Arc::new(value);
        entry.value = Some(value.clone());
        entry.applied = entry.issued;
        entry.updated_at = Some(Instant::now());
        value
    }

    /// Marks every key starting with `prefix` stale. Returns how many
    /// cached entries were affected.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut state = self.lock();
        let mut n = 0;
        for (key, entry) in state.entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.stale_through = entry.issued;
                if entry.value.is_some() {
                    n += 1;
                }
            }
        }
        n
    }

    pub fn invalidate_resource(&self, resource: Resource) -> usize {
        self.invalidate(&QueryKey::new(resource))
    }

    /// Drops the value for `key`. A fetch still in flight for it will not be stored.
    pub fn remove(&self, key: &QueryKey) {
        let mut state = self.lock();
        if let Some(entry) = state.entries.get_mut(key) {
            entry.value = None;
            entry.stale_through = entry.issued;
            if entry.is_unused() {
                state.entries.remove(key);
            }
        }
    }

    /// Drops everything, e.g. on logout. Fetches started before the call
    /// can no longer store their responses.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.generation += 1;
        state.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.lock()
            .entries
            .values()
            .filter(|e| e.value.is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys currently tracked, with or without a value.
    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.lock().entries.len()
    }
}
