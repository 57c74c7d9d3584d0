//! Keyed request cache with TTL, debounce and single-flight fetches
//!
//! Every read goes through [`RequestCache::get`], which decides per key
//! whether to answer from memory, join a fetch already in progress, or start
//! a new one. Time is measured with [`tokio::time::Instant`] so the behaviour
//! can be exercised with a paused clock.

use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::time::Instant;

use super::CachePolicy;

type SharedFetch<V, E> = Shared<BoxFuture<'static, Result<V, E>>>;

/// A value and when it was stored
struct Stamped<V> {
    value: V,
    stored_at: Instant,
}

/// Fetch registered for a key, tagged so a detached fetch can recognise
/// that its slot was taken away.
struct InFlight<V, E> {
    ticket: u64,
    fetch: SharedFetch<V, E>,
}

struct Entry<V, E> {
    value: Option<Stamped<V>>,
    /// When the last fetch completed, successfully or not
    last_fetch: Option<Instant>,
    in_flight: Option<InFlight<V, E>>,
}

impl<V, E> Default for Entry<V, E> {
    fn default() -> Self {
        Self {
            value: None,
            last_fetch: None,
            in_flight: None,
        }
    }
}

struct State<K, V, E> {
    entries: HashMap<K, Entry<V, E>>,
    next_ticket: u64,
}

/// In-memory cache of fallible async reads.
///
/// Cloning is cheap and clones share the same entries.
pub struct RequestCache<K, V, E> {
    state: Arc<Mutex<State<K, V, E>>>,
}

impl<K, V, E> Clone for RequestCache<K, V, E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<K, V, E> Default for RequestCache<K, V, E> {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                entries: HashMap::new(),
                next_ticket: 0,
            })),
        }
    }
}

fn lock<K, V, E>(state: &Mutex<State<K, V, E>>) -> MutexGuard<'_, State<K, V, E>> {
    // Entries stay consistent between statements, so a poisoned lock is still usable
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<K, V, E> RequestCache<K, V, E>
where
    K: Eq + Hash + Clone + Display + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `key`, calling `fetch` only when the cache cannot answer.
    ///
    /// In order:
    /// 1. Within `policy.debounce` of the last completed fetch, a stored value
    ///    is returned as is, even when stale or when `force_refresh` is set.
    ///    Without a stored value the call waits out the window.
    /// 2. Unless `force_refresh`, a value younger than `policy.ttl` is returned.
    /// 3. A fetch already in flight for `key` is joined instead of starting
    ///    another one.
    ///
    /// A successful fetch stores its value. A failed fetch stores nothing and
    /// its error is returned to every caller that joined it.
    ///
    /// `fetch` is called while the cache is locked and must not touch this cache.
    pub async fn get<F, Fut>(
        &self,
        key: &K,
        policy: CachePolicy,
        force_refresh: bool,
        fetch: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        let wait = {
            let state = lock(&self.state);
            let now = Instant::now();
            match state.entries.get(key) {
                Some(Entry {
                    last_fetch: Some(last),
                    value,
                    ..
                }) if now.duration_since(*last) < policy.debounce => {
                    if let Some(stamped) = value {
                        log::debug!("Cache debounce: {}", key);
                        return Ok(stamped.value.clone());
                    }
                    Some(policy.debounce - now.duration_since(*last))
                }
                _ => None,
            }
        };

        if let Some(wait) = wait {
            log::debug!("Cache debounce wait {:?}: {}", wait, key);
            tokio::time::sleep(wait).await;
        }

        let fetch = {
            let mut guard = lock(&self.state);
            let State {
                entries,
                next_ticket,
            } = &mut *guard;
            let entry = entries.entry(key.clone()).or_default();

            if !force_refresh
                && let Some(stamped) = &entry.value
                && stamped.stored_at.elapsed() < policy.ttl
            {
                log::debug!("Cache hit: {}", key);
                return Ok(stamped.value.clone());
            }

            match &entry.in_flight {
                Some(in_flight) => {
                    log::debug!("Cache join in-flight: {}", key);
                    in_flight.fetch.clone()
                }
                None => {
                    log::debug!("Cache miss: {}", key);
                    let ticket = *next_ticket;
                    *next_ticket += 1;

                    let shared = self
                        .settle(key.clone(), ticket, fetch())
                        .boxed()
                        .shared();
                    entry.in_flight = Some(InFlight {
                        ticket,
                        fetch: shared.clone(),
                    });
                    shared
                }
            }
        };

        fetch.await
    }

    /// Wrap a fetch so that its outcome is recorded under `key`, unless the
    /// slot was invalidated while it ran.
    fn settle<Fut>(
        &self,
        key: K,
        ticket: u64,
        fetch: Fut,
    ) -> impl Future<Output = Result<V, E>> + Send + 'static
    where
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        let state = Arc::clone(&self.state);
        async move {
            let result = fetch.await;

            let mut state = lock(&state);
            let owned = state
                .entries
                .get(&key)
                .and_then(|e| e.in_flight.as_ref())
                .is_some_and(|f| f.ticket == ticket);

            if owned && let Some(entry) = state.entries.get_mut(&key) {
                let now = Instant::now();
                entry.in_flight = None;
                entry.last_fetch = Some(now);
                if let Ok(value) = &result {
                    entry.value = Some(Stamped {
                        value: value.clone(),
                        stored_at: now,
                    });
                }
            } else {
                log::debug!("Discarding detached fetch: {}", key);
            }

            result
        }
    }

    /// Store a value obtained elsewhere, replacing any pending fetch.
    pub fn prime(&self, key: K, value: V) {
        let mut state = lock(&self.state);
        let entry = state.entries.entry(key).or_default();
        entry.in_flight = None;
        entry.value = Some(Stamped {
            value,
            stored_at: Instant::now(),
        });
    }

    /// Stored value for `key`, fresh or not, without fetching.
    #[cfg(test)]
    pub fn peek(&self, key: &K) -> Option<V> {
        let state = lock(&self.state);
        state
            .entries
            .get(key)
            .and_then(|e| e.value.as_ref())
            .map(|s| s.value.clone())
    }

    /// Forget `key` and detach its in-flight fetch.
    pub fn invalidate(&self, key: &K) {
        if lock(&self.state).entries.remove(key).is_some() {
            log::debug!("Cache invalidate: {}", key);
        }
    }

    /// Forget every key matching `predicate`.
    pub fn invalidate_where(&self, predicate: impl Fn(&K) -> bool) {
        lock(&self.state).entries.retain(|key, _| {
            let remove = predicate(key);
            if remove {
                log::debug!("Cache invalidate: {}", key);
            }
            !remove
        });
    }

    /// Forget everything.
    pub fn clear(&self) {
        lock(&self.state).entries.clear();
    }

    /// Number of keys holding a value or a pending fetch
    #[cfg(test)]
    pub fn len(&self) -> usize {
        lock(&self.state).entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
