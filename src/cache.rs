//! Query cache: last successful JSON payload per request path.
//!
//! No eviction and no expiry. Only successful fetches write to it; callers
//! drop entries with [`QueryCache::invalidate`] after a mutation.

use crate::services::api::{ApiClient, ApiError};
use dioxus::prelude::*;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryCache {
    entries: HashMap<String, serde_json::Value>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.entries.get(key)
    }

    /// Typed read; an entry of the wrong shape reads as missing
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.entries.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("Cached {} has unexpected shape: {}", key, e);
                None
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn put(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.entries.insert(key.into(), value);
    }

    /// Returns whether an entry was dropped
    pub fn invalidate(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            log::debug!("Invalidated {}", key);
        }
        removed
    }

    /// Drops every entry whose key starts with `prefix`; returns how many
    pub fn invalidate_prefix(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - self.entries.len();
        if removed > 0 {
            log::debug!("Invalidated {} entries under {}", removed, prefix);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// App-wide cache handle shared through context.
///
/// `epoch` moves on every invalidation so mounted queries refetch what went
/// missing.
#[derive(Clone, Copy, PartialEq)]
pub struct QueryClient {
    pub cache: Signal<QueryCache>,
    pub epoch: Signal<u64>,
}

impl QueryClient {
    pub fn new(cache: Signal<QueryCache>, epoch: Signal<u64>) -> Self {
        Self { cache, epoch }
    }

    pub fn invalidate(&mut self, key: &str) {
        if self.cache.write().invalidate(key) {
            *self.epoch.write() += 1;
        }
    }

    pub fn invalidate_prefix(&mut self, prefix: &str) {
        if self.cache.write().invalidate_prefix(prefix) > 0 {
            *self.epoch.write() += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

/// Fetches `path` through the cache.
///
/// Always fetches on mount; afterwards only when an invalidation removed the
/// entry. Cached data stays visible while a refetch is in flight.
pub fn use_query<T>(path: String) -> QueryState<T>
where
    T: DeserializeOwned + Clone + PartialEq + 'static,
{
    let client = use_context::<ApiClient>();
    let query = use_context::<QueryClient>();
    let mut error = use_signal(|| None::<ApiError>);
    let mut loading = use_signal(|| false);
    let mut fetched = use_signal(|| None::<String>);

    let key = use_memo(use_reactive!(|(path,)| path));

    let _ = use_resource(move || {
        let client = client.clone();
        let mut cache = query.cache;
        let path = key();
        let _ = (query.epoch)();
        async move {
            let first_fetch = fetched.peek().as_deref() != Some(path.as_str());
            if !first_fetch && cache.peek().contains(&path) {
                return;
            }
            fetched.set(Some(path.clone()));
            loading.set(true);
            match client.get_value(&path).await {
                Ok(value) => {
                    cache.write().put(path, value);
                    error.set(None);
                }
                Err(e) => {
                    log::error!("Query {} failed: {}", path, e);
                    error.set(Some(e));
                }
            }
            loading.set(false);
        }
    });

    let data = query.cache.read().get_as::<T>(&key());
    QueryState {
        data,
        loading: loading(),
        error: error(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_put_overwrites() {
        let mut cache = QueryCache::new();
        cache.put("/api/stats", json!({"activeEvents": 1}));
        cache.put("/api/stats", json!({"activeEvents": 2}));
        assert_eq!(cache.get("/api/stats"), Some(&json!({"activeEvents": 2})));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_prefix_only_hits_matching_keys() {
        let mut cache = QueryCache::new();
        cache.put("/api/events", json!([]));
        cache.put("/api/events/7/photos", json!([]));
        cache.put("/api/admin/events", json!([]));
        assert_eq!(cache.invalidate_prefix("/api/events"), 2);
        assert!(cache.contains("/api/admin/events"));
        assert!(!cache.invalidate("/api/events"));
    }

    #[test]
    fn test_get_as_mismatch_reads_missing() {
        let mut cache = QueryCache::new();
        cache.put("/api/stats", json!("oops"));
        let stats: Option<crate::models::DashboardStats> = cache.get_as("/api/stats");
        assert!(stats.is_none());
        assert!(cache.contains("/api/stats"));
    }
}
