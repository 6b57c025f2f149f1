use crate::config::{CacheBackend, CacheSettings};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Raw GET response as the cache stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub body: String,
    pub link: Option<String>,
    pub stored_at: DateTime<Utc>,
}

/// URL-keyed response cache with a fixed expiry.
#[derive(Debug)]
pub struct ResponseCache {
    entries: Option<Mutex<HashMap<String, CachedResponse>>>,
    expire_after: Duration,
}

impl ResponseCache {
    pub fn new(settings: &CacheSettings) -> Self {
        let entries = match settings.backend {
            CacheBackend::Memory => Some(Mutex::new(HashMap::new())),
            CacheBackend::None => None,
        };
        Self {
            entries,
            expire_after: settings.expire_after(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.entries.is_some()
    }

    pub fn get(&self, url: &str) -> Option<CachedResponse> {
        self.get_at(url, Utc::now())
    }

    fn get_at(&self, url: &str, now: DateTime<Utc>) -> Option<CachedResponse> {
        let mut entries = self.entries.as_ref()?.lock().ok()?;
        let entry = entries.get(url)?;

        let age = (now - entry.stored_at).to_std().unwrap_or(Duration::ZERO);
        if age >= self.expire_after {
            debug!(url, "Cache entry expired");
            entries.remove(url);
            return None;
        }

        debug!(url, "Cache hit");
        entries.get(url).cloned()
    }

    pub fn put(&self, url: &str, body: String, link: Option<String>) {
        self.put_at(url, body, link, Utc::now());
    }

    fn put_at(&self, url: &str, body: String, link: Option<String>, now: DateTime<Utc>) {
        let Some(entries) = self.entries.as_ref() else {
            return;
        };
        if let Ok(mut entries) = entries.lock() {
            entries.insert(
                url.to_string(),
                CachedResponse {
                    body,
                    link,
                    stored_at: now,
                },
            );
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .as_ref()
            .and_then(|e| e.lock().ok().map(|e| e.len()))
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
