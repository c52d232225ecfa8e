//! Single-slot cache of the last ranked front page.
//!
//! The payload is JSON `{ "savedAt": <unix ms>, "items": [...] }` stored
//! under one key. It is read back only within the TTL, and its items are
//! re-filtered against the current yesterday window on every read.

use crate::news::normalize::parse_date;
use crate::news::NewsItem;
use crate::window::{Clock, is_yesterday};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{fs, path::PathBuf, time::Duration};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, info};

/// Synchronous string key-value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.is_file() {
            return Ok(None);
        }
        let txt = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Some(txt))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CachePayload {
    saved_at: i64,
    items: Vec<CachedItem>,
}

// All text fields are required: one incomplete item makes the payload a miss.
#[derive(Debug, Serialize, Deserialize)]
struct CachedItem {
    title: String,
    link: String,
    source: String,
    #[serde(default)]
    date: Option<String>,
}

impl From<&NewsItem> for CachedItem {
    fn from(item: &NewsItem) -> Self {
        CachedItem {
            title: item.title.clone(),
            link: item.link.clone(),
            source: item.source.clone(),
            date: item.date.and_then(|d| d.format(&Rfc3339).ok()),
        }
    }
}

impl From<CachedItem> for NewsItem {
    fn from(cached: CachedItem) -> Self {
        NewsItem {
            title: cached.title,
            link: cached.link,
            source: cached.source,
            date: cached.date.as_deref().and_then(parse_date),
        }
    }
}

pub struct CacheManager {
    key: String,
    ttl: Duration,
}

impl CacheManager {
    pub fn new(key: impl Into<String>, ttl: Duration) -> Self {
        Self {
            key: key.into(),
            ttl,
        }
    }

    /// Overwrites the slot with `items`, stamped with `now`.
    pub fn save(&self, store: &mut dyn KeyValueStore, items: &[NewsItem], now: OffsetDateTime) -> Result<()> {
        let payload = CachePayload {
            saved_at: unix_millis(now),
            items: items.iter().map(CachedItem::from).collect(),
        };
        let json = serde_json::to_string(&payload)?;
        store.set(&self.key, &json)?;
        debug!(key = %self.key, items = items.len(), "cache written");
        Ok(())
    }

    /// `None` is a miss. `Some(vec![])` is a hit whose items all fell out
    /// of the yesterday window.
    pub fn load(&self, store: &dyn KeyValueStore, clock: &dyn Clock) -> Option<Vec<NewsItem>> {
        match self.try_load(store, clock) {
            Ok(Some(items)) => {
                info!(key = %self.key, items = items.len(), "cache hit");
                Some(items)
            }
            Ok(None) => None,
            Err(err) => {
                debug!(key = %self.key, error = %err, "cache unusable");
                None
            }
        }
    }

    fn try_load(&self, store: &dyn KeyValueStore, clock: &dyn Clock) -> Result<Option<Vec<NewsItem>>> {
        let Some(raw) = store.get(&self.key)? else {
            debug!(key = %self.key, "cache empty");
            return Ok(None);
        };
        let payload: CachePayload = serde_json::from_str(&raw)?;
        if payload.saved_at == 0 {
            bail!("cache payload has no save time");
        }
        let age_ms = unix_millis(clock.now()) - payload.saved_at;
        if age_ms > self.ttl.as_millis() as i64 {
            debug!(key = %self.key, age_secs = age_ms / 1000, "cache expired");
            return Ok(None);
        }
        Ok(Some(
            payload
                .items
                .into_iter()
                .map(NewsItem::from)
                .filter(|item| is_yesterday(item.date, clock))
                .collect(),
        ))
    }
}

fn unix_millis(t: OffsetDateTime) -> i64 {
    (t.unix_timestamp_nanos() / 1_000_000) as i64
}
