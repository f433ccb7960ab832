//! Tag-based query cache.
//!
//! Queries are stored under their endpoint and labelled with the tags they
//! provide. A successful mutation dirties its declared tags: every entry
//! carrying one of them goes stale and is refetched on its next read. A
//! query that was in flight when its tag was dirtied still answers its
//! caller, but the answer is stored stale.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::watch;
use tracing::debug;

use crate::api::client::ApiClient;
use crate::api::endpoints::{Endpoint, Tag};
use crate::error::Result;

#[derive(Debug)]
struct Entry {
    value: Value,
    tags: &'static [Tag],
    stale: bool,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<Endpoint, Entry>,
    epochs: HashMap<Tag, u64>,
}

impl Inner {
    fn epochs_of(&self, tags: &[Tag]) -> Vec<u64> {
        tags.iter().map(|t| self.epochs.get(t).copied().unwrap_or(0)).collect()
    }
}

#[derive(Debug)]
pub struct QueryCache {
    inner: Mutex<Inner>,
    generation: watch::Sender<u64>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        let (generation, _) = watch::channel(0);
        Self { inner: Mutex::new(Inner::default()), generation }
    }

    /// Fresh cached payload, if any.
    pub fn cached(&self, endpoint: &Endpoint) -> Option<Value> {
        let inner = self.inner.lock();
        inner
            .entries
            .get(endpoint)
            .filter(|e| !e.stale)
            .map(|e| e.value.clone())
    }

    /// Missing entries count as stale.
    pub fn is_stale(&self, endpoint: &Endpoint) -> bool {
        self.inner.lock().entries.get(endpoint).is_none_or(|e| e.stale)
    }

    /// Serve from cache when fresh, otherwise go to the network.
    pub async fn query(&self, client: &ApiClient, endpoint: &Endpoint) -> Result<Value> {
        if let Some(value) = self.cached(endpoint) {
            debug!(endpoint = endpoint.name(), "cache hit");
            return Ok(value);
        }
        self.refetch(client, endpoint).await
    }

    /// Always go to the network and store the answer.
    pub async fn refetch(&self, client: &ApiClient, endpoint: &Endpoint) -> Result<Value> {
        let tags = endpoint.provides();
        let started = self.inner.lock().epochs_of(tags);

        let value = client.send(endpoint).await?;

        let mut inner = self.inner.lock();
        let stale = inner.epochs_of(tags) != started;
        if stale {
            debug!(endpoint = endpoint.name(), "invalidated while in flight; stored stale");
        }
        inner
            .entries
            .insert(endpoint.clone(), Entry { value: value.clone(), tags, stale });
        Ok(value)
    }

    /// Run a mutation; on success dirty the tags it declares.
    pub async fn mutate(&self, client: &ApiClient, endpoint: &Endpoint) -> Result<Value> {
        let value = client.send(endpoint).await?;
        self.invalidate(endpoint.invalidates());
        Ok(value)
    }

    pub fn invalidate(&self, tags: &[Tag]) {
        if tags.is_empty() {
            return;
        }
        {
            let mut inner = self.inner.lock();
            for tag in tags {
                *inner.epochs.entry(*tag).or_insert(0) += 1;
            }
            let mut dirtied = 0usize;
            for entry in inner.entries.values_mut() {
                if entry.tags.iter().any(|t| tags.contains(t)) {
                    entry.stale = true;
                    dirtied += 1;
                }
            }
            debug!(?tags, dirtied, "tags invalidated");
        }
        self.generation.send_modify(|g| *g += 1);
    }

    /// Ticks on every invalidation; watchers re-read before their next render.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }

    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }
}
