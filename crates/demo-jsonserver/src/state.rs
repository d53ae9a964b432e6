use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::RwLock;

type Object = Map<String, Value>;

/// Shared in-memory collection of JSON objects keyed by numeric id.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Clone, Debug, Default)]
pub struct Collection {
    next_id: Arc<AtomicU64>,
    records: Arc<RwLock<HashMap<u64, Object>>>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `object` under a fresh id and return it with `id` set.
    pub async fn insert(&self, mut object: Object) -> Object {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        object.insert("id".into(), Value::from(id));
        self.records.write().await.insert(id, object.clone());
        object
    }

    pub async fn get(&self, id: u64) -> Option<Object> {
        self.records.read().await.get(&id).cloned()
    }

    /// Replace the object at `id`, keeping its id. `None` if absent.
    pub async fn replace(&self, id: u64, mut object: Object) -> Option<Object> {
        let mut records = self.records.write().await;
        let existing = records.get_mut(&id)?;
        object.insert("id".into(), Value::from(id));
        *existing = object.clone();
        Some(object)
    }

    /// Returns `true` if the object existed.
    pub async fn remove(&self, id: u64) -> bool {
        self.records.write().await.remove(&id).is_some()
    }
}
