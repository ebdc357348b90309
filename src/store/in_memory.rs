//! InMemoryStore - HashMap-backed document store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{Document, DocumentStore, StoreError};

/// In-memory document store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`, values are the JSON encoding of the
/// document. Clone-friendly via Arc: clones share storage, which is how
/// tests hold a handle onto the store a running service is using.
///
/// Every trait method takes the lock exactly once, so each call is an
/// isolated critical section; single-document writes are serialized, and
/// nothing is held between calls.
#[derive(Clone)]
pub struct InMemoryStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn make_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }

    fn decode<D: Document>(bytes: &[u8]) -> Result<D, StoreError> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Serde(e.to_string()))
    }

    fn encode<D: Document>(doc: &D) -> Result<Vec<u8>, StoreError> {
        serde_json::to_vec(doc).map_err(|e| StoreError::Serde(e.to_string()))
    }
}

impl DocumentStore for InMemoryStore {
    fn insert<D: Document>(&self, doc: &D) -> Result<(), StoreError> {
        let key = Self::make_key(D::COLLECTION, doc.id());
        let bytes = Self::encode(doc)?;

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        if storage.contains_key(&key) {
            return Err(StoreError::AlreadyExists {
                collection: D::COLLECTION.to_string(),
                id: doc.id().to_string(),
            });
        }

        storage.insert(key, bytes);
        Ok(())
    }

    fn get<D: Document>(&self, id: &str) -> Result<Option<D>, StoreError> {
        let key = Self::make_key(D::COLLECTION, id);
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        match storage.get(&key) {
            Some(bytes) => Ok(Some(Self::decode(bytes)?)),
            None => Ok(None),
        }
    }

    fn find<D: Document>(&self, predicate: &dyn Fn(&D) -> bool) -> Result<Vec<D>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        let prefix = format!("{}:", D::COLLECTION);
        let mut results = Vec::new();

        for (key, bytes) in storage.iter() {
            if key.starts_with(&prefix) {
                if let Ok(doc) = serde_json::from_slice::<D>(bytes) {
                    if predicate(&doc) {
                        results.push(doc);
                    }
                }
            }
        }

        Ok(results)
    }

    fn find_one<D: Document>(
        &self,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<Option<D>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        let prefix = format!("{}:", D::COLLECTION);

        for (key, bytes) in storage.iter() {
            if key.starts_with(&prefix) {
                if let Ok(doc) = serde_json::from_slice::<D>(bytes) {
                    if predicate(&doc) {
                        return Ok(Some(doc));
                    }
                }
            }
        }

        Ok(None)
    }

    fn update<D: Document>(
        &self,
        id: &str,
        apply: &dyn Fn(&mut D),
    ) -> Result<Option<D>, StoreError> {
        let key = Self::make_key(D::COLLECTION, id);
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        let bytes = match storage.get(&key) {
            Some(bytes) => bytes,
            None => return Ok(None),
        };

        let mut doc: D = Self::decode(bytes)?;
        apply(&mut doc);
        storage.insert(key, Self::encode(&doc)?);

        Ok(Some(doc))
    }

    fn update_where<D: Document>(
        &self,
        predicate: &dyn Fn(&D) -> bool,
        apply: &dyn Fn(&mut D),
    ) -> Result<Option<D>, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        let prefix = format!("{}:", D::COLLECTION);

        let matched = storage.iter().find_map(|(key, bytes)| {
            if !key.starts_with(&prefix) {
                return None;
            }
            match serde_json::from_slice::<D>(bytes) {
                Ok(doc) if predicate(&doc) => Some((key.clone(), doc)),
                _ => None,
            }
        });

        match matched {
            Some((key, mut doc)) => {
                apply(&mut doc);
                storage.insert(key, Self::encode(&doc)?);
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    fn remove<D: Document>(&self, id: &str) -> Result<Option<D>, StoreError> {
        let key = Self::make_key(D::COLLECTION, id);
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        match storage.remove(&key) {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn remove_where<D: Document>(
        &self,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<usize, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        let prefix = format!("{}:", D::COLLECTION);

        let doomed: Vec<String> = storage
            .iter()
            .filter_map(|(key, bytes)| {
                if !key.starts_with(&prefix) {
                    return None;
                }
                match serde_json::from_slice::<D>(bytes) {
                    Ok(doc) if predicate(&doc) => Some(key.clone()),
                    _ => None,
                }
            })
            .collect();

        for key in &doomed {
            storage.remove(key);
        }

        Ok(doomed.len())
    }
}
