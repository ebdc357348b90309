//! Document store - CRUD storage for wire documents behind a trait.
//!
//! The service layer talks to an external document database through the
//! `DocumentStore` trait; `InMemoryStore` is the HashMap-backed stand-in
//! used for development and tests.
//!
//! ## Example
//!
//! ```ignore
//! use qaboard::store::{Document, DocumentStore, InMemoryStore};
//!
//! #[derive(Serialize, Deserialize, Clone)]
//! struct Question {
//!     pub id: String,
//!     pub title: String,
//! }
//!
//! impl Document for Question {
//!     const COLLECTION: &'static str = "questions";
//!     fn id(&self) -> &str { &self.id }
//! }
//!
//! let store = InMemoryStore::new();
//! store.insert(&question)?;
//! let loaded = store.get::<Question>("q-1")?;
//! ```

mod in_memory;
mod store;

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// Trait for types that live in a store collection.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this document type (e.g., "questions").
    /// Maps to a collection in a document database, a table in SQL,
    /// a key prefix in KV stores.
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this document.
    fn id(&self) -> &str;
}

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Insert collided with an existing document id.
    AlreadyExists { collection: String, id: String },
    /// The document failed to encode or decode.
    Serde(String),
    /// The backend itself failed.
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::AlreadyExists { collection, id } => {
                write!(f, "document already exists: {}:{}", collection, id)
            }
            StoreError::Serde(msg) => write!(f, "document serialization error: {}", msg),
            StoreError::Backend(msg) => write!(f, "store backend error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

pub use in_memory::InMemoryStore;
pub use store::DocumentStore;
