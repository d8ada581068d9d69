//! # Document Collections
//!
//! In-process document collections for verdant-cart.
//! Each collection holds one record type and exposes the filter-based
//! operations the handlers are written against: insert, find, update,
//! delete, and upsert. Records keep insertion order.

use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Unique id assigned to every stored document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generate a fresh id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| StoreError::InvalidId(s.to_string()))
    }
}

/// A record that can live in a [`Collection`]
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> DocumentId;
}

/// A single document collection.
///
/// Cheap to clone; clones share the same underlying data. The `closed`
/// flag is shared with the owning store so every operation observes
/// shutdown.
#[derive(Clone)]
pub struct Collection<T: Record> {
    name: &'static str,
    closed: Arc<AtomicBool>,
    docs: Arc<RwLock<Vec<T>>>,
}

impl<T: Record> Collection<T> {
    pub(crate) fn new(name: &'static str, closed: Arc<AtomicBool>) -> Self {
        Self {
            name,
            closed,
            docs: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Collection name (for logging and error reporting)
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::StoreClosed);
        }
        Ok(())
    }

    /// Insert a document, returning it
    pub async fn insert_one(&self, doc: T) -> StoreResult<T> {
        self.ensure_open()?;
        let mut docs = self.docs.write().await;
        docs.push(doc.clone());
        Ok(doc)
    }

    /// All documents, in insertion order
    pub async fn find_all(&self) -> StoreResult<Vec<T>> {
        self.ensure_open()?;
        Ok(self.docs.read().await.clone())
    }

    /// Documents matching the filter, in insertion order
    pub async fn find(&self, filter: impl Fn(&T) -> bool) -> StoreResult<Vec<T>> {
        self.ensure_open()?;
        Ok(self
            .docs
            .read()
            .await
            .iter()
            .filter(|d| filter(d))
            .cloned()
            .collect())
    }

    /// Document with the given id, if present
    pub async fn find_one(&self, id: DocumentId) -> StoreResult<Option<T>> {
        self.ensure_open()?;
        Ok(self.docs.read().await.iter().find(|d| d.id() == id).cloned())
    }

    /// First document matching the filter, if any
    pub async fn find_first(&self, filter: impl Fn(&T) -> bool) -> StoreResult<Option<T>> {
        self.ensure_open()?;
        Ok(self.docs.read().await.iter().find(|d| filter(d)).cloned())
    }

    /// Apply a mutation to the document with the given id.
    ///
    /// Returns the updated document, or `NotFound` if no document matches.
    pub async fn update_one(
        &self,
        id: DocumentId,
        apply: impl FnOnce(&mut T),
    ) -> StoreResult<T> {
        self.ensure_open()?;
        let mut docs = self.docs.write().await;
        let doc = docs.iter_mut().find(|d| d.id() == id).ok_or_else(|| {
            StoreError::NotFound {
                collection: self.name,
                id: id.to_string(),
            }
        })?;
        apply(doc);
        Ok(doc.clone())
    }

    /// Remove and return the document with the given id
    pub async fn delete_one(&self, id: DocumentId) -> StoreResult<T> {
        self.ensure_open()?;
        let mut docs = self.docs.write().await;
        let pos = docs.iter().position(|d| d.id() == id).ok_or_else(|| {
            StoreError::NotFound {
                collection: self.name,
                id: id.to_string(),
            }
        })?;
        Ok(docs.remove(pos))
    }

    /// Update the first document matching the filter, or insert a new one.
    ///
    /// Returns the resulting document and whether an insert happened.
    pub async fn upsert(
        &self,
        filter: impl Fn(&T) -> bool,
        apply: impl FnOnce(&mut T),
        insert: impl FnOnce() -> T,
    ) -> StoreResult<(T, bool)> {
        self.ensure_open()?;
        let mut docs = self.docs.write().await;
        if let Some(doc) = docs.iter_mut().find(|d| filter(d)) {
            apply(doc);
            return Ok((doc.clone(), false));
        }
        let doc = insert();
        docs.push(doc.clone());
        Ok((doc, true))
    }

    /// Number of documents
    pub async fn count(&self) -> StoreResult<usize> {
        self.ensure_open()?;
        Ok(self.docs.read().await.len())
    }
}
