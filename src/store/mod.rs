//! In-memory document store.
//!
//! Persistence is an external concern for this service; the core only needs
//! CRUD plus two atomicity primitives from its backing store: insert-if-absent
//! under a uniqueness predicate, and single-winner read-modify-write. Both are
//! provided here by taking the collection write lock for the whole operation.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::modules::attendance::model::{AttendanceLogEntry, AttendanceSession};
use crate::modules::class::model::Class;
use crate::modules::faculty::model::Faculty;
use crate::modules::student::model::Student;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated")]
    Duplicate,
}

/// A document held by a [`Collection`].
pub trait Document: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

/// One collection of documents keyed by id.
pub struct Collection<T: Document> {
    docs: RwLock<HashMap<String, T>>,
}

impl<T: Document> Collection<T> {
    fn new() -> Self {
        Self {
            docs: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, doc: T) {
        let mut docs = self.docs.write().await;
        docs.insert(doc.id().to_string(), doc);
    }

    /// Insert-if-absent: `conflicts` is evaluated against every existing
    /// document under the write lock, so a concurrent racer cannot slip a
    /// duplicate in between the check and the insert.
    pub async fn insert_unique<F>(&self, doc: T, conflicts: F) -> Result<(), StoreError>
    where
        F: Fn(&T) -> bool,
    {
        let mut docs = self.docs.write().await;
        if docs.values().any(|existing| conflicts(existing)) {
            return Err(StoreError::Duplicate);
        }
        docs.insert(doc.id().to_string(), doc);
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Option<T> {
        let docs = self.docs.read().await;
        docs.get(id).cloned()
    }

    pub async fn find<F>(&self, pred: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        let docs = self.docs.read().await;
        docs.values().find(|d| pred(d)).cloned()
    }

    pub async fn find_all<F>(&self, pred: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        let docs = self.docs.read().await;
        docs.values().filter(|d| pred(d)).cloned().collect()
    }

    pub async fn exists<F>(&self, pred: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        let docs = self.docs.read().await;
        docs.values().any(|d| pred(d))
    }

    pub async fn count(&self) -> usize {
        self.docs.read().await.len()
    }

    /// Atomically mutate the first document matching `pred`. Returns the
    /// updated document, or `None` if nothing matched. The predicate check
    /// and the mutation happen under one write lock, which gives concurrent
    /// callers racing for the same document exactly one winner.
    pub async fn update_where<P, M>(&self, pred: P, mutate: M) -> Option<T>
    where
        P: Fn(&T) -> bool,
        M: FnOnce(&mut T),
    {
        let mut docs = self.docs.write().await;
        let doc = docs.values_mut().find(|d| pred(d))?;
        mutate(doc);
        Some(doc.clone())
    }

    pub async fn delete(&self, id: &str) -> Option<T> {
        let mut docs = self.docs.write().await;
        docs.remove(id)
    }

    /// Delete every document matching `pred`; returns how many were removed.
    pub async fn delete_where<F>(&self, pred: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        let mut docs = self.docs.write().await;
        let before = docs.len();
        docs.retain(|_, d| !pred(d));
        before - docs.len()
    }
}

/// The full document store handed to the app as shared state.
pub struct Store {
    pub faculty: Collection<Faculty>,
    pub classes: Collection<Class>,
    pub students: Collection<Student>,
    pub sessions: Collection<AttendanceSession>,
    pub logs: Collection<AttendanceLogEntry>,
}

pub type StoreHandle = Arc<Store>;

pub fn init_store() -> StoreHandle {
    Arc::new(Store {
        faculty: Collection::new(),
        classes: Collection::new(),
        students: Collection::new(),
        sessions: Collection::new(),
        logs: Collection::new(),
    })
}
