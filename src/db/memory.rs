//! In-memory document store for tests.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Document, DocumentStore, Query, StoreError};

/// Collections held in insertion order, with per-collection failure injection.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    failing: RwLock<HashSet<String>>,
    queries: RwLock<Vec<Query>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append documents with generated ids.
    pub async fn insert_all(&self, collection: &str, bodies: Vec<Value>) {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        for body in bodies {
            let id = format!("{}-{}", collection, docs.len());
            docs.push(Document::new(id, body));
        }
    }

    /// Make every query against `collection` fail.
    pub async fn fail_collection(&self, collection: &str) {
        self.failing.write().await.insert(collection.to_string());
    }

    /// Every query received so far, in order.
    pub async fn queries(&self) -> Vec<Query> {
        self.queries.read().await.clone()
    }
}

/// Typed equality: numbers compare by value, everything else structurally.
fn values_equal(stored: &Value, operand: &Value) -> bool {
    match (stored, operand) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (a, b) => a == b,
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn query(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        self.queries.write().await.push(query.clone());

        if self.failing.read().await.contains(&query.collection) {
            return Err(StoreError::Unavailable(format!(
                "injected failure for {}",
                query.collection
            )));
        }

        let collections = self.collections.read().await;
        let Some(docs) = collections.get(&query.collection) else {
            return Ok(Vec::new());
        };

        let matching = docs.iter().filter(|doc| match &query.filter {
            None => true,
            Some(filter) => doc
                .body
                .get(&filter.field)
                .map(|stored| values_equal(stored, &filter.value))
                .unwrap_or(false),
        });

        Ok(match query.limit {
            Some(limit) => matching.take(limit).cloned().collect(),
            None => matching.cloned().collect(),
        })
    }

    async fn upsert(&self, collection: &str, document: &Document) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => existing.body = document.body.clone(),
            None => docs.push(document.clone()),
        }
        Ok(())
    }
}
