//! Document store access and record mapping.
//!
//! The store is schema-less: collections of JSON documents queried by a single
//! equality predicate and an optional result limit. Everything that knows how
//! those documents are keyed lives in [`mapping`]; [`Repository`] is the only
//! entry point the rest of the application uses.

mod fields;
pub mod mapping;
#[cfg(test)]
mod memory;
mod repository;
mod seed;
mod sqlite;

pub use repository::*;
pub use seed::*;
pub use sqlite::*;

#[cfg(test)]
pub use memory::MemoryDocumentStore;

use async_trait::async_trait;
use serde_json::Value;

/// A single document as returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Store-assigned document key, unrelated to any domain identifier.
    pub id: String,
    /// Raw document body. Expected to be a JSON object but not guaranteed.
    pub body: Value,
}

impl Document {
    pub fn new(id: impl Into<String>, body: Value) -> Self {
        Self {
            id: id.into(),
            body,
        }
    }
}

/// Equality predicate on one top-level field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

/// A collection query: optional equality filter and optional limit.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: String,
    pub filter: Option<FieldFilter>,
    pub limit: Option<usize>,
}

impl Query {
    /// Select every document of a collection.
    pub fn collection(name: &str) -> Self {
        Self {
            collection: name.to_string(),
            filter: None,
            limit: None,
        }
    }

    /// Restrict to documents whose `field` equals `value`.
    ///
    /// Equality is typed: a numeric operand never matches a string field.
    pub fn where_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filter = Some(FieldFilter {
            field: field.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// The remote document store seam.
///
/// Implementations must return documents in a stable retrieval order.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Run a query against one collection.
    async fn query(&self, query: &Query) -> Result<Vec<Document>, StoreError>;

    /// Insert or replace a document by id.
    async fn upsert(&self, collection: &str, document: &Document) -> Result<(), StoreError>;
}

/// Transport or query failure reported by a [`DocumentStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The query could not be executed
    Query(String),
    /// A stored row could not be decoded
    Decode(String),
    /// The store could not be reached
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Query(msg) => write!(f, "query failed: {}", msg),
            StoreError::Decode(msg) => write!(f, "decode failed: {}", msg),
            StoreError::Unavailable(msg) => write!(f, "store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                StoreError::Decode(err.to_string())
            }
            _ => StoreError::Query(err.to_string()),
        }
    }
}

/// A document that cannot be turned into a record at all.
#[derive(Debug, Clone, PartialEq)]
pub enum MappingError {
    /// The document body is not a key/value object
    NotAnObject { document_id: String },
}

impl std::fmt::Display for MappingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingError::NotAnObject { document_id } => {
                write!(f, "document {} is not a key/value object", document_id)
            }
        }
    }
}

impl std::error::Error for MappingError {}
