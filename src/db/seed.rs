//! Fixture import into a document store.
//!
//! A seed file is a JSON object keyed by collection name. Each collection is
//! either an array of documents or an object mapping document ids to
//! documents. Array entries get a name-based UUID derived from the collection
//! and their position. Import is an upsert, so re-running the same seed file
//! is idempotent. Documents are written in file order.

use std::path::Path;

use serde_json::Value;
use uuid::Uuid;

use super::{Document, DocumentStore};
use crate::errors::AppError;

/// Read and import a seed file. Returns the number of documents written.
pub async fn import_seed_file(store: &dyn DocumentStore, path: &Path) -> Result<usize, AppError> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::Internal(format!("Failed to read seed file {}: {}", path.display(), e))
    })?;
    let seed: Value = serde_json::from_str(&raw)?;
    import_seed(store, &seed).await
}

/// Import an already parsed seed document.
pub async fn import_seed(store: &dyn DocumentStore, seed: &Value) -> Result<usize, AppError> {
    let collections = seed.as_object().ok_or_else(|| {
        AppError::BadRequest("Seed must be an object keyed by collection name".to_string())
    })?;

    let mut written = 0;
    for (collection, entries) in collections {
        let documents = seed_documents(collection, entries)?;
        for document in &documents {
            store.upsert(collection, document).await?;
        }
        tracing::info!(collection = %collection, count = documents.len(), "Seeded collection");
        written += documents.len();
    }

    Ok(written)
}

fn seed_documents(collection: &str, entries: &Value) -> Result<Vec<Document>, AppError> {
    match entries {
        Value::Array(bodies) => Ok(bodies
            .iter()
            .enumerate()
            .map(|(index, body)| Document::new(array_entry_id(collection, index), body.clone()))
            .collect()),
        Value::Object(by_id) => Ok(by_id
            .iter()
            .map(|(id, body)| Document::new(id.clone(), body.clone()))
            .collect()),
        _ => Err(AppError::BadRequest(format!(
            "Seed collection {} must be an array or an object",
            collection
        ))),
    }
}

/// Stable id for the `index`-th entry of an array-form collection.
fn array_entry_id(collection: &str, index: usize) -> String {
    let name = format!("{}/{}", collection, index);
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}
