//! SQLite-backed document store.
//!
//! Every document is one row holding its JSON body. Equality predicates are
//! evaluated with `json_extract`, which keeps SQLite's typed comparison: an
//! integer or real never equals text, while integer and real compare by value.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Row, Sqlite};

use super::{Document, DocumentStore, FieldFilter, Query, StoreError};

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // seq fixes retrieval order; upserts keep the original position
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            collection TEXT NOT NULL,
            doc_id TEXT NOT NULL,
            body TEXT NOT NULL,
            UNIQUE (collection, doc_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection, seq);")
        .execute(pool)
        .await?;

    Ok(())
}

/// Schema-less collection store on top of a SQLite pool.
#[derive(Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the store file at `db_path`.
    pub async fn open(db_path: &Path) -> Result<Self, StoreError> {
        let pool = init_database(db_path).await?;
        Ok(Self::new(pool))
    }

    /// Number of documents in a collection.
    pub async fn count(&self, collection: &str) -> Result<i64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM documents WHERE collection = ?")
            .bind(collection)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn query(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        let mut sql = String::from("SELECT doc_id, body FROM documents WHERE collection = ?");
        if let Some(filter) = &query.filter {
            sql.push_str(" AND json_valid(body) AND ");
            sql.push_str(filter_clause(&filter.value));
        }
        sql.push_str(" ORDER BY seq");
        if query.limit.is_some() {
            sql.push_str(" LIMIT ?");
        }

        let mut statement = sqlx::query(&sql).bind(query.collection.clone());
        if let Some(filter) = &query.filter {
            statement = bind_filter(statement, filter);
        }
        if let Some(limit) = query.limit {
            statement = statement.bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows = statement.fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| -> Result<Document, StoreError> {
                let id: String = row.try_get("doc_id")?;
                let raw: String = row.try_get("body")?;
                let body = serde_json::from_str(&raw).unwrap_or_else(|err| {
                    tracing::warn!(
                        collection = %query.collection,
                        document = %id,
                        "Stored body is not valid JSON: {}",
                        err
                    );
                    Value::Null
                });
                Ok(Document { id, body })
            })
            .collect()
    }

    async fn upsert(&self, collection: &str, document: &Document) -> Result<(), StoreError> {
        let body = serde_json::to_string(&document.body)
            .map_err(|e| StoreError::Decode(format!("unserializable document: {}", e)))?;

        sqlx::query(
            "INSERT INTO documents (collection, doc_id, body) VALUES (?, ?, ?) \
             ON CONFLICT(collection, doc_id) DO UPDATE SET body = excluded.body",
        )
        .bind(collection)
        .bind(&document.id)
        .bind(body)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn filter_clause(value: &Value) -> &'static str {
    match value {
        Value::Null => "json_type(body, ?) = 'null'",
        Value::Array(_) | Value::Object(_) => "json_extract(body, ?) = json(?)",
        _ => "json_extract(body, ?) = ?",
    }
}

fn bind_filter<'q>(statement: SqliteQuery<'q>, filter: &FieldFilter) -> SqliteQuery<'q> {
    let statement = statement.bind(json_path(&filter.field));
    match &filter.value {
        Value::Null => statement,
        Value::Bool(b) => statement.bind(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => statement.bind(i),
            None => statement.bind(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => statement.bind(s.clone()),
        other => statement.bind(other.to_string()),
    }
}

/// Quoted JSON path so keys with spaces or dots address a single field.
fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field.replace('"', "\\\""))
}
