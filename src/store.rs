use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Config;
use crate::models::{Item, ItemPatch, NewItem};

const CREATE_ITEMS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT,
        price REAL NOT NULL
    )
"#;

/// Shareable SQLite-backed item store for use across async handlers
///
/// Every mutation is a single SQL statement keyed by id, so a lookup and its
/// write commit together and cannot interleave with a concurrent delete.
#[derive(Clone)]
pub struct ItemStore {
    pool: SqlitePool,
}

impl ItemStore {
    /// Open the store described by the configuration and ensure the schema exists
    pub async fn from_config(config: &Config) -> Result<Self> {
        Self::connect(&config.database_url, config.database_max_connections).await
    }

    /// Open a private in-memory store
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:", 1).await
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        // Each in-memory connection is its own database, so keep exactly one alive.
        let in_memory = database_url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .context("Failed to open SQLite database")?;

        let store = Self { pool };
        store.ensure_schema().await?;

        tracing::info!("Item store ready at: {}", database_url);
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_ITEMS_TABLE)
            .execute(&self.pool)
            .await
            .context("Failed to create items table")?;
        Ok(())
    }

    /// Insert a new item and return its freshly assigned id
    ///
    /// Ids come from `AUTOINCREMENT` and are never handed out twice, even
    /// after the highest item is deleted.
    pub async fn insert(&self, item: &NewItem) -> Result<i64> {
        let result = sqlx::query("INSERT INTO items (name, description, price) VALUES (?, ?, ?)")
            .bind(&item.name)
            .bind(item.description.as_deref())
            .bind(item.price)
            .execute(&self.pool)
            .await
            .context("Failed to insert item")?;

        let id = result.last_insert_rowid();
        tracing::debug!("Inserted item with id: {}", id);
        Ok(id)
    }

    /// Read an item by id
    ///
    /// # Returns
    /// * `Ok(Some(item))` - Item found
    /// * `Ok(None)` - No row with that id
    /// * `Err(_)` - SQLite operation failed
    pub async fn get(&self, id: i64) -> Result<Option<Item>> {
        let item: Option<Item> =
            sqlx::query_as("SELECT id, name, description, price FROM items WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .context("Failed to read item")?;

        tracing::debug!("Read item with id: {} (found: {})", id, item.is_some());
        Ok(item)
    }

    /// List every item ordered by id
    pub async fn list(&self) -> Result<Vec<Item>> {
        let items: Vec<Item> =
            sqlx::query_as("SELECT id, name, description, price FROM items ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await
                .context("Failed to list items")?;

        tracing::debug!("Listed {} items", items.len());
        Ok(items)
    }

    /// Overwrite all mutable fields of an item. Returns `false` if the id does not exist.
    pub async fn replace(&self, id: i64, item: &NewItem) -> Result<bool> {
        let result =
            sqlx::query("UPDATE items SET name = ?, description = ?, price = ? WHERE id = ?")
                .bind(&item.name)
                .bind(item.description.as_deref())
                .bind(item.price)
                .bind(id)
                .execute(&self.pool)
                .await
                .context("Failed to replace item")?;

        let found = result.rows_affected() > 0;
        tracing::debug!("Replaced item with id: {} (found: {})", id, found);
        Ok(found)
    }

    /// Overwrite only the fields present in the patch. Returns `false` if the id does not exist.
    ///
    /// An empty patch still reports whether the item exists.
    pub async fn amend(&self, id: i64, patch: &ItemPatch) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE items SET
                name = COALESCE(?, name),
                description = CASE WHEN ? THEN ? ELSE description END,
                price = COALESCE(?, price)
            WHERE id = ?
            "#,
        )
        .bind(patch.name.as_deref())
        .bind(patch.description.is_some())
        .bind(patch.description.clone().flatten())
        .bind(patch.price)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to amend item")?;

        let found = result.rows_affected() > 0;
        tracing::debug!("Amended item with id: {} (found: {})", id, found);
        Ok(found)
    }

    /// Delete an item, returning its name as it was at deletion time
    pub async fn delete(&self, id: i64) -> Result<Option<String>> {
        let name: Option<String> =
            sqlx::query_scalar("DELETE FROM items WHERE id = ? RETURNING name")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .context("Failed to delete item")?;

        tracing::debug!("Deleted item with id: {} (found: {})", id, name.is_some());
        Ok(name)
    }

    /// Verify the database answers a trivial query
    pub async fn health_check(&self) -> Result<()> {
        let one: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("Failed to execute health check query")?;

        if one == 1 {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned {}", one))
        }
    }

    /// Close the pool, waiting for checked-out connections to be returned
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Item store closed");
    }
}
