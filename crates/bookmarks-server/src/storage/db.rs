//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use bookmarks_types::{Bookmark, NewBookmark};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_url);

        let in_memory = is_in_memory(database_url);
        let mut options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new();

        if in_memory {
            // Every connection to :memory: is a separate database, so keep exactly one alive
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            if let Some(parent) = database_file(database_url).parent() {
                if !parent.as_os_str().is_empty() {
                    tracing::info!("Creating parent directory: {}", parent.display());
                    tokio::fs::create_dir_all(parent).await.with_context(|| {
                        format!("Failed to create database directory: {}", parent.display())
                    })?;
                }
            }
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
            pool_options = pool_options.max_connections(max_connections);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to SQLite database at: {}", database_url))?;

        tracing::info!("SQLite connection established, creating schema...");

        Self::create_schema(&pool)
            .await
            .context("Failed to create database schema")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn create_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bookmarks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                url TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                rating INTEGER NOT NULL CHECK (rating BETWEEN 0 AND 5)
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn list_bookmarks(&self) -> sqlx::Result<Vec<Bookmark>> {
        let rows: Vec<BookmarkRow> = sqlx::query_as(
            r#"
            SELECT id, title, url, description, rating
            FROM bookmarks
            ORDER BY id
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    pub async fn get_bookmark(&self, id: i64) -> sqlx::Result<Option<Bookmark>> {
        let row: Option<BookmarkRow> = sqlx::query_as(
            r#"
            SELECT id, title, url, description, rating
            FROM bookmarks WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(row.map(|r| r.into()))
    }

    pub async fn insert_bookmark(&self, bookmark: &NewBookmark) -> sqlx::Result<Bookmark> {
        let row: BookmarkRow = sqlx::query_as(
            r#"
            INSERT INTO bookmarks (title, url, description, rating)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, title, url, description, rating
            "#,
        )
        .bind(&bookmark.title)
        .bind(&bookmark.url)
        .bind(&bookmark.description)
        .bind(bookmark.rating.get())
        .fetch_one(&*self.pool)
        .await?;

        Ok(row.into())
    }

    /// Returns the number of rows removed (0 or 1).
    pub async fn delete_bookmark(&self, id: i64) -> sqlx::Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM bookmarks WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&*self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// File path part of a `sqlite:` URL, without scheme or query string
fn database_file(database_url: &str) -> &Path {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    Path::new(path.split('?').next().unwrap_or(path))
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct BookmarkRow {
    id: i64,
    title: String,
    url: String,
    description: String,
    rating: i64,
}

impl From<BookmarkRow> for Bookmark {
    fn from(r: BookmarkRow) -> Self {
        Bookmark {
            id: r.id,
            title: r.title,
            url: r.url,
            description: r.description,
            rating: r.rating,
        }
    }
}

#[cfg(test)]
impl Database {
    pub async fn in_memory() -> Result<Self> {
        Self::new("sqlite::memory:", 1).await
    }
}
