use crate::db::traits::UserRepository;
use crate::types::{AppError, Result, User};
use async_trait::async_trait;
use chrono::Utc;
use libsql::{Builder, Connection, Database, Row};
use tracing::debug;

const USER_COLUMNS: &str =
    "id, name, email, password_digest, remember_digest, admin, created_at, updated_at";

/// libsql-backed user store (local SQLite file or in-memory).
pub struct TursoClient {
    // Kept alive for the lifetime of the connection.
    _db: Database,
    conn: Connection,
}

impl TursoClient {
    /// Opens an ephemeral in-memory database.
    pub async fn new_memory() -> Result<Self> {
        Self::new_local(":memory:").await
    }

    /// Opens (or creates) a SQLite database file.
    pub async fn new_local(path: &str) -> Result<Self> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        // A single connection, so an in-memory database is not lost between calls.
        let conn = db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))?;

        let client = Self { _db: db, conn };
        client.initialize_schema().await?;

        debug!(path, "user store ready");
        Ok(client)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    async fn initialize_schema(&self) -> Result<()> {
        // Users table
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS users (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    email TEXT UNIQUE NOT NULL,
                    password_digest TEXT NOT NULL,
                    remember_digest TEXT NOT NULL,
                    admin INTEGER NOT NULL DEFAULT 0,
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL
                )",
                (),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to create users table: {}", e)))?;

        self.conn
            .execute(
                "CREATE INDEX IF NOT EXISTS index_users_on_remember_digest
                 ON users (remember_digest)",
                (),
            )
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to create remember digest index: {}", e))
            })?;

        Ok(())
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE {} = ?", USER_COLUMNS, column);

        let mut rows = self
            .conn
            .query(&sql, [value])
            .await
            .map_err(|e| AppError::Database(format!("Failed to query user: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(user_from_row(&row)?)),
            None => Ok(None),
        }
    }
}

fn user_from_row(row: &Row) -> Result<User> {
    Ok(User {
        id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
        name: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
        email: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
        password_digest: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
        remember_digest: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
        admin: row
            .get::<i64>(5)
            .map_err(|e| AppError::Database(e.to_string()))?
            != 0,
        created_at: row.get(6).map_err(|e| AppError::Database(e.to_string()))?,
        updated_at: row.get(7).map_err(|e| AppError::Database(e.to_string()))?,
    })
}

#[async_trait]
impl UserRepository for TursoClient {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.find_one("email", email).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        self.find_one("id", id).await
    }

    async fn find_by_remember_digest(&self, digest: &str) -> Result<Option<User>> {
        self.find_one("remember_digest", digest).await
    }

    async fn insert(&self, user: &User) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO users
                 (id, name, email, password_digest, remember_digest, admin, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                (
                    user.id.as_str(),
                    user.name.as_str(),
                    user.email.as_str(),
                    user.password_digest.as_str(),
                    user.remember_digest.as_str(),
                    i64::from(user.admin),
                    user.created_at,
                    user.updated_at,
                ),
            )
            .await
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("UNIQUE constraint failed") {
                    AppError::Conflict(format!("email {} has already been taken", user.email))
                } else {
                    AppError::Database(format!("Failed to create user: {}", msg))
                }
            })?;

        Ok(())
    }

    async fn update_remember_digest(&self, id: &str, digest: &str) -> Result<()> {
        let now = Utc::now().timestamp();

        let changed = self
            .conn
            .execute(
                "UPDATE users SET remember_digest = ?, updated_at = ? WHERE id = ?",
                (digest, now, id),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to update remember digest: {}", e)))?;

        if changed == 0 {
            return Err(AppError::NotFound(format!("user {}", id)));
        }
        Ok(())
    }

    async fn set_admin(&self, id: &str, admin: bool) -> Result<()> {
        let now = Utc::now().timestamp();

        let changed = self
            .conn
            .execute(
                "UPDATE users SET admin = ?, updated_at = ? WHERE id = ?",
                (i64::from(admin), now, id),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to update admin flag: {}", e)))?;

        if changed == 0 {
            return Err(AppError::NotFound(format!("user {}", id)));
        }
        Ok(())
    }
}
