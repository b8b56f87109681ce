//! Postgres-backed user store.

use async_trait::async_trait;
use sqlx::postgres::PgPool;

use crate::error::{StorageError, StorageResult};
use crate::models::{StoredUser, UserRecord};

use super::UserStore;

/// Schema sync, run once at connect. Mirrors the table the service owns:
/// auto-increment id plus the normalized record columns.
const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id              SERIAL PRIMARY KEY,
    name            TEXT NOT NULL,
    age             INTEGER NOT NULL,
    address         JSONB NOT NULL,
    additional_info JSONB NOT NULL,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// Production [`UserStore`] backed by a Postgres connection pool.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Connect and sync the schema.
    pub async fn connect(database_url: &str) -> StorageResult<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        sqlx::query(CREATE_USERS_TABLE).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool (schema assumed present).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn bulk_insert(&self, records: Vec<UserRecord>) -> StorageResult<u64> {
        // One transaction for the whole batch. A failed row rolls back
        // everything inserted before it.
        let mut tx = self.pool.begin().await?;

        let mut inserted = 0u64;
        for record in &records {
            sqlx::query(
                r#"
                INSERT INTO users (name, age, address, additional_info)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(&record.name)
            .bind(record.age)
            .bind(&record.address)
            .bind(&record.additional_info)
            .execute(&mut *tx)
            .await?;
            inserted += 1;
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn fetch_all(&self) -> StorageResult<Vec<StoredUser>> {
        let users: Vec<StoredUser> = sqlx::query_as(
            r#"
            SELECT id, name, age, address, additional_info, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn count(&self) -> StorageResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
