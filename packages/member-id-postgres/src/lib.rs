//! Postgres-backed Member ID registry.
//!
//! Issued IDs live in a `member_ids` table with a unique constraint on
//! the canonical value; the constraint, not application code, is the
//! duplicate-detection authority, so concurrent appends of a colliding
//! value resolve inside Postgres.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use member_id::{MemberId, MemberIdRegistry, RegistryEntry, RegistryError};

/// Registry row - SQL persistence layer.
///
/// The surrogate `id` column stays inside the database; API consumers
/// only ever see the canonical value and timestamp.
#[derive(Debug, Clone, sqlx::FromRow)]
struct MemberIdRow {
    value: String,
    created_at: DateTime<Utc>,
}

impl From<MemberIdRow> for RegistryEntry {
    fn from(row: MemberIdRow) -> Self {
        RegistryEntry {
            value: row.value,
            created_at: row.created_at,
        }
    }
}

/// Registry implementation over a `PgPool`.
#[derive(Debug, Clone)]
pub struct PgMemberIdRegistry {
    pool: PgPool,
}

impl PgMemberIdRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run this package's embedded migrations.
    pub async fn migrate(&self) -> Result<(), RegistryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RegistryError::Backend(e.into()))
    }

    /// All issued IDs, newest first.
    pub async fn list(&self) -> Result<Vec<RegistryEntry>, RegistryError> {
        let rows = sqlx::query_as::<_, MemberIdRow>(
            "SELECT value, created_at FROM member_ids ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(into_backend)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl MemberIdRegistry for PgMemberIdRegistry {
    async fn exists(&self, value: &str) -> Result<bool, RegistryError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM member_ids WHERE value = $1)",
        )
        .bind(value)
        .fetch_one(&self.pool)
        .await
        .map_err(into_backend)
    }

    async fn append(&self, id: &MemberId) -> Result<RegistryEntry, RegistryError> {
        let value = id.value();
        let row = sqlx::query_as::<_, MemberIdRow>(
            "INSERT INTO member_ids (value) VALUES ($1) RETURNING value, created_at",
        )
        .bind(&value)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RegistryError::Conflict { value: value.clone() }
            } else {
                into_backend(e)
            }
        })?;
        debug!("Registered member id {}", row.value);
        Ok(row.into())
    }
}

/// Postgres `unique_violation` (duplicate canonical value).
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

fn into_backend(err: sqlx::Error) -> RegistryError {
    RegistryError::Backend(err.into())
}
