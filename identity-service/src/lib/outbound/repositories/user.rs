use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::user::errors::StoreError;
use crate::domain::user::models::Identifier;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserStore;

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn user_from_row(row: &PgRow) -> Result<User, StoreError> {
        let id: Uuid = row.try_get("id").map_err(db_err)?;
        let identifier: String = row.try_get("identifier").map_err(db_err)?;
        let identifier =
            Identifier::new(identifier).map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(User {
            id: UserId(id),
            identifier,
            password_hash: row.try_get("password_hash").map_err(db_err)?,
            provider_key: row.try_get("provider_key").map_err(db_err)?,
            created_at: row.try_get("created_at").map_err(db_err)?,
        })
    }
}

fn db_err(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn find_by_identifier(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, identifier, password_hash, provider_key, created_at
            FROM users
            WHERE identifier = $1
            "#,
        )
        .bind(identifier.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(|r| Self::user_from_row(&r)).transpose()
    }

    async fn find_by_provider_key(&self, key: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, identifier, password_hash, provider_key, created_at
            FROM users
            WHERE provider_key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(|r| Self::user_from_row(&r)).transpose()
    }

    async fn insert_local(
        &self,
        identifier: Identifier,
        password_hash: String,
    ) -> Result<User, StoreError> {
        let id = UserId::new();
        let created_at = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO users (id, identifier, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id.0)
        .bind(identifier.as_str())
        .bind(&password_hash)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("users_identifier_key")
                {
                    return StoreError::DuplicateIdentifier(identifier.as_str().to_string());
                }
            }
            StoreError::Database(e.to_string())
        })?;

        Ok(User {
            id,
            identifier,
            password_hash: Some(password_hash),
            provider_key: None,
            created_at,
        })
    }

    async fn find_or_create_federated(
        &self,
        key: &str,
        identifier: Identifier,
    ) -> Result<User, StoreError> {
        // Single atomic upsert: a racing identical create resolves to the
        // existing row instead of a duplicate subject.
        let row = sqlx::query(
            r#"
            INSERT INTO users (id, identifier, provider_key, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (provider_key) DO UPDATE SET provider_key = EXCLUDED.provider_key
            RETURNING id, identifier, password_hash, provider_key, created_at
            "#,
        )
        .bind(UserId::new().0)
        .bind(identifier.as_str())
        .bind(key)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("users_identifier_key")
                {
                    return StoreError::DuplicateIdentifier(identifier.as_str().to_string());
                }
            }
            StoreError::Database(e.to_string())
        })?;

        Self::user_from_row(&row)
    }
}
