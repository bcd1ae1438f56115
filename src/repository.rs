use crate::models::User;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Repository Trait
///
/// The persistence contract used while resolving sessions. Kept behind a trait so the
/// dispatcher and guards can be exercised against in-memory doubles.
///
/// **Send + Sync + async_trait** are required to share the trait object
/// (`Arc<dyn Repository>`) across Axum's task boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    // Returns the account if it still exists. Lookup failures are logged and read as "no user".
    async fn get_user(&self, id: Uuid) -> Option<User>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The `Repository` implementation backed by PostgreSQL.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    /// get_user
    ///
    /// Fetches the account and its verification timestamp. A deleted account makes
    /// any previously issued token useless.
    async fn get_user(&self, id: Uuid) -> Option<User> {
        let query = sqlx::query_as::<_, User>(
            "SELECT id, email, email_verified_at FROM users WHERE id = $1",
        )
        .bind(id);

        match query.fetch_optional(&self.pool).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!("get_user error: {:?}", e);
                None
            }
        }
    }
}
