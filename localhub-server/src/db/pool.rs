//! Database connection pool management.
//!
//! Uses sqlx MySqlPool with an explicit connection limit.

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

use localhub_core::{DbConfig, HubError};

/// Fixed pool size. The deployment has always run with 10 connections;
/// the database side is provisioned around it.
pub const POOL_MAX_CONNECTIONS: u32 = 10;

/// Create a MySQL connection pool from configuration.
///
/// # Errors
///
/// Returns `HubError::AccessDenied` for credential failures
/// (ER_ACCESS_DENIED_ERROR), `HubError::Database` otherwise.
pub async fn create_pool(config: &DbConfig) -> Result<MySqlPool, HubError> {
    create_pool_from_url(&config.connection_url()).await
}

/// Create a pool from a raw `mysql://` URL (tests, reconcile tooling).
pub async fn create_pool_from_url(database_url: &str) -> Result<MySqlPool, HubError> {
    MySqlPoolOptions::new()
        .max_connections(POOL_MAX_CONNECTIONS)
        .connect(database_url)
        .await
        .map_err(|e| HubError::from_sqlx("(connect)", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a real database.
    // Run with: DATABASE_URL=mysql://... cargo test -p localhub-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_from_url(&url).await.expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_pool_access() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_from_url(&url).await.expect("pool creation failed");

        let handles: Vec<_> = (0..10)
            .map(|i: i32| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let result: (i32,) = sqlx::query_as("SELECT ?")
                        .bind(i)
                        .fetch_one(&pool)
                        .await
                        .expect("concurrent query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i32);
        }
    }
}
