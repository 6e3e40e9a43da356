//! Schema migrations for the LocalHub tables.
//!
//! One ordered, rerunnable pass: `CREATE TABLE IF NOT EXISTS` for every
//! entity table, then secondary indexes, then column backfills that
//! tolerate ER_DUP_FIELDNAME. Uniqueness (emails, uuids, name+organization
//! pairs) is enforced here, at the database level.

use sqlx::MySqlPool;

use localhub_core::{HubError, Result};

/// Every entity table, in FK-safe creation order. Also the order the
/// diagnose subcommand reports counts in.
pub const TABLES: [&str; 12] = [
    "users",
    "admin_users",
    "businesses",
    "events",
    "blog_posts",
    "directory_members",
    "directory_partners",
    "directory_businesses",
    "templates",
    "newsletter_subscribers",
    "password_reset_tokens",
    "settings",
];

/// Run all migrations.
pub async fn run(pool: &MySqlPool) -> Result<()> {
    tracing::info!("Running schema migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INT AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            password_hash VARCHAR(255),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS admin_users (
            id INT AUTO_INCREMENT PRIMARY KEY,
            email VARCHAR(255) NOT NULL UNIQUE,
            password_hash VARCHAR(255),
            display_name VARCHAR(255),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS businesses (
            id INT AUTO_INCREMENT PRIMARY KEY,
            uuid CHAR(36) NOT NULL UNIQUE,
            name VARCHAR(255) NOT NULL,
            category VARCHAR(128),
            phone VARCHAR(32),
            address VARCHAR(512),
            website VARCHAR(512),
            description TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id INT AUTO_INCREMENT PRIMARY KEY,
            uuid CHAR(36) NOT NULL UNIQUE,
            business_id INT,
            title VARCHAR(255) NOT NULL,
            description TEXT,
            location VARCHAR(512),
            starts_at DATETIME NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (business_id) REFERENCES businesses(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS blog_posts (
            id INT AUTO_INCREMENT PRIMARY KEY,
            slug VARCHAR(128) NOT NULL UNIQUE,
            title VARCHAR(255) NOT NULL,
            body LONGTEXT,
            author_id INT,
            published TINYINT(1) NOT NULL DEFAULT 0,
            published_at DATETIME,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (author_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Three directory tables share one shape; the (name, organization)
    // unique key is what the dedupe tooling reconciles against.
    for table in [
        "directory_members",
        "directory_partners",
        "directory_businesses",
    ] {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id INT AUTO_INCREMENT PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                organization VARCHAR(255) NOT NULL DEFAULT '',
                email VARCHAR(255),
                phone VARCHAR(32),
                website VARCHAR(512),
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                UNIQUE KEY uniq_name_org (name, organization)
            )
            "#
        ))
        .execute(pool)
        .await?;
    }

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS templates (
            id INT AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(128) NOT NULL UNIQUE,
            path VARCHAR(512) NOT NULL,
            description VARCHAR(512),
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS newsletter_subscribers (
            id INT AUTO_INCREMENT PRIMARY KEY,
            email VARCHAR(255) NOT NULL UNIQUE,
            subscribed_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS password_reset_tokens (
            id INT AUTO_INCREMENT PRIMARY KEY,
            user_id INT NOT NULL,
            token CHAR(40) NOT NULL UNIQUE,
            expires_at DATETIME NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            id INT AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(128) NOT NULL UNIQUE,
            value TEXT,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;
    backfill_columns(pool).await?;

    tracing::info!("Schema migrations complete");
    Ok(())
}

/// Secondary indexes. MySQL has no CREATE INDEX IF NOT EXISTS, so a
/// duplicate-key error from a rerun is swallowed.
async fn create_indexes(pool: &MySqlPool) -> Result<()> {
    for ddl in [
        "CREATE INDEX idx_events_starts_at ON events(starts_at)",
        "CREATE INDEX idx_events_business ON events(business_id)",
        "CREATE INDEX idx_blog_published ON blog_posts(published, published_at)",
        "CREATE INDEX idx_reset_tokens_expiry ON password_reset_tokens(expires_at)",
    ] {
        if let Err(e) = sqlx::query(ddl).execute(pool).await {
            if !index_already_exists(&e) {
                return Err(HubError::Database(e));
            }
        }
    }
    Ok(())
}

/// ER_DUP_KEYNAME (1061): index with this name already exists.
fn index_already_exists(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db) = err {
        if let Some(mysql) = db.try_downcast_ref::<sqlx::mysql::MySqlDatabaseError>() {
            return mysql.number() == 1061;
        }
    }
    false
}

/// Columns added after the original schema shipped. Each ALTER runs on
/// every migration pass; ER_DUP_FIELDNAME means it already landed.
async fn backfill_columns(pool: &MySqlPool) -> Result<()> {
    for (table, ddl) in [
        (
            "directory_members",
            "ALTER TABLE directory_members ADD COLUMN website VARCHAR(512)",
        ),
        (
            "businesses",
            "ALTER TABLE businesses ADD COLUMN address VARCHAR(512)",
        ),
    ] {
        match sqlx::query(ddl).execute(pool).await {
            Ok(_) => tracing::info!(table, "added column"),
            Err(e) => match HubError::from_sqlx("(migration)", e) {
                HubError::DuplicateColumn { .. } => {
                    tracing::debug!(table, "column already present");
                }
                other => return Err(other),
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_pool_from_url;

    #[test]
    fn table_list_covers_all_entities() {
        assert_eq!(TABLES.len(), 12);
        assert!(TABLES.contains(&"directory_members"));
        assert!(TABLES.contains(&"settings"));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrations_are_rerunnable() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_from_url(&url).await.expect("pool");

        run(&pool).await.expect("first pass");
        run(&pool).await.expect("second pass should be a no-op");
    }
}
