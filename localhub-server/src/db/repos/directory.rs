//! Directory repository: listings plus duplicate management.
//!
//! The three directory tables carry a UNIQUE (name, organization) key.
//! Rows imported before that key existed can still violate it, which is
//! what `find_duplicates`/`remove_duplicates` reconcile. Table names are
//! always `DirectoryKind::table()` constants, never user input.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, MySqlPool, Row};

use localhub_core::{HubError, Result};

use crate::models::{DirectoryKind, Paginated, Pagination};

/// Directory listing row
#[derive(Debug, Clone, FromRow)]
pub struct DirectoryEntry {
    pub id: i64,
    pub name: String,
    pub organization: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted on create
#[derive(Debug, Clone, Default)]
pub struct DirectoryEntryInput {
    pub name: String,
    pub organization: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

/// A (name, organization) pair that appears more than once
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    pub name: String,
    pub organization: String,
    /// Total rows in the group
    pub count: i64,
    /// The row a purge would keep (lowest id)
    pub keep_id: i64,
}

pub struct DirectoryRepo<'a> {
    pool: &'a MySqlPool,
    kind: DirectoryKind,
}

impl<'a> DirectoryRepo<'a> {
    pub fn new(pool: &'a MySqlPool, kind: DirectoryKind) -> Self {
        Self { pool, kind }
    }

    pub fn kind(&self) -> DirectoryKind {
        self.kind
    }

    /// Insert a listing. A (name, organization) collision surfaces as
    /// `DuplicateEntry` for the route layer to turn into a 409.
    pub async fn create(&self, input: &DirectoryEntryInput) -> Result<DirectoryEntry> {
        let table = self.kind.table();

        let result = sqlx::query(&format!(
            r#"
            INSERT INTO {table} (name, organization, email, phone, website)
            VALUES (?, ?, ?, ?, ?)
            "#
        ))
        .bind(&input.name)
        .bind(&input.organization)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.website)
        .execute(self.pool)
        .await
        .map_err(|e| HubError::from_sqlx(table, e))?;

        self.get(result.last_insert_id() as i64).await
    }

    pub async fn get(&self, id: i64) -> Result<DirectoryEntry> {
        let table = self.kind.table();

        sqlx::query_as::<_, DirectoryEntry>(&format!(
            r#"
            SELECT id, name, organization, email, phone, website, created_at
            FROM {table} WHERE id = ?
            "#
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| HubError::not_found("directory entry", id.to_string()))
    }

    /// List entries alphabetically by name, then organization.
    pub async fn list(&self, page: Pagination) -> Result<Paginated<DirectoryEntry>> {
        let table = self.kind.table();

        let total = self.count().await?;

        let items = sqlx::query_as::<_, DirectoryEntry>(&format!(
            r#"
            SELECT id, name, organization, email, phone, website, created_at
            FROM {table}
            ORDER BY name, organization
            LIMIT ? OFFSET ?
            "#
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok(Paginated {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Raw row count. This is the number the reconcile tooling compares
    /// against the API response.
    pub async fn count(&self) -> Result<i64> {
        let table = self.kind.table();
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let table = self.kind.table();
        let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = ?"))
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(HubError::not_found("directory entry", id.to_string()));
        }
        Ok(())
    }

    /// Groups of rows sharing a (name, organization) pair.
    pub async fn find_duplicates(&self) -> Result<Vec<DuplicateGroup>> {
        let table = self.kind.table();

        let rows = sqlx::query(&format!(
            r#"
            SELECT name, organization, COUNT(*) AS dup_count, MIN(id) AS keep_id
            FROM {table}
            GROUP BY name, organization
            HAVING COUNT(*) > 1
            ORDER BY dup_count DESC, name
            "#
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| DuplicateGroup {
                name: r.get("name"),
                organization: r.get("organization"),
                count: r.get("dup_count"),
                keep_id: r.get("keep_id"),
            })
            .collect())
    }

    /// Delete every duplicate row, keeping the lowest id per group.
    ///
    /// Single self-join DELETE inside a transaction: either all groups
    /// collapse or none do. Returns the number of rows removed.
    pub async fn remove_duplicates(&self) -> Result<u64> {
        let table = self.kind.table();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(&format!(
            r#"
            DELETE d FROM {table} d
            JOIN (
                SELECT name, organization, MIN(id) AS keep_id
                FROM {table}
                GROUP BY name, organization
                HAVING COUNT(*) > 1
            ) k ON d.name = k.name
               AND d.organization = k.organization
               AND d.id <> k.keep_id
            "#
        ))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let removed = result.rows_affected();
        if removed > 0 {
            tracing::info!(table, removed, "removed duplicate directory rows");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;
    use crate::db::pool::create_pool_from_url;

    async fn test_pool() -> MySqlPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_from_url(&url).await.expect("pool");
        migrations::run(&pool).await.expect("migrations");
        pool
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_collision_is_duplicate_entry() {
        let pool = test_pool().await;
        let repo = DirectoryRepo::new(&pool, DirectoryKind::Members);

        let input = DirectoryEntryInput {
            name: "Dup Test".into(),
            organization: "Dup Org".into(),
            ..Default::default()
        };
        let first = repo.create(&input).await.expect("first insert");

        let err = repo.create(&input).await.unwrap_err();
        assert!(err.is_duplicate_entry());

        repo.delete(first.id).await.expect("cleanup");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn purge_keeps_lowest_id_per_group() {
        let pool = test_pool().await;
        let kind = DirectoryKind::Businesses;
        let repo = DirectoryRepo::new(&pool, kind);
        let table = kind.table();

        // Recreate the legacy-import state: rows inserted before the
        // unique key existed can collide on (name, organization).
        sqlx::query(&format!("ALTER TABLE {table} DROP INDEX uniq_name_org"))
            .execute(&pool)
            .await
            .expect("drop key");

        for _ in 0..3 {
            sqlx::query(&format!(
                "INSERT INTO {table} (name, organization) VALUES ('Legacy Import', 'Old Org')"
            ))
            .execute(&pool)
            .await
            .expect("insert duplicate");
        }
        let solo = sqlx::query(&format!(
            "INSERT INTO {table} (name, organization) VALUES ('Solo Entry', 'Old Org')"
        ))
        .execute(&pool)
        .await
        .expect("insert solo");
        let solo_id = solo.last_insert_id() as i64;

        let groups = repo.find_duplicates().await.expect("find duplicates");
        let group = groups
            .iter()
            .find(|g| g.name == "Legacy Import")
            .expect("duplicate group reported");
        assert_eq!(group.count, 3);

        let removed = repo.remove_duplicates().await.expect("purge");
        assert_eq!(removed, 2);

        let (survivors, min_id): (i64, i64) = sqlx::query_as(&format!(
            "SELECT COUNT(*), MIN(id) FROM {table} WHERE name = 'Legacy Import'"
        ))
        .fetch_one(&pool)
        .await
        .expect("survivor count");
        assert_eq!(survivors, 1);
        assert_eq!(min_id, group.keep_id);

        // singleton rows are untouched
        repo.get(solo_id).await.expect("solo entry survives");

        sqlx::query(&format!(
            "DELETE FROM {table} WHERE organization = 'Old Org'"
        ))
        .execute(&pool)
        .await
        .expect("cleanup rows");
        sqlx::query(&format!(
            "ALTER TABLE {table} ADD UNIQUE KEY uniq_name_org (name, organization)"
        ))
        .execute(&pool)
        .await
        .expect("restore key");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn count_matches_list_total() {
        let pool = test_pool().await;
        let repo = DirectoryRepo::new(&pool, DirectoryKind::Partners);

        let count = repo.count().await.expect("count");
        let page = repo.list(Pagination::default()).await.expect("list");
        assert_eq!(count, page.total);
    }
}
