//! Business repository.
//!
//! Every business carries a v4 UUID alongside its numeric id; external
//! references (events, public links) use the UUID.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySqlPool};
use uuid::Uuid;

use localhub_core::{HubError, Result};

use crate::models::{Paginated, Pagination};

/// Business record from database
#[derive(Debug, Clone, FromRow)]
pub struct Business {
    pub id: i64,
    pub uuid: String,
    pub name: String,
    pub category: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted on create/update
#[derive(Debug, Clone, Default)]
pub struct BusinessInput {
    pub name: String,
    pub category: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
}

pub struct BusinessRepo<'a> {
    pool: &'a MySqlPool,
}

impl<'a> BusinessRepo<'a> {
    pub fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert a business, assigning a fresh v4 UUID.
    pub async fn create(&self, input: &BusinessInput) -> Result<Business> {
        let uuid = Uuid::new_v4().to_string();

        let result = sqlx::query(
            r#"
            INSERT INTO businesses (uuid, name, category, phone, address, website, description)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&uuid)
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&input.website)
        .bind(&input.description)
        .execute(self.pool)
        .await
        .map_err(|e| HubError::from_sqlx("businesses", e))?;

        self.get(result.last_insert_id() as i64).await
    }

    pub async fn get(&self, id: i64) -> Result<Business> {
        sqlx::query_as::<_, Business>(
            r#"
            SELECT id, uuid, name, category, phone, address, website, description, created_at
            FROM businesses WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| HubError::not_found("business", id.to_string()))
    }

    pub async fn get_by_uuid(&self, uuid: &str) -> Result<Business> {
        sqlx::query_as::<_, Business>(
            r#"
            SELECT id, uuid, name, category, phone, address, website, description, created_at
            FROM businesses WHERE uuid = ?
            "#,
        )
        .bind(uuid)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| HubError::not_found("business", uuid.to_owned()))
    }

    /// List businesses alphabetically, optionally filtered by category.
    pub async fn list(&self, page: Pagination, category: Option<&str>) -> Result<Paginated<Business>> {
        let (total,): (i64,) = match category {
            Some(cat) => {
                sqlx::query_as("SELECT COUNT(*) FROM businesses WHERE category = ?")
                    .bind(cat)
                    .fetch_one(self.pool)
                    .await?
            }
            None => {
                sqlx::query_as("SELECT COUNT(*) FROM businesses")
                    .fetch_one(self.pool)
                    .await?
            }
        };

        let base = r#"
            SELECT id, uuid, name, category, phone, address, website, description, created_at
            FROM businesses
        "#;

        let items = match category {
            Some(cat) => {
                sqlx::query_as::<_, Business>(&format!(
                    "{base} WHERE category = ? ORDER BY name LIMIT ? OFFSET ?"
                ))
                .bind(cat)
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Business>(&format!(
                    "{base} ORDER BY name LIMIT ? OFFSET ?"
                ))
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(Paginated {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    pub async fn update(&self, id: i64, input: &BusinessInput) -> Result<Business> {
        self.get(id).await?;

        sqlx::query(
            r#"
            UPDATE businesses
            SET name = ?, category = ?, phone = ?, address = ?, website = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&input.website)
        .bind(&input.description)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| HubError::from_sqlx("businesses", e))?;

        self.get(id).await
    }

    /// Delete a business. Cascades to its events.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM businesses WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(HubError::not_found("business", id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;
    use crate::db::pool::create_pool_from_url;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_assigns_uuid() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_from_url(&url).await.expect("pool");
        migrations::run(&pool).await.expect("migrations");

        let repo = BusinessRepo::new(&pool);
        let business = repo
            .create(&BusinessInput {
                name: "Corner Bakery".into(),
                ..Default::default()
            })
            .await
            .expect("create");

        assert_eq!(business.uuid.len(), 36);
        let by_uuid = repo.get_by_uuid(&business.uuid).await.expect("get by uuid");
        assert_eq!(by_uuid.id, business.id);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn deleting_business_cascades_to_events() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_from_url(&url).await.expect("pool");
        migrations::run(&pool).await.expect("migrations");

        let repo = BusinessRepo::new(&pool);
        let business = repo
            .create(&BusinessInput {
                name: "Pop-up Stand".into(),
                ..Default::default()
            })
            .await
            .expect("create");

        let events = crate::db::repos::EventRepo::new(&pool);
        let event = events
            .create(&crate::db::repos::events::EventInput {
                business_id: Some(business.id),
                title: "Grand Opening".into(),
                description: None,
                location: None,
                starts_at: chrono::Utc::now(),
            })
            .await
            .expect("event");

        repo.delete(business.id).await.expect("delete");
        let err = events.get(event.id).await.unwrap_err();
        assert!(matches!(err, HubError::NotFound { .. }));
    }
}
