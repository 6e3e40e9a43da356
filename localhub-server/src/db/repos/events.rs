//! Event repository.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySqlPool};
use uuid::Uuid;

use localhub_core::{HubError, Result};

use crate::models::{Paginated, Pagination};

/// Event record from database
#[derive(Debug, Clone, FromRow)]
pub struct Event {
    pub id: i64,
    pub uuid: String,
    pub business_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted on create/update
#[derive(Debug, Clone)]
pub struct EventInput {
    pub business_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
}

pub struct EventRepo<'a> {
    pool: &'a MySqlPool,
}

impl<'a> EventRepo<'a> {
    pub fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &EventInput) -> Result<Event> {
        let uuid = Uuid::new_v4().to_string();

        let result = sqlx::query(
            r#"
            INSERT INTO events (uuid, business_id, title, description, location, starts_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&uuid)
        .bind(input.business_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.location)
        .bind(input.starts_at)
        .execute(self.pool)
        .await
        .map_err(|e| HubError::from_sqlx("events", e))?;

        self.get(result.last_insert_id() as i64).await
    }

    pub async fn get(&self, id: i64) -> Result<Event> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, uuid, business_id, title, description, location, starts_at, created_at
            FROM events WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| HubError::not_found("event", id.to_string()))
    }

    /// List events by start time. `upcoming` restricts to events that
    /// haven't started yet.
    pub async fn list(&self, page: Pagination, upcoming: bool) -> Result<Paginated<Event>> {
        let (total,): (i64,) = if upcoming {
            sqlx::query_as("SELECT COUNT(*) FROM events WHERE starts_at >= NOW()")
                .fetch_one(self.pool)
                .await?
        } else {
            sqlx::query_as("SELECT COUNT(*) FROM events")
                .fetch_one(self.pool)
                .await?
        };

        let base = r#"
            SELECT id, uuid, business_id, title, description, location, starts_at, created_at
            FROM events
        "#;

        let items = if upcoming {
            sqlx::query_as::<_, Event>(&format!(
                "{base} WHERE starts_at >= NOW() ORDER BY starts_at LIMIT ? OFFSET ?"
            ))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Event>(&format!(
                "{base} ORDER BY starts_at DESC LIMIT ? OFFSET ?"
            ))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool)
            .await?
        };

        Ok(Paginated {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    pub async fn update(&self, id: i64, input: &EventInput) -> Result<Event> {
        self.get(id).await?;

        sqlx::query(
            r#"
            UPDATE events
            SET business_id = ?, title = ?, description = ?, location = ?, starts_at = ?
            WHERE id = ?
            "#,
        )
        .bind(input.business_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.location)
        .bind(input.starts_at)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| HubError::from_sqlx("events", e))?;

        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(HubError::not_found("event", id.to_string()));
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
    async fn upcoming_filter_excludes_past_events() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_from_url(&url).await.expect("pool");
        migrations::run(&pool).await.expect("migrations");

        let repo = EventRepo::new(&pool);
        repo.create(&EventInput {
            business_id: None,
            title: "Last Year's Fair".into(),
            description: None,
            location: None,
            starts_at: Utc::now() - chrono::Duration::days(365),
        })
        .await
        .expect("past event");

        let page = repo.list(Pagination::default(), true).await.expect("list");
        assert!(page
            .items
            .iter()
            .all(|e| e.starts_at >= Utc::now() - chrono::Duration::minutes(1)));
    }
}
