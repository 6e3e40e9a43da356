//! Blog post repository, keyed by slug.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySqlPool};

use localhub_core::{HubError, Result};

use crate::models::{Paginated, Pagination, Slug};

/// Blog post record from database
#[derive(Debug, Clone, FromRow)]
pub struct BlogPost {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub body: Option<String>,
    pub author_id: Option<i64>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

pub struct BlogRepo<'a> {
    pool: &'a MySqlPool,
}

impl<'a> BlogRepo<'a> {
    pub fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert a post. Slug collisions come back as `DuplicateEntry`.
    pub async fn create(
        &self,
        slug: &Slug,
        title: &str,
        body: Option<&str>,
        author_id: Option<i64>,
    ) -> Result<BlogPost> {
        sqlx::query(
            "INSERT INTO blog_posts (slug, title, body, author_id) VALUES (?, ?, ?, ?)",
        )
        .bind(slug.as_str())
        .bind(title)
        .bind(body)
        .bind(author_id)
        .execute(self.pool)
        .await
        .map_err(|e| HubError::from_sqlx("blog_posts", e))?;

        self.get(slug.as_str()).await
    }

    pub async fn get(&self, slug: &str) -> Result<BlogPost> {
        sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT id, slug, title, body, author_id, published, published_at, created_at
            FROM blog_posts WHERE slug = ?
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| HubError::not_found("blog post", slug.to_owned()))
    }

    /// List posts newest-first; `published_only` hides drafts.
    pub async fn list(&self, page: Pagination, published_only: bool) -> Result<Paginated<BlogPost>> {
        let (total,): (i64,) = if published_only {
            sqlx::query_as("SELECT COUNT(*) FROM blog_posts WHERE published = 1")
                .fetch_one(self.pool)
                .await?
        } else {
            sqlx::query_as("SELECT COUNT(*) FROM blog_posts")
                .fetch_one(self.pool)
                .await?
        };

        let base = r#"
            SELECT id, slug, title, body, author_id, published, published_at, created_at
            FROM blog_posts
        "#;

        let items = if published_only {
            sqlx::query_as::<_, BlogPost>(&format!(
                "{base} WHERE published = 1 ORDER BY published_at DESC LIMIT ? OFFSET ?"
            ))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool)
            .await?
        } else {
            sqlx::query_as::<_, BlogPost>(&format!(
                "{base} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
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

    /// Update a post. Publishing stamps `published_at` once; unpublishing
    /// clears it.
    pub async fn update(
        &self,
        slug: &str,
        title: &str,
        body: Option<&str>,
        published: bool,
    ) -> Result<BlogPost> {
        let existing = self.get(slug).await?;

        let published_at = match (existing.published, published) {
            (false, true) => Some(Utc::now()),
            (_, false) => None,
            (true, true) => existing.published_at,
        };

        sqlx::query(
            r#"
            UPDATE blog_posts
            SET title = ?, body = ?, published = ?, published_at = ?
            WHERE slug = ?
            "#,
        )
        .bind(title)
        .bind(body)
        .bind(published)
        .bind(published_at)
        .bind(slug)
        .execute(self.pool)
        .await
        .map_err(|e| HubError::from_sqlx("blog_posts", e))?;

        self.get(slug).await
    }

    pub async fn delete(&self, slug: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE slug = ?")
            .bind(slug)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(HubError::not_found("blog post", slug.to_owned()));
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
    async fn publishing_stamps_published_at() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_from_url(&url).await.expect("pool");
        migrations::run(&pool).await.expect("migrations");

        let repo = BlogRepo::new(&pool);
        let slug = Slug::new("publish-stamp-test").unwrap();
        let _ = repo.delete(slug.as_str()).await;

        let post = repo
            .create(&slug, "Draft", Some("body"), None)
            .await
            .expect("create");
        assert!(!post.published);
        assert!(post.published_at.is_none());

        let post = repo
            .update(slug.as_str(), "Draft", Some("body"), true)
            .await
            .expect("publish");
        assert!(post.published);
        assert!(post.published_at.is_some());
    }
}
