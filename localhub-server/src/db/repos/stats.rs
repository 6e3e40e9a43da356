//! Admin dashboard statistics.
//!
//! One SELECT with a scalar COUNT subquery per entity table, so the
//! dashboard costs a single roundtrip.

use serde::Serialize;
use sqlx::{MySqlPool, Row};

use localhub_core::Result;

/// Row counts per entity table
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub users: i64,
    pub admin_users: i64,
    pub businesses: i64,
    pub events: i64,
    pub blog_posts: i64,
    pub directory_members: i64,
    pub directory_partners: i64,
    pub directory_businesses: i64,
    pub templates: i64,
    pub newsletter_subscribers: i64,
}

impl DashboardStats {
    /// Sum across the three directory tables.
    pub fn directory_total(&self) -> i64 {
        self.directory_members + self.directory_partners + self.directory_businesses
    }
}

pub struct DashboardRepo<'a> {
    pool: &'a MySqlPool,
}

impl<'a> DashboardRepo<'a> {
    pub fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn collect(&self) -> Result<DashboardStats> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS users,
                (SELECT COUNT(*) FROM admin_users) AS admin_users,
                (SELECT COUNT(*) FROM businesses) AS businesses,
                (SELECT COUNT(*) FROM events) AS events,
                (SELECT COUNT(*) FROM blog_posts) AS blog_posts,
                (SELECT COUNT(*) FROM directory_members) AS directory_members,
                (SELECT COUNT(*) FROM directory_partners) AS directory_partners,
                (SELECT COUNT(*) FROM directory_businesses) AS directory_businesses,
                (SELECT COUNT(*) FROM templates) AS templates,
                (SELECT COUNT(*) FROM newsletter_subscribers) AS newsletter_subscribers
            "#,
        )
        .fetch_one(self.pool)
        .await?;

        Ok(DashboardStats {
            users: row.get("users"),
            admin_users: row.get("admin_users"),
            businesses: row.get("businesses"),
            events: row.get("events"),
            blog_posts: row.get("blog_posts"),
            directory_members: row.get("directory_members"),
            directory_partners: row.get("directory_partners"),
            directory_businesses: row.get("directory_businesses"),
            templates: row.get("templates"),
            newsletter_subscribers: row.get("newsletter_subscribers"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;
    use crate::db::pool::create_pool_from_url;

    #[test]
    fn directory_total_sums_three_tables() {
        let stats = DashboardStats {
            users: 0,
            admin_users: 0,
            businesses: 0,
            events: 0,
            blog_posts: 0,
            directory_members: 3,
            directory_partners: 5,
            directory_businesses: 7,
            templates: 0,
            newsletter_subscribers: 0,
        };
        assert_eq!(stats.directory_total(), 15);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn collect_returns_non_negative_counts() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_from_url(&url).await.expect("pool");
        migrations::run(&pool).await.expect("migrations");

        let stats = DashboardRepo::new(&pool).collect().await.expect("collect");
        assert!(stats.users >= 0);
        assert!(stats.directory_total() >= 0);
    }
}
