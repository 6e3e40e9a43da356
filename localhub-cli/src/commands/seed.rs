//! `seed` - populate demo data.
//!
//! Inserts a demo dataset across every entity table. Reruns are safe:
//! rows that collide with an existing UNIQUE key are skipped and
//! counted, not treated as failures. `--wipe` clears the generated
//! tables first (FK-safe order, children before parents).

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use rand::seq::SliceRandom;
use rand::Rng;

use localhub_core::DbConfig;
use localhub_server::db::repos::{
    BlogRepo, BusinessInput, BusinessRepo, DirectoryEntryInput, DirectoryRepo, EventInput,
    EventRepo, NewsletterRepo, SettingsRepo, TemplateRepo, UserRepo,
};
use localhub_server::db::{migrations, pool};
use localhub_server::models::{DirectoryKind, EmailAddress, Slug};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Marcus", "Priya", "Jordan", "Sam", "Elena", "Tomas", "Ngozi", "Wei", "Lucia",
];
const LAST_NAMES: &[&str] = &[
    "Fernsby", "Holt", "Raman", "Li", "Okafor", "Vargas", "Novak", "Eze", "Chen", "Moretti",
];
const BUSINESS_NAMES: &[&str] = &[
    "Riverside Bakery",
    "Harbor Books",
    "Northside Bike Repair",
    "Cedar Street Coffee",
    "Old Mill Hardware",
    "Lakeview Florist",
    "Summit Print Shop",
    "Corner Grocer",
];
const CATEGORIES: &[&str] = &["food", "retail", "services"];
const EVENT_TITLES: &[&str] = &[
    "Farmers Market",
    "Open Mic Night",
    "Small Business Expo",
    "Harvest Festival",
    "Networking Breakfast",
];

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Number of demo users
    #[arg(long, default_value_t = 5)]
    pub users: u32,

    /// Number of demo businesses
    #[arg(long, default_value_t = 5)]
    pub businesses: u32,

    /// Number of demo events
    #[arg(long, default_value_t = 3)]
    pub events: u32,

    /// Delete existing rows from the seeded tables first
    #[arg(long)]
    pub wipe: bool,
}

struct SeedReport {
    inserted: usize,
    skipped: usize,
}

impl SeedReport {
    fn new() -> Self {
        Self {
            inserted: 0,
            skipped: 0,
        }
    }

    /// Record an insert outcome; duplicate-key collisions count as skips.
    fn record<T>(&mut self, result: localhub_core::Result<T>) -> Result<()> {
        match result {
            Ok(_) => self.inserted += 1,
            Err(e) if e.is_duplicate_entry() => self.skipped += 1,
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}

/// Children before parents so the FK cascades never block a delete.
async fn wipe(pool: &sqlx::MySqlPool) -> Result<()> {
    for table in [
        "password_reset_tokens",
        "events",
        "blog_posts",
        "newsletter_subscribers",
        "directory_members",
        "directory_partners",
        "directory_businesses",
        "templates",
        "settings",
        "businesses",
        "users",
    ] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(pool)
            .await
            .with_context(|| format!("failed to wipe {table}"))?;
    }
    tracing::info!("wiped seeded tables");
    Ok(())
}

pub async fn run(args: SeedArgs) -> Result<()> {
    let config = DbConfig::from_env()?;
    let pool = pool::create_pool(&config)
        .await
        .context("failed to connect to MySQL")?;

    migrations::run(&pool).await?;

    if args.wipe {
        wipe(&pool).await?;
    }

    let mut rng = rand::thread_rng();
    let mut report = SeedReport::new();

    let users = UserRepo::new(&pool);
    let mut author_id = None;
    for i in 0..args.users {
        let first = FIRST_NAMES[i as usize % FIRST_NAMES.len()];
        let last = LAST_NAMES[i as usize % LAST_NAMES.len()];
        let email = EmailAddress::new(&format!(
            "{}.{}@example.com",
            first.to_lowercase(),
            last.to_lowercase()
        ))?;
        let result = users.create(&format!("{first} {last}"), &email).await;
        if let Ok(u) = &result {
            author_id.get_or_insert(u.id);
        }
        report.record(result)?;
    }

    let businesses = BusinessRepo::new(&pool);
    let mut business_ids = Vec::new();
    for i in 0..args.businesses {
        let name = BUSINESS_NAMES[i as usize % BUSINESS_NAMES.len()];
        let result = businesses
            .create(&BusinessInput {
                name: name.to_owned(),
                category: Some(CATEGORIES[i as usize % CATEGORIES.len()].to_owned()),
                phone: Some(format!("555-{:04}", rng.gen_range(100..9999))),
                ..Default::default()
            })
            .await;
        if let Ok(b) = &result {
            business_ids.push(b.id);
        }
        report.record(result)?;
    }

    let events = EventRepo::new(&pool);
    for i in 0..args.events {
        let title = EVENT_TITLES[i as usize % EVENT_TITLES.len()];
        report.record(
            events
                .create(&EventInput {
                    business_id: business_ids.choose(&mut rng).copied(),
                    title: title.to_owned(),
                    description: None,
                    location: Some("Town Square".to_owned()),
                    starts_at: Utc::now() + Duration::days(i64::from(i) * 7 + 3),
                })
                .await,
        )?;
    }

    let blog = BlogRepo::new(&pool);
    for title in ["Welcome to LocalHub", "Meet Our Newest Members"] {
        let slug = Slug::from_title(title)?;
        report.record(blog.create(&slug, title, None, author_id).await)?;
    }

    for kind in DirectoryKind::ALL {
        let directory = DirectoryRepo::new(&pool, kind);
        for (name, org) in [
            ("Jordan Li", "Riverside Bakery"),
            ("Sam Okafor", "Harbor Books"),
        ] {
            report.record(
                directory
                    .create(&DirectoryEntryInput {
                        name: name.to_owned(),
                        organization: org.to_owned(),
                        email: Some(format!(
                            "{}@example.com",
                            name.to_lowercase().replace(' ', ".")
                        )),
                        ..Default::default()
                    })
                    .await,
            )?;
        }
    }

    let templates = TemplateRepo::new(&pool);
    for (name, path) in [
        ("landing-page", "templates/landing.html"),
        ("member-profile", "templates/member.html"),
    ] {
        let slug = Slug::new(name)?;
        report.record(templates.create(&slug, path, None).await)?;
    }

    let settings = SettingsRepo::new(&pool);
    for (name, value) in [("site_title", "LocalHub"), ("contact_email", "hello@example.com")] {
        // upsert never collides, so count it directly
        settings.upsert(name, value).await?;
        report.inserted += 1;
    }

    let newsletter = NewsletterRepo::new(&pool);
    for email in ["ada.fernsby@example.com", "subscriber@example.com"] {
        let email = EmailAddress::new(email)?;
        match newsletter.subscribe(&email).await? {
            true => report.inserted += 1,
            false => report.skipped += 1,
        }
    }

    println!(
        "Seed complete: {} inserted, {} already present.",
        report.inserted, report.skipped
    );
    Ok(())
}
