//! Portal walkthrough against the in-memory backend
//!
//! This demo shows:
//! - Seeding a backend and loading the breaking-news view
//! - Searching, faceting and paging with the list pipeline
//! - Optimistic likes through the engagement cache
//! - Dashboard figures and chart geometry
//! - A short-lived poller refreshing the live feed
//!
//! Run with `RUST_LOG=newsdesk=debug cargo run --example portal` to see the
//! pipeline and poller logs.

use anyhow::Result;
use chrono::Duration as ChronoDuration;
use newsdesk::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const TOPICS: [(&str, &str); 6] = [
    ("GPT-5 tops reasoning benchmarks", "research"),
    ("EU finalizes AI Act guidance", "policy"),
    ("Open-weight model beats GPT-4 on code", "research"),
    ("Chipmaker doubles GPU output", "industry"),
    ("Robotics startup raises Series B", "industry"),
    ("GPT pricing cut by half", "business"),
];

fn seed() -> InMemoryNewsSource {
    let now = Utc::now();
    let articles = (0..24).map(|i| {
        let (title, category) = TOPICS[i % TOPICS.len()];
        let mut article = Article::new(
            format!("{} #{}", title, i / TOPICS.len() + 1),
            now - ChronoDuration::hours(i as i64 * 5),
        );
        article.category = Some(category.to_string());
        article.views = (i as u64 * 7_919) % 250_000;
        article.likes = (i as u64 * 37) % 900;
        article.ai_generated = i % 4 == 0;
        article.is_breaking = i % 2 == 0;
        article.is_trending = article.views > 100_000;
        article.trending_score = Some(article.views as f64 / 250_000.0);
        article
    });
    InMemoryNewsSource::with_articles(articles)
}

fn print_page(label: &str, page: &ListPage<&Article>) {
    println!(
        "{} (page {}/{}, {} results)",
        label,
        page.pagination.page,
        page.total_pages(),
        page.total_count()
    );
    let now = Utc::now();
    for article in &page.items {
        println!(
            "   - {:<45} {:>6} views  {}",
            article.title,
            compact_number(article.views),
            time_ago(article.published_at, now)
        );
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("📰 Newsdesk Portal Demo");
    println!("=======================\n");

    let config = ConsoleConfig::default_config();
    let source = seed();

    // === Breaking news ===
    let mut breaking: ListView<Article> = ListView::new(config.preset(ViewKind::BreakingNews));
    breaking.refresh(&source).await?;
    print_page("🔴 Breaking", &breaking.current_page());

    breaking.set_search("gpt");
    breaking.set_sort(Some("views"));
    print_page("🔎 Breaking, \"gpt\" by views", &breaking.current_page());

    // === All news with facets ===
    let mut all: ListView<Article> = ListView::new(config.preset(ViewKind::AllNews));
    all.refresh(&source).await?;
    all.set_facet("category", "research");
    all.set_facet("ai_generated", true);
    print_page("🧪 AI-generated research", &all.current_page());

    all.clear_facets();
    all.next_page();
    print_page("📄 All news", &all.current_page());

    // === Engagement ===
    let cache = Mutex::new(EngagementCache::new());
    if let Some(article) = all.current_page().items.first().copied() {
        let counts = toggle_reaction(&cache, &source, article, Reaction::Like).await?;
        println!("👍 Liked \"{}\": {} likes\n", article.title, compact_number(counts.likes));
    }

    // === Dashboard ===
    let stats = source.dashboard().await?;
    println!("📊 Dashboard");
    println!("   articles: {}", stats.total_articles);
    println!("   views:    {}", compact_number(stats.total_views));
    let counter: Vec<String> = CounterAnimation::new(stats.total_articles, 4)
        .frames()
        .map(|n| n.to_string())
        .collect();
    println!("   counter:  {}", counter.join(" → "));
    println!("   sparkline: {}", stats.views_sparkline(120.0, 32.0));
    for segment in stats.category_donut(40.0) {
        println!(
            "   {:<10} dasharray={} offset={:.2}",
            segment.label, segment.dash_array, segment.dash_offset
        );
    }
    println!();

    // === Polling ===
    let view = Arc::new(tokio::sync::Mutex::new(breaking));
    let shared = Arc::new(source);
    let poller = {
        let view = view.clone();
        let source = shared.clone();
        Poller::spawn(Duration::from_millis(200), move || {
            let view = view.clone();
            let source = source.clone();
            Box::pin(async move {
                let mut view = view.lock().await;
                if let Err(err) = view.refresh(source.as_ref()).await {
                    tracing::warn!(error = %err, "poll refresh failed");
                }
            })
        })
    };

    let mut late = Article::new("Breaking: new frontier model announced", Utc::now());
    late.is_breaking = true;
    late.views = 1_250_000;
    shared.insert_article(late);

    tokio::time::sleep(Duration::from_millis(450)).await;
    poller.shutdown().await;

    let view = view.lock().await;
    print_page("🔁 Breaking after polling", &view.current_page());

    Ok(())
}
