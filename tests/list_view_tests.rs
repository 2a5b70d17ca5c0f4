//! Integration tests for list views driven by a backend

use chrono::{Duration, Utc};
use newsdesk::prelude::*;
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tokio::sync::Mutex;

fn seeded_source(total: usize, breaking_every: usize) -> InMemoryNewsSource {
    let now = Utc::now();
    InMemoryNewsSource::with_articles((0..total).map(|i| {
        let mut article = Article::new(format!("Story {}", i), now - Duration::minutes(i as i64));
        article.views = (i as u64 * 7) % 50;
        article.is_breaking = i % breaking_every == 0;
        article
    }))
}

#[tokio::test]
async fn test_refresh_loads_feed_for_view_kind() {
    let source = seeded_source(30, 3);

    let mut breaking: ListView<Article> = ListView::for_kind(ViewKind::BreakingNews);
    assert!(breaking.refresh(&source).await.unwrap());
    assert_eq!(breaking.items().len(), 10);
    assert_eq!(breaking.state(), &LoadState::Ready);

    let mut all: ListView<Article> = ListView::for_kind(ViewKind::AllNews);
    all.refresh(&source).await.unwrap();
    assert_eq!(all.items().len(), 30);
    // 12 per page on the all-news screen
    assert_eq!(all.total_pages(), 3);
}

#[tokio::test]
async fn test_latest_first_by_default() {
    let source = seeded_source(5, 1);
    let mut view: ListView<Article> = ListView::for_kind(ViewKind::BreakingNews);
    view.refresh(&source).await.unwrap();

    let page = view.current_page();
    let titles: Vec<&str> = page.items.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Story 0", "Story 1", "Story 2", "Story 3", "Story 4"]);
}

#[tokio::test]
async fn test_filter_narrowing_returns_to_first_page() {
    let source = seeded_source(40, 1);
    let mut view: ListView<Article> = ListView::for_kind(ViewKind::BreakingNews);
    view.refresh(&source).await.unwrap();

    assert_eq!(view.set_page(4), 4);
    view.set_search("Story 3");

    let page = view.current_page();
    assert_eq!(page.pagination.page, 1);
    // "Story 3" and "Story 30".."Story 39"
    assert_eq!(page.total_count(), 11);
    assert_eq!(page.items.len(), 10);
}

#[tokio::test]
async fn test_company_view_refresh() {
    let source = InMemoryNewsSource::new();
    for name in ["Zeta Robotics", "Acme AI", "Mistral Works"] {
        source
            .create(CompanyDraft::new(name, CompanyStatus::Active))
            .await
            .unwrap();
    }

    let mut view: ListView<Company> = ListView::for_kind(ViewKind::Companies);
    view.refresh(&source).await.unwrap();

    let page = view.current_page();
    let names: Vec<&str> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Acme AI", "Mistral Works", "Zeta Robotics"]);
}

#[tokio::test]
async fn test_out_of_order_responses_keep_latest() {
    let mut view: ListView<Article> = ListView::for_kind(ViewKind::AllNews);
    let tracker = view.tracker();

    let first = view.begin_fetch();
    let second = view.begin_fetch();
    assert!(tracker.is_current(second));
    assert!(!tracker.is_current(first));

    let fresh = vec![Article::new("fresh", Utc::now())];
    let stale = vec![Article::new("stale", Utc::now())];

    assert!(view.complete_fetch(second, Ok(fresh)).unwrap());
    assert!(!view.complete_fetch(first, Ok(stale)).unwrap());
    assert_eq!(view.items()[0].title, "fresh");
}

#[tokio::test(start_paused = true)]
async fn test_poller_refreshes_breaking_view() {
    let source = Arc::new(seeded_source(3, 1));
    let view: Arc<Mutex<ListView<Article>>> =
        Arc::new(Mutex::new(ListView::for_kind(ViewKind::BreakingNews)));

    let interval = view
        .lock()
        .await
        .preset()
        .poll_interval
        .unwrap_or(BREAKING_NEWS_POLL_INTERVAL);
    assert_eq!(interval, BREAKING_NEWS_POLL_INTERVAL);

    let poller = {
        let source = source.clone();
        let view = view.clone();
        Poller::spawn(interval, move || {
            let source = source.clone();
            let view = view.clone();
            Box::pin(async move {
                let mut view = view.lock().await;
                let _ = view.refresh(source.as_ref()).await;
            })
        })
    };

    tokio::time::sleep(StdDuration::from_secs(91)).await;
    tokio::task::yield_now().await;
    assert_eq!(view.lock().await.items().len(), 3);

    let mut late = Article::new("Late breaking", Utc::now());
    late.is_breaking = true;
    source.insert_article(late);

    poller.pause();
    tokio::time::sleep(StdDuration::from_secs(200)).await;
    assert_eq!(view.lock().await.items().len(), 3);

    poller.resume();
    tokio::task::yield_now().await;
    tokio::time::sleep(StdDuration::from_secs(91)).await;
    tokio::task::yield_now().await;
    assert_eq!(view.lock().await.items().len(), 4);

    poller.shutdown().await;
}
