use super::*;

#[test]
fn seed_items_have_unique_ids() {
    let items = seed_items();
    let mut ids: Vec<u32> = items.iter().map(|i| i.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), items.len());
}

#[test]
fn find_returns_seeded_item() {
    let catalog = MockCatalog::seeded(Duration::ZERO, 0.0);
    assert_eq!(catalog.find(3).map(|i| i.name.as_str()), Some("Steel Bottle"));
    assert!(catalog.find(999).is_none());
}

#[test]
fn failure_rate_is_clamped() {
    let catalog = MockCatalog::new(Vec::new(), Duration::ZERO, 7.0);
    assert!(catalog.should_fail());
    let catalog = MockCatalog::new(Vec::new(), Duration::ZERO, -1.0);
    assert!(!catalog.should_fail());
    let catalog = MockCatalog::new(Vec::new(), Duration::ZERO, f64::NAN);
    assert!(!catalog.should_fail());
}

#[tokio::test]
async fn fetch_all_returns_every_item() {
    let catalog = MockCatalog::seeded(Duration::ZERO, 0.0);
    let items = catalog.fetch_all().await.unwrap();
    assert_eq!(items, seed_items());
}

#[tokio::test]
async fn fetch_all_fails_when_rate_is_one() {
    let catalog = MockCatalog::seeded(Duration::ZERO, 1.0);
    let err = catalog.fetch_all().await.unwrap_err();
    assert!(matches!(err, CatalogError::Unavailable(_)));
}

#[tokio::test(start_paused = true)]
async fn fetch_all_waits_for_latency() {
    let catalog = MockCatalog::seeded(Duration::from_millis(300), 0.0);
    let start = tokio::time::Instant::now();
    catalog.fetch_all().await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(300));
}
