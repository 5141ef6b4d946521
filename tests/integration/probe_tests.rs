//! Integration tests for the prober
//!
//! These tests use wiremock to stand in for the storefront and run full
//! probes through the HTTP fetcher and the on-disk cache.

use asin_probe::cache::{CacheEntry, CacheFingerprint, CacheStore};
use asin_probe::config::{parse_config, Config};
use asin_probe::cooldown::Cooldown;
use asin_probe::target::{CanonicalTarget, Market};
use asin_probe::{HttpFetcher, ProbeError, ProbeOutcome, Prober, Stars};
use chrono::{Duration, Utc};
use tempfile::TempDir;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRODUCT_PAGE: &str = r##"<!DOCTYPE html>
<html>
<head><title>Amazon.com: EASTON BB16S400 S400 BBCOR Adult Baseball Bat</title></head>
<body>
  <span id="productTitle">
      EASTON BB16S400 S400 BBCOR Adult Baseball Bat
  </span>
  <span id="priceblock_ourprice">$49.95 - $59.95</span>
  <span id="priceblock_saleprice">$44.95</span>
  <div id="feature-bullets"><ul>
    <li><span> Two-piece composite design </span></li>
    <li><span>BBCOR certified</span></li>
  </ul></div>
  <div id="altImages"><ul>
    <li><span><span><span><span><span><img src="https://m.media-amazon.com/images/I/41a._SS40_.jpg"></span></span></span></span></span></li>
    <li><span><span><span><span><span><img src="https://fls-na.amazon.com/1/batch/1/OP/grey-pixel.gif"></span></span></span></span></span></li>
  </ul></div>
  <div id="reviewSummary">
    <div>Customer reviews</div>
    <div><span><a href="#reviews"><span>4.3 out of 5 stars</span></a></span></div>
  </div>
  <span id="acrCustomerReviewText">1,024 customer reviews</span>
  <ul><li id="SalesRank">
<b>Amazon Best Sellers Rank:</b> #2,345 in Sports &amp; Outdoors (<a href="/bestsellers">See Top 100</a>)
  </li></ul>
</body>
</html>"##;

const ROBOT_PAGE: &str = r#"<html><head><title>Robot Check</title></head>
<body><form action="/errors/validateCaptcha"><input name="field-keywords"></form></body></html>"#;

fn target_for(server: &MockServer) -> CanonicalTarget {
    CanonicalTarget {
        asin: "B00ZLJ1QGC".to_string(),
        market: Market::Global,
        url: format!("{}/dp/B00ZLJ1QGC", server.uri()),
    }
}

fn create_prober(cache_dir: &TempDir, window_secs: u64) -> Prober<HttpFetcher> {
    let mut config = Config::default();
    config.cache.directory = cache_dir.path().to_string_lossy().into_owned();
    config.cooldown.window_secs = window_secs;
    config.fetcher.timeout_secs = 5;
    config.fetcher.connect_timeout_secs = 5;
    Prober::from_config(&config).expect("Failed to build prober")
}

#[tokio::test]
async fn test_full_probe_extracts_and_caches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dp/B00ZLJ1QGC"))
        .and(header_exists("user-agent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(PRODUCT_PAGE)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache_dir = TempDir::new().unwrap();
    let prober = create_prober(&cache_dir, 300);
    let target = target_for(&mock_server);

    let outcome = prober.probe(&target).await.expect("probe failed");
    let record = outcome.product().expect("expected a product").clone();

    assert_eq!(record.url, target.url);
    assert_eq!(
        record.title.as_deref(),
        Some("EASTON BB16S400 S400 BBCOR Adult Baseball Bat")
    );
    assert_eq!(record.list_price, vec!["$49.95", "$59.95"]);
    assert_eq!(record.current_price.as_deref(), Some("$44.95"));
    assert_eq!(
        record.features,
        vec!["Two-piece composite design", "BBCOR certified"]
    );
    assert_eq!(
        record.images,
        vec!["https://m.media-amazon.com/images/I/41a._SX500_.jpg"]
    );
    assert_eq!(record.stars, Stars::Rated(vec!["4.3".to_string(), "5".to_string()]));
    assert_eq!(record.reviews, 1024);
    assert_eq!(
        record.best_seller_rank.as_deref(),
        Some("#2,345 in Sports Outdoors")
    );
    assert_eq!(record.inventory, None);

    // Served from disk the second time; the mock expects exactly one request
    let again = prober.probe(&target).await.expect("cached probe failed");
    assert_eq!(again, ProbeOutcome::Product(record.clone()));

    // A fresh store over the same directory sees the same record
    let store = CacheStore::new(cache_dir.path());
    let fp = CacheFingerprint::of(&target.url);
    assert_eq!(store.get(&fp), Some(CacheEntry::Product(record)));
}

#[tokio::test]
async fn test_robot_check_cycle() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dp/B00ZLJ1QGC"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ROBOT_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache_dir = TempDir::new().unwrap();
    let prober = create_prober(&cache_dir, 300);
    let target = target_for(&mock_server);
    let fp = CacheFingerprint::of(&target.url);

    // First probe is challenged and starts the clock
    let first = prober.probe(&target).await.unwrap();
    let first_wait = match first {
        ProbeOutcome::MustWait { seconds } => seconds,
        other => panic!("expected MustWait, got {:?}", other),
    };
    assert!((299..=300).contains(&first_wait));

    // Age the marker: the next probe waits less and does not fetch
    let store = prober.store();
    store.delete(&fp).unwrap();
    store
        .put(&fp, &CacheEntry::marker(Utc::now() - Duration::seconds(120)))
        .unwrap();

    let second = prober.probe(&target).await.unwrap();
    match second {
        ProbeOutcome::MustWait { seconds } => assert!(seconds < first_wait && seconds >= 179),
        other => panic!("expected MustWait, got {:?}", other),
    }

    // Past the window: the marker is dropped and the caller is told to retry
    store.delete(&fp).unwrap();
    store
        .put(&fp, &CacheEntry::marker(Utc::now() - Duration::seconds(301)))
        .unwrap();

    let third = prober.probe(&target).await.unwrap();
    assert_eq!(third, ProbeOutcome::CooldownExpired);
    assert!(store.get(&fp).is_none());
}

#[tokio::test]
async fn test_server_error_is_fetch_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dp/B00ZLJ1QGC"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let cache_dir = TempDir::new().unwrap();
    let prober = create_prober(&cache_dir, 300);
    let target = target_for(&mock_server);

    let err = prober.probe(&target).await.unwrap_err();
    match err {
        ProbeError::Fetch { url, message } => {
            assert_eq!(url, target.url);
            assert!(message.contains("503"));
        }
        other => panic!("expected Fetch error, got {:?}", other),
    }

    let fp = CacheFingerprint::of(&target.url);
    assert!(CacheStore::new(cache_dir.path()).get(&fp).is_none());
}

#[tokio::test]
async fn test_cached_record_served_without_network() {
    let cache_dir = TempDir::new().unwrap();
    let prober = create_prober(&cache_dir, 300);

    // Seed the cache for the canonical URL of a bare ASIN
    let url = "https://www.amazon.com/product/dp/B00ZLJ1QGC";
    let record = asin_probe::ProductRecord {
        url: url.to_string(),
        title: Some("Cached Bat".to_string()),
        list_price: vec!["$10.00".to_string()],
        current_price: Some("$10.00".to_string()),
        stars: Stars::NotRated,
        features: vec![],
        images: vec![],
        reviews: 0,
        best_seller_rank: None,
        inventory: None,
        parsed_at: Utc::now(),
    };
    prober
        .store()
        .put(&CacheFingerprint::of(url), &CacheEntry::Product(record.clone()))
        .unwrap();

    let outcome = prober
        .fetch_product("B00ZLJ1QGC", Market::Global)
        .await
        .expect("cache hit should not touch the network");
    assert_eq!(outcome, ProbeOutcome::Product(record));
}

#[tokio::test]
async fn test_invalid_input_never_fetches() {
    let cache_dir = TempDir::new().unwrap();
    let prober = create_prober(&cache_dir, 300);

    let err = prober
        .fetch_product("not-a-valid-code", Market::Japan)
        .await
        .unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(std::fs::read_dir(cache_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_config_file_drives_cooldown() {
    let config = parse_config("[cooldown]\nwindow-secs = 90\n").unwrap();
    let cooldown = Cooldown::from_config(&config.cooldown);
    assert_eq!(cooldown.window(), Duration::seconds(90));
}
