//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, writing into temporary directories.

use site_harvest::config::{Config, CrawlerConfig, OutputConfig};
use site_harvest::crawler::{spawn_crawl, Coordinator, CrawlOutcome, FetchError};
use site_harvest::output::FileResultSink;
use site_harvest::progress::{ProgressEvent, ProgressSink, Severity};
use site_harvest::state::CrawlState;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing under `root`
fn create_test_config(root: &Path, max_workers: usize, timeout_secs: u64) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_workers,
            request_timeout_secs: timeout_secs,
            user_agent: "TestBot/1.0".to_string(),
        },
        output: OutputConfig {
            root_dir: root.to_string_lossy().into_owned(),
            csv: true,
            json: true,
        },
    }
}

/// Progress sink that keeps every event for inspection
#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    fn count(&self, severity: Severity) -> usize {
        self.events()
            .iter()
            .filter(|event| event.severity == severity)
            .count()
    }

    fn completions(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| event.message.starts_with("Web Scraping Complete"))
            .count()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn coordinator(config: Config) -> (Coordinator, Arc<RecordingSink>) {
    let progress = Arc::new(RecordingSink::default());
    let results = Arc::new(FileResultSink::new(&config.output));
    let coordinator = Coordinator::new(config, progress.clone(), results).unwrap();
    (coordinator, progress)
}

fn html_page(title: &str, head: &str, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!(
            "<html><head><title>{}</title>{}</head><body>{}</body></html>",
            title, head, body
        ))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

fn read_csv(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|record| record.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[tokio::test]
async fn test_full_crawl_with_images_and_exports() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let output = tempfile::tempdir().unwrap();

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            "",
            r#"<a href="/page1">One</a>
               <a href="page2">Two</a>
               <img src="/logo.png">
               <img src="/logo.png">
               <img src="/icon.svg">
               <img data-src="/old.bmp">"#,
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/page1",
        html_page(
            "Page One",
            r#"<meta name="description" content="First page">
               <meta property="og:title" content="OG One">"#,
            "",
        ),
    )
    .await;
    mount_page(&mock_server, "/page2", html_page("Page Two", "", "")).await;

    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, b'P', b'N', b'G']))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/icon.svg"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/old.bmp"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (mut coordinator, progress) = coordinator(create_test_config(output.path(), 10, 5));
    let outcome = coordinator.run(&format!("{}/", base_url)).await.unwrap();

    assert_eq!(coordinator.state(), CrawlState::Done);
    let report = outcome.report().expect("crawl should complete");
    assert_eq!(report.site.as_str(), "127");
    assert_eq!(report.links_discovered, 2);
    assert_eq!(report.links_dispatched, 2);
    assert_eq!(report.pages.len(), 2);
    assert_eq!(report.images.downloaded, 1);
    assert!(!report.stopped_early);

    let page1 = report
        .pages
        .iter()
        .find(|page| page.url.ends_with("/page1"))
        .unwrap();
    assert_eq!(page1.title, "Page One");
    assert_eq!(page1.description, "First page");
    assert_eq!(page1.og_title, "OG One");
    assert_eq!(page1.keywords, "No Keywords");

    // One file per distinct image URL
    let media_dir = output.path().join("127").join("Media").join("127");
    let media: Vec<_> = std::fs::read_dir(&media_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(media, vec!["logo.png"]);
    assert_eq!(
        std::fs::read(media_dir.join("logo.png")).unwrap(),
        vec![0x89, b'P', b'N', b'G']
    );

    let rows = read_csv(&output.path().join("127").join("127_data.csv"));
    assert_eq!(
        rows[0],
        vec![
            "URL",
            "Page Title",
            "Meta Description",
            "Keywords",
            "OG Title",
            "OG Description",
            "Twitter Title",
            "Twitter Description"
        ]
    );
    assert_eq!(rows.len(), 3);

    let json: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(output.path().join("127").join("127_data.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(json["site"], "127");
    assert_eq!(json["page_count"], 2);
    assert_eq!(json["pages"].as_array().unwrap().len(), 2);

    assert_eq!(progress.completions(), 1);
    assert_eq!(progress.count(Severity::Error), 0);

    mock_server.verify().await;
}

#[tokio::test]
async fn test_seed_timeout_fails_without_writing() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    mount_page(
        &mock_server,
        "/",
        html_page("Slow", "", r#"<a href="/never">x</a>"#).set_delay(Duration::from_secs(3)),
    )
    .await;

    let (mut coordinator, progress) = coordinator(create_test_config(output.path(), 10, 1));
    let outcome = coordinator
        .run(&format!("{}/", mock_server.uri()))
        .await
        .unwrap();

    match outcome {
        CrawlOutcome::Failed { error, .. } => {
            assert!(matches!(error, FetchError::Timeout { .. }), "got {:?}", error)
        }
        CrawlOutcome::Completed(_) => panic!("seed timeout should fail the crawl"),
    }
    assert_eq!(coordinator.state(), CrawlState::Failed);

    assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
    assert_eq!(progress.count(Severity::Error), 1);
    assert_eq!(progress.completions(), 0);
}

#[tokio::test]
async fn test_seed_error_status_fails_crawl() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    mount_page(&mock_server, "/", ResponseTemplate::new(500)).await;

    let (mut coordinator, progress) = coordinator(create_test_config(output.path(), 10, 5));
    let outcome = coordinator
        .run(&format!("{}/", mock_server.uri()))
        .await
        .unwrap();

    assert!(!outcome.is_completed());
    assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
    assert!(progress.events().iter().any(|event| event
        .message
        .starts_with("[ERROR] Failed to fetch links from")));
}

#[tokio::test]
async fn test_og_description_without_description() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    mount_page(&mock_server, "/", html_page("Home", "", r#"<a href="/social">s</a>"#)).await;
    mount_page(
        &mock_server,
        "/social",
        html_page("", r#"<meta property="og:description" content="X">"#, ""),
    )
    .await;

    let (mut coordinator, _progress) = coordinator(create_test_config(output.path(), 10, 5));
    let outcome = coordinator
        .run(&format!("{}/", mock_server.uri()))
        .await
        .unwrap();

    let report = outcome.report().unwrap();
    assert_eq!(report.pages.len(), 1);
    let page = &report.pages[0];
    assert_eq!(page.og_description, "X");
    assert_eq!(page.description, "No Description");
    assert_eq!(page.title, "No Title");
}

#[tokio::test]
async fn test_failed_link_yields_error_record() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let output = tempfile::tempdir().unwrap();

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            "",
            r#"<a href="/ok">ok</a><a href="/missing">missing</a><a href="/ok">again</a>"#,
        ),
    )
    .await;
    mount_page(&mock_server, "/ok", html_page("Fine", "", "")).await;
    mount_page(&mock_server, "/missing", ResponseTemplate::new(404)).await;

    let (mut coordinator, progress) = coordinator(create_test_config(output.path(), 10, 5));
    let outcome = coordinator.run(&format!("{}/", base_url)).await.unwrap();
    let report = outcome.report().unwrap();

    // Duplicate anchors are each fetched and recorded
    assert_eq!(report.pages.len(), 3);
    assert_eq!(report.failed_pages(), 1);

    let missing = report
        .pages
        .iter()
        .find(|page| page.url.ends_with("/missing"))
        .unwrap();
    assert!(missing.is_fetch_error());
    assert_eq!(missing.title, "Error Fetching Data");
    assert_eq!(missing.twitter_description, "Error");

    assert_eq!(progress.count(Severity::Error), 1);
    assert_eq!(progress.completions(), 1);
}

#[tokio::test]
async fn test_worker_pool_bounds_concurrency() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    let anchors: String = (0..6)
        .map(|i| format!(r#"<a href="/slow{}">{}</a>"#, i, i))
        .collect();
    mount_page(&mock_server, "/", html_page("Home", "", &anchors)).await;
    for i in 0..6 {
        mount_page(
            &mock_server,
            &format!("/slow{}", i),
            html_page("Slow", "", "").set_delay(Duration::from_millis(300)),
        )
        .await;
    }

    let (mut coordinator, _progress) = coordinator(create_test_config(output.path(), 2, 5));
    let started = Instant::now();
    let outcome = coordinator
        .run(&format!("{}/", mock_server.uri()))
        .await
        .unwrap();

    // Six 300ms pages through two workers take at least three rounds
    assert!(started.elapsed() >= Duration::from_millis(900));
    assert_eq!(outcome.report().unwrap().pages.len(), 6);
}

#[tokio::test]
async fn test_stop_before_dispatch_persists_empty_results() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    mount_page(
        &mock_server,
        "/",
        html_page("Home", "", r#"<a href="/a">a</a><a href="/b">b</a>"#),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html_page("A", "", ""))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (coordinator, progress) = coordinator(create_test_config(output.path(), 10, 5));
    coordinator.stop_handle().request_stop();
    let handle = spawn_crawl(coordinator, format!("{}/", mock_server.uri()));
    let outcome = handle.wait().await.unwrap();

    let report = outcome.report().unwrap();
    assert!(report.stopped_early);
    assert_eq!(report.links_discovered, 2);
    assert_eq!(report.links_dispatched, 0);
    assert!(report.pages.is_empty());

    let rows = read_csv(&output.path().join("127").join("127_data.csv"));
    assert_eq!(rows.len(), 1);

    assert_eq!(progress.count(Severity::Warning), 1);
    assert_eq!(progress.completions(), 1);

    mock_server.verify().await;
}

#[tokio::test]
async fn test_stop_while_pool_is_full_dispatches_nothing_more() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            "",
            r#"<a href="/slow">slow</a><a href="/b">b</a><a href="/c">c</a>"#,
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/slow",
        html_page("Slow", "", "").set_delay(Duration::from_millis(1500)),
    )
    .await;
    for route in ["/b", "/c"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html_page("Late", "", ""))
            .expect(0)
            .mount(&mock_server)
            .await;
    }

    // One worker: "/slow" holds the only permit while the stop arrives
    let (coordinator, progress) = coordinator(create_test_config(output.path(), 1, 5));
    let handle = spawn_crawl(coordinator, format!("{}/", mock_server.uri()));
    tokio::time::sleep(Duration::from_millis(600)).await;
    handle.request_stop();
    let outcome = handle.wait().await.unwrap();

    let report = outcome.report().unwrap();
    assert!(report.stopped_early);
    assert_eq!(report.links_discovered, 3);
    assert_eq!(report.links_dispatched, 1);
    assert_eq!(report.pages.len(), 1);
    assert!(report.pages[0].url.ends_with("/slow"));
    assert_eq!(report.pages[0].title, "Slow");

    assert_eq!(progress.count(Severity::Warning), 1);
    assert_eq!(progress.completions(), 1);

    mock_server.verify().await;
}

#[tokio::test]
async fn test_seed_without_links_or_images() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    mount_page(&mock_server, "/", html_page("Lonely", "", "<p>nothing here</p>")).await;

    let (mut coordinator, progress) = coordinator(create_test_config(output.path(), 10, 5));
    let outcome = coordinator
        .run(&format!("{}/", mock_server.uri()))
        .await
        .unwrap();

    let report = outcome.report().unwrap();
    assert!(report.pages.is_empty());
    assert_eq!(report.images.downloaded, 0);

    let site_dir = output.path().join("127");
    assert!(site_dir.join("Media").join("127").is_dir());
    assert!(site_dir.join("127_data.csv").is_file());
    assert!(site_dir.join("127_data.json").is_file());
    assert_eq!(progress.completions(), 1);
}
