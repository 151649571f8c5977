//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end against a temporary mirror root.

use site_mirror::config::Config;
use site_mirror::crawler::{run_crawl, Coordinator};
use site_mirror::state::NodeOutcome;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration rooted at `root`
fn create_test_config(root: &Path, max_depth: u32, concurrency: u32) -> Config {
    let mut config = Config::default();
    config.crawler.max_depth = max_depth;
    config.crawler.max_concurrent_requests = concurrency;
    config.crawler.max_retries = 0;
    config.crawler.request_timeout_secs = 5;
    config.output.mirror_root = root.display().to_string();
    config
}

/// The per-host directory the mock server's files land in
fn host_dir(root: &Path) -> PathBuf {
    root.join("127.0.0.1")
}

/// Sorted file names directly under `dir`
fn mirrored_files(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return vec![];
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

async fn mount_head_ok(server: &MockServer) {
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, route: &str, body: &str, expected_gets: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .expect(expected_gets)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_crawl_stays_on_host_and_respects_depth() {
    let server = MockServer::start().await;
    mount_head_ok(&server).await;
    mount_page(
        &server,
        "/",
        r#"<html><body>
            <a href="/a">A</a>
            <a href="http://other.test/b">Elsewhere</a>
        </body></html>"#,
        1,
    )
    .await;
    mount_page(&server, "/a", r#"<a href="/b">B</a>"#, 1).await;
    mount_page(&server, "/b", r#"<a href="/c">C</a>"#, 1).await;
    mount_page(&server, "/c", "<p>too deep</p>", 0).await;

    let root = TempDir::new().unwrap();
    let config = create_test_config(root.path(), 2, 1);
    let seed = format!("{}/", server.uri());

    let report = run_crawl(&config, &seed, CancellationToken::new()).await.unwrap();

    assert_eq!(mirrored_files(&host_dir(root.path())), vec!["_", "_a", "_b"]);
    assert!(!root.path().join("other.test").exists());
    // Seen once from each visit of the seed page
    assert_eq!(report.count(NodeOutcome::CrossHost), 2);
    assert_eq!(report.files_written(), 3);
    assert!(report.count(NodeOutcome::DepthExhausted) >= 1);
    assert!(report.is_clean());
    assert_eq!(report.seed_host, "127.0.0.1");
}

#[tokio::test]
async fn test_unreachable_seed_writes_nothing() {
    let root = TempDir::new().unwrap();
    let config = create_test_config(root.path(), 2, 4);

    let report = run_crawl(&config, "http://127.0.0.1:1/", CancellationToken::new())
        .await
        .unwrap();

    assert!(report.seed_failure.is_some());
    assert_eq!(report.files_written(), 0);
    assert!(!host_dir(root.path()).exists());
}

#[tokio::test]
async fn test_seed_non_200_probe_fails_seed() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/", "<a href=\"/a\">A</a>", 0).await;

    let root = TempDir::new().unwrap();
    let config = create_test_config(root.path(), 2, 1);
    let report = run_crawl(&config, &format!("{}/", server.uri()), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.count(NodeOutcome::ProbeDead), 1);
    assert_eq!(report.seed_failure.as_deref(), Some("Status 500"));
    assert!(mirrored_files(&host_dir(root.path())).is_empty());
}

#[tokio::test]
async fn test_hrefless_anchor_is_ignored() {
    let server = MockServer::start().await;
    mount_head_ok(&server).await;
    mount_page(
        &server,
        "/",
        r#"<a name="top">anchor</a><a href="/x">X</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/x", "<p>x</p>", 1).await;

    let root = TempDir::new().unwrap();
    let config = create_test_config(root.path(), 2, 1);
    let report = run_crawl(&config, &format!("{}/", server.uri()), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(mirrored_files(&host_dir(root.path())), vec!["_", "_x"]);
    assert_eq!(report.files_written(), 2);
    assert_eq!(report.pages_visited, 3);
    // `/x` is counted on both visits of the seed; pages never count themselves
    assert_eq!(report.links_discovered, 2);
}

#[tokio::test]
async fn test_shared_target_fetched_once() {
    let server = MockServer::start().await;
    mount_head_ok(&server).await;
    mount_page(
        &server,
        "/",
        r#"<a href="/p1">1</a><a href="/p2">2</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/p1", r#"<a href="/shared">s</a>"#, 1).await;
    mount_page(&server, "/p2", r#"<a href="/shared?from=p2#top">s</a>"#, 1).await;
    mount_page(&server, "/shared", "<p>shared</p>", 1).await;

    let root = TempDir::new().unwrap();
    // Concurrency above one so both pages race for the same claim
    let config = create_test_config(root.path(), 3, 8);
    let report = run_crawl(&config, &format!("{}/", server.uri()), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        mirrored_files(&host_dir(root.path())),
        vec!["_", "_p1", "_p2", "_shared"]
    );
    assert_eq!(report.files_written(), 4);
    assert!(report.count(NodeOutcome::AlreadyClaimed) >= 1);
}

#[tokio::test]
async fn test_second_run_is_idempotent() {
    let server = MockServer::start().await;
    mount_head_ok(&server).await;
    // The seed is fetched once per run for link discovery
    mount_page(&server, "/", r#"<a href="/a">A</a>"#, 2).await;
    mount_page(&server, "/a", "<p>a</p>", 1).await;

    let root = TempDir::new().unwrap();
    let config = create_test_config(root.path(), 2, 1);
    let seed = format!("{}/", server.uri());

    let first = run_crawl(&config, &seed, CancellationToken::new()).await.unwrap();
    assert_eq!(first.files_written(), 2);
    let before = std::fs::read(host_dir(root.path()).join("_a")).unwrap();

    let second = run_crawl(&config, &seed, CancellationToken::new()).await.unwrap();
    assert_eq!(second.files_written(), 0);
    assert_eq!(second.count(NodeOutcome::AlreadyMaterialized), 2);
    assert_eq!(
        std::fs::read(host_dir(root.path()).join("_a")).unwrap(),
        before
    );
}

#[tokio::test]
async fn test_non_200_probe_skips_link_discovery() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_head_ok(&server).await;
    mount_page(&server, "/", r#"<a href="/gone">gone</a>"#, 1).await;
    mount_page(&server, "/gone", r#"<a href="/hidden">h</a>"#, 1).await;
    mount_page(&server, "/hidden", "<p>never</p>", 0).await;

    let root = TempDir::new().unwrap();
    let config = create_test_config(root.path(), 3, 1);
    let report = run_crawl(&config, &format!("{}/", server.uri()), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.count(NodeOutcome::ProbeDead), 1);
    assert!(report.seed_failure.is_none());
    assert_eq!(mirrored_files(&host_dir(root.path())), vec!["_", "_gone"]);
}

#[tokio::test]
async fn test_binary_content_saved_verbatim() {
    let png: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff, 0xfe];

    let server = MockServer::start().await;
    mount_head_ok(&server).await;
    mount_page(&server, "/", r#"<img src="/logo.png"><a href="/logo.png">logo</a>"#, 1).await;
    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(png.clone())
                .insert_header("content-type", "image/png"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let root = TempDir::new().unwrap();
    let config = create_test_config(root.path(), 2, 1);
    run_crawl(&config, &format!("{}/", server.uri()), CancellationToken::new())
        .await
        .unwrap();

    let saved = std::fs::read(host_dir(root.path()).join("_logo_png")).unwrap();
    assert_eq!(saved, png);
}

#[tokio::test]
async fn test_failed_download_keeps_other_branches() {
    let server = MockServer::start().await;
    mount_head_ok(&server).await;
    mount_page(&server, "/", r#"<a href="/broken">b</a><a href="/ok">ok</a>"#, 1).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/ok", "<p>fine</p>", 1).await;

    let root = TempDir::new().unwrap();
    let config = create_test_config(root.path(), 2, 1);
    let report = run_crawl(&config, &format!("{}/", server.uri()), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.count(NodeOutcome::FetchFailed), 1);
    assert!(!report.is_clean());
    assert_eq!(mirrored_files(&host_dir(root.path())), vec!["_", "_ok"]);
}

#[tokio::test]
async fn test_file_extension_is_appended() {
    let server = MockServer::start().await;
    mount_head_ok(&server).await;
    mount_page(&server, "/", r#"<a href="/about">about</a>"#, 1).await;
    mount_page(&server, "/about", "<p>about</p>", 1).await;

    let root = TempDir::new().unwrap();
    let mut config = create_test_config(root.path(), 2, 1);
    config.output.file_extension = Some(".html".to_string());

    let coordinator = Coordinator::new(&config, CancellationToken::new()).unwrap();
    let seed = url::Url::parse(&format!("{}/", server.uri())).unwrap();
    let report = coordinator.run(&seed, 2).await.unwrap();

    assert_eq!(report.files_written(), 2);
    assert_eq!(
        mirrored_files(&host_dir(root.path())),
        vec!["_.html", "_about.html"]
    );
}

#[tokio::test]
async fn test_deadline_cancels_crawl() {
    let server = MockServer::start().await;
    mount_head_ok(&server).await;
    mount_page(&server, "/", r#"<a href="/slow">slow</a>"#, 1).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("<p>late</p>").set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let root = TempDir::new().unwrap();
    let mut config = create_test_config(root.path(), 2, 1);
    config.crawler.max_crawl_duration_secs = Some(1);

    let report = run_crawl(&config, &format!("{}/", server.uri()), CancellationToken::new())
        .await
        .unwrap();

    assert!(report.cancelled);
    assert!(report.count(NodeOutcome::Cancelled) >= 1);
    assert!(!host_dir(root.path()).join("_slow").exists());
}
