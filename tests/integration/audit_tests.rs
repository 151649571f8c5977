//! Integration tests for the tag audit
//!
//! A mirror is produced by a real crawl against a wiremock server, then
//! scanned and compared against a checklist.

use site_mirror::audit::{audit_mirror, scan_mirror, AuditError, Checklist};
use site_mirror::config::Config;
use site_mirror::crawler::run_crawl;
use site_mirror::output::{format_markdown_report, RunSummary};
use site_mirror::url::PathMapper;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

#[tokio::test]
async fn test_audit_of_crawled_mirror() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(page(
            r#"<html><head><title>Home</title>
            <meta name="viewport" content="width=device-width">
            <meta property="og:title" content="Home">
            </head><body><nav><a href="/about">About</a></nav>
            <div style="margin:0"><div>nested</div></div></body></html>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(page(
            "<html><body><table><tr><td>1</td></tr></table><math><mi>x</mi></math></body></html>",
        ))
        .mount(&server)
        .await;

    let root = TempDir::new().unwrap();
    let mut config = Config::default();
    config.crawler.max_retries = 0;
    config.crawler.max_concurrent_requests = 2;
    config.output.mirror_root = root.path().display().to_string();

    let report = run_crawl(&config, &format!("{}/", server.uri()), CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(report.files_written(), 2);

    let host_dir = PathMapper::new(root.path()).host_dir(&report.seed_host).unwrap();
    let checklist = Checklist::new(["html", "nav", "table", "aside", "footer"]);
    let audit = audit_mirror(&host_dir, &checklist).unwrap();

    assert_eq!(audit.files_scanned, 2);
    assert_eq!(audit.present, vec!["html", "nav", "table"]);
    assert_eq!(audit.missing, vec!["aside", "footer"]);
    assert_eq!(audit.penalty_points(), 4);
    assert_eq!(audit.div_count, 2);
    assert_eq!(audit.inline_styles, 1);
    assert!(audit.math_ml_used);
    assert!(audit.social_meta_tags);

    let markdown = format_markdown_report(&RunSummary::new(report).with_audit(Some(audit)));
    assert!(markdown.contains("- **Penalty**: 4 points"));
}

#[test]
fn test_default_checklist_against_minimal_site() {
    let root = TempDir::new().unwrap();
    std::fs::write(
        root.path().join("_"),
        "<html><head><title>t</title></head><body><p>hi</p></body></html>",
    )
    .unwrap();

    let audit = scan_mirror(root.path()).unwrap();
    let report = Checklist::default().compare(&audit);

    assert_eq!(report.total_needed, 63);
    assert_eq!(report.present, vec!["html", "head", "title", "body", "p"]);
    assert_eq!(report.total_missing(), 58);
    assert_eq!(report.penalty_points(), 116);
    assert!(!report.math_ml_used);
    assert!(!report.social_meta_tags);
}

#[test]
fn test_audit_of_missing_mirror_fails() {
    let root = TempDir::new().unwrap();
    let result = audit_mirror(&root.path().join("example.test"), &Checklist::default());
    assert!(matches!(result, Err(AuditError::NotADirectory(_))));
}
