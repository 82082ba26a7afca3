//! Integration tests for the scrape pipeline
//!
//! These tests use wiremock to serve pages and images and a temporary
//! results directory to check the files a full run leaves behind.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sumi_sieve::config::{Config, HttpConfig, OutputConfig};
use sumi_sieve::output::parse_xml_result;
use sumi_sieve::{run_scrape, OutputFormat, Pipeline, ScrapeResult, ScrapeTarget, SieveError};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing into `results_dir`
fn create_test_config(results_dir: &Path, format: OutputFormat, download_images: bool) -> Config {
    Config {
        output: OutputConfig {
            results_dir: results_dir.to_path_buf(),
            format,
            download_images,
        },
        http: HttpConfig {
            user_agent: "TestSieve/1.0".to_string(),
            timeout_secs: Some(10),
        },
        targets: vec![],
    }
}

/// Folder name the persister derives for a wiremock server
fn site_folder(server: &MockServer) -> String {
    let url = url::Url::parse(&server.uri()).expect("Failed to parse server URI");
    format!(
        "{}-{}",
        url.host_str().expect("Missing host").replace('.', "-"),
        url.port().expect("Missing port")
    )
}

async fn mount_page(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

async fn mount_image(server: &MockServer, route: &str, content_type: &str, body: &[u8]) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", content_type))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body.to_vec())
                .insert_header("content-type", content_type),
        )
        .mount(server)
        .await;
}

/// Serves the "Demo" page with two real images and two rejected candidates
async fn demo_site() -> MockServer {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        format!(
            r#"<html><head><title>Demo</title></head><body>
            <img class="hero" src="{base}/x.png">
            <img class="hero" src="/missing.png">
            <img class="hero" src="/about.html">
            <img class="hero" src="{base}/y.jpg">
            <img class="thumb" src="/z.gif">
            </body></html>"#
        ),
    )
    .await;

    mount_image(&server, "/x.png", "image/png", b"png-bytes").await;
    mount_image(&server, "/y.jpg", "image/jpeg", b"jpeg-bytes").await;
    mount_image(&server, "/z.gif", "image/gif", b"gif-bytes").await;
    Mock::given(method("HEAD"))
        .and(path("/about.html"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(&server)
        .await;
    // /missing.png falls through to wiremock's default 404

    server
}

fn demo_image_urls(server: &MockServer) -> Vec<String> {
    vec![
        format!("{}/x.png", server.uri()),
        format!("{}/y.jpg", server.uri()),
    ]
}

#[tokio::test]
async fn test_json_result_for_demo_page() {
    let server = demo_site().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path(), OutputFormat::Json, false);

    let target = ScrapeTarget::new(&server.uri(), "img.hero").unwrap();
    let report = run_scrape(&config, vec![target]).await.unwrap();

    assert!(report.is_complete());
    assert_eq!(report.results_emitted(), 1);

    let file = dir
        .path()
        .join(site_folder(&server))
        .join("index.json");
    assert_eq!(report.files_written(), vec![file.as_path()]);

    let content = std::fs::read_to_string(&file).unwrap();
    let result: ScrapeResult = serde_json::from_str(&content).unwrap();

    assert_eq!(result.title, "Demo");
    assert_eq!(result.url, server.uri());
    assert_eq!(result.selector, "img.hero");
    assert_eq!(result.image_urls, demo_image_urls(&server));

    let raw: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert!(raw.get("img_urls").is_some());
}

#[tokio::test]
async fn test_csv_has_header_plus_one_row_per_image() {
    let server = demo_site().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path(), OutputFormat::Csv, false);

    let target = ScrapeTarget::new(&server.uri(), "img.hero").unwrap();
    run_scrape(&config, vec![target]).await.unwrap();

    let file = dir.path().join(site_folder(&server)).join("index.csv");
    let mut reader = csv::Reader::from_path(&file).unwrap();

    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["Title", "URL", "Selector", "Image URLs"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    for (row, image_url) in rows.iter().zip(demo_image_urls(&server)) {
        assert_eq!(&row[0], "Demo");
        assert_eq!(&row[1], server.uri().as_str());
        assert_eq!(&row[2], "img.hero");
        assert_eq!(&row[3], image_url.as_str());
    }
}

#[tokio::test]
async fn test_xml_result_reads_back() {
    let server = demo_site().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path(), OutputFormat::Xml, false);

    let target = ScrapeTarget::new(&server.uri(), "img.hero").unwrap();
    run_scrape(&config, vec![target]).await.unwrap();

    let file = dir.path().join(site_folder(&server)).join("index.xml");
    let content = std::fs::read_to_string(&file).unwrap();
    let result = parse_xml_result(&content).unwrap();

    assert_eq!(result.title, "Demo");
    assert_eq!(result.selector, "img.hero");
    assert_eq!(result.image_urls, demo_image_urls(&server));
}

#[tokio::test]
async fn test_unreachable_target_does_not_block_others() {
    let server = demo_site().await;
    mount_page(&server, "/gallery/", "<title>Gallery</title>".to_string()).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path(), OutputFormat::Txt, false);

    let targets = vec![
        ScrapeTarget::new(&server.uri(), "img.hero").unwrap(),
        ScrapeTarget::new("http://127.0.0.1:1/nothing", "img").unwrap(),
        ScrapeTarget::new(&format!("{}/gallery/", server.uri()), "img").unwrap(),
    ];
    let report = run_scrape(&config, targets).await.unwrap();

    assert_eq!(report.targets_submitted, 3);
    assert_eq!(report.results_emitted(), 2);
    assert_eq!(report.target_failures.len(), 1);
    assert_eq!(report.target_failures[0].url, "http://127.0.0.1:1/nothing");
    assert!(!report.is_complete());

    let site = dir.path().join(site_folder(&server));
    assert!(site.join("index.txt").exists());
    assert!(site.join("gallery.txt").exists());
    assert!(!dir.path().join("127-0-0-1-1").exists());

    let text = std::fs::read_to_string(site.join("gallery.txt")).unwrap();
    assert!(text.starts_with("Title: Gallery\n\n"));
}

#[tokio::test]
async fn test_download_images_next_to_result() {
    let server = demo_site().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path(), OutputFormat::Json, true);

    let target = ScrapeTarget::new(&server.uri(), "img.hero").unwrap();
    let report = run_scrape(&config, vec![target]).await.unwrap();

    assert_eq!(report.images_saved(), 2);
    assert_eq!(report.images_failed(), 0);

    let images: PathBuf = dir.path().join(site_folder(&server)).join("index");
    assert_eq!(std::fs::read(images.join("x.png")).unwrap(), b"png-bytes");
    assert_eq!(std::fs::read(images.join("y.jpg")).unwrap(), b"jpeg-bytes");
    assert!(!images.join("z.gif").exists());
}

#[tokio::test]
async fn test_page_without_matches_still_written() {
    let server = MockServer::start().await;
    mount_page(&server, "/empty", "<html><body><p>nothing</p></body></html>".to_string()).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path(), OutputFormat::Json, true);

    let target = ScrapeTarget::new(&format!("{}/empty", server.uri()), "img").unwrap();
    let report = run_scrape(&config, vec![target]).await.unwrap();

    assert_eq!(report.results_emitted(), 1);

    let site = dir.path().join(site_folder(&server));
    let result: ScrapeResult =
        serde_json::from_str(&std::fs::read_to_string(site.join("empty.json")).unwrap()).unwrap();
    assert_eq!(result.title, "");
    assert!(result.image_urls.is_empty());
    assert!(!site.join("empty").exists());
}

#[tokio::test]
async fn test_results_never_exceed_targets() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path(), OutputFormat::Txt, false);

    let mut targets = Vec::new();
    for i in 0..8 {
        let route = format!("/p{}", i);
        mount_page(&server, &route, format!("<title>Page {}</title>", i)).await;
        targets.push(ScrapeTarget::new(&format!("{}{}", server.uri(), route), "img").unwrap());
    }
    targets.push(ScrapeTarget::new("http://127.0.0.1:1/", "img").unwrap());

    let report = Pipeline::new(&config).unwrap().run(targets).await.unwrap();

    assert_eq!(report.results_emitted(), 8);
    assert!(report.results_emitted() <= report.targets_submitted);
    assert_eq!(report.files_written().len(), 8);
}

#[tokio::test]
async fn test_no_targets_creates_results_dir_only() {
    let dir = TempDir::new().unwrap();
    let results_dir = dir.path().join("nested").join("results");
    let config = create_test_config(&results_dir, OutputFormat::Txt, false);

    let report = run_scrape(&config, vec![]).await.unwrap();

    assert_eq!(report.results_emitted(), 0);
    assert!(results_dir.is_dir());
    assert_eq!(std::fs::read_dir(&results_dir).unwrap().count(), 0);
}

#[tokio::test]
async fn test_results_dir_failure_is_fatal() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("occupied");
    std::fs::write(&blocker, b"file").unwrap();
    let config = create_test_config(&blocker, OutputFormat::Txt, false);

    let target = ScrapeTarget::new("http://127.0.0.1:1/", "img").unwrap();
    let err = run_scrape(&config, vec![target]).await.unwrap_err();

    assert!(matches!(err, SieveError::ResultsDir { .. }));
}

#[tokio::test]
async fn test_targets_and_downloads_run_concurrently() {
    const PAGES: usize = 6;
    let delay = Duration::from_millis(500);

    let server = MockServer::start().await;
    let mut targets = Vec::new();
    for i in 0..PAGES {
        let route = format!("/slow/{}", i);
        Mock::given(method("GET"))
            .and(path(route.as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(
                        format!(r#"<title>Slow {i}</title><img src="{route}/a.png"><img src="{route}/b.gif">"#),
                        "text/html",
                    )
                    .set_delay(delay),
            )
            .mount(&server)
            .await;

        for (name, content_type) in [("a.png", "image/png"), ("b.gif", "image/gif")] {
            let image_route = format!("{}/{}", route, name);
            Mock::given(method("HEAD"))
                .and(path(image_route.as_str()))
                .respond_with(ResponseTemplate::new(200).insert_header("content-type", content_type))
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path(image_route.as_str()))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_bytes(b"img".to_vec())
                        .set_delay(delay),
                )
                .mount(&server)
                .await;
        }

        targets.push(ScrapeTarget::new(&format!("{}{}", server.uri(), route), "img").unwrap());
    }

    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path(), OutputFormat::Json, true);

    let start = Instant::now();
    let report = run_scrape(&config, targets).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(report.results_emitted(), PAGES);
    assert_eq!(report.images_saved(), PAGES * 2);

    // One at a time would take PAGES * 3 delays; overlapped it is about two.
    assert!(
        elapsed < delay * PAGES as u32,
        "run took {:?}, pages and downloads did not overlap",
        elapsed
    );
}
