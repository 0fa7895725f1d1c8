//! Response mode tests against a live server.

use std::io::Write;
use std::time::{Duration, Instant};

use chrono::NaiveTime;
use mock_ms::config::FILE_BUFFER_SIZE;
use reqwest::StatusCode;

mod common;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn fixture(len: usize) -> (tempfile::NamedTempFile, Vec<u8>) {
    let content: Vec<u8> = (0..len).map(|i| (i * 7 % 256) as u8).collect();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&content).unwrap();
    file.flush().unwrap();
    (file, content)
}

#[tokio::test]
async fn file_mode_body_matches_file() {
    for len in [0, FILE_BUFFER_SIZE, FILE_BUFFER_SIZE + 1] {
        let (file, content) = fixture(len);
        let path = file.path().to_str().unwrap().to_string();
        let server = common::spawn(&["--file", &path]).await;

        let res = common::client().get(server.url()).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["content-type"], "text/plain");
        let body = res.bytes().await.unwrap();
        assert_eq!(body.len(), len, "length mismatch for {} bytes", len);
        assert!(body[..] == content[..], "content mismatch for {} bytes", len);
    }
}

#[tokio::test]
async fn file_mode_sets_content_length_when_asked() {
    let (file, content) = fixture(FILE_BUFFER_SIZE + 1);
    let path = file.path().to_str().unwrap().to_string();
    let server = common::spawn(&["--file", &path, "--contentLength", "--contentType", "application/json"]).await;

    let res = common::client().get(server.url()).send().await.unwrap();
    assert_eq!(res.headers()["content-length"], content.len().to_string().as_str());
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.bytes().await.unwrap().len(), content.len());
}

#[tokio::test]
async fn file_mode_reads_file_per_request() {
    let (file, _) = fixture(3);
    let path = file.path().to_str().unwrap().to_string();
    let server = common::spawn(&["--file", &path]).await;

    std::fs::write(file.path(), b"changed").unwrap();
    let body = common::client().get(server.url()).send().await.unwrap().text().await.unwrap();
    assert_eq!(body, "changed");
}

#[tokio::test]
async fn time_mode_body_format() {
    let server = common::spawn(&["--time", "--contentLength"]).await;

    let res = common::client().get(server.url()).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-xss-protection"], "1; mode=block");
    let length: usize = res.headers()["content-length"].to_str().unwrap().parse().unwrap();
    let body = res.text().await.unwrap();

    assert_eq!(body.len(), length);
    assert_eq!(body.len(), "Jan _2 15:04:05.000000\n".len());
    assert!(body.ends_with('\n'));
    assert!(MONTHS.contains(&&body[0..3]), "bad month in {:?}", body);
    assert_eq!(&body[3..4], " ");
    let day: u32 = body[4..6].trim_start().parse().unwrap();
    assert!((1..=31).contains(&day));
    assert!(NaiveTime::parse_from_str(&body[7..22], "%H:%M:%S%.6f").is_ok());
}

#[tokio::test]
async fn sha_mode_digests_differ() {
    let server = common::spawn(&["--SHA"]).await;
    let client = common::client();

    let first = client.get(server.url()).send().await.unwrap().text().await.unwrap();
    let second = client.get(server.url()).send().await.unwrap().text().await.unwrap();

    for digest in [&first, &second] {
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }
    assert_ne!(first, second);
}

#[tokio::test]
async fn fixed_status_mode_for_any_method_and_path() {
    for code in [201u16, 404, 503] {
        let server = common::spawn(&["--HttpCode", &code.to_string()]).await;
        let client = common::client();

        let get = client.get(server.url()).send().await.unwrap();
        assert_eq!(get.status().as_u16(), code);
        assert!(get.headers().get("x-xss-protection").is_none());
        assert!(get.text().await.unwrap().is_empty());

        let post = client
            .post(format!("{}deep/path", server.url()))
            .body("data")
            .send()
            .await
            .unwrap();
        assert_eq!(post.status().as_u16(), code);
    }
}

#[tokio::test]
async fn delay_applies_before_reply() {
    let delay = Duration::from_millis(300);
    let server = common::spawn(&["--time", "--delay", "300ms"]).await;

    let start = Instant::now();
    let res = common::client().get(server.url()).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(start.elapsed() >= delay);
}

#[tokio::test]
async fn delay_does_not_serialize_requests() {
    let server = common::spawn(&["--time", "--delay", "500ms"]).await;
    let client = common::client();

    let start = Instant::now();
    let (a, b) = tokio::join!(
        client.get(server.url()).send(),
        client.get(server.url()).send()
    );
    assert_eq!(a.unwrap().status(), StatusCode::OK);
    assert_eq!(b.unwrap().status(), StatusCode::OK);

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(500));
    assert!(elapsed < Duration::from_millis(950), "requests were serialized: {:?}", elapsed);
}

#[tokio::test]
async fn configured_headers_are_injected() {
    let server = common::spawn(&[
        "--SHA",
        "--headers",
        "X-Mock: one, Authorization: Bearer a:b, Content-Type: application/json",
    ])
    .await;

    let res = common::client().get(server.url()).send().await.unwrap();
    assert_eq!(res.headers()["x-mock"], "one");
    assert_eq!(res.headers()["authorization"], "Bearer a:b");
    assert_eq!(res.headers()["content-type"], "application/json");
}
