//! Upload mode. Kept to a single test: it changes the working directory.

use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn upload_saves_under_base_name() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let server = common::spawn(&["--uploadFile", "--dumpReq"]).await;
    let client = common::client();

    let form = Form::new()
        .percent_encode_noop()
        .part("Name", Part::bytes(b"first".to_vec()).file_name("a/b/c.txt"));
    let res = client.post(server.url()).multipart(form).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Upload successful");
    assert_eq!(std::fs::read(dir.path().join("c.txt")).unwrap(), b"first");
    assert!(!dir.path().join("a").exists());

    // Same base name overwrites.
    let form = Form::new()
        .percent_encode_noop()
        .part("Name", Part::bytes(b"second, longer".to_vec()).file_name("other/c.txt"));
    let res = client.post(server.url()).multipart(form).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(std::fs::read(dir.path().join("c.txt")).unwrap(), b"second, longer");

    let res = client.get(server.url()).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    let form = Form::new().part("Other", Part::bytes(b"x".to_vec()).file_name("x.txt"));
    let res = client.post(server.url()).multipart(form).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.text().await.unwrap().contains("Name=@filename"));
    assert!(!dir.path().join("x.txt").exists());
}
