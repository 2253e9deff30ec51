//! Integration tests for the history commands.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn seed_token(home: &tempfile::TempDir) {
    fs::write(
        home.path().join("credentials.json"),
        r#"{"token": "T1-abcdefghij"}"#,
    )
    .unwrap();
}

#[tokio::test]
async fn test_history_lists_records_in_server_order() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = tempdir().unwrap();
    seed_token(&home);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .and(header("authorization", "Bearer T1-abcdefghij"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 7, "image_base64": "data:image/png;base64,aa", "prediction": "plastic", "date": "2026-08-02T11:00:00Z"},
            {"id": 3, "image_base64": "data:image/png;base64,bb", "prediction": "glass", "date": "2026-08-01T10:00:00Z"},
        ])))
        .mount(&server)
        .await;

    cargo_bin_cmd!("binsight")
        .env("BINSIGHT_HOME", home.path())
        .env("BINSIGHT_SERVER_URL", server.uri())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Plastic"))
        .stdout(predicate::str::contains("Glass"))
        .stdout(predicate::str::is_match("(?s)Plastic.*Glass").unwrap());
}

#[tokio::test]
async fn test_history_empty_state_points_at_classify() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = tempdir().unwrap();
    seed_token(&home);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    cargo_bin_cmd!("binsight")
        .env("BINSIGHT_HOME", home.path())
        .env("BINSIGHT_SERVER_URL", server.uri())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No classifications yet."))
        .stdout(predicate::str::contains("binsight classify"));
}

#[tokio::test]
async fn test_history_delete_with_yes_flag() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = tempdir().unwrap();
    seed_token(&home);

    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/delete/7"))
        .and(header("authorization", "Bearer T1-abcdefghij"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("binsight")
        .env("BINSIGHT_HOME", home.path())
        .env("BINSIGHT_SERVER_URL", server.uri())
        .args(["history", "delete", "7", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record deleted successfully"));
}

#[tokio::test]
async fn test_history_delete_declined_at_prompt() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = tempdir().unwrap();
    seed_token(&home);

    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/delete/7"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    cargo_bin_cmd!("binsight")
        .env("BINSIGHT_HOME", home.path())
        .env("BINSIGHT_SERVER_URL", server.uri())
        .args(["history", "delete", "7"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."));
}

#[tokio::test]
async fn test_history_delete_failure_is_reported() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = tempdir().unwrap();
    seed_token(&home);

    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/delete/7"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .mount(&server)
        .await;

    cargo_bin_cmd!("binsight")
        .env("BINSIGHT_HOME", home.path())
        .env("BINSIGHT_SERVER_URL", server.uri())
        .args(["history", "delete", "7", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to delete record 7"));
}

#[test]
fn test_history_requires_sign_in() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("binsight")
        .env("BINSIGHT_HOME", home.path())
        .env("BINSIGHT_SERVER_URL", "http://127.0.0.1:9")
        .arg("history")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not signed in"));
}
