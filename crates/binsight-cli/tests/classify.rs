//! Integration tests for the classify and guide commands.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use base64::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

const PNG_BYTES: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[tokio::test]
async fn test_classify_renders_guidance_for_the_prediction() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = tempdir().unwrap();
    fs::write(
        home.path().join("credentials.json"),
        r#"{"token": "T1-abcdefghij"}"#,
    )
    .unwrap();

    let image_path = home.path().join("bottle.png");
    fs::write(&image_path, PNG_BYTES).unwrap();
    let expected_uri = format!("data:image/png;base64,{}", BASE64_STANDARD.encode(PNG_BYTES));

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(header("authorization", "Bearer T1-abcdefghij"))
        .and(body_json(json!({"image": expected_uri})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"material": "glass"})))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("binsight")
        .env("BINSIGHT_HOME", home.path())
        .env("BINSIGHT_SERVER_URL", server.uri())
        .args(["classify", image_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Glass Detected"))
        .stdout(predicate::str::contains("Rinse containers thoroughly"));
}

#[tokio::test]
async fn test_classify_surfaces_the_server_error_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = tempdir().unwrap();
    fs::write(
        home.path().join("credentials.json"),
        r#"{"token": "T1-abcdefghij"}"#,
    )
    .unwrap();

    let image_path = home.path().join("bottle.png");
    fs::write(&image_path, PNG_BYTES).unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Unsupported image"})),
        )
        .mount(&server)
        .await;

    cargo_bin_cmd!("binsight")
        .env("BINSIGHT_HOME", home.path())
        .env("BINSIGHT_SERVER_URL", server.uri())
        .args(["classify", image_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported image"));
}

#[test]
fn test_classify_requires_sign_in() {
    let home = tempdir().unwrap();
    let image_path = home.path().join("bottle.png");
    fs::write(&image_path, PNG_BYTES).unwrap();

    cargo_bin_cmd!("binsight")
        .env("BINSIGHT_HOME", home.path())
        .env("BINSIGHT_SERVER_URL", "http://127.0.0.1:9")
        .args(["classify", image_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not signed in"));
}

#[test]
fn test_guide_shows_material_instructions() {
    cargo_bin_cmd!("binsight")
        .args(["guide", "plastic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plastic"))
        .stdout(predicate::str::contains("Check the recycling symbol"));
}

#[test]
fn test_guide_unknown_label_falls_back_to_general_waste() {
    cargo_bin_cmd!("binsight")
        .args(["guide", "styrofoam"])
        .assert()
        .success()
        .stdout(predicate::str::contains("General Waste"));
}

#[test]
fn test_guide_without_label_lists_materials() {
    cargo_bin_cmd!("binsight")
        .arg("guide")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cardboard"))
        .stdout(predicate::str::contains("General Waste"));
}
