#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::path::Path;

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::{PredicateBooleanExt, predicate};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DISCOVER_PAGE_1: &str = include_str!("../../../fixtures/tmdb/discover_movie_page_1.json");
const FIGHT_CLUB: &str = include_str!("../../../fixtures/tmdb/movie_550.json");

fn write_config(dir: &Path, content: &str) {
    std::fs::write(dir.join("config.toml"), content).unwrap();
}

#[test]
fn test_movies_list_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.args(["movies", "list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--page"))
        .stdout(predicate::str::contains("--search"))
        .stdout(predicate::str::contains("--lang"));
}

#[test]
fn test_movies_detail_requires_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.args(["movies", "detail"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("<ID>"));
}

#[test]
fn test_movies_list_rejects_zero_page() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["movies", "list", "--page", "0"])
        .env("TMDB_API_KEY", "test-key")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid page parameter: 0"));
}

#[test]
fn test_movies_list_rejects_negative_page() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["movies", "list", "--page", "-1"])
        .env("TMDB_API_KEY", "test-key")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid page parameter: -1"));
}

#[test]
fn test_movies_list_without_api_key() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["movies", "list"])
        .env_remove("TMDB_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB API key is not configured"));
}

#[test]
fn test_invalid_config_is_reported() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "[paging]\npage_size = 0\n");

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("paging.page_size must be > 0"));
}

#[test]
fn test_config_show_redacts_api_key() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "[server]\nport = 8080\n");

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["config", "show"])
        .env("TMDB_API_KEY", "super-secret")
        .env_remove("PORT")
        .assert()
        .success()
        .stdout(predicate::str::contains("port = 8080"))
        .stdout(predicate::str::contains("<redacted>"))
        .stdout(predicate::str::contains("super-secret").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_movies_list_prints_page_json() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/discover/movie"))
        .and(query_param("page", "1"))
        .and(query_param("language", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(DISCOVER_PAGE_1, "application/json"))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        &format!("[tmdb]\nbase_url = \"{}/3\"\napi_key = \"test-key\"\n", server.uri()),
    );

    // Act
    let mut cmd = cargo_bin_cmd!("moviedeck");
    let output = cmd
        .arg("--dir")
        .arg(dir.path())
        .args(["movies", "list", "--page", "2"])
        .env_remove("TMDB_API_KEY")
        .output()
        .unwrap();

    // Assert
    assert!(output.status.success());
    let page: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["page"], 2);
    assert_eq!(page["results"][0]["id"], 110);
    assert_eq!(page["results"].as_array().unwrap().len(), 10);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_movies_detail_prints_detail_json() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/550"))
        .and(query_param("language", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FIGHT_CLUB, "application/json"))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        &format!("[tmdb]\nbase_url = \"{}/3\"\n", server.uri()),
    );

    // Act
    let mut cmd = cargo_bin_cmd!("moviedeck");
    let output = cmd
        .arg("--dir")
        .arg(dir.path())
        .args(["movies", "detail", "550", "--lang", "et"])
        .env("TMDB_API_KEY", "test-key")
        .output()
        .unwrap();

    // Assert
    assert!(output.status.success());
    let detail: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(detail["id"], 550);
    assert_eq!(detail["title"], "Fight Club");
    assert_eq!(detail["reviews"].as_array().unwrap().len(), 5);
}
