//! Black-box CLI tests
//!
//! Everything here runs without network access: it exercises argument
//! validation, pre-flight configuration checks and CSV handling, all of
//! which must fail before any HTTP request would be issued.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn igp() -> Command {
    let mut cmd = Command::cargo_bin("igp").expect("binary built");
    // Make sure ambient credentials never leak into the tests.
    cmd.env_remove("IG_ACCESS_TOKEN")
        .env_remove("IG_USER_ID")
        .env_remove("IG_API_VERSION")
        .env_remove("IG_GRAPH_BASE_URL")
        .env_remove("IG_POLL_INTERVAL")
        .env_remove("IG_TIMEOUT")
        .env_remove("IG_HTTP_TIMEOUT_SECS")
        .env_remove("IG_UNKNOWN_STATUS_POLICY");
    cmd
}

#[test]
fn upload_without_credentials_fails_preflight() {
    igp()
        .args(["upload", "--type", "image", "--url", "http://x/a.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn upload_rejects_invalid_media_type() {
    igp()
        .args(["upload", "--type", "gif", "--url", "http://x/a.gif"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("media type must be"));
}

#[test]
fn upload_rejects_non_http_url() {
    igp()
        .args(["upload", "--type", "image", "--url", "file:///tmp/a.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("http"));
}

#[test]
fn batch_reports_missing_csv() {
    igp()
        .args(["batch", "/nonexistent/jobs.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CSV file not found"));
}

#[test]
fn batch_reports_missing_columns() {
    let mut file = tempfile::NamedTempFile::new().expect("temp csv");
    writeln!(file, "kind,link").expect("write");
    writeln!(file, "image,http://x/a.jpg").expect("write");

    igp()
        .args(["batch"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required columns"));
}

#[test]
fn batch_reports_empty_batch_distinctly() {
    let mut file = tempfile::NamedTempFile::new().expect("temp csv");
    writeln!(file, "type,url,caption").expect("write");
    writeln!(file, "bogus,http://x/a.jpg,").expect("write");

    igp()
        .args(["batch"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No valid jobs"));
}

#[test]
fn config_show_redacts_the_token() {
    let mut file = tempfile::NamedTempFile::new().expect("temp settings");
    writeln!(file, "access_token = EAABsbCS1234").expect("write");
    writeln!(file, "ig_user_id = 17841400000000000").expect("write");

    igp()
        .args(["config", "show", "--settings"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("****1234"))
        .stdout(predicate::str::contains("EAABsbCS").not())
        .stdout(predicate::str::contains("17841400000000000"));
}

#[test]
fn config_show_warns_on_incomplete_credentials() {
    igp()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("credentials are incomplete"));
}

#[test]
fn help_lists_all_commands() {
    igp()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("upload"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("config"));
}
