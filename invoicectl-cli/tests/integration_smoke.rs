//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn invoicectl() -> Command {
    let mut cmd = Command::cargo_bin("invoicectl").unwrap();
    // Keep the developer's environment out of the tests
    cmd.env_remove("DATABASE_URL")
        .env_remove("INVOICECTL_BIND")
        .env_remove("INVOICECTL_DEMO_DELAYS")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    invoicectl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("seed"));
}

#[test]
fn test_serve_help() {
    invoicectl()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Allow permissive CORS"));
}

#[test]
fn test_dashboard_help() {
    invoicectl()
        .arg("dashboard")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sequential"));
}

#[test]
fn test_dashboard_memory_prints_json() {
    let dir = tempfile::tempdir().unwrap();
    invoicectl()
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .arg("dashboard")
        .arg("--memory")
        .arg("--no-delays")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"numberOfInvoices\": 13"))
        .stdout(predicate::str::contains("latestInvoices"));
}

#[test]
fn test_invoices_memory_search() {
    let dir = tempfile::tempdir().unwrap();
    invoicectl()
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .args(["invoices", "--memory", "--no-delays", "--query", "PAID"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalPages\": 2"));
}

#[test]
fn test_migrate_without_database_url_fails() {
    let dir = tempfile::tempdir().unwrap();
    invoicectl()
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    invoicectl()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success();

    invoicectl()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("revenue_ms = 6000"));

    invoicectl()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}
