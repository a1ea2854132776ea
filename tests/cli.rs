use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn monthbook(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("monthbook").unwrap();
    cmd.env("MONTHBOOK_DATA_DIR", dir.path())
        .env_remove("MONTHBOOK_USER")
        .env_remove("MONTHBOOK_LOG");
    cmd
}

fn seed_march(dir: &TempDir) {
    monthbook(dir)
        .args(["income", "set", "1500", "-p", "2025-03"])
        .assert()
        .success();
    monthbook(dir)
        .args(["expense", "add", "50", "Groceries", "-p", "2025-03"])
        .assert()
        .success();
    monthbook(dir)
        .args([
            "recurring", "add", "20", "Streaming", "--start", "2025-01", "--end", "2025-06",
        ])
        .assert()
        .success();
}

#[test]
fn test_init_creates_settings_and_ledgers() {
    let dir = TempDir::new().unwrap();

    monthbook(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("ledgers.json").exists());
}

#[test]
fn test_expense_add_and_list() {
    let dir = TempDir::new().unwrap();

    monthbook(&dir)
        .args(["expense", "add", "12,50", "Bakery", "-p", "März 2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€12.50"));

    monthbook(&dir)
        .args(["expense", "list", "-p", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bakery"));

    monthbook(&dir)
        .args(["expense", "list", "-p", "2025-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));
}

#[test]
fn test_month_report_balance() {
    let dir = TempDir::new().unwrap();
    seed_march(&dir);

    monthbook(&dir)
        .args(["report", "month", "-p", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance for März 2025"))
        .stdout(predicate::str::contains("€70.00"))
        .stdout(predicate::str::contains("€1430.00"));
}

#[test]
fn test_month_report_after_recurring_range_ends() {
    let dir = TempDir::new().unwrap();
    seed_march(&dir);

    monthbook(&dir)
        .args(["report", "month", "-p", "2025-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Streaming").not());
}

#[test]
fn test_year_report() {
    let dir = TempDir::new().unwrap();
    seed_march(&dir);

    monthbook(&dir)
        .args(["report", "year", "-y", "2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expenses 2025"))
        .stdout(predicate::str::contains("€170.00"));
}

#[test]
fn test_invalid_month_is_rejected() {
    let dir = TempDir::new().unwrap();

    monthbook(&dir)
        .args(["expense", "add", "10", "Coffee", "-p", "Smarch 2025"])
        .assert()
        .failure();

    monthbook(&dir)
        .args(["expense", "list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));
}

#[test]
fn test_users_are_separate() {
    let dir = TempDir::new().unwrap();

    monthbook(&dir)
        .args(["--user", "alice", "expense", "add", "30", "Books", "-p", "2025-03"])
        .assert()
        .success();

    monthbook(&dir)
        .args(["--user", "bob", "expense", "list", "-p", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Books").not());
}

#[test]
fn test_export_csv_header() {
    let dir = TempDir::new().unwrap();
    seed_march(&dir);

    monthbook(&dir)
        .args(["export", "csv", "expenses"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("id,year,month,amount,note"))
        .stdout(predicate::str::contains("Groceries"));
}

#[test]
fn test_audit_lists_changes() {
    let dir = TempDir::new().unwrap();
    seed_march(&dir);

    monthbook(&dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"));
}
