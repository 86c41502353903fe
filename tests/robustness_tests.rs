use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

mod common;

#[test]
fn test_strict_import_rejects_malformed_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("accounts.csv");
    common::write_lines(
        &path,
        &[
            "2024-01-10,2024-01-10,100.00,Rent,Paid",
            "2024-02-01,50.00,Electric,Pending",
        ],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("payables"));
    cmd.arg("import").arg(&path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Format error"))
        .stderr(predicate::str::contains("2024-02-01,50.00,Electric,Pending"));
}

#[test]
fn test_strict_import_rejects_unparseable_amount() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("accounts.csv");
    common::write_lines(&path, &["2024-01-10,,not_a_number,Rent,Pending"]).unwrap();

    let mut cmd = Command::new(cargo_bin!("payables"));
    cmd.arg("import").arg(&path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"))
        .stdout(predicate::str::contains("Imported").not());
}

#[test]
fn test_skip_invalid_import_reports_and_continues() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("accounts.csv");
    common::write_lines(
        &path,
        &[
            "2024-01-10,,100.00,Rent,Paid",
            "2024-01-11,,0,Gas,Pending",
            "2024-01-12,,abc,Water,Pending",
            "2024-01-13,,5.00,Phone,Pending",
        ],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("payables"));
    cmd.arg("import")
        .arg(&path)
        .arg("--import-policy")
        .arg("skip-invalid");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Skipped line 2"))
        .stderr(predicate::str::contains("Skipped line 3"))
        .stdout(predicate::str::contains("Imported 2 accounts"));
}

#[test]
fn test_create_with_missing_fields_lists_every_rule() {
    let mut cmd = Command::new(cargo_bin!("payables"));
    cmd.args(["create", "--amount", "-1"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("amount_not_positive"))
        .stderr(predicate::str::contains("missing_due_date"))
        .stderr(predicate::str::contains("empty_description"))
        .stderr(predicate::str::contains("empty_status"));
}

#[test]
fn test_skip_invalid_survives_bad_bytes_and_stray_quote() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("accounts.csv");
    let mut data = b"2024-01-10,,1,\"Rent,Pending\n2024-01-11,,2,Gas ".to_vec();
    data.extend_from_slice(&[0xFF, 0xFE]);
    data.extend_from_slice(b",Pending\n2024-01-12,,3,Water,Pending\n2024-01-13,,4,Phone,Pending\n");
    std::fs::write(&path, data).unwrap();

    let mut cmd = Command::new(cargo_bin!("payables"));
    cmd.arg("import")
        .arg(&path)
        .arg("--import-policy")
        .arg("skip-invalid");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Skipped line 1"))
        .stderr(predicate::str::contains("Skipped line 2"))
        .stdout(predicate::str::contains("Imported 2 accounts"));
}
