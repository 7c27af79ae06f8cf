use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

mod common;
use common::{WORKPLACE, init_with_shifts, run, setup_test_db, temp_out};

#[test]
fn test_export_csv() {
    let db_path = setup_test_db("export_csv");
    let out = temp_out("export_csv", "csv");
    init_with_shifts(&db_path);

    run(&db_path, &["export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert!(lines.next().unwrap().starts_with("id,date,workplace,position"));
    assert_eq!(lines.count(), 3);
    assert!(content.contains(WORKPLACE));
    assert!(content.contains("Bartender"));
}

#[test]
fn test_export_json_with_month_range() {
    let db_path = setup_test_db("export_json_range");
    let out = temp_out("export_json_range", "json");
    init_with_shifts(&db_path);

    run(
        &db_path,
        &["export", "--format", "json", "--file", &out, "--range", "2025-03"],
    )
    .assert()
    .success();

    let content = fs::read_to_string(&out).unwrap();
    let v: serde_json::Value = serde_json::from_str(&content).unwrap();
    let rows = v.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["date"].as_str().unwrap().starts_with("2025-03")));
}

#[test]
fn test_export_xlsx_and_pdf_create_files() {
    let db_path = setup_test_db("export_xlsx_pdf");
    init_with_shifts(&db_path);

    let xlsx = temp_out("export_xlsx", "xlsx");
    run(&db_path, &["export", "--format", "xlsx", "--file", &xlsx])
        .assert()
        .success();
    assert!(fs::metadata(&xlsx).unwrap().len() > 0);

    let pdf = temp_out("export_pdf", "pdf");
    run(&db_path, &["export", "--format", "pdf", "--file", &pdf, "--range", "2025"])
        .assert()
        .success();
    let bytes = fs::read(&pdf).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_export_relative_path_rejected() {
    let db_path = setup_test_db("export_relative");
    init_with_shifts(&db_path);

    run(&db_path, &["export", "--file", "shifts.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_empty_range_writes_nothing() {
    let db_path = setup_test_db("export_empty_range");
    let out = temp_out("export_empty_range", "csv");
    init_with_shifts(&db_path);

    run(&db_path, &["export", "--file", &out, "--range", "2020"])
        .assert()
        .success()
        .stdout(contains("No shifts found"));

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_export_overwrite_needs_confirmation() {
    let db_path = setup_test_db("export_overwrite");
    let out = temp_out("export_overwrite", "csv");
    init_with_shifts(&db_path);
    fs::write(&out, "keep me").unwrap();

    run(&db_path, &["export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("export cancelled"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    run(&db_path, &["export", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains(WORKPLACE));
}

#[test]
fn test_backup_copies_database() {
    let db_path = setup_test_db("backup_copy");
    let out = temp_out("backup_copy", "sqlite");
    init_with_shifts(&db_path);

    run(&db_path, &["backup", "--file", &out])
        .assert()
        .success();

    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"SQLite format 3"));

    let zipped = temp_out("backup_zipped", "zip");
    let target = zipped.trim_end_matches(".zip").to_string() + ".sqlite";
    fs::remove_file(&target).ok();
    run(&db_path, &["backup", "--file", &target, "--compress"])
        .assert()
        .success();
    assert!(std::path::Path::new(&zipped).exists());
    assert!(!std::path::Path::new(&target).exists());
}
