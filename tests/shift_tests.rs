use predicates::prelude::*;
use predicates::str::contains;

mod common;
use common::{
    WORKPLACE, add_shift, init_with_shifts, init_with_workplace, run, setup_test_db, temp_out,
};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init_creates_database");

    run(&db_path, &["init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_commands_without_user_fail() {
    let db_path = setup_test_db("no_user");
    run(&db_path, &["init"]).assert().success();

    run(&db_path, &["shift", "list"])
        .assert()
        .failure()
        .stderr(contains("No active user"));
}

#[test]
fn test_workplace_add_and_list() {
    let db_path = setup_test_db("workplace_add_list");
    init_with_workplace(&db_path);

    run(&db_path, &["workplace", "list"])
        .assert()
        .success()
        .stdout(contains(WORKPLACE))
        .stdout(contains("Main St"))
        .stdout(contains("Server"))
        .stdout(contains("$7.25/h"))
        .stdout(contains("Bartender"));
}

#[test]
fn test_add_position_and_delete_it() {
    let db_path = setup_test_db("position_add_del");
    init_with_workplace(&db_path);

    run(&db_path, &["workplace", "add-position", WORKPLACE, "Host", "--wage", "12"])
        .assert()
        .success()
        .stdout(contains("Position added: Host at $12.00/h"));

    run(&db_path, &["workplace", "del-position", WORKPLACE, "Host", "--yes"])
        .assert()
        .success()
        .stdout(contains("Position 'Host' deleted."));

    run(&db_path, &["workplace", "list"])
        .assert()
        .success()
        .stdout(contains("Host").not());
}

#[test]
fn test_shift_add_and_list() {
    let db_path = setup_test_db("shift_add_list");
    init_with_shifts(&db_path);

    run(&db_path, &["shift", "list"])
        .assert()
        .success()
        .stdout(contains("2025-04-10"))
        .stdout(contains("2025-03-03"))
        .stdout(contains("$150.00"))
        .stdout(contains("3 shifts, 15.0h, $450.00 in tips"));
}

#[test]
fn test_shift_list_is_newest_first() {
    let db_path = setup_test_db("shift_list_order");
    init_with_shifts(&db_path);

    let out = run(&db_path, &["shift", "list"]).output().unwrap();
    let stdout = String::from_utf8_lossy(&out.stdout);

    let april = stdout.find("2025-04-10").unwrap();
    let march = stdout.find("2025-03-03").unwrap();
    assert!(april < march);
}

#[test]
fn test_shift_search_matches_position() {
    let db_path = setup_test_db("shift_search");
    init_with_shifts(&db_path);

    run(&db_path, &["shift", "list", "--search", "bartender"])
        .assert()
        .success()
        .stdout(contains("2025-03-04"))
        .stdout(contains("2025-03-03").not())
        .stdout(contains("1 shifts"));
}

#[test]
fn test_shift_add_rejects_negative_tips() {
    let db_path = setup_test_db("shift_negative");
    init_with_workplace(&db_path);

    run(
        &db_path,
        &[
            "shift", "add", "2025-03-03", "--workplace", WORKPLACE, "--position", "Server",
            "--hours", "5", "--cash=-10",
        ],
    )
    .assert()
    .failure()
    .stderr(contains("Invalid amount"));
}

#[test]
fn test_shift_add_unknown_workplace_fails() {
    let db_path = setup_test_db("shift_unknown_workplace");
    init_with_workplace(&db_path);

    run(
        &db_path,
        &["shift", "add", "2025-03-03", "--workplace", "Nowhere", "--position", "Server", "--hours", "5"],
    )
    .assert()
    .failure()
    .stderr(contains("Unknown workplace: Nowhere"));
}

#[test]
fn test_shift_edit_by_id_prefix() {
    let db_path = setup_test_db("shift_edit");
    init_with_workplace(&db_path);
    let id = add_shift(&db_path, "2025-03-03 18:00", "Server", "5", "100", "50");

    run(&db_path, &["shift", "edit", &id[..8], "--card", "80"])
        .assert()
        .success()
        .stdout(contains("updated"));

    run(&db_path, &["shift", "list"])
        .assert()
        .success()
        .stdout(contains("$180.00"));
}

/// Single exported row of the shift database, as JSON.
fn exported_shift(db_path: &str, name: &str) -> serde_json::Value {
    let out = temp_out(name, "json");
    run(db_path, &["export", "--format", "json", "--file", &out, "--force"])
        .assert()
        .success();
    let rows: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    rows[0].clone()
}

#[test]
fn test_shift_edit_keeps_workplace_and_position_consistent() {
    let db_path = setup_test_db("shift_edit_references");
    init_with_workplace(&db_path);
    run(&db_path, &["workplace", "add", "Red Lion", "--position", "Host:4"])
        .assert()
        .success();
    let id = add_shift(&db_path, "2025-03-03 18:00", "Server", "5", "100", "50");

    // the new position's wage replaces the Server wage
    run(&db_path, &["shift", "edit", &id, "--position", "Bartender"])
        .assert()
        .success();
    let row = exported_shift(&db_path, "shift_edit_references_1");
    assert_eq!(row["position"], "Bartender");
    assert_eq!(row["hourly_wage"].as_f64(), Some(5.0));

    run(&db_path, &["shift", "edit", &id, "--workplace", "Red Lion"])
        .assert()
        .failure()
        .stderr(contains("--position is required"));

    run(&db_path, &["shift", "edit", &id, "--position", "Host"])
        .assert()
        .failure()
        .stderr(contains("Unknown position"));

    let row = exported_shift(&db_path, "shift_edit_references_2");
    assert_eq!(row["workplace"], WORKPLACE);
    assert_eq!(row["position"], "Bartender");

    run(&db_path, &["shift", "edit", &id, "--workplace", "Red Lion", "--position", "Host"])
        .assert()
        .success();
    let row = exported_shift(&db_path, "shift_edit_references_3");
    assert_eq!(row["workplace"], "Red Lion");
    assert_eq!(row["position"], "Host");
    assert_eq!(row["hourly_wage"].as_f64(), Some(4.0));
}

#[test]
fn test_shift_delete_asks_for_confirmation() {
    let db_path = setup_test_db("shift_delete_confirm");
    init_with_workplace(&db_path);
    let id = add_shift(&db_path, "2025-03-03 18:00", "Server", "5", "100", "50");

    run(&db_path, &["shift", "del", &id])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled."));

    run(&db_path, &["shift", "list"])
        .assert()
        .success()
        .stdout(contains("1 shifts"));

    run(&db_path, &["shift", "del", &id])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("deleted"));

    run(&db_path, &["shift", "list"])
        .assert()
        .success()
        .stdout(contains("No shifts found."));
}

#[test]
fn test_deleted_workplace_keeps_shifts() {
    let db_path = setup_test_db("workplace_delete_keeps_shifts");
    init_with_shifts(&db_path);

    run(&db_path, &["workplace", "del", WORKPLACE, "--yes"])
        .assert()
        .success();

    run(&db_path, &["shift", "list"])
        .assert()
        .success()
        .stdout(contains("3 shifts"))
        .stdout(contains(WORKPLACE).not());
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("log_records");
    init_with_shifts(&db_path);

    run(&db_path, &["log", "--print"])
        .assert()
        .success()
        .stdout(contains("user_add"))
        .stdout(contains("workplace_add"))
        .stdout(contains("shift_add"));
}
