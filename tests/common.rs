#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const EMAIL: &str = "sam@example.com";
pub const WORKPLACE: &str = "Blue Note";

pub fn tip() -> Command {
    cargo_bin_cmd!("tiplogger")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_tiplogger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_tiplogger_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `tiplogger --db <db> --test <args...>`
pub fn run(db_path: &str, args: &[&str]) -> Command {
    let mut cmd = tip();
    cmd.args(["--db", db_path, "--test"]).args(args);
    cmd
}

/// Fresh database with one user and one workplace (Server at 7.25/h, Bartender at 5.00/h).
pub fn init_with_workplace(db_path: &str) {
    run(db_path, &["init"]).assert().success();
    run(db_path, &["user", "add", EMAIL, "--name", "Sam"])
        .assert()
        .success();
    run(
        db_path,
        &[
            "workplace",
            "add",
            WORKPLACE,
            "--location",
            "Main St",
            "--position",
            "Server:7.25",
            "--position",
            "Bartender:5",
        ],
    )
    .assert()
    .success();
}

/// Record a shift and return its id.
pub fn add_shift(db_path: &str, date: &str, position: &str, hours: &str, cash: &str, card: &str) -> String {
    let out = run(
        db_path,
        &[
            "shift",
            "add",
            date,
            "--workplace",
            WORKPLACE,
            "--position",
            position,
            "--hours",
            hours,
            "--cash",
            cash,
            "--card",
            card,
        ],
    )
    .output()
    .expect("run shift add");
    assert!(out.status.success(), "shift add failed: {:?}", out);

    let stdout = String::from_utf8_lossy(&out.stdout);
    stdout
        .split("Shift added: ")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .expect("shift id in output")
        .to_string()
}

/// Two shifts in the week of Sunday 2025-03-02 and one in April.
pub fn init_with_shifts(db_path: &str) {
    init_with_workplace(db_path);
    add_shift(db_path, "2025-03-03 18:00", "Server", "5", "100", "50");
    add_shift(db_path, "2025-03-04 18:00", "Bartender", "4", "60", "0");
    add_shift(db_path, "2025-04-10 12:00", "Server", "6", "20", "220");
}
