use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use treasure_manager::model::NewTreasure;
use treasure_manager::store::record::{RecordStore, MAX_TREASURES};

fn cmd(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("treasure_manager").unwrap();
    cmd.arg("--root").arg(root).env("NO_COLOR", "1");
    cmd
}

fn add(root: &Path, hunt: &str, input: &str) -> assert_cmd::assert::Assert {
    cmd(root).args(["add", hunt]).write_stdin(input).assert()
}

#[test]
fn add_then_view_scenario() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    add(root, "1", "alice\n10.0\n20.0\nfind me\n500\n")
        .success()
        .stdout(predicate::str::contains(
            "Treasure added successfully with ID: 1",
        ));

    cmd(root)
        .args(["view", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Username: alice"))
        .stdout(predicate::str::contains("Location: 10.000000, 20.000000"))
        .stdout(predicate::str::contains("Clue: find me"))
        .stdout(predicate::str::contains("Value: 500"));

    cmd(root)
        .args(["view", "1", "2"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Treasure with ID 2 not found in hunt 1",
        ));
}

#[test]
fn list_shows_metadata_and_treasures() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    cmd(root)
        .args(["list", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No treasures found in hunt: 1"));

    add(root, "1", "alice\n1\n2\nunder the oak\n5\n").success();
    add(root, "1", "bob\n-3.25\n4\nby the well\n-7\n").success();

    let size = 4 + 2 * 1568;
    cmd(root)
        .args(["list", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hunt: 1"))
        .stdout(predicate::str::contains(format!("File size: {} bytes", size)))
        .stdout(predicate::str::contains("Last modified: "))
        .stdout(predicate::str::contains("ID: 2\nUsername: bob"))
        .stdout(predicate::str::contains("Location: -3.250000, 4.000000"));
}

#[test]
fn flags_skip_prompts() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    cmd(root)
        .args([
            "add",
            "x",
            "--username",
            "carol",
            "--latitude",
            "-1.5",
            "--longitude",
            "2.5",
            "--clue",
            "in the attic",
            "--value",
            "42",
        ])
        .assert()
        .success();

    let bytes = fs::read(root.join("hunt/huntx/treasures.dat")).unwrap();
    let store = RecordStore::decode("x", &bytes).unwrap();
    assert_eq!(store.treasures()[0].username, "carol");
    assert_eq!(store.treasures()[0].latitude, -1.5);
}

#[test]
fn every_operation_appends_one_log_line() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let log_path = root.join("hunt/hunt1/logged_hunt.txt");
    let lines = || fs::read_to_string(&log_path).unwrap().lines().count();

    add(root, "1", "alice\n10\n20\nfind me\n500\n").success();
    assert_eq!(lines(), 1);
    cmd(root).args(["list", "1"]).assert().success();
    assert_eq!(lines(), 2);
    cmd(root).args(["view", "1", "1"]).assert().success();
    assert_eq!(lines(), 3);
    cmd(root).args(["view", "1", "7"]).assert().code(1);
    assert_eq!(lines(), 4);

    let log = fs::read_to_string(&log_path).unwrap();
    for (line, tag) in log.lines().zip(["ADD", "LIST", "VIEW", "VIEW"]) {
        assert!(line.starts_with('['), "no timestamp: {}", line);
        assert!(line.contains(&format!("] {}: ", tag)), "bad tag: {}", line);
    }

    cmd(root)
        .args(["log", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to view treasure ID: 7 (not found)"));
}

#[test]
fn combined_log_covers_all_hunts() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    add(root, "A", "alice\n1\n1\nclue a\n1\n").success();
    add(root, "B", "bob\n2\n2\nclue b\n2\n").success();

    let combined = fs::read_to_string(root.join("hunt_log.txt")).unwrap();
    assert!(combined.contains("=== Log for Hunt: huntA ==="));
    assert!(combined.contains("=== Log for Hunt: huntB ==="));
    assert!(combined.contains("Added treasure ID: 1, Username: alice, Value: 1"));
    assert!(combined.contains("Added treasure ID: 1, Username: bob, Value: 2"));
    // default merge rewrites instead of appending
    assert_eq!(combined.matches("=== Log for Hunt: huntA ===").count(), 1);

    fs::remove_file(root.join("hunt_log.txt")).unwrap();
    cmd(root)
        .arg("merge-logs")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hunt logs merged successfully (2 hunts)"));
    assert!(root.join("hunt_log.txt").exists());
}

#[test]
fn full_hunt_rejects_add() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    let mut store = RecordStore::new("full");
    for i in 0..MAX_TREASURES {
        store
            .append(NewTreasure::new(format!("u{}", i), 0.0, 0.0, "c", 1))
            .unwrap();
    }
    fs::create_dir_all(root.join("hunt/huntfull")).unwrap();
    fs::write(root.join("hunt/huntfull/treasures.dat"), store.encode()).unwrap();

    add(root, "full", "late\n0\n0\nc\n1\n")
        .code(1)
        .stdout(predicate::str::contains(
            "Error: Maximum number of treasures reached",
        ));

    let log = fs::read_to_string(root.join("hunt/huntfull/logged_hunt.txt")).unwrap();
    assert!(log.contains("ADD: Failed: Maximum number of treasures reached"));
}

#[test]
fn corrupt_store_is_an_error() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("hunt/huntbad")).unwrap();
    fs::write(root.join("hunt/huntbad/treasures.dat"), 5i32.to_le_bytes()).unwrap();

    cmd(root)
        .args(["list", "bad"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Corrupt treasure store"));
}

#[test]
fn long_hunt_id_is_rejected() {
    let temp = TempDir::new().unwrap();
    let long = "h".repeat(600);

    cmd(temp.path())
        .args(["list", &long])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Path too long"));
}

#[test]
fn usage_errors_exit_non_zero() {
    let temp = TempDir::new().unwrap();
    cmd(temp.path()).assert().code(2);
    cmd(temp.path()).args(["dig", "1"]).assert().code(2);
    cmd(temp.path()).args(["view", "1"]).assert().code(2);

    // stdin closed before all fields were given
    add(temp.path(), "1", "alice\n").code(2);
    assert!(!temp.path().join("hunt/hunt1/treasures.dat").exists());
}
