//! Integration tests for the `tb` CLI.
//!
//! Each test creates a temp data directory, runs `tb` as a subprocess,
//! and verifies stdout and/or the persisted storage file.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Get the path to the built `tb` binary.
fn tb_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tb");
    path
}

/// Run `tb` against `dir`, returning (stdout, stderr, success).
fn run_tb(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(tb_bin())
        .arg("-C")
        .arg(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run tb");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `tb` expecting success, return stdout.
fn run_tb_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tb(dir, args);
    if !success {
        panic!(
            "tb {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Run `tb` expecting failure, return stderr.
fn run_tb_err(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tb(dir, args);
    if success {
        panic!("tb {:?} unexpectedly succeeded:\nstdout: {}", args, stdout);
    }
    stderr
}

/// Add a task and return its id
fn add_task(dir: &Path, column: &str, title: &str, extra: &[&str]) -> String {
    let mut args = vec!["add", column, title];
    args.extend_from_slice(extra);
    run_tb_ok(dir, &args).trim().to_string()
}

/// Decode the board stored under `key` in `file`. Values are JSON strings.
fn read_board_from(dir: &Path, file: &str, key: &str) -> serde_json::Value {
    let text = fs::read_to_string(dir.join(file)).unwrap();
    let entries: serde_json::Value = serde_json::from_str(&text).unwrap();
    serde_json::from_str(entries[key].as_str().unwrap()).unwrap()
}

fn read_board(dir: &Path) -> serde_json::Value {
    read_board_from(dir, "storage.json", "taskboard")
}

// ---------------------------------------------------------------------------
// Read command tests
// ---------------------------------------------------------------------------

#[test]
fn test_progress_on_fresh_board() {
    let tmp = TempDir::new().unwrap();
    let out = run_tb_ok(tmp.path(), &["progress"]);
    assert_eq!(
        out,
        "Backlog      0/0 0%\nIn Progress  0/0 0%\nDone         0/0 0%\nOverall      0/0 0%\n"
    );
}

#[test]
fn test_show_lists_tasks_with_meta() {
    let tmp = TempDir::new().unwrap();
    let id = add_task(
        tmp.path(),
        "backlog",
        "Design schema",
        &["--desc", "Tables and indexes", "--tags", "db, design", "--due", "2025-03-01"],
    );
    let out = run_tb_ok(tmp.path(), &["show", "Backlog"]);
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with("== Backlog ("));
    assert!(lines[0].ends_with("== 0/1 0%"));
    assert_eq!(
        lines[1],
        format!("  [ ] {} Design schema #db #design (due 2025-03-01)", id)
    );
    assert_eq!(lines[2], "      Tables and indexes");
}

#[test]
fn test_show_json() {
    let tmp = TempDir::new().unwrap();
    add_task(tmp.path(), "Backlog", "Write docs", &[]);
    let out = run_tb_ok(tmp.path(), &["show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["theme"], "dark");
    assert_eq!(json["columns"].as_array().unwrap().len(), 3);
    assert_eq!(json["columns"][0]["tasks"][0]["title"], "Write docs");
    assert_eq!(json["overall"]["total"], 1);
}

#[test]
fn test_show_unknown_column() {
    let tmp = TempDir::new().unwrap();
    let stderr = run_tb_err(tmp.path(), &["show", "Someday"]);
    assert!(stderr.contains("column not found: Someday"));
}

// ---------------------------------------------------------------------------
// Task command tests
// ---------------------------------------------------------------------------

#[test]
fn test_add_persists_board() {
    let tmp = TempDir::new().unwrap();
    let id = add_task(tmp.path(), "In Progress", "Fix login", &[]);
    assert_eq!(id.len(), 8);

    let board = read_board(tmp.path());
    assert_eq!(board["tasks"][&id]["title"], "Fix login");
    assert_eq!(board["columns"][1]["taskIds"][0], id.as_str());
}

#[test]
fn test_add_requires_title() {
    let tmp = TempDir::new().unwrap();
    let stderr = run_tb_err(tmp.path(), &["add", "Backlog", "   "]);
    assert!(stderr.contains("Title is required"));
    assert!(!tmp.path().join("storage.json").exists());
}

#[test]
fn test_add_rejects_bad_due_date() {
    let tmp = TempDir::new().unwrap();
    let stderr = run_tb_err(tmp.path(), &["add", "Backlog", "Ship", "--due", "soon"]);
    assert!(stderr.contains("invalid due date 'soon'"));
}

#[test]
fn test_mv_into_done_completes_and_back_reopens() {
    let tmp = TempDir::new().unwrap();
    let id = add_task(tmp.path(), "Backlog", "Ship it", &[]);
    add_task(tmp.path(), "Backlog", "Other", &[]);

    let out = run_tb_ok(tmp.path(), &["mv", &id, "done"]);
    assert_eq!(out, format!("{} → Done (completed)\n", id));

    let out = run_tb_ok(tmp.path(), &["progress"]);
    assert!(out.contains("Done         1/1 100%"));
    assert!(out.contains("Overall      1/2 50%"));

    let out = run_tb_ok(tmp.path(), &["mv", &id, "Backlog"]);
    assert_eq!(out, format!("{} → Backlog\n", id));
    let board = read_board(tmp.path());
    assert_eq!(board["tasks"][&id]["completed"], false);
}

#[test]
fn test_mv_reorders_within_column() {
    let tmp = TempDir::new().unwrap();
    let a = add_task(tmp.path(), "Backlog", "A", &[]);
    let b = add_task(tmp.path(), "Backlog", "B", &[]);
    let c = add_task(tmp.path(), "Backlog", "C", &[]);

    run_tb_ok(tmp.path(), &["mv", &c, "Backlog", "--index", "0"]);
    let board = read_board(tmp.path());
    let order: Vec<&str> = board["columns"][0]["taskIds"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(order, vec![c.as_str(), a.as_str(), b.as_str()]);
}

#[test]
fn test_edit_updates_fields() {
    let tmp = TempDir::new().unwrap();
    let id = add_task(tmp.path(), "Backlog", "Draft", &["--tags", "old"]);
    let out = run_tb_ok(
        tmp.path(),
        &["edit", &id, "--title", "Final", "--tags", ""],
    );
    assert_eq!(out, format!("{} updated\n", id));

    let board = read_board(tmp.path());
    let task = &board["tasks"][&id];
    assert_eq!(task["title"], "Final");
    assert_eq!(task["tags"].as_array().unwrap().len(), 0);
}

#[test]
fn test_rm_needs_yes() {
    let tmp = TempDir::new().unwrap();
    let id = add_task(tmp.path(), "Backlog", "Temp", &[]);

    let stderr = run_tb_err(tmp.path(), &["rm", &id]);
    assert!(stderr.contains("refusing to delete a task without --yes"));

    let out = run_tb_ok(tmp.path(), &["rm", &id, "--yes"]);
    assert_eq!(out, format!("{} deleted\n", id));
    let board = read_board(tmp.path());
    assert!(board["tasks"].get(&id).is_none());
}

#[test]
fn test_rm_unknown_task() {
    let tmp = TempDir::new().unwrap();
    let stderr = run_tb_err(tmp.path(), &["rm", "nope", "--yes"]);
    assert!(stderr.contains("task not found: nope"));
}

// ---------------------------------------------------------------------------
// Board command tests
// ---------------------------------------------------------------------------

#[test]
fn test_column_lifecycle() {
    let tmp = TempDir::new().unwrap();
    let id = run_tb_ok(tmp.path(), &["column", "add"]).trim().to_string();

    let out = run_tb_ok(tmp.path(), &["column", "rename", &id, "  Review  "]);
    assert_eq!(out, format!("{} renamed to Review\n", id));

    let out = run_tb_ok(tmp.path(), &["column", "mv", "Review", "0"]);
    assert_eq!(out, format!("{} moved to position 0\n", id));

    add_task(tmp.path(), "Review", "Check PR", &[]);
    run_tb_err(tmp.path(), &["column", "rm", "Review"]);
    let out = run_tb_ok(tmp.path(), &["column", "rm", "Review", "-y"]);
    assert_eq!(out, format!("{} deleted (1 tasks)\n", id));

    let board = read_board(tmp.path());
    assert_eq!(board["columns"].as_array().unwrap().len(), 3);
    assert_eq!(board["tasks"].as_object().unwrap().len(), 0);
}

#[test]
fn test_theme_toggle_and_set() {
    let tmp = TempDir::new().unwrap();
    assert_eq!(run_tb_ok(tmp.path(), &["theme"]), "light\n");
    assert_eq!(run_tb_ok(tmp.path(), &["theme"]), "dark\n");
    assert_eq!(run_tb_ok(tmp.path(), &["theme", "light"]), "light\n");
    let stderr = run_tb_err(tmp.path(), &["theme", "sepia"]);
    assert!(stderr.contains("unknown theme 'sepia'"));
}

#[test]
fn test_reset() {
    let tmp = TempDir::new().unwrap();
    add_task(tmp.path(), "Backlog", "Gone soon", &[]);
    run_tb_ok(tmp.path(), &["column", "add", "Extra"]);

    run_tb_err(tmp.path(), &["reset"]);
    assert_eq!(run_tb_ok(tmp.path(), &["reset", "--yes"]), "board reset\n");

    let out = run_tb_ok(tmp.path(), &["progress"]);
    assert!(out.ends_with("Overall      0/0 0%\n"));
    assert_eq!(out.lines().count(), 4);
}

// ---------------------------------------------------------------------------
// Config tests
// ---------------------------------------------------------------------------

#[test]
fn test_config_storage_key_and_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[storage]\nkey = \"work\"\nfile = \"boards.json\"\n",
    )
    .unwrap();
    let id = add_task(tmp.path(), "Backlog", "Configured", &[]);

    let board = read_board_from(tmp.path(), "boards.json", "work");
    assert_eq!(board["tasks"][&id]["title"], "Configured");
}

#[test]
fn test_corrupt_storage_falls_back_to_default_board() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("storage.json"), "{ not json").unwrap();
    let out = run_tb_ok(tmp.path(), &["progress"]);
    assert_eq!(out.lines().count(), 4);
}
