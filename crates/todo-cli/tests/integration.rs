#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn todo(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("todo").unwrap();
    cmd.current_dir(dir.path())
        .env("TODO_ROOT", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

// ---------------------------------------------------------------------------
// todo repl
// ---------------------------------------------------------------------------

#[test]
fn repl_add_complete_list() {
    let dir = TempDir::new().unwrap();
    todo(&dir)
        .arg("repl")
        .write_stdin("add \"Buy milk\" <urgent> <home>\nadd Call mom\ncomplete 2\nlist\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added task 1: Buy milk"))
        .stdout(predicate::str::contains("  1. [ ] Buy milk <home> <urgent>"))
        .stdout(predicate::str::contains("  2. [x] Call mom"))
        .stdout(predicate::str::contains("Session ended: 1/2 completed"));
}

#[test]
fn repl_is_the_default_command() {
    let dir = TempDir::new().unwrap();
    todo(&dir)
        .write_stdin("exit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("todo [main menu]> Goodbye."));
}

#[test]
fn repl_delete_asks_for_confirmation() {
    let dir = TempDir::new().unwrap();
    todo(&dir)
        .write_stdin("add \"Buy milk\"\ndelete 1\nyes\nlist\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Delete task 'Buy milk'?"))
        .stdout(predicate::str::contains("todo [confirm]> Deleted task: Buy milk"))
        .stdout(predicate::str::contains("No tasks yet"));
}

#[test]
fn repl_respects_confirm_delete_setting() {
    let dir = TempDir::new().unwrap();
    todo(&dir).args(["config", "set", "confirm_delete", "false"]).assert().success();
    todo(&dir)
        .write_stdin("add \"Buy milk\"\ndelete 1\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("todo [main menu]> Deleted task: Buy milk"))
        .stdout(predicate::str::contains("todo [confirm]>").not());
}

#[test]
fn repl_errors_do_not_end_the_session() {
    let dir = TempDir::new().unwrap();
    todo(&dir)
        .write_stdin("add <>\nfrobnicate\ncomplete 4\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("error: empty tag"))
        .stdout(predicate::str::contains("error: unknown command 'frobnicate'"))
        .stdout(predicate::str::contains("error: no task at position 4"))
        .stdout(predicate::str::contains("Goodbye."));
}

#[test]
fn repl_update_flow() {
    let dir = TempDir::new().unwrap();
    todo(&dir)
        .write_stdin("add \"Buy milk\"\nupdate 1\n\"Buy oat milk\" \"2 litres\"\nlist\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Editing task: Buy milk"))
        .stdout(predicate::str::contains("todo [update task]> Updated task: Buy oat milk"))
        .stdout(predicate::str::contains("        2 litres"));
}

#[test]
fn repl_ambiguous_title_lists_candidates() {
    let dir = TempDir::new().unwrap();
    todo(&dir)
        .write_stdin("add \"Buy milk\"\nadd \"buy milk\"\ncomplete \"Buy milk\"\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("matches 2 tasks"));
}

// ---------------------------------------------------------------------------
// todo parse / tokenize
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_command() {
    let dir = TempDir::new().unwrap();
    todo(&dir)
        .args(["parse", r#"add "Buy milk" <urgent> <home>"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("verb:        add"))
        .stdout(predicate::str::contains("tags:        home, urgent"));
}

#[test]
fn parse_json_distinguishes_cleared_from_omitted() {
    let dir = TempDir::new().unwrap();
    let cleared = todo(&dir)
        .args(["--json", "parse", r#"update 1 """#])
        .output()
        .unwrap();
    let cleared: serde_json::Value = serde_json::from_slice(&cleared.stdout).unwrap();
    assert_eq!(cleared["title"]["edit"], "cleared");

    let omitted = todo(&dir)
        .args(["--json", "parse", "update", "1"])
        .output()
        .unwrap();
    let omitted: serde_json::Value = serde_json::from_slice(&omitted.stdout).unwrap();
    assert_eq!(omitted["title"]["edit"], "omitted");
    assert_eq!(omitted["identifier"], "1");

    let split = todo(&dir)
        .args(["--json", "parse", "update", "1", ""])
        .output()
        .unwrap();
    let split: serde_json::Value = serde_json::from_slice(&split.stdout).unwrap();
    assert_eq!(split["title"]["edit"], "cleared");
}

#[test]
fn parse_error_shows_usage() {
    let dir = TempDir::new().unwrap();
    todo(&dir)
        .args(["parse", "add"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("usage: add \"Buy milk\""));
}

#[test]
fn tokenize_lists_tokens() {
    let dir = TempDir::new().unwrap();
    todo(&dir)
        .args(["tokenize", r#"add 'Buy milk' <home>"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("quoted_string"))
        .stdout(predicate::str::contains("\"Buy milk\""))
        .stdout(predicate::str::contains("tag"));
}

#[test]
fn tokenize_unterminated_tag_fails() {
    let dir = TempDir::new().unwrap();
    todo(&dir)
        .args(["tokenize", "add x <home"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unterminated tag"));
}

// ---------------------------------------------------------------------------
// todo states
// ---------------------------------------------------------------------------

#[test]
fn states_table() {
    let dir = TempDir::new().unwrap();
    todo(&dir)
        .arg("states")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "adding_task, updating_task, deleting_task, exiting",
        ))
        .stdout(predicate::str::contains("(terminal)"));
}

#[test]
fn states_json() {
    let dir = TempDir::new().unwrap();
    let output = todo(&dir).args(["states", "--json"]).output().unwrap();
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0]["state"], "main_menu");
    assert_eq!(rows[5]["transitions"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// todo init / config
// ---------------------------------------------------------------------------

#[test]
fn init_writes_default_config_once() {
    let dir = TempDir::new().unwrap();
    todo(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));
    assert!(dir.path().join(".todo/config.yaml").exists());

    todo(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));
}

#[test]
fn config_validate_requires_init() {
    let dir = TempDir::new().unwrap();
    todo(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("todo init"));

    todo(&dir).arg("init").assert().success();
    todo(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No warnings"));
}

#[test]
fn config_set_and_show() {
    let dir = TempDir::new().unwrap();
    todo(&dir).args(["config", "set", "prompt", "tasks"]).assert().success();
    todo(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prompt: tasks"));
    todo(&dir)
        .write_stdin("exit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("tasks [main menu]> "));
}

#[test]
fn config_set_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    todo(&dir)
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown config key"));
}
