use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::prelude::*;
use tempfile::TempDir;

fn roster(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("roster").unwrap();
    cmd.env("ROSTER_HOME", home.path())
        .env_remove("ROSTER_CONNECTION")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn add_matti(home: &TempDir) {
    roster(home)
        .args([
            "add",
            "--first-name",
            "Matti",
            "--last-name",
            "Meikäläinen",
            "--postal-code",
            "00100",
            "--email",
            "matti@example.fi",
            "--start",
            "2024-03-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Member added: Matti Meikäläinen"));
}

#[test]
fn empty_roster_lists_nothing() {
    let home = TempDir::new().unwrap();
    roster(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("No members found."));
}

#[test]
fn add_update_delete_lifecycle() {
    let home = TempDir::new().unwrap();
    add_matti(&home);

    roster(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Meikäläinen"))
        .stdout(predicate::str::contains("00100"))
        .stdout(predicate::str::contains("2024-03-01"));

    roster(&home)
        .args(["update", "1", "--last-name", "Virtanen"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Member updated: Matti Virtanen"));

    roster(&home)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Matti Virtanen"))
        .stdout(predicate::str::contains("matti@example.fi"));

    roster(&home)
        .args(["delete", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Member deleted: Matti Virtanen"));

    roster(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No members found."));
}

#[test]
fn invalid_postal_code_is_rejected() {
    let home = TempDir::new().unwrap();
    roster(&home)
        .args([
            "add",
            "--first-name",
            "Matti",
            "--last-name",
            "Meikäläinen",
            "--postal-code",
            "123",
            "--email",
            "matti@example.fi",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid postal code."));

    roster(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("No members found."));
}

#[test]
fn first_validation_failure_is_reported_by_default() {
    let home = TempDir::new().unwrap();
    roster(&home)
        .args(["add", "--postal-code", "abcde"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("First name missing."))
        .stderr(predicate::str::contains("Invalid postal code.").not());
}

#[test]
fn report_all_errors_lists_every_failure() {
    let home = TempDir::new().unwrap();
    roster(&home)
        .args(["config", "report-all-errors", "true"])
        .assert()
        .success();

    roster(&home)
        .args(["add", "--postal-code", "abcde"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "First name missing. Last name missing. Invalid postal code. Invalid email.",
        ));
}

#[test]
fn delete_declined_keeps_member() {
    let home = TempDir::new().unwrap();
    add_matti(&home);

    roster(&home)
        .args(["delete", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Delete the selected member? [y/N]"))
        .stdout(predicate::str::contains("Member deleted").not());

    roster(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Meikäläinen"));
}

#[test]
fn delete_confirmed_on_stdin() {
    let home = TempDir::new().unwrap();
    add_matti(&home);

    roster(&home)
        .args(["rm", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Member deleted: Matti Meikäläinen"));
}

#[test]
fn update_unknown_row_fails() {
    let home = TempDir::new().unwrap();
    roster(&home)
        .args(["update", "3", "--first-name", "Eero"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Row 3 not found"));
}

#[test]
fn unsupported_connection_fails() {
    let home = TempDir::new().unwrap();
    roster(&home)
        .args(["list", "--connection", "mongodb://localhost:27017"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Connection failed"));
}

#[test]
fn unreadable_collection_fails_at_startup() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join("data/MemberDatabaseDb/members.json")).unwrap();

    roster(&home)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Connection failed"));
}

#[test]
fn explicit_file_connection_persists_between_runs() {
    let home = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let connection = format!("file://{}", data.path().display());

    roster(&home)
        .args([
            "add",
            "--connection",
            &connection,
            "--first-name",
            "Aino",
            "--last-name",
            "Aalto",
            "--postal-code",
            "00200",
            "--email",
            "aino@example.fi",
        ])
        .assert()
        .success();

    assert!(data
        .path()
        .join("MemberDatabaseDb")
        .join("members.json")
        .exists());

    roster(&home)
        .args(["list", "--connection", &connection])
        .assert()
        .success()
        .stdout(predicate::str::contains("Aalto"));

    // The default store under ROSTER_HOME never saw the insert.
    roster(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("No members found."));
}

#[test]
fn memory_connection_forgets_between_runs() {
    let home = TempDir::new().unwrap();
    roster(&home)
        .env("ROSTER_CONNECTION", "memory://")
        .args([
            "add",
            "--first-name",
            "Aino",
            "--last-name",
            "Aalto",
            "--postal-code",
            "00200",
            "--email",
            "aino@example.fi",
        ])
        .assert()
        .success();

    roster(&home)
        .env("ROSTER_CONNECTION", "memory://")
        .assert()
        .success()
        .stdout(predicate::str::contains("No members found."));
}

#[test]
fn config_set_and_get() {
    let home = TempDir::new().unwrap();
    roster(&home)
        .args(["config", "collection", "volunteers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("collection = volunteers"));

    roster(&home)
        .args(["config", "collection"])
        .assert()
        .success()
        .stdout(predicate::str::diff("volunteers\n"));

    roster(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("database = MemberDatabaseDb"))
        .stdout(predicate::str::contains("(default)"));

    roster(&home)
        .args(["config", "colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown key"));
}

#[test]
fn shell_session_adds_and_lists() {
    let home = TempDir::new().unwrap();
    roster(&home)
        .arg("shell")
        .write_stdin(
            "set first-name Matti\n\
             set last-name Meikäläinen\n\
             set postal-code 123\n\
             add\n\
             set postal-code 00100\n\
             set email matti@example.fi\n\
             add\n\
             quit\n",
        )
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid postal code."))
        .stdout(predicate::str::contains("Member added: Matti Meikäläinen"));

    roster(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Meikäläinen"));
}

#[test]
fn shell_without_connection_only_helps() {
    let home = TempDir::new().unwrap();
    roster(&home)
        .args(["shell", "--connection", "mongodb://nowhere"])
        .write_stdin("list\nhelp\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Connection failed"))
        .stderr(predicate::str::contains("Not connected."))
        .stdout(predicate::str::contains("Commands:"));
}
