use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

#[test]
fn script_mode_records_and_totals_a_delivery() {
    let home = tempdir().unwrap();
    let input = "add 1.5\nsave\nmonth\nshare\nexit\n";

    let mut cmd = Command::cargo_bin("milkbook_cli").unwrap();
    cmd.env("MILKBOOK_CLI_SCRIPT", "1")
        .env("MILKBOOK_HOME", home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Saved!"))
        .stdout(contains("Total milk: 1.5 L"))
        .stdout(contains("Sent from Milkbook"));

    let snapshot = std::fs::read_to_string(home.path().join("snapshot.json")).unwrap();
    assert!(snapshot.contains("1.5"));
    assert!(snapshot.contains("voiceEnabled"));
}

#[test]
fn script_mode_saves_settings() {
    let home = tempdir().unwrap();
    let input = "settings\nrate 75\nvoice off\napply\nexit\n";

    let mut cmd = Command::cargo_bin("milkbook_cli").unwrap();
    cmd.env("MILKBOOK_CLI_SCRIPT", "1")
        .env("MILKBOOK_HOME", home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Settings saved"));

    let snapshot = std::fs::read_to_string(home.path().join("snapshot.json")).unwrap();
    assert!(snapshot.contains("\"rate\": 75"));
    assert!(snapshot.contains("\"voiceEnabled\": false"));
}

#[test]
fn script_mode_rejects_unknown_commands_gracefully() {
    let home = tempdir().unwrap();
    let input = "frobnicate\nexit\n";

    let mut cmd = Command::cargo_bin("milkbook_cli").unwrap();
    cmd.env("MILKBOOK_CLI_SCRIPT", "1")
        .env("MILKBOOK_HOME", home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Unknown command"));
}
