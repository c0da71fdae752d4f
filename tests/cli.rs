//! End-to-end tests for the `babylog` binary.
//!
//! stdout is a pipe under the test harness, so every command answers in JSON.

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn cmd(&self, db: &str) -> Command {
        let mut cmd = Command::cargo_bin("babylog").unwrap();
        cmd.env("BABYLOG_DB", self.path(db))
            .env("BABYLOG_REPORTS", self.path("reports"))
            .env_remove("BABYLOG_TEST_DB")
            .env_remove("BABYLOG_DEDUP_MINUTES")
            .env_remove("RUST_LOG");
        cmd
    }

    fn json(&self, db: &str, args: &[&str]) -> Value {
        let output = self.cmd(db).args(args).assert().success();
        serde_json::from_slice(&output.get_output().stdout).unwrap()
    }

    fn init(&self, db: &str) {
        self.cmd(db).arg("init").assert().success();
    }

    /// A database with one profile and one record of every kind.
    fn seeded(&self, db: &str) -> i64 {
        self.init(db);
        let profile = self.json(
            db,
            &["profile", "add", "Alice", "--gender", "girl", "--birth-date", "2024-01-15"],
        );
        let id = profile["babyId"].as_i64().unwrap();
        let id_arg = id.to_string();

        self.json(
            db,
            &[
                "record", "feeding", "--profile", &id_arg, "--type", "formula",
                "--start", "2024-03-01 08:00", "--end", "2024-03-01 08:20", "--amount", "120",
            ],
        );
        self.json(
            db,
            &[
                "record", "sleep", "--profile", &id_arg,
                "--start", "2024-03-01 13:00", "--end", "2024-03-01 14:30",
            ],
        );
        self.json(
            db,
            &[
                "record", "event", "--profile", &id_arg, "--type", "temperature",
                "--time", "2024-03-01 18:00", "--extra", r#"{"value":37.9,"location":"ear"}"#,
            ],
        );
        self.json(
            db,
            &["record", "daily", "--profile", &id_arg, "--date", "2024-03-01", "--weight", "6.2"],
        );
        id
    }

    fn export(&self, db: &str) -> PathBuf {
        let out = self.path("exports");
        fs::create_dir_all(&out).unwrap();
        let result = self.json(db, &["backup", "export", "--out", out.to_str().unwrap()]);
        PathBuf::from(result["path"].as_str().unwrap())
    }
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

/// The structured error is the last line on stderr; log lines may precede it.
fn stderr_error(stderr: &[u8]) -> Value {
    let text = String::from_utf8_lossy(stderr);
    let line = text.lines().rev().find(|l| !l.trim().is_empty()).unwrap();
    serde_json::from_str(line).unwrap()
}

fn exit_code(cmd: &mut Command) -> i32 {
    cmd.output().unwrap().status.code().unwrap()
}

#[test]
fn version_reports_backup_format() {
    let env = Env::new();
    let out = env.json("a.db", &["version"]);
    assert_eq!(out["backup_format"], 1);
}

#[test]
fn commands_require_init() {
    let env = Env::new();
    assert_eq!(exit_code(env.cmd("missing.db").args(["profile", "list"])), 2);
}

#[test]
fn init_twice_needs_force() {
    let env = Env::new();
    env.init("a.db");
    assert_eq!(exit_code(env.cmd("a.db").arg("init")), 2);
    env.cmd("a.db").args(["init", "--force"]).assert().success();
}

#[test]
fn unknown_event_type_is_rejected() {
    let env = Env::new();
    let id = env.seeded("a.db").to_string();
    let code = exit_code(env.cmd("a.db").args([
        "record", "event", "--profile", &id, "--type", "temprature",
    ]));
    assert_eq!(code, 4);
}

#[test]
fn record_for_missing_profile_is_not_found() {
    let env = Env::new();
    env.init("a.db");
    let code = exit_code(env.cmd("a.db").args([
        "record", "sleep", "--profile", "42", "--start", "2024-03-01 13:00",
    ]));
    assert_eq!(code, 3);
}

#[test]
fn export_then_merge_into_fresh_database() {
    let env = Env::new();
    env.seeded("a.db");
    let backup = env.export("a.db");
    assert!(backup
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("babylog_backup_"));

    env.init("b.db");
    let out = env.json(
        "b.db",
        &["backup", "import", arg(&backup), "--mode", "merge", "--save-report"],
    );
    let report = &out["report"];
    assert_eq!(report["strategy"], "MERGE");
    assert_eq!(report["bucketMinutes"], 1);
    assert_eq!(report["profiles"]["inserted"], 1);
    assert_eq!(report["feedings"]["inserted"], 1);
    assert_eq!(report["sleeps"]["inserted"], 1);
    assert_eq!(report["events"]["inserted"], 1);
    assert_eq!(report["dailies"]["inserted"], 1);
    assert!(out["saved_report"]["id"]
        .as_str()
        .unwrap()
        .starts_with("import_report_"));

    // A second merge of the same file changes nothing.
    let again = env.json("b.db", &["backup", "import", arg(&backup), "--mode", "merge"]);
    let report = &again["report"];
    assert_eq!(report["profiles"]["inserted"], 0);
    assert_eq!(report["profiles"]["matched"], 1);
    assert_eq!(report["feedings"]["skipped"], 1);
    assert_eq!(report["sleeps"]["skipped"], 1);
    assert_eq!(report["events"]["skipped"], 1);
    assert_eq!(report["dailies"]["updated"], 1);
    assert!(again.get("saved_report").is_none());

    let profiles = env.json("b.db", &["profile", "list"]);
    assert_eq!(profiles["count"], 1);
}

#[test]
fn overwrite_replaces_local_data() {
    let env = Env::new();
    env.seeded("a.db");
    let backup = env.export("a.db");

    env.init("b.db");
    env.json("b.db", &["profile", "add", "Bob", "--birth-date", "2023-06-01"]);
    env.json("b.db", &["profile", "add", "Carol", "--birth-date", "2022-02-02"]);

    let out = env.json(
        "b.db",
        &["backup", "import", arg(&backup), "--mode", "overwrite"],
    );
    assert_eq!(out["report"]["strategy"], "OVERWRITE");
    assert_eq!(out["report"]["bucketMinutes"], 0);

    let profiles = env.json("b.db", &["profile", "list"]);
    assert_eq!(profiles["count"], 1);
    assert_eq!(profiles["profiles"][0]["name"], "Alice");
}

#[test]
fn preview_counts_without_importing() {
    let env = Env::new();
    env.seeded("a.db");
    let backup = env.export("a.db");

    let preview = env.json("a.db", &["backup", "preview", arg(&backup)]);
    assert_eq!(preview["version"], 1);
    assert_eq!(preview["counts"]["profiles"], 1);
    assert_eq!(preview["counts"]["feedings"], 1);
    assert_eq!(preview["counts"]["dailies"], 1);
}

#[test]
fn invalid_backups_exit_with_backup_code() {
    let env = Env::new();
    env.seeded("a.db");

    let garbage = env.path("garbage.json");
    fs::write(&garbage, "this is not json").unwrap();
    let code = exit_code(env.cmd("a.db").args(["backup", "import", arg(&garbage), "--mode", "merge"]));
    assert_eq!(code, 6);

    let future = env.path("future.json");
    fs::write(
        &future,
        r#"{"version":99,"createdAt":0,"data":{"babies":[{"babyId":1,"name":"X"}]}}"#,
    )
    .unwrap();
    let output = env
        .cmd("a.db")
        .args(["backup", "import", arg(&future), "--mode", "overwrite"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(6));
    let err = stderr_error(&output.stderr);
    assert_eq!(err["error"]["code"], "UNSUPPORTED_VERSION");

    // Rejected imports leave the store alone.
    let profiles = env.json("a.db", &["profile", "list"]);
    assert_eq!(profiles["count"], 1);
}

#[test]
fn empty_backup_is_rejected() {
    let env = Env::new();
    env.init("empty.db");
    let backup = env.export("empty.db");

    env.init("b.db");
    let output = env
        .cmd("b.db")
        .args(["backup", "import", arg(&backup), "--mode", "merge"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(6));
    let err = stderr_error(&output.stderr);
    assert_eq!(err["error"]["code"], "EMPTY_BACKUP");
}

#[test]
fn bucket_flag_is_validated() {
    let env = Env::new();
    env.seeded("a.db");
    let backup = env.export("a.db");

    env.init("b.db");
    let code = exit_code(env.cmd("b.db").args([
        "backup", "import", arg(&backup), "--mode", "merge", "--bucket", "3",
    ]));
    assert_eq!(code, 4);

    let out = env.json(
        "b.db",
        &["backup", "import", arg(&backup), "--mode", "merge", "--bucket", "10"],
    );
    assert_eq!(out["report"]["bucketMinutes"], 10);
}

#[test]
fn saved_reports_can_be_listed_shown_and_cleared() {
    let env = Env::new();
    env.seeded("a.db");
    let backup = env.export("a.db");
    env.init("b.db");

    let out = env.json(
        "b.db",
        &["backup", "import", arg(&backup), "--mode", "merge", "--save-report"],
    );
    let id = out["saved_report"]["id"].as_str().unwrap().to_string();

    let list = env.json("b.db", &["report", "list"]);
    assert_eq!(list["count"], 1);
    assert_eq!(list["reports"][0]["id"], id.as_str());

    let shown = env.json("b.db", &["report", "show", &id]);
    assert_eq!(shown["feedings"]["inserted"], 1);

    let raw_path = env.path("copy.json");
    env.json("b.db", &["report", "export", &id, "--out", arg(&raw_path)]);
    let raw: Value = serde_json::from_str(&fs::read_to_string(&raw_path).unwrap()).unwrap();
    assert_eq!(raw["strategy"], "MERGE");

    let cleared = env.json("b.db", &["report", "clear"]);
    assert_eq!(cleared["deleted"], 1);
    assert_eq!(env.json("b.db", &["report", "list"])["count"], 0);

    assert_eq!(exit_code(env.cmd("b.db").args(["report", "show", &id])), 3);
}

#[test]
fn report_ids_cannot_escape_the_directory() {
    let env = Env::new();
    let code = exit_code(env.cmd("a.db").args(["report", "delete", "../a"]));
    assert_eq!(code, 3);
}

#[test]
fn dedup_setting_round_trips() {
    let env = Env::new();
    env.init("a.db");

    let initial = env.json("a.db", &["config", "get"]);
    assert_eq!(initial["dedup_minutes"], 1);

    env.json("a.db", &["config", "set-dedup", "5"]);
    let updated = env.json("a.db", &["config", "get"]);
    assert_eq!(updated["dedup_minutes"], 5);

    assert_eq!(exit_code(env.cmd("a.db").args(["config", "set-dedup", "7"])), 4);
}

#[test]
fn dedup_env_override_wins_for_merge() {
    let env = Env::new();
    env.seeded("a.db");
    let backup = env.export("a.db");
    env.init("b.db");

    let output = env
        .cmd("b.db")
        .env("BABYLOG_DEDUP_MINUTES", "5")
        .args(["backup", "import", arg(&backup), "--mode", "merge"])
        .assert()
        .success();
    let out: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(out["report"]["bucketMinutes"], 5);
}
