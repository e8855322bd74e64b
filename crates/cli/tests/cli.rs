use std::{
    fs::{self, File},
    path::Path,
    time::{Duration, SystemTime},
};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn dirlist() -> Command {
    let mut cmd = Command::cargo_bin("dirlist").expect("binary built");
    cmd.env_remove("DIRLIST_LOG_LEVEL").env_remove("LINES");
    cmd
}

fn touch(path: &Path, len: usize, secs: u64) {
    fs::write(path, vec![b'x'; len]).expect("write file");
    File::options()
        .write(true)
        .open(path)
        .expect("open")
        .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .expect("set mtime");
}

/// root/a.txt (100 bytes, early 2024) and root/sub/b.log (50 bytes, mid 2024).
fn sample_tree() -> TempDir {
    let tmp = tempfile::tempdir().expect("create temp dir");
    touch(&tmp.path().join("a.txt"), 100, 1_704_110_400);
    fs::create_dir(tmp.path().join("sub")).expect("mkdir");
    touch(&tmp.path().join("sub").join("b.log"), 50, 1_717_243_200);
    tmp
}

fn stdout_lines(out: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(out).lines().map(str::to_owned).collect()
}

#[test]
fn wildcard_limits_the_listing() {
    let tmp = sample_tree();

    let out = dirlist()
        .args(["-r", "-q", "-w", "*.txt"])
        .arg(tmp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let lines = stdout_lines(&out);
    assert_eq!(lines.len(), 1, "{lines:?}");
    assert!(lines[0].ends_with("a.txt"));
}

#[test]
fn recursive_listing_with_totals() {
    let tmp = sample_tree();

    dirlist()
        .args(["-r", "-t", "-w", "*"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("b.log"))
        .stdout(predicate::str::is_match(r"\s+2 Files\s+150  \(").expect("regex"));
}

#[test]
fn without_recursion_subdirectories_are_not_entered() {
    let tmp = sample_tree();

    dirlist()
        .arg("-q")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("b.log").not());
}

#[test]
fn totals_only_prints_no_rows() {
    let tmp = sample_tree();

    let out = dirlist()
        .args(["-r", "-T"])
        .arg(tmp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8_lossy(&out);
    assert!(!text.contains("a.txt"));
    assert!(text.contains("2 Files"));
}

#[test]
fn size_bounds_are_inclusive() {
    let tmp = sample_tree();

    dirlist()
        .args(["-r", "-q", "-l", "50", "-s", "50"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("b.log"))
        .stdout(predicate::str::contains("a.txt").not());
}

#[test]
fn date_bounds_filter_rows() {
    let tmp = sample_tree();

    dirlist()
        .args(["-r", "-q", "-a", "3/1/2024"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("b.log"))
        .stdout(predicate::str::contains("a.txt").not());
}

#[test]
fn directories_are_listed_on_request() {
    let tmp = sample_tree();

    dirlist()
        .arg("-d")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("<Directory>"));

    dirlist()
        .args(["-o", "-q"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("sub"))
        .stdout(predicate::str::contains("a.txt").not());
}

#[test]
fn csv_quotes_awkward_paths() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    fs::write(tmp.path().join("a,b.txt"), b"1").expect("write file");

    dirlist()
        .args(["-c", "-q"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\"").and(predicate::str::contains("a,b.txt\"")));
}

#[test]
fn json_rows_parse() {
    let tmp = sample_tree();

    let out = dirlist()
        .args(["-r", "--json", "-t", "-n"])
        .arg(tmp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let values: Vec<serde_json::Value> = stdout_lines(&out)
        .iter()
        .map(|l| serde_json::from_str(l).expect("valid json"))
        .collect();
    assert_eq!(values.len(), 3);
    assert_eq!(values[2]["type"], "summary");
    assert_eq!(values[2]["files"], 2);
    assert_eq!(values[2]["bytes"], 150);
    assert_eq!(values[2]["lines"], 0);
}

#[test]
fn invalid_date_exits_2() {
    dirlist()
        .args(["-a", "13/45"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid date"));
}

#[test]
fn invalid_wildcard_exits_4() {
    dirlist().args(["-w", "src/*.rs"]).assert().code(4);
}

#[test]
fn usage_errors_exit_5() {
    dirlist().arg("--no-such-flag").assert().code(5);
    dirlist().args(["-l", "lots"]).assert().code(5);
}

#[test]
fn help_and_version_succeed() {
    dirlist()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--wildcards"));
    dirlist().arg("--version").assert().success();
}

#[test]
fn delete_all_removes_every_match() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    for name in ["one.tmp", "two.tmp", "three.tmp"] {
        fs::write(tmp.path().join(name), b"x").expect("write file");
    }
    fs::write(tmp.path().join("keep.txt"), b"x").expect("write file");

    dirlist()
        .args(["-k", "-w", "*.tmp"])
        .arg(tmp.path())
        .write_stdin("A\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Delete? [ynAq?]").count(1));

    for name in ["one.tmp", "two.tmp", "three.tmp"] {
        assert!(!tmp.path().join(name).exists(), "{name}");
    }
    assert!(tmp.path().join("keep.txt").exists());
}

#[test]
fn quitting_the_delete_prompt_exits_3() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    for name in ["one.tmp", "two.tmp"] {
        fs::write(tmp.path().join(name), b"x").expect("write file");
    }

    dirlist()
        .arg("-k")
        .arg(tmp.path())
        .write_stdin("q\n")
        .assert()
        .code(3);

    assert!(tmp.path().join("one.tmp").exists());
    assert!(tmp.path().join("two.tmp").exists());
}

#[test]
fn quitting_the_pager_exits_3() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    for i in 0..10 {
        fs::write(tmp.path().join(format!("f{i}")), b"x").expect("write file");
    }

    dirlist()
        .args(["-p", "-q"])
        .arg(tmp.path())
        .env("LINES", "4")
        .write_stdin("q\n")
        .assert()
        .code(3)
        .stdout(predicate::str::contains("--More--"));
}

#[cfg(unix)]
#[test]
fn exec_hook_runs_per_file() {
    let tmp = sample_tree();
    let log = tempfile::NamedTempFile::new().expect("temp file");

    dirlist()
        .args(["-r", "-q", "-m"])
        .arg(format!("echo >> {}", log.path().display()))
        .arg(tmp.path())
        .assert()
        .success();

    let written = fs::read_to_string(log.path()).expect("read log");
    assert_eq!(written.lines().count(), 2, "{written:?}");
}
