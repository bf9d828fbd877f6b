use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const AFF: &str = "SET UTF-8\nTRY esianrtolcdugmphbyfvkwz'\n\nSFX S Y 1\nSFX S 0 s .\n";
const DIC: &str = "4\nhello\nworld/S\nthe\nspell\n";

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let en = dir.path().join("dic").join("en");
        fs::create_dir_all(&en).unwrap();
        fs::write(en.join("index.aff"), AFF).unwrap();
        fs::write(en.join("index.dic"), DIC).unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn file(&self, name: &str, content: &str) -> std::path::PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("spellpick").unwrap();
        cmd.current_dir(self.path())
            .arg("--no-color")
            .arg("--dictionary-dir")
            .arg(self.path().join("dic"))
            .arg("--custom-dictionary")
            .arg(self.path().join("custom.txt"));
        cmd
    }
}

#[test]
fn test_help() {
    Command::cargo_bin("spellpick")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cursor-aware spelling correction"));
}

#[test]
fn test_dict_available_marks_installed() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["dict", "available"])
        .assert()
        .success()
        .stdout(predicate::str::contains("en-GB"));
}

#[test]
fn test_scan_reports_misspellings() {
    let ws = Workspace::new();
    let file = ws.file("note.txt", "first line\nthe wrold\n");

    ws.cmd()
        .arg("scan")
        .arg(&file)
        .args(["--line", "2"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("2:5 wrold"));
}

#[test]
fn test_scan_clean_line_with_no_fail() {
    let ws = Workspace::new();
    let file = ws.file("note.txt", "hello world\n");

    ws.cmd()
        .arg("scan")
        .arg(&file)
        .arg("--no-fail")
        .assert()
        .success()
        .stdout(predicate::str::contains("No spelling errors"));
}

#[test]
fn test_accept_writes_file() {
    let ws = Workspace::new();
    let file = ws.file("note.txt", "the wrold\n");

    ws.cmd()
        .arg("accept")
        .arg(&file)
        .args(["--line", "1", "--column", "6", "--write"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Replaced \"wrold\" with \"world\""));

    assert_eq!(fs::read_to_string(&file).unwrap(), "the world\n");
}

#[test]
fn test_accept_without_write_leaves_file() {
    let ws = Workspace::new();
    let file = ws.file("note.txt", "the wrold\n");

    ws.cmd()
        .arg("accept")
        .arg(&file)
        .args(["--column", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("the world"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "the wrold\n");
}

#[test]
fn test_add_word_then_scan_accepts_it() {
    let ws = Workspace::new();
    let file = ws.file("note.txt", "the wrold\n");

    ws.cmd().args(["add-word", "wrold"]).assert().success();
    assert_eq!(
        fs::read_to_string(ws.path().join("custom.txt")).unwrap(),
        "wrold"
    );

    ws.cmd().arg("scan").arg(&file).assert().success();
}

#[test]
fn test_missing_dictionary_is_reported() {
    let ws = Workspace::new();
    let file = ws.file("note.txt", "the wrold\n");

    ws.cmd()
        .args(["--language", "fr"])
        .arg("scan")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("spellpick dict download fr"));
}
