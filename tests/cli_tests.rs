//! Integration tests for the headless subcommands.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn cmd(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("wordcloud-studio").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

fn write_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn counts_prints_csv_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "pets.txt", b"cat dog cat bird dog cat");

    cmd(&dir)
        .args(["counts", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("Word,Count\ncat,3\ndog,2\nbird,1\n");
}

#[test]
fn counts_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "pets.txt", b"Cat cat");
    let out = dir.path().join("counts.csv");

    cmd(&dir)
        .args(["counts", file.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(out).unwrap(), "Word,Count\ncat,2\n");
}

#[test]
fn unsupported_type_yields_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "image.bin", &[0, 1, 2, 3]);

    cmd(&dir)
        .args(["counts", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("Word,Count\n");
}

#[test]
fn declared_mime_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "notes.bin", b"hello hello");

    cmd(&dir)
        .args(["counts", file.to_str().unwrap(), "--mime", "text/plain"])
        .assert()
        .success()
        .stdout("Word,Count\nhello,2\n");
}

#[test]
fn info_prints_details_and_preview() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "pets.txt", b"cat dog");

    cmd(&dir)
        .args(["info", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"filename\": \"pets.txt\""))
        .stdout(predicate::str::contains("\"filetype\": \"text/plain\""))
        .stdout(predicate::str::contains("\"filesize\": \"0.01 KB\""))
        .stdout(predicate::str::contains("cat dog"));
}

#[test]
fn invalid_utf8_text_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "broken.txt", &[0xff, 0xfe, 0xfd]);

    cmd(&dir)
        .args(["counts", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UTF-8"));
}

#[test]
fn missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    cmd(&dir)
        .args(["info", "nope.txt"])
        .assert()
        .failure();
}

#[test]
fn cloud_of_only_stopwords_saves_blank_image() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "filler.txt", b"the and of to a");
    let out = dir.path().join("out");

    cmd(&dir)
        .args([
            "cloud",
            file.to_str().unwrap(),
            "--format",
            "jpg",
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("wordcloud.jpeg"));

    let bytes = fs::read(out.join("wordcloud.jpeg")).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
}

#[test]
fn config_file_sets_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "filler.txt", b"the and of");
    write_file(
        &dir,
        "wordcloud.yml",
        b"output_dir: ./renders\ndefaults:\n  format: webp\ncloud:\n  width: 64\n  height: 32\n",
    );

    cmd(&dir)
        .args(["cloud", file.to_str().unwrap()])
        .assert()
        .success();

    let bytes = fs::read(dir.path().join("renders").join("wordcloud.webp")).unwrap();
    assert_eq!(&bytes[..4], b"RIFF");
}

#[test]
fn bad_format_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "pets.txt", b"cat");

    cmd(&dir)
        .args(["cloud", file.to_str().unwrap(), "--format", "gif"])
        .assert()
        .failure();
}
