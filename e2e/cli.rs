//! Black-box tests of the CLI surface: stdin/stdout sentinels, the
//! decoder's rejection of a non-seekable destination, and `sfsstats`'
//! output format.

use std::io::Write;
use std::process::{Command, Stdio};

fn sfsz_bin() -> &'static str {
    env!("CARGO_BIN_EXE_sfsz")
}

fn sfsuz_bin() -> &'static str {
    env!("CARGO_BIN_EXE_sfsuz")
}

fn sfsstats_bin() -> &'static str {
    env!("CARGO_BIN_EXE_sfsstats")
}

#[test]
fn sfsz_accepts_stdin_and_stdout_sentinels() {
    let mut child = Command::new(sfsz_bin())
        .arg("-")
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(&vec![0xAAu8; 4096])
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert!(!output.stdout.is_empty());
}

#[test]
fn sfsuz_rejects_stdout_destination() {
    let dir = tempfile::tempdir().unwrap();
    let enc_path = dir.path().join("encoded.sfs");

    let status = Command::new(sfsz_bin())
        .arg("-")
        .arg(&enc_path)
        .stdin(Stdio::piped())
        .spawn()
        .and_then(|mut child| {
            child
                .stdin
                .take()
                .unwrap()
                .write_all(&vec![0xBBu8; 4096])
                .unwrap();
            child.wait()
        })
        .unwrap();
    assert!(status.success());

    let status = Command::new(sfsuz_bin())
        .arg(&enc_path)
        .arg("-")
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn sfsstats_prints_the_wire_contract_format() {
    let dir = tempfile::tempdir().unwrap();
    let src_path = dir.path().join("input.bin");
    let enc_path = dir.path().join("encoded.sfs");
    std::fs::write(&src_path, vec![0x66u8; 4096]).unwrap();

    let status = Command::new(sfsz_bin())
        .arg(&src_path)
        .arg(&enc_path)
        .status()
        .unwrap();
    assert!(status.success());

    let output = Command::new(sfsstats_bin()).arg(&enc_path).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("read="));
    assert!(stdout.contains("written="));
    assert!(stdout.contains("ratio="));
    assert!(stdout.contains("atomic_blocks="));
}

#[test]
fn sfsstats_fails_on_missing_file() {
    let output = Command::new(sfsstats_bin())
        .arg("/nonexistent/path/for/sure.sfs")
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn quiet_flag_suppresses_done_line() {
    let dir = tempfile::tempdir().unwrap();
    let src_path = dir.path().join("input.bin");
    let dst_path = dir.path().join("encoded.sfs");
    std::fs::write(&src_path, vec![0x77u8; 4096]).unwrap();

    let output = Command::new(sfsz_bin())
        .arg("-q")
        .arg(&src_path)
        .arg(&dst_path)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
}
