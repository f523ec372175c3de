//! Black-box round-trip tests driving the built `sfsz`/`sfsuz` binaries,
//! covering the concrete scenarios from the format's test matrix.

use std::io::Write;
use std::process::Command;

fn sfsz_bin() -> &'static str {
    env!("CARGO_BIN_EXE_sfsz")
}

fn sfsuz_bin() -> &'static str {
    env!("CARGO_BIN_EXE_sfsuz")
}

fn roundtrip(input: &[u8], extra_sfsz_args: &[&str]) -> Vec<u8> {
    let dir = tempfile::tempdir().unwrap();
    let src_path = dir.path().join("input.bin");
    let enc_path = dir.path().join("encoded.sfs");
    let dec_path = dir.path().join("decoded.bin");

    std::fs::File::create(&src_path)
        .unwrap()
        .write_all(input)
        .unwrap();

    let status = Command::new(sfsz_bin())
        .args(extra_sfsz_args)
        .arg(&src_path)
        .arg(&enc_path)
        .status()
        .unwrap();
    assert!(status.success(), "sfsz failed");

    let status = Command::new(sfsuz_bin())
        .arg(&enc_path)
        .arg(&dec_path)
        .status()
        .unwrap();
    assert!(status.success(), "sfsuz failed");

    std::fs::read(&dec_path).unwrap()
}

#[test]
fn all_zero_input_round_trips() {
    let input = vec![0u8; 8192];
    assert_eq!(roundtrip(&input, &[]), input);
}

#[test]
fn pure_nonzero_input_round_trips() {
    let input = vec![0xABu8; 4096];
    assert_eq!(roundtrip(&input, &[]), input);
}

#[test]
fn mixed_zero_data_zero_round_trips() {
    let mut input = vec![0u8; 4096];
    input.extend(std::iter::repeat(0x11u8).take(4096));
    input.extend(std::iter::repeat(0u8).take(4096));
    assert_eq!(roundtrip(&input, &[]), input);
}

#[test]
fn unaligned_tail_round_trips() {
    let mut input = vec![0x22u8; 4096];
    input.extend(std::iter::repeat(0x22u8).take(100));
    assert_eq!(roundtrip(&input, &[]), input);
}

#[test]
fn keepalive_forces_flushes_during_long_sparse_run() {
    let mut input = vec![0u8; 32768];
    input.extend(std::iter::repeat(0x33u8).take(4096));
    assert_eq!(roundtrip(&input, &["-k", "8192"]), input);
}

#[test]
fn random_pad_does_not_affect_round_trip() {
    let input = vec![0x44u8; 4096];
    assert_eq!(roundtrip(&input, &["-r", "4096"]), input);
}

#[test]
fn small_atomic_block_size_forces_many_blocks() {
    let input = vec![0x55u8; 1 << 20];
    assert_eq!(roundtrip(&input, &["-b", "65536"]), input);
}

#[test]
fn empty_input_round_trips_to_empty_output() {
    let input: Vec<u8> = Vec::new();
    assert_eq!(roundtrip(&input, &[]), input);
}
