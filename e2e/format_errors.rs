//! Black-box corruption-rejection tests: a hand-crafted stream with an odd
//! `boundary_count` must be refused by `sfsuz` with a non-zero exit, and
//! must never leave a partially-reconstructed file silently reported as
//! success.

use std::process::Command;

fn sfsuz_bin() -> &'static str {
    env!("CARGO_BIN_EXE_sfsuz")
}

fn write_u64_le(buf: &mut Vec<u8>, v: u64) {
    buf.extend_from_slice(&v.to_le_bytes());
}

#[test]
fn odd_boundary_count_is_rejected() {
    let mut stream = Vec::new();
    write_u64_le(&mut stream, 0); // random_size_bytes
    write_u64_le(&mut stream, 4); // payload_size
    stream.extend_from_slice(&[1, 2, 3, 4]); // payload
    write_u64_le(&mut stream, 3); // boundary_count (odd — invalid)
    write_u64_le(&mut stream, 0);
    write_u64_le(&mut stream, 4);
    write_u64_le(&mut stream, 0);

    let dir = tempfile::tempdir().unwrap();
    let enc_path = dir.path().join("corrupt.sfs");
    let dec_path = dir.path().join("decoded.bin");
    std::fs::write(&enc_path, &stream).unwrap();

    let output = Command::new(sfsuz_bin())
        .arg(&enc_path)
        .arg(&dec_path)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());
}

#[test]
fn payload_size_over_the_bound_is_rejected() {
    let mut stream = Vec::new();
    write_u64_le(&mut stream, 0);
    write_u64_le(&mut stream, u64::MAX - 1); // enormous but not the sentinel

    let dir = tempfile::tempdir().unwrap();
    let enc_path = dir.path().join("corrupt.sfs");
    let dec_path = dir.path().join("decoded.bin");
    std::fs::write(&enc_path, &stream).unwrap();

    let output = Command::new(sfsuz_bin())
        .arg(&enc_path)
        .arg(&dec_path)
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn truncated_stream_is_rejected() {
    // Only the header word, no sentinel and no footer.
    let mut stream = Vec::new();
    write_u64_le(&mut stream, 0);

    let dir = tempfile::tempdir().unwrap();
    let enc_path = dir.path().join("truncated.sfs");
    let dec_path = dir.path().join("decoded.bin");
    std::fs::write(&enc_path, &stream).unwrap();

    let output = Command::new(sfsuz_bin())
        .arg(&enc_path)
        .arg(&dec_path)
        .output()
        .unwrap();
    assert!(!output.status.success());
}
