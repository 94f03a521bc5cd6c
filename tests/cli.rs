use std::io::Write;
use std::process::{Command, Output, Stdio};
use std::thread;

/// Runs the built binary with `args`, feeding `input` on stdin.
///
/// Stdin is fed from a separate thread so neither side of the pipe can
/// deadlock on a full buffer.
fn run_codec(args: &[&str], input: Vec<u8>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_lzpi"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn lzpi");

    let mut stdin = child.stdin.take().expect("stdin was piped");
    let feeder = thread::spawn(move || {
        // A failed write here means the child exited early; the exit
        // status assertion in the caller reports the real problem.
        let _ = stdin.write_all(&input);
    });

    let output = child.wait_with_output().expect("failed to wait for lzpi");
    feeder.join().expect("stdin feeder panicked");
    output
}

#[track_caller]
fn pipe_through(args: &[&str], input: Vec<u8>) -> Vec<u8> {
    let output = run_codec(args, input);
    assert!(
        output.status.success(),
        "lzpi {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output.stdout
}

#[test]
fn compress_then_decompress_restores_input() {
    let input = b"round and round and round it goes".to_vec();
    let packed = pipe_through(&[], input.clone());
    let restored = pipe_through(&["-d"], packed);
    assert_eq!(restored, input);
}

#[test]
fn long_decompress_flag_works() {
    let input = vec![0x5A; 4096];
    let packed = pipe_through(&[], input.clone());
    let restored = pipe_through(&["--decompress"], packed);
    assert_eq!(restored, input);
}

/// The program's own binary survives a compress-then-decompress pipe.
#[test]
fn binary_round_trips_itself() {
    let mut binary =
        std::fs::read(env!("CARGO_BIN_EXE_lzpi")).expect("failed to read own binary");
    // The leading slice exercises real machine code without making the
    // test I/O-bound on large debug builds.
    binary.truncate(64 * 1024);

    let packed = pipe_through(&[], binary.clone());
    let restored = pipe_through(&["-d"], packed);
    assert_eq!(restored, binary);
}

#[test]
fn unknown_argument_prints_usage() {
    let output = run_codec(&["--bogus"], Vec::new());
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage:"), "missing usage text: {stderr}");
}

#[test]
fn extra_arguments_print_usage() {
    let output = run_codec(&["-d", "extra"], Vec::new());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn truncated_stream_reports_io_error() {
    // A control byte promising a back-reference, then EOF mid-token.
    let output = run_codec(&["-d"], vec![0x01, 0x05]);
    assert_eq!(output.status.code(), Some(libc::EIO));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("lzpi"),
        "diagnostic should name the program: {stderr}"
    );
}
