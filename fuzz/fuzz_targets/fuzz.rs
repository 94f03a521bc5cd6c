#![no_main]

use libfuzzer_sys::fuzz_target;
use lzpi::{compress, decompress, CodecError};

/// Feeds the fuzz input to the decoder as if it were a compressed
/// stream.
///
/// The framing has no magic or checksum, so any byte sequence parses as
/// control-byte groups: bogus control bits turn arbitrary bytes into
/// back-references with arbitrary distances, including distances into
/// history that was never written. The decoder's contract is that all
/// of that replays from the zero-initialized ring, that the `u8` cursor
/// wraps instead of escaping the ring, and that the only reportable
/// defect is `TruncatedInput` -- ending after a control byte or between
/// the two bytes of a back-reference. Anything else (a panic, a
/// `Read`/`Write` error out of in-memory buffers) is a bug.
fn replay_as_token_stream(data: &[u8]) {
    let mut restored = Vec::new();
    match decompress(data, &mut restored) {
        Ok(()) | Err(CodecError::TruncatedInput) => {}
        Err(other) => panic!("in-memory decode reported a transport error: {other:?}"),
    }
}

/// Compresses the fuzz input and replays the result, byte-comparing
/// against the original.
///
/// This drives the whole pipeline at once: window refills and shifts,
/// KMP matches that overlap into the lookahead, the two-byte-match
/// refusal heuristic, partial final groups, and on the way back the
/// self-overlapping copies those matches decode to. The encoder never
/// ends a stream mid-token, so the decoder must accept every stream
/// produced here; any divergence is pinned to its first byte.
fn assert_stream_survives(data: &[u8]) {
    let mut packed = Vec::new();
    compress(data, &mut packed).expect("in-memory compression cannot fail");

    let mut restored = Vec::new();
    if let Err(e) = decompress(&packed[..], &mut restored) {
        panic!(
            "decoder rejected an encoder-produced stream: {e:?} ({} bytes in, {} on the wire)",
            data.len(),
            packed.len()
        );
    }

    if restored != data {
        let at = restored
            .iter()
            .zip(data)
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| restored.len().min(data.len()));
        panic!(
            "replay diverges from input at byte {at}: {} bytes in, {} out",
            data.len(),
            restored.len()
        );
    }
}

fuzz_target!(|data: &[u8]| {
    replay_as_token_stream(data);
    assert_stream_survives(data);
});
