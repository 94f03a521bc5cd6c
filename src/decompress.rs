use std::io::{ErrorKind, Read, Write};

use crate::error::CodecError;

type Result<T> = std::result::Result<T, CodecError>;

// --- Constants ---

/// Size of the decoder's history ring.
///
/// Must stay in lockstep with the encoder's window capacity so every
/// back-distance lands on a byte the encoder could still see.
const HISTORY_SIZE: usize = 256;

/// Rotor seed, identical to the encoder's, so the first input byte is
/// parsed as a control byte.
const ROTOR_INIT: u32 = (1 << 31) | (1 << 23) | (1 << 15) | (1 << 7);

// The cursor is a u8; its wraparound must coincide with the ring size.
const _: () = assert!(HISTORY_SIZE == u8::MAX as usize + 1);

/// Reads a single byte, retrying interrupted reads. `None` is a clean
/// end-of-file.
fn read_byte<R: Read>(input: &mut R) -> Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match input.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(CodecError::Read(e)),
        }
    }
}

/// Decompresses `input` to `output` until end-of-file.
///
/// The stream is parsed as repeated control-byte groups. End-of-file
/// between complete tokens is the normal way a stream ends; there is no
/// trailer to consume. Malformed content is replayed permissively --
/// only truncation inside a token is an error.
///
/// # Errors
///
/// [`CodecError::Read`] and [`CodecError::Write`] on transport
/// failures, [`CodecError::TruncatedInput`] when the input ends after a
/// control byte or inside a two-byte back-reference.
pub fn decompress<R: Read, W: Write>(mut input: R, mut output: W) -> Result<()> {
    let mut history = [0u8; HISTORY_SIZE];
    let mut cursor: u8 = 0;
    let mut rotor = ROTOR_INIT;
    let mut control: u8 = 0;

    while let Some(mut byte) = read_byte(&mut input)? {
        rotor = rotor.rotate_left(1);
        if rotor & 1 != 0 {
            // Group boundary: this byte is the control byte and the
            // next one is the first token byte.
            control = byte;
            byte = read_byte(&mut input)?.ok_or(CodecError::TruncatedInput)?;
        }

        if control & (rotor >> 24) as u8 != 0 {
            // Back-reference: offset byte in hand, length byte follows.
            // A distance of 256 wraps to 0 in u8 arithmetic; reading
            // each source cell before overwriting it keeps that case
            // correct, since the cell still holds the byte emitted one
            // full ring ago.
            let distance = byte.wrapping_add(1);
            let last = read_byte(&mut input)?.ok_or(CodecError::TruncatedInput)?;

            for _ in 0..usize::from(last) + 1 {
                let value = history[usize::from(cursor.wrapping_sub(distance))];
                history[usize::from(cursor)] = value;
                cursor = cursor.wrapping_add(1);
                output.write_all(&[value]).map_err(CodecError::Write)?;
            }
        } else {
            history[usize::from(cursor)] = byte;
            cursor = cursor.wrapping_add(1);
            output.write_all(&[byte]).map_err(CodecError::Write)?;
        }
    }

    Ok(())
}
