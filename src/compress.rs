use std::io::{Read, Write};

use crate::error::CodecError;
use crate::search::{self, Token};
use crate::window::{Refill, Window};

type Result<T> = std::result::Result<T, CodecError>;

// --- Constants ---

/// Number of tokens grouped under one control byte.
const GROUP_SIZE: usize = 8;

/// Largest serialized group: a control byte plus eight two-byte
/// back-references.
const MAX_GROUP_BYTES: usize = 1 + 2 * GROUP_SIZE;

/// Rotor seed. One bit in each byte, so after any rotation all four
/// bytes are equal; the first rotation sets bit 0, forcing a fresh
/// group before the first token.
const ROTOR_INIT: u32 = (1 << 31) | (1 << 23) | (1 << 15) | (1 << 7);

/// Accumulates tokens into control-byte groups over a sliding window.
struct Encoder {
    window: Window,
    rotor: u32,
    control: u8,
    len: usize,
    group: [Token; GROUP_SIZE],
}

impl Encoder {
    const fn new() -> Self {
        Self {
            window: Window::new(),
            rotor: ROTOR_INIT,
            control: 0,
            len: 0,
            group: [Token::Literal(0); GROUP_SIZE],
        }
    }

    /// Consumes one token's worth of lookahead and stores the token,
    /// flushing the previous group first when the rotor marks a
    /// boundary.
    fn push_token<W: Write>(&mut self, output: &mut W) -> Result<()> {
        self.rotor = self.rotor.rotate_left(1);
        if self.rotor & 1 != 0 {
            self.flush(output)?;
            self.control = 0;
        }

        let token = search::next_token(&mut self.window);
        if matches!(token, Token::Reference { .. }) {
            self.control |= (self.rotor >> 24) as u8;
        }
        self.group[self.len] = token;
        self.len += 1;

        Ok(())
    }

    /// Serializes the pending group, control byte first, then each
    /// token's payload in group order. A no-op for an empty group.
    fn flush<W: Write>(&mut self, output: &mut W) -> Result<()> {
        if self.len == 0 {
            return Ok(());
        }

        let mut frame = [0u8; MAX_GROUP_BYTES];
        frame[0] = self.control;
        let mut at = 1;

        for token in &self.group[..self.len] {
            match *token {
                Token::Literal(value) => {
                    frame[at] = value;
                    at += 1;
                }
                Token::Reference { offset, length } => {
                    frame[at] = offset;
                    frame[at + 1] = length;
                    at += 2;
                }
            }
        }

        output
            .write_all(&frame[..at])
            .map_err(CodecError::Write)?;
        self.len = 0;

        Ok(())
    }
}

/// Compresses `input` to `output` until end-of-file.
///
/// The output is a raw concatenation of token groups with no header or
/// trailer; an empty input produces an empty output. Neither stream is
/// closed or flushed beyond the writes themselves.
///
/// # Errors
///
/// [`CodecError::Read`] on an input transport failure,
/// [`CodecError::Write`] on an output transport failure.
pub fn compress<R: Read, W: Write>(mut input: R, mut output: W) -> Result<()> {
    let mut encoder = Encoder::new();

    loop {
        match encoder
            .window
            .refill(&mut input)
            .map_err(CodecError::Read)?
        {
            Refill::Full => encoder.push_token(&mut output)?,
            Refill::Eof => break,
        }
    }

    // The input is exhausted; drain what is left of the lookahead.
    while encoder.window.lookahead_len() != 0 {
        encoder.push_token(&mut output)?;
    }

    encoder.flush(&mut output)
}
