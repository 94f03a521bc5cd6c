use std::io;

use thiserror::Error;

/// Errors surfaced while pumping a stream through the codec.
///
/// The first error aborts the operation; nothing is recovered locally.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The input transport failed with something other than end-of-file.
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),

    /// The output transport rejected a write.
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),

    /// The input ended after a control byte or inside a two-byte
    /// back-reference.
    #[error("unexpected end of stream inside a token group")]
    TruncatedInput,
}

impl CodecError {
    /// Platform error number for use as a process exit status.
    ///
    /// Errors that carry no OS code, truncation included, map to `EIO`.
    #[must_use]
    pub fn os_error(&self) -> i32 {
        match self {
            Self::Read(e) | Self::Write(e) => e.raw_os_error().unwrap_or(libc::EIO),
            Self::TruncatedInput => libc::EIO,
        }
    }
}
