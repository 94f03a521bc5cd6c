//! # lzpi
//!
//! `lzpi` is a safe, pure-Rust implementation of the lzpi codec: a streaming
//! LZSS-family compressor and decompressor whose token stream packs eight
//! match/literal tokens under one bitmap control byte. Matches are found with
//! a Knuth-Morris-Pratt search over a dual-ring sliding window and may
//! overlap their own output, so long runs collapse into single tokens.
//!
//! ## Example
//!
//! ```rust
//! use lzpi::{compress, decompress};
//!
//! let original = b"Hello world repeated Hello world repeated";
//!
//! let mut packed = Vec::new();
//! compress(&original[..], &mut packed).expect("compression failed");
//!
//! let mut restored = Vec::new();
//! decompress(&packed[..], &mut restored).expect("decompression failed");
//! assert_eq!(restored, original);
//! ```

#![forbid(unsafe_code)]

pub mod compress;
pub mod decompress;
pub mod error;
mod search;
mod window;

pub use compress::compress;
pub use decompress::decompress;
pub use error::CodecError;
