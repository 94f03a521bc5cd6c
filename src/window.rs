use std::io::{ErrorKind, Read};

/// Capacity of the dictionary and of the lookahead, in bytes.
///
/// Must be a power of two: all index arithmetic masks virtual cursors
/// instead of taking a remainder. The decoder ties its `u8` history
/// cursor to this value, so changing it means changing the cursor width
/// in `decompress` as well.
pub(crate) const WINDOW_SIZE: usize = 1 << 8;

/// Size of the physical buffer shared by both rings.
const BUF_SIZE: usize = WINDOW_SIZE << 1;

const _: () = assert!(WINDOW_SIZE.is_power_of_two());

/// Maps a virtual (unmasked) cursor to a physical buffer position.
#[inline]
pub(crate) const fn index(v: usize) -> usize {
    v & (BUF_SIZE - 1)
}

/// A ring defined by a virtual head and tail.
///
/// Both cursors only ever grow; the live region is `[tl, hd)` and its
/// physical location is obtained through [`index`]. Keeping the cursors
/// unmasked makes size and offset arithmetic plain subtraction.
#[derive(Debug, Clone, Copy, Default)]
struct Ring {
    hd: usize,
    tl: usize,
}

impl Ring {
    /// Number of live bytes.
    #[inline]
    const fn len(&self) -> usize {
        self.hd - self.tl
    }

    /// Free space up to the ring's capacity.
    #[inline]
    const fn capacity(&self) -> usize {
        WINDOW_SIZE - self.len()
    }

    /// Contiguous bytes writable at the physical head before the shared
    /// buffer wraps around.
    #[inline]
    const fn run(&self) -> usize {
        BUF_SIZE - index(self.hd)
    }
}

/// Result of a [`Window::refill`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Refill {
    /// The lookahead is full.
    Full,
    /// The input signalled end-of-file before the lookahead filled up.
    Eof,
}

/// The sliding window: a dictionary ring and a lookahead ring laid out
/// back to back in one physical buffer.
///
/// The rings abut (`lookahead.tl == dictionary.hd` at all times), so a
/// match beginning in the dictionary may run straight into the lookahead
/// and the searcher never has to care which ring a cursor is in.
pub(crate) struct Window {
    dictionary: Ring,
    lookahead: Ring,
    buf: [u8; BUF_SIZE],
}

impl Window {
    pub(crate) const fn new() -> Self {
        Self {
            dictionary: Ring { hd: 0, tl: 0 },
            lookahead: Ring { hd: 0, tl: 0 },
            buf: [0; BUF_SIZE],
        }
    }

    /// Fills the lookahead from `input` up to its capacity.
    ///
    /// Short reads loop; reads interrupted by a signal are retried. A
    /// zero-byte read is end-of-file and reported as [`Refill::Eof`]
    /// with whatever the lookahead holds so far.
    pub(crate) fn refill<R: Read>(&mut self, input: &mut R) -> std::io::Result<Refill> {
        loop {
            let capacity = self.lookahead.capacity();
            if capacity == 0 {
                return Ok(Refill::Full);
            }

            let want = capacity.min(self.lookahead.run());
            let at = index(self.lookahead.hd);

            let got = loop {
                match input.read(&mut self.buf[at..at + want]) {
                    Ok(n) => break n,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            };

            if got == 0 {
                return Ok(Refill::Eof);
            }
            self.lookahead.hd += got;
        }
    }

    /// Moves `n` bytes from the front of the lookahead to the back of
    /// the dictionary, dropping the oldest dictionary bytes once its
    /// capacity is exceeded. Pure cursor arithmetic; no bytes move.
    pub(crate) fn shift(&mut self, n: usize) {
        debug_assert!(n <= self.lookahead.len());
        let spill = n.saturating_sub(self.dictionary.capacity());
        self.dictionary.hd += n;
        self.dictionary.tl += spill;
        self.lookahead.tl += n;
    }

    /// Byte at virtual index `v`.
    #[inline]
    pub(crate) fn byte(&self, v: usize) -> u8 {
        self.buf[index(v)]
    }

    #[inline]
    pub(crate) const fn lookahead_start(&self) -> usize {
        self.lookahead.tl
    }

    #[inline]
    pub(crate) const fn lookahead_end(&self) -> usize {
        self.lookahead.hd
    }

    #[inline]
    pub(crate) const fn lookahead_len(&self) -> usize {
        self.lookahead.len()
    }

    #[inline]
    pub(crate) const fn dictionary_start(&self) -> usize {
        self.dictionary.tl
    }

    #[inline]
    pub(crate) const fn dictionary_len(&self) -> usize {
        self.dictionary.len()
    }
}
