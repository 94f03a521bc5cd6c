use crate::window::{Window, WINDOW_SIZE};

/// A unit of the token stream.
///
/// Back-reference fields carry the on-wire encoding: `offset` is the
/// back-distance minus one and `length` the run length minus one, so a
/// single token can reach 256 positions back and cover 256 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    Literal(u8),
    Reference { offset: u8, length: u8 },
}

/// Builds the KMP failure table for the current lookahead.
///
/// `table[k]` is the length of the longest proper prefix of the first
/// `k + 1` lookahead bytes that is also a suffix of them. Left untouched
/// when the lookahead is shorter than two bytes; the search never reads
/// it in that case.
fn failure_table(window: &Window, table: &mut [u8; WINDOW_SIZE]) {
    if window.lookahead_len() < 2 {
        return;
    }

    let tl = window.lookahead_start();
    let hd = window.lookahead_end();
    let mut i = tl;
    let mut j = tl + 1;

    table[0] = 0;

    while j != hd {
        if window.byte(i) == window.byte(j) {
            i += 1;
            table[j - tl] = (i - tl) as u8;
            j += 1;
        } else if i == tl {
            table[j - tl] = 0;
            j += 1;
        } else {
            i = tl + usize::from(table[i - tl - 1]);
        }
    }
}

/// Finds the longest prefix of the lookahead occurring in the dictionary.
///
/// Returns `(origin, length)` where `origin` is the match start relative
/// to the dictionary tail. A match may extend past the dictionary head
/// into the lookahead itself; decoding such a reference replays the just
/// written bytes, which is what turns short seeds into long runs.
fn longest_match(window: &Window, table: &[u8; WINDOW_SIZE]) -> (usize, usize) {
    let tl = window.lookahead_start();
    let hd = window.lookahead_end();

    let mut best = (0, 0);
    let mut i = tl;
    let mut j = window.dictionary_start();

    while j != hd {
        let len = i - tl;
        let origin = j - window.dictionary_start() - len;

        // No candidate can start at or past the dictionary head.
        if origin == window.dictionary_len() {
            break;
        }

        if window.byte(i) == window.byte(j) {
            i += 1;
            j += 1;
            if i == hd {
                return (origin, len + 1);
            }
        } else if i == tl {
            j += 1;
        } else {
            if len > best.1 {
                best = (origin, len);
            }
            i = tl + usize::from(table[len - 1]);
        }
    }

    best
}

/// A two-byte match is refused when the bytes just past it suggest the
/// source is a run that re-aligns one position later: the next lookahead
/// byte repeats the first, and the one after either still repeats it or
/// equals the dictionary byte following the candidate match.
fn two_byte_match_unprofitable(window: &Window, len: usize) -> bool {
    let tl = window.lookahead_start();
    let first = window.byte(tl);

    window.byte(tl + 2) == first
        && (window.byte(tl + 3) == first
            || window.byte(tl + 3) == window.byte(window.dictionary_start() + len))
}

/// Produces the next token from the front of the lookahead and consumes
/// the bytes it covers.
pub(crate) fn next_token(window: &mut Window) -> Token {
    let mut table = [0u8; WINDOW_SIZE];
    failure_table(window, &mut table);
    let (origin, len) = longest_match(window, &table);

    if len < 2
        || (len == 2 && window.lookahead_len() > 3 && two_byte_match_unprofitable(window, len))
    {
        let value = window.byte(window.lookahead_start());
        window.shift(1);
        return Token::Literal(value);
    }

    let token = Token::Reference {
        offset: (window.dictionary_len() - origin - 1) as u8,
        length: (len - 1) as u8,
    };
    window.shift(len);
    token
}
