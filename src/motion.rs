//! Character-level motion primitives over a surface's flat text.
//!
//! These are pure functions of the text: the engine reads the surface,
//! decides a landing offset here, and converts it back to a tree caret.

/// Result of scanning for the next word landing within one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordScan {
    /// The jump lands at this character offset, inside the same text.
    Landed(usize),
    /// The rest of the text has no landing; the motion wants the next line.
    AtEnd,
}

/// Whitespace test used by the word motions.
pub fn blank(ch: char) -> bool {
    ch.is_whitespace()
}

/// Character count of `text`. Offsets throughout the engine count chars,
/// not bytes.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Scan forward from `origin` for the next word landing.
///
/// The landing is one past the first whitespace character at or after the
/// origin. Runs of whitespace are not collapsed: a hop that starts inside
/// a run advances a single character.
pub fn next_word_hop(text: &str, origin: usize) -> WordScan {
    let len = char_len(text);
    for (idx, ch) in text.chars().enumerate().skip(origin) {
        if blank(ch) {
            let landing = idx + 1;
            if landing >= len {
                return WordScan::AtEnd;
            }
            return WordScan::Landed(landing);
        }
    }
    WordScan::AtEnd
}

/// Offset of the first non-whitespace character, if any.
pub fn first_non_blank(text: &str) -> Option<usize> {
    text.chars().position(|ch| !blank(ch))
}
