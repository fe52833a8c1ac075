//! Byte sanitizers
//!
//! Stateless transforms used by the word pipeline. They work on raw bytes and
//! never re-encode: a byte either stays exactly as it was or is removed. Every
//! function is total; at worst it returns an empty string.

use crate::charclass::{is_alnum, is_alpha, is_digit};
use bstr::BString;

/// Remove everything between `<` and the next `>`, brackets included.
///
/// This is a toggle, not an HTML parser: `<` always enters tag state and `>`
/// always leaves it, so nesting is not tracked. An unterminated tag swallows
/// the rest of the input.
pub fn strip_html_tags(html: &[u8]) -> BString {
    let mut result = Vec::with_capacity(html.len());
    let mut in_tag = false;

    for &b in html {
        match b {
            b'<' => in_tag = true,
            b'>' => in_tag = false,
            _ if !in_tag => result.push(b),
            _ => {}
        }
    }

    BString::from(result)
}

/// Drop the leading and trailing bytes matching `strip`
fn trim_edges(word: &[u8], strip: impl Fn(u8) -> bool) -> BString {
    let start = word.iter().position(|&b| !strip(b)).unwrap_or(word.len());
    let end = word.iter().rposition(|&b| !strip(b)).map_or(start, |i| i + 1);
    BString::from(&word[start..end])
}

/// Strip leading and trailing digit runs, leaving interior digits alone
pub fn trim_digits(word: &[u8]) -> BString {
    trim_edges(word, is_digit)
}

/// Strip leading and trailing runs of non-alphanumeric bytes
pub fn trim_special(word: &[u8]) -> BString {
    trim_edges(word, |b| !is_alnum(b))
}

/// Strip leading and trailing runs of anything that is not an ASCII letter
///
/// Equivalent to alternating [`trim_digits`] and [`trim_special`] until the
/// word stops changing.
pub fn trim_non_alpha(word: &[u8]) -> BString {
    trim_edges(word, |b| !is_alpha(b))
}

/// Strip leading spaces and tabs; the end of the word is left as is
pub fn trim_leading_whitespace(word: &[u8]) -> BString {
    let start = word
        .iter()
        .position(|&b| b != b' ' && b != b'\t')
        .unwrap_or(word.len());
    BString::from(&word[start..])
}

/// Cut `word` to `max_len` bytes. `0` disables truncation.
pub fn truncate(word: &[u8], max_len: usize) -> BString {
    if max_len == 0 {
        return BString::from(word);
    }
    BString::from(&word[..word.len().min(max_len)])
}

/// Replace each run of a repeated byte with a single instance
///
/// `"aabbbc"` becomes `"abc"`. Only adjacent repeats are collapsed, so
/// `"abab"` is unchanged.
pub fn collapse_consecutive_duplicates(word: &[u8]) -> BString {
    let mut result = word.to_vec();
    result.dedup();
    BString::from(result)
}

/// Drop every byte above the ASCII range
pub fn ascii_only(line: &[u8]) -> BString {
    line.iter().copied().filter(|b| b.is_ascii()).collect::<Vec<u8>>().into()
}
