//! ASCII character classes
//!
//! Locale-independent byte predicates shared by the trimming and rejection
//! stages. A byte outside the ASCII range is never a digit or a letter.

#[inline]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline]
pub fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

#[inline]
pub fn is_alnum(b: u8) -> bool {
    is_alpha(b) || is_digit(b)
}

/// `0-9`, `a-f` and `A-F`
#[inline]
pub fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}
