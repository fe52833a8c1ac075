//! Email address detection and splitting

use crate::error::{Error, Result};
use bstr::ByteSlice;

/// Loose shape check for `local@domain.tld`
///
/// The first `@` must be neither the first nor the last byte, and a `.` must
/// follow it with at least one byte in between and at least one byte after.
pub fn is_valid_email(word: &[u8]) -> bool {
    let Some(at) = word.find_byte(b'@') else {
        return false;
    };
    if at == 0 || at == word.len() - 1 {
        return false;
    }

    match word[at + 1..].find_byte(b'.') {
        Some(offset) => {
            let dot = at + 1 + offset;
            dot > at + 1 && dot < word.len() - 1
        }
        None => false,
    }
}

/// Split at the first `@`. Without an `@` the whole word is the local part.
pub fn split_email(word: &[u8]) -> (&[u8], &[u8]) {
    match word.find_byte(b'@') {
        Some(at) => (&word[..at], &word[at + 1..]),
        None => (word, &word[word.len()..]),
    }
}

/// Target wordlists for `--email-split`, given as `user:domain`
///
/// Parsed and kept with the run configuration; the pipeline does not read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSplit {
    pub user: String,
    pub domain: String,
}

impl EmailSplit {
    pub fn parse(spec: &str) -> Result<Self> {
        let (user, domain) = spec
            .split_once(':')
            .ok_or_else(|| Error::InvalidEmailSplit(spec.to_string()))?;

        Ok(Self {
            user: user.to_string(),
            domain: domain.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email(b"jdoe@example.com"));
        assert!(is_valid_email(b"a@b.c"));
        assert!(is_valid_email(b"first.last@mail.example.org"));
        assert!(is_valid_email(b"jos\xE9@example.com"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(b"plainword"));
        assert!(!is_valid_email(b"@example.com"));
        assert!(!is_valid_email(b"jdoe@"));
        assert!(!is_valid_email(b"jdoe@.com"));
        assert!(!is_valid_email(b"jdoe@example."));
        assert!(!is_valid_email(b"jdoe@localhost"));
        // the dot must come after the '@'
        assert!(!is_valid_email(b"j.doe@localhost"));
    }

    #[test]
    fn test_split_email() {
        let (user, domain) = split_email(b"jdoe@example.com");
        assert_eq!(user, b"jdoe");
        assert_eq!(domain, b"example.com");

        let (user, domain) = split_email(b"a@b@c.d");
        assert_eq!(user, b"a");
        assert_eq!(domain, b"b@c.d");

        let (user, domain) = split_email(b"nobody");
        assert_eq!(user, b"nobody");
        assert!(domain.is_empty());
    }

    #[test]
    fn test_email_split_parse() {
        let split = EmailSplit::parse("users.txt:domains.txt").unwrap();
        assert_eq!(split.user, "users.txt");
        assert_eq!(split.domain, "domains.txt");

        let split = EmailSplit::parse("u:d:x").unwrap();
        assert_eq!(split.domain, "d:x");
    }

    #[test]
    fn test_email_split_requires_colon() {
        let err = EmailSplit::parse("users.txt").unwrap_err();
        assert!(matches!(err, Error::InvalidEmailSplit(ref s) if s == "users.txt"));
    }
}
