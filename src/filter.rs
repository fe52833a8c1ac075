//! Word filtering module
//!
//! The per-word transformation chain. Each enabled option becomes one
//! [`Stage`]; stages run in a fixed order and every stage sees the output of
//! the previous one. An empty result at any point is a rejection and ends the
//! chain.

use crate::charclass::{is_digit, is_hex_digit};
use crate::email::{is_valid_email, split_email};
use crate::sanitize::{
    collapse_consecutive_duplicates, strip_html_tags, trim_digits, trim_leading_whitespace,
    trim_non_alpha, trim_special, truncate,
};
use bstr::BString;

/// Minimum length for a hex-only word to be treated as a hash (MD5 and up)
pub const HASH_MIN_LEN: usize = 32;

/// Options that drive the word pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Strip HTML tags
    pub dewebify: bool,
    /// ASCII lowercase
    pub lower: bool,
    /// Trim leading/trailing digits
    pub digit_trim: bool,
    /// Trim leading/trailing non-alphanumerics
    pub special_trim: bool,
    /// Trim leading spaces and tabs
    pub detab: bool,
    /// Truncate to this many bytes (0 = off)
    pub maxtrim: usize,
    /// Collapse runs of the same byte
    pub dup_remove: bool,
    /// Reject all-digit words
    pub no_numbers: bool,
    /// Reject hex strings of hash length
    pub hash_remove: bool,
    /// Reject words where one byte value exceeds this percentage (0 = off)
    pub dup_sense: u32,
    /// Rewrite `user@domain.tld` as `user domain.tld`
    pub email_sort: bool,
}

/// One step of the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Dewebify,
    Lowercase,
    DigitTrim,
    SpecialTrim,
    /// Digit and special trim together, repeated until neither changes the word
    ///
    /// Trims every non-letter from both ends, so `"Hello123!!"` ends up as
    /// `"hello"`. The cost is that a trailing digit hidden behind punctuation
    /// goes too: `"abc1!"` becomes `"abc"`, where running the two trims once
    /// each would leave `"abc1"`. See decision 2 in DESIGN.md.
    EdgeTrim,
    Detab,
    MaxTrim(usize),
    DupRemove,
    NoNumbers,
    HashRemove,
    DupSense(u32),
    EmailSort,
}

impl Stage {
    /// Run this stage alone. Rejecting stages return an empty string.
    pub fn apply(&self, word: &[u8]) -> BString {
        let rejected = match *self {
            Stage::Dewebify => return strip_html_tags(word),
            Stage::Lowercase => return BString::from(word.to_ascii_lowercase()),
            Stage::DigitTrim => return trim_digits(word),
            Stage::SpecialTrim => return trim_special(word),
            Stage::EdgeTrim => return trim_non_alpha(word),
            Stage::Detab => return trim_leading_whitespace(word),
            Stage::MaxTrim(max_len) => return truncate(word, max_len),
            Stage::DupRemove => return collapse_consecutive_duplicates(word),
            Stage::EmailSort => return sort_email(word),
            Stage::NoNumbers => !word.is_empty() && word.iter().copied().all(is_digit),
            Stage::HashRemove => looks_like_hash(word),
            Stage::DupSense(percent) => exceeds_dup_sense(word, percent),
        };

        if rejected {
            BString::default()
        } else {
            BString::from(word)
        }
    }
}

fn sort_email(word: &[u8]) -> BString {
    if !is_valid_email(word) {
        return BString::from(word);
    }

    let (user, domain) = split_email(word);
    let mut sorted = BString::from(user);
    sorted.push(b' ');
    sorted.extend_from_slice(domain);
    sorted
}

/// Hex-only word of at least [`HASH_MIN_LEN`] bytes
pub fn looks_like_hash(word: &[u8]) -> bool {
    word.len() >= HASH_MIN_LEN && word.iter().copied().all(is_hex_digit)
}

/// True if any single byte value makes up strictly more than `percent`% of
/// the word. Counts are over the whole word, not over runs.
pub fn exceeds_dup_sense(word: &[u8], percent: u32) -> bool {
    if percent == 0 || word.is_empty() {
        return false;
    }

    let mut counts = [0usize; 256];
    for &b in word {
        counts[b as usize] += 1;
    }

    // count / len > percent / 100, kept in integers
    let limit = percent as usize * word.len();
    counts.iter().any(|&count| count * 100 > limit)
}

/// The configured chain, built once and shared read-only by all workers
#[derive(Debug, Clone)]
pub struct WordFilter {
    stages: Vec<Stage>,
}

impl WordFilter {
    pub fn new(config: &FilterConfig) -> Self {
        let candidates = [
            (config.dewebify, Stage::Dewebify),
            (config.lower, Stage::Lowercase),
            (config.digit_trim && !config.special_trim, Stage::DigitTrim),
            (config.special_trim && !config.digit_trim, Stage::SpecialTrim),
            (config.digit_trim && config.special_trim, Stage::EdgeTrim),
            (config.detab, Stage::Detab),
            (config.maxtrim > 0, Stage::MaxTrim(config.maxtrim)),
            (config.dup_remove, Stage::DupRemove),
            (config.no_numbers, Stage::NoNumbers),
            (config.hash_remove, Stage::HashRemove),
            (config.dup_sense > 0, Stage::DupSense(config.dup_sense)),
            (config.email_sort, Stage::EmailSort),
        ];

        let stages = candidates
            .into_iter()
            .filter_map(|(enabled, stage)| enabled.then_some(stage))
            .collect();

        Self { stages }
    }

    /// Enabled stages in execution order
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run the chain over one candidate. Empty means rejected.
    pub fn process(&self, word: &[u8]) -> BString {
        let mut current = BString::from(word);

        for stage in &self.stages {
            if current.is_empty() {
                break;
            }
            current = stage.apply(&current);
        }

        current
    }
}

/// One-shot convenience over [`WordFilter::process`]
pub fn process_word(word: impl AsRef<[u8]>, config: &FilterConfig) -> BString {
    WordFilter::new(config).process(word.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_is_fixed() {
        let config = FilterConfig {
            email_sort: true,
            dewebify: true,
            dup_sense: 40,
            lower: true,
            maxtrim: 8,
            ..Default::default()
        };

        let filter = WordFilter::new(&config);
        assert_eq!(
            filter.stages(),
            &[
                Stage::Dewebify,
                Stage::Lowercase,
                Stage::MaxTrim(8),
                Stage::DupSense(40),
                Stage::EmailSort,
            ]
        );
    }

    #[test]
    fn test_each_stage_alone() {
        let hash = "0123456789abcdef0123456789ABCDEF";
        let cases = [
            (Stage::Dewebify, "<b>pass</b>word", "password"),
            (Stage::Lowercase, "MiXeD", "mixed"),
            (Stage::DigitTrim, "12ab34", "ab"),
            (Stage::SpecialTrim, "!!ab!!", "ab"),
            (Stage::EdgeTrim, "abc1!", "abc"),
            (Stage::Detab, " \tab", "ab"),
            (Stage::MaxTrim(3), "abcdef", "abc"),
            (Stage::DupRemove, "aabbcc", "abc"),
            (Stage::NoNumbers, "1234", ""),
            (Stage::HashRemove, hash, ""),
            (Stage::DupSense(50), "aaab", ""),
            (Stage::EmailSort, "jdoe@example.com", "jdoe example.com"),
        ];

        for (stage, input, expected) in cases {
            assert_eq!(stage.apply(input.as_bytes()), expected, "{:?}", stage);
        }
    }

    #[test]
    fn test_stages_keep_non_utf8_bytes() {
        let word = b"Caf\xE9\xFF";
        assert_eq!(Stage::Lowercase.apply(word), &b"caf\xE9\xFF"[..]);
        assert_eq!(Stage::DupSense(50).apply(word), &word[..]);
        assert_eq!(Stage::HashRemove.apply(word), &word[..]);
    }

    #[test]
    fn test_no_stages_passes_through() {
        let config = FilterConfig::default();
        assert!(WordFilter::new(&config).stages().is_empty());
        assert_eq!(process_word("  Any Thing 123 ", &config), "  Any Thing 123 ");
    }

    #[test]
    fn test_lower_digit_special_trim() {
        let config = FilterConfig {
            lower: true,
            digit_trim: true,
            special_trim: true,
            ..Default::default()
        };
        assert_eq!(process_word("Hello123!!", &config), "hello");
    }

    #[test]
    fn test_digit_and_special_trim_combined() {
        let config = FilterConfig {
            digit_trim: true,
            special_trim: true,
            ..Default::default()
        };
        assert_eq!(WordFilter::new(&config).stages(), &[Stage::EdgeTrim]);
        // digits uncovered by the special trim are trimmed as well
        assert_eq!(process_word("!99pass", &config), "pass");
        assert_eq!(process_word("99pass!", &config), "pass");
        assert_eq!(process_word("1!2!x9y!3", &config), "x9y");
    }

    #[test]
    fn test_dup_remove() {
        let config = FilterConfig {
            dup_remove: true,
            ..Default::default()
        };
        assert_eq!(process_word("aaaabbbccd", &config), "abcd");
    }

    #[test]
    fn test_no_numbers() {
        let on = FilterConfig {
            no_numbers: true,
            ..Default::default()
        };
        let off = FilterConfig::default();

        for word in ["0", "123456", "99999999999999999999999999"] {
            assert_eq!(process_word(word, &on), "");
            assert_eq!(process_word(word, &off), word);
        }
        assert_eq!(process_word("123a", &on), "123a");
    }

    #[test]
    fn test_hash_remove_boundary() {
        let config = FilterConfig {
            hash_remove: true,
            ..Default::default()
        };

        assert_eq!(process_word("deadBEEF00112233445566778899aabb", &config), "");
        // 40 chars (sha1)
        assert_eq!(
            process_word("da39a3ee5e6b4b0d3255bfef95601890afd80709", &config),
            ""
        );
        // 31 hex chars survive
        let short = "deadBEEF00112233445566778899aab";
        assert_eq!(process_word(short, &config), short);
        // a single non-hex char survives
        let tainted = "deadBEEF00112233445566778899aabg";
        assert_eq!(process_word(tainted, &config), tainted);
    }

    #[test]
    fn test_dup_sense_threshold() {
        let config = FilterConfig {
            dup_sense: 50,
            ..Default::default()
        };
        assert_eq!(process_word("aaab", &config), "");
        assert_eq!(process_word("aab", &config), "");
        // exactly 50% is not strictly greater
        assert_eq!(process_word("ab", &config), "ab");
        assert_eq!(process_word("abcd", &config), "abcd");
    }

    #[test]
    fn test_dup_sense_counts_whole_word() {
        // no run longer than one, but 'a' is 60% of the word
        assert!(exceeds_dup_sense(b"ababa", 50));
        assert!(!exceeds_dup_sense(b"ababa", 60));
        assert!(!exceeds_dup_sense(b"aaaa", 0));
        assert!(!exceeds_dup_sense(b"", 10));
    }

    #[test]
    fn test_email_sort() {
        let config = FilterConfig {
            email_sort: true,
            ..Default::default()
        };
        assert_eq!(process_word("jdoe@example.com", &config), "jdoe example.com");
        assert_eq!(process_word("not-an-email", &config), "not-an-email");
    }

    #[test]
    fn test_dewebify_then_trim() {
        let config = FilterConfig {
            dewebify: true,
            special_trim: true,
            ..Default::default()
        };
        assert_eq!(process_word("<td>&secret!</td>", &config), "secret");
        assert_eq!(process_word("<br/>", &config), "");
    }

    #[test]
    fn test_detab_and_maxtrim() {
        let config = FilterConfig {
            detab: true,
            maxtrim: 4,
            ..Default::default()
        };
        assert_eq!(process_word("\t  password", &config), "pass");
    }

    #[test]
    fn test_rejection_short_circuits() {
        let config = FilterConfig {
            digit_trim: true,
            email_sort: true,
            ..Default::default()
        };
        assert_eq!(process_word("2024", &config), "");
    }
}
