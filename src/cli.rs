//! Command-line interface definition for wordlist-sort
//!
//! Every pipeline option maps 1:1 onto a flag; see
//! [`ProcessorConfig::from_args`](crate::processor::ProcessorConfig::from_args).

use clap::Parser;
use std::path::PathBuf;

/// Wordlist cleaner for penetration testing
///
/// Normalize raw text sources into candidate password lists: strip HTML,
/// trim digits and punctuation, reject numbers, hashes and repetitive junk,
/// then sort and deduplicate.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wordlist-sort",
    author = "m0h1nd4",
    version,
    about = "Wordlist cleaner for penetration testing",
    long_about = r#"
Normalize and filter large wordlists. Each input file is processed on its own
thread; results are merged in the order the inputs were given.

PIPELINE ORDER (fixed):
    dewebify -> lower -> digit/special trim -> detab -> maxtrim -> dup-remove
    -> no-numbers -> hash-remove -> dup-sense -> email-sort
    then the --minlen/--maxlen window, then --sort/--deduplicate.

EXAMPLES:
    # Lowercase and trim digits and punctuation from both ends
    wordlist-sort out.txt raw.txt --lower --digit-trim --special-trim

    # Words from scraped HTML, ASCII only, sorted and unique
    wordlist-sort out.txt dump1.html dump2.html --dewebify --noutf8 --wordify --deduplicate

    # Drop numbers, hashes and words that are mostly one character
    wordlist-sort out.txt leak.txt --no-numbers --hash-remove --dup-sense 60
"#
)]
pub struct Args {
    /// Output file path
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Input file paths
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Filter out words over a certain max length (0 = off)
    #[arg(long, value_name = "LEN", default_value_t = 0)]
    pub maxlen: usize,

    /// Trim words over a certain max length (0 = off)
    #[arg(long, value_name = "LEN", default_value_t = 0)]
    pub maxtrim: usize,

    /// Trim all digits from beginning and end of words
    #[arg(long, default_value_t = false)]
    pub digit_trim: bool,

    /// Trim all special characters from beginning and end of words
    #[arg(long, default_value_t = false)]
    pub special_trim: bool,

    /// Collapse runs of the same character within words
    #[arg(long, default_value_t = false)]
    pub dup_remove: bool,

    /// Change words to lower case
    #[arg(long, default_value_t = false)]
    pub lower: bool,

    /// Split input lines into separate words
    #[arg(long, default_value_t = false)]
    pub wordify: bool,

    /// Drop words that are all numeric
    #[arg(long, default_value_t = false)]
    pub no_numbers: bool,

    /// Filter out words below a certain min length (0 = off)
    #[arg(long, value_name = "LEN", default_value_t = 0)]
    pub minlen: usize,

    /// Remove tabs and spaces from the beginning of words
    #[arg(long, default_value_t = false)]
    pub detab: bool,

    /// Drop a word if one byte value makes up more than PERCENT% of it (0 = off)
    #[arg(
        long,
        value_name = "PERCENT",
        default_value_t = 0,
        value_parser = clap::value_parser!(u32).range(0..=100)
    )]
    pub dup_sense: u32,

    /// Drop words that look like hex hashes (32+ hex characters)
    #[arg(long, default_value_t = false)]
    pub hash_remove: bool,

    /// Rewrite email addresses as "user domain"
    #[arg(long, default_value_t = false)]
    pub email_sort: bool,

    /// Username and domain wordlist targets for email extraction (format: user:domain)
    #[arg(long, value_name = "USER:DOMAIN")]
    pub email_split: Option<String>,

    /// Strip HTML tags from input
    #[arg(long, default_value_t = false)]
    pub dewebify: bool,

    /// Drop non-ASCII bytes (only with --dewebify)
    #[arg(long, default_value_t = false)]
    pub noutf8: bool,

    /// Sort the output words
    #[arg(long, default_value_t = false)]
    pub sort: bool,

    /// Remove duplicate words from the output (implies --sort)
    #[arg(long, default_value_t = false)]
    pub deduplicate: bool,

    /// Number of threads for sorting (default: auto-detect)
    #[arg(short = 't', long, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Quiet mode - minimal output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
