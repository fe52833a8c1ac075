//! # Wordlist Sort
//!
//! Wordlist normalization tool for penetration testing.
//!
//! ## Features
//!
//! - **Cleaning**: strip HTML, lowercase, trim digits/punctuation/indentation
//! - **Rejection**: drop all-digit words, hex hashes and words dominated by one character
//! - **Email handling**: rewrite `user@domain.tld` as `user domain.tld`
//! - **Parallel ingestion**: one worker per input file, merged in input order
//! - **Finalization**: sort and deduplicate the merged list
//! - **Byte-exact**: words stay raw bytes, non-UTF-8 input is never re-encoded
//!
//! ## Usage
//!
//! ```bash
//! wordlist-sort out.txt raw1.txt raw2.txt --lower --digit-trim --special-trim --deduplicate
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use wordlist_sort::filter::{process_word, FilterConfig};
//!
//! let config = FilterConfig {
//!     lower: true,
//!     digit_trim: true,
//!     special_trim: true,
//!     ..Default::default()
//! };
//!
//! assert_eq!(process_word("Hello123!!", &config), "hello");
//! ```

pub mod charclass;
pub mod cli;
pub mod email;
pub mod encoding;
pub mod error;
pub mod filter;
pub mod output;
pub mod processor;
pub mod progress;
pub mod sanitize;

pub use cli::Args;
pub use error::{Error, Result};
pub use processor::{Processor, ProcessorConfig};
