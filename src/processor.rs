//! Core processing engine
//!
//! Loads every input file on its own worker thread, runs each line (or each
//! whitespace token with `--wordify`) through the word pipeline, merges the
//! per-file results in the order the files were given, then sorts and
//! deduplicates the merged list.

use crate::cli::Args;
use crate::email::EmailSplit;
use crate::encoding::load_bytes;
use crate::error::{Error, Result};
use crate::filter::{FilterConfig, WordFilter};
use crate::output::write_words;
use crate::progress::{create_files_progress_bar, print_header, print_info, print_success, RunStats};
use crate::sanitize::{ascii_only, strip_html_tags};

use bstr::BString;
use colored::*;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::thread;

/// Processor configuration, fixed for the whole run
#[derive(Debug, Clone, Default)]
pub struct ProcessorConfig {
    pub filter: FilterConfig,
    /// Split lines into whitespace-separated words
    pub wordify: bool,
    /// Drop non-ASCII characters from dewebified lines
    pub no_utf8: bool,
    /// Minimum accepted length (0 = off)
    pub minlen: usize,
    /// Maximum accepted length (0 = off)
    pub maxlen: usize,
    pub sort: bool,
    pub deduplicate: bool,
    /// Parsed `--email-split` target; stored, not consumed
    pub email_split: Option<EmailSplit>,
    pub quiet: bool,
    pub verbose: bool,
}

impl ProcessorConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        let email_split = args
            .email_split
            .as_deref()
            .map(EmailSplit::parse)
            .transpose()?;

        Ok(Self {
            filter: FilterConfig {
                dewebify: args.dewebify,
                lower: args.lower,
                digit_trim: args.digit_trim,
                special_trim: args.special_trim,
                detab: args.detab,
                maxtrim: args.maxtrim,
                dup_remove: args.dup_remove,
                no_numbers: args.no_numbers,
                hash_remove: args.hash_remove,
                dup_sense: args.dup_sense,
                email_sort: args.email_sort,
            },
            wordify: args.wordify,
            no_utf8: args.noutf8,
            minlen: args.minlen,
            maxlen: args.maxlen,
            sort: args.sort,
            deduplicate: args.deduplicate,
            email_split,
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }

    /// Length window applied after the pipeline, in bytes
    #[inline]
    pub fn accepts_length(&self, word: &[u8]) -> bool {
        let len = word.len();
        (self.minlen == 0 || len >= self.minlen) && (self.maxlen == 0 || len <= self.maxlen)
    }
}

/// Accepted words of a single input file, in encounter order
#[derive(Debug, Default)]
pub struct FileWords {
    pub path: PathBuf,
    pub words: Vec<BString>,
    /// Loaded size of the file
    pub bytes: u64,
}

impl FileWords {
    pub fn accepted(&self) -> usize {
        self.words.len()
    }
}

/// Line iterator splitting on `\n` only; `\r` stays part of the line
struct Lines<'a> {
    text: &'a [u8],
    done: bool,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        if self.done {
            return None;
        }

        match memchr::memchr(b'\n', self.text) {
            Some(end) => {
                let line = &self.text[..end];
                self.text = &self.text[end + 1..];
                Some(line)
            }
            None => {
                self.done = true;
                Some(self.text)
            }
        }
    }
}

fn lines(text: &[u8]) -> Lines<'_> {
    Lines { text, done: false }
}

/// Whitespace tokens of a line
fn words(line: &[u8]) -> impl Iterator<Item = &[u8]> {
    line.split(|&b| b.is_ascii_whitespace() || b == b'\x0b')
        .filter(|token| !token.is_empty())
}

/// Load one file and collect the words it contributes
///
/// Reading the file is the only thing that can fail. `stats` receives one
/// increment per accepted word.
pub fn ingest_file(path: &Path, config: &ProcessorConfig, stats: &RunStats) -> Result<FileWords> {
    let content = load_bytes(path)?;
    let filter = WordFilter::new(&config.filter);

    let mut out = FileWords {
        path: path.to_path_buf(),
        words: Vec::new(),
        bytes: content.len() as u64,
    };

    let mut try_add = |candidate: &[u8]| {
        let word = filter.process(candidate);
        if !word.is_empty() && config.accepts_length(&word) {
            out.words.push(word);
            stats.add_accepted();
        }
    };

    for raw_line in lines(&content) {
        let cleaned;
        let line = if config.filter.dewebify {
            let stripped = strip_html_tags(raw_line);
            cleaned = if config.no_utf8 {
                ascii_only(&stripped)
            } else {
                stripped
            };
            cleaned.as_slice()
        } else {
            raw_line
        };

        if config.wordify {
            words(line).for_each(&mut try_add);
        } else {
            try_add(line);
        }
    }

    log::debug!("{:?}: {} words accepted", path, out.accepted());
    Ok(out)
}

/// Merged result of all input files
#[derive(Debug, Default)]
pub struct Ingested {
    /// Accepted words, concatenated in input order
    pub words: Vec<BString>,
    pub files_ok: usize,
    pub bytes: u64,
    /// Files that could not be read
    pub failures: Vec<Error>,
}

impl Ingested {
    pub fn all_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Ingest every path concurrently with [`ingest_file`]
pub fn ingest_all(paths: &[PathBuf], config: &ProcessorConfig, stats: &RunStats) -> Ingested {
    ingest_all_with(paths, config, stats, ingest_file)
}

/// Ingest every path concurrently with a custom per-file function
///
/// One thread is started per path. Results are slotted by input position as
/// they arrive, so the merged order is the input order no matter which file
/// finishes first. A failing file never stops the others.
pub fn ingest_all_with<F>(
    paths: &[PathBuf],
    config: &ProcessorConfig,
    stats: &RunStats,
    ingest: F,
) -> Ingested
where
    F: Fn(&Path, &ProcessorConfig, &RunStats) -> Result<FileWords> + Sync,
{
    let pb = if config.quiet {
        ProgressBar::hidden()
    } else {
        create_files_progress_bar(paths.len() as u64, "Ingesting...")
    };

    let mut slots: Vec<Option<Result<FileWords>>> = paths.iter().map(|_| None).collect();
    let (tx, rx) = crossbeam_channel::unbounded();
    let ingest = &ingest;

    thread::scope(|scope| {
        for (index, path) in paths.iter().enumerate() {
            let worker_tx = tx.clone();
            let spawned = thread::Builder::new()
                .name(format!("ingest-{}", index))
                .spawn_scoped(scope, move || {
                    let _ = worker_tx.send((index, ingest(path.as_path(), config, stats)));
                });

            if let Err(e) = spawned {
                log::warn!("Could not start worker for {:?} ({}), ingesting inline", path, e);
                slots[index] = Some(ingest(path.as_path(), config, stats));
                pb.inc(1);
            }
        }
        drop(tx);

        for (index, outcome) in rx.iter() {
            slots[index] = Some(outcome);
            pb.inc(1);
        }
    });

    pb.finish_with_message("Complete".green().to_string());

    let mut merged = Ingested::default();
    for outcome in slots.into_iter().flatten() {
        match outcome {
            Ok(mut file) => {
                merged.files_ok += 1;
                merged.bytes += file.bytes;
                merged.words.append(&mut file.words);
            }
            Err(e) => {
                log::warn!("{}", e);
                merged.failures.push(e);
            }
        }
    }

    merged
}

/// Sort and/or deduplicate the merged list
///
/// Deduplication collapses adjacent equal words, so it always sorts first.
pub fn finalize(mut words: Vec<BString>, sort: bool, deduplicate: bool) -> Vec<BString> {
    if deduplicate && !sort {
        log::warn!("Deduplication requires sorted input; sorting output");
    }

    if sort || deduplicate {
        words.par_sort_unstable();
    }

    if deduplicate {
        words.dedup();
    }

    words
}

/// Main processor
pub struct Processor {
    config: ProcessorConfig,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    /// Ingest `inputs`, finalize, and write the result to `output`
    ///
    /// Unreadable inputs are skipped and handed back alongside the stats; only
    /// a failure to write `output` is an error.
    pub fn process(&self, inputs: &[PathBuf], output: &Path) -> Result<(RunStats, Vec<Error>)> {
        let mut stats = RunStats::new();

        if !self.config.quiet {
            print_header(&format!("Processing {} input files...", inputs.len()));
        }

        let ingested = ingest_all(inputs, &self.config, &stats);
        stats.files_ok = ingested.files_ok;
        stats.files_failed = ingested.failures.len();
        stats.input_bytes = ingested.bytes;

        let words = finalize(ingested.words, self.config.sort, self.config.deduplicate);
        stats.final_words = words.len();

        let written = write_words(output, &words)?;

        if !self.config.quiet {
            print_success(&format!("Output written to: {:?}", output));
            print_info(&format!("Words written: {}", written));
        }

        Ok((stats, ingested.failures))
    }
}
