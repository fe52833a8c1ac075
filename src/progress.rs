//! Progress display module
//!
//! Styled console output, the per-file progress bar and the run statistics.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Print the program name and version
pub fn print_banner() {
    println!(
        "{} {}",
        env!("CARGO_PKG_NAME").green().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).green()
    );
    println!("{}", env!("CARGO_PKG_DESCRIPTION").bright_black());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// Progress bar counting finished input files
pub fn create_files_progress_bar(total_files: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total_files);

    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Counters for one run
///
/// `accepted` is bumped by every ingestion worker; the rest is filled in by
/// the coordinator and the finalization step.
#[derive(Debug)]
pub struct RunStats {
    accepted: AtomicU64,
    pub input_bytes: u64,
    pub files_ok: usize,
    pub files_failed: usize,
    pub final_words: usize,
    pub start_time: Instant,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            accepted: AtomicU64::new(0),
            input_bytes: 0,
            files_ok: 0,
            files_failed: 0,
            final_words: 0,
            start_time: Instant::now(),
        }
    }

    /// Record one accepted word. Safe to call from any worker.
    #[inline]
    pub fn add_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Print final statistics
    pub fn print_summary(&self) {
        println!();
        println!("{}", "═".repeat(60).green());
        println!("{}", "                    PROCESSING COMPLETE".green().bold());
        println!("{}", "═".repeat(60).green());
        println!();

        println!(
            "  {} {}",
            "Files processed:".green(),
            format!("{}/{}", self.files_ok, self.files_ok + self.files_failed)
        );
        println!("  {} {}", "Data read:      ".green(), ByteSize(self.input_bytes));
        if self.files_failed > 0 {
            println!(
                "  {} {}",
                "Failed files:   ".red(),
                self.files_failed.to_string().red()
            );
        }
        println!();

        println!(
            "  {} {}",
            "Total words:    ".green(),
            format_number(self.accepted())
        );
        println!(
            "  {} {}",
            "Final output:   ".green().bold(),
            format_number(self.final_words as u64).green().bold()
        );
        println!();
        println!(
            "  {} {}",
            "Duration:       ".green(),
            format_duration(self.elapsed())
        );
        println!();
        println!("{}", "═".repeat(60).green());
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30.0s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m");
    }

    #[test]
    fn test_accepted_counter_under_contention() {
        let stats = Arc::new(RunStats::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = Arc::clone(&stats);
                thread::spawn(move || {
                    for _ in 0..10_000 {
                        stats.add_accepted();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(stats.accepted(), 80_000);
    }
}
