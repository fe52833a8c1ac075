//! Wordlist Sort - wordlist normalization for penetration testing
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use wordlist_sort::cli::Args;
use wordlist_sort::processor::{Processor, ProcessorConfig};
use wordlist_sort::progress::{
    print_banner, print_bullet, print_error, print_header, print_info, print_warning,
};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if !args.quiet {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    // Configure thread pool used by the final sort
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .ok();
    }

    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            print_error(&format!("{}", e));

            // Print chain of errors
            let mut source = e.source();
            while let Some(err) = source {
                print_error(&format!("  Caused by: {}", err));
                source = err.source();
            }

            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when some inputs could not be read
fn run(args: Args) -> anyhow::Result<bool> {
    if !args.quiet {
        print_banner();
    }

    // Option errors abort before any file is touched
    let config = ProcessorConfig::from_args(&args)?;

    if !args.quiet && args.verbose {
        print_config(&args, &config);
    }

    let processor = Processor::new(config);
    let (stats, failures) = processor.process(&args.inputs, &args.output)?;

    for failure in &failures {
        match std::error::Error::source(failure) {
            Some(cause) => print_warning(&format!("{}: {}", failure, cause)),
            None => print_warning(&format!("{}", failure)),
        }
    }

    if !args.quiet {
        stats.print_summary();
    } else {
        println!(
            "Processed {} total words ({} unique)",
            stats.accepted(),
            stats.final_words
        );
    }

    Ok(failures.is_empty())
}

/// Print configuration summary
fn print_config(args: &Args, config: &ProcessorConfig) {
    print_header("Configuration");

    print_info(&format!("Output:       {:?}", args.output));
    print_info("Inputs:");
    for input in &args.inputs {
        print_bullet(&format!("{:?}", input));
    }
    print_info(&format!("Pipeline:     {:?}", config.filter));
    print_info(&format!("Wordify:      {}", config.wordify));
    print_info(&format!("No UTF-8:     {}", config.no_utf8));
    print_info(&format!("Length:       min {} / max {}", config.minlen, config.maxlen));
    print_info(&format!("Sort:         {}", config.sort));
    print_info(&format!("Deduplicate:  {}", config.deduplicate));
    if let Some(ref split) = config.email_split {
        print_info(&format!("Email split:  {} / {}", split.user, split.domain));
    }
    print_info(&format!(
        "Threads:      {}",
        args.threads.unwrap_or_else(num_cpus::get)
    ));
}
