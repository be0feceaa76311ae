use std::process;

use clap::Parser;
use cpe2csv::batch::{Converter, RunReport, format_stamp};
use cpe2csv::cli::Cli;
use cpe2csv::{ConvertError, logging};

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    // one stamp for the log file and every report of the run
    let stamp = match format_stamp(&config.timestamp_format) {
        Ok(stamp) => stamp,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    let log_path = match logging::init(&config.log_dir, &stamp, cli.log_directive()) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: cannot set up logging: {e}");
            return 1;
        }
    };

    match Converter::new(config).run_with_stamp(&cli.input_dir, &stamp) {
        Ok(report) => {
            print_summary(&report);
            println!("Log: {}", log_path.display());
            0
        }
        Err(e) => {
            tracing::error!(error = %e, "conversion aborted");
            eprintln!("Error: {e}");
            exit_code(&e)
        }
    }
}

fn exit_code(e: &ConvertError) -> i32 {
    match e {
        ConvertError::Config(_) => 1,
        ConvertError::InputDirectory(_) => 2,
        ConvertError::OutputDirectory { .. } => 3,
        _ => 4,
    }
}

fn print_summary(report: &RunReport) {
    let stats = &report.stats;
    println!("Documents found:     {}", stats.total_files);
    println!("Converted:           {}", stats.processed);
    println!("Errors:              {}", stats.errors);
    println!("Unrecognized:        {}", stats.unknown);
    for (doc_type, count) in &stats.by_type {
        println!("  {:<18} {count}", doc_type.label());
    }
    for failure in &report.failures {
        println!("  skipped {}: {}", failure.source, failure.error);
    }
    println!("Reports:");
    for path in &report.outputs {
        println!("  {}", path.display());
    }
}
