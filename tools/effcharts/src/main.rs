//! Browser efficiency chart generator.
//!
//! Reads the exports of a measurement run (performance counters, benchmark
//! scores, SRUM energy dumps, Intel Power Gadget and IPPET logs), reduces
//! each browser's samples to medians and draws one comparison chart per
//! measure set.
//!
//! Pipeline: load config → discover files → extract per source →
//!           group → median + baseline diffs → render PNG.

mod cli;
mod compare;
mod config;
mod report;

use std::process::ExitCode;

use clap::Parser;
use effcharts_core::verbose;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    verbose::init(cli.quiet, cli.verbose);

    let result = match cli.command {
        cli::Command::Report(ref args) => report::cmd_report(args),
        cli::Command::Compare(ref args) => compare::cmd_compare(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
