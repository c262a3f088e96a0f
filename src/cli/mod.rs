// CLI module
// Command-line interface, argument parsing and command dispatch

mod args;
mod commands;

pub use args::{CliArgs, Command, TxTypeArg};
pub use commands::{open_bank, run, FileBackedBank};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// On invalid arguments or `--help`, clap prints the message and exits the
/// process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
