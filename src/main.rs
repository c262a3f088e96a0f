//! Demo Bank CLI
//!
//! Every invocation loads the state file, runs one command, and writes the
//! state back.
//!
//! # Usage
//!
//! ```bash
//! demo-bank register --name "Ada Lovelace" --email ada@example.com --phone 555-0101 --pin 1234
//! demo-bank deposit 250 --note "Salary"
//! demo-bank withdraw 40 --pin 1234
//! demo-bank history --type withdrawal --csv > withdrawals.csv
//! demo-bank logout
//! demo-bank login 1000123456 --pin 1234
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: The command was rejected (wrong PIN, limit reached, no session, ...)

use demo_bank_engine::{cli, logging};
use std::process;

fn main() {
    logging::init_tracing();

    let args = cli::parse_args();
    let config = args.to_app_config();

    let mut output = std::io::stdout();
    if let Err(e) = cli::run(args.command, &config, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
