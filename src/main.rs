//! Wallet Ledger CLI
//!
//! Command-line interface over a ledger persisted as dump files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- register +992000000001
//! cargo run -- deposit 1 1000
//! cargo run -- pay 1 250 mobile
//! cargo run -- --data-dir /tmp/ledger sum --workers 4
//! cargo run -- export-file data/export.txt
//! ```
//!
//! Each run loads `accounts.dump`, `payments.dump` and `favorites.dump` from
//! the data directory, applies one command, prints its result to stdout and
//! saves the dumps back.
//!
//! # Logging
//!
//! Log output goes to stderr and is controlled by `RUST_LOG` (default `warn`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (unknown account, not enough balance, unreadable file, etc.)

use std::process;
use tracing_subscriber::EnvFilter;
use wallet_ledger::cli;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    let mut output = std::io::stdout();
    if let Err(e) = cli::run(&args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
