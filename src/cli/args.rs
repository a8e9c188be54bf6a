use crate::types::{AccountId, Money};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Manage a wallet ledger stored as dump files
#[derive(Parser, Debug)]
#[command(name = "wallet-ledger")]
#[command(about = "Manage wallet accounts, payments and favorites", long_about = None)]
pub struct CliArgs {
    /// Directory holding the ledger dump files
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        default_value = "data",
        help = "Directory with accounts.dump, payments.dump and favorites.dump"
    )]
    pub data_dir: PathBuf,

    /// Operation to run against the ledger
    #[command(subcommand)]
    pub command: Command,
}

/// Ledger operations available from the command line
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Register a new account
    Register {
        /// Phone number of the new account
        phone: String,
    },

    /// Credit an account
    Deposit {
        account_id: AccountId,
        #[arg(allow_negative_numbers = true)]
        amount: Money,
    },

    /// Debit an account and record a payment
    Pay {
        account_id: AccountId,
        #[arg(allow_negative_numbers = true)]
        amount: Money,
        category: String,
    },

    /// Fail a payment and refund it
    Reject { payment_id: String },

    /// Issue a payment again
    Repeat { payment_id: String },

    /// Save a payment as a named favorite
    Favorite { payment_id: String, name: String },

    /// Issue a payment from a favorite
    PayFavorite { favorite_id: String },

    /// Sum the amounts of all payments
    Sum {
        #[arg(
            long = "workers",
            value_name = "COUNT",
            help = "Number of concurrent workers (default: CPU cores)"
        )]
        workers: Option<usize>,
    },

    /// List all accounts as CSV
    Accounts,

    /// Export accounts to a single file (ID;Phone;Balance|...)
    ExportFile { path: PathBuf },

    /// Append accounts from a single-file export
    ImportFile { path: PathBuf },
}

impl Command {
    /// Worker count for `sum`, falling back to the number of CPU cores
    pub fn worker_count(workers: Option<usize>) -> usize {
        workers.unwrap_or_else(num_cpus::get)
    }
}
