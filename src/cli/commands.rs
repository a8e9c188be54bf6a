//! Command execution
//!
//! Each invocation loads the ledger from the dump directory, runs one
//! command, writes its result to the output, and saves the dump again if
//! the command changed anything.

use super::args::{CliArgs, Command};
use crate::core::LedgerService;
use crate::io::write_accounts_csv;
use crate::types::WalletError;
use std::fs;
use std::io::Write;
use thiserror::Error;
use tracing::info;

/// Run the parsed command against the ledger stored in `args.data_dir`
///
/// # Arguments
///
/// * `args` - Parsed command-line arguments
/// * `output` - Writer receiving the command result
///
/// # Returns
///
/// * `Ok(())` if the command succeeded and the dump was saved
/// * `Err(String)` describing the failure otherwise; the dump is not
///   rewritten when the command itself fails
pub fn run(args: &CliArgs, output: &mut dyn Write) -> Result<(), String> {
    fs::create_dir_all(&args.data_dir).map_err(|e| {
        format!(
            "Failed to create data directory '{}': {}",
            args.data_dir.display(),
            e
        )
    })?;

    let mut ledger = LedgerService::new();
    ledger
        .import(&args.data_dir)
        .map_err(|e| format!("Failed to load ledger: {}", e))?;

    let changed = execute(&mut ledger, &args.command, output).map_err(|e| e.to_string())?;

    if changed {
        ledger
            .export(&args.data_dir)
            .map_err(|e| format!("Failed to save ledger: {}", e))?;
        info!(dir = %args.data_dir.display(), "ledger saved");
    }

    Ok(())
}

/// Execute one command, returning whether the ledger was modified
fn execute(
    ledger: &mut LedgerService,
    command: &Command,
    output: &mut dyn Write,
) -> Result<bool, CommandError> {
    match command {
        Command::Register { phone } => {
            let account = ledger.register_account(phone)?;
            writeln!(output, "{}", account.id)?;
            Ok(true)
        }
        Command::Deposit { account_id, amount } => {
            ledger.deposit(*account_id, *amount)?;
            let balance = ledger.find_account_by_id(*account_id)?.balance;
            writeln!(output, "{}", balance)?;
            Ok(true)
        }
        Command::Pay {
            account_id,
            amount,
            category,
        } => {
            let payment = ledger.pay(*account_id, *amount, category)?;
            writeln!(output, "{}", payment.id)?;
            Ok(true)
        }
        Command::Reject { payment_id } => {
            ledger.reject(payment_id)?;
            Ok(true)
        }
        Command::Repeat { payment_id } => {
            let payment = ledger.repeat(payment_id)?;
            writeln!(output, "{}", payment.id)?;
            Ok(true)
        }
        Command::Favorite { payment_id, name } => {
            let favorite = ledger.favorite_payment(payment_id, name)?;
            writeln!(output, "{}", favorite.id)?;
            Ok(true)
        }
        Command::PayFavorite { favorite_id } => {
            let payment = ledger.pay_from_favorite(favorite_id)?;
            writeln!(output, "{}", payment.id)?;
            Ok(true)
        }
        Command::Sum { workers } => {
            let total = ledger.sum_payments(Command::worker_count(*workers));
            writeln!(output, "{}", total)?;
            Ok(false)
        }
        Command::Accounts => {
            write_accounts_csv(ledger.accounts(), output).map_err(CommandError::Output)?;
            Ok(false)
        }
        Command::ExportFile { path } => {
            ledger.export_to_file(path)?;
            Ok(false)
        }
        Command::ImportFile { path } => {
            ledger.import_from_file(path)?;
            writeln!(output, "{}", ledger.accounts().len())?;
            Ok(true)
        }
    }
}

/// Failure of a single command
#[derive(Debug, Error)]
enum CommandError {
    #[error(transparent)]
    Ledger(#[from] WalletError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Output(String),
}
