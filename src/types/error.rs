//! Error types for the wallet ledger
//!
//! This module defines all error types that ledger operations and the
//! persistence adapters can return. Every error goes back to the immediate
//! caller; nothing is retried or treated as fatal inside the library.
//!
//! # Error Categories
//!
//! - **Ledger Errors**: Duplicate phone, non-positive amount, missing entities, low balance
//! - **File Errors**: Any failure to open, read or write a snapshot file
//! - **Parse Errors**: Malformed records in a snapshot file

use super::account::{AccountId, Money};
use std::path::Path;
use thiserror::Error;

/// Main error type for the wallet ledger
///
/// Each variant includes the context needed to tell which entity or file
/// the failure refers to.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WalletError {
    /// An account with this phone number already exists
    #[error("Phone already registered: {phone}")]
    PhoneAlreadyRegistered {
        /// The phone number that was rejected
        phone: String,
    },

    /// Amount is zero or negative where a positive amount is required
    ///
    /// Payments reject zero; deposits only reject negative amounts.
    #[error("Amount must be greater than zero, got {amount}")]
    AmountMustBePositive {
        /// The rejected amount
        amount: Money,
    },

    /// No account with this ID exists
    #[error("Account {account_id} not found")]
    AccountNotFound {
        /// The account ID that was looked up
        account_id: AccountId,
    },

    /// Account balance is lower than the requested debit
    #[error("Not enough balance on account {account_id}: balance {balance}, requested {requested}")]
    NotEnoughBalance {
        /// Account ID
        account_id: AccountId,
        /// Balance at the time of the request
        balance: Money,
        /// Requested debit
        requested: Money,
    },

    /// No payment with this ID exists
    #[error("Payment {payment_id} not found")]
    PaymentNotFound {
        /// The payment ID that was looked up
        payment_id: String,
    },

    /// No favorite with this ID exists
    #[error("Favorite {favorite_id} not found")]
    FavoriteNotFound {
        /// The favorite ID that was looked up
        favorite_id: String,
    },

    /// A snapshot file could not be opened, read or written
    #[error("File not found: {path}: {message}")]
    FileNotFound {
        /// Path of the file
        path: String,
        /// Underlying I/O error
        message: String,
    },

    /// A snapshot record could not be parsed
    #[error("Parse error in {path}{}: {message}", line.map(|l| format!(" at record {}", l)).unwrap_or_default())]
    Parse {
        /// Path of the file
        path: String,
        /// Record number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

// Helper functions for creating common errors

impl WalletError {
    /// Create a PhoneAlreadyRegistered error
    pub fn phone_already_registered(phone: &str) -> Self {
        WalletError::PhoneAlreadyRegistered {
            phone: phone.to_string(),
        }
    }

    /// Create an AmountMustBePositive error
    pub fn amount_must_be_positive(amount: Money) -> Self {
        WalletError::AmountMustBePositive { amount }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account_id: AccountId) -> Self {
        WalletError::AccountNotFound { account_id }
    }

    /// Create a NotEnoughBalance error
    pub fn not_enough_balance(account_id: AccountId, balance: Money, requested: Money) -> Self {
        WalletError::NotEnoughBalance {
            account_id,
            balance,
            requested,
        }
    }

    /// Create a PaymentNotFound error
    pub fn payment_not_found(payment_id: &str) -> Self {
        WalletError::PaymentNotFound {
            payment_id: payment_id.to_string(),
        }
    }

    /// Create a FavoriteNotFound error
    pub fn favorite_not_found(favorite_id: &str) -> Self {
        WalletError::FavoriteNotFound {
            favorite_id: favorite_id.to_string(),
        }
    }

    /// Create a FileNotFound error from an I/O failure on `path`
    pub fn file_not_found(path: &Path, error: std::io::Error) -> Self {
        WalletError::FileNotFound {
            path: path.display().to_string(),
            message: error.to_string(),
        }
    }

    /// Create a Parse error for a record in `path`
    pub fn parse(path: &Path, line: Option<u64>, message: impl Into<String>) -> Self {
        WalletError::Parse {
            path: path.display().to_string(),
            line,
            message: message.into(),
        }
    }

    /// Convert a csv error raised while reading or writing `path`
    ///
    /// I/O failures become `FileNotFound`; everything else is a parse error
    /// carrying the record number when csv knows it.
    pub fn from_csv(path: &Path, error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.record() + 1);
        let message = error.to_string();
        match error.into_kind() {
            csv::ErrorKind::Io(io_error) => Self::file_not_found(path, io_error),
            _ => Self::parse(path, line, message),
        }
    }
}
