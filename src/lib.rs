//! Wallet Ledger Library
//! # Overview
//!
//! This library provides an in-memory personal-finance ledger: accounts
//! identified by phone number, payments debited from them, favorite payment
//! templates, flat-file snapshots, and a parallel payment sum.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Payment, Favorite, errors)
//! - [`cli`] - CLI arguments parsing and command execution
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - The ledger service owning all entities
//!   - [`core::aggregator`] - Parallel summation of payment amounts
//!   - [`core::traits`] - Pluggable payment/favorite ID generation
//! - [`io`] - The two snapshot formats
//!
//! # Ledger Operations
//!
//! - **Register**: Create an account for an unused phone number
//! - **Deposit**: Credit an account (zero is accepted)
//! - **Pay**: Debit an account and record a payment (amount must be positive)
//! - **Reject**: Fail a payment and refund it (no status check, repeated rejects refund again)
//! - **Repeat**: Issue a new payment copying an existing one
//! - **Favorite / Pay from favorite**: Save a payment as a template and reuse it
//!
//! # Snapshot Formats
//!
//! - `export_to_file` / `import_from_file`: accounts only, `ID;Phone;Balance|` records, import appends
//! - `export` / `import`: one `.dump` file per entity type in a directory, import merges by ID
//!
//! # Concurrency
//!
//! `LedgerService` has no internal locking; callers serialize access. Only
//! `sum_payments` runs work in parallel, over disjoint read-only chunks.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{LedgerService, SequentialIdGenerator, UuidIdGenerator};
pub use types::{
    Account, AccountId, Favorite, FavoriteId, Money, Payment, PaymentId, PaymentStatus,
    WalletError,
};
