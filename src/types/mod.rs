//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account type and the identifier/currency aliases
//! - `payment`: Payment, payment status and favorite types
//! - `error`: Error types for the wallet ledger

pub mod account;
pub mod error;
pub mod payment;

pub use account::{Account, AccountId, Money};
pub use error::WalletError;
pub use payment::{Favorite, FavoriteId, Payment, PaymentId, PaymentStatus};
