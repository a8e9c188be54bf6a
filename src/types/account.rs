//! Account-related types for the wallet ledger
//!
//! This module defines the Account structure together with the identifier
//! and currency aliases shared by every other entity.

/// Account identifier
///
/// Assigned monotonically by the ledger on registration.
pub type AccountId = i64;

/// Currency amount in the smallest unit
///
/// Signed so that imported snapshots can carry any balance; no overflow
/// protection is applied to arithmetic on it.
pub type Money = i64;

/// Wallet account state
///
/// An account is identified by its numeric ID and a phone number that is
/// unique at registration time. Accounts are never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Account ID assigned at registration (or read from a snapshot)
    pub id: AccountId,

    /// Phone number the account was registered with
    pub phone: String,

    /// Current balance
    ///
    /// Debits never take this below zero; deposits and refunds only add to it.
    pub balance: Money,
}

impl Account {
    /// Create a new account with a zero balance
    ///
    /// # Arguments
    ///
    /// * `id` - The account ID
    /// * `phone` - The phone number that identifies the owner
    pub fn new(id: AccountId, phone: impl Into<String>) -> Self {
        Account {
            id,
            phone: phone.into(),
            balance: 0,
        }
    }
}
