//! Payment and favorite types for the wallet ledger
//!
//! Payments are created by debiting an account. Favorites are templates
//! copied from an existing payment so the same debit can be issued again.

use super::account::{AccountId, Money};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque payment identifier produced by the ledger's ID generator
pub type PaymentId = String;

/// Opaque favorite identifier produced by the ledger's ID generator
pub type FavoriteId = String;

/// Payment lifecycle state
///
/// There is no separate "completed" state: a payment stays `InProgress`
/// until it is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Debited from the account and not rejected
    #[serde(rename = "INPROGRESS")]
    InProgress,

    /// Rejected; the amount was refunded to the account
    #[serde(rename = "FAIL")]
    Fail,
}

impl PaymentStatus {
    /// Wire value used in dump files
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::InProgress => "INPROGRESS",
            PaymentStatus::Fail => "FAIL",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A debit issued against an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    /// Unique payment ID
    pub id: PaymentId,

    /// Account the amount was debited from
    pub account_id: AccountId,

    /// Debited amount (always positive when created by the ledger)
    pub amount: Money,

    /// Free-form category tag
    pub category: String,

    /// Current status
    pub status: PaymentStatus,
}

/// A payment template saved for repeat use
///
/// Favorites are immutable once created, except when a dump import
/// overwrites them by ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    /// Unique favorite ID
    pub id: FavoriteId,

    /// Account the template debits
    pub account_id: AccountId,

    /// Label given when the favorite was saved
    pub name: String,

    /// Amount to debit
    pub amount: Money,

    /// Category copied from the source payment
    pub category: String,
}
