//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - The ID generator abstraction used for payments and favorites
//! - `ledger` - The ledger service that owns all entities
//! - `aggregator` - Parallel summation of payment amounts

pub mod aggregator;
pub mod ledger;
pub mod traits;

pub use aggregator::{partition_payments, sum_payments};
pub use ledger::LedgerService;
pub use traits::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
