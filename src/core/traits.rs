//! Core traits for the ledger
//!
//! The ledger does not decide how payment and favorite IDs look. It asks an
//! `IdGenerator`, which lets production code use random UUIDs while tests
//! and reproducible runs plug in something deterministic.

use std::fmt::Debug;
use uuid::Uuid;

/// Source of unique opaque identifiers for payments and favorites
pub trait IdGenerator: Debug {
    /// Produce the next identifier
    ///
    /// Implementations must not return the same value twice for one ledger.
    fn next_id(&mut self) -> String;
}

/// Random v4 UUID identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `<prefix>-<n>` identifiers, starting at 1
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    /// Create a generator yielding `<prefix>-1`, `<prefix>-2`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
