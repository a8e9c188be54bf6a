//! Ledger service
//!
//! This module provides the `LedgerService`, the sole owner of accounts,
//! payments and favorites. Every mutation and query goes through it, and the
//! persistence adapters in [`crate::io`] and the aggregator in
//! [`crate::core::aggregator`] operate on its collections.
//!
//! # Lookups
//!
//! Entities live in insertion-ordered vectors and lookups are linear scans.
//! The scan direction is part of the observable behavior:
//! - accounts and favorites: first match wins
//! - payments: last match wins (matters only when imported data carries duplicate IDs)
//!
//! # Arithmetic
//!
//! Balances and account IDs are plain `i64`s updated with wrapping
//! arithmetic: a deposit past `i64::MAX` wraps to a negative balance, and
//! registering after an account with ID `i64::MAX` yields ID `i64::MIN`.
//!
//! # Concurrency
//!
//! The service has no internal locking. Mutating methods take `&mut self`, so
//! callers that share a ledger across threads must wrap it in their own mutex.

use crate::core::aggregator;
use crate::core::traits::{IdGenerator, UuidIdGenerator};
use crate::types::{Account, AccountId, Favorite, Money, Payment, PaymentStatus, WalletError};
use tracing::debug;

/// In-memory wallet ledger
///
/// Owns every entity collection and enforces the ledger rules:
/// - phone numbers are unique at registration
/// - payments need a positive amount and enough balance
/// - deposits accept zero but not negative amounts
#[derive(Debug)]
pub struct LedgerService {
    /// Last account ID handed out by `register_account`
    next_account_id: AccountId,
    accounts: Vec<Account>,
    payments: Vec<Payment>,
    favorites: Vec<Favorite>,
    ids: Box<dyn IdGenerator>,
}

impl LedgerService {
    /// Create an empty ledger that issues random UUIDs for payments and favorites
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(UuidIdGenerator))
    }

    /// Create an empty ledger that takes payment and favorite IDs from `ids`
    pub fn with_id_generator(ids: Box<dyn IdGenerator>) -> Self {
        LedgerService {
            next_account_id: 0,
            accounts: Vec::new(),
            payments: Vec::new(),
            favorites: Vec::new(),
            ids,
        }
    }

    /// All accounts in insertion order
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// All payments in insertion order
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// All favorites in insertion order
    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    pub(crate) fn accounts_mut(&mut self) -> &mut Vec<Account> {
        &mut self.accounts
    }

    pub(crate) fn payments_mut(&mut self) -> &mut Vec<Payment> {
        &mut self.payments
    }

    pub(crate) fn favorites_mut(&mut self) -> &mut Vec<Favorite> {
        &mut self.favorites
    }

    /// Make sure future registrations never reuse an account ID already held
    ///
    /// Called by the importers after they append accounts read from disk.
    pub(crate) fn sync_next_account_id(&mut self) {
        if let Some(max_id) = self.accounts.iter().map(|account| account.id).max() {
            self.next_account_id = self.next_account_id.max(max_id);
        }
    }

    /// Register a new account for `phone`
    ///
    /// The new account gets the next account ID and a zero balance.
    ///
    /// # Errors
    ///
    /// Returns `PhoneAlreadyRegistered` if any account already uses `phone`.
    pub fn register_account(&mut self, phone: &str) -> Result<Account, WalletError> {
        if self.accounts.iter().any(|account| account.phone == phone) {
            return Err(WalletError::phone_already_registered(phone));
        }

        self.next_account_id = self.next_account_id.wrapping_add(1);
        let account = Account::new(self.next_account_id, phone);
        self.accounts.push(account.clone());

        debug!(account_id = account.id, phone, "registered account");
        Ok(account)
    }

    /// Find an account by ID (first match)
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no account has this ID.
    pub fn find_account_by_id(&self, account_id: AccountId) -> Result<&Account, WalletError> {
        self.accounts
            .iter()
            .find(|account| account.id == account_id)
            .ok_or_else(|| WalletError::account_not_found(account_id))
    }

    fn account_mut(&mut self, account_id: AccountId) -> Result<&mut Account, WalletError> {
        self.accounts
            .iter_mut()
            .find(|account| account.id == account_id)
            .ok_or_else(|| WalletError::account_not_found(account_id))
    }

    /// Find a payment by ID
    ///
    /// If several payments share the ID, the one added last is returned.
    ///
    /// # Errors
    ///
    /// Returns `PaymentNotFound` if no payment has this ID.
    pub fn find_payment_by_id(&self, payment_id: &str) -> Result<&Payment, WalletError> {
        self.payments
            .iter()
            .rev()
            .find(|payment| payment.id == payment_id)
            .ok_or_else(|| WalletError::payment_not_found(payment_id))
    }

    /// Find a favorite by ID (first match)
    ///
    /// # Errors
    ///
    /// Returns `FavoriteNotFound` if no favorite has this ID.
    pub fn find_favorite_by_id(&self, favorite_id: &str) -> Result<&Favorite, WalletError> {
        self.favorites
            .iter()
            .find(|favorite| favorite.id == favorite_id)
            .ok_or_else(|| WalletError::favorite_not_found(favorite_id))
    }

    /// Debit `amount` from an account and record the payment
    ///
    /// The payment gets a fresh ID and starts as `InProgress`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amount` is zero or negative (`AmountMustBePositive`)
    /// - the account does not exist (`AccountNotFound`)
    /// - the balance is lower than `amount` (`NotEnoughBalance`)
    pub fn pay(
        &mut self,
        account_id: AccountId,
        amount: Money,
        category: &str,
    ) -> Result<Payment, WalletError> {
        if amount <= 0 {
            return Err(WalletError::amount_must_be_positive(amount));
        }

        let account = self.account_mut(account_id)?;
        if account.balance < amount {
            return Err(WalletError::not_enough_balance(
                account_id,
                account.balance,
                amount,
            ));
        }
        account.balance = account.balance.wrapping_sub(amount);

        let payment = Payment {
            id: self.ids.next_id(),
            account_id,
            amount,
            category: category.to_string(),
            status: PaymentStatus::InProgress,
        };
        self.payments.push(payment.clone());

        debug!(payment_id = %payment.id, account_id, amount, category, "payment created");
        Ok(payment)
    }

    /// Credit `amount` to an account
    ///
    /// Unlike `pay`, a zero amount is accepted and leaves the balance unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amount` is negative (`AmountMustBePositive`)
    /// - the account does not exist (`AccountNotFound`)
    pub fn deposit(&mut self, account_id: AccountId, amount: Money) -> Result<(), WalletError> {
        if amount < 0 {
            return Err(WalletError::amount_must_be_positive(amount));
        }

        let account = self.account_mut(account_id)?;
        account.balance = account.balance.wrapping_add(amount);

        debug!(account_id, amount, balance = account.balance, "deposit applied");
        Ok(())
    }

    /// Mark a payment as failed and refund its amount
    ///
    /// The current status is not checked: rejecting the same payment twice
    /// refunds it twice.
    ///
    /// # Errors
    ///
    /// Returns `PaymentNotFound` or `AccountNotFound` if either lookup fails.
    /// Nothing is changed in that case.
    pub fn reject(&mut self, payment_id: &str) -> Result<(), WalletError> {
        let index = self
            .payments
            .iter()
            .rposition(|payment| payment.id == payment_id)
            .ok_or_else(|| WalletError::payment_not_found(payment_id))?;

        let (account_id, amount) = {
            let payment = &self.payments[index];
            (payment.account_id, payment.amount)
        };
        let account = self.account_mut(account_id)?;
        account.balance = account.balance.wrapping_add(amount);

        self.payments[index].status = PaymentStatus::Fail;

        debug!(payment_id, account_id, amount, "payment rejected");
        Ok(())
    }

    /// Issue a new payment with the same account, amount and category as an existing one
    ///
    /// # Errors
    ///
    /// Returns `PaymentNotFound` if the source payment does not exist, or any
    /// error `pay` can return.
    pub fn repeat(&mut self, payment_id: &str) -> Result<Payment, WalletError> {
        let payment = self.find_payment_by_id(payment_id)?;
        let (account_id, amount, category) =
            (payment.account_id, payment.amount, payment.category.clone());

        self.pay(account_id, amount, &category)
    }

    /// Save an existing payment as a named favorite
    ///
    /// # Errors
    ///
    /// Returns `PaymentNotFound` if the payment does not exist.
    pub fn favorite_payment(&mut self, payment_id: &str, name: &str) -> Result<Favorite, WalletError> {
        let payment = self.find_payment_by_id(payment_id)?;
        let (account_id, amount, category) =
            (payment.account_id, payment.amount, payment.category.clone());

        let favorite = Favorite {
            id: self.ids.next_id(),
            account_id,
            name: name.to_string(),
            amount,
            category,
        };
        self.favorites.push(favorite.clone());

        debug!(favorite_id = %favorite.id, payment_id, name, "favorite saved");
        Ok(favorite)
    }

    /// Issue a payment from a saved favorite
    ///
    /// # Errors
    ///
    /// Returns `FavoriteNotFound` if the favorite does not exist, or any
    /// error `pay` can return.
    pub fn pay_from_favorite(&mut self, favorite_id: &str) -> Result<Payment, WalletError> {
        let favorite = self.find_favorite_by_id(favorite_id)?;
        let (account_id, amount, category) =
            (favorite.account_id, favorite.amount, favorite.category.clone());

        self.pay(account_id, amount, &category)
    }

    /// Sum the amounts of all payments using `workers` concurrent workers
    ///
    /// See [`aggregator::sum_payments`] for how the payments are split.
    pub fn sum_payments(&self, workers: usize) -> Money {
        aggregator::sum_payments(&self.payments, workers)
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
