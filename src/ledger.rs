//! The kudos ledger: the one write path in the core.
//!
//! Transfers debit one account and credit another as a single unit. To stop
//! two concurrent transfers from both passing the balance check against a
//! stale balance, the ledger keeps a lock per account and always acquires
//! the two locks in ascending account-id order, re-reading balances only
//! after both are held.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::CoreConfig;
use crate::error::{RejectReason, TransferError, TransferResult};
use crate::provider::AccountProvider;
use crate::types::round2;

/// Default conversion from work units to kudos. The baseline generation
/// (512x512, 50 steps) is worth 10 kudos under the standard thing scale.
pub fn things_to_kudos(things: f64) -> f64 {
    round2(things)
}

pub struct KudosLedger<A: AccountProvider> {
    accounts: A,
    allow_anonymous: bool,
    locks: Mutex<HashMap<u64, Arc<Mutex<()>>>>,
}

impl<A: AccountProvider> KudosLedger<A> {
    pub fn new(accounts: A, config: &CoreConfig) -> Self {
        Self {
            accounts,
            allow_anonymous: config.allow_anonymous,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn accounts(&self) -> &A {
        &self.accounts
    }

    fn account_lock(&self, id: u64) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().expect("account lock registry poisoned");
        locks.entry(id).or_default().clone()
    }

    /// Lock both accounts in ascending id order. Deadlock-free because every
    /// transfer acquires in the same total order.
    fn lock_pair(&self, a: u64, b: u64) -> (Arc<Mutex<()>>, Arc<Mutex<()>>) {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        (self.account_lock(lo), self.account_lock(hi))
    }

    /// Drop registry entries nobody else holds. Under the registry lock a
    /// strong count of 1 means only the registry itself; a concurrent
    /// transfer clones its entry under that same lock, so it cannot lose
    /// its mutex to a prune.
    fn prune_locks(&self, a: u64, b: u64) {
        let mut locks = self.locks.lock().expect("account lock registry poisoned");
        for id in [a, b] {
            if locks.get(&id).is_some_and(|l| Arc::strong_count(l) == 1) {
                locks.remove(&id);
            }
        }
    }

    /// Move `amount` kudos from `source` to `dest`.
    ///
    /// Both the debit and the credit happen while holding both account
    /// locks, so no concurrent transfer observes a partial move or a stale
    /// balance. Returns the amount moved, which is always `amount`.
    pub fn transfer(&self, source: u64, dest: u64, amount: f64) -> TransferResult {
        if source == dest {
            return Err(TransferError::SelfTransfer);
        }
        let result = self.locked_transfer(source, dest, amount);
        self.prune_locks(source, dest);
        result
    }

    fn locked_transfer(&self, source: u64, dest: u64, amount: f64) -> TransferResult {
        let (first, second) = self.lock_pair(source, dest);
        let _first: MutexGuard<'_, ()> = first.lock().expect("account lock poisoned");
        let _second: MutexGuard<'_, ()> = second.lock().expect("account lock poisoned");

        let src = self
            .accounts
            .by_id(source)
            .ok_or(TransferError::InvalidCredential)?;
        let dst = self
            .accounts
            .by_id(dest)
            .ok_or_else(|| TransferError::InvalidTarget(dest.to_string()))?;

        if src.suspicious {
            tracing::debug!(source, dest, "Transfer rejected: suspicious source");
            return Err(TransferError::Rejected(RejectReason::SuspiciousSource));
        }
        if dst.suspicious {
            tracing::debug!(source, dest, "Transfer rejected: suspicious destination");
            return Err(TransferError::Rejected(RejectReason::SuspiciousDestination));
        }
        if amount < 0.0 {
            return Err(TransferError::Rejected(RejectReason::NegativeAmount));
        }
        // Inclusive boundary: exactly draining down to the floor is allowed.
        if amount > src.kudos - src.min_kudos {
            return Err(TransferError::InsufficientFunds);
        }

        self.accounts.modify_kudos(source, -amount, "gifted");
        self.accounts.modify_kudos(dest, amount, "received");
        tracing::info!(source, dest, amount, "Kudos transferred");
        Ok(amount)
    }

    /// Transfer with the destination resolved by username.
    pub fn transfer_to_username(
        &self,
        source: u64,
        dest_username: &str,
        amount: f64,
    ) -> TransferResult {
        let dest = self
            .accounts
            .by_username(dest_username)
            .ok_or_else(|| TransferError::InvalidTarget(dest_username.to_string()))?;
        if dest.id == self.accounts.anonymous_id() {
            if !self.allow_anonymous {
                return Err(TransferError::InvalidTarget(dest_username.to_string()));
            }
            // Sending to anonymous would burn the kudos; treat as caller error.
            return Err(TransferError::AnonymousTarget);
        }
        if dest.id == source {
            return Err(TransferError::SelfTransfer);
        }
        self.transfer(source, dest.id, amount)
    }

    /// Transfer with the source resolved by API key and the destination by
    /// username.
    pub fn transfer_from_api_key(
        &self,
        source_api_key: &str,
        dest_username: &str,
        amount: f64,
    ) -> TransferResult {
        let source = self
            .accounts
            .by_api_key(source_api_key)
            .ok_or(TransferError::InvalidCredential)?;
        if source.id == self.accounts.anonymous_id() {
            if !self.allow_anonymous {
                return Err(TransferError::InvalidCredential);
            }
            return Err(TransferError::AnonymousSource);
        }
        self.transfer_to_username(source.id, dest_username, amount)
    }
}
