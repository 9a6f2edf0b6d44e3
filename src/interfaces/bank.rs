//! The bank.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::Player;
use crate::corporations::Corporation;

/// Anything that can receive money from the bank.
pub trait CashHolder {
    /// Mutable access to the cash balance.
    fn cash_mut(&mut self) -> &mut i64;
}

impl CashHolder for Player {
    fn cash_mut(&mut self) -> &mut i64 {
        &mut self.cash
    }
}

impl CashHolder for Corporation {
    fn cash_mut(&mut self) -> &mut i64 {
        &mut self.cash
    }
}

/// Bank with a finite cash supply.
///
/// Paying out more than the bank holds breaks the bank; the payment still
/// happens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    cash: i64,
    broken: bool,
}

impl Bank {
    /// Create a bank holding `cash`.
    #[must_use]
    pub fn new(cash: i64) -> Self {
        Self {
            cash,
            broken: false,
        }
    }

    /// Remaining cash.
    #[must_use]
    pub fn cash(&self) -> i64 {
        self.cash
    }

    /// Whether the bank has run out.
    #[must_use]
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    /// Pay `amount` to `recipient`.
    pub fn spend(&mut self, amount: i64, recipient: &mut impl CashHolder) {
        self.cash -= amount;
        *recipient.cash_mut() += amount;
        if self.cash < 0 && !self.broken {
            warn!(deficit = -self.cash, "bank is broken");
            self.broken = true;
        }
    }
}
