//! Customer account.

use serde::{Deserialize, Serialize};

use crate::error::CheckoutError;
use crate::ids::CustomerId;
use crate::money::Money;

/// A customer with a prepaid balance.
///
/// The balance only moves through `debit` and `credit`; `debit` refuses
/// amounts above what is available, so the balance never goes negative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    id: CustomerId,
    name: String,
    balance: Money,
}

impl Customer {
    /// Create a customer with a starting balance.
    pub fn new(name: impl Into<String>, balance: Money) -> Self {
        Self {
            id: CustomerId::generate(),
            name: name.into(),
            balance,
        }
    }

    pub fn id(&self) -> &CustomerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Check whether the balance covers an amount in the same currency.
    pub fn can_afford(&self, amount: Money) -> bool {
        self.balance.currency == amount.currency
            && self.balance.amount_cents >= amount.amount_cents
    }

    /// Take an amount off the balance.
    ///
    /// Fails with `InsufficientBalance` if the balance cannot cover the
    /// amount, and with `CurrencyMismatch` if the currencies differ.
    /// The amount is expected to be non-negative.
    pub fn debit(&mut self, amount: Money) -> Result<(), CheckoutError> {
        if self.balance.currency != amount.currency {
            return Err(CheckoutError::CurrencyMismatch {
                expected: self.balance.currency.code().to_string(),
                got: amount.currency.code().to_string(),
            });
        }
        if self.balance.amount_cents < amount.amount_cents {
            return Err(CheckoutError::InsufficientBalance {
                required: amount,
                available: self.balance,
            });
        }
        self.balance = self
            .balance
            .try_subtract(&amount)
            .ok_or(CheckoutError::Overflow)?;
        Ok(())
    }

    /// Add an amount to the balance. Currency-checked.
    pub fn credit(&mut self, amount: Money) -> Result<(), CheckoutError> {
        if self.balance.currency != amount.currency {
            return Err(CheckoutError::CurrencyMismatch {
                expected: self.balance.currency.code().to_string(),
                got: amount.currency.code().to_string(),
            });
        }
        self.balance = self
            .balance
            .try_add(&amount)
            .ok_or(CheckoutError::Overflow)?;
        Ok(())
    }
}
