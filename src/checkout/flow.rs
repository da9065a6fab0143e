//! Checkout settlement flow.
//!
//! One checkout attempt is a single-shot computation: validate every line
//! item against live catalog state, price the cart, check the balance,
//! emit the shipment notice, then perform the flow's only mutation — the
//! balance debit. Any failure before the debit leaves customer, cart, and
//! catalog exactly as they were.

use std::fmt;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::checkout::receipt::{Receipt, ReceiptLine};
use crate::checkout::shipping::{self, ShipmentManifest, ShippableUnit};
use crate::customer::Customer;
use crate::error::CheckoutError;
use crate::ids::OrderId;

/// Collaborator notified when a settlement produces a shipment.
pub trait ShipmentNotifier {
    /// Called once per settlement that contains shippable units, after all
    /// validation has passed and before the customer is debited.
    fn shipment_ready(&mut self, manifest: &ShipmentManifest);
}

/// Notifier that logs the manifest.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl ShipmentNotifier for LogNotifier {
    fn shipment_ready(&mut self, manifest: &ShipmentManifest) {
        info!(
            groups = manifest.groups.len(),
            total_weight_kg = manifest.total_weight_kg(),
            "shipment ready\n{manifest}"
        );
    }
}

/// Terminal outcome of one checkout attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// Checkout settled; the customer was debited.
    Success(Receipt),
    /// Checkout aborted on the first error; nothing was mutated.
    Failed(String),
}

impl CheckoutOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CheckoutOutcome::Success(_))
    }

    pub fn receipt(&self) -> Option<&Receipt> {
        match self {
            CheckoutOutcome::Success(receipt) => Some(receipt),
            CheckoutOutcome::Failed(_) => None,
        }
    }
}

impl fmt::Display for CheckoutOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutOutcome::Success(receipt) => write!(f, "{receipt}"),
            CheckoutOutcome::Failed(message) => write!(f, "Checkout failed: {message}"),
        }
    }
}

/// Settle a cart against a customer's balance.
///
/// Validation order:
/// 1. the cart must not be empty;
/// 2. every line item must still be valid against the *live* catalog —
///    the product present, unexpired, with sufficient stock (state may
///    have changed since the item was added);
/// 3. the balance must cover subtotal plus shipping.
///
/// Only then is the shipment notice emitted and the customer debited.
/// Stock is not decremented here; integrators that settle inventory
/// afterwards use [`Catalog::decrement_stock`].
pub fn settle(
    customer: &mut Customer,
    cart: &Cart,
    catalog: &Catalog,
    notifier: &mut dyn ShipmentNotifier,
) -> Result<Receipt, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    debug!(cart_id = %cart.id(), items = cart.unique_item_count(), "settling cart");

    let today = Utc::now().date_naive();
    let mut units: Vec<ShippableUnit> = Vec::new();
    for item in cart.items() {
        let product = catalog
            .get(&item.product_id)
            .ok_or_else(|| CheckoutError::ProductNotFound(item.product_id.clone()))?;
        if product.is_expired_on(today) {
            return Err(CheckoutError::ProductExpired {
                name: product.name.clone(),
            });
        }
        if !product.stock.can_fulfill(item.quantity) {
            return Err(CheckoutError::OutOfStock {
                name: product.name.clone(),
                requested: item.quantity,
                available: product.stock.available(),
            });
        }
        if let Some(weight_grams) = product.weight_grams {
            for _ in 0..item.quantity {
                units.push(ShippableUnit::new(product.name.clone(), weight_grams));
            }
        }
    }

    let subtotal = cart.subtotal()?;
    let shipping_fee = shipping::calculate_fee(&units, cart.currency())?;
    let total = subtotal
        .try_add(&shipping_fee)
        .ok_or(CheckoutError::Overflow)?;

    if customer.balance().currency != total.currency {
        return Err(CheckoutError::CurrencyMismatch {
            expected: customer.balance().currency.code().to_string(),
            got: total.currency.code().to_string(),
        });
    }
    if customer.balance().amount_cents < total.amount_cents {
        return Err(CheckoutError::InsufficientBalance {
            required: total,
            available: customer.balance(),
        });
    }

    if !units.is_empty() {
        let manifest = shipping::build_manifest(&units);
        debug!(units = manifest.unit_count(), "dispatching shipment notice");
        notifier.shipment_ready(&manifest);
    }

    // The only state mutation in the whole flow.
    customer.debit(total)?;

    let receipt = Receipt {
        order_id: OrderId::generate(),
        lines: cart
            .items()
            .iter()
            .map(|item| ReceiptLine {
                quantity: item.quantity,
                name: item.name.clone(),
                line_total: item.total_price,
            })
            .collect(),
        subtotal,
        shipping_fee,
        total,
        balance_after: customer.balance(),
        placed_at: Utc::now(),
    };
    info!(order_id = %receipt.order_id, total = %receipt.total, "checkout settled");
    Ok(receipt)
}

/// Run one checkout attempt, catching every error into a terminal
/// outcome with a human-readable message.
pub fn checkout(
    customer: &mut Customer,
    cart: &Cart,
    catalog: &Catalog,
    notifier: &mut dyn ShipmentNotifier,
) -> CheckoutOutcome {
    match settle(customer, cart, catalog, notifier) {
        Ok(receipt) => CheckoutOutcome::Success(receipt),
        Err(err) => {
            warn!(%err, "checkout failed");
            CheckoutOutcome::Failed(err.to_string())
        }
    }
}
