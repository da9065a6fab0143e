//! Checkout receipt.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::OrderId;
use crate::money::Money;

/// One line of a receipt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiptLine {
    /// Quantity purchased.
    pub quantity: i64,
    /// Product name.
    pub name: String,
    /// Line total (unit price * quantity).
    pub line_total: Money,
}

/// Receipt for a settled checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Receipt {
    /// Order identifier assigned at settlement.
    pub order_id: OrderId,
    /// One line per cart line item, in cart order.
    pub lines: Vec<ReceiptLine>,
    /// Sum of line totals.
    pub subtotal: Money,
    /// Shipping fee.
    pub shipping_fee: Money,
    /// Amount charged (subtotal + shipping).
    pub total: Money,
    /// Customer balance after payment.
    pub balance_after: Money,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

impl Receipt {
    /// Total item count across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

impl fmt::Display for Receipt {
    /// Receipt wire format; currency figures are truncated to whole
    /// units, never rounded:
    ///
    /// ```text
    /// ** Checkout receipt **
    /// 2x Cheese 200
    /// 1x Biscuits 150
    /// ----------------------
    /// Subtotal 350
    /// Shipping 11
    /// Amount 361
    /// Customer balance after payment: $1639
    /// END.
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "** Checkout receipt **")?;
        for line in &self.lines {
            writeln!(
                f,
                "{}x {} {}",
                line.quantity,
                line.name,
                line.line_total.whole_units()
            )?;
        }
        writeln!(f, "----------------------")?;
        writeln!(f, "Subtotal {}", self.subtotal.whole_units())?;
        writeln!(f, "Shipping {}", self.shipping_fee.whole_units())?;
        writeln!(f, "Amount {}", self.total.whole_units())?;
        writeln!(
            f,
            "Customer balance after payment: ${}",
            self.balance_after.whole_units()
        )?;
        write!(f, "END.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    #[test]
    fn receipt_display_wire_format() {
        let receipt = Receipt {
            order_id: OrderId::new("ord-1"),
            lines: vec![
                ReceiptLine {
                    quantity: 2,
                    name: "Cheese".to_string(),
                    line_total: usd(20_000),
                },
                ReceiptLine {
                    quantity: 1,
                    name: "Biscuits".to_string(),
                    line_total: usd(15_000),
                },
            ],
            subtotal: usd(35_000),
            shipping_fee: usd(1100),
            total: usd(36_100),
            balance_after: usd(163_900),
            placed_at: Utc::now(),
        };

        assert_eq!(
            receipt.to_string(),
            "** Checkout receipt **\n\
             2x Cheese 200\n\
             1x Biscuits 150\n\
             ----------------------\n\
             Subtotal 350\n\
             Shipping 11\n\
             Amount 361\n\
             Customer balance after payment: $1639\n\
             END."
        );
        assert_eq!(receipt.item_count(), 3);
    }

    #[test]
    fn receipt_truncates_fractional_amounts() {
        let receipt = Receipt {
            order_id: OrderId::new("ord-2"),
            lines: vec![ReceiptLine {
                quantity: 1,
                name: "Sticker".to_string(),
                line_total: usd(99),
            }],
            subtotal: usd(99),
            shipping_fee: usd(0),
            total: usd(99),
            balance_after: usd(151),
            placed_at: Utc::now(),
        };

        let text = receipt.to_string();
        assert!(text.contains("1x Sticker 0"));
        assert!(text.contains("Subtotal 0"));
        assert!(text.contains("Customer balance after payment: $1"));
    }
}
