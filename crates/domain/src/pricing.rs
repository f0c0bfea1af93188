//! Checkout pricing.
//!
//! Pure functions over cart lines. Nothing here is cached; callers recompute
//! from the live cart on every read.

use serde::Serialize;

use crate::cart::CartItem;
use crate::money::Money;

/// Subtotal above which delivery is free. Strictly greater-than.
pub const FREE_DELIVERY_THRESHOLD: Money = Money::from_dollars(50);

/// Flat delivery charge below the threshold.
pub const DELIVERY_FEE: Money = Money::from_dollars(5);

/// Sum of price times quantity over all lines.
pub fn subtotal(items: &[CartItem]) -> Money {
    items.iter().map(CartItem::line_total).sum()
}

/// Zero when `subtotal` exceeds the threshold, otherwise the flat fee.
pub fn delivery_fee(subtotal: Money) -> Money {
    if subtotal > FREE_DELIVERY_THRESHOLD {
        Money::zero()
    } else {
        DELIVERY_FEE
    }
}

pub fn total(items: &[CartItem]) -> Money {
    let subtotal = subtotal(items);
    subtotal + delivery_fee(subtotal)
}

/// Subtotal, fee and total computed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

impl PriceBreakdown {
    pub fn for_items(items: &[CartItem]) -> Self {
        let subtotal = subtotal(items);
        let delivery_fee = delivery_fee(subtotal);
        Self {
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;

    fn line(cents: i64, quantity: u32) -> CartItem {
        CartItem::new(Product::new("x", Money::from_cents(cents), "c"), quantity)
    }

    #[test]
    fn bananas_and_milk_scenario() {
        let items = vec![line(150, 2), line(320, 1)];
        let breakdown = PriceBreakdown::for_items(&items);
        assert_eq!(breakdown.subtotal.cents(), 620);
        assert_eq!(breakdown.delivery_fee.cents(), 500);
        assert_eq!(breakdown.total.cents(), 1120);
        assert_eq!(total(&items), breakdown.total);
    }

    #[test]
    fn exactly_fifty_still_pays_fee() {
        let items = vec![line(2500, 2)];
        assert_eq!(subtotal(&items).cents(), 5000);
        assert_eq!(delivery_fee(subtotal(&items)), DELIVERY_FEE);
        assert_eq!(total(&items).cents(), 5500);
    }

    #[test]
    fn one_cent_over_is_free() {
        let items = vec![line(5001, 1)];
        assert!(delivery_fee(subtotal(&items)).is_zero());
        assert_eq!(total(&items).cents(), 5001);
    }

    #[test]
    fn empty_cart_pays_fee_only() {
        let breakdown = PriceBreakdown::for_items(&[]);
        assert!(breakdown.subtotal.is_zero());
        assert_eq!(breakdown.total, DELIVERY_FEE);
    }
}
