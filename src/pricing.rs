//! Pricing
//!
//! The one quote computation shared by the cart summary and the checkout
//! review, so the two surfaces can never disagree.

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::ToPrimitive,
};

use crate::{prices::Price, state::CartLine};

/// GST applied to every order, as a decimal fraction.
const GST_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Orders at or above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD: Price = Price::new(10_000);

/// Flat fee charged below the free-shipping threshold.
pub const FLAT_SHIPPING_FEE: Price = Price::new(500);

/// A priced order: subtotal, tax and shipping with their grand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Sum of `unit_price` × `quantity` over the cart lines.
    pub subtotal: Price,

    /// GST on the subtotal.
    pub tax: Price,

    /// Shipping cost; zero at or above [`FREE_SHIPPING_THRESHOLD`].
    pub shipping: Price,

    /// `subtotal + tax + shipping`.
    pub total: Price,
}

/// Sum of line totals over the cart.
#[must_use]
pub fn subtotal(lines: &[CartLine]) -> Price {
    lines.iter().map(CartLine::line_total).sum()
}

/// Price a cart.
///
/// Tax is computed in fixed-point decimal and rounded midpoint-away-from-zero
/// to whole currency units, so repeated evaluation can never drift the way
/// floating-point arithmetic would.
#[must_use]
pub fn quote(lines: &[CartLine]) -> Quote {
    let subtotal = subtotal(lines);
    let tax = gst_amount(subtotal);

    let shipping = if subtotal >= FREE_SHIPPING_THRESHOLD {
        Price::ZERO
    } else {
        FLAT_SHIPPING_FEE
    };

    Quote {
        subtotal,
        tax,
        shipping,
        total: subtotal + tax + shipping,
    }
}

/// GST on an amount, rounded to whole currency units.
fn gst_amount(amount: Price) -> Price {
    let taxed = Decimal::from(*amount) * GST_RATE;
    let rounded = taxed.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    Price::new(rounded.to_u64().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use crate::catalog::ProductId;

    use super::*;

    fn line(product: u32, unit_price: u64, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(product),
            name: format!("Product {product}"),
            brand: "Brand".into(),
            unit_price: Price::new(unit_price),
            original_unit_price: None,
            image_ref: "📦".into(),
            quantity,
            category: "Groceries".into(),
            min_order: None,
            gst_number: None,
        }
    }

    #[test]
    fn empty_cart_quotes_flat_shipping_only() {
        let quote = quote(&[]);

        assert_eq!(quote.subtotal, Price::ZERO);
        assert_eq!(quote.tax, Price::ZERO);
        assert_eq!(quote.shipping, FLAT_SHIPPING_FEE);
        assert_eq!(quote.total, FLAT_SHIPPING_FEE);
    }

    #[test]
    fn below_threshold_pays_flat_fee() {
        let quote = quote(&[line(1, 9999, 1)]);

        assert_eq!(quote.shipping, Price::new(500));
    }

    #[test]
    fn at_threshold_ships_free() {
        let quote = quote(&[line(1, 10_000, 1)]);

        assert_eq!(quote.shipping, Price::ZERO);
    }

    #[test]
    fn gst_is_eighteen_percent_rounded() {
        // 18% of 9999 is 1799.82, which rounds to 1800.
        let quote = quote(&[line(1, 9999, 1)]);

        assert_eq!(quote.tax, Price::new(1800));
        assert_eq!(quote.total, Price::new(9999 + 1800 + 500));
    }

    #[test]
    fn gst_midpoint_rounds_away_from_zero() {
        // 18% of 25 is 4.5, which rounds up to 5.
        let quote = quote(&[line(1, 25, 1)]);

        assert_eq!(quote.tax, Price::new(5));
    }

    #[test]
    fn subtotal_matches_line_totals() {
        let lines = [line(1, 2400, 2), line(2, 1200, 1)];

        assert_eq!(subtotal(&lines), Price::new(6000));
    }

    #[test]
    fn quote_is_stable_across_evaluations() {
        let lines = [line(1, 2400, 2), line(2, 1200, 1)];

        assert_eq!(quote(&lines), quote(&lines));
    }
}
