//! Cart lines and their mutation rules.

use serde::{Deserialize, Serialize};

use crate::{catalog::ProductId, prices::Price};

/// One row in the cart, keyed by product id, carrying an aggregated quantity.
///
/// A line with `quantity` 0 is never stored; the mutation rules below remove
/// it instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line refers to.
    pub product_id: ProductId,

    /// Product name.
    pub name: String,

    /// Brand name.
    pub brand: String,

    /// Price per unit.
    pub unit_price: Price,

    /// Pre-discount price per unit, when the product is on offer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_unit_price: Option<Price>,

    /// Reference to the product image.
    pub image_ref: String,

    /// Units of this product in the cart. Always positive.
    pub quantity: u32,

    /// Product category.
    pub category: String,

    /// Descriptive minimum-order text, e.g. "50 kg bags". No behavioural contract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_order: Option<String>,

    /// GST registration shown on invoices. No behavioural contract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst_number: Option<String>,
}

impl CartLine {
    /// Price of the whole line (`unit_price` × `quantity`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Merge a line into the cart.
///
/// If the product is already present its quantity is incremented by the
/// incoming amount; otherwise the line is appended. A requested quantity of
/// 0 normalises to 1, mirroring the "default 1" add semantics.
pub(crate) fn add_line(mut cart: Vec<CartLine>, line: CartLine) -> Vec<CartLine> {
    let added = if line.quantity == 0 { 1 } else { line.quantity };

    if let Some(existing) = cart
        .iter_mut()
        .find(|existing| existing.product_id == line.product_id)
    {
        existing.quantity = existing.quantity.saturating_add(added);
    } else {
        cart.push(CartLine {
            quantity: added,
            ..line
        });
    }

    cart
}

/// Remove the line for a product, if present.
pub(crate) fn remove_line(mut cart: Vec<CartLine>, product: ProductId) -> Vec<CartLine> {
    cart.retain(|line| line.product_id != product);
    cart
}

/// Set the quantity for a product's line, clamping negatives to 0.
///
/// A resulting quantity of 0 removes the line, so the cart never holds a
/// zero-quantity row.
pub(crate) fn set_quantity(mut cart: Vec<CartLine>, product: ProductId, quantity: i64) -> Vec<CartLine> {
    let clamped = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);

    for line in &mut cart {
        if line.product_id == product {
            line.quantity = clamped;
        }
    }

    cart.retain(|line| line.quantity > 0);
    cart
}
