//! Wishlist entries and their mutation rules.

use serde::{Deserialize, Serialize};

use crate::{catalog::ProductId, prices::Price};

/// A product saved to the wishlist. At most one entry exists per product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    /// Product this entry refers to.
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

    /// Product category.
    pub category: String,

    /// Average review rating, 0–5.
    pub rating: f32,

    /// Number of reviews behind the rating.
    pub review_count: u32,
}

/// Append an entry unless its product is already wishlisted (idempotent add).
pub(crate) fn add_entry(mut wishlist: Vec<WishlistEntry>, entry: WishlistEntry) -> Vec<WishlistEntry> {
    let exists = wishlist
        .iter()
        .any(|existing| existing.product_id == entry.product_id);

    if !exists {
        wishlist.push(entry);
    }

    wishlist
}

/// Remove the entry for a product, if present.
pub(crate) fn remove_entry(mut wishlist: Vec<WishlistEntry>, product: ProductId) -> Vec<WishlistEntry> {
    wishlist.retain(|entry| entry.product_id != product);
    wishlist
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(product: u32) -> WishlistEntry {
        WishlistEntry {
            product_id: ProductId::new(product),
            name: format!("Product {product}"),
            brand: "Brand".into(),
            unit_price: Price::new(1800),
            original_unit_price: None,
            image_ref: "🎧".into(),
            category: "Electronics".into(),
            rating: 4.3,
            review_count: 89,
        }
    }

    #[test]
    fn add_entry_is_idempotent() {
        let wishlist = add_entry(Vec::new(), entry(3));
        let wishlist = add_entry(wishlist, entry(3));

        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn add_entry_keeps_insertion_order() {
        let wishlist = add_entry(add_entry(Vec::new(), entry(3)), entry(4));

        let ids: Vec<ProductId> = wishlist.iter().map(|e| e.product_id).collect();
        assert_eq!(ids, vec![ProductId::new(3), ProductId::new(4)]);
    }

    #[test]
    fn remove_entry_drops_matching_product() {
        let wishlist = add_entry(add_entry(Vec::new(), entry(3)), entry(4));
        let wishlist = remove_entry(wishlist, ProductId::new(3));

        assert_eq!(wishlist.len(), 1);
        assert_eq!(
            wishlist.first().map(|e| e.product_id),
            Some(ProductId::new(4))
        );
    }

    #[test]
    fn remove_entry_missing_product_is_noop() {
        let wishlist = add_entry(Vec::new(), entry(3));
        let wishlist = remove_entry(wishlist, ProductId::new(9));

        assert_eq!(wishlist.len(), 1);
    }
}
