//! Catalog

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    prices::Price,
    state::{CartLine, WishlistEntry},
};

/// Identifier of a catalog product.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Creates a product id from its raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        ProductId(raw)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog product record.
///
/// Carries the cart/wishlist fields plus catalog-only detail (stock,
/// description, subcategory) that never enters session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product id.
    pub id: ProductId,

    /// Product name.
    pub name: String,

    /// Brand name.
    pub brand: String,

    /// Current price per unit.
    pub price: Price,

    /// Pre-discount price per unit, when on offer.
    pub original_price: Option<Price>,

    /// Reference to the product image.
    pub image_ref: String,

    /// Category name.
    pub category: String,

    /// Subcategory name, where the category has one.
    pub subcategory: Option<String>,

    /// Average review rating, 0–5.
    pub rating: f32,

    /// Number of reviews behind the rating.
    pub review_count: u32,

    /// Units currently in stock.
    pub stock_level: u32,

    /// Descriptive minimum-order text, e.g. "50 kg bags".
    pub min_order: Option<String>,

    /// Longer marketing description.
    pub description: Option<String>,
}

impl Product {
    /// Build a cart line for this product with the given quantity.
    #[must_use]
    pub fn cart_line(&self, quantity: u32) -> CartLine {
        CartLine {
            product_id: self.id,
            name: self.name.clone(),
            brand: self.brand.clone(),
            unit_price: self.price,
            original_unit_price: self.original_price,
            image_ref: self.image_ref.clone(),
            quantity,
            category: self.category.clone(),
            min_order: self.min_order.clone(),
            gst_number: None,
        }
    }

    /// Build a wishlist entry for this product.
    #[must_use]
    pub fn wishlist_entry(&self) -> WishlistEntry {
        WishlistEntry {
            product_id: self.id,
            name: self.name.clone(),
            brand: self.brand.clone(),
            unit_price: self.price,
            original_unit_price: self.original_price,
            image_ref: self.image_ref.clone(),
            category: self.category.clone(),
            rating: self.rating,
            review_count: self.review_count,
        }
    }
}

/// A time-boxed deal promoting one catalog product at a reduced price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    /// Promoted product.
    pub product_id: ProductId,

    /// Deal headline.
    pub title: String,

    /// Whole-percent discount off the product price.
    pub discount_percent: u8,
}

/// Read-only product lookup. In a real system this would sit in front of an
/// API client; here it indexes an in-memory record set.
#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from a record set. Later duplicates of an id shadow
    /// earlier ones in lookups.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id, position))
            .collect();

        Catalog { products, index }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn by_id(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).and_then(|&position| self.products.get(position))
    }

    /// Iterate products in a category.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> {
        self.products
            .iter()
            .filter(move |product| product.category == category)
    }

    /// Iterate all products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
