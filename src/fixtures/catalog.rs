//! Catalog Fixtures

use crate::{
    catalog::{Catalog, Deal, Product, ProductId},
    prices::Price,
};

/// The sample product records backing the demo storefront.
#[must_use]
pub fn demo_catalog() -> Catalog {
    Catalog::new(vec![
        Product {
            id: ProductId::new(1),
            name: "Premium Basmati Rice".into(),
            brand: "Royal Brand".into(),
            price: Price::new(2400),
            original_price: Some(Price::new(2800)),
            image_ref: "🌾".into(),
            category: "Groceries".into(),
            subcategory: Some("Rice & Grains".into()),
            rating: 4.6,
            review_count: 312,
            stock_level: 480,
            min_order: Some("50 kg bags".into()),
            description: Some("Long-grain basmati for bulk kitchens.".into()),
        },
        Product {
            id: ProductId::new(2),
            name: "Industrial Hand Soap".into(),
            brand: "CleanPro".into(),
            price: Price::new(1200),
            original_price: Some(Price::new(1500)),
            image_ref: "🧼".into(),
            category: "Personal Care".into(),
            subcategory: Some("Hygiene".into()),
            rating: 4.2,
            review_count: 145,
            stock_level: 36,
            min_order: Some("24 units".into()),
            description: Some("Heavy-duty cleansing for workshops.".into()),
        },
        Product {
            id: ProductId::new(3),
            name: "Wireless Bluetooth Earphones".into(),
            brand: "TechSound".into(),
            price: Price::new(1800),
            original_price: None,
            image_ref: "🎧".into(),
            category: "Electronics".into(),
            subcategory: Some("Audio".into()),
            rating: 4.3,
            review_count: 89,
            stock_level: 210,
            min_order: None,
            description: None,
        },
        Product {
            id: ProductId::new(4),
            name: "Multi-Purpose Cleaner".into(),
            brand: "SparkleClean".into(),
            price: Price::new(580),
            original_price: None,
            image_ref: "🧽".into(),
            category: "Home & Cleaning".into(),
            subcategory: None,
            rating: 4.0,
            review_count: 203,
            stock_level: 540,
            min_order: Some("12 bottles".into()),
            description: None,
        },
        Product {
            id: ProductId::new(5),
            name: "A4 Premium Paper".into(),
            brand: "PaperMax".into(),
            price: Price::new(680),
            original_price: Some(Price::new(800)),
            image_ref: "📄".into(),
            category: "Office Supplies".into(),
            subcategory: Some("Paper".into()),
            rating: 4.4,
            review_count: 134,
            stock_level: 960,
            min_order: Some("10 reams".into()),
            description: None,
        },
    ])
}

/// The running demo deals.
#[must_use]
pub fn demo_deals() -> Vec<Deal> {
    vec![
        Deal {
            product_id: ProductId::new(1),
            title: "Bulk rice: 20% off above 100kg".into(),
            discount_percent: 20,
        },
        Deal {
            product_id: ProductId::new(5),
            title: "Office paper restock week".into(),
            discount_percent: 15,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_ids_are_unique() {
        let catalog = demo_catalog();

        let ids: std::collections::HashSet<ProductId> = catalog.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn deals_reference_catalog_products() {
        let catalog = demo_catalog();

        for deal in demo_deals() {
            assert!(
                catalog.by_id(deal.product_id).is_some(),
                "deal {} points at a missing product",
                deal.title
            );
        }
    }
}
