//! Fixtures
//!
//! Hard-coded demo data for the storefront: the seeded session state, the
//! sample catalog, and the saved delivery addresses. A real deployment would
//! source all of this from a backend.

use jiff::{SignedDuration, Timestamp};

use crate::{
    checkout::DeliveryAddress,
    state::{AppState, Notification, NotificationId, Severity, UserProfile},
};

pub mod catalog;

pub use catalog::{demo_catalog, demo_deals};

/// The session's hard-coded starting state: three demo notifications, a
/// signed-in demo user, empty cart and wishlist.
#[must_use]
pub fn session_seed() -> AppState {
    let now = Timestamp::now();

    AppState {
        cart: Vec::new(),
        wishlist: Vec::new(),
        notifications: vec![
            Notification {
                id: NotificationId::new("1"),
                title: "New Bulk Deal Available".into(),
                message: "Premium Basmati Rice now 20% off for orders above 100kg".into(),
                severity: Severity::Success,
                is_read: false,
                created_at: now - SignedDuration::from_hours(2),
                action_ref: Some("/deals".into()),
            },
            Notification {
                id: NotificationId::new("2"),
                title: "Order Shipped".into(),
                message: "Your order #TB-2024-001 has been shipped and will arrive in 2-3 days"
                    .into(),
                severity: Severity::Info,
                is_read: false,
                created_at: now - SignedDuration::from_hours(4),
                action_ref: Some("/orders".into()),
            },
            Notification {
                id: NotificationId::new("3"),
                title: "Stock Alert".into(),
                message: "Industrial Hand Soap is running low in stock. Order now!".into(),
                severity: Severity::Warning,
                is_read: true,
                created_at: now - SignedDuration::from_hours(24),
                action_ref: Some("/products".into()),
            },
        ],
        user: UserProfile {
            display_name: "Gnana Sampath".into(),
            company_name: "Gnana Sampath".into(),
            email: "gnana@example.com".into(),
            is_authenticated: true,
        },
    }
}

/// The demo account's saved delivery addresses.
#[must_use]
pub fn demo_addresses() -> Vec<DeliveryAddress> {
    vec![
        DeliveryAddress {
            id: "1".into(),
            label: "Head Office".into(),
            company_name: "TechCorp Ltd.".into(),
            contact_person: "Gnana Sampath".into(),
            address_line1: "123 Business Park, Tech District".into(),
            address_line2: Some("Near IT Hub, Block A".into()),
            city: "Bangalore".into(),
            state: "Karnataka".into(),
            pincode: "560001".into(),
            phone: "+91 98765 43210".into(),
            email: "gnana@techcorp.com".into(),
            gst_number: "29ABCDE1234F1Z5".into(),
            is_default: true,
        },
        DeliveryAddress {
            id: "2".into(),
            label: "Branch Office".into(),
            company_name: "TechCorp Ltd.".into(),
            contact_person: "Operations Manager".into(),
            address_line1: "456 Industrial Area, Sector 8".into(),
            address_line2: Some("Manufacturing Unit".into()),
            city: "Chennai".into(),
            state: "Tamil Nadu".into(),
            pincode: "600001".into(),
            phone: "+91 87654 32109".into(),
            email: "operations@techcorp.com".into(),
            gst_number: "33ABCDE1234F1Z5".into(),
            is_default: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_three_notifications_one_read() {
        let seed = session_seed();

        assert_eq!(seed.notifications.len(), 3);
        assert_eq!(seed.unread_notification_count(), 2);
        assert!(seed.cart.is_empty());
        assert!(seed.wishlist.is_empty());
        assert!(seed.user.is_authenticated);
    }

    #[test]
    fn seed_notifications_are_newest_first() {
        let seed = session_seed();

        let timestamps: Vec<Timestamp> = seed.notifications.iter().map(|n| n.created_at).collect();
        let mut sorted = timestamps.clone();
        sorted.sort_by(|a, b| b.cmp(a));

        assert_eq!(timestamps, sorted);
    }

    #[test]
    fn exactly_one_default_address() {
        let addresses = demo_addresses();

        assert_eq!(addresses.iter().filter(|a| a.is_default).count(), 1);
    }
}
