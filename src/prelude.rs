//! Vitrine prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, Deal, Product, ProductId},
    checkout::{
        CheckoutError, CheckoutFlow, CheckoutStep, DeliveryAddress, OrderDraft, OrderGateway,
        OrderReceipt, PaymentMethod, SimulatedGateway,
    },
    prices::Price,
    pricing::{FLAT_SHIPPING_FEE, FREE_SHIPPING_THRESHOLD, Quote, quote},
    snapshot::{MemoryStore, SharedMemoryStore, Snapshot, SnapshotError, SnapshotKey, SnapshotStore},
    state::{
        AppState, CartLine, Intent, Notification, NotificationId, NotificationSequence, Severity,
        UserPatch, UserProfile, WishlistEntry,
    },
    store::{SilentToasts, Store, ToastSurface},
};
