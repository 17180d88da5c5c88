//! Store
//!
//! The state container: owns the authoritative [`AppState`], applies intents
//! through the pure reducer, and sequences the side effects around each
//! transition (best-effort persistence, toast messages, subscriber refresh).

use std::fmt;

use jiff::Timestamp;
use serde::Serialize;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::{
    catalog::ProductId,
    prices::Price,
    snapshot::{self, Snapshot, SnapshotError, SnapshotKey, SnapshotStore},
    state::{
        AppState, CartLine, Intent, Notification, NotificationId, NotificationSequence, Severity,
        UserPatch, WishlistEntry,
    },
};

/// Fire-and-forget surface for user-facing confirmation messages.
///
/// Purely presentational; nothing reads a result back.
#[cfg_attr(test, mockall::automock)]
pub trait ToastSurface: Send {
    /// Show a message to the user.
    fn show(&self, title: &str, body: &str);
}

/// A [`ToastSurface`] that shows nothing, for headless use and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentToasts;

impl ToastSurface for SilentToasts {
    fn show(&self, _title: &str, _body: &str) {}
}

type Subscriber = Box<dyn Fn(&AppState) + Send>;

/// The session state container.
///
/// All mutation flows through [`Store::dispatch`]; consumers read state via
/// [`Store::state`] and the derived queries. The store is an explicitly
/// owned, injected handle, not a global.
pub struct Store {
    state: AppState,
    storage: Box<dyn SnapshotStore>,
    toasts: Box<dyn ToastSurface>,
    subscribers: SmallVec<[Subscriber; 2]>,
    sequence: NotificationSequence,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Open a store: start from the seed state, then overlay whatever the
    /// storage collaborator holds for cart, wishlist and notifications.
    ///
    /// The restore pass is best-effort and runs once: an absent or
    /// unreadable key leaves the seed value for that field, and the user
    /// profile always comes from the seed.
    pub fn open(
        seed: AppState,
        storage: Box<dyn SnapshotStore>,
        toasts: Box<dyn ToastSurface>,
    ) -> Self {
        let mut store = Store {
            state: seed,
            storage,
            toasts,
            subscribers: SmallVec::new(),
            sequence: NotificationSequence::new(),
        };

        let snapshot = Snapshot {
            cart: snapshot::decode_or(
                SnapshotKey::Cart,
                store.read_raw(SnapshotKey::Cart),
                store.state.cart.clone(),
            ),
            wishlist: snapshot::decode_or(
                SnapshotKey::Wishlist,
                store.read_raw(SnapshotKey::Wishlist),
                store.state.wishlist.clone(),
            ),
            notifications: snapshot::decode_or(
                SnapshotKey::Notifications,
                store.read_raw(SnapshotKey::Notifications),
                store.state.notifications.clone(),
            ),
        };

        store.dispatch(Intent::RestoreSnapshot(snapshot));

        // Restored notifications can carry counter-issued ids from a
        // previous session; new ids must start past them.
        store.sequence = NotificationSequence::resuming_after(&store.state.notifications);

        store
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Register a callback invoked after every state transition.
    pub fn subscribe(&mut self, subscriber: impl Fn(&AppState) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Apply an intent, persist the restorable state, and refresh
    /// subscribers. Persistence failures are logged, never surfaced.
    pub fn dispatch(&mut self, intent: Intent) {
        debug!(?intent, "applying intent");

        self.state = std::mem::take(&mut self.state).apply(intent);
        self.persist();

        for subscriber in &self.subscribers {
            subscriber(&self.state);
        }
    }

    /// Merge a line into the cart and confirm to the user.
    pub fn add_to_cart(&mut self, line: CartLine) {
        let name = line.name.clone();
        self.dispatch(Intent::AddToCart(line));
        self.toasts
            .show("Added to Cart", &format!("{name} has been added to your cart."));
    }

    /// Remove a product from the cart, confirming only when it was present.
    pub fn remove_from_cart(&mut self, product: ProductId) {
        let name = self
            .state
            .cart
            .iter()
            .find(|line| line.product_id == product)
            .map(|line| line.name.clone());

        self.dispatch(Intent::RemoveFromCart(product));

        if let Some(name) = name {
            self.toasts.show(
                "Removed from Cart",
                &format!("{name} has been removed from your cart."),
            );
        }
    }

    /// Set a cart line's quantity; 0 or negative removes the line.
    pub fn update_cart_quantity(&mut self, product: ProductId, quantity: i64) {
        self.dispatch(Intent::UpdateCartQuantity { product, quantity });
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.dispatch(Intent::ClearCart);
    }

    /// Add a wishlist entry (idempotent) and confirm to the user.
    pub fn add_to_wishlist(&mut self, entry: WishlistEntry) {
        let name = entry.name.clone();
        self.dispatch(Intent::AddToWishlist(entry));
        self.toasts.show(
            "Added to Wishlist",
            &format!("{name} has been added to your wishlist."),
        );
    }

    /// Remove a product from the wishlist, confirming only when present.
    pub fn remove_from_wishlist(&mut self, product: ProductId) {
        let name = self
            .state
            .wishlist
            .iter()
            .find(|entry| entry.product_id == product)
            .map(|entry| entry.name.clone());

        self.dispatch(Intent::RemoveFromWishlist(product));

        if let Some(name) = name {
            self.toasts.show(
                "Removed from Wishlist",
                &format!("{name} has been removed from your wishlist."),
            );
        }
    }

    /// Add the entry if its product is not wishlisted, remove it otherwise.
    ///
    /// One conditional dispatch, so exactly one confirmation fires.
    pub fn toggle_wishlist(&mut self, entry: WishlistEntry) {
        if self.state.is_in_wishlist(entry.product_id) {
            self.remove_from_wishlist(entry.product_id);
        } else {
            self.add_to_wishlist(entry);
        }
    }

    /// Create and prepend a notification, returning its id.
    pub fn notify(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        action_ref: Option<String>,
    ) -> NotificationId {
        let id = self.sequence.next_id();

        self.dispatch(Intent::AddNotification(Notification {
            id: id.clone(),
            title: title.into(),
            message: message.into(),
            severity,
            is_read: false,
            created_at: Timestamp::now(),
            action_ref,
        }));

        id
    }

    /// Mark a notification read.
    pub fn mark_notification_read(&mut self, id: NotificationId) {
        self.dispatch(Intent::MarkNotificationRead(id));
    }

    /// Empty the notification sequence.
    pub fn clear_notifications(&mut self) {
        self.dispatch(Intent::ClearNotifications);
    }

    /// Shallow-merge a profile update.
    pub fn set_user(&mut self, patch: UserPatch) {
        self.dispatch(Intent::SetUser(patch));
    }

    /// Whether a product has a cart line.
    #[must_use]
    pub fn is_in_cart(&self, product: ProductId) -> bool {
        self.state.is_in_cart(product)
    }

    /// Whether a product is wishlisted.
    #[must_use]
    pub fn is_in_wishlist(&self, product: ProductId) -> bool {
        self.state.is_in_wishlist(product)
    }

    /// Quantity of a product in the cart; 0 when absent.
    #[must_use]
    pub fn cart_item_quantity(&self, product: ProductId) -> u32 {
        self.state.cart_item_quantity(product)
    }

    /// Sum of `unit_price` × `quantity` over the cart.
    #[must_use]
    pub fn cart_subtotal(&self) -> Price {
        self.state.cart_subtotal()
    }

    /// Sum of quantities over the cart.
    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.state.cart_item_count()
    }

    /// Number of unread notifications.
    #[must_use]
    pub fn unread_notification_count(&self) -> usize {
        self.state.unread_notification_count()
    }

    fn read_raw(&self, key: SnapshotKey) -> Option<String> {
        match self.storage.load(key) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(key = key.storage_key(), %error, "snapshot read failed");
                None
            }
        }
    }

    fn persist(&mut self) {
        persist_one(&mut *self.storage, SnapshotKey::Cart, &self.state.cart);
        persist_one(&mut *self.storage, SnapshotKey::Wishlist, &self.state.wishlist);
        persist_one(
            &mut *self.storage,
            SnapshotKey::Notifications,
            &self.state.notifications,
        );
    }
}

/// Serialize one collection and hand it to the backend, swallowing failures.
fn persist_one<T: Serialize>(storage: &mut dyn SnapshotStore, key: SnapshotKey, values: &[T]) {
    let written = serde_json::to_string(values)
        .map_err(SnapshotError::from)
        .and_then(|payload| storage.save(key, &payload));

    if let Err(error) = written {
        warn!(key = key.storage_key(), %error, "snapshot write failed");
    }
}
