//! Session state: the `AppState` aggregate, the intents that mutate it, and
//! the pure reducer that applies them.

use serde::{Deserialize, Serialize};

use crate::{catalog::ProductId, prices::Price, pricing, snapshot::Snapshot};

pub mod cart;
pub mod notifications;
pub mod user;
pub mod wishlist;

pub use cart::CartLine;
pub use notifications::{Notification, NotificationId, NotificationSequence, Severity};
pub use user::{UserPatch, UserProfile};
pub use wishlist::WishlistEntry;

/// A named request to mutate [`AppState`].
///
/// Every intent is total: invalid input is normalised, never rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Merge a line into the cart. An existing line for the same product has
    /// its quantity incremented; a quantity of 0 normalises to 1.
    AddToCart(CartLine),

    /// Remove a product's line from the cart, if present.
    RemoveFromCart(ProductId),

    /// Set a line's quantity, clamping negatives to 0. A quantity of 0
    /// removes the line.
    UpdateCartQuantity {
        /// Product whose line is updated.
        product: ProductId,
        /// Requested quantity. May be negative; it clamps.
        quantity: i64,
    },

    /// Empty the cart.
    ClearCart,

    /// Append a wishlist entry unless the product is already wishlisted.
    AddToWishlist(WishlistEntry),

    /// Remove a product's wishlist entry, if present.
    RemoveFromWishlist(ProductId),

    /// Prepend a fully-stamped notification (newest first).
    AddNotification(Notification),

    /// Mark a notification read. One-way; no-op for unknown ids.
    MarkNotificationRead(NotificationId),

    /// Empty the notification sequence.
    ClearNotifications,

    /// Shallow-merge a partial profile update.
    SetUser(UserPatch),

    /// Replace cart, wishlist and notifications wholesale from a snapshot.
    /// Used once at session start; the user profile is untouched.
    RestoreSnapshot(Snapshot),
}

/// The whole UI session's state. Exclusively owned by the
/// [`Store`](crate::store::Store); consumers mutate it only through intents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// Cart lines in insertion order.
    pub cart: Vec<CartLine>,

    /// Wishlist entries in insertion order.
    pub wishlist: Vec<WishlistEntry>,

    /// Notifications, newest first.
    pub notifications: Vec<Notification>,

    /// The session user.
    pub user: UserProfile,
}

impl AppState {
    /// Apply an intent, producing the next state.
    ///
    /// This is the single reducer for the session: a pure function of the
    /// previous state and the intent, with no I/O.
    #[must_use]
    pub fn apply(mut self, intent: Intent) -> AppState {
        match intent {
            Intent::AddToCart(line) => {
                self.cart = cart::add_line(self.cart, line);
            }
            Intent::RemoveFromCart(product) => {
                self.cart = cart::remove_line(self.cart, product);
            }
            Intent::UpdateCartQuantity { product, quantity } => {
                self.cart = cart::set_quantity(self.cart, product, quantity);
            }
            Intent::ClearCart => {
                self.cart = Vec::new();
            }
            Intent::AddToWishlist(entry) => {
                self.wishlist = wishlist::add_entry(self.wishlist, entry);
            }
            Intent::RemoveFromWishlist(product) => {
                self.wishlist = wishlist::remove_entry(self.wishlist, product);
            }
            Intent::AddNotification(notification) => {
                self.notifications = notifications::prepend(self.notifications, notification);
            }
            Intent::MarkNotificationRead(id) => {
                self.notifications = notifications::mark_read(self.notifications, &id);
            }
            Intent::ClearNotifications => {
                self.notifications = Vec::new();
            }
            Intent::SetUser(patch) => {
                self.user = self.user.merged(patch);
            }
            Intent::RestoreSnapshot(snapshot) => {
                self.cart = snapshot.cart;
                self.wishlist = snapshot.wishlist;
                self.notifications = snapshot.notifications;
            }
        }

        self
    }

    /// Whether a product has a cart line.
    #[must_use]
    pub fn is_in_cart(&self, product: ProductId) -> bool {
        self.cart.iter().any(|line| line.product_id == product)
    }

    /// Whether a product is wishlisted.
    #[must_use]
    pub fn is_in_wishlist(&self, product: ProductId) -> bool {
        self.wishlist.iter().any(|entry| entry.product_id == product)
    }

    /// Quantity of a product in the cart; 0 when absent.
    #[must_use]
    pub fn cart_item_quantity(&self, product: ProductId) -> u32 {
        self.cart
            .iter()
            .find(|line| line.product_id == product)
            .map_or(0, |line| line.quantity)
    }

    /// Sum of `unit_price` × `quantity` over all cart lines.
    #[must_use]
    pub fn cart_subtotal(&self) -> Price {
        pricing::subtotal(&self.cart)
    }

    /// Sum of quantities over all cart lines (not the line count).
    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.cart
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Number of unread notifications.
    #[must_use]
    pub fn unread_notification_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }
}
