//! Vitrine
//!
//! Vitrine is the client-side session-state engine of a demonstration
//! wholesale storefront: a reducer-driven state container for cart, wishlist
//! and notifications, a shared pricing computation, and a linear checkout
//! flow, all over injected storage and presentation collaborators.

pub mod catalog;
pub mod checkout;
pub mod fixtures;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod snapshot;
pub mod state;
pub mod store;
