//! Checkout
//!
//! A linear, client-side flow over the store's cart: address → payment →
//! review → confirmation. Guards are silent no-ops (the UI disables the
//! triggering control); the only user-visible failure is starting checkout
//! with an empty cart.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    pricing::{self, Quote},
    state::Severity,
    store::Store,
};

/// Errors raised when entering checkout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Checkout cannot be entered with an empty cart; the UI redirects to an
    /// empty-cart notice instead.
    #[error("cannot start checkout with an empty cart")]
    EmptyCart,
}

/// The steps of the checkout flow, in order. `Confirmation` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    /// Choosing a delivery address.
    Address,
    /// Choosing a payment method.
    Payment,
    /// Reviewing the order before placing it.
    Review,
    /// The order has been placed.
    Confirmation,
}

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Net-30 business credit terms.
    #[serde(rename = "credit")]
    BusinessCredit,
    /// Direct bank transfer.
    NetBanking,
    /// UPI transfer.
    Upi,
    /// Cash on delivery.
    Cod,
}

impl PaymentMethod {
    /// The short code used in order records.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            PaymentMethod::BusinessCredit => "credit",
            PaymentMethod::NetBanking => "netbanking",
            PaymentMethod::Upi => "upi",
            PaymentMethod::Cod => "cod",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A saved delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    /// Address id.
    pub id: String,

    /// Short label, e.g. "Head Office".
    pub label: String,

    /// Receiving company.
    pub company_name: String,

    /// Person to contact on delivery.
    pub contact_person: String,

    /// First address line.
    pub address_line1: String,

    /// Second address line, when needed.
    pub address_line2: Option<String>,

    /// City.
    pub city: String,

    /// State.
    pub state: String,

    /// Postal code.
    pub pincode: String,

    /// Contact phone.
    pub phone: String,

    /// Contact email.
    pub email: String,

    /// GST registration for the invoice.
    pub gst_number: String,

    /// Whether this is the account's default address.
    pub is_default: bool,
}

/// Everything the order gateway needs to submit an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    /// Selected delivery address id.
    pub address_id: String,

    /// Selected payment method.
    pub payment_method: PaymentMethod,

    /// Free-text delivery instructions.
    pub notes: String,

    /// The priced order.
    pub quote: Quote,
}

/// What the gateway hands back: the order's reference token.
pub type OrderReference = String;

/// The result of a placed order, for the confirmation panel.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    /// Reference token for the order.
    pub reference: OrderReference,

    /// The priced order as submitted.
    pub quote: Quote,

    /// Payment method chosen.
    pub payment_method: PaymentMethod,
}

/// Remote order submission. The flow assumes submission always eventually
/// resolves; there is no cancellation or timeout.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submit the order and return its reference.
    async fn submit(&self, order: &OrderDraft) -> OrderReference;
}

/// Stand-in gateway that resolves after a fixed latency, as the demo
/// storefront has no backend.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedGateway {
    latency: Duration,
}

impl SimulatedGateway {
    /// Gateway with the demo's two-second processing delay.
    #[must_use]
    pub fn new() -> Self {
        Self::with_latency(Duration::from_secs(2))
    }

    /// Gateway with a custom latency; tests use zero.
    #[must_use]
    pub fn with_latency(latency: Duration) -> Self {
        SimulatedGateway { latency }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderGateway for SimulatedGateway {
    async fn submit(&self, order: &OrderDraft) -> OrderReference {
        tokio::time::sleep(self.latency).await;

        debug!(total = %order.quote.total, "simulated order accepted");

        let millis = Timestamp::now().as_millisecond().unsigned_abs() % 1_000_000;
        format!("TB-{millis:06}")
    }
}

/// The checkout state machine.
///
/// Forward transitions are guarded by the step's selection; backward
/// transitions are unconditional, except out of `Confirmation`.
#[derive(Debug)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    selected_address: Option<String>,
    payment_method: Option<PaymentMethod>,
    order_notes: String,
    processing: bool,
}

impl CheckoutFlow {
    /// Enter checkout. Checked once here, not per-transition: an empty cart
    /// refuses entry outright.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when the cart has no lines.
    pub fn begin(store: &Store) -> Result<Self, CheckoutError> {
        if store.state().cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(CheckoutFlow {
            step: CheckoutStep::Address,
            selected_address: None,
            payment_method: None,
            order_notes: String::new(),
            processing: false,
        })
    }

    /// The current step.
    #[must_use]
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Whether an order submission is in flight.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// The selected address id, once chosen.
    #[must_use]
    pub fn selected_address(&self) -> Option<&str> {
        self.selected_address.as_deref()
    }

    /// The selected payment method, once chosen.
    #[must_use]
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    /// Choose the delivery address.
    pub fn select_address(&mut self, address_id: impl Into<String>) {
        self.selected_address = Some(address_id.into());
    }

    /// Choose the payment method.
    pub fn select_payment(&mut self, method: PaymentMethod) {
        self.payment_method = Some(method);
    }

    /// Attach free-text delivery instructions.
    pub fn set_order_notes(&mut self, notes: impl Into<String>) {
        self.order_notes = notes.into();
    }

    /// Advance one step, if the current step's guard holds.
    ///
    /// `Review` does not advance here; [`CheckoutFlow::place_order`] is the
    /// review → confirmation transition. Returns the (possibly unchanged)
    /// current step.
    pub fn advance(&mut self) -> CheckoutStep {
        self.step = match self.step {
            CheckoutStep::Address if self.selected_address.is_some() => CheckoutStep::Payment,
            CheckoutStep::Payment if self.payment_method.is_some() => CheckoutStep::Review,
            step => step,
        };

        self.step
    }

    /// Step back one step. `Confirmation` is terminal; `Address` has nowhere
    /// to go.
    pub fn back(&mut self) -> CheckoutStep {
        self.step = match self.step {
            CheckoutStep::Payment => CheckoutStep::Address,
            CheckoutStep::Review => CheckoutStep::Payment,
            step => step,
        };

        self.step
    }

    /// Place the order: submit through the gateway, clear the cart, push the
    /// success notification, and move to `Confirmation`.
    ///
    /// Only valid from `Review` with a payment method selected and no
    /// submission already in flight; otherwise a silent no-op returning
    /// `None`. While the submission runs, the flow reports
    /// [`CheckoutFlow::is_processing`] and refuses re-entry, so a
    /// double-click cannot place two orders.
    pub async fn place_order(
        &mut self,
        store: &mut Store,
        gateway: &dyn OrderGateway,
    ) -> Option<OrderReceipt> {
        if self.step != CheckoutStep::Review || self.processing {
            return None;
        }

        let payment_method = self.payment_method?;
        let address_id = self.selected_address.clone()?;

        self.processing = true;

        let quote = pricing::quote(&store.state().cart);
        let draft = OrderDraft {
            address_id,
            payment_method,
            notes: self.order_notes.clone(),
            quote,
        };

        let reference = gateway.submit(&draft).await;

        store.clear_cart();
        store.notify(
            "Order Placed Successfully",
            format!(
                "Your order for {} has been confirmed. Invoice will be generated shortly.",
                quote.total.money()
            ),
            Severity::Success,
            Some("/orders".to_owned()),
        );

        self.step = CheckoutStep::Confirmation;
        self.processing = false;

        Some(OrderReceipt {
            reference,
            quote,
            payment_method,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        catalog::ProductId,
        prices::Price,
        snapshot::MemoryStore,
        state::{AppState, CartLine},
        store::SilentToasts,
    };

    use super::*;

    fn store_with_cart(lines: Vec<CartLine>) -> Store {
        let seed = AppState {
            cart: lines,
            ..AppState::default()
        };

        Store::open(seed, Box::new(MemoryStore::new()), Box::new(SilentToasts))
    }

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
    fn begin_refuses_empty_cart() {
        let store = store_with_cart(Vec::new());

        assert_eq!(
            CheckoutFlow::begin(&store).err(),
            Some(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn advance_without_address_stays_on_address() -> testresult::TestResult {
        let store = store_with_cart(vec![line(1, 100, 1)]);
        let mut flow = CheckoutFlow::begin(&store)?;

        assert_eq!(flow.advance(), CheckoutStep::Address);

        flow.select_address("1");
        assert_eq!(flow.advance(), CheckoutStep::Payment);

        Ok(())
    }

    #[test]
    fn advance_without_payment_stays_on_payment() -> testresult::TestResult {
        let store = store_with_cart(vec![line(1, 100, 1)]);
        let mut flow = CheckoutFlow::begin(&store)?;
        flow.select_address("1");
        flow.advance();

        assert_eq!(flow.advance(), CheckoutStep::Payment);

        flow.select_payment(PaymentMethod::Cod);
        assert_eq!(flow.advance(), CheckoutStep::Review);

        Ok(())
    }

    #[test]
    fn back_walks_the_steps_in_reverse() -> testresult::TestResult {
        let store = store_with_cart(vec![line(1, 100, 1)]);
        let mut flow = CheckoutFlow::begin(&store)?;
        flow.select_address("1");
        flow.select_payment(PaymentMethod::Upi);
        flow.advance();
        flow.advance();

        assert_eq!(flow.back(), CheckoutStep::Payment);
        assert_eq!(flow.back(), CheckoutStep::Address);
        assert_eq!(flow.back(), CheckoutStep::Address);

        Ok(())
    }

    #[tokio::test]
    async fn place_order_outside_review_is_noop() -> testresult::TestResult {
        let mut store = store_with_cart(vec![line(1, 100, 1)]);
        let mut flow = CheckoutFlow::begin(&store)?;
        let gateway = SimulatedGateway::with_latency(Duration::ZERO);

        assert!(flow.place_order(&mut store, &gateway).await.is_none());
        assert_eq!(flow.step(), CheckoutStep::Address);
        assert!(!store.state().cart.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn place_order_from_review_confirms_and_clears() -> testresult::TestResult {
        let mut store = store_with_cart(vec![line(1, 9999, 1)]);
        let mut flow = CheckoutFlow::begin(&store)?;
        flow.select_address("1");
        flow.select_payment(PaymentMethod::Cod);
        flow.advance();
        flow.advance();

        let gateway = SimulatedGateway::with_latency(Duration::ZERO);
        let receipt = flow.place_order(&mut store, &gateway).await;

        let receipt = receipt.ok_or("expected a receipt")?;
        assert!(receipt.reference.starts_with("TB-"));
        assert_eq!(receipt.quote.total, Price::new(9999 + 1800 + 500));

        assert_eq!(flow.step(), CheckoutStep::Confirmation);
        assert!(store.state().cart.is_empty());
        assert!(!flow.is_processing());

        Ok(())
    }

    #[tokio::test]
    async fn place_order_cannot_run_twice() -> testresult::TestResult {
        let mut store = store_with_cart(vec![line(1, 100, 1)]);
        let mut flow = CheckoutFlow::begin(&store)?;
        flow.select_address("1");
        flow.select_payment(PaymentMethod::Cod);
        flow.advance();
        flow.advance();

        let gateway = SimulatedGateway::with_latency(Duration::ZERO);

        assert!(flow.place_order(&mut store, &gateway).await.is_some());
        // Confirmation is terminal; a second submission is refused.
        assert!(flow.place_order(&mut store, &gateway).await.is_none());
        assert_eq!(store.state().notifications.len(), 1);

        Ok(())
    }
}
