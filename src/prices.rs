//! Prices

use std::{
    fmt,
    iter::Sum,
    ops::{Add, Deref},
};

use rusty_money::{Money, iso};
use serde::{Deserialize, Serialize};

/// Currency for all storefront amounts.
pub const CURRENCY: &iso::Currency = iso::INR;

/// Represents a price in whole currency units.
///
/// The demo catalog quotes whole rupees, so a `Price` of 2400 is ₹2,400.
/// The representation is unsigned, so negative amounts cannot exist, and
/// arithmetic saturates rather than wrapping.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price {
    value: u64,
}

impl Price {
    /// A zero amount.
    pub const ZERO: Price = Price { value: 0 };

    /// Creates a new Price
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Price { value }
    }

    /// The price multiplied by a line quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Price {
        Price {
            value: self.value.saturating_mul(u64::from(quantity)),
        }
    }

    /// The amount as [`Money`], for user-facing formatting. Amounts beyond
    /// the signed range clamp at the maximum representable value.
    #[must_use]
    pub fn money(self) -> Money<'static, iso::Currency> {
        Money::from_major(i64::try_from(self.value).unwrap_or(i64::MAX), CURRENCY)
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price {
            value: self.value.saturating_add(rhs.value),
        }
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.money())
    }
}
