//! Cart value type.
//!
//! The cart is an explicit value owned by a single session-scoped context.
//! All mutation goes through [`Cart::merge`], [`Cart::set_quantity`], and
//! [`Cart::remove`]; persistence is the caller's concern (the site crate
//! stores the cart in the session record behind a storage port).
//!
//! Lines are keyed by product plus the selected size and color, and carry
//! a snapshot of the price, discount, name, and image taken at add time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// Composite identity of a cart line.
///
/// Two additions with the same product, size, and color address the same
/// line; anything else is a distinct line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartKey {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// A single cart line with its add-time product snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub key: CartKey,
    pub name: String,
    pub quantity: u32,
    /// Undiscounted unit price at add time.
    pub unit_price: Decimal,
    /// Percentage discount at add time, if any.
    pub discount_percent: Option<Decimal>,
    pub image: Option<String>,
}

impl CartLine {
    /// Unit price after applying the snapshotted discount.
    #[must_use]
    pub fn effective_unit_price(&self) -> Decimal {
        self.discount_percent.map_or(self.unit_price, |discount| {
            self.unit_price * (Decimal::ONE_HUNDRED - discount) / Decimal::ONE_HUNDRED
        })
    }

    /// Total for this line (effective unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.effective_unit_price() * Decimal::from(self.quantity)
    }
}

/// A session-scoped shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Merge a line into the cart.
    ///
    /// If a line with the same [`CartKey`] already exists its quantity is
    /// incremented and the existing snapshot is kept; otherwise the line is
    /// appended as-is.
    pub fn merge(&mut self, line: CartLine) {
        match self.lines.iter_mut().find(|l| l.key == line.key) {
            Some(existing) => existing.quantity += line.quantity,
            None => self.lines.push(line),
        }
    }

    /// Set the quantity of the line with the given key.
    ///
    /// A quantity of zero removes the line. Returns `false` if no line
    /// matches the key.
    pub fn set_quantity(&mut self, key: &CartKey, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(key);
        }
        match self.lines.iter_mut().find(|l| &l.key == key) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove the line with the given key.
    ///
    /// Returns `false` if no line matches the key.
    pub fn remove(&mut self, key: &CartKey) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.key != key);
        self.lines.len() < before
    }

    /// All lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of items across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of discounted line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: i64) -> Decimal {
        Decimal::from(v)
    }

    fn key(product_id: i32, size: Option<&str>, color: Option<&str>) -> CartKey {
        CartKey {
            product_id: ProductId::new(product_id),
            size: size.map(str::to_owned),
            color: color.map(str::to_owned),
        }
    }

    fn line(product_id: i32, size: Option<&str>, color: Option<&str>, quantity: u32) -> CartLine {
        CartLine {
            key: key(product_id, size, color),
            name: format!("product {product_id}"),
            quantity,
            unit_price: d(100),
            discount_percent: None,
            image: None,
        }
    }

    #[test]
    fn test_merge_same_key_increments_quantity() {
        let mut cart = Cart::default();
        cart.merge(line(5, Some("M"), Some("red"), 1));
        cart.merge(line(5, Some("M"), Some("red"), 1));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_merge_different_key_adds_line() {
        let mut cart = Cart::default();
        cart.merge(line(5, Some("M"), Some("red"), 1));
        cart.merge(line(5, Some("L"), Some("red"), 1));
        cart.merge(line(6, Some("M"), Some("red"), 1));

        assert_eq!(cart.lines().len(), 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_merge_keeps_existing_snapshot() {
        let mut cart = Cart::default();
        cart.merge(line(1, None, None, 1));

        let mut repriced = line(1, None, None, 2);
        repriced.unit_price = d(250);
        cart.merge(repriced);

        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.lines()[0].unit_price, d(100));
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::default();
        cart.merge(line(1, None, None, 1));

        assert!(cart.set_quantity(&key(1, None, None), 4));
        assert_eq!(cart.lines()[0].quantity, 4);

        // Zero removes the line
        assert!(cart.set_quantity(&key(1, None, None), 0));
        assert!(cart.is_empty());

        assert!(!cart.set_quantity(&key(9, None, None), 1));
    }

    #[test]
    fn test_remove_missing_key() {
        let mut cart = Cart::default();
        cart.merge(line(1, Some("M"), None, 1));

        assert!(!cart.remove(&key(1, Some("L"), None)));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_effective_unit_price_with_discount() {
        let mut discounted = line(1, None, None, 1);
        discounted.discount_percent = Some(d(25));

        assert_eq!(discounted.effective_unit_price(), d(75));
        assert_eq!(line(1, None, None, 1).effective_unit_price(), d(100));
    }

    #[test]
    fn test_subtotal_sums_discounted_totals() {
        let mut cart = Cart::default();
        let mut discounted = line(1, None, None, 2);
        discounted.discount_percent = Some(d(10));
        cart.merge(discounted);
        cart.merge(line(2, None, None, 1));

        // 2 * 90 + 1 * 100
        assert_eq!(cart.subtotal(), d(280));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut cart = Cart::default();
        cart.merge(line(5, Some("M"), Some("red"), 2));

        let json = serde_json::to_string(&cart).expect("serialize");
        let back: Cart = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cart);
    }
}
