//! Cart persistence behind the session.
//!
//! The cart itself is a plain value type ([`bazaar_core::Cart`]); this
//! module decides where it lives between requests. Handlers talk to a
//! [`CartStore`] so cart logic can be tested without a running session
//! backend.

use bazaar_core::Cart;
use tower_sessions::Session;

/// Session key holding the serialized cart.
const CART_KEY: &str = "cart";

/// Cart load/store errors.
#[derive(Debug, thiserror::Error)]
pub enum CartStoreError {
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Where carts live between requests.
pub trait CartStore {
    /// Load the current cart, or an empty one if none is stored.
    fn load(&self) -> impl Future<Output = Result<Cart, CartStoreError>> + Send;

    /// Persist the cart.
    fn save(&self, cart: &Cart) -> impl Future<Output = Result<(), CartStoreError>> + Send;
}

/// Cart storage backed by the tower-sessions session.
pub struct SessionCartStore {
    session: Session,
}

impl SessionCartStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl CartStore for SessionCartStore {
    async fn load(&self) -> Result<Cart, CartStoreError> {
        let cart = self.session.get::<Cart>(CART_KEY).await?.unwrap_or_default();
        Ok(cart)
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        self.session.insert(CART_KEY, cart).await?;
        Ok(())
    }
}

#[cfg(test)]
pub mod testing {
    //! In-memory cart store for handler-level tests.

    use std::sync::Mutex;

    use super::{Cart, CartStore, CartStoreError};

    #[derive(Default)]
    pub struct MemoryCartStore {
        cart: Mutex<Cart>,
    }

    impl CartStore for MemoryCartStore {
        async fn load(&self) -> Result<Cart, CartStoreError> {
            #[allow(clippy::unwrap_used)]
            Ok(self.cart.lock().unwrap().clone())
        }

        async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
            #[allow(clippy::unwrap_used)]
            {
                *self.cart.lock().unwrap() = cart.clone();
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use bazaar_core::{CartKey, CartLine, ProductId};
    use rust_decimal::Decimal;

    use super::testing::MemoryCartStore;
    use super::*;

    fn line(id: i32, qty: u32) -> CartLine {
        CartLine {
            key: CartKey {
                product_id: ProductId::new(id),
                size: None,
                color: None,
            },
            name: format!("product-{id}"),
            quantity: qty,
            unit_price: Decimal::from(10),
            discount_percent: None,
            image: None,
        }
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryCartStore::default();

        let mut cart = store.load().await.expect("load");
        assert!(cart.is_empty());

        cart.merge(line(1, 2));
        store.save(&cart).await.expect("save");

        let reloaded = store.load().await.expect("reload");
        assert_eq!(reloaded.item_count(), 2);
    }
}
