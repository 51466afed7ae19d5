//! Shopping cart store.
//!
//! Owns the current shopper's line items, one per product id. Quantities are
//! bounded by the stock of the product handed to each operation; requests
//! above stock are clamped, not rejected.
//!
//! The cart writes itself to the session snapshot after every successful
//! mutation and restores from it on construction, so contents survive a page
//! reload.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::domain::{CartEvent, CartItem, Product};
use crate::session::{SharedSession, CART_KEY};
use crate::store::observer::{Subscribers, SubscriptionId};
use crate::{MarketplaceError, Result};

#[derive(Debug)]
pub struct CartStore {
    items: Vec<CartItem>,
    session: SharedSession,
    subscribers: Subscribers<CartEvent>,
}

impl CartStore {
    pub fn new(session: SharedSession) -> Self {
        let items = restore(&session);
        Self {
            items,
            session,
            subscribers: Subscribers::default(),
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `quantity` of `product`, merging into an existing line for the
    /// same product id. The resulting quantity is clamped to the product's
    /// stock; the stored quantity is returned so callers can tell the shopper
    /// when part of the request was dropped.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<u32> {
        if quantity == 0 || product.stock == 0 {
            return Err(MarketplaceError::InvalidQuantity(quantity));
        }
        let stored = match self.items.iter_mut().find(|i| i.product.id == product.id) {
            Some(item) => {
                item.quantity = item.quantity.saturating_add(quantity).min(product.stock);
                item.quantity
            }
            None => {
                let clamped = quantity.min(product.stock);
                self.items.push(CartItem {
                    product: product.clone(),
                    quantity: clamped,
                });
                clamped
            }
        };
        self.persist();
        debug!(product_id = %product.id, quantity = stored, "cart line updated");
        self.subscribers.notify(&CartEvent::Added {
            product_id: product.id.clone(),
            quantity: stored,
        });
        Ok(stored)
    }

    /// Replaces the quantity on an existing line. Unknown ids and requests
    /// outside `1..=stock` are ignored; callers pre-validate UI bounds.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) {
        let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) else {
            return;
        };
        if quantity == 0 || quantity > item.product.stock {
            debug!(product_id, quantity, "ignoring out-of-range quantity");
            return;
        }
        item.quantity = quantity;
        self.persist();
        self.subscribers.notify(&CartEvent::QuantitySet {
            product_id: product_id.to_owned(),
            quantity,
        });
    }

    /// Removes the line for `product_id`; a second call is a no-op.
    pub fn remove(&mut self, product_id: &str) {
        let before = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        if self.items.len() == before {
            return;
        }
        self.persist();
        self.subscribers.notify(&CartEvent::Removed {
            product_id: product_id.to_owned(),
        });
    }

    /// Empties the cart, e.g. after a successful checkout.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
        self.subscribers.notify(&CartEvent::Cleared);
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of line totals, using the price snapshot held in each line.
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn subscribe(&mut self, listener: impl Fn(&CartEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn persist(&self) {
        match serde_json::to_string(&self.items) {
            Ok(raw) => self.session.borrow_mut().put(CART_KEY, raw),
            Err(err) => warn!(%err, "failed to serialize cart snapshot"),
        }
    }
}

fn restore(session: &SharedSession) -> Vec<CartItem> {
    let Some(raw) = session.borrow().get(CART_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(err) => {
            warn!(%err, "discarding unreadable cart snapshot");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySession;

    fn product(id: &str, price: Decimal, stock: u32) -> Product {
        Product {
            id: id.into(),
            name: format!("Product {id}"),
            description: String::new(),
            price,
            images: vec![],
            category: "General".into(),
            vendor_id: "v1".into(),
            vendor_name: "Acme".into(),
            stock,
            rating: Decimal::ZERO,
            reviews: 0,
        }
    }

    #[test]
    fn add_merges_lines_and_clamps_to_stock() {
        let mut cart = CartStore::new(MemorySession::shared());
        let p1 = product("p1", Decimal::new(1000, 2), 5);

        assert_eq!(cart.add(&p1, 3).unwrap(), 3);
        assert_eq!(cart.add(&p1, 4).unwrap(), 5); // clamped from 7
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn add_rejects_zero_and_out_of_stock() {
        let mut cart = CartStore::new(MemorySession::shared());
        let in_stock = product("p1", Decimal::ONE, 5);
        let sold_out = product("p2", Decimal::ONE, 0);

        assert!(matches!(
            cart.add(&in_stock, 0),
            Err(MarketplaceError::InvalidQuantity(0))
        ));
        assert!(matches!(
            cart.add(&sold_out, 1),
            Err(MarketplaceError::InvalidQuantity(1))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn add_increments_total_items_by_the_stored_quantity() {
        let mut cart = CartStore::new(MemorySession::shared());
        cart.add(&product("p1", Decimal::ONE, 10), 4).unwrap();
        assert_eq!(cart.total_items(), 4);
        cart.add(&product("p2", Decimal::ONE, 10), 2).unwrap();
        assert_eq!(cart.total_items(), 6);
    }

    #[test]
    fn set_quantity_ignores_out_of_range_requests() {
        let mut cart = CartStore::new(MemorySession::shared());
        let p1 = product("p1", Decimal::ONE, 5);
        cart.add(&p1, 2).unwrap();

        cart.set_quantity("p1", 0);
        assert_eq!(cart.total_items(), 2);
        cart.set_quantity("p1", 6);
        assert_eq!(cart.total_items(), 2);
        cart.set_quantity("missing", 1);
        assert_eq!(cart.total_items(), 2);

        cart.set_quantity("p1", 5);
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut cart = CartStore::new(MemorySession::shared());
        cart.add(&product("p1", Decimal::ONE, 5), 1).unwrap();

        cart.remove("p1");
        let after_first = cart.items().to_vec();
        cart.remove("p1");
        assert_eq!(cart.items(), after_first.as_slice());
        assert!(cart.is_empty());
    }

    #[test]
    fn totals_use_the_price_snapshot() {
        let mut cart = CartStore::new(MemorySession::shared());
        cart.add(&product("p1", Decimal::new(1999, 2), 10), 2).unwrap();
        cart.add(&product("p2", Decimal::new(500, 2), 10), 3).unwrap();

        assert_eq!(cart.total_price(), Decimal::new(5498, 2));
    }

    #[test]
    fn snapshot_round_trips_product_and_quantity_pairs() {
        let session = MemorySession::shared();
        {
            let mut cart = CartStore::new(session.clone());
            cart.add(&product("p1", Decimal::new(1999, 2), 10), 2).unwrap();
            cart.add(&product("p2", Decimal::new(500, 2), 10), 1).unwrap();
        }

        let restored = CartStore::new(session);
        let pairs: Vec<(String, u32)> = restored
            .items()
            .iter()
            .map(|i| (i.product.id.clone(), i.quantity))
            .collect();
        assert_eq!(pairs, vec![("p1".into(), 2), ("p2".into(), 1)]);
        // held snapshots may legitimately diverge from the live catalog;
        // only the pairs are guaranteed
        assert_eq!(restored.items()[0].product.price, Decimal::new(1999, 2));
    }

    #[test]
    fn unreadable_snapshot_starts_an_empty_cart() {
        let session = MemorySession::shared();
        session.borrow_mut().put(CART_KEY, "not json".into());
        let cart = CartStore::new(session);
        assert!(cart.is_empty());
    }

    #[test]
    fn clear_empties_cart_and_snapshot() {
        let session = MemorySession::shared();
        let mut cart = CartStore::new(session.clone());
        cart.add(&product("p1", Decimal::ONE, 5), 2).unwrap();
        cart.clear();

        assert!(cart.is_empty());
        let restored = CartStore::new(session);
        assert!(restored.is_empty());
    }

    #[test]
    fn mutations_notify_subscribers() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut cart = CartStore::new(MemorySession::shared());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        cart.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        cart.add(&product("p1", Decimal::ONE, 5), 2).unwrap();
        cart.set_quantity("p1", 3);
        cart.remove("p1");

        assert_eq!(
            *seen.borrow(),
            vec![
                CartEvent::Added {
                    product_id: "p1".into(),
                    quantity: 2
                },
                CartEvent::QuantitySet {
                    product_id: "p1".into(),
                    quantity: 3
                },
                CartEvent::Removed {
                    product_id: "p1".into()
                },
            ]
        );
    }
}
