//! Order store.
//!
//! Owns the order collection. An order is created atomically from cart
//! contents at checkout and is immutable afterwards except for its status,
//! which only moves forward along pending → shipped → delivered.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::domain::{CartItem, Order, OrderEvent, OrderLine, OrderStatus, ShippingAddress, User};
use crate::store::observer::{Subscribers, SubscriptionId};
use crate::{MarketplaceError, Result};

#[derive(Debug, Default)]
pub struct OrderStore {
    orders: Vec<Order>,
    subscribers: Subscribers<OrderEvent>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from existing records, e.g. demo data. Records are
    /// trusted as-is.
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders,
            subscribers: Subscribers::default(),
        }
    }

    /// Freezes the given cart contents into a new pending order and returns
    /// its id. The total is recomputed from the lines, never trusted from
    /// the caller.
    pub fn create(
        &mut self,
        customer: &User,
        items: &[CartItem],
        shipping_address: ShippingAddress,
    ) -> Result<String> {
        if items.is_empty() {
            return Err(MarketplaceError::EmptyOrder);
        }
        let lines: Vec<OrderLine> = items
            .iter()
            .map(|item| OrderLine {
                product_id: item.product.id.clone(),
                product_name: item.product.name.clone(),
                quantity: item.quantity,
                unit_price: item.product.price,
                vendor_id: item.product.vendor_id.clone(),
            })
            .collect();
        let total_amount = lines
            .iter()
            .map(OrderLine::subtotal)
            .sum::<Decimal>()
            .round_dp(2);
        let id = Uuid::new_v4().to_string();
        self.orders.push(Order {
            id: id.clone(),
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            customer_email: customer.email.to_string(),
            items: lines,
            status: OrderStatus::Pending,
            total_amount,
            date: Utc::now(),
            shipping_address,
        });
        info!(order_id = %id, customer_id = %customer.id, total = %total_amount, "order created");
        self.subscribers.notify(&OrderEvent::Created {
            order_id: id.clone(),
            total: total_amount,
        });
        Ok(id)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn list_by_customer(&self, customer_id: &str) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect()
    }

    /// Orders containing at least one line owned by `vendor_id`. The whole
    /// order is returned, other vendors' lines included; callers needing a
    /// vendor-isolated view filter `items` themselves.
    pub fn list_by_vendor(&self, vendor_id: &str) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| o.items.iter().any(|line| line.vendor_id == vendor_id))
            .cloned()
            .collect()
    }

    /// Moves an order forward along the status chain. Re-asserting the
    /// current status is a no-op; moving backward fails and leaves the order
    /// untouched.
    pub fn update_status(&mut self, order_id: &str, new_status: OrderStatus) -> Result<()> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| MarketplaceError::OrderNotFound(order_id.to_owned()))?;
        if new_status < order.status {
            return Err(MarketplaceError::InvalidStatusTransition {
                from: order.status,
                to: new_status,
            });
        }
        if new_status == order.status {
            return Ok(());
        }
        order.status = new_status;
        info!(order_id, status = %new_status, "order status updated");
        self.subscribers.notify(&OrderEvent::StatusChanged {
            order_id: order_id.to_owned(),
            status: new_status,
        });
        Ok(())
    }

    pub fn subscribe(&mut self, listener: impl Fn(&OrderEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}
