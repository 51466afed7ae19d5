//! Store change events.
//!
//! Each store notifies its subscribers synchronously after a successful
//! mutation, in the order the mutations were issued.

use rust_decimal::Decimal;

use super::OrderStatus;

#[derive(Clone, Debug, PartialEq)]
pub enum CatalogEvent {
    Created { product_id: String },
    Updated { product_id: String },
    Deleted { product_id: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum CartEvent {
    /// `quantity` is the quantity now stored on the line, after merging and
    /// stock clamping.
    Added { product_id: String, quantity: u32 },
    QuantitySet { product_id: String, quantity: u32 },
    Removed { product_id: String },
    Cleared,
}

#[derive(Clone, Debug, PartialEq)]
pub enum OrderEvent {
    Created { order_id: String, total: Decimal },
    StatusChanged { order_id: String, status: OrderStatus },
}

#[derive(Clone, Debug, PartialEq)]
pub enum IdentityEvent {
    Registered { user_id: String },
    LoggedIn { user_id: String },
    LoggedOut,
}
